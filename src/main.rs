use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use pyfront::{ast::dump, display_error, lexer::lexer::tokenize, parse, Mode};

/// Tokenize or parse a Python-style source file and print the result
#[derive(Parser, Debug)]
#[command(name = "pyfront")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source file to read, `-` for standard input
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// What to parse: exec, eval or single
    #[arg(long, default_value_t = Mode::Exec)]
    mode: Mode,

    /// Print the token stream instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Print the tree with one field per line
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let cli = Cli::parse();

    let (file_name, source) = match read_source(&cli.file) {
        Ok(read) => read,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    if cli.tokens {
        return match tokenize(&source, Some(file_name)) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{}", token);
                }
                tracing::info!(elapsed = ?start.elapsed(), "tokenized");
                ExitCode::SUCCESS
            }
            Err(error) => {
                display_error(&error, &source);
                ExitCode::FAILURE
            }
        };
    }

    let tree = match parse(&source, Some(file_name), cli.mode) {
        Ok(tree) => tree,
        Err(error) => {
            display_error(&error, &source);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(elapsed = ?start.elapsed(), "parsed");

    let text = dump(&tree);
    if cli.pretty {
        println!("{}", pretty_print(&text));
    } else {
        println!("{}", text);
    }

    ExitCode::SUCCESS
}

fn read_source(path: &PathBuf) -> io::Result<(String, String)> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok((String::from("<stdin>"), source));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((file_name, read_to_string(path)?))
}

/// Breaks a dump after every opening bracket and comma, indenting by depth.
/// Quoted text is copied through untouched.
fn pretty_print(string: &str) -> String {
    let mut result = String::new();
    let mut indent = 0usize;
    let mut quote = None;
    let mut escaped = false;
    let mut ignore_next_space = false;

    for c in string.chars() {
        if let Some(open) = quote {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                result.push(c);
            }
            '(' | '[' => {
                indent += 1;
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
            }
            ')' | ']' => {
                indent = indent.saturating_sub(1);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                result.push(c);
            }
            ',' => {
                result.push(c);
                result.push('\n');
                result.push_str(&"  ".repeat(indent));
                ignore_next_space = true;
            }
            ' ' if ignore_next_space => {
                ignore_next_space = false;
            }
            _ => result.push(c),
        }
    }

    result
}
