#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

pub use parser::parser::{parse, parse_lines, parse_tokens, Mode};

/// Line number (1-based) and file name of a token or error.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

/// Returns the text of the 1-based `line` in `source`, without its terminator.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split_inclusive('\n')
        .nth(line as usize - 1)
        .map(|text| text.trim_end_matches(['\n', '\r']))
}

/// Renders an error with the offending source line and a caret gutter.
///
/// ```text
/// Error: UnterminatedString (Close the string with the same quote it was opened with)
/// -> main.py
///   |
/// 3 | x = 'abc
///   | ^^^^^^^^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}: {}\n", error.get_error_name(), error.get_impl()));
    } else {
        out.push_str(&format!(
            "Error: {}: {} ({})\n",
            error.get_error_name(),
            error.get_impl(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));

    if let Some(line_text) = get_line_at_position(source, position.0) {
        let (line_text_removed, _) = remove_starting_whitespace(line_text);
        let text = line_text_removed.trim_end();
        let carets = text.chars().count().max(1);

        out.push_str(&format!("{:>padding$}\n", "|"));
        out.push_str(&format!("{} | {}\n", line_string, text));
        out.push_str(&format!("{:>padding$} {}\n", "|", "^".repeat(carets)));
    }

    out
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::errors::errors::{Error, ErrorImpl};
    use crate::Position;

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nsecond\r\n\nTesting { }\n";

        assert_eq!(super::get_line_at_position(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line_at_position(source, 2), Some("second"));
        assert_eq!(super::get_line_at_position(source, 3), Some(""));
        assert_eq!(super::get_line_at_position(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line_at_position(source, 5), None);
        assert_eq!(super::get_line_at_position(source, 0), None);
    }

    #[test]
    fn test_remove_starting_whitespace() {
        assert_eq!(
            super::remove_starting_whitespace("  \tx = 1"),
            (String::from("x = 1"), 3)
        );
    }

    #[test]
    fn test_format_error_gutter() {
        let error = Error::new(
            ErrorImpl::UnexpectedIndent,
            Position(2, Rc::new(String::from("main.py"))),
        );
        let rendered = super::format_error(&error, "x = 1\n    y = 2\n");

        assert!(rendered.starts_with("Error: UnexpectedIndent: unexpected indent"));
        assert!(rendered.contains("-> main.py\n"));
        assert!(rendered.contains("2 | y = 2\n"));
        assert!(rendered.contains("  | ^^^^^\n"));
    }
}
