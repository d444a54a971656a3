use std::{collections::VecDeque, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, OPERATORS, STRING_PREFIXES};

lazy_static! {
    static ref NUMBER_PATTERN: Regex = Regex::new(
        r"^(?:0[xX][0-9a-fA-F_]*(?:\.[0-9a-fA-F_]*)?|(?:0[oObB])?[0-9_]*(?:\.[0-9_]*)?(?:[eE][+-]?[0-9_]*)?)j?"
    )
    .unwrap();
}

/// Source of physical lines. Each call returns the next line including its terminator;
/// `None` (or an empty line) means the input is exhausted.
pub trait LineReader {
    fn read_line(&mut self) -> Option<String>;
}

impl<F> LineReader for F
where
    F: FnMut() -> Option<String>,
{
    fn read_line(&mut self) -> Option<String> {
        self()
    }
}

/// In-memory line reader over a complete source text.
pub struct SourceLines<'a> {
    rest: &'a str,
}

impl<'a> SourceLines<'a> {
    pub fn new(source: &'a str) -> Self {
        SourceLines { rest: source }
    }
}

impl LineReader for SourceLines<'_> {
    fn read_line(&mut self) -> Option<String> {
        if self.rest.is_empty() {
            return None;
        }

        let end = self
            .rest
            .find('\n')
            .map(|index| index + 1)
            .unwrap_or(self.rest.len());
        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(line.to_string())
    }
}

/// Current physical line and the byte offset being scanned.
struct LineCursor {
    text: Rc<str>,
    pos: usize,
}

impl LineCursor {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }
}

/// Lazy token stream over a [`LineReader`].
///
/// Tokens are produced one physical line at a time. The stream always ends with a
/// single `EndMarker`, preceded by one `Dedent` per open indentation level. After an
/// error or the `EndMarker` the iterator is exhausted.
pub struct Tokenizer<R: LineReader> {
    reader: R,
    file: Rc<String>,
    /// Widths of the open indentation levels, strictly increasing from 0.
    indent_stack: Vec<usize>,
    paren_level: usize,
    lineno: u32,
    /// Set once a line without a terminator was read.
    no_newline: bool,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<R: LineReader> Tokenizer<R> {
    pub fn new(reader: R, file: Option<String>) -> Self {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<unknown>"))
        };

        Tokenizer {
            reader,
            file: file_name,
            indent_stack: vec![0],
            paren_level: 0,
            lineno: 0,
            no_newline: false,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    fn push(&mut self, kind: TokenKind, value: String, line: u32, raw_line: &Rc<str>) {
        self.pending
            .push_back(MK_TOKEN!(kind, value, line, Rc::clone(raw_line)));
    }

    fn error(&self, error: ErrorImpl, line: u32) -> Error {
        Error::new(error, Position(line, Rc::clone(&self.file)))
    }

    fn current_indent(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    /// Reads the next physical line, normalizing its terminator to `\n`.
    fn pull_line(&mut self) -> Option<Rc<str>> {
        let mut line = self.reader.read_line().filter(|line| !line.is_empty())?;
        self.lineno += 1;

        if line.ends_with("\r\n") {
            line.truncate(line.len() - 2);
            line.push('\n');
        }
        if !line.ends_with('\n') {
            line.push('\n');
            self.no_newline = true;
        }

        Some(Rc::from(line))
    }

    fn finish(&mut self) {
        let empty: Rc<str> = Rc::from("");
        while self.current_indent() > 0 {
            self.indent_stack.pop();
            self.push(TokenKind::Dedent, String::new(), self.lineno, &empty);
        }
        self.push(TokenKind::EndMarker, String::new(), self.lineno, &empty);
        self.finished = true;
    }

    fn track_indent(&mut self, width: usize, cursor: &LineCursor) -> Result<(), Error> {
        let line = self.lineno;

        if width > self.current_indent() {
            self.indent_stack.push(width);
            self.push(
                TokenKind::Indent,
                cursor.text[..width].to_string(),
                line,
                &cursor.text,
            );
            tracing::debug!(line, width, "indent");
        } else if width < self.current_indent() {
            while width < self.current_indent() {
                self.indent_stack.pop();
                self.push(TokenKind::Dedent, String::new(), line, &cursor.text);
            }
            if self.current_indent() != width {
                return Err(self.error(ErrorImpl::InconsistentDedent { width }, line));
            }
            tracing::debug!(line, width, "dedent");
        }

        Ok(())
    }

    /// Tokenizes the next physical line (plus any lines it continues onto).
    fn scan_line(&mut self) -> Result<(), Error> {
        let Some(text) = self.pull_line() else {
            self.finish();
            return Ok(());
        };

        let width = text.len() - text.trim_start_matches([' ', '\t']).len();
        let mut cursor = LineCursor { text, pos: width };
        let line = self.lineno;

        if cursor.rest() == "\n" || cursor.rest() == "\x0c\n" {
            self.push(TokenKind::Nl, String::from("\n"), line, &cursor.text);
            return Ok(());
        }

        if cursor.rest().starts_with('#') {
            let comment = cursor.rest().trim_end_matches('\n').to_string();
            self.push(TokenKind::Comment, comment, line, &cursor.text);
            self.push(TokenKind::Nl, String::from("\n"), line, &cursor.text);
            return Ok(());
        }

        if self.paren_level == 0 {
            self.track_indent(width, &cursor)?;
        }

        while cursor.pos < cursor.text.len() {
            let line = self.lineno;
            let rest = cursor.rest();
            let Some(c) = rest.chars().next() else {
                break;
            };

            if c.is_ascii_digit()
                || (c == '.' && rest[1..].starts_with(|ch: char| ch.is_ascii_digit()))
            {
                let end = NUMBER_PATTERN
                    .find(rest)
                    .map(|found| found.end())
                    .filter(|end| *end > 0)
                    .unwrap_or(1);
                let number = rest[..end].to_string();
                self.push(TokenKind::Number, number, line, &cursor.text);
                cursor.pos += end;
            } else if is_identifier_start(c) {
                let end = rest
                    .char_indices()
                    .find(|(_, ch)| !is_identifier_char(*ch))
                    .map(|(index, _)| index)
                    .unwrap_or(rest.len());
                let name = rest[..end].to_string();
                let quoted = rest[end..].starts_with(['"', '\'']);
                cursor.pos += end;

                if quoted && STRING_PREFIXES.contains(name.as_str()) {
                    let raw_line = Rc::clone(&cursor.text);
                    let literal = self.scan_string(&mut cursor)?;
                    self.push(TokenKind::String, name + &literal, line, &raw_line);
                } else {
                    self.push(TokenKind::Name, name, line, &cursor.text);
                }
            } else if rest == "\\\n" {
                match self.pull_line() {
                    Some(next) => cursor = LineCursor { text: next, pos: 0 },
                    None => return Err(self.error(ErrorImpl::UnexpectedEof, line)),
                }
            } else if c == '\n' {
                let value = if self.no_newline {
                    String::new()
                } else {
                    String::from("\n")
                };
                let kind = if self.paren_level > 0 {
                    TokenKind::Nl
                } else {
                    TokenKind::Newline
                };
                self.push(kind, value, line, &cursor.text);
                break;
            } else if c.is_whitespace() {
                cursor.pos += c.len_utf8();
            } else if c == '"' || c == '\'' {
                let raw_line = Rc::clone(&cursor.text);
                let literal = self.scan_string(&mut cursor)?;
                self.push(TokenKind::String, literal, line, &raw_line);
            } else if c == '#' {
                let comment = rest.trim_end_matches('\n').to_string();
                self.push(TokenKind::Comment, comment, line, &cursor.text);
                cursor.pos = cursor.text.len() - 1;
            } else {
                let op = OPERATORS
                    .iter()
                    .find(|op| rest.starts_with(**op))
                    .map(|op| op.to_string())
                    .unwrap_or_else(|| c.to_string());

                match c {
                    '(' | '[' | '{' if op.len() == 1 => self.paren_level += 1,
                    ')' | ']' | '}' if op.len() == 1 => {
                        self.paren_level = self.paren_level.saturating_sub(1)
                    }
                    _ => {}
                }

                cursor.pos += op.len();
                self.push(TokenKind::Op, op, line, &cursor.text);
            }
        }

        Ok(())
    }

    /// Scans a string literal starting at the opening quote under the cursor and
    /// returns its source text, quotes included. May pull further lines.
    fn scan_string(&mut self, cursor: &mut LineCursor) -> Result<String, Error> {
        let start_line = self.lineno;
        let rest = cursor.rest();

        if rest.starts_with("\"\"\"") || rest.starts_with("'''") {
            let sep = rest[..3].to_string();
            let mut literal = sep.clone();
            let mut segment = rest[3..].to_string();
            let mut from = 0;

            loop {
                match segment[from..].find(&sep) {
                    Some(offset) => {
                        let index = from + offset;
                        if index > 0 && segment.as_bytes()[index - 1] == b'\\' {
                            from = index + 1;
                            continue;
                        }

                        let end = index + sep.len();
                        literal.push_str(&segment[..end]);
                        cursor.pos = cursor.text.len() - (segment.len() - end);
                        return Ok(literal);
                    }
                    None => {
                        literal.push_str(&segment);
                        let Some(next) = self.pull_line() else {
                            return Err(self.error(ErrorImpl::UnterminatedString, start_line));
                        };
                        segment = next.to_string();
                        cursor.text = next;
                        cursor.pos = 0;
                        from = 0;
                    }
                }
            }
        }

        let mut chars = rest.chars();
        let quote = chars.next().unwrap_or('"');
        let mut literal = String::from(quote);
        let mut index = cursor.pos + quote.len_utf8();

        loop {
            let Some(c) = cursor.text[index..].chars().next() else {
                return Err(self.error(ErrorImpl::UnterminatedString, start_line));
            };
            index += c.len_utf8();
            literal.push(c);

            if c == '\\' {
                let Some(escaped) = cursor.text[index..].chars().next() else {
                    return Err(self.error(ErrorImpl::UnterminatedString, start_line));
                };
                index += escaped.len_utf8();
                literal.push(escaped);

                if escaped == '\n' {
                    let Some(next) = self.pull_line() else {
                        return Err(self.error(ErrorImpl::UnterminatedString, start_line));
                    };
                    cursor.text = next;
                    index = 0;
                }
            } else if c == quote {
                cursor.pos = index;
                return Ok(literal);
            } else if c == '\n' {
                return Err(self.error(ErrorImpl::UnterminatedString, start_line));
            }
        }
    }
}

impl<R: LineReader> Iterator for Tokenizer<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if let Err(error) = self.scan_line() {
                self.pending.clear();
                self.finished = true;
                return Some(Err(error));
            }
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c as u32 >= 0xaa
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c as u32 >= 0xaa
}

/// Creates a lazy token stream over `reader`.
pub fn generate_tokens<R: LineReader>(reader: R, file: Option<String>) -> Tokenizer<R> {
    Tokenizer::new(reader, file)
}

/// Tokenizes a complete source text.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let tokens = generate_tokens(SourceLines::new(source), file).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}
