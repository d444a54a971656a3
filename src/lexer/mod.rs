//! Lexical analysis for indentation-significant source.
//!
//! The tokenizer reads one physical line at a time and produces tokens lazily:
//!
//! - Numbers, names, prefixed and triple-quoted strings, operators
//! - NEWLINE / NL distinction based on bracket depth
//! - INDENT / DEDENT from an indentation stack
//! - Comments are kept as tokens; the parser skips them

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
