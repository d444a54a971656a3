//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (assignments, definitions, control flow, imports)
//! - Expression parsing (operators, calls, displays, comprehensions)
//! - Literal decoding for strings, bytes and numbers
//! - Target context marking for assignment, deletion and loops
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod literals;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
