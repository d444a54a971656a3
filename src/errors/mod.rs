//! Error types and error handling for the front end.
//!
//! Every failure carries the source line it was detected on and falls into one of
//! three categories:
//!
//! - Lexical errors raised while scanning or decoding literals
//! - Syntax errors raised when an expected construct is missing
//! - Structural errors for constructs the grammar forbids implicitly
//!
//! The first error aborts the parse; there is no recovery.

pub mod errors;
