//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$line` - The 1-based line number the token starts on
/// * `$raw_line` - Shared text of the physical line
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), 1, Rc::clone(&raw));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $raw_line:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
            raw_line: $raw_line,
        }
    };
}
