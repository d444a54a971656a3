use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Broad class of a failure, following the order in which the front end can detect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised while scanning characters or decoding a literal.
    Lexical,
    /// An expected token, keyword or structural marker was not found.
    Syntax,
    /// The grammar matched but the construct is forbidden (duplicate `*args`, bad target...).
    Structural,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> u32 {
        self.position.0
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnterminatedString
            | ErrorImpl::UnexpectedEof
            | ErrorImpl::InconsistentDedent { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InvalidEscape { .. } => ErrorCategory::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::ExpectedStatement { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::UnexpectedIndent
            | ErrorImpl::UnexpectedDedent
            | ErrorImpl::MisplacedComprehension => ErrorCategory::Syntax,
            ErrorImpl::DuplicateVarArg
            | ErrorImpl::DuplicateKwArg
            | ErrorImpl::ArgumentAfterKwArg
            | ErrorImpl::NonDefaultArgument
            | ErrorImpl::InvalidTarget { .. }
            | ErrorImpl::InvalidKeywordArgument
            | ErrorImpl::MixedBytesAndStr
            | ErrorImpl::UnexpectedDecorator
            | ErrorImpl::UnexpectedAsync
            | ErrorImpl::MissingExceptOrFinally
            | ErrorImpl::MultipleAnnotationTargets
            | ErrorImpl::EmptySubscript => ErrorCategory::Structural,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedEof => "UnexpectedEof",
            ErrorImpl::InconsistentDedent { .. } => "InconsistentDedent",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedStatement { .. } => "ExpectedStatement",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::UnexpectedIndent => "UnexpectedIndent",
            ErrorImpl::UnexpectedDedent => "UnexpectedDedent",
            ErrorImpl::MisplacedComprehension => "MisplacedComprehension",
            ErrorImpl::DuplicateVarArg => "DuplicateVarArg",
            ErrorImpl::DuplicateKwArg => "DuplicateKwArg",
            ErrorImpl::ArgumentAfterKwArg => "ArgumentAfterKwArg",
            ErrorImpl::NonDefaultArgument => "NonDefaultArgument",
            ErrorImpl::InvalidTarget { .. } => "InvalidTarget",
            ErrorImpl::InvalidKeywordArgument => "InvalidKeywordArgument",
            ErrorImpl::MixedBytesAndStr => "MixedBytesAndStr",
            ErrorImpl::UnexpectedDecorator => "UnexpectedDecorator",
            ErrorImpl::UnexpectedAsync => "UnexpectedAsync",
            ErrorImpl::MissingExceptOrFinally => "MissingExceptOrFinally",
            ErrorImpl::MultipleAnnotationTargets => "MultipleAnnotationTargets",
            ErrorImpl::EmptySubscript => "EmptySubscript",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "Close the string with the same quote it was opened with",
            )),
            ErrorImpl::UnexpectedEof => ErrorTip::Suggestion(String::from(
                "A trailing backslash must be followed by another line",
            )),
            ErrorImpl::InconsistentDedent { width } => ErrorTip::Suggestion(format!(
                "Dedent to a column used by an enclosing block, not column {}",
                width
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it malformed or too large?",
                token
            )),
            ErrorImpl::InvalidEscape { sequence } => ErrorTip::Suggestion(format!(
                "Escape `{}` is truncated or out of range",
                sequence
            )),
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::ExpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("Insert `{}` here", expected))
            }
            ErrorImpl::ExpectedStatement { .. } => ErrorTip::None,
            ErrorImpl::ExpectedExpression { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedIndent => ErrorTip::Suggestion(String::from(
                "Only the body of a compound statement may be indented",
            )),
            ErrorImpl::UnexpectedDedent => ErrorTip::None,
            ErrorImpl::MisplacedComprehension => ErrorTip::Suggestion(String::from(
                "Wrap the generator expression in parentheses",
            )),
            ErrorImpl::DuplicateVarArg | ErrorImpl::DuplicateKwArg => ErrorTip::Suggestion(
                String::from("A parameter list takes at most one `*args` and one `**kwargs`"),
            ),
            ErrorImpl::ArgumentAfterKwArg => ErrorTip::Suggestion(String::from(
                "`**kwargs` must be the last parameter",
            )),
            ErrorImpl::NonDefaultArgument => ErrorTip::Suggestion(String::from(
                "Move parameters without defaults before those with defaults",
            )),
            ErrorImpl::InvalidTarget { kind } => {
                ErrorTip::Suggestion(format!("`{}` cannot be assigned to or deleted", kind))
            }
            ErrorImpl::InvalidKeywordArgument => ErrorTip::Suggestion(String::from(
                "Keyword argument names must be plain identifiers",
            )),
            ErrorImpl::MixedBytesAndStr => ErrorTip::Suggestion(String::from(
                "Adjacent literals must all be bytes or all be text",
            )),
            ErrorImpl::UnexpectedDecorator => ErrorTip::Suggestion(String::from(
                "Decorators can only precede `def`, `async def` or `class`",
            )),
            ErrorImpl::UnexpectedAsync => ErrorTip::Suggestion(String::from(
                "`async` must be followed by `def`, `for` or `with`",
            )),
            ErrorImpl::MissingExceptOrFinally => ErrorTip::Suggestion(String::from(
                "Add an `except` or `finally` clause",
            )),
            ErrorImpl::MultipleAnnotationTargets => ErrorTip::None,
            ErrorImpl::EmptySubscript => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: error: {}",
            self.position.1, self.position.0, self.internal_error
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected end of input after line continuation")]
    UnexpectedEof,
    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent { width: usize },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },

    // Syntax
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected '{expected}', found {found}")]
    ExpectedToken { expected: String, found: String },
    #[error("expected statement, found {found}")]
    ExpectedStatement { found: String },
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: String },
    #[error("unexpected indent")]
    UnexpectedIndent,
    #[error("unexpected unindent")]
    UnexpectedDedent,
    #[error("generator expression must be parenthesized")]
    MisplacedComprehension,

    // Structural
    #[error("more than one *args parameter")]
    DuplicateVarArg,
    #[error("more than one **kwargs parameter")]
    DuplicateKwArg,
    #[error("parameter follows **kwargs")]
    ArgumentAfterKwArg,
    #[error("non-default argument follows default argument")]
    NonDefaultArgument,
    #[error("cannot assign to {kind}")]
    InvalidTarget { kind: String },
    #[error("keyword can't be an expression")]
    InvalidKeywordArgument,
    #[error("cannot mix bytes and nonbytes literals")]
    MixedBytesAndStr,
    #[error("decorator must precede a function or class definition")]
    UnexpectedDecorator,
    #[error("unexpected async keyword")]
    UnexpectedAsync,
    #[error("try statement needs an except or finally clause")]
    MissingExceptOrFinally,
    #[error("only a single target can be annotated")]
    MultipleAnnotationTargets,
    #[error("subscript is empty")]
    EmptySubscript,
}
