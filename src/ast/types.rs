//! Support nodes of the tree.
//!
//! This module defines everything that is neither a statement nor an expression:
//!
//! - Operator enums (binary, unary, comparison, boolean)
//! - Expression contexts
//! - Subscript slices
//! - Parameter lists, call keywords, import aliases, `with` items,
//!   comprehension clauses and exception handlers

use super::ast::{Expr, Stmt};

/// Binary operator, also used by augmented assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
}

impl Operator {
    pub fn from_binary(text: &str) -> Option<Operator> {
        let op = match text {
            "+" => Operator::Add,
            "-" => Operator::Sub,
            "*" => Operator::Mult,
            "@" => Operator::MatMult,
            "/" => Operator::Div,
            "%" => Operator::Mod,
            "**" => Operator::Pow,
            "<<" => Operator::LShift,
            ">>" => Operator::RShift,
            "|" => Operator::BitOr,
            "^" => Operator::BitXor,
            "&" => Operator::BitAnd,
            "//" => Operator::FloorDiv,
            _ => return None,
        };
        Some(op)
    }

    /// Maps an in-place operator such as `+=` to its binary operator.
    pub fn from_augmented(text: &str) -> Option<Operator> {
        text.strip_suffix('=').and_then(Operator::from_binary)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operator::Add => "Add",
            Operator::Sub => "Sub",
            Operator::Mult => "Mult",
            Operator::MatMult => "MatMult",
            Operator::Div => "Div",
            Operator::Mod => "Mod",
            Operator::Pow => "Pow",
            Operator::LShift => "LShift",
            Operator::RShift => "RShift",
            Operator::BitOr => "BitOr",
            Operator::BitXor => "BitXor",
            Operator::BitAnd => "BitAnd",
            Operator::FloorDiv => "FloorDiv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Invert,
    Not,
    UAdd,
    USub,
}

impl UnaryOperator {
    pub fn kind(&self) -> &'static str {
        match self {
            UnaryOperator::Invert => "Invert",
            UnaryOperator::Not => "Not",
            UnaryOperator::UAdd => "UAdd",
            UnaryOperator::USub => "USub",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOperator {
    /// Single-token comparison operators. `is not` and `not in` are built by their handlers.
    pub fn from_text(text: &str) -> Option<CmpOperator> {
        let op = match text {
            "==" => CmpOperator::Eq,
            "!=" => CmpOperator::NotEq,
            "<" => CmpOperator::Lt,
            "<=" => CmpOperator::LtE,
            ">" => CmpOperator::Gt,
            ">=" => CmpOperator::GtE,
            "is" => CmpOperator::Is,
            "in" => CmpOperator::In,
            _ => return None,
        };
        Some(op)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CmpOperator::Eq => "Eq",
            CmpOperator::NotEq => "NotEq",
            CmpOperator::Lt => "Lt",
            CmpOperator::LtE => "LtE",
            CmpOperator::Gt => "Gt",
            CmpOperator::GtE => "GtE",
            CmpOperator::Is => "Is",
            CmpOperator::IsNot => "IsNot",
            CmpOperator::In => "In",
            CmpOperator::NotIn => "NotIn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOperator {
    And,
    Or,
}

impl BoolOperator {
    pub fn kind(&self) -> &'static str {
        match self {
            BoolOperator::And => "And",
            BoolOperator::Or => "Or",
        }
    }
}

/// How an expression is used. Everything is `Load` until a target pass rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExprContext {
    #[default]
    Load,
    Store,
    Del,
    AugLoad,
    AugStore,
    Param,
}

impl ExprContext {
    pub fn kind(&self) -> &'static str {
        match self {
            ExprContext::Load => "Load",
            ExprContext::Store => "Store",
            ExprContext::Del => "Del",
            ExprContext::AugLoad => "AugLoad",
            ExprContext::AugStore => "AugStore",
            ExprContext::Param => "Param",
        }
    }
}

/// Subscript index
#[derive(Debug, Clone, PartialEq)]
pub enum Slice {
    /// `lower:upper:step`
    Slice(SliceRange),
    /// Several dimensions, at least one of them a range
    ExtSlice(ExtSlice),
    Index(Index),
}

impl Slice {
    pub fn kind(&self) -> &'static str {
        match self {
            Slice::Slice(_) => "Slice",
            Slice::ExtSlice(_) => "ExtSlice",
            Slice::Index(_) => "Index",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliceRange {
    pub lower: Option<Box<Expr>>,
    pub upper: Option<Box<Expr>>,
    pub step: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtSlice {
    pub dims: Vec<Slice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub value: Box<Expr>,
}

/// Parameter list of a function or lambda.
///
/// `defaults` align with the tail of `args`; `kw_defaults` has one entry per
/// keyword-only parameter, `None` where it has no default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    pub args: Vec<Arg>,
    pub vararg: Option<Arg>,
    pub kwonlyargs: Vec<Arg>,
    pub kw_defaults: Vec<Option<Expr>>,
    pub kwarg: Option<Arg>,
    pub defaults: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub arg: String,
    pub annotation: Option<Box<Expr>>,
}

/// Keyword argument of a call or class definition. `arg` is `None` for `**mapping`.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub arg: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alias {
    pub name: String,
    pub asname: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithItem {
    pub context_expr: Expr,
    pub optional_vars: Option<Box<Expr>>,
}

/// One `for ... in ... if ...` clause of a comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
    pub is_async: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptHandler {
    pub type_: Option<Expr>,
    pub name: Option<String>,
    pub body: Vec<Stmt>,
}
