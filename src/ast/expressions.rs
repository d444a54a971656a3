use super::{
    ast::Expr,
    types::{Arguments, BoolOperator, CmpOperator, Comprehension, ExprContext, Keyword, Operator,
        Slice, UnaryOperator},
};

// OPERATIONS

/// `a and b and c`. Chains of the same operator share one node.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolOp {
    pub op: BoolOperator,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub left: Box<Expr>,
    pub op: Operator,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOperator,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub args: Arguments,
    pub body: Box<Expr>,
}

/// `body if test else orelse`
#[derive(Debug, Clone, PartialEq)]
pub struct IfExp {
    pub test: Box<Expr>,
    pub body: Box<Expr>,
    pub orelse: Box<Expr>,
}

/// `left op1 c1 op2 c2 ...`, one entry in `comparators` per operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub left: Box<Expr>,
    pub ops: Vec<CmpOperator>,
    pub comparators: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: Box<Expr>,
    pub args: Vec<Expr>,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Await {
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Yield {
    pub value: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldFrom {
    pub value: Box<Expr>,
}

// DISPLAYS

/// Dictionary display. A `None` key stands for `**mapping` unpacking.
#[derive(Debug, Clone, PartialEq)]
pub struct Dict {
    pub keys: Vec<Option<Expr>>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub elts: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub elts: Vec<Expr>,
    pub ctx: ExprContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    pub elts: Vec<Expr>,
    pub ctx: ExprContext,
}

/// Element comprehension, shared by list, set and generator forms.
#[derive(Debug, Clone, PartialEq)]
pub struct Comp {
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictComp {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

// LITERALS

/// Decoded numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(i128),
    /// Decimal digits of an integer too large for `Int`.
    BigInt(String),
    Float(f64),
    /// Imaginary part of a `...j` literal.
    Complex(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Num {
    pub n: Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Str {
    pub s: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bytes {
    pub s: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singleton {
    None,
    True,
    False,
}

/// `None`, `True` or `False`
#[derive(Debug, Clone, PartialEq)]
pub struct NameConstant {
    pub value: Singleton,
}

// ACCESS

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub value: Box<Expr>,
    pub attr: String,
    pub ctx: ExprContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscript {
    pub value: Box<Expr>,
    pub slice: Slice,
    pub ctx: ExprContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Starred {
    pub value: Box<Expr>,
    pub ctx: ExprContext,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub id: String,
    pub ctx: ExprContext,
}

impl Name {
    pub fn new(id: impl Into<String>) -> Self {
        Name {
            id: id.into(),
            ctx: ExprContext::Load,
        }
    }
}
