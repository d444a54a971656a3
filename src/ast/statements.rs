use super::{
    ast::{Expr, Stmt},
    types::{Alias, Arguments, ExceptHandler, Keyword, Operator, WithItem},
};

// DEFINITIONS

/// Function definition, shared by `def` and `async def`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub args: Arguments,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
    pub returns: Option<Box<Expr>>,
    /// Line of the `def` keyword. Not a reflected field.
    pub lineno: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<Expr>,
    pub keywords: Vec<Keyword>,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
    pub lineno: u32,
}

// ASSIGNMENT

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub targets: Vec<Expr>,
}

/// `t1 = t2 = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub targets: Vec<Expr>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AugAssign {
    pub target: Expr,
    pub op: Operator,
    pub value: Expr,
}

/// `target: annotation [= value]`. `simple` is 1 when the target is a bare name.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnAssign {
    pub target: Expr,
    pub annotation: Expr,
    pub value: Option<Expr>,
    pub simple: u8,
}

// CONTROL FLOW

/// Loop, shared by `for` and `async for`.
#[derive(Debug, Clone, PartialEq)]
pub struct For {
    pub target: Expr,
    pub iter: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

/// `elif` chains are nested `If` nodes in `orelse`.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

/// Context manager block, shared by `with` and `async with`.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub items: Vec<WithItem>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Raise {
    pub exc: Option<Expr>,
    pub cause: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Try {
    pub body: Vec<Stmt>,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Vec<Stmt>,
    pub finalbody: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assert {
    pub test: Expr,
    pub msg: Option<Expr>,
}

// NAMESPACES

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub names: Vec<Alias>,
}

/// `from .module import names`. `level` counts the leading dots.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFrom {
    pub module: Option<String>,
    pub names: Vec<Alias>,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nonlocal {
    pub names: Vec<String>,
}

/// Expression evaluated for its side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub value: Expr,
}
