use super::{expressions::*, statements::*};

/// Root of a parsed unit, selected by the parse mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Mod {
    /// `exec`: a sequence of statements
    Module(Module),
    /// `single`: one interactive statement
    Interactive(Interactive),
    /// `eval`: a single expression
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interactive {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub body: Box<Expr>,
}

impl Mod {
    pub fn kind(&self) -> &'static str {
        match self {
            Mod::Module(_) => "Module",
            Mod::Interactive(_) => "Interactive",
            Mod::Expression(_) => "Expression",
        }
    }
}

/// Statement Types
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FunctionDef(FunctionDef),
    AsyncFunctionDef(FunctionDef),
    ClassDef(ClassDef),
    Return(Return),
    Delete(Delete),
    Assign(Assign),
    AugAssign(AugAssign),
    AnnAssign(AnnAssign),
    For(For),
    AsyncFor(For),
    While(While),
    If(If),
    With(With),
    AsyncWith(With),
    Raise(Raise),
    Try(Try),
    Assert(Assert),
    Import(Import),
    ImportFrom(ImportFrom),
    Global(Global),
    Nonlocal(Nonlocal),
    Expr(ExprStmt),
    Pass,
    Break,
    Continue,
}

impl Stmt {
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::FunctionDef(_) => "FunctionDef",
            Stmt::AsyncFunctionDef(_) => "AsyncFunctionDef",
            Stmt::ClassDef(_) => "ClassDef",
            Stmt::Return(_) => "Return",
            Stmt::Delete(_) => "Delete",
            Stmt::Assign(_) => "Assign",
            Stmt::AugAssign(_) => "AugAssign",
            Stmt::AnnAssign(_) => "AnnAssign",
            Stmt::For(_) => "For",
            Stmt::AsyncFor(_) => "AsyncFor",
            Stmt::While(_) => "While",
            Stmt::If(_) => "If",
            Stmt::With(_) => "With",
            Stmt::AsyncWith(_) => "AsyncWith",
            Stmt::Raise(_) => "Raise",
            Stmt::Try(_) => "Try",
            Stmt::Assert(_) => "Assert",
            Stmt::Import(_) => "Import",
            Stmt::ImportFrom(_) => "ImportFrom",
            Stmt::Global(_) => "Global",
            Stmt::Nonlocal(_) => "Nonlocal",
            Stmt::Expr(_) => "Expr",
            Stmt::Pass => "Pass",
            Stmt::Break => "Break",
            Stmt::Continue => "Continue",
        }
    }
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    BoolOp(BoolOp),
    BinOp(BinOp),
    UnaryOp(UnaryOp),
    Lambda(Lambda),
    IfExp(IfExp),
    Dict(Dict),
    Set(Set),
    ListComp(Comp),
    SetComp(Comp),
    DictComp(DictComp),
    GeneratorExp(Comp),
    Await(Await),
    Yield(Yield),
    YieldFrom(YieldFrom),
    Compare(Compare),
    Call(Call),
    Num(Num),
    Str(Str),
    Bytes(Bytes),
    NameConstant(NameConstant),
    Ellipsis,
    Attribute(Attribute),
    Subscript(Subscript),
    Starred(Starred),
    Name(Name),
    List(List),
    Tuple(Tuple),
}

impl Expr {
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::BoolOp(_) => "BoolOp",
            Expr::BinOp(_) => "BinOp",
            Expr::UnaryOp(_) => "UnaryOp",
            Expr::Lambda(_) => "Lambda",
            Expr::IfExp(_) => "IfExp",
            Expr::Dict(_) => "Dict",
            Expr::Set(_) => "Set",
            Expr::ListComp(_) => "ListComp",
            Expr::SetComp(_) => "SetComp",
            Expr::DictComp(_) => "DictComp",
            Expr::GeneratorExp(_) => "GeneratorExp",
            Expr::Await(_) => "Await",
            Expr::Yield(_) => "Yield",
            Expr::YieldFrom(_) => "YieldFrom",
            Expr::Compare(_) => "Compare",
            Expr::Call(_) => "Call",
            Expr::Num(_) => "Num",
            Expr::Str(_) => "Str",
            Expr::Bytes(_) => "Bytes",
            Expr::NameConstant(_) => "NameConstant",
            Expr::Ellipsis => "Ellipsis",
            Expr::Attribute(_) => "Attribute",
            Expr::Subscript(_) => "Subscript",
            Expr::Starred(_) => "Starred",
            Expr::Name(_) => "Name",
            Expr::List(_) => "List",
            Expr::Tuple(_) => "Tuple",
        }
    }

    pub fn name(id: impl Into<String>) -> Expr {
        Expr::Name(Name::new(id))
    }

    pub fn int(value: i128) -> Expr {
        Expr::Num(Num {
            n: Number::Int(value),
        })
    }
}
