//! Owning tree rewrites.
//!
//! A [`Transformer`] consumes nodes and returns their replacements. Statement
//! handlers return a `Vec`: an empty one removes the statement, several splice in
//! multiple statements. [`Transformer::transform_expr_in_list`] does the same for
//! expressions held in sequence fields (`elts`, call arguments, `values`...), while
//! [`Transformer::transform_expr`] replaces a single expression slot.
//! The `fold_*` functions rebuild a node from its transformed children.

use super::{
    ast::{Expr, Mod, Module, Interactive, Expression, Stmt},
    expressions::*,
    statements::*,
    types::{
        Arg, Arguments, Comprehension, ExceptHandler, ExtSlice, Index, Keyword, Slice, SliceRange,
        WithItem,
    },
};

pub trait Transformer {
    fn transform_mod(&mut self, node: Mod) -> Mod {
        fold_mod(self, node)
    }

    fn transform_stmt(&mut self, node: Stmt) -> Vec<Stmt> {
        vec![fold_stmt(self, node)]
    }

    fn transform_expr(&mut self, node: Expr) -> Expr {
        fold_expr(self, node)
    }

    fn transform_expr_in_list(&mut self, node: Expr) -> Vec<Expr> {
        vec![self.transform_expr(node)]
    }
}

pub fn fold_body<T: Transformer + ?Sized>(transformer: &mut T, body: Vec<Stmt>) -> Vec<Stmt> {
    body.into_iter()
        .flat_map(|stmt| transformer.transform_stmt(stmt))
        .collect()
}

pub fn fold_exprs<T: Transformer + ?Sized>(transformer: &mut T, exprs: Vec<Expr>) -> Vec<Expr> {
    exprs
        .into_iter()
        .flat_map(|expr| transformer.transform_expr_in_list(expr))
        .collect()
}

fn fold_box<T: Transformer + ?Sized>(transformer: &mut T, expr: Box<Expr>) -> Box<Expr> {
    Box::new(transformer.transform_expr(*expr))
}

fn fold_opt<T: Transformer + ?Sized>(transformer: &mut T, expr: Option<Expr>) -> Option<Expr> {
    expr.map(|expr| transformer.transform_expr(expr))
}

fn fold_opt_box<T: Transformer + ?Sized>(
    transformer: &mut T,
    expr: Option<Box<Expr>>,
) -> Option<Box<Expr>> {
    expr.map(|expr| fold_box(transformer, expr))
}

pub fn fold_mod<T: Transformer + ?Sized>(transformer: &mut T, node: Mod) -> Mod {
    match node {
        Mod::Module(module) => Mod::Module(Module {
            body: fold_body(transformer, module.body),
        }),
        Mod::Interactive(interactive) => Mod::Interactive(Interactive {
            body: fold_body(transformer, interactive.body),
        }),
        Mod::Expression(expression) => Mod::Expression(Expression {
            body: fold_box(transformer, expression.body),
        }),
    }
}

fn fold_function<T: Transformer + ?Sized>(transformer: &mut T, def: FunctionDef) -> FunctionDef {
    FunctionDef {
        name: def.name,
        args: fold_arguments(transformer, def.args),
        body: fold_body(transformer, def.body),
        decorator_list: fold_exprs(transformer, def.decorator_list),
        returns: fold_opt_box(transformer, def.returns),
        lineno: def.lineno,
    }
}

fn fold_for<T: Transformer + ?Sized>(transformer: &mut T, stmt: For) -> For {
    For {
        target: transformer.transform_expr(stmt.target),
        iter: transformer.transform_expr(stmt.iter),
        body: fold_body(transformer, stmt.body),
        orelse: fold_body(transformer, stmt.orelse),
    }
}

fn fold_with<T: Transformer + ?Sized>(transformer: &mut T, stmt: With) -> With {
    With {
        items: stmt
            .items
            .into_iter()
            .map(|item| WithItem {
                context_expr: transformer.transform_expr(item.context_expr),
                optional_vars: fold_opt_box(transformer, item.optional_vars),
            })
            .collect(),
        body: fold_body(transformer, stmt.body),
    }
}

fn fold_keywords<T: Transformer + ?Sized>(
    transformer: &mut T,
    keywords: Vec<Keyword>,
) -> Vec<Keyword> {
    keywords
        .into_iter()
        .map(|keyword| Keyword {
            arg: keyword.arg,
            value: transformer.transform_expr(keyword.value),
        })
        .collect()
}

pub fn fold_stmt<T: Transformer + ?Sized>(transformer: &mut T, node: Stmt) -> Stmt {
    match node {
        Stmt::FunctionDef(def) => Stmt::FunctionDef(fold_function(transformer, def)),
        Stmt::AsyncFunctionDef(def) => Stmt::AsyncFunctionDef(fold_function(transformer, def)),
        Stmt::ClassDef(class) => Stmt::ClassDef(ClassDef {
            name: class.name,
            bases: fold_exprs(transformer, class.bases),
            keywords: fold_keywords(transformer, class.keywords),
            body: fold_body(transformer, class.body),
            decorator_list: fold_exprs(transformer, class.decorator_list),
            lineno: class.lineno,
        }),
        Stmt::Return(ret) => Stmt::Return(Return {
            value: fold_opt(transformer, ret.value),
        }),
        Stmt::Delete(delete) => Stmt::Delete(Delete {
            targets: fold_exprs(transformer, delete.targets),
        }),
        Stmt::Assign(assign) => Stmt::Assign(Assign {
            targets: fold_exprs(transformer, assign.targets),
            value: transformer.transform_expr(assign.value),
        }),
        Stmt::AugAssign(assign) => Stmt::AugAssign(AugAssign {
            target: transformer.transform_expr(assign.target),
            op: assign.op,
            value: transformer.transform_expr(assign.value),
        }),
        Stmt::AnnAssign(assign) => Stmt::AnnAssign(AnnAssign {
            target: transformer.transform_expr(assign.target),
            annotation: transformer.transform_expr(assign.annotation),
            value: fold_opt(transformer, assign.value),
            simple: assign.simple,
        }),
        Stmt::For(stmt) => Stmt::For(fold_for(transformer, stmt)),
        Stmt::AsyncFor(stmt) => Stmt::AsyncFor(fold_for(transformer, stmt)),
        Stmt::While(stmt) => Stmt::While(While {
            test: transformer.transform_expr(stmt.test),
            body: fold_body(transformer, stmt.body),
            orelse: fold_body(transformer, stmt.orelse),
        }),
        Stmt::If(stmt) => Stmt::If(If {
            test: transformer.transform_expr(stmt.test),
            body: fold_body(transformer, stmt.body),
            orelse: fold_body(transformer, stmt.orelse),
        }),
        Stmt::With(stmt) => Stmt::With(fold_with(transformer, stmt)),
        Stmt::AsyncWith(stmt) => Stmt::AsyncWith(fold_with(transformer, stmt)),
        Stmt::Raise(raise) => Stmt::Raise(Raise {
            exc: fold_opt(transformer, raise.exc),
            cause: fold_opt(transformer, raise.cause),
        }),
        Stmt::Try(stmt) => Stmt::Try(Try {
            body: fold_body(transformer, stmt.body),
            handlers: stmt
                .handlers
                .into_iter()
                .map(|handler| ExceptHandler {
                    type_: fold_opt(transformer, handler.type_),
                    name: handler.name,
                    body: fold_body(transformer, handler.body),
                })
                .collect(),
            orelse: fold_body(transformer, stmt.orelse),
            finalbody: fold_body(transformer, stmt.finalbody),
        }),
        Stmt::Assert(stmt) => Stmt::Assert(Assert {
            test: transformer.transform_expr(stmt.test),
            msg: fold_opt(transformer, stmt.msg),
        }),
        Stmt::Expr(stmt) => Stmt::Expr(ExprStmt {
            value: transformer.transform_expr(stmt.value),
        }),
        stmt @ (Stmt::Import(_)
        | Stmt::ImportFrom(_)
        | Stmt::Global(_)
        | Stmt::Nonlocal(_)
        | Stmt::Pass
        | Stmt::Break
        | Stmt::Continue) => stmt,
    }
}

fn fold_comp<T: Transformer + ?Sized>(transformer: &mut T, comp: Comp) -> Comp {
    Comp {
        elt: fold_box(transformer, comp.elt),
        generators: fold_generators(transformer, comp.generators),
    }
}

fn fold_generators<T: Transformer + ?Sized>(
    transformer: &mut T,
    generators: Vec<Comprehension>,
) -> Vec<Comprehension> {
    generators
        .into_iter()
        .map(|generator| Comprehension {
            target: transformer.transform_expr(generator.target),
            iter: transformer.transform_expr(generator.iter),
            ifs: fold_exprs(transformer, generator.ifs),
            is_async: generator.is_async,
        })
        .collect()
}

pub fn fold_expr<T: Transformer + ?Sized>(transformer: &mut T, node: Expr) -> Expr {
    match node {
        Expr::BoolOp(op) => Expr::BoolOp(BoolOp {
            op: op.op,
            values: fold_exprs(transformer, op.values),
        }),
        Expr::BinOp(op) => Expr::BinOp(BinOp {
            left: fold_box(transformer, op.left),
            op: op.op,
            right: fold_box(transformer, op.right),
        }),
        Expr::UnaryOp(op) => Expr::UnaryOp(UnaryOp {
            op: op.op,
            operand: fold_box(transformer, op.operand),
        }),
        Expr::Lambda(lambda) => Expr::Lambda(Lambda {
            args: fold_arguments(transformer, lambda.args),
            body: fold_box(transformer, lambda.body),
        }),
        Expr::IfExp(ifexp) => Expr::IfExp(IfExp {
            test: fold_box(transformer, ifexp.test),
            body: fold_box(transformer, ifexp.body),
            orelse: fold_box(transformer, ifexp.orelse),
        }),
        Expr::Dict(dict) => Expr::Dict(Dict {
            keys: dict
                .keys
                .into_iter()
                .map(|key| fold_opt(transformer, key))
                .collect(),
            values: dict
                .values
                .into_iter()
                .map(|value| transformer.transform_expr(value))
                .collect(),
        }),
        Expr::Set(set) => Expr::Set(Set {
            elts: fold_exprs(transformer, set.elts),
        }),
        Expr::ListComp(comp) => Expr::ListComp(fold_comp(transformer, comp)),
        Expr::SetComp(comp) => Expr::SetComp(fold_comp(transformer, comp)),
        Expr::GeneratorExp(comp) => Expr::GeneratorExp(fold_comp(transformer, comp)),
        Expr::DictComp(comp) => Expr::DictComp(DictComp {
            key: fold_box(transformer, comp.key),
            value: fold_box(transformer, comp.value),
            generators: fold_generators(transformer, comp.generators),
        }),
        Expr::Await(value) => Expr::Await(Await {
            value: fold_box(transformer, value.value),
        }),
        Expr::Yield(value) => Expr::Yield(Yield {
            value: fold_opt_box(transformer, value.value),
        }),
        Expr::YieldFrom(value) => Expr::YieldFrom(YieldFrom {
            value: fold_box(transformer, value.value),
        }),
        Expr::Compare(compare) => Expr::Compare(Compare {
            left: fold_box(transformer, compare.left),
            ops: compare.ops,
            comparators: compare
                .comparators
                .into_iter()
                .map(|comparator| transformer.transform_expr(comparator))
                .collect(),
        }),
        Expr::Call(call) => Expr::Call(Call {
            func: fold_box(transformer, call.func),
            args: fold_exprs(transformer, call.args),
            keywords: fold_keywords(transformer, call.keywords),
        }),
        Expr::Attribute(attribute) => Expr::Attribute(Attribute {
            value: fold_box(transformer, attribute.value),
            attr: attribute.attr,
            ctx: attribute.ctx,
        }),
        Expr::Subscript(subscript) => Expr::Subscript(Subscript {
            value: fold_box(transformer, subscript.value),
            slice: fold_slice(transformer, subscript.slice),
            ctx: subscript.ctx,
        }),
        Expr::Starred(starred) => Expr::Starred(Starred {
            value: fold_box(transformer, starred.value),
            ctx: starred.ctx,
        }),
        Expr::List(list) => Expr::List(List {
            elts: fold_exprs(transformer, list.elts),
            ctx: list.ctx,
        }),
        Expr::Tuple(tuple) => Expr::Tuple(Tuple {
            elts: fold_exprs(transformer, tuple.elts),
            ctx: tuple.ctx,
        }),
        expr @ (Expr::Num(_)
        | Expr::Str(_)
        | Expr::Bytes(_)
        | Expr::NameConstant(_)
        | Expr::Ellipsis
        | Expr::Name(_)) => expr,
    }
}

pub fn fold_slice<T: Transformer + ?Sized>(transformer: &mut T, node: Slice) -> Slice {
    match node {
        Slice::Slice(range) => Slice::Slice(SliceRange {
            lower: fold_opt_box(transformer, range.lower),
            upper: fold_opt_box(transformer, range.upper),
            step: fold_opt_box(transformer, range.step),
        }),
        Slice::ExtSlice(ext) => Slice::ExtSlice(ExtSlice {
            dims: ext
                .dims
                .into_iter()
                .map(|dim| fold_slice(transformer, dim))
                .collect(),
        }),
        Slice::Index(index) => Slice::Index(Index {
            value: fold_box(transformer, index.value),
        }),
    }
}

fn fold_arg<T: Transformer + ?Sized>(transformer: &mut T, arg: Arg) -> Arg {
    Arg {
        arg: arg.arg,
        annotation: fold_opt_box(transformer, arg.annotation),
    }
}

pub fn fold_arguments<T: Transformer + ?Sized>(transformer: &mut T, node: Arguments) -> Arguments {
    Arguments {
        args: node
            .args
            .into_iter()
            .map(|arg| fold_arg(transformer, arg))
            .collect(),
        vararg: node.vararg.map(|arg| fold_arg(transformer, arg)),
        kwonlyargs: node
            .kwonlyargs
            .into_iter()
            .map(|arg| fold_arg(transformer, arg))
            .collect(),
        kw_defaults: node
            .kw_defaults
            .into_iter()
            .map(|default| fold_opt(transformer, default))
            .collect(),
        kwarg: node.kwarg.map(|arg| fold_arg(transformer, arg)),
        defaults: node
            .defaults
            .into_iter()
            .map(|default| transformer.transform_expr(default))
            .collect(),
    }
}
