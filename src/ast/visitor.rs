//! Read-only traversal of the tree.
//!
//! Implement [`Visitor`] and override the methods for the nodes you care about.
//! The default implementations call the matching `walk_*` function, which visits
//! every child in field order. An override that still wants the children visited
//! calls the `walk_*` function itself.

use super::{
    ast::{Expr, Mod, Stmt},
    types::{Alias, Arg, Arguments, Comprehension, ExceptHandler, Keyword, Slice, WithItem},
};

pub trait Visitor {
    fn visit_mod(&mut self, node: &Mod) {
        walk_mod(self, node);
    }

    fn visit_stmt(&mut self, node: &Stmt) {
        walk_stmt(self, node);
    }

    fn visit_expr(&mut self, node: &Expr) {
        walk_expr(self, node);
    }

    fn visit_slice(&mut self, node: &Slice) {
        walk_slice(self, node);
    }

    fn visit_arguments(&mut self, node: &Arguments) {
        walk_arguments(self, node);
    }

    fn visit_arg(&mut self, node: &Arg) {
        if let Some(annotation) = &node.annotation {
            self.visit_expr(annotation);
        }
    }

    fn visit_keyword(&mut self, node: &Keyword) {
        self.visit_expr(&node.value);
    }

    fn visit_alias(&mut self, _node: &Alias) {}

    fn visit_withitem(&mut self, node: &WithItem) {
        self.visit_expr(&node.context_expr);
        if let Some(vars) = &node.optional_vars {
            self.visit_expr(vars);
        }
    }

    fn visit_comprehension(&mut self, node: &Comprehension) {
        self.visit_expr(&node.target);
        self.visit_expr(&node.iter);
        walk_exprs(self, &node.ifs);
    }

    fn visit_excepthandler(&mut self, node: &ExceptHandler) {
        if let Some(type_) = &node.type_ {
            self.visit_expr(type_);
        }
        walk_body(self, &node.body);
    }
}

pub fn walk_body<V: Visitor + ?Sized>(visitor: &mut V, body: &[Stmt]) {
    for stmt in body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_exprs<V: Visitor + ?Sized>(visitor: &mut V, exprs: &[Expr]) {
    for expr in exprs {
        visitor.visit_expr(expr);
    }
}

fn walk_opt<V: Visitor + ?Sized>(visitor: &mut V, expr: Option<&Expr>) {
    if let Some(expr) = expr {
        visitor.visit_expr(expr);
    }
}

pub fn walk_mod<V: Visitor + ?Sized>(visitor: &mut V, node: &Mod) {
    match node {
        Mod::Module(module) => walk_body(visitor, &module.body),
        Mod::Interactive(interactive) => walk_body(visitor, &interactive.body),
        Mod::Expression(expression) => visitor.visit_expr(&expression.body),
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, node: &Stmt) {
    match node {
        Stmt::FunctionDef(def) | Stmt::AsyncFunctionDef(def) => {
            visitor.visit_arguments(&def.args);
            walk_body(visitor, &def.body);
            walk_exprs(visitor, &def.decorator_list);
            walk_opt(visitor, def.returns.as_deref());
        }
        Stmt::ClassDef(class) => {
            walk_exprs(visitor, &class.bases);
            for keyword in &class.keywords {
                visitor.visit_keyword(keyword);
            }
            walk_body(visitor, &class.body);
            walk_exprs(visitor, &class.decorator_list);
        }
        Stmt::Return(ret) => walk_opt(visitor, ret.value.as_ref()),
        Stmt::Delete(delete) => walk_exprs(visitor, &delete.targets),
        Stmt::Assign(assign) => {
            walk_exprs(visitor, &assign.targets);
            visitor.visit_expr(&assign.value);
        }
        Stmt::AugAssign(assign) => {
            visitor.visit_expr(&assign.target);
            visitor.visit_expr(&assign.value);
        }
        Stmt::AnnAssign(assign) => {
            visitor.visit_expr(&assign.target);
            visitor.visit_expr(&assign.annotation);
            walk_opt(visitor, assign.value.as_ref());
        }
        Stmt::For(stmt) | Stmt::AsyncFor(stmt) => {
            visitor.visit_expr(&stmt.target);
            visitor.visit_expr(&stmt.iter);
            walk_body(visitor, &stmt.body);
            walk_body(visitor, &stmt.orelse);
        }
        Stmt::While(stmt) => {
            visitor.visit_expr(&stmt.test);
            walk_body(visitor, &stmt.body);
            walk_body(visitor, &stmt.orelse);
        }
        Stmt::If(stmt) => {
            visitor.visit_expr(&stmt.test);
            walk_body(visitor, &stmt.body);
            walk_body(visitor, &stmt.orelse);
        }
        Stmt::With(stmt) | Stmt::AsyncWith(stmt) => {
            for item in &stmt.items {
                visitor.visit_withitem(item);
            }
            walk_body(visitor, &stmt.body);
        }
        Stmt::Raise(raise) => {
            walk_opt(visitor, raise.exc.as_ref());
            walk_opt(visitor, raise.cause.as_ref());
        }
        Stmt::Try(stmt) => {
            walk_body(visitor, &stmt.body);
            for handler in &stmt.handlers {
                visitor.visit_excepthandler(handler);
            }
            walk_body(visitor, &stmt.orelse);
            walk_body(visitor, &stmt.finalbody);
        }
        Stmt::Assert(stmt) => {
            visitor.visit_expr(&stmt.test);
            walk_opt(visitor, stmt.msg.as_ref());
        }
        Stmt::Import(import) => {
            for alias in &import.names {
                visitor.visit_alias(alias);
            }
        }
        Stmt::ImportFrom(import) => {
            for alias in &import.names {
                visitor.visit_alias(alias);
            }
        }
        Stmt::Expr(stmt) => visitor.visit_expr(&stmt.value),
        Stmt::Global(_) | Stmt::Nonlocal(_) | Stmt::Pass | Stmt::Break | Stmt::Continue => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, node: &Expr) {
    match node {
        Expr::BoolOp(op) => walk_exprs(visitor, &op.values),
        Expr::BinOp(op) => {
            visitor.visit_expr(&op.left);
            visitor.visit_expr(&op.right);
        }
        Expr::UnaryOp(op) => visitor.visit_expr(&op.operand),
        Expr::Lambda(lambda) => {
            visitor.visit_arguments(&lambda.args);
            visitor.visit_expr(&lambda.body);
        }
        Expr::IfExp(ifexp) => {
            visitor.visit_expr(&ifexp.test);
            visitor.visit_expr(&ifexp.body);
            visitor.visit_expr(&ifexp.orelse);
        }
        Expr::Dict(dict) => {
            for key in dict.keys.iter().flatten() {
                visitor.visit_expr(key);
            }
            walk_exprs(visitor, &dict.values);
        }
        Expr::Set(set) => walk_exprs(visitor, &set.elts),
        Expr::ListComp(comp) | Expr::SetComp(comp) | Expr::GeneratorExp(comp) => {
            visitor.visit_expr(&comp.elt);
            for generator in &comp.generators {
                visitor.visit_comprehension(generator);
            }
        }
        Expr::DictComp(comp) => {
            visitor.visit_expr(&comp.key);
            visitor.visit_expr(&comp.value);
            for generator in &comp.generators {
                visitor.visit_comprehension(generator);
            }
        }
        Expr::Await(value) => visitor.visit_expr(&value.value),
        Expr::Yield(value) => walk_opt(visitor, value.value.as_deref()),
        Expr::YieldFrom(value) => visitor.visit_expr(&value.value),
        Expr::Compare(compare) => {
            visitor.visit_expr(&compare.left);
            walk_exprs(visitor, &compare.comparators);
        }
        Expr::Call(call) => {
            visitor.visit_expr(&call.func);
            walk_exprs(visitor, &call.args);
            for keyword in &call.keywords {
                visitor.visit_keyword(keyword);
            }
        }
        Expr::Attribute(attribute) => visitor.visit_expr(&attribute.value),
        Expr::Subscript(subscript) => {
            visitor.visit_expr(&subscript.value);
            visitor.visit_slice(&subscript.slice);
        }
        Expr::Starred(starred) => visitor.visit_expr(&starred.value),
        Expr::List(list) => walk_exprs(visitor, &list.elts),
        Expr::Tuple(tuple) => walk_exprs(visitor, &tuple.elts),
        Expr::Num(_)
        | Expr::Str(_)
        | Expr::Bytes(_)
        | Expr::NameConstant(_)
        | Expr::Ellipsis
        | Expr::Name(_) => {}
    }
}

pub fn walk_slice<V: Visitor + ?Sized>(visitor: &mut V, node: &Slice) {
    match node {
        Slice::Slice(range) => {
            walk_opt(visitor, range.lower.as_deref());
            walk_opt(visitor, range.upper.as_deref());
            walk_opt(visitor, range.step.as_deref());
        }
        Slice::ExtSlice(ext) => {
            for dim in &ext.dims {
                visitor.visit_slice(dim);
            }
        }
        Slice::Index(index) => visitor.visit_expr(&index.value),
    }
}

pub fn walk_arguments<V: Visitor + ?Sized>(visitor: &mut V, node: &Arguments) {
    for arg in &node.args {
        visitor.visit_arg(arg);
    }
    if let Some(vararg) = &node.vararg {
        visitor.visit_arg(vararg);
    }
    for arg in &node.kwonlyargs {
        visitor.visit_arg(arg);
    }
    for default in node.kw_defaults.iter().flatten() {
        visitor.visit_expr(default);
    }
    if let Some(kwarg) = &node.kwarg {
        visitor.visit_arg(kwarg);
    }
    walk_exprs(visitor, &node.defaults);
}
