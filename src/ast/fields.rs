//! Field reflection over the typed tree.
//!
//! [`NodeRef`] is a borrowed view of any node. Its [`NodeRef::fields`] lists the
//! node's fields in their canonical order, which is what generic tools such as the
//! debug dump and [`iter_child_nodes`] rely on.

use super::{
    ast::{Expr, Mod, Stmt},
    expressions::{Number, Singleton},
    types::{
        Alias, Arg, Arguments, BoolOperator, CmpOperator, Comprehension, ExceptHandler,
        ExprContext, Keyword, Operator, Slice, UnaryOperator, WithItem,
    },
};

#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Mod(&'a Mod),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
    Operator(Operator),
    UnaryOperator(UnaryOperator),
    CmpOperator(CmpOperator),
    BoolOperator(BoolOperator),
    ExprContext(ExprContext),
    Slice(&'a Slice),
    Arguments(&'a Arguments),
    Arg(&'a Arg),
    Keyword(&'a Keyword),
    Alias(&'a Alias),
    WithItem(&'a WithItem),
    Comprehension(&'a Comprehension),
    ExceptHandler(&'a ExceptHandler),
}

/// Value held by one reflected field.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Node(NodeRef<'a>),
    List(Vec<FieldValue<'a>>),
    Identifier(&'a str),
    Str(&'a str),
    Bytes(&'a [u8]),
    Number(&'a Number),
    Singleton(Singleton),
    Int(i64),
    /// Absent optional child
    None,
}

impl<'a> From<&'a Mod> for NodeRef<'a> {
    fn from(node: &'a Mod) -> Self {
        NodeRef::Mod(node)
    }
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(node: &'a Stmt) -> Self {
        NodeRef::Stmt(node)
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(node: &'a Expr) -> Self {
        NodeRef::Expr(node)
    }
}

fn expr(node: &Expr) -> FieldValue<'_> {
    FieldValue::Node(NodeRef::Expr(node))
}

fn opt_expr(node: Option<&Expr>) -> FieldValue<'_> {
    node.map(expr).unwrap_or(FieldValue::None)
}

fn exprs(nodes: &[Expr]) -> FieldValue<'_> {
    FieldValue::List(nodes.iter().map(expr).collect())
}

fn stmts(nodes: &[Stmt]) -> FieldValue<'_> {
    FieldValue::List(
        nodes
            .iter()
            .map(|node| FieldValue::Node(NodeRef::Stmt(node)))
            .collect(),
    )
}

fn list<'a, T>(nodes: &'a [T], view: fn(&'a T) -> NodeRef<'a>) -> FieldValue<'a> {
    FieldValue::List(nodes.iter().map(|node| FieldValue::Node(view(node))).collect())
}

fn opt_ident(name: Option<&String>) -> FieldValue<'_> {
    name.map(|name| FieldValue::Identifier(name.as_str()))
        .unwrap_or(FieldValue::None)
}

fn opt_arg(arg: Option<&Arg>) -> FieldValue<'_> {
    arg.map(|arg| FieldValue::Node(NodeRef::Arg(arg)))
        .unwrap_or(FieldValue::None)
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Mod(node) => node.kind(),
            NodeRef::Stmt(node) => node.kind(),
            NodeRef::Expr(node) => node.kind(),
            NodeRef::Operator(op) => op.kind(),
            NodeRef::UnaryOperator(op) => op.kind(),
            NodeRef::CmpOperator(op) => op.kind(),
            NodeRef::BoolOperator(op) => op.kind(),
            NodeRef::ExprContext(ctx) => ctx.kind(),
            NodeRef::Slice(slice) => slice.kind(),
            NodeRef::Arguments(_) => "arguments",
            NodeRef::Arg(_) => "arg",
            NodeRef::Keyword(_) => "keyword",
            NodeRef::Alias(_) => "alias",
            NodeRef::WithItem(_) => "withitem",
            NodeRef::Comprehension(_) => "comprehension",
            NodeRef::ExceptHandler(_) => "ExceptHandler",
        }
    }

    /// The node's fields in canonical order.
    pub fn fields(self) -> Vec<(&'static str, FieldValue<'a>)> {
        match self {
            NodeRef::Mod(node) => mod_fields(node),
            NodeRef::Stmt(node) => stmt_fields(node),
            NodeRef::Expr(node) => expr_fields(node),
            NodeRef::Operator(_)
            | NodeRef::UnaryOperator(_)
            | NodeRef::CmpOperator(_)
            | NodeRef::BoolOperator(_)
            | NodeRef::ExprContext(_) => vec![],
            NodeRef::Slice(Slice::Slice(range)) => vec![
                ("lower", opt_expr(range.lower.as_deref())),
                ("upper", opt_expr(range.upper.as_deref())),
                ("step", opt_expr(range.step.as_deref())),
            ],
            NodeRef::Slice(Slice::ExtSlice(ext)) => {
                vec![("dims", list(&ext.dims, NodeRef::Slice))]
            }
            NodeRef::Slice(Slice::Index(index)) => vec![("value", expr(&index.value))],
            NodeRef::Arguments(args) => vec![
                ("args", list(&args.args, NodeRef::Arg)),
                ("vararg", opt_arg(args.vararg.as_ref())),
                ("kwonlyargs", list(&args.kwonlyargs, NodeRef::Arg)),
                (
                    "kw_defaults",
                    FieldValue::List(
                        args.kw_defaults
                            .iter()
                            .map(|default| opt_expr(default.as_ref()))
                            .collect(),
                    ),
                ),
                ("kwarg", opt_arg(args.kwarg.as_ref())),
                ("defaults", exprs(&args.defaults)),
            ],
            NodeRef::Arg(arg) => vec![
                ("arg", FieldValue::Identifier(&arg.arg)),
                ("annotation", opt_expr(arg.annotation.as_deref())),
            ],
            NodeRef::Keyword(keyword) => vec![
                ("arg", opt_ident(keyword.arg.as_ref())),
                ("value", expr(&keyword.value)),
            ],
            NodeRef::Alias(alias) => vec![
                ("name", FieldValue::Identifier(&alias.name)),
                ("asname", opt_ident(alias.asname.as_ref())),
            ],
            NodeRef::WithItem(item) => vec![
                ("context_expr", expr(&item.context_expr)),
                ("optional_vars", opt_expr(item.optional_vars.as_deref())),
            ],
            NodeRef::Comprehension(comp) => vec![
                ("target", expr(&comp.target)),
                ("iter", expr(&comp.iter)),
                ("ifs", exprs(&comp.ifs)),
                ("is_async", FieldValue::Int(comp.is_async as i64)),
            ],
            NodeRef::ExceptHandler(handler) => vec![
                ("type", opt_expr(handler.type_.as_ref())),
                ("name", opt_ident(handler.name.as_ref())),
                ("body", stmts(&handler.body)),
            ],
        }
    }
}

fn mod_fields(node: &Mod) -> Vec<(&'static str, FieldValue<'_>)> {
    match node {
        Mod::Module(module) => vec![("body", stmts(&module.body))],
        Mod::Interactive(interactive) => vec![("body", stmts(&interactive.body))],
        Mod::Expression(expression) => vec![("body", expr(&expression.body))],
    }
}

fn stmt_fields(node: &Stmt) -> Vec<(&'static str, FieldValue<'_>)> {
    match node {
        Stmt::FunctionDef(def) | Stmt::AsyncFunctionDef(def) => vec![
            ("name", FieldValue::Identifier(&def.name)),
            ("args", FieldValue::Node(NodeRef::Arguments(&def.args))),
            ("body", stmts(&def.body)),
            ("decorator_list", exprs(&def.decorator_list)),
            ("returns", opt_expr(def.returns.as_deref())),
        ],
        Stmt::ClassDef(class) => vec![
            ("name", FieldValue::Identifier(&class.name)),
            ("bases", exprs(&class.bases)),
            ("keywords", list(&class.keywords, NodeRef::Keyword)),
            ("body", stmts(&class.body)),
            ("decorator_list", exprs(&class.decorator_list)),
        ],
        Stmt::Return(ret) => vec![("value", opt_expr(ret.value.as_ref()))],
        Stmt::Delete(delete) => vec![("targets", exprs(&delete.targets))],
        Stmt::Assign(assign) => vec![
            ("targets", exprs(&assign.targets)),
            ("value", expr(&assign.value)),
        ],
        Stmt::AugAssign(assign) => vec![
            ("target", expr(&assign.target)),
            ("op", FieldValue::Node(NodeRef::Operator(assign.op))),
            ("value", expr(&assign.value)),
        ],
        Stmt::AnnAssign(assign) => vec![
            ("target", expr(&assign.target)),
            ("annotation", expr(&assign.annotation)),
            ("value", opt_expr(assign.value.as_ref())),
            ("simple", FieldValue::Int(assign.simple as i64)),
        ],
        Stmt::For(stmt) | Stmt::AsyncFor(stmt) => vec![
            ("target", expr(&stmt.target)),
            ("iter", expr(&stmt.iter)),
            ("body", stmts(&stmt.body)),
            ("orelse", stmts(&stmt.orelse)),
        ],
        Stmt::While(stmt) => vec![
            ("test", expr(&stmt.test)),
            ("body", stmts(&stmt.body)),
            ("orelse", stmts(&stmt.orelse)),
        ],
        Stmt::If(stmt) => vec![
            ("test", expr(&stmt.test)),
            ("body", stmts(&stmt.body)),
            ("orelse", stmts(&stmt.orelse)),
        ],
        Stmt::With(stmt) | Stmt::AsyncWith(stmt) => vec![
            ("items", list(&stmt.items, NodeRef::WithItem)),
            ("body", stmts(&stmt.body)),
        ],
        Stmt::Raise(raise) => vec![
            ("exc", opt_expr(raise.exc.as_ref())),
            ("cause", opt_expr(raise.cause.as_ref())),
        ],
        Stmt::Try(stmt) => vec![
            ("body", stmts(&stmt.body)),
            ("handlers", list(&stmt.handlers, NodeRef::ExceptHandler)),
            ("orelse", stmts(&stmt.orelse)),
            ("finalbody", stmts(&stmt.finalbody)),
        ],
        Stmt::Assert(stmt) => vec![
            ("test", expr(&stmt.test)),
            ("msg", opt_expr(stmt.msg.as_ref())),
        ],
        Stmt::Import(import) => vec![("names", list(&import.names, NodeRef::Alias))],
        Stmt::ImportFrom(import) => vec![
            ("module", opt_ident(import.module.as_ref())),
            ("names", list(&import.names, NodeRef::Alias)),
            ("level", FieldValue::Int(import.level as i64)),
        ],
        Stmt::Global(global) => vec![("names", identifiers(&global.names))],
        Stmt::Nonlocal(nonlocal) => vec![("names", identifiers(&nonlocal.names))],
        Stmt::Expr(stmt) => vec![("value", expr(&stmt.value))],
        Stmt::Pass | Stmt::Break | Stmt::Continue => vec![],
    }
}

fn identifiers(names: &[String]) -> FieldValue<'_> {
    FieldValue::List(
        names
            .iter()
            .map(|name| FieldValue::Identifier(name.as_str()))
            .collect(),
    )
}

fn expr_fields(node: &Expr) -> Vec<(&'static str, FieldValue<'_>)> {
    let ctx = |ctx: ExprContext| FieldValue::Node(NodeRef::ExprContext(ctx));

    match node {
        Expr::BoolOp(op) => vec![
            ("op", FieldValue::Node(NodeRef::BoolOperator(op.op))),
            ("values", exprs(&op.values)),
        ],
        Expr::BinOp(op) => vec![
            ("left", expr(&op.left)),
            ("op", FieldValue::Node(NodeRef::Operator(op.op))),
            ("right", expr(&op.right)),
        ],
        Expr::UnaryOp(op) => vec![
            ("op", FieldValue::Node(NodeRef::UnaryOperator(op.op))),
            ("operand", expr(&op.operand)),
        ],
        Expr::Lambda(lambda) => vec![
            ("args", FieldValue::Node(NodeRef::Arguments(&lambda.args))),
            ("body", expr(&lambda.body)),
        ],
        Expr::IfExp(ifexp) => vec![
            ("test", expr(&ifexp.test)),
            ("body", expr(&ifexp.body)),
            ("orelse", expr(&ifexp.orelse)),
        ],
        Expr::Dict(dict) => vec![
            (
                "keys",
                FieldValue::List(dict.keys.iter().map(|key| opt_expr(key.as_ref())).collect()),
            ),
            ("values", exprs(&dict.values)),
        ],
        Expr::Set(set) => vec![("elts", exprs(&set.elts))],
        Expr::ListComp(comp) | Expr::SetComp(comp) | Expr::GeneratorExp(comp) => vec![
            ("elt", expr(&comp.elt)),
            ("generators", list(&comp.generators, NodeRef::Comprehension)),
        ],
        Expr::DictComp(comp) => vec![
            ("key", expr(&comp.key)),
            ("value", expr(&comp.value)),
            ("generators", list(&comp.generators, NodeRef::Comprehension)),
        ],
        Expr::Await(value) => vec![("value", expr(&value.value))],
        Expr::Yield(value) => vec![("value", opt_expr(value.value.as_deref()))],
        Expr::YieldFrom(value) => vec![("value", expr(&value.value))],
        Expr::Compare(compare) => vec![
            ("left", expr(&compare.left)),
            (
                "ops",
                FieldValue::List(
                    compare
                        .ops
                        .iter()
                        .map(|op| FieldValue::Node(NodeRef::CmpOperator(*op)))
                        .collect(),
                ),
            ),
            ("comparators", exprs(&compare.comparators)),
        ],
        Expr::Call(call) => vec![
            ("func", expr(&call.func)),
            ("args", exprs(&call.args)),
            ("keywords", list(&call.keywords, NodeRef::Keyword)),
        ],
        Expr::Num(num) => vec![("n", FieldValue::Number(&num.n))],
        Expr::Str(string) => vec![("s", FieldValue::Str(&string.s))],
        Expr::Bytes(bytes) => vec![("s", FieldValue::Bytes(&bytes.s))],
        Expr::NameConstant(constant) => vec![("value", FieldValue::Singleton(constant.value))],
        Expr::Ellipsis => vec![],
        Expr::Attribute(attribute) => vec![
            ("value", expr(&attribute.value)),
            ("attr", FieldValue::Identifier(&attribute.attr)),
            ("ctx", ctx(attribute.ctx)),
        ],
        Expr::Subscript(subscript) => vec![
            ("value", expr(&subscript.value)),
            ("slice", FieldValue::Node(NodeRef::Slice(&subscript.slice))),
            ("ctx", ctx(subscript.ctx)),
        ],
        Expr::Starred(starred) => vec![
            ("value", expr(&starred.value)),
            ("ctx", ctx(starred.ctx)),
        ],
        Expr::Name(name) => vec![
            ("id", FieldValue::Identifier(&name.id)),
            ("ctx", ctx(name.ctx)),
        ],
        Expr::List(list) => vec![("elts", exprs(&list.elts)), ("ctx", ctx(list.ctx))],
        Expr::Tuple(tuple) => vec![("elts", exprs(&tuple.elts)), ("ctx", ctx(tuple.ctx))],
    }
}

/// Direct child nodes of `node`, in field order.
pub fn iter_child_nodes<'a>(node: impl Into<NodeRef<'a>>) -> impl Iterator<Item = NodeRef<'a>> {
    fn collect<'a>(value: FieldValue<'a>, out: &mut Vec<NodeRef<'a>>) {
        match value {
            FieldValue::Node(node) => out.push(node),
            FieldValue::List(items) => {
                for item in items {
                    collect(item, out);
                }
            }
            _ => {}
        }
    }

    let mut children = vec![];
    for (_, value) in node.into().fields() {
        collect(value, &mut children);
    }
    children.into_iter()
}

/// Number of nodes in the subtree that have no child nodes.
pub fn leaf_count<'a>(node: impl Into<NodeRef<'a>>) -> usize {
    let node = node.into();
    let mut children = iter_child_nodes(node).peekable();

    if children.peek().is_none() {
        return 1;
    }
    children.map(|child| leaf_count(child)).sum()
}
