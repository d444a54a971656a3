//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Displays, comprehensions, calls and subscripts
//! - Assignment forms and target contexts
//! - Compound statements and parameter lists
//! - Literal decoding
//! - Error reporting

use super::{
    literals::{decode_number, decode_string, StrValue},
    parser::{parse, parse_lines, parse_tokens, Mode},
};
use crate::{
    ast::{ast::{Mod, Stmt}, dump, expressions::Number},
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
};

fn eval(source: &str) -> String {
    dump(&parse(source, Some("test.py".to_string()), Mode::Eval).unwrap())
}

fn exec(source: &str) -> String {
    dump(&parse(source, Some("test.py".to_string()), Mode::Exec).unwrap())
}

fn body(source: &str) -> Vec<Stmt> {
    match parse(source, Some("test.py".to_string()), Mode::Exec).unwrap() {
        Mod::Module(module) => module.body,
        other => panic!("expected a module, got {}", other.kind()),
    }
}

fn error(source: &str, mode: Mode) -> ErrorImpl {
    parse(source, Some("test.py".to_string()), mode)
        .unwrap_err()
        .get_impl()
        .clone()
}

// EXPRESSIONS

#[test]
fn test_parse_simple_module() {
    assert_eq!(
        exec("x = 1\ny = x + 2\n"),
        "Module(body=[Assign(targets=[Name(id='x', ctx=Store())], value=Num(n=1)), \
         Assign(targets=[Name(id='y', ctx=Store())], value=BinOp(left=Name(id='x', ctx=Load()), \
         op=Add(), right=Num(n=2)))])"
    );
}

#[test]
fn test_parse_precedence() {
    assert_eq!(
        eval("1 + 2 * 3"),
        "Expression(body=BinOp(left=Num(n=1), op=Add(), right=BinOp(left=Num(n=2), op=Mult(), right=Num(n=3))))"
    );
    assert_eq!(
        eval("1 - 2 - 3"),
        "Expression(body=BinOp(left=BinOp(left=Num(n=1), op=Sub(), right=Num(n=2)), op=Sub(), right=Num(n=3)))"
    );
}

#[test]
fn test_parse_power_is_right_associative() {
    assert_eq!(
        eval("2 ** 3 ** 2"),
        "Expression(body=BinOp(left=Num(n=2), op=Pow(), right=BinOp(left=Num(n=3), op=Pow(), right=Num(n=2))))"
    );
}

#[test]
fn test_parse_unary_binds_looser_than_power() {
    assert_eq!(
        eval("-2 ** 2"),
        "Expression(body=UnaryOp(op=USub(), operand=BinOp(left=Num(n=2), op=Pow(), right=Num(n=2))))"
    );
    assert_eq!(
        eval("not a == b"),
        "Expression(body=UnaryOp(op=Not(), operand=Compare(left=Name(id='a', ctx=Load()), \
         ops=[Eq()], comparators=[Name(id='b', ctx=Load())])))"
    );
}

#[test]
fn test_parse_comparison_chain() {
    assert_eq!(
        eval("1 < 2 < 3"),
        "Expression(body=Compare(left=Num(n=1), ops=[Lt(), Lt()], comparators=[Num(n=2), Num(n=3)]))"
    );
}

#[test]
fn test_parse_grouped_comparison_does_not_merge() {
    assert_eq!(
        eval("(1 < 2) < 3"),
        "Expression(body=Compare(left=Compare(left=Num(n=1), ops=[Lt()], comparators=[Num(n=2)]), \
         ops=[Lt()], comparators=[Num(n=3)]))"
    );
}

#[test]
fn test_parse_two_word_comparisons() {
    assert_eq!(
        eval("a not in b is not c"),
        "Expression(body=Compare(left=Name(id='a', ctx=Load()), ops=[NotIn(), IsNot()], \
         comparators=[Name(id='b', ctx=Load()), Name(id='c', ctx=Load())]))"
    );
}

#[test]
fn test_parse_boolean_chains() {
    assert_eq!(
        eval("a or b or c"),
        "Expression(body=BoolOp(op=Or(), values=[Name(id='a', ctx=Load()), \
         Name(id='b', ctx=Load()), Name(id='c', ctx=Load())]))"
    );
    assert_eq!(
        eval("a and b or c"),
        "Expression(body=BoolOp(op=Or(), values=[BoolOp(op=And(), values=[Name(id='a', ctx=Load()), \
         Name(id='b', ctx=Load())]), Name(id='c', ctx=Load())]))"
    );
    assert_eq!(
        eval("(a or b) or c"),
        "Expression(body=BoolOp(op=Or(), values=[BoolOp(op=Or(), values=[Name(id='a', ctx=Load()), \
         Name(id='b', ctx=Load())]), Name(id='c', ctx=Load())]))"
    );
}

#[test]
fn test_parse_conditional_expression() {
    assert_eq!(
        eval("a if b else c"),
        "Expression(body=IfExp(test=Name(id='b', ctx=Load()), body=Name(id='a', ctx=Load()), \
         orelse=Name(id='c', ctx=Load())))"
    );
}

#[test]
fn test_parse_adjacent_strings() {
    assert_eq!(eval("\"ab\" 'cd'"), "Expression(body=Str(s='abcd'))");
    assert_eq!(eval("b'a' b'b'"), "Expression(body=Bytes(s=b'ab'))");
    assert_eq!(error("b'a' 'b'", Mode::Eval), ErrorImpl::MixedBytesAndStr);
}

#[test]
fn test_parse_tuples() {
    assert_eq!(
        eval("1, 2,"),
        "Expression(body=Tuple(elts=[Num(n=1), Num(n=2)], ctx=Load()))"
    );
    assert_eq!(eval("()"), "Expression(body=Tuple(elts=[], ctx=Load()))");
    assert_eq!(
        eval("(1,)"),
        "Expression(body=Tuple(elts=[Num(n=1)], ctx=Load()))"
    );
}

#[test]
fn test_parse_constants() {
    assert_eq!(eval("None"), "Expression(body=NameConstant(value=None))");
    assert_eq!(eval("True"), "Expression(body=NameConstant(value=True))");
    assert_eq!(eval("..."), "Expression(body=Ellipsis())");
    assert_eq!(eval("1.5"), "Expression(body=Num(n=1.5))");
    assert_eq!(eval("2j"), "Expression(body=Num(n=2j))");
}

#[test]
fn test_parse_lambda() {
    assert_eq!(
        eval("lambda x, *args, y=1, **kw: x"),
        "Expression(body=Lambda(args=arguments(args=[arg(arg='x', annotation=None)], \
         vararg=arg(arg='args', annotation=None), kwonlyargs=[arg(arg='y', annotation=None)], \
         kw_defaults=[Num(n=1)], kwarg=arg(arg='kw', annotation=None), defaults=[]), \
         body=Name(id='x', ctx=Load())))"
    );
    assert_eq!(
        eval("lambda: 0"),
        "Expression(body=Lambda(args=arguments(args=[], vararg=None, kwonlyargs=[], \
         kw_defaults=[], kwarg=None, defaults=[]), body=Num(n=0)))"
    );
}

#[test]
fn test_parse_list_comprehension() {
    assert_eq!(
        eval("[x for x in y if x]"),
        "Expression(body=ListComp(elt=Name(id='x', ctx=Load()), generators=[comprehension(\
         target=Name(id='x', ctx=Store()), iter=Name(id='y', ctx=Load()), \
         ifs=[Name(id='x', ctx=Load())], is_async=0)]))"
    );
}

#[test]
fn test_parse_nested_comprehension_clauses() {
    let tree = eval("[a for a in b for c in d]");
    assert_eq!(tree.matches("comprehension(").count(), 2);
    assert!(tree.starts_with("Expression(body=ListComp("));
}

#[test]
fn test_parse_generator_argument() {
    assert_eq!(
        eval("f(x for x in y)"),
        "Expression(body=Call(func=Name(id='f', ctx=Load()), args=[GeneratorExp(\
         elt=Name(id='x', ctx=Load()), generators=[comprehension(target=Name(id='x', ctx=Store()), \
         iter=Name(id='y', ctx=Load()), ifs=[], is_async=0)])], keywords=[]))"
    );
    assert!(eval("(x for x in y)").starts_with("Expression(body=GeneratorExp("));
}

#[test]
fn test_parse_misplaced_comprehension() {
    assert_eq!(
        error("x for x in y", Mode::Eval),
        ErrorImpl::MisplacedComprehension
    );
}

#[test]
fn test_parse_dict_and_set_displays() {
    assert_eq!(eval("{}"), "Expression(body=Dict(keys=[], values=[]))");
    assert_eq!(
        eval("{1, 2}"),
        "Expression(body=Set(elts=[Num(n=1), Num(n=2)]))"
    );
    assert_eq!(
        eval("{'a': 1, **b}"),
        "Expression(body=Dict(keys=[Str(s='a'), None], values=[Num(n=1), Name(id='b', ctx=Load())]))"
    );
}

#[test]
fn test_set_display_rejects_dict_unpacking() {
    assert_eq!(
        error("{1, **a}\n", Mode::Exec),
        ErrorImpl::UnexpectedToken {
            token: "**".to_string()
        }
    );
    assert!(matches!(
        error("{**a, 1}\n", Mode::Exec),
        ErrorImpl::ExpectedToken { .. }
    ));
}

#[test]
fn test_parse_dict_and_set_comprehensions() {
    assert_eq!(
        eval("{k: v for k, v in items}"),
        "Expression(body=DictComp(key=Name(id='k', ctx=Load()), value=Name(id='v', ctx=Load()), \
         generators=[comprehension(target=Tuple(elts=[Name(id='k', ctx=Store()), \
         Name(id='v', ctx=Store())], ctx=Store()), iter=Name(id='items', ctx=Load()), ifs=[], \
         is_async=0)]))"
    );
    assert!(eval("{x for x in y}").starts_with("Expression(body=SetComp("));
}

#[test]
fn test_parse_subscripts() {
    assert_eq!(
        eval("a[1]"),
        "Expression(body=Subscript(value=Name(id='a', ctx=Load()), slice=Index(value=Num(n=1)), ctx=Load()))"
    );
    assert_eq!(
        eval("a[1:2]"),
        "Expression(body=Subscript(value=Name(id='a', ctx=Load()), \
         slice=Slice(lower=Num(n=1), upper=Num(n=2), step=None), ctx=Load()))"
    );
    assert_eq!(
        eval("a[::2]"),
        "Expression(body=Subscript(value=Name(id='a', ctx=Load()), \
         slice=Slice(lower=None, upper=None, step=Num(n=2)), ctx=Load()))"
    );
    assert_eq!(
        eval("a[1, 2]"),
        "Expression(body=Subscript(value=Name(id='a', ctx=Load()), \
         slice=Index(value=Tuple(elts=[Num(n=1), Num(n=2)], ctx=Load())), ctx=Load()))"
    );
    assert_eq!(
        eval("a[1:2, 3]"),
        "Expression(body=Subscript(value=Name(id='a', ctx=Load()), \
         slice=ExtSlice(dims=[Slice(lower=Num(n=1), upper=Num(n=2), step=None), \
         Index(value=Num(n=3))]), ctx=Load()))"
    );
    assert_eq!(error("a[]", Mode::Eval), ErrorImpl::EmptySubscript);
}

#[test]
fn test_parse_call_arguments() {
    assert_eq!(
        eval("f(a, *b, c=1, **d)"),
        "Expression(body=Call(func=Name(id='f', ctx=Load()), args=[Name(id='a', ctx=Load()), \
         Starred(value=Name(id='b', ctx=Load()), ctx=Load())], keywords=[keyword(arg='c', \
         value=Num(n=1)), keyword(arg=None, value=Name(id='d', ctx=Load()))]))"
    );
    assert_eq!(
        eval("f()"),
        "Expression(body=Call(func=Name(id='f', ctx=Load()), args=[], keywords=[]))"
    );
    assert_eq!(error("f(a.b=1)", Mode::Eval), ErrorImpl::InvalidKeywordArgument);
}

#[test]
fn test_parse_attribute_chain() {
    assert_eq!(
        eval("a.b.c"),
        "Expression(body=Attribute(value=Attribute(value=Name(id='a', ctx=Load()), attr='b', \
         ctx=Load()), attr='c', ctx=Load()))"
    );
}

#[test]
fn test_parse_eval_allows_trailing_newline() {
    assert_eq!(eval("x\n"), "Expression(body=Name(id='x', ctx=Load()))");
}

#[test]
fn test_parse_eval_rejects_statements() {
    assert!(parse("x = 1\n", None, Mode::Eval).is_err());
}

// STATEMENTS

#[test]
fn test_parse_assignment_forms() {
    assert_eq!(
        exec("a = b = 1\n"),
        "Module(body=[Assign(targets=[Name(id='a', ctx=Store()), Name(id='b', ctx=Store())], \
         value=Num(n=1))])"
    );
    assert_eq!(
        exec("a, b = 1, 2\n"),
        "Module(body=[Assign(targets=[Tuple(elts=[Name(id='a', ctx=Store()), \
         Name(id='b', ctx=Store())], ctx=Store())], value=Tuple(elts=[Num(n=1), Num(n=2)], \
         ctx=Load()))])"
    );
    assert_eq!(
        exec("x += 1\n"),
        "Module(body=[AugAssign(target=Name(id='x', ctx=Store()), op=Add(), value=Num(n=1))])"
    );
    assert_eq!(
        exec("x **= 2\n"),
        "Module(body=[AugAssign(target=Name(id='x', ctx=Store()), op=Pow(), value=Num(n=2))])"
    );
}

#[test]
fn test_parse_starred_target() {
    assert_eq!(
        exec("*a, b = c\n"),
        "Module(body=[Assign(targets=[Tuple(elts=[Starred(value=Name(id='a', ctx=Store()), \
         ctx=Store()), Name(id='b', ctx=Store())], ctx=Store())], value=Name(id='c', ctx=Load()))])"
    );
}

#[test]
fn test_parse_subscript_target_keeps_inner_loads() {
    assert_eq!(
        exec("a.b[i] = 1\n"),
        "Module(body=[Assign(targets=[Subscript(value=Attribute(value=Name(id='a', ctx=Load()), \
         attr='b', ctx=Load()), slice=Index(value=Name(id='i', ctx=Load())), ctx=Store())], \
         value=Num(n=1))])"
    );
}

#[test]
fn test_parse_annotated_assignment() {
    assert_eq!(
        exec("x: int = 1\n"),
        "Module(body=[AnnAssign(target=Name(id='x', ctx=Store()), annotation=Name(id='int', \
         ctx=Load()), value=Num(n=1), simple=1)])"
    );
    assert_eq!(
        exec("(x): int\n"),
        "Module(body=[AnnAssign(target=Name(id='x', ctx=Store()), annotation=Name(id='int', \
         ctx=Load()), value=None, simple=0)])"
    );
    assert_eq!(
        error("a, b: int = 1, 2\n", Mode::Exec),
        ErrorImpl::MultipleAnnotationTargets
    );
}

#[test]
fn test_parse_invalid_targets() {
    assert_eq!(
        error("f() = 1\n", Mode::Exec),
        ErrorImpl::InvalidTarget {
            kind: "function call".to_string()
        }
    );
    assert_eq!(
        error("1 = x\n", Mode::Exec),
        ErrorImpl::InvalidTarget {
            kind: "literal".to_string()
        }
    );
    assert_eq!(
        error("a + b += 1\n", Mode::Exec),
        ErrorImpl::InvalidTarget {
            kind: "operator".to_string()
        }
    );
}

#[test]
fn test_parse_delete() {
    assert_eq!(
        exec("del a, b[0]\n"),
        "Module(body=[Delete(targets=[Name(id='a', ctx=Del()), Subscript(value=Name(id='b', \
         ctx=Load()), slice=Index(value=Num(n=0)), ctx=Del())])])"
    );
}

#[test]
fn test_parse_simple_statements() {
    assert_eq!(
        exec("pass; break; continue;\n"),
        "Module(body=[Pass(), Break(), Continue()])"
    );
    assert_eq!(
        exec("return\nreturn x\n"),
        "Module(body=[Return(value=None), Return(value=Name(id='x', ctx=Load()))])"
    );
    assert_eq!(
        exec("raise E from e\n"),
        "Module(body=[Raise(exc=Name(id='E', ctx=Load()), cause=Name(id='e', ctx=Load()))])"
    );
    assert_eq!(
        exec("assert x, 'msg'\n"),
        "Module(body=[Assert(test=Name(id='x', ctx=Load()), msg=Str(s='msg'))])"
    );
    assert_eq!(
        exec("global a, b\nnonlocal c\n"),
        "Module(body=[Global(names=['a', 'b']), Nonlocal(names=['c'])])"
    );
}

#[test]
fn test_parse_imports() {
    assert_eq!(
        exec("import os.path as p, sys\n"),
        "Module(body=[Import(names=[alias(name='os.path', asname='p'), alias(name='sys', asname=None)])])"
    );
    assert_eq!(
        exec("from ..pkg import (a, b as c,)\n"),
        "Module(body=[ImportFrom(module='pkg', names=[alias(name='a', asname=None), \
         alias(name='b', asname='c')], level=2)])"
    );
    assert_eq!(
        exec("from . import x\n"),
        "Module(body=[ImportFrom(module=None, names=[alias(name='x', asname=None)], level=1)])"
    );
    assert_eq!(
        exec("from ...m import *\n"),
        "Module(body=[ImportFrom(module='m', names=[alias(name='*', asname=None)], level=3)])"
    );
}

#[test]
fn test_parse_if_elif_else() {
    assert_eq!(
        exec("if a:\n    x\nelif b:\n    y\nelse:\n    z\n"),
        "Module(body=[If(test=Name(id='a', ctx=Load()), body=[Expr(value=Name(id='x', ctx=Load()))], \
         orelse=[If(test=Name(id='b', ctx=Load()), body=[Expr(value=Name(id='y', ctx=Load()))], \
         orelse=[Expr(value=Name(id='z', ctx=Load()))])])])"
    );
}

#[test]
fn test_parse_loops() {
    assert_eq!(
        exec("for i, j in x:\n    pass\nelse:\n    break\n"),
        "Module(body=[For(target=Tuple(elts=[Name(id='i', ctx=Store()), Name(id='j', ctx=Store())], \
         ctx=Store()), iter=Name(id='x', ctx=Load()), body=[Pass()], orelse=[Break()])])"
    );
    assert_eq!(
        exec("while x: pass\n"),
        "Module(body=[While(test=Name(id='x', ctx=Load()), body=[Pass()], orelse=[])])"
    );
}

#[test]
fn test_parse_with() {
    assert_eq!(
        exec("with open(f) as fh, g:\n    pass\n"),
        "Module(body=[With(items=[withitem(context_expr=Call(func=Name(id='open', ctx=Load()), \
         args=[Name(id='f', ctx=Load())], keywords=[]), optional_vars=Name(id='fh', ctx=Store())), \
         withitem(context_expr=Name(id='g', ctx=Load()), optional_vars=None)], body=[Pass()])])"
    );
}

#[test]
fn test_parse_try() {
    assert_eq!(
        exec("try:\n    a\nexcept E as e:\n    b\nexcept:\n    c\nelse:\n    d\nfinally:\n    f\n"),
        "Module(body=[Try(body=[Expr(value=Name(id='a', ctx=Load()))], handlers=[\
         ExceptHandler(type=Name(id='E', ctx=Load()), name='e', body=[Expr(value=Name(id='b', ctx=Load()))]), \
         ExceptHandler(type=None, name=None, body=[Expr(value=Name(id='c', ctx=Load()))])], \
         orelse=[Expr(value=Name(id='d', ctx=Load()))], finalbody=[Expr(value=Name(id='f', ctx=Load()))])])"
    );
    assert_eq!(
        error("try:\n    a\nx = 1\n", Mode::Exec),
        ErrorImpl::MissingExceptOrFinally
    );
}

#[test]
fn test_parse_function_def() {
    let stmts = body("\n@dec\n@mod.wrap(1)\ndef f(a, b: int = 2, *, c, d=3, **kw) -> bool:\n    return a\n");
    let Stmt::FunctionDef(def) = &stmts[0] else {
        panic!("expected a function definition");
    };

    assert_eq!(def.name, "f");
    assert_eq!(def.lineno, 4);
    assert_eq!(def.decorator_list.len(), 2);
    assert_eq!(def.args.args.len(), 2);
    assert_eq!(def.args.defaults.len(), 1);
    assert_eq!(def.args.kwonlyargs.len(), 2);
    assert_eq!(def.args.kw_defaults.len(), 2);
    assert!(def.args.kw_defaults[0].is_none());
    assert!(def.args.vararg.is_none());
    assert_eq!(def.args.kwarg.as_ref().map(|arg| arg.arg.as_str()), Some("kw"));
    assert!(def.returns.is_some());
    assert_eq!(def.body, vec![Stmt::Return(crate::ast::statements::Return {
        value: Some(crate::ast::ast::Expr::name("a")),
    })]);
}

#[test]
fn test_parse_class_def() {
    assert_eq!(
        exec("class A(B, metaclass=M):\n    pass\n"),
        "Module(body=[ClassDef(name='A', bases=[Name(id='B', ctx=Load())], keywords=[keyword(\
         arg='metaclass', value=Name(id='M', ctx=Load()))], body=[Pass()], decorator_list=[])])"
    );
}

#[test]
fn test_parse_async_forms() {
    let stmts = body(
        "async def f():\n    async for x in y:\n        await x\n    async with z:\n        pass\n",
    );
    let Stmt::AsyncFunctionDef(def) = &stmts[0] else {
        panic!("expected an async function definition");
    };

    assert_eq!(def.body[0].kind(), "AsyncFor");
    assert_eq!(def.body[1].kind(), "AsyncWith");
    assert_eq!(
        dump(&def.body[0]),
        "AsyncFor(target=Name(id='x', ctx=Store()), iter=Name(id='y', ctx=Load()), \
         body=[Expr(value=Await(value=Name(id='x', ctx=Load())))], orelse=[])"
    );
}

#[test]
fn test_parse_yield_forms() {
    let tree = exec("def g():\n    x = yield\n    yield a, b\n    yield from c\n");

    assert!(tree.contains("value=Yield(value=None)"));
    assert!(tree.contains(
        "Yield(value=Tuple(elts=[Name(id='a', ctx=Load()), Name(id='b', ctx=Load())], ctx=Load()))"
    ));
    assert!(tree.contains("YieldFrom(value=Name(id='c', ctx=Load()))"));
}

#[test]
fn test_parse_comments_and_blank_lines() {
    assert_eq!(
        exec("# header\n\nx = 1  # trailing\n\n\n"),
        "Module(body=[Assign(targets=[Name(id='x', ctx=Store())], value=Num(n=1))])"
    );
}

#[test]
fn test_parse_single_mode() {
    assert_eq!(
        dump(&parse("x = 1\n", None, Mode::Single).unwrap()),
        "Interactive(body=[Assign(targets=[Name(id='x', ctx=Store())], value=Num(n=1))])"
    );
}

#[test]
fn test_parse_tokens_entry_point() {
    let tokens = tokenize("a = b\n", None).unwrap();
    let tree = parse_tokens(tokens, None, Mode::Exec).unwrap();

    assert_eq!(
        dump(&tree),
        "Module(body=[Assign(targets=[Name(id='a', ctx=Store())], value=Name(id='b', ctx=Load()))])"
    );
}

#[test]
fn test_parse_lines_entry_point() {
    let mut lines = vec!["if x:\n", "    y = 1\n"].into_iter();
    let tree = parse_lines(
        move || lines.next().map(String::from),
        Some("lines.py".to_string()),
        Mode::Exec,
    )
    .unwrap();

    assert_eq!(tree.kind(), "Module");
}

#[test]
fn test_mode_from_str() {
    assert_eq!("exec".parse::<Mode>(), Ok(Mode::Exec));
    assert_eq!("eval".parse::<Mode>(), Ok(Mode::Eval));
    assert_eq!("single".parse::<Mode>(), Ok(Mode::Single));
    assert!("module".parse::<Mode>().is_err());
}

// ERRORS

#[test]
fn test_parse_error_position() {
    let error = parse("x = 1\ny = )\n", Some("test.py".to_string()), Mode::Exec).unwrap_err();

    assert_eq!(error.get_line(), 2);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::ExpectedExpression {
            found: "\")\"".to_string()
        }
    );
}

#[test]
fn test_parse_unexpected_indent() {
    assert_eq!(error("x = 1\n    y = 2\n", Mode::Exec), ErrorImpl::UnexpectedIndent);
}

#[test]
fn test_parse_missing_indent() {
    assert_eq!(
        error("if x:\nreturn\n", Mode::Exec),
        ErrorImpl::ExpectedToken {
            expected: "INDENT".to_string(),
            found: "\"return\"".to_string()
        }
    );
}

#[test]
fn test_parse_keyword_is_not_a_statement() {
    assert_eq!(
        error("else:\n    pass\n", Mode::Exec),
        ErrorImpl::ExpectedStatement {
            found: "\"else\"".to_string()
        }
    );
}

#[test]
fn test_parse_decorator_errors() {
    assert_eq!(error("@d\nx = 1\n", Mode::Exec), ErrorImpl::UnexpectedDecorator);
    assert_eq!(
        error("@d\nasync for x in y:\n    pass\n", Mode::Exec),
        ErrorImpl::UnexpectedDecorator
    );
    assert_eq!(error("async x\n", Mode::Exec), ErrorImpl::UnexpectedAsync);
}

#[test]
fn test_parse_parameter_errors() {
    assert_eq!(
        error("def f(*a, *b): pass\n", Mode::Exec),
        ErrorImpl::DuplicateVarArg
    );
    assert_eq!(
        error("def f(**a, **b): pass\n", Mode::Exec),
        ErrorImpl::DuplicateKwArg
    );
    assert_eq!(
        error("def f(**a, b): pass\n", Mode::Exec),
        ErrorImpl::ArgumentAfterKwArg
    );
    assert_eq!(
        error("def f(a=1, b): pass\n", Mode::Exec),
        ErrorImpl::NonDefaultArgument
    );
}

#[test]
fn test_parse_lexical_errors_surface() {
    assert_eq!(error("x = 'abc\n", Mode::Exec), ErrorImpl::UnterminatedString);
    assert_eq!(
        error("x = 012\n", Mode::Exec),
        ErrorImpl::NumberParseError {
            token: "012".to_string()
        }
    );
}

// LITERALS

#[test]
fn test_decode_string_escapes() {
    assert_eq!(
        decode_string("'a\\nb\\t'"),
        Ok(StrValue::Text("a\nb\t".to_string()))
    );
    assert_eq!(
        decode_string("'\\x41\\101\\u00e9'"),
        Ok(StrValue::Text("AAé".to_string()))
    );
    assert_eq!(
        decode_string("'\\q'"),
        Ok(StrValue::Text("\\q".to_string()))
    );
    assert_eq!(
        decode_string("\"it's\""),
        Ok(StrValue::Text("it's".to_string()))
    );
}

#[test]
fn test_decode_string_prefixes() {
    assert_eq!(
        decode_string("r'a\\nb'"),
        Ok(StrValue::Text("a\\nb".to_string()))
    );
    assert_eq!(
        decode_string("b'\\x00A'"),
        Ok(StrValue::Bytes(vec![0, b'A']))
    );
    assert_eq!(
        decode_string("b'\\u00e9'"),
        Ok(StrValue::Bytes(b"\\u00e9".to_vec()))
    );
    assert_eq!(
        decode_string("'''a'b\nc'''"),
        Ok(StrValue::Text("a'b\nc".to_string()))
    );
}

#[test]
fn test_decode_string_invalid_escapes() {
    assert!(matches!(
        decode_string("'\\x4'"),
        Err(ErrorImpl::InvalidEscape { .. })
    ));
    assert!(matches!(
        decode_string("b'\\400'"),
        Err(ErrorImpl::InvalidEscape { .. })
    ));
}

#[test]
fn test_decode_number() {
    assert_eq!(decode_number("1_000"), Ok(Number::Int(1000)));
    assert_eq!(decode_number("0xff"), Ok(Number::Int(255)));
    assert_eq!(decode_number("0o17"), Ok(Number::Int(15)));
    assert_eq!(decode_number("0B101"), Ok(Number::Int(5)));
    assert_eq!(decode_number("00"), Ok(Number::Int(0)));
    assert_eq!(decode_number("1.5e3"), Ok(Number::Float(1500.0)));
    assert_eq!(decode_number("1."), Ok(Number::Float(1.0)));
    assert_eq!(decode_number("3j"), Ok(Number::Complex(3.0)));
    assert!(decode_number("012").is_err());
    assert!(decode_number("0x").is_err());
}

#[test]
fn test_decode_number_beyond_i128() {
    assert_eq!(
        decode_number("1000000000000000000000000000000000000000"),
        Ok(Number::BigInt(
            "1000000000000000000000000000000000000000".to_string()
        ))
    );
    assert_eq!(
        decode_number("0x1_0000_0000_0000_0000_0000_0000_0000_0000"),
        Ok(Number::BigInt(
            "340282366920938463463374607431768211456".to_string()
        ))
    );
    assert_eq!(
        decode_number("0o7777777777777777777777777777777777777777777"),
        Ok(Number::BigInt(
            "680564733841876926926749214863536422911".to_string()
        ))
    );
    assert_eq!(
        decode_number("170141183460469231731687303715884105727"),
        Ok(Number::Int(i128::MAX))
    );
}

#[test]
fn test_decode_number_underscore_placement() {
    assert_eq!(decode_number("0x_1f"), Ok(Number::Int(31)));
    assert_eq!(decode_number("1_0j"), Ok(Number::Complex(10.0)));
    assert_eq!(decode_number("1_0.2_5"), Ok(Number::Float(10.25)));

    for token in ["1__0", "1_", "0x_", "1_.5", "1._5", "1e_5", "0b1_", "0o_"] {
        assert!(
            matches!(decode_number(token), Err(ErrorImpl::NumberParseError { .. })),
            "{} should be rejected",
            token
        );
    }
}

#[test]
fn test_parse_large_integer_literal() {
    assert_eq!(
        exec("x = 1000000000000000000000000000000000000000000\n"),
        "Module(body=[Assign(targets=[Name(id='x', ctx=Store())], \
         value=Num(n=1000000000000000000000000000000000000000000))])"
    );
}
