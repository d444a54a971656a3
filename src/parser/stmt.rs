use crate::{
    ast::{
        ast::{Expr, Stmt},
        statements::{
            AnnAssign, Assert, Assign, AugAssign, ClassDef, Delete, ExprStmt, For, FunctionDef,
            Global, If, Import, ImportFrom, Nonlocal, Raise, Return, Try, While, With,
        },
        types::{Alias, Arg, Arguments, ExceptHandler, ExprContext, Operator, WithItem},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{
        parse_call_arguments, parse_expr, parse_for_in, parse_optional_expr,
        parse_optional_operand, parse_target, Form,
    },
    lookups::BindingPower,
    parser::Parser,
};

/// Parses one statement line or compound statement, with any decorators before it.
pub fn parse_stmt(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    while parser.eat("@")? {
        let decorator = parse_expr(parser, BindingPower::LVALUE)?;
        parser.expect_kind(TokenKind::Newline)?;
        parser.push_decorator(decorator);
    }

    if let Some(stmt_fn) = parser.get_stmt_handler() {
        let decoratable = parser.check("def") || parser.check("class") || parser.check("async");
        if parser.has_decorators() && !decoratable {
            return Err(parser.error(ErrorImpl::UnexpectedDecorator));
        }
        return Ok(vec![stmt_fn(parser)?]);
    }

    if parser.has_decorators() {
        return Err(parser.error(ErrorImpl::UnexpectedDecorator));
    }
    parse_simple_stmt(parser)
}

/// Small statements separated by `;` up to the end of the logical line.
pub fn parse_simple_stmt(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut body = vec![parse_small_stmt(parser)?];

    while parser.eat(";")? {
        if parser.check_kind(TokenKind::Newline) || parser.check_kind(TokenKind::EndMarker) {
            break;
        }
        body.push(parse_small_stmt(parser)?);
    }
    parser.expect_kind(TokenKind::Newline)?;

    Ok(body)
}

fn parse_small_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser.get_simple_stmt_handler() {
        return stmt_fn(parser);
    }
    parse_expression_stmt(parser)
}

fn expected_statement(parser: &Parser) -> Error {
    let error = match parser.current_token_kind() {
        TokenKind::Indent => ErrorImpl::UnexpectedIndent,
        TokenKind::Dedent => ErrorImpl::UnexpectedDedent,
        _ => ErrorImpl::ExpectedStatement {
            found: parser.current_token().describe(),
        },
    };
    parser.error(error)
}

/// Expression statements and the three assignment forms.
fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token();
    let no_prefix = parser
        .token_class(token)
        .and_then(|class| class.nud)
        .is_none();
    if matches!(token.kind, TokenKind::Indent | TokenKind::Dedent)
        || (token.is_keyword() && no_prefix)
    {
        return Err(expected_statement(parser));
    }

    let Some(first) = parse_optional_operand(parser, BindingPower::DEFAULT)? else {
        return Err(expected_statement(parser));
    };
    let grouped = first.form == Form::Grouped;
    let mut value = first.into_expr(parser)?;

    let annotation = if parser.eat(":")? {
        Some(parse_expr(parser, BindingPower::DEFAULT)?)
    } else {
        None
    };

    if parser.check("=") {
        let mut targets = vec![];
        while parser.eat("=")? {
            parser.set_context(&mut value, ExprContext::Store)?;
            targets.push(value);
            value = parse_expr(parser, BindingPower::DEFAULT)?;
        }

        let Some(annotation) = annotation else {
            return Ok(Stmt::Assign(Assign { targets, value }));
        };
        if targets.len() != 1 {
            return Err(parser.error(ErrorImpl::MultipleAnnotationTargets));
        }
        let target = targets.remove(0);
        return annotated(parser, target, annotation, Some(value), grouped);
    }

    if let Some(annotation) = annotation {
        parser.set_context(&mut value, ExprContext::Store)?;
        return annotated(parser, value, annotation, None, grouped);
    }

    let augmented = match parser.current_token_kind() {
        TokenKind::Op => Operator::from_augmented(&parser.current_token().value),
        _ => None,
    };
    if let Some(op) = augmented {
        parser.advance()?;
        parser.set_context(&mut value, ExprContext::Store)?;
        let operand = parse_expr(parser, BindingPower::DEFAULT)?;
        return Ok(Stmt::AugAssign(AugAssign {
            target: value,
            op,
            value: operand,
        }));
    }

    Ok(Stmt::Expr(ExprStmt { value }))
}

fn annotated(
    parser: &Parser,
    target: Expr,
    annotation: Expr,
    value: Option<Expr>,
    grouped: bool,
) -> Result<Stmt, Error> {
    if matches!(target, Expr::Tuple(_) | Expr::List(_)) {
        return Err(parser.error(ErrorImpl::MultipleAnnotationTargets));
    }
    let simple = u8::from(matches!(target, Expr::Name(_)) && !grouped);

    Ok(Stmt::AnnAssign(AnnAssign {
        target,
        annotation,
        value,
        simple,
    }))
}

// SIMPLE STATEMENTS

pub fn parse_pass_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    Ok(Stmt::Pass)
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    Ok(Stmt::Break)
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    Ok(Stmt::Continue)
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    let value = parse_optional_expr(parser, BindingPower::DEFAULT)?;
    Ok(Stmt::Return(Return { value }))
}

/// `raise`, `raise exc` and `raise exc from cause`
pub fn parse_raise_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    let exc = parse_optional_expr(parser, BindingPower::DEFAULT)?;
    let cause = if exc.is_some() && parser.eat("from")? {
        Some(parse_expr(parser, BindingPower::DEFAULT)?)
    } else {
        None
    };
    Ok(Stmt::Raise(Raise { exc, cause }))
}

pub fn parse_assert_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    let test = parse_expr(parser, BindingPower::UNTIL_COMMA)?;
    let msg = if parser.eat(",")? {
        Some(parse_expr(parser, BindingPower::UNTIL_COMMA)?)
    } else {
        None
    };
    Ok(Stmt::Assert(Assert { test, msg }))
}

pub fn parse_delete_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    let mut targets = vec![];

    while let Some(target) = parse_target(parser, ExprContext::Del, BindingPower::UNTIL_COMMA)? {
        targets.push(target);
        if !parser.eat(",")? {
            break;
        }
    }

    if targets.is_empty() {
        return Err(parser.error(ErrorImpl::ExpectedExpression {
            found: parser.current_token().describe(),
        }));
    }
    Ok(Stmt::Delete(Delete { targets }))
}

fn parse_name_list(parser: &mut Parser) -> Result<Vec<String>, Error> {
    parser.advance()?;
    let mut names = vec![parser.expect_name()?];
    while parser.eat(",")? {
        names.push(parser.expect_name()?);
    }
    Ok(names)
}

pub fn parse_global_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let names = parse_name_list(parser)?;
    Ok(Stmt::Global(Global { names }))
}

pub fn parse_nonlocal_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let names = parse_name_list(parser)?;
    Ok(Stmt::Nonlocal(Nonlocal { names }))
}

/// `a.b.c`
fn parse_dotted_name(parser: &mut Parser) -> Result<String, Error> {
    let mut name = parser.expect_name()?;
    while parser.eat(".")? {
        name.push('.');
        name.push_str(&parser.expect_name()?);
    }
    Ok(name)
}

fn parse_as_name(parser: &mut Parser) -> Result<Option<String>, Error> {
    if parser.eat("as")? {
        return parser.expect_name().map(Some);
    }
    Ok(None)
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    let mut names = vec![];

    loop {
        let name = parse_dotted_name(parser)?;
        let asname = parse_as_name(parser)?;
        names.push(Alias { name, asname });
        if !parser.eat(",")? {
            break;
        }
    }

    Ok(Stmt::Import(Import { names }))
}

/// `from [.]*module import names`, `from . import names` and `from m import *`
pub fn parse_import_from_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;

    let mut level = 0;
    loop {
        if parser.eat(".")? {
            level += 1;
        } else if parser.eat("...")? {
            level += 3;
        } else {
            break;
        }
    }

    let module = if level > 0 && parser.check("import") {
        None
    } else {
        Some(parse_dotted_name(parser)?)
    };
    parser.expect("import")?;

    let mut names = vec![];
    if parser.eat("*")? {
        names.push(Alias {
            name: String::from("*"),
            asname: None,
        });
    } else {
        let parenthesized = parser.eat("(")?;
        loop {
            let name = parser.expect_name()?;
            let asname = parse_as_name(parser)?;
            names.push(Alias { name, asname });
            if !parser.eat(",")? || (parenthesized && parser.check(")")) {
                break;
            }
        }
        if parenthesized {
            parser.expect(")")?;
        }
    }

    Ok(Stmt::ImportFrom(ImportFrom {
        module,
        names,
        level,
    }))
}

// COMPOUND STATEMENTS

/// Block after a `:`. Either an indented run of statements or the rest of the line.
pub fn parse_suite(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    if !parser.eat_kind(TokenKind::Newline)? {
        return parse_simple_stmt(parser);
    }

    parser.expect_kind(TokenKind::Indent)?;
    let mut body = vec![];
    while !parser.eat_kind(TokenKind::Dedent)? {
        body.extend(parse_stmt(parser)?);
    }

    Ok(body)
}

fn parse_else_suite(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    if parser.eat("else")? {
        parser.expect(":")?;
        return parse_suite(parser);
    }
    Ok(vec![])
}

pub fn parse_function_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let lineno = parser.current_token().line;
    Ok(Stmt::FunctionDef(parse_function_def(parser, lineno)?))
}

fn parse_function_def(parser: &mut Parser, lineno: u32) -> Result<FunctionDef, Error> {
    parser.expect("def")?;
    let name = parser.expect_name()?;

    parser.expect("(")?;
    let args = parse_arguments(parser, false)?;
    parser.expect(")")?;

    let returns = if parser.eat("->")? {
        Some(Box::new(parse_expr(parser, BindingPower::DEFAULT)?))
    } else {
        None
    };
    parser.expect(":")?;

    let decorator_list = parser.take_decorators();
    let body = parse_suite(parser)?;

    Ok(FunctionDef {
        name,
        args,
        body,
        decorator_list,
        returns,
        lineno,
    })
}

/// `async def`, `async for` and `async with`
pub fn parse_async_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let lineno = parser.advance()?.line;

    if parser.check("def") {
        return Ok(Stmt::AsyncFunctionDef(parse_function_def(parser, lineno)?));
    }
    if parser.has_decorators() {
        return Err(parser.error(ErrorImpl::UnexpectedDecorator));
    }
    if parser.check("for") {
        return Ok(Stmt::AsyncFor(parse_for(parser)?));
    }
    if parser.check("with") {
        return Ok(Stmt::AsyncWith(parse_with(parser)?));
    }

    Err(parser.error(ErrorImpl::UnexpectedAsync))
}

pub fn parse_class_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let lineno = parser.advance()?.line;
    let name = parser.expect_name()?;

    let (bases, keywords) = if parser.eat("(")? {
        parse_call_arguments(parser)?
    } else {
        (vec![], vec![])
    };
    parser.expect(":")?;

    let decorator_list = parser.take_decorators();
    let body = parse_suite(parser)?;

    Ok(Stmt::ClassDef(ClassDef {
        name,
        bases,
        keywords,
        body,
        decorator_list,
        lineno,
    }))
}

/// `if` and `elif`. Each `elif` becomes a nested `If` in `orelse`.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    let test = parse_expr(parser, BindingPower::DEFAULT)?;
    parser.expect(":")?;
    let body = parse_suite(parser)?;

    let orelse = if parser.check("elif") {
        vec![parse_if_stmt(parser)?]
    } else {
        parse_else_suite(parser)?
    };

    Ok(Stmt::If(If { test, body, orelse }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::For(parse_for(parser)?))
}

fn parse_for(parser: &mut Parser) -> Result<For, Error> {
    parser.expect("for")?;
    let (target, iter) = parse_for_in(parser, BindingPower::DEFAULT)?;
    parser.expect(":")?;
    let body = parse_suite(parser)?;
    let orelse = parse_else_suite(parser)?;

    Ok(For {
        target,
        iter,
        body,
        orelse,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    let test = parse_expr(parser, BindingPower::DEFAULT)?;
    parser.expect(":")?;
    let body = parse_suite(parser)?;
    let orelse = parse_else_suite(parser)?;

    Ok(Stmt::While(While { test, body, orelse }))
}

pub fn parse_with_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::With(parse_with(parser)?))
}

fn parse_with(parser: &mut Parser) -> Result<With, Error> {
    parser.expect("with")?;
    let mut items = vec![];

    loop {
        let context_expr = parse_expr(parser, BindingPower::UNTIL_COMMA)?;
        let optional_vars = if parser.eat("as")? {
            let target = parse_target(parser, ExprContext::Store, BindingPower::UNTIL_COMMA)?
                .ok_or_else(|| {
                    parser.error(ErrorImpl::ExpectedExpression {
                        found: parser.current_token().describe(),
                    })
                })?;
            Some(Box::new(target))
        } else {
            None
        };
        items.push(WithItem {
            context_expr,
            optional_vars,
        });

        if !parser.eat(",")? {
            break;
        }
    }

    parser.expect(":")?;
    let body = parse_suite(parser)?;

    Ok(With { items, body })
}

pub fn parse_try_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.advance()?;
    parser.expect(":")?;
    let body = parse_suite(parser)?;

    let mut handlers = vec![];
    while parser.eat("except")? {
        let (type_, name) = if parser.check(":") {
            (None, None)
        } else {
            let type_ = parse_expr(parser, BindingPower::DEFAULT)?;
            (Some(type_), parse_as_name(parser)?)
        };
        parser.expect(":")?;
        handlers.push(ExceptHandler {
            type_,
            name,
            body: parse_suite(parser)?,
        });
    }

    let orelse = parse_else_suite(parser)?;

    let finalbody = if parser.eat("finally")? {
        parser.expect(":")?;
        parse_suite(parser)?
    } else if handlers.is_empty() {
        return Err(parser.error(ErrorImpl::MissingExceptOrFinally));
    } else {
        vec![]
    };

    Ok(Stmt::Try(Try {
        body,
        handlers,
        orelse,
        finalbody,
    }))
}

// PARAMETERS

/// Parameter list of a `def` (up to the closing parenthesis) or a lambda (up
/// to the colon). Lambda parameters take no annotations.
pub fn parse_arguments(parser: &mut Parser, is_lambda: bool) -> Result<Arguments, Error> {
    let end = if is_lambda { ":" } else { ")" };
    let mut args = Arguments::default();
    let mut keyword_only = false;

    while !parser.check(end) {
        if args.kwarg.is_some() {
            let error = if parser.check("**") {
                ErrorImpl::DuplicateKwArg
            } else {
                ErrorImpl::ArgumentAfterKwArg
            };
            return Err(parser.error(error));
        }

        if parser.eat("*")? {
            if keyword_only {
                return Err(parser.error(ErrorImpl::DuplicateVarArg));
            }
            keyword_only = true;
            if !parser.check(",") {
                args.vararg = Some(parse_arg(parser, is_lambda)?);
            }
        } else if parser.eat("**")? {
            args.kwarg = Some(parse_arg(parser, is_lambda)?);
        } else {
            let arg = parse_arg(parser, is_lambda)?;
            let default = if parser.eat("=")? {
                Some(parse_expr(parser, BindingPower::UNTIL_COMMA)?)
            } else {
                None
            };

            if keyword_only {
                args.kwonlyargs.push(arg);
                args.kw_defaults.push(default);
            } else {
                match default {
                    Some(default) => args.defaults.push(default),
                    None if !args.defaults.is_empty() => {
                        return Err(parser.error(ErrorImpl::NonDefaultArgument))
                    }
                    None => {}
                }
                args.args.push(arg);
            }
        }

        if !parser.eat(",")? {
            break;
        }
    }

    Ok(args)
}

fn parse_arg(parser: &mut Parser, is_lambda: bool) -> Result<Arg, Error> {
    let arg = parser.expect_name()?;
    let annotation = if !is_lambda && parser.eat(":")? {
        Some(Box::new(parse_expr(parser, BindingPower::UNTIL_COMMA)?))
    } else {
        None
    };
    Ok(Arg { arg, annotation })
}
