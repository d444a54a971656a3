use crate::{
    ast::{
        ast::Expr,
        expressions::{
            Attribute, Await, BinOp, BoolOp, Bytes, Call, Compare, Comp, Dict, DictComp, IfExp,
            Lambda, List, Name, NameConstant, Num, Set, Singleton, Starred, Str, Subscript, Tuple,
            UnaryOp, Yield, YieldFrom,
        },
        types::{
            BoolOperator, CmpOperator, Comprehension, ExprContext, ExtSlice, Index, Keyword,
            Operator, Slice, SliceRange, UnaryOperator,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    literals::{decode_number, decode_string, StrValue},
    lookups::{BindingPower, NudHandler},
    parser::Parser,
    stmt::parse_arguments,
};

/// How an expression was written, as far as later handlers care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Plain,
    /// Wrapped in parentheses. Stops boolean and comparison chains from merging.
    Grouped,
    /// An unbracketed comprehension still collecting clauses. The expression
    /// is a `GeneratorExp` until a bracket decides its final kind.
    Comprehension,
}

/// Result of an expression handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub expr: Expr,
    pub form: Form,
}

impl Parsed {
    pub fn plain(expr: Expr) -> Self {
        Parsed {
            expr,
            form: Form::Plain,
        }
    }

    fn comprehension(comp: Comp) -> Self {
        Parsed {
            expr: Expr::GeneratorExp(comp),
            form: Form::Comprehension,
        }
    }

    /// Splits off an open comprehension, handing anything else back.
    pub fn into_comprehension(self) -> Result<Comp, Parsed> {
        match self {
            Parsed {
                expr: Expr::GeneratorExp(comp),
                form: Form::Comprehension,
            } => Ok(comp),
            other => Err(other),
        }
    }

    /// The finished expression. An open comprehension outside brackets is an error.
    pub fn into_expr(self, parser: &Parser) -> Result<Expr, Error> {
        if self.form == Form::Comprehension {
            return Err(parser.error(ErrorImpl::MisplacedComprehension));
        }
        Ok(self.expr)
    }
}

/// Runs the Pratt loop: one prefix handler, then infix handlers while the next
/// token binds tighter than `bp`.
pub fn parse_operand(parser: &mut Parser, bp: BindingPower) -> Result<Parsed, Error> {
    let nud_fn = parser
        .token_class(parser.current_token())
        .and_then(|class| class.nud)
        .unwrap_or(parse_name_expr as NudHandler);
    let mut left = nud_fn(parser)?;

    while let Some(class) = parser.token_class(parser.current_token()) {
        if class.lbp <= bp {
            break;
        }
        let Some(led_fn) = class.led else {
            break;
        };
        left = led_fn(parser, left, class.lbp)?;
    }

    Ok(left)
}

/// Parses an optional expression. Nothing is parsed at a delimiter, or at a
/// comma when `bp` stops before commas anyway.
pub fn parse_optional_operand(
    parser: &mut Parser,
    bp: BindingPower,
) -> Result<Option<Parsed>, Error> {
    if parser.is_delim() || (bp >= BindingPower::UNTIL_COMMA && parser.check(",")) {
        return Ok(None);
    }
    parse_operand(parser, bp).map(Some)
}

pub fn parse_optional_expr(parser: &mut Parser, bp: BindingPower) -> Result<Option<Expr>, Error> {
    match parse_optional_operand(parser, bp)? {
        Some(parsed) => parsed.into_expr(parser).map(Some),
        None => Ok(None),
    }
}

/// Parses a required expression.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    match parse_optional_expr(parser, bp)? {
        Some(expr) => Ok(expr),
        None => Err(expected_expression(parser)),
    }
}

/// Parses an expression and marks it as a target with `ctx`.
pub fn parse_target(
    parser: &mut Parser,
    ctx: ExprContext,
    bp: BindingPower,
) -> Result<Option<Expr>, Error> {
    let Some(mut target) = parse_optional_expr(parser, bp)? else {
        return Ok(None);
    };
    parser.set_context(&mut target, ctx)?;
    Ok(Some(target))
}

fn expected_expression(parser: &Parser) -> Error {
    let error = match parser.current_token_kind() {
        TokenKind::Indent => ErrorImpl::UnexpectedIndent,
        TokenKind::Dedent => ErrorImpl::UnexpectedDedent,
        _ => ErrorImpl::ExpectedExpression {
            found: parser.current_token().describe(),
        },
    };
    parser.error(error)
}

/// `target in iter` of a `for` loop or comprehension clause. A comma-separated
/// target becomes a stored tuple.
pub fn parse_for_in(parser: &mut Parser, bp: BindingPower) -> Result<(Expr, Expr), Error> {
    let first = parse_target(parser, ExprContext::Store, BindingPower::LVALUE)?
        .ok_or_else(|| expected_expression(parser))?;

    let target = if parser.check(",") {
        let mut elts = vec![first];
        while parser.eat(",")? {
            if parser.check("in") {
                break;
            }
            let elt = parse_target(parser, ExprContext::Store, BindingPower::LVALUE)?
                .ok_or_else(|| expected_expression(parser))?;
            elts.push(elt);
        }
        Expr::Tuple(Tuple {
            elts,
            ctx: ExprContext::Store,
        })
    } else {
        first
    };

    parser.expect("in")?;
    let iter = parse_expr(parser, bp)?;
    Ok((target, iter))
}

// PREFIX HANDLERS

/// Fallback for tokens without a prefix handler: only identifiers are expressions.
pub fn parse_name_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    let token = parser.current_token();
    if token.kind != TokenKind::Name || token.is_keyword() {
        return Err(expected_expression(parser));
    }
    let token = parser.advance()?;
    Ok(Parsed::plain(Expr::name(token.value)))
}

pub fn parse_number_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    let n = decode_number(&parser.current_token().value).map_err(|error| parser.error(error))?;
    parser.advance()?;
    Ok(Parsed::plain(Expr::Num(Num { n })))
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    let value = decode_string(&parser.current_token().value).map_err(|error| parser.error(error))?;
    parser.advance()?;
    let expr = match value {
        StrValue::Text(s) => Expr::Str(Str { s }),
        StrValue::Bytes(s) => Expr::Bytes(Bytes { s }),
    };
    Ok(Parsed::plain(expr))
}

pub fn parse_constant_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    let token = parser.advance()?;
    let value = match token.value.as_str() {
        "True" => Singleton::True,
        "False" => Singleton::False,
        _ => Singleton::None,
    };
    Ok(Parsed::plain(Expr::NameConstant(NameConstant { value })))
}

pub fn parse_ellipsis_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;
    Ok(Parsed::plain(Expr::Ellipsis))
}

/// `not x`, `-x`, `+x` and `~x`
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    let token = parser.advance()?;
    let (op, bp) = match token.value.as_str() {
        "not" => (UnaryOperator::Not, BindingPower::NOT),
        "-" => (UnaryOperator::USub, BindingPower::UNARY),
        "+" => (UnaryOperator::UAdd, BindingPower::UNARY),
        _ => (UnaryOperator::Invert, BindingPower::UNARY),
    };
    let operand = parse_expr(parser, bp)?;

    Ok(Parsed::plain(Expr::UnaryOp(UnaryOp {
        op,
        operand: Box::new(operand),
    })))
}

pub fn parse_starred_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;
    let value = parse_expr(parser, BindingPower::LVALUE)?;
    Ok(Parsed::plain(Expr::Starred(Starred {
        value: Box::new(value),
        ctx: ExprContext::Load,
    })))
}

pub fn parse_await_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;
    let value = parse_expr(parser, BindingPower::AWAIT)?;
    Ok(Parsed::plain(Expr::Await(Await {
        value: Box::new(value),
    })))
}

/// `yield`, `yield value` and `yield from value`
pub fn parse_yield_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;

    if parser.eat("from")? {
        let value = parse_expr(parser, BindingPower::YIELD_VALUE)?;
        return Ok(Parsed::plain(Expr::YieldFrom(YieldFrom {
            value: Box::new(value),
        })));
    }

    let value = parse_optional_expr(parser, BindingPower::YIELD_VALUE)?;
    Ok(Parsed::plain(Expr::Yield(Yield {
        value: value.map(Box::new),
    })))
}

pub fn parse_lambda_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;
    let args = parse_arguments(parser, true)?;
    parser.expect(":")?;
    let body = parse_expr(parser, BindingPower::LAMBDA)?;

    Ok(Parsed::plain(Expr::Lambda(Lambda {
        args,
        body: Box::new(body),
    })))
}

/// `()`, `(expr)`, `(a, b)` and `(x for x in y)`
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;

    if parser.eat(")")? {
        return Ok(Parsed::plain(Expr::Tuple(Tuple {
            elts: vec![],
            ctx: ExprContext::Load,
        })));
    }

    let inner = parse_operand(parser, BindingPower::DEFAULT)?;
    parser.expect(")")?;

    let expr = match inner.into_comprehension() {
        Ok(comp) => Expr::GeneratorExp(comp),
        Err(inner) => inner.expr,
    };
    Ok(Parsed {
        expr,
        form: Form::Grouped,
    })
}

/// `[a, b]` and `[x for x in y]`
pub fn parse_list_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;
    let mut elts = vec![];

    loop {
        if parser.eat("]")? {
            break;
        }

        let value = parse_operand(parser, BindingPower::UNTIL_COMMA)?;
        let value = match value.into_comprehension() {
            Ok(comp) => {
                parser.expect("]")?;
                return Ok(Parsed::plain(Expr::ListComp(comp)));
            }
            Err(value) => value,
        };
        elts.push(value.into_expr(parser)?);

        if !parser.eat(",")? {
            parser.expect("]")?;
            break;
        }
    }

    Ok(Parsed::plain(Expr::List(List {
        elts,
        ctx: ExprContext::Load,
    })))
}

/// Dict and set displays and their comprehensions. The first entry decides
/// which one it is; `{}` is an empty dict.
pub fn parse_brace_expr(parser: &mut Parser) -> Result<Parsed, Error> {
    parser.advance()?;
    let mut keys = vec![];
    let mut values = vec![];
    let mut is_dict = None;

    loop {
        if parser.eat("}")? {
            break;
        }

        if is_dict == Some(false) && parser.check("**") {
            return Err(parser.error(ErrorImpl::UnexpectedToken {
                token: String::from("**"),
            }));
        }

        if parser.eat("**")? {
            is_dict = Some(true);
            keys.push(None);
            values.push(parse_expr(parser, BindingPower::UNTIL_COMMA)?);
        } else {
            let key = parse_operand(parser, BindingPower::UNTIL_COMMA)?;
            let key = match key.into_comprehension() {
                Ok(comp) if is_dict.is_none() => {
                    parser.expect("}")?;
                    return Ok(Parsed::plain(Expr::SetComp(comp)));
                }
                Ok(comp) => Parsed::comprehension(comp),
                Err(key) => key,
            };
            let key = key.into_expr(parser)?;

            let dict_entry = *is_dict.get_or_insert(parser.check(":"));
            if dict_entry {
                parser.expect(":")?;
                let value = parse_operand(parser, BindingPower::UNTIL_COMMA)?;
                match value.into_comprehension() {
                    Ok(comp) if keys.is_empty() => {
                        parser.expect("}")?;
                        return Ok(Parsed::plain(Expr::DictComp(DictComp {
                            key: Box::new(key),
                            value: comp.elt,
                            generators: comp.generators,
                        })));
                    }
                    Ok(comp) => values.push(Parsed::comprehension(comp).into_expr(parser)?),
                    Err(value) => values.push(value.into_expr(parser)?),
                }
                keys.push(Some(key));
            } else {
                values.push(key);
            }
        }

        if !parser.eat(",")? {
            parser.expect("}")?;
            break;
        }
    }

    let expr = if is_dict.unwrap_or(true) {
        Expr::Dict(Dict { keys, values })
    } else {
        Expr::Set(Set { elts: values })
    };
    Ok(Parsed::plain(expr))
}

// INFIX HANDLERS

/// `a, b, c` without brackets. A trailing comma is allowed.
pub fn parse_tuple_expr(
    parser: &mut Parser,
    left: Parsed,
    bp: BindingPower,
) -> Result<Parsed, Error> {
    parser.advance()?;
    let mut elts = vec![left.into_expr(parser)?];

    while !parser.is_delim() {
        elts.push(parse_expr(parser, bp)?);
        if !parser.eat(",")? {
            break;
        }
    }

    Ok(Parsed::plain(Expr::Tuple(Tuple {
        elts,
        ctx: ExprContext::Load,
    })))
}

/// One `[async] for target in iter [if cond]...` clause, opening or extending
/// a comprehension.
pub fn parse_comprehension_expr(
    parser: &mut Parser,
    left: Parsed,
    _bp: BindingPower,
) -> Result<Parsed, Error> {
    let token = parser.advance()?;
    let is_async = if token.value == "async" {
        parser.expect("for")?;
        1
    } else {
        0
    };

    let (target, iter) = parse_for_in(parser, BindingPower::CONDITIONAL)?;
    let mut ifs = vec![];
    while parser.eat("if")? {
        ifs.push(parse_expr(parser, BindingPower::CONDITIONAL)?);
    }
    let clause = Comprehension {
        target,
        iter,
        ifs,
        is_async,
    };

    match left.into_comprehension() {
        Ok(mut comp) => {
            comp.generators.push(clause);
            Ok(Parsed::comprehension(comp))
        }
        Err(left) => Ok(Parsed::comprehension(Comp {
            elt: Box::new(left.into_expr(parser)?),
            generators: vec![clause],
        })),
    }
}

/// `body if test else orelse`
pub fn parse_conditional_expr(
    parser: &mut Parser,
    left: Parsed,
    _bp: BindingPower,
) -> Result<Parsed, Error> {
    parser.advance()?;
    let body = left.into_expr(parser)?;
    let test = parse_expr(parser, BindingPower::CONDITIONAL)?;
    parser.expect("else")?;
    let orelse = parse_expr(parser, BindingPower::IF_ORELSE)?;

    Ok(Parsed::plain(Expr::IfExp(IfExp {
        test: Box::new(test),
        body: Box::new(body),
        orelse: Box::new(orelse),
    })))
}

/// `and` / `or`. An unparenthesized chain of the same operator extends one node.
pub fn parse_boolean_expr(
    parser: &mut Parser,
    left: Parsed,
    bp: BindingPower,
) -> Result<Parsed, Error> {
    let token = parser.advance()?;
    let op = if token.value == "and" {
        BoolOperator::And
    } else {
        BoolOperator::Or
    };
    let right = parse_expr(parser, bp)?;

    let expr = match left {
        Parsed {
            expr: Expr::BoolOp(mut chain),
            form: Form::Plain,
        } if chain.op == op => {
            chain.values.push(right);
            Expr::BoolOp(chain)
        }
        left => Expr::BoolOp(BoolOp {
            op,
            values: vec![left.into_expr(parser)?, right],
        }),
    };
    Ok(Parsed::plain(expr))
}

/// Comparison operators, including `not in` and `is not`. An unparenthesized
/// chain extends one node.
pub fn parse_comparison_expr(
    parser: &mut Parser,
    left: Parsed,
    bp: BindingPower,
) -> Result<Parsed, Error> {
    let token = parser.advance()?;
    let op = match token.value.as_str() {
        "not" => {
            parser.expect("in")?;
            CmpOperator::NotIn
        }
        "is" if parser.eat("not")? => CmpOperator::IsNot,
        text => CmpOperator::from_text(text).ok_or_else(|| {
            parser.error(ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            })
        })?,
    };
    let right = parse_expr(parser, bp)?;

    let expr = match left {
        Parsed {
            expr: Expr::Compare(mut chain),
            form: Form::Plain,
        } => {
            chain.ops.push(op);
            chain.comparators.push(right);
            Expr::Compare(chain)
        }
        left => Expr::Compare(Compare {
            left: Box::new(left.into_expr(parser)?),
            ops: vec![op],
            comparators: vec![right],
        }),
    };
    Ok(Parsed::plain(expr))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Parsed,
    bp: BindingPower,
) -> Result<Parsed, Error> {
    let token = parser.advance()?;
    let op = Operator::from_binary(&token.value).ok_or_else(|| {
        parser.error(ErrorImpl::UnexpectedToken {
            token: token.value.clone(),
        })
    })?;
    let left = left.into_expr(parser)?;
    let right = parse_expr(parser, bp)?;

    Ok(Parsed::plain(Expr::BinOp(BinOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })))
}

/// `**` groups to the right: its right operand may itself be a power.
pub fn parse_power_expr(
    parser: &mut Parser,
    left: Parsed,
    bp: BindingPower,
) -> Result<Parsed, Error> {
    parser.advance()?;
    let left = left.into_expr(parser)?;
    let right = parse_expr(parser, bp.right_assoc())?;

    Ok(Parsed::plain(Expr::BinOp(BinOp {
        left: Box::new(left),
        op: Operator::Pow,
        right: Box::new(right),
    })))
}

/// Implicit concatenation of adjacent string literals.
pub fn parse_adjacent_string_expr(
    parser: &mut Parser,
    left: Parsed,
    _bp: BindingPower,
) -> Result<Parsed, Error> {
    let value = decode_string(&parser.current_token().value).map_err(|error| parser.error(error))?;

    let expr = match (left.expr, value) {
        (Expr::Str(mut left), StrValue::Text(right)) => {
            left.s.push_str(&right);
            Expr::Str(left)
        }
        (Expr::Bytes(mut left), StrValue::Bytes(right)) => {
            left.s.extend(right);
            Expr::Bytes(left)
        }
        (Expr::Str(_), _) | (Expr::Bytes(_), _) => {
            return Err(parser.error(ErrorImpl::MixedBytesAndStr))
        }
        _ => {
            return Err(parser.error(ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("string literal cannot follow this expression"),
            }))
        }
    };
    parser.advance()?;

    Ok(Parsed {
        expr,
        form: left.form,
    })
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Parsed,
    _bp: BindingPower,
) -> Result<Parsed, Error> {
    parser.advance()?;
    let value = left.into_expr(parser)?;
    if parser.current_token_kind() != TokenKind::Name {
        return Err(parser.error(ErrorImpl::ExpectedToken {
            expected: TokenKind::Name.to_string(),
            found: parser.current_token().describe(),
        }));
    }
    let attr = parser.advance()?.value;

    Ok(Parsed::plain(Expr::Attribute(Attribute {
        value: Box::new(value),
        attr,
        ctx: ExprContext::Load,
    })))
}

/// `value[...]`. One index stays an index, several plain indexes form a tuple
/// index, and any range among several dimensions makes an extended slice.
pub fn parse_subscript_expr(
    parser: &mut Parser,
    left: Parsed,
    _bp: BindingPower,
) -> Result<Parsed, Error> {
    parser.advance()?;
    let value = left.into_expr(parser)?;
    let mut dims = vec![];
    let mut has_comma = false;

    loop {
        let lower = parse_optional_expr(parser, BindingPower::UNTIL_COMMA)?;

        if parser.eat(":")? {
            let upper = parse_optional_expr(parser, BindingPower::UNTIL_COMMA)?;
            let step = if parser.eat(":")? {
                parse_optional_expr(parser, BindingPower::UNTIL_COMMA)?
            } else {
                None
            };
            dims.push(Slice::Slice(SliceRange {
                lower: lower.map(Box::new),
                upper: upper.map(Box::new),
                step: step.map(Box::new),
            }));
        } else {
            let Some(lower) = lower else {
                return Err(parser.error(ErrorImpl::EmptySubscript));
            };
            dims.push(Slice::Index(Index {
                value: Box::new(lower),
            }));
        }

        if !parser.eat(",")? {
            break;
        }
        has_comma = true;
        if parser.check("]") {
            break;
        }
    }
    parser.expect("]")?;

    let slice = if !has_comma && dims.len() == 1 {
        dims.remove(0)
    } else if dims.iter().all(|dim| matches!(dim, Slice::Index(_))) {
        let elts = dims
            .into_iter()
            .filter_map(|dim| match dim {
                Slice::Index(index) => Some(*index.value),
                _ => None,
            })
            .collect();
        Slice::Index(Index {
            value: Box::new(Expr::Tuple(Tuple {
                elts,
                ctx: ExprContext::Load,
            })),
        })
    } else {
        Slice::ExtSlice(ExtSlice { dims })
    };

    Ok(Parsed::plain(Expr::Subscript(Subscript {
        value: Box::new(value),
        slice,
        ctx: ExprContext::Load,
    })))
}

/// `func(args)`
pub fn parse_call_expr(
    parser: &mut Parser,
    left: Parsed,
    _bp: BindingPower,
) -> Result<Parsed, Error> {
    parser.advance()?;
    let func = left.into_expr(parser)?;
    let (args, keywords) = parse_call_arguments(parser)?;

    Ok(Parsed::plain(Expr::Call(Call {
        func: Box::new(func),
        args,
        keywords,
    })))
}

/// Argument list after an opening parenthesis, up to and including the closing
/// one. Also used for class bases.
pub fn parse_call_arguments(parser: &mut Parser) -> Result<(Vec<Expr>, Vec<Keyword>), Error> {
    let mut args = vec![];
    let mut keywords = vec![];

    while !parser.check(")") {
        if parser.eat("**")? {
            let value = parse_expr(parser, BindingPower::UNTIL_COMMA)?;
            keywords.push(Keyword { arg: None, value });
        } else if parser.eat("*")? {
            let value = parse_expr(parser, BindingPower::UNTIL_COMMA)?;
            args.push(Expr::Starred(Starred {
                value: Box::new(value),
                ctx: ExprContext::Load,
            }));
        } else {
            let arg = parse_operand(parser, BindingPower::UNTIL_COMMA)?;
            if parser.eat("=")? {
                let Expr::Name(Name { id, .. }) = arg.expr else {
                    return Err(parser.error(ErrorImpl::InvalidKeywordArgument));
                };
                let value = parse_expr(parser, BindingPower::UNTIL_COMMA)?;
                keywords.push(Keyword {
                    arg: Some(id),
                    value,
                });
            } else {
                let arg = match arg.into_comprehension() {
                    Ok(comp) => Expr::GeneratorExp(comp),
                    Err(arg) => arg.into_expr(parser)?,
                };
                args.push(arg);
            }
        }

        if !parser.eat(",")? {
            break;
        }
    }
    parser.expect(")")?;

    Ok((args, keywords))
}
