use std::collections::HashMap;

use crate::{ast::ast::Stmt, errors::errors::Error, lexer::tokens::TokenKind};

use super::{
    expr::*,
    parser::Parser,
    stmt::*,
};

/// Left binding power of a token, or the right binding power a handler parses its
/// operand with. Higher binds tighter.
#[derive(PartialEq, PartialOrd, Eq, Ord, Clone, Copy, Debug, Default)]
pub struct BindingPower(pub u8);

impl BindingPower {
    pub const DEFAULT: BindingPower = BindingPower(0);
    pub const YIELD_VALUE: BindingPower = BindingPower(4);
    pub const COMMA: BindingPower = BindingPower(5);
    /// Stops before a top-level comma: call arguments, subscripts, displays.
    pub const UNTIL_COMMA: BindingPower = BindingPower(6);
    pub const COMPREHENSION: BindingPower = BindingPower(7);
    pub const LAMBDA: BindingPower = BindingPower(10);
    pub const IF_ORELSE: BindingPower = BindingPower(19);
    pub const CONDITIONAL: BindingPower = BindingPower(20);
    pub const OR: BindingPower = BindingPower(30);
    pub const AND: BindingPower = BindingPower(40);
    pub const NOT: BindingPower = BindingPower(50);
    pub const COMPARISON: BindingPower = BindingPower(60);
    pub const BIT_OR: BindingPower = BindingPower(70);
    pub const BIT_XOR: BindingPower = BindingPower(80);
    pub const BIT_AND: BindingPower = BindingPower(90);
    pub const SHIFT: BindingPower = BindingPower(100);
    pub const ADDITIVE: BindingPower = BindingPower(110);
    pub const MULTIPLICATIVE: BindingPower = BindingPower(120);
    pub const UNARY: BindingPower = BindingPower(130);
    pub const POWER: BindingPower = BindingPower(140);
    pub const AWAIT: BindingPower = BindingPower(150);
    /// Only postfix chains: assignment-like targets and decorators.
    pub const LVALUE: BindingPower = BindingPower(159);
    pub const POSTFIX: BindingPower = BindingPower(160);
    pub const ADJACENT_STRING: BindingPower = BindingPower(200);

    /// Binding power for the right operand of a right-associative operator.
    pub fn right_assoc(self) -> BindingPower {
        BindingPower(self.0.saturating_sub(1))
    }
}

pub type StmtHandler = fn(&mut Parser<'_>) -> Result<Stmt, Error>;
pub type NudHandler = fn(&mut Parser<'_>) -> Result<Parsed, Error>;
pub type LedHandler = fn(&mut Parser<'_>, Parsed, BindingPower) -> Result<Parsed, Error>;

/// Parsing behavior attached to a token.
#[derive(Clone, Copy, Default)]
pub struct TokenClass {
    pub lbp: BindingPower,
    pub nud: Option<NudHandler>,
    pub led: Option<LedHandler>,
}

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals, looked up by kind before text
    parser.nud_kind(TokenKind::Number, parse_number_expr);
    parser.nud_kind(TokenKind::String, parse_string_expr);
    parser.led_kind(TokenKind::String, BindingPower::ADJACENT_STRING, parse_adjacent_string_expr);

    parser.led(",", BindingPower::COMMA, parse_tuple_expr);
    parser.nud("yield", parse_yield_expr);
    parser.led("for", BindingPower::COMPREHENSION, parse_comprehension_expr);
    parser.led("async", BindingPower::COMPREHENSION, parse_comprehension_expr);
    parser.nud("lambda", parse_lambda_expr);
    parser.led("if", BindingPower::CONDITIONAL, parse_conditional_expr);

    // Logical
    parser.led("or", BindingPower::OR, parse_boolean_expr);
    parser.led("and", BindingPower::AND, parse_boolean_expr);
    parser.nud("not", parse_prefix_expr);

    // Comparison
    parser.led("not", BindingPower::COMPARISON, parse_comparison_expr);
    for op in ["==", "!=", "<", "<=", ">", ">=", "is", "in"] {
        parser.led(op, BindingPower::COMPARISON, parse_comparison_expr);
    }

    // Bitwise, additive and multiplicative
    parser.led("|", BindingPower::BIT_OR, parse_binary_expr);
    parser.led("^", BindingPower::BIT_XOR, parse_binary_expr);
    parser.led("&", BindingPower::BIT_AND, parse_binary_expr);
    parser.led("<<", BindingPower::SHIFT, parse_binary_expr);
    parser.led(">>", BindingPower::SHIFT, parse_binary_expr);
    parser.led("+", BindingPower::ADDITIVE, parse_binary_expr);
    parser.led("-", BindingPower::ADDITIVE, parse_binary_expr);
    for op in ["*", "@", "/", "//", "%"] {
        parser.led(op, BindingPower::MULTIPLICATIVE, parse_binary_expr);
    }
    parser.led("**", BindingPower::POWER, parse_power_expr);

    // Prefix
    parser.nud("+", parse_prefix_expr);
    parser.nud("-", parse_prefix_expr);
    parser.nud("~", parse_prefix_expr);
    parser.nud("*", parse_starred_expr);
    parser.nud("await", parse_await_expr);

    // Postfix
    parser.led(".", BindingPower::POSTFIX, parse_member_expr);
    parser.led("[", BindingPower::POSTFIX, parse_subscript_expr);
    parser.led("(", BindingPower::POSTFIX, parse_call_expr);

    // Atoms
    parser.nud("[", parse_list_expr);
    parser.nud("{", parse_brace_expr);
    parser.nud("(", parse_grouping_expr);
    parser.nud("None", parse_constant_expr);
    parser.nud("True", parse_constant_expr);
    parser.nud("False", parse_constant_expr);
    parser.nud("...", parse_ellipsis_expr);

    // Compound statements
    parser.stmt("def", parse_function_def_stmt);
    parser.stmt("async", parse_async_stmt);
    parser.stmt("class", parse_class_def_stmt);
    parser.stmt("if", parse_if_stmt);
    parser.stmt("for", parse_for_stmt);
    parser.stmt("while", parse_while_stmt);
    parser.stmt("with", parse_with_stmt);
    parser.stmt("try", parse_try_stmt);

    // Simple statements
    parser.simple_stmt("import", parse_import_stmt);
    parser.simple_stmt("from", parse_import_from_stmt);
    parser.simple_stmt("break", parse_break_stmt);
    parser.simple_stmt("continue", parse_continue_stmt);
    parser.simple_stmt("pass", parse_pass_stmt);
    parser.simple_stmt("return", parse_return_stmt);
    parser.simple_stmt("raise", parse_raise_stmt);
    parser.simple_stmt("assert", parse_assert_stmt);
    parser.simple_stmt("del", parse_delete_stmt);
    parser.simple_stmt("global", parse_global_stmt);
    parser.simple_stmt("nonlocal", parse_nonlocal_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<&'static str, StmtHandler>;
pub type KindLookup = HashMap<TokenKind, TokenClass>;
pub type TextLookup = HashMap<&'static str, TokenClass>;
