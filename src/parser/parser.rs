//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parse entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Compound statement handlers
//! - Simple statement handlers
//! - Token classes keyed by token kind (literals)
//! - Token classes keyed by token text (operators and keywords)

use std::{collections::HashMap, fmt::Display, rc::Rc, str::FromStr};

use crate::{
    ast::{
        ast::{Expr, Expression, Interactive, Mod, Module},
        types::ExprContext,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{generate_tokens, LineReader, SourceLines},
        tokens::{Token, TokenKind},
    },
    Position, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BindingPower, KindLookup, LedHandler, NudHandler, StmtHandler,
        StmtLookup, TextLookup, TokenClass,
    },
    stmt::parse_stmt,
};

type TokenStream<'a> = Box<dyn Iterator<Item = Result<Token, Error>> + 'a>;

/// The main parser structure that maintains parsing state.
///
/// Tokens are pulled lazily from the underlying stream with one token of
/// lookahead. Comments and non-logical newlines never reach the handlers.
pub struct Parser<'a> {
    /// The stream tokens are pulled from
    tokens: TokenStream<'a>,
    /// The lookahead token
    current: Token,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for compound statement handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for simple statement handlers
    simple_stmt_lookup: StmtLookup,
    /// Token classes for literal kinds, checked first
    kind_lookup: KindLookup,
    /// Token classes for operators and keywords
    text_lookup: TextLookup,
    /// Decorators waiting for the next function or class definition
    decorators: Vec<Expr>,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser and pulls the first token.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token stream to parse
    /// * `file` - Reference-counted string containing the source file name
    pub fn new(
        tokens: impl Iterator<Item = Result<Token, Error>> + 'a,
        file: Rc<String>,
    ) -> Result<Self, Error> {
        let mut parser = Parser {
            tokens: Box::new(tokens),
            current: MK_TOKEN!(TokenKind::EndMarker, String::new(), 1, Rc::from("")),
            file,
            stmt_lookup: HashMap::new(),
            simple_stmt_lookup: HashMap::new(),
            kind_lookup: HashMap::new(),
            text_lookup: HashMap::new(),
            decorators: vec![],
        };
        create_token_lookups(&mut parser);
        parser.current = parser.pull()?;
        Ok(parser)
    }

    /// Pulls the next significant token. Once the stream is exhausted the last
    /// end marker repeats.
    fn pull(&mut self) -> Result<Token, Error> {
        loop {
            match self.tokens.next() {
                Some(Ok(token)) if matches!(token.kind, TokenKind::Comment | TokenKind::Nl) => {}
                Some(Ok(token)) => {
                    tracing::trace!(token = %token, "pulled");
                    return Ok(token);
                }
                Some(Err(error)) => return Err(error),
                None => {
                    return Ok(MK_TOKEN!(
                        TokenKind::EndMarker,
                        String::new(),
                        self.current.line,
                        Rc::from("")
                    ))
                }
            }
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.pull()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// True when the current token is the name or operator `text`.
    pub fn check(&self, text: &str) -> bool {
        matches!(self.current.kind, TokenKind::Name | TokenKind::Op) && self.current.value == text
    }

    pub fn check_kind(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consumes the current token if it is `text`.
    pub fn eat(&mut self, text: &str) -> Result<bool, Error> {
        if self.check(text) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consumes the current token if it is of `kind`. The end marker is never consumed.
    pub fn eat_kind(&mut self, kind: TokenKind) -> Result<bool, Error> {
        if self.check_kind(kind) && kind != TokenKind::EndMarker {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Expects the name or operator `text`.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an ExpectedToken error.
    pub fn expect(&mut self, text: &str) -> Result<Token, Error> {
        if self.check(text) {
            return self.advance();
        }
        Err(self.expected(text))
    }

    /// Expects a token of the specified kind.
    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.check_kind(kind) {
            return self.advance();
        }
        Err(self.expected(kind))
    }

    /// Expects an identifier that is not a reserved word.
    pub fn expect_name(&mut self) -> Result<String, Error> {
        if self.check_kind(TokenKind::Name) && !self.current.is_keyword() {
            return Ok(self.advance()?.value);
        }
        Err(self.expected(TokenKind::Name))
    }

    fn expected(&self, expected: impl Display) -> Error {
        self.error(ErrorImpl::ExpectedToken {
            expected: expected.to_string(),
            found: self.current.describe(),
        })
    }

    /// Builds an error positioned at the current token.
    pub fn error(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.get_position())
    }

    /// True at a token that ends an expression.
    pub fn is_delim(&self) -> bool {
        match self.current.kind {
            TokenKind::Newline | TokenKind::EndMarker => true,
            TokenKind::Op => matches!(
                self.current.value.as_str(),
                ";" | "]" | "}" | ")" | ":" | "="
            ),
            _ => false,
        }
    }

    /// Looks up the parsing behavior of `token`, by kind first and then by text.
    pub fn token_class(&self, token: &Token) -> Option<TokenClass> {
        if let Some(class) = self.kind_lookup.get(&token.kind) {
            return Some(*class);
        }
        match token.kind {
            TokenKind::Name | TokenKind::Op => self.text_lookup.get(token.value.as_str()).copied(),
            _ => None,
        }
    }

    pub fn get_stmt_handler(&self) -> Option<StmtHandler> {
        match self.current.kind {
            TokenKind::Name => self.stmt_lookup.get(self.current.value.as_str()).copied(),
            _ => None,
        }
    }

    pub fn get_simple_stmt_handler(&self) -> Option<StmtHandler> {
        match self.current.kind {
            TokenKind::Name => self
                .simple_stmt_lookup
                .get(self.current.value.as_str())
                .copied(),
            _ => None,
        }
    }

    /// Registers a left denotation (infix) handler for a token text.
    pub fn led(&mut self, text: &'static str, binding_power: BindingPower, led_fn: LedHandler) {
        let class = self.text_lookup.entry(text).or_default();
        class.lbp = binding_power;
        class.led = Some(led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token text.
    pub fn nud(&mut self, text: &'static str, nud_fn: NudHandler) {
        self.text_lookup.entry(text).or_default().nud = Some(nud_fn);
    }

    pub fn led_kind(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LedHandler) {
        let class = self.kind_lookup.entry(kind).or_default();
        class.lbp = binding_power;
        class.led = Some(led_fn);
    }

    pub fn nud_kind(&mut self, kind: TokenKind, nud_fn: NudHandler) {
        self.kind_lookup.entry(kind).or_default().nud = Some(nud_fn);
    }

    /// Registers a compound statement handler for a keyword.
    pub fn stmt(&mut self, keyword: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(keyword, stmt_fn);
    }

    /// Registers a simple statement handler for a keyword.
    pub fn simple_stmt(&mut self, keyword: &'static str, stmt_fn: StmtHandler) {
        self.simple_stmt_lookup.insert(keyword, stmt_fn);
    }

    pub fn push_decorator(&mut self, decorator: Expr) {
        self.decorators.push(decorator);
    }

    pub fn take_decorators(&mut self) -> Vec<Expr> {
        std::mem::take(&mut self.decorators)
    }

    pub fn has_decorators(&self) -> bool {
        !self.decorators.is_empty()
    }

    /// Rewrites the context of an assignment, deletion or loop target.
    ///
    /// Subscripts keep their inner expressions as loads, as does the object of
    /// an attribute. Anything that cannot be a target is rejected.
    pub fn set_context(&self, expr: &mut Expr, ctx: ExprContext) -> Result<(), Error> {
        match expr {
            Expr::Name(name) => name.ctx = ctx,
            Expr::Attribute(attribute) => attribute.ctx = ctx,
            Expr::Subscript(subscript) => subscript.ctx = ctx,
            Expr::Starred(starred) => {
                starred.ctx = ctx;
                self.set_context(&mut starred.value, ctx)?;
            }
            Expr::List(list) => {
                list.ctx = ctx;
                for elt in &mut list.elts {
                    self.set_context(elt, ctx)?;
                }
            }
            Expr::Tuple(tuple) => {
                tuple.ctx = ctx;
                for elt in &mut tuple.elts {
                    self.set_context(elt, ctx)?;
                }
            }
            other => {
                return Err(self.error(ErrorImpl::InvalidTarget {
                    kind: target_description(other).to_string(),
                }))
            }
        }
        Ok(())
    }

    /// Returns the current position in the source file.
    pub fn get_position(&self) -> Position {
        Position(self.current.line, Rc::clone(&self.file))
    }
}

fn target_description(expr: &Expr) -> &'static str {
    match expr {
        Expr::Call(_) => "function call",
        Expr::Num(_) | Expr::Str(_) | Expr::Bytes(_) | Expr::Ellipsis => "literal",
        Expr::NameConstant(_) => "keyword",
        Expr::BinOp(_) | Expr::UnaryOp(_) | Expr::BoolOp(_) => "operator",
        Expr::Compare(_) => "comparison",
        Expr::Lambda(_) => "lambda",
        Expr::IfExp(_) => "conditional expression",
        Expr::ListComp(_) => "list comprehension",
        Expr::SetComp(_) => "set comprehension",
        Expr::DictComp(_) => "dict comprehension",
        Expr::GeneratorExp(_) => "generator expression",
        Expr::Dict(_) => "dict display",
        Expr::Set(_) => "set display",
        Expr::Await(_) => "await expression",
        Expr::Yield(_) | Expr::YieldFrom(_) => "yield expression",
        other => other.kind(),
    }
}

/// What a parse produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// A module: statements until the end of input
    #[default]
    Exec,
    /// A single expression
    Eval,
    /// One interactive statement
    Single,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exec" => Ok(Mode::Exec),
            "eval" => Ok(Mode::Eval),
            "single" => Ok(Mode::Single),
            other => Err(format!("unknown parse mode {:?}", other)),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Exec => "exec",
            Mode::Eval => "eval",
            Mode::Single => "single",
        };
        write!(f, "{}", name)
    }
}

fn parse_mod(parser: &mut Parser, mode: Mode) -> Result<Mod, Error> {
    match mode {
        Mode::Exec => {
            let mut body = vec![];
            while !parser.check_kind(TokenKind::EndMarker) {
                body.extend(parse_stmt(parser)?);
            }
            Ok(Mod::Module(Module { body }))
        }
        Mode::Eval => {
            let body = parse_expr(parser, BindingPower::DEFAULT)?;
            while parser.eat_kind(TokenKind::Newline)? {}
            parser.expect_kind(TokenKind::EndMarker)?;
            Ok(Mod::Expression(Expression {
                body: Box::new(body),
            }))
        }
        Mode::Single => Ok(Mod::Interactive(Interactive {
            body: parse_stmt(parser)?,
        })),
    }
}

/// Parses a token stream into a tree.
///
/// This is the lowest-level entry point: it creates a parser instance,
/// initializes all lookup tables, and parses according to `mode`.
///
/// # Arguments
///
/// * `tokens` - Tokens in source order, comments and non-logical newlines allowed
/// * `file` - Name used in error positions
/// * `mode` - What to parse
#[tracing::instrument(skip_all, fields(mode = %mode))]
pub fn parse_tokens<I>(tokens: I, file: Option<String>, mode: Mode) -> Result<Mod, Error>
where
    I: IntoIterator<Item = Token>,
{
    let file = Rc::new(file.unwrap_or_else(|| String::from("<unknown>")));
    let mut parser = Parser::new(tokens.into_iter().map(Ok::<Token, Error>), file)?;
    parse_mod(&mut parser, mode)
}

/// Parses source text pulled line by line from `reader`.
#[tracing::instrument(skip_all, fields(mode = %mode))]
pub fn parse_lines<R: LineReader>(reader: R, file: Option<String>, mode: Mode) -> Result<Mod, Error> {
    let tokenizer = generate_tokens(reader, file);
    let file = tokenizer.file();
    let mut parser = Parser::new(tokenizer, file)?;
    let tree = parse_mod(&mut parser, mode)?;
    tracing::debug!(kind = tree.kind(), "parsed");
    Ok(tree)
}

/// Parses a complete source text.
///
/// # Examples
///
/// ```
/// use pyfront::{ast::dump, parse, Mode};
///
/// let tree = parse("x = 1\n", None, Mode::Exec).unwrap();
/// assert_eq!(
///     dump(&tree),
///     "Module(body=[Assign(targets=[Name(id='x', ctx=Store())], value=Num(n=1))])"
/// );
/// ```
pub fn parse(source: &str, file: Option<String>, mode: Mode) -> Result<Mod, Error> {
    parse_lines(SourceLines::new(source), file, mode)
}
