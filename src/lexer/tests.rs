//! Unit tests for the lexer module.
//!
//! Covers classification of lexemes, NEWLINE/NL handling, indentation tracking,
//! multi-line strings and the lexical error cases.

use super::{
    lexer::{generate_tokens, tokenize},
    tokens::{Token, TokenKind},
};
use crate::errors::errors::{ErrorCategory, ErrorImpl};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

fn values(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|token| token.value.as_str()).collect()
}

#[test]
fn test_tokenize_simple_assignment() {
    let tokens = tokenize("x = 1\n", Some("test.py".to_string())).unwrap();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Name,
            TokenKind::Op,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::EndMarker
        ]
    );
    assert_eq!(values(&tokens), vec!["x", "=", "1", "\n", ""]);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(&*tokens[0].raw_line, "x = 1\n");
}

#[test]
fn test_tokenize_keywords_are_names() {
    let tokens = tokenize("if not x: pass\n", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[0].value, "if");
    assert!(tokens[0].is_keyword());
    assert_eq!(tokens[1].value, "not");
    assert!(!tokens[2].is_keyword());
    assert_eq!(tokens[3].value, ":");
    assert_eq!(tokens[3].kind, TokenKind::Op);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 .5 0xFF 0o17 0b101 1_000 1e10 2.5E-3 3j 0x1.8\n", None).unwrap();

    let numbers: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Number)
        .map(|token| token.value.as_str())
        .collect();
    assert_eq!(
        numbers,
        vec!["42", "3.14", ".5", "0xFF", "0o17", "0b101", "1_000", "1e10", "2.5E-3", "3j", "0x1.8"]
    );
}

#[test]
fn test_number_followed_by_attribute() {
    let tokens = tokenize("1.real\n", None).unwrap();
    assert_eq!(tokens[0].value, "1.");
    assert_eq!(tokens[1].kind, TokenKind::Name);
    assert_eq!(tokens[1].value, "real");
}

#[test]
fn test_tokenize_operators_longest_match() {
    let tokens = tokenize("a **= b // c ... -> d != e\n", None).unwrap();
    let ops: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Op)
        .map(|token| token.value.as_str())
        .collect();
    assert_eq!(ops, vec!["**=", "//", "...", "->", "!="]);
}

#[test]
fn test_tokenize_strings_and_prefixes() {
    let tokens = tokenize("'a' \"b\" rb'c' f\"d\" bx'e'\n", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "'a'");
    assert_eq!(tokens[1].value, "\"b\"");
    assert_eq!(tokens[2].value, "rb'c'");
    assert_eq!(tokens[3].value, "f\"d\"");
    // not a string prefix
    assert_eq!(tokens[4].kind, TokenKind::Name);
    assert_eq!(tokens[4].value, "bx");
    assert_eq!(tokens[5].kind, TokenKind::String);
}

#[test]
fn test_escaped_quote_in_string() {
    let tokens = tokenize(r#"s = 'it\'s'"#, None).unwrap();
    assert_eq!(tokens[2].value, r#"'it\'s'"#);
    assert_eq!(tokens[3].kind, TokenKind::Newline);
    assert_eq!(tokens[3].value, "");
}

#[test]
fn test_triple_quoted_string_spans_lines() {
    let tokens = tokenize("x = \"\"\"one\ntwo\"\"\"\ny = 1\n", None).unwrap();

    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "\"\"\"one\ntwo\"\"\"");
    assert_eq!(tokens[2].line, 1);
    assert_eq!(tokens[3].kind, TokenKind::Newline);
    assert_eq!(tokens[4].value, "y");
    assert_eq!(tokens[4].line, 3);
}

#[test]
fn test_single_quoted_string_continuation() {
    let tokens = tokenize("s = 'ab\\\ncd'\n", None).unwrap();
    assert_eq!(tokens[2].value, "'ab\\\ncd'");
    assert_eq!(tokens[3].kind, TokenKind::Newline);
}

#[test]
fn test_comments() {
    let tokens = tokenize("# leading\nx = 1  # trailing\n", None).unwrap();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Comment,
            TokenKind::Nl,
            TokenKind::Name,
            TokenKind::Op,
            TokenKind::Number,
            TokenKind::Comment,
            TokenKind::Newline,
            TokenKind::EndMarker
        ]
    );
    assert_eq!(tokens[0].value, "# leading");
    assert_eq!(tokens[5].value, "# trailing");
}

#[test]
fn test_nl_inside_brackets() {
    let tokens = tokenize("f(a,\n  b)\n", None).unwrap();

    assert_eq!(tokens[4].kind, TokenKind::Nl);
    // no indentation tokens inside brackets
    assert!(!kinds(&tokens).contains(&TokenKind::Indent));
    assert_eq!(tokens[tokens.len() - 2].kind, TokenKind::Newline);
}

#[test]
fn test_line_continuation() {
    let tokens = tokenize("x = 1 + \\\n    2\n", None).unwrap();

    assert_eq!(values(&tokens), vec!["x", "=", "1", "+", "2", "\n", ""]);
    assert_eq!(tokens[4].line, 2);
}

#[test]
fn test_indent_and_dedent() {
    let tokens = tokenize("if x:\n    y = 1\n\n    z = 2\nw = 3\n", None).unwrap();

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Name,
            TokenKind::Name,
            TokenKind::Op,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Name,
            TokenKind::Op,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Nl,
            TokenKind::Name,
            TokenKind::Op,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::Name,
            TokenKind::Op,
            TokenKind::Number,
            TokenKind::Newline,
            TokenKind::EndMarker
        ]
    );
    assert_eq!(tokens[4].value, "    ");
}

#[test]
fn test_dedents_emitted_at_end_of_input() {
    let tokens = tokenize("if a:\n  if b:\n    pass", None).unwrap();
    let tail = kinds(&tokens[tokens.len() - 3..]);

    assert_eq!(
        tail,
        vec![TokenKind::Dedent, TokenKind::Dedent, TokenKind::EndMarker]
    );
}

#[test]
fn test_crlf_is_normalized() {
    let tokens = tokenize("x = 1\r\ny = 2\r\n", None).unwrap();
    assert_eq!(tokens[3].value, "\n");
    assert_eq!(tokens[4].value, "y");
}

#[test]
fn test_generate_tokens_from_closure() {
    let mut lines = vec!["a\n".to_string(), "b\n".to_string()].into_iter();
    let reader = move || lines.next();
    let tokens: Vec<Token> = generate_tokens(reader, None)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(values(&tokens), vec!["a", "\n", "b", "\n", ""]);
}

#[test]
fn test_empty_source() {
    let tokens = tokenize("", None).unwrap();
    assert_eq!(kinds(&tokens), vec![TokenKind::EndMarker]);
}

#[test]
fn test_unterminated_string_error() {
    let error = tokenize("x = 'abc\n", Some("bad.py".to_string())).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.category(), ErrorCategory::Lexical);
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_unterminated_triple_quoted_string_error() {
    let error = tokenize("x = '''abc\nmore\n", None).unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedString);
}

#[test]
fn test_continuation_at_end_of_input_error() {
    let error = tokenize("x = 1 + \\\n", None).unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::UnexpectedEof);
}

#[test]
fn test_inconsistent_dedent_error() {
    let error = tokenize("if x:\n    a\n  b\n", None).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::InconsistentDedent { width: 2 });
    assert_eq!(error.get_line(), 3);
    assert_eq!(
        error.get_impl().to_string(),
        "unindent does not match any outer indentation level"
    );
}

#[test]
fn test_stream_stops_after_error() {
    let mut stream = generate_tokens(super::lexer::SourceLines::new("'open\nx\n"), None);

    assert!(matches!(stream.next(), Some(Err(_))));
    assert!(stream.next().is_none());
}
