//! Unit tests for the lexer module.
//!
//! - Keywords per dialect and identifiers
//! - Numeric, string and character literals
//! - Operators and punctuation
//! - Comments
//! - Error cases

use crate::{config::Dialect, errors::errors::ErrorImpl};

use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.cs".to_string()), Dialect::CSharp).unwrap()
}

fn lex_vsc(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.vsc".to_string()), Dialect::VortexScript).unwrap()
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_csharp_keywords() {
    let tokens = lex("namespace class if while return using public static int void");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Namespace,
            TokenKind::Class,
            TokenKind::If,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::Using,
            TokenKind::Public,
            TokenKind::Static,
            TokenKind::Type,
            TokenKind::Type,
            TokenKind::EOF,
        ]
    );
    assert_eq!(tokens[8].value, "int");
    assert_eq!(tokens[9].value, "void");
}

#[test]
fn test_keywords_depend_on_dialect() {
    let csharp = lex("byte import namespace");
    assert_eq!(
        kinds(&csharp),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Namespace, TokenKind::EOF]
    );

    let vortex = lex_vsc("byte import namespace");
    assert_eq!(
        kinds(&vortex),
        vec![TokenKind::Type, TokenKind::Import, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let tokens = lex("iffy whilex returned int_value");

    assert!(tokens[..4].iter().all(|token| token.kind == TokenKind::Identifier));
    assert_eq!(tokens[0].value, "iffy");
    assert_eq!(tokens[3].value, "int_value");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = lex("42 0 0x1F 0b101 3.14");

    assert!(tokens[..5].iter().all(|token| token.kind == TokenKind::Number));
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[2].value, "0x1F");
    assert_eq!(tokens[3].value, "0b101");
    assert_eq!(tokens[4].value, "3.14");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_without_escape_processing() {
    let tokens = lex(r#""math.vsc" "a\nb""#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "math.vsc");
    assert_eq!(tokens[1].value, "a\\nb");
}

#[test]
fn test_tokenize_chars() {
    let tokens = lex(r"'a' '\n' ' '");

    assert_eq!(kinds(&tokens), vec![TokenKind::Char, TokenKind::Char, TokenKind::Char, TokenKind::EOF]);
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, " ");
}

#[test]
fn test_tokenize_operators() {
    let tokens = lex("+ - * / % == != < > <= >= = && || => !");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Arrow,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    let tokens = lex("x>=10;y=x-1;");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Identifier,
            TokenKind::GreaterEquals,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = lex("{ } ( ) ; , . :");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_dropped() {
    let tokens = lex("int a = 1; // trailing\n/* multi\n line */ a = 2;");

    assert_eq!(tokens.len(), 10);
    assert!(tokens.iter().all(|token| !token.value.contains("trailing")));
    assert_eq!(tokens[5].value, "a");
}

#[test]
fn test_token_positions() {
    let tokens = lex("int  value = 7;");

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 10);
    assert_eq!(tokens[3].span.start.0, 13);
    assert_eq!(tokens.last().unwrap().span.start.0, 15);
}

#[test]
fn test_empty_source() {
    let tokens = lex("   \n\t ");

    assert_eq!(kinds(&tokens), vec![TokenKind::EOF]);
}

#[test]
fn test_unrecognised_character_is_an_error() {
    let result = tokenize("int a = 1 # 2;".to_string(), Some("test.cs".to_string()), Dialect::CSharp);

    let error = result.unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnrecognisedToken { token: "#".to_string() });
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_unrecognised_unicode_character() {
    let result = tokenize("int é = 1;".to_string(), None, Dialect::CSharp);

    let error = result.unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnrecognisedToken { token: "é".to_string() });
    assert_eq!(error.get_position().1.as_str(), "shell");
}
