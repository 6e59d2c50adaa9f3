use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{
        expressions::{BinaryOperator, ComparisonOperator},
        statements::Statement,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{parser::Parser, stmt::*};

pub type StmtHandler = fn(&mut Parser) -> Result<Statement, Error>;

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;

lazy_static! {
    pub static ref BINARY_OPERATOR_LOOKUP: HashMap<TokenKind, BinaryOperator> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Plus, BinaryOperator::Add);
        map.insert(TokenKind::Dash, BinaryOperator::Subtract);
        map.insert(TokenKind::Star, BinaryOperator::Multiply);
        map.insert(TokenKind::Slash, BinaryOperator::Divide);
        map.insert(TokenKind::Percent, BinaryOperator::Modulo);
        map
    };
    pub static ref COMPARISON_LOOKUP: HashMap<TokenKind, ComparisonOperator> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Equals, ComparisonOperator::Equals);
        map.insert(TokenKind::NotEquals, ComparisonOperator::NotEquals);
        map.insert(TokenKind::Greater, ComparisonOperator::Greater);
        map.insert(TokenKind::Less, ComparisonOperator::Less);
        map.insert(TokenKind::GreaterEquals, ComparisonOperator::GreaterEquals);
        map.insert(TokenKind::LessEquals, ComparisonOperator::LessEquals);
        map
    };
}

pub fn create_token_lookups(parser: &mut Parser) {
    // Statements that start with a dedicated keyword
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}
