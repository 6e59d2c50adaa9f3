use crate::{
    ast::statements::{CallStmt, IfStmt, ReturnStmt, Statement, VarDeclStmt, WhileStmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_condition, parse_expr, parse_value_expr},
    parser::Parser,
};

/// Dispatches on the current token, looking one token ahead after an identifier.
pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let kind = parser.current_token_kind();
    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    match kind {
        TokenKind::Identifier => match parser.peek_kind() {
            TokenKind::Assignment => parse_assignment_stmt(parser),
            TokenKind::OpenParen | TokenKind::Dot => parse_call_stmt(parser),
            _ => {
                parser.advance();
                Err(parser.expected("`=` or `(` after identifier"))
            }
        },
        kind if kind.is_reserved() => parse_var_decl_stmt(parser),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

/// `'{' Statement* '}'`
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Statement>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(body)
}

/// `['const'] KEYWORD IDENT '=' Value ';'`
///
/// Any keyword is taken as the type; `else {` therefore fails on the
/// missing identifier.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();

    if parser.current_token_kind() == TokenKind::Const {
        parser.advance();
    }
    let var_type = parser.advance().value.clone();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected identifier during variable declaration"),
        },
        parser.get_position(),
    );
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::Assignment)?;
    let value = parse_value_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::VarDecl(VarDeclStmt {
        var_type: Some(var_type),
        identifier,
        value,
        span: parser.span_from(start),
    }))
}

/// `IDENT '=' Value ';'`
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    let identifier = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::Assignment)?;
    let value = parse_value_expr(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::VarDecl(VarDeclStmt {
        var_type: None,
        identifier,
        value,
        span: parser.span_from(start),
    }))
}

/// `IDENT ['.' IDENT] '(' (Expr (',' Expr)*)? ')' ';'`
pub fn parse_call_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.get_position();
    let first = parser.expect(TokenKind::Identifier)?.value;

    let (class, identifier) = if parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        (Some(first), parser.expect(TokenKind::Identifier)?.value)
    } else {
        (None, first)
    };

    parser.expect(TokenKind::OpenParen)?;
    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if !arguments.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }
        arguments.push(parse_expr(parser)?);
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Call(CallStmt {
        class,
        identifier,
        arguments,
        span: parser.span_from(start),
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Statement::If(IfStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Statement::While(WhileStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

/// `'return' [Expr] ';'`
pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(Statement::Return(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}
