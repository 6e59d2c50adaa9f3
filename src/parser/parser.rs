//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, the token cursor helpers and
//! the top-level grammar of both dialects:
//!
//! ```text
//! C#:            Program := (Using | Namespace | Class | GlobalMethod)*
//! VortexScript:  Program := (Import | Class)*
//! ```
//!
//! Bare methods and classes outside a namespace land in the synthetic
//! `Global` namespace; bare methods share one synthetic `Global` class.

use std::{collections::HashMap, rc::Rc};

use tracing::{debug, instrument};

use crate::{
    ast::ast::{Class, Method, Namespace, Parameter, Program, GLOBAL_SCOPE},
    config::Dialect,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    stmt::parse_block,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statements introduced by a keyword
    stmt_lookup: StmtLookup,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|token| token.span.end.0).unwrap_or(0);
            let position = Position(end, Rc::clone(&file));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: position.clone(),
                    end: position,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token after the current one without advancing.
    pub fn peek(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            return Err(error.unwrap_or_else(|| self.expected(&expected_kind.to_string())));
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind with the default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds the error for an unmet expectation at the current token.
    pub fn expected(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::ExpectedToken {
                expected: expected.to_string(),
                found: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = if self.pos == 0 {
            start.clone()
        } else {
            self.tokens[self.pos - 1].span.end.clone()
        };

        Span { start, end }
    }

    /// Kind of the first token that is not an access modifier, without consuming anything.
    fn kind_after_modifiers(&self) -> TokenKind {
        self.tokens[self.pos..]
            .iter()
            .find(|token| !token.kind.is_modifier())
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    fn skip_modifiers(&mut self) {
        while self.current_token_kind().is_modifier() {
            self.advance();
        }
    }

    fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }
}

/// Parses a stream of tokens into a `Program`.
///
/// The first grammar violation is returned as the error; no partial tree
/// is produced.
#[instrument(skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>, file: Rc<String>, dialect: Dialect) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let program = match dialect {
        Dialect::CSharp => parse_csharp_program(&mut parser)?,
        Dialect::VortexScript => parse_vortex_program(&mut parser)?,
    };

    debug!(
        file = %parser.file(),
        namespaces = program.namespaces.len(),
        methods = program.methods().count(),
        "parsed program"
    );
    Ok(program)
}

fn parse_csharp_program(parser: &mut Parser) -> Result<Program, Error> {
    let mut program = Program::default();

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Using => program.imports.push(parse_using(parser)?),
            TokenKind::Namespace => program.namespaces.push(parse_namespace(parser)?),
            _ if parser.kind_after_modifiers() == TokenKind::Class => {
                let class = parse_class(parser)?;
                global_namespace(&mut program).classes.push(class);
            }
            kind if kind.is_reserved() => {
                let method = parse_method(parser)?;
                global_class(global_namespace(&mut program)).methods.push(method);
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: parser.current_token().value.clone(),
                        message: String::from("expected a namespace, class or method declaration"),
                    },
                    parser.get_position(),
                ))
            }
        }
    }

    Ok(program)
}

fn parse_vortex_program(parser: &mut Parser) -> Result<Program, Error> {
    let mut program = Program::default();
    program.namespaces.push(Namespace::new(GLOBAL_SCOPE));

    while parser.has_tokens() {
        match parser.current_token_kind() {
            TokenKind::Import => {
                parser.advance();
                let path = parser.expect(TokenKind::String)?.value;
                parser.expect(TokenKind::Semicolon)?;
                program.imports.push(path);
            }
            _ if parser.kind_after_modifiers() == TokenKind::Class => {
                let class = parse_class(parser)?;
                global_namespace(&mut program).classes.push(class);
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: parser.current_token().value.clone(),
                        message: String::from("expected an import or class declaration"),
                    },
                    parser.get_position(),
                ))
            }
        }
    }

    Ok(program)
}

/// The trailing `Global` namespace, created when the last namespace is a named one.
fn global_namespace(program: &mut Program) -> &mut Namespace {
    let reuse = program
        .namespaces
        .last()
        .is_some_and(|namespace| namespace.name == GLOBAL_SCOPE);
    if !reuse {
        program.namespaces.push(Namespace::new(GLOBAL_SCOPE));
    }

    let last = program.namespaces.len() - 1;
    &mut program.namespaces[last]
}

fn global_class(namespace: &mut Namespace) -> &mut Class {
    let reuse = namespace
        .classes
        .last()
        .is_some_and(|class| class.name == GLOBAL_SCOPE);
    if !reuse {
        namespace.classes.push(Class::new(GLOBAL_SCOPE));
    }

    let last = namespace.classes.len() - 1;
    &mut namespace.classes[last]
}

/// `IDENT ('.' IDENT)*`
fn parse_dotted_name(parser: &mut Parser) -> Result<String, Error> {
    let mut name = parser.expect(TokenKind::Identifier)?.value;

    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        name.push('.');
        name.push_str(&parser.expect(TokenKind::Identifier)?.value);
    }

    Ok(name)
}

fn parse_using(parser: &mut Parser) -> Result<String, Error> {
    parser.expect(TokenKind::Using)?;
    let name = parse_dotted_name(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(name)
}

fn parse_namespace(parser: &mut Parser) -> Result<Namespace, Error> {
    parser.expect(TokenKind::Namespace)?;
    let mut namespace = Namespace::new(&parse_dotted_name(parser)?);

    parser.expect(TokenKind::OpenCurly)?;
    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        namespace.classes.push(parse_class(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(namespace)
}

pub fn parse_class(parser: &mut Parser) -> Result<Class, Error> {
    parser.skip_modifiers();
    parser.expect(TokenKind::Class)?;
    let mut class = Class::new(&parser.expect(TokenKind::Identifier)?.value);

    parser.expect(TokenKind::OpenCurly)?;
    while !matches!(parser.current_token_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        class.methods.push(parse_method(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(class)
}

/// `modifier* TYPE IDENT '(' (TYPE IDENT (',' TYPE IDENT)*)? ')' '{' Statement* '}'`
pub fn parse_method(parser: &mut Parser) -> Result<Method, Error> {
    let start = parser.get_position();
    parser.skip_modifiers();

    let return_type = parser.expect(TokenKind::Type)?.value;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        if !parameters.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }

        let param_start = parser.get_position();
        let param_type = parser.expect(TokenKind::Type)?.value;
        let param_name = parser.expect(TokenKind::Identifier)?.value;
        parameters.push(Parameter {
            param_type,
            name: param_name,
            span: parser.span_from(param_start),
        });
    }
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Method {
        name,
        return_type,
        parameters,
        body,
        span: parser.span_from(start),
    })
}
