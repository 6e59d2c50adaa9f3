use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{config::Dialect, Span};

lazy_static! {
    pub static ref CSHARP_RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Type);
        map.insert("string", TokenKind::Type);
        map.insert("void", TokenKind::Type);
        map.insert("bool", TokenKind::Type);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map.insert("class", TokenKind::Class);
        map.insert("namespace", TokenKind::Namespace);
        map.insert("public", TokenKind::Public);
        map.insert("private", TokenKind::Private);
        map.insert("static", TokenKind::Static);
        map.insert("new", TokenKind::New);
        map.insert("const", TokenKind::Const);
        map.insert("using", TokenKind::Using);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
    pub static ref VORTEX_RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("byte", TokenKind::Type);
        map.insert("bool", TokenKind::Type);
        map.insert("string", TokenKind::Type);
        map.insert("void", TokenKind::Type);
        map.insert("package", TokenKind::Package);
        map.insert("import", TokenKind::Import);
        map.insert("public", TokenKind::Public);
        map.insert("static", TokenKind::Static);
        map.insert("class", TokenKind::Class);
        map.insert("const", TokenKind::Const);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("return", TokenKind::Return);
        map
    };
}

pub fn reserved_lookup(dialect: Dialect) -> &'static HashMap<&'static str, TokenKind> {
    match dialect {
        Dialect::CSharp => &CSHARP_RESERVED_LOOKUP,
        Dialect::VortexScript => &VORTEX_RESERVED_LOOKUP,
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Char,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Colon,
    Comma,
    Arrow, // =>

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Type,
    Namespace,
    Class,
    Using,
    Import,
    Package,
    Public,
    Private,
    Static,
    Const,
    New,
    If,
    Else,
    While,
    For,
    Return,
    True,
    False,
}

impl TokenKind {
    /// Whether this kind comes from a reserved word rather than punctuation or a literal.
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            TokenKind::Type
                | TokenKind::Namespace
                | TokenKind::Class
                | TokenKind::Using
                | TokenKind::Import
                | TokenKind::Package
                | TokenKind::Public
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Const
                | TokenKind::New
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Return
                | TokenKind::True
                | TokenKind::False
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
        )
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, TokenKind::Public | TokenKind::Private | TokenKind::Static)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String | TokenKind::Char | TokenKind::Identifier | TokenKind::Number => {
                write!(f, "{} ({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
