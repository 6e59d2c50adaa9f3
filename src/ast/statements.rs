use crate::Span;

use super::expressions::{Condition, Expression};

/// Every statement the language has. Code generation matches on this
/// exhaustively, so a new kind has to be lowered before the crate builds.
#[derive(Debug, Clone)]
pub enum Statement {
    VarDecl(VarDeclStmt),
    If(IfStmt),
    While(WhileStmt),
    Call(CallStmt),
    Return(ReturnStmt),
}

impl Statement {
    pub fn get_span(&self) -> &Span {
        match self {
            Statement::VarDecl(stmt) => &stmt.span,
            Statement::If(stmt) => &stmt.span,
            Statement::While(stmt) => &stmt.span,
            Statement::Call(stmt) => &stmt.span,
            Statement::Return(stmt) => &stmt.span,
        }
    }
}

/// `int x = value;` or, with no type, the assignment `x = value;`.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub var_type: Option<String>,
    pub identifier: String,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Condition,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Condition,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// `name(args);`, or `Class.name(args);` when qualified.
#[derive(Debug, Clone)]
pub struct CallStmt {
    pub class: Option<String>,
    pub identifier: String,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub span: Span,
}
