use std::fmt::Display;

use crate::Span;

// OPERANDS

/// A leaf of an expression: a byte literal, a character literal or a variable.
///
/// Operands never nest. A binary expression holds exactly two of them.
#[derive(Debug, Clone)]
pub enum Operand {
    Number(NumberExpr),
    Character(CharExpr),
    Symbol(SymbolExpr),
}

impl Operand {
    pub fn get_span(&self) -> &Span {
        match self {
            Operand::Number(number) => &number.span,
            Operand::Character(character) => &character.span,
            Operand::Symbol(symbol) => &symbol.span,
        }
    }

    /// The immediate value of a literal operand, `None` for variables.
    pub fn literal_value(&self) -> Option<u8> {
        match self {
            Operand::Number(number) => Some(number.value),
            Operand::Character(character) => Some(character.ordinal()),
            Operand::Symbol(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: u8,
    pub span: Span,
}

/// Single-character literal. The parser only admits characters whose code
/// point fits in a byte.
#[derive(Debug, Clone)]
pub struct CharExpr {
    pub value: char,
    pub span: Span,
}

impl CharExpr {
    pub fn ordinal(&self) -> u8 {
        self.value as u32 as u8
    }
}

#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

// EXPRESSIONS

#[derive(Debug, Clone)]
pub enum Expression {
    Operand(Operand),
    Binary(BinaryExpr),
}

impl Expression {
    pub fn get_span(&self) -> &Span {
        match self {
            Expression::Operand(operand) => operand.get_span(),
            Expression::Binary(binary) => &binary.span,
        }
    }
}

/// `left <op> right`, one operator per expression.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub operator: BinaryOperator,
    pub left: Operand,
    pub right: Operand,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        };
        write!(f, "{}", symbol)
    }
}

// CONDITIONS

/// `left <cmp> right` inside `if (...)` or `while (...)`.
///
/// The grammar only puts a variable on the left; the right side may be a
/// variable or a literal.
#[derive(Debug, Clone)]
pub struct Condition {
    pub operator: ComparisonOperator,
    pub left: SymbolExpr,
    pub right: Operand,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    Greater,
    Less,
    GreaterEquals,
    LessEquals,
}

impl ComparisonOperator {
    /// The logical negation: `a <op> b` is false exactly when `a <inverse> b` is true.
    pub fn inverse(&self) -> ComparisonOperator {
        match self {
            ComparisonOperator::Equals => ComparisonOperator::NotEquals,
            ComparisonOperator::NotEquals => ComparisonOperator::Equals,
            ComparisonOperator::Greater => ComparisonOperator::LessEquals,
            ComparisonOperator::Less => ComparisonOperator::GreaterEquals,
            ComparisonOperator::GreaterEquals => ComparisonOperator::Less,
            ComparisonOperator::LessEquals => ComparisonOperator::Greater,
        }
    }

    pub fn evaluate(&self, left: u8, right: u8) -> bool {
        match self {
            ComparisonOperator::Equals => left == right,
            ComparisonOperator::NotEquals => left != right,
            ComparisonOperator::Greater => left > right,
            ComparisonOperator::Less => left < right,
            ComparisonOperator::GreaterEquals => left >= right,
            ComparisonOperator::LessEquals => left <= right,
        }
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            ComparisonOperator::Equals => "==",
            ComparisonOperator::NotEquals => "!=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::Less => "<",
            ComparisonOperator::GreaterEquals => ">=",
            ComparisonOperator::LessEquals => "<=",
        };
        write!(f, "{}", symbol)
    }
}
