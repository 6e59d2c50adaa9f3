use crate::{
    ast::expressions::{
        BinaryExpr, CharExpr, Condition, Expression, NumberExpr, Operand, SymbolExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{BINARY_OPERATOR_LOOKUP, COMPARISON_LOOKUP},
    parser::Parser,
};

/// `Operand [op Operand]`. Expressions are flat, so a second operator is
/// left for the caller to reject.
pub fn parse_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let left = parse_operand(parser)?;

    let operator = match BINARY_OPERATOR_LOOKUP.get(&parser.current_token_kind()) {
        Some(operator) => *operator,
        None => return Ok(Expression::Operand(left)),
    };
    parser.advance();

    let right = parse_operand(parser)?;

    Ok(Expression::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        operator,
        left,
        right,
    }))
}

/// The right-hand side of a declaration or assignment.
///
/// Accepts a leading `(TYPE)` cast, which is dropped since every value is a
/// byte, and one pair of grouping parentheses.
pub fn parse_value_expr(parser: &mut Parser) -> Result<Expression, Error> {
    if parser.current_token_kind() == TokenKind::OpenParen && parser.peek_kind() == TokenKind::Type
    {
        parser.advance();
        parser.advance();
        parser.expect(TokenKind::CloseParen)?;
    }

    if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        let expr = parse_expr(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        return Ok(expr);
    }

    parse_expr(parser)
}

/// `IDENT cmp Operand`
pub fn parse_condition(parser: &mut Parser) -> Result<Condition, Error> {
    let left_token = parser.expect(TokenKind::Identifier)?;
    let left = SymbolExpr {
        value: left_token.value,
        span: left_token.span,
    };

    let operator = match COMPARISON_LOOKUP.get(&parser.current_token_kind()) {
        Some(operator) => *operator,
        None => return Err(parser.expected("comparison operator")),
    };
    parser.advance();

    let right = parse_operand(parser)?;

    Ok(Condition {
        span: Span {
            start: left.span.start.clone(),
            end: right.get_span().end.clone(),
        },
        operator,
        left,
        right,
    })
}

pub fn parse_operand(parser: &mut Parser) -> Result<Operand, Error> {
    let token = parser.current_token().clone();

    let operand = match token.kind {
        TokenKind::Number => Operand::Number(NumberExpr {
            value: parse_number(&token.value).ok_or_else(|| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    parser.get_position(),
                )
            })?,
            span: token.span,
        }),
        TokenKind::True | TokenKind::False => Operand::Number(NumberExpr {
            value: u8::from(token.kind == TokenKind::True),
            span: token.span,
        }),
        TokenKind::Identifier => Operand::Symbol(SymbolExpr {
            value: token.value,
            span: token.span,
        }),
        TokenKind::Char | TokenKind::String => {
            let mut chars = token.value.chars();
            let value = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => {
                    return Err(Error::new(
                        ErrorImpl::NotImplementedError {
                            feature: String::from("strings longer than one character"),
                        },
                        parser.get_position(),
                    ))
                }
            };

            if u8::try_from(u32::from(value)).is_err() {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: token.value,
                        message: String::from("character does not fit in a byte"),
                    },
                    parser.get_position(),
                ));
            }

            Operand::Character(CharExpr {
                value,
                span: token.span,
            })
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                parser.get_position(),
            ))
        }
    };

    parser.advance();
    Ok(operand)
}

/// Decimal, `0x` hexadecimal or `0b` binary text to a byte.
///
/// Fractions and anything above 255 yield `None`.
pub fn parse_number(text: &str) -> Option<u8> {
    let lower = text.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix("0x") {
        u8::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u8::from_str_radix(bin, 2).ok()
    } else {
        lower.parse::<u8>().ok()
    }
}
