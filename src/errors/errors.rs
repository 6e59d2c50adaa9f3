use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::MissingEntryPoint => "MissingEntryPoint",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::StorageExhausted { .. } => "StorageExhausted",
            ErrorImpl::NotImplementedError { .. } => "NotImplementedError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected {}, found `{}`", expected, found))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, values must fit in a byte (0..=255)",
                token
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::TooManyArguments { limit, received } => ErrorTip::Suggestion(format!(
                "At most {} arguments fit in registers, received {}",
                limit, received
            )),
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Label `{}` already declared", function))
            }
            ErrorImpl::MissingEntryPoint => {
                ErrorTip::Suggestion(String::from("Declare a method named `Main` or `main`"))
            }
            ErrorImpl::DivisionByZero => {
                ErrorTip::Suggestion(String::from("The right operand of `/` or `%` is zero"))
            }
            ErrorImpl::StorageExhausted { limit } => ErrorTip::Suggestion(format!(
                "Only {} variables fit in data memory",
                limit
            )),
            ErrorImpl::NotImplementedError { feature } => ErrorTip::Suggestion(format!(
                "`{}` is recognised, but cannot be compiled",
                feature
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("too many arguments: limit {limit}, received {received}")]
    TooManyArguments { limit: usize, received: usize },
    #[error("label {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("no `Main` or `main` method to call")]
    MissingEntryPoint,
    #[error("division by zero")]
    DivisionByZero,
    #[error("storage exhausted after {limit} variables")]
    StorageExhausted { limit: usize },
    #[error("not implemented: {feature}")]
    NotImplementedError { feature: String },
}
