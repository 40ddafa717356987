use std::fmt::Display;

use thiserror::Error as ThisError;

use crate::{lexer::tokens::TokenKind, Position};

/// A fatal front-end error plus where it happened. Parsing stops at the
/// first one; there is no recovery or partial AST.
#[derive(Debug, Clone)]
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

    /// The error family, named for presentation.
    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "LexError",
            ErrorImpl::UnterminatedString => "LexError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::TokenMismatch { .. } => "TokenMismatch",
            ErrorImpl::InvalidAssignmentTarget { .. } => "GrammarViolation",
            ErrorImpl::InvalidCallTarget { .. } => "GrammarViolation",
            ErrorImpl::TooManyClauses { .. } => "GrammarViolation",
            ErrorImpl::UnknownOperator { .. } => "GrammarViolation",
            ErrorImpl::ExpectedElseOrEnd { .. } => "GrammarViolation",
            ErrorImpl::IntOutOfRange { .. } => "GrammarViolation",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
            ErrorImpl::MalformedSexp { .. } => "MalformedSexp",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "Missing a `\"`? Reached end of input inside a double-quoted string",
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Could not parse token {}", token))
            }
            ErrorImpl::TokenMismatch { expected, actual } => ErrorTip::Suggestion(format!(
                "Expected `{}` token but got `{}`",
                expected, actual
            )),
            ErrorImpl::InvalidAssignmentTarget { found } => {
                ErrorTip::Suggestion(format!("Cannot assign to {}", found))
            }
            ErrorImpl::InvalidCallTarget { found } => {
                ErrorTip::Suggestion(format!("Cannot call {}", found))
            }
            ErrorImpl::TooManyClauses { clause } => {
                ErrorTip::Suggestion(format!("Too many {} clauses", clause))
            }
            ErrorImpl::UnknownOperator { op } => {
                ErrorTip::Suggestion(format!("Unknown operator: `{}`", op))
            }
            ErrorImpl::ExpectedElseOrEnd { token } => ErrorTip::Suggestion(format!(
                "Expected `else` or `end` here but got {}",
                token
            )),
            ErrorImpl::IntOutOfRange { token } => ErrorTip::Suggestion(format!(
                "Invalid integer: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::TrailingInput { token } => ErrorTip::Suggestion(format!(
                "Input continues past a complete expression: {}",
                token
            )),
            ErrorImpl::MalformedSexp { message } => ErrorTip::Suggestion(message.clone()),
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

#[derive(ThisError, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unexpected character: {character:?}")]
    UnexpectedCharacter { character: String },
    #[error("unterminated double-quoted string")]
    UnterminatedString,
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected} token, got {actual}")]
    TokenMismatch {
        expected: TokenKind,
        actual: TokenKind,
    },
    #[error("cannot assign to {found:?}")]
    InvalidAssignmentTarget { found: String },
    #[error("cannot call {found:?}")]
    InvalidCallTarget { found: String },
    #[error("too many {clause:?} clauses")]
    TooManyClauses { clause: String },
    #[error("unknown operator: {op}")]
    UnknownOperator { op: TokenKind },
    #[error("expected else or end, got {token:?}")]
    ExpectedElseOrEnd { token: String },
    #[error("integer out of range: {token:?}")]
    IntOutOfRange { token: String },
    #[error("trailing input: {token:?}")]
    TrailingInput { token: String },
    #[error("malformed sexp: {message}")]
    MalformedSexp { message: String },
}
