//! Unit tests for error handling.
//!
//! This module contains tests for error construction, family names and
//! suggestion tips.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.rbl".to_string()))
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnterminatedString,
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_lex_errors_share_a_family() {
    let unexpected = Error::new(
        ErrorImpl::UnexpectedCharacter {
            character: "@".to_string(),
        },
        at(0),
    );
    let unterminated = Error::new(ErrorImpl::UnterminatedString, at(0));

    assert_eq!(unexpected.get_error_name(), "LexError");
    assert_eq!(unterminated.get_error_name(), "LexError");
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "`end` (end)".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_token_mismatch_error_carries_both_kinds() {
    let error = Error::new(
        ErrorImpl::TokenMismatch {
            expected: TokenKind::Const,
            actual: TokenKind::Name,
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "TokenMismatch");
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => {
            assert!(tip.contains("const"));
            assert!(tip.contains("name"));
        }
        ErrorTip::None => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_grammar_violation_family() {
    let errors = [
        ErrorImpl::InvalidAssignmentTarget {
            found: "Int".to_string(),
        },
        ErrorImpl::InvalidCallTarget {
            found: "Int".to_string(),
        },
        ErrorImpl::TooManyClauses {
            clause: "ensure".to_string(),
        },
        ErrorImpl::UnknownOperator {
            op: TokenKind::Pipe,
        },
        ErrorImpl::ExpectedElseOrEnd {
            token: "`do` (do)".to_string(),
        },
        ErrorImpl::IntOutOfRange {
            token: "99999999999999999999".to_string(),
        },
    ];

    for error_impl in errors {
        let error = Error::new(error_impl, at(0));
        assert_eq!(error.get_error_name(), "GrammarViolation");
    }
}

#[test]
fn test_trailing_input_error() {
    let error = Error::new(
        ErrorImpl::TrailingInput {
            token: "`2` (int)".to_string(),
        },
        at(2),
    );

    assert_eq!(error.get_error_name(), "TrailingInput");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter {
            character: "@".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::TooManyClauses {
            clause: "else".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("else")),
        ErrorTip::None => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_error_impl_messages() {
    let error = ErrorImpl::TokenMismatch {
        expected: TokenKind::End,
        actual: TokenKind::Eof,
    };

    assert_eq!(error.to_string(), "expected end token, got eof");
}
