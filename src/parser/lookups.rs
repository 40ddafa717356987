use std::collections::HashMap;

use crate::{
    ast::ast::Ast,
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind, TokenSource},
};

use super::{blocks::*, expr::*, parser::Parser};

/// Operator precedence, higher binds tighter. `None` doubles as the
/// "no infix production here" level that stops the climbing loop.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum Precedence {
    None,
    Assign,
    AndOr,
    Equality,
    Compare,
    Term,
    Product,
    Unary,
    Call,
}

pub type PrefixHandler<S> = fn(&mut Parser<S>, Token) -> Result<Ast, Error>;
pub type InfixHandler<S> = fn(&mut Parser<S>, Ast, Token) -> Result<Ast, Error>;

/// Precedence of a generic binary operator, or `None` for token kinds
/// that are not binary operators.
pub fn binary_precedence(op: TokenKind) -> Option<Precedence> {
    match op {
        TokenKind::Plus | TokenKind::Minus => Some(Precedence::Term),
        TokenKind::Prod | TokenKind::Div => Some(Precedence::Product),
        TokenKind::Gt | TokenKind::Lt => Some(Precedence::Compare),
        TokenKind::Equals => Some(Precedence::Equality),
        _ => None,
    }
}

/// One-time table setup binding every grammar production to the token
/// kind that introduces it. Not part of the parsing hot path.
pub fn create_token_lookups<S: TokenSource>(parser: &mut Parser<S>) -> Result<(), Error> {
    parser.infix(TokenKind::And, Precedence::AndOr, parse_logical_expr);
    parser.infix(TokenKind::Or, Precedence::AndOr, parse_logical_expr);
    parser.infix(TokenKind::Assign, Precedence::Assign, parse_assignment_expr);
    parser.infix(TokenKind::Dot, Precedence::Call, parse_dot_call_expr);
    parser.infix(TokenKind::LParen, Precedence::Call, parse_paren_call_expr);

    parser.prefix(TokenKind::Minus);

    parser.binary_op(TokenKind::Plus)?;
    parser.binary_op(TokenKind::Minus)?;
    parser.binary_op(TokenKind::Prod)?;
    parser.binary_op(TokenKind::Div)?;
    parser.binary_op(TokenKind::Gt)?;
    parser.binary_op(TokenKind::Lt)?;
    parser.binary_op(TokenKind::Equals)?;

    parser.register(TokenKind::Begin, parse_begin_expr);
    parser.register(TokenKind::Break, parse_basic_value);
    parser.register(TokenKind::Case, parse_case_expr);
    parser.register(TokenKind::Class, parse_class_expr);
    parser.register(TokenKind::Const, parse_const_expr);
    parser.register(TokenKind::Def, parse_method_expr);
    parser.register(TokenKind::DStringStart, parse_double_string_expr);
    parser.register(TokenKind::False, parse_basic_value);
    parser.register(TokenKind::If, parse_if_expr);
    parser.register(TokenKind::Int, parse_int_expr);
    parser.register(TokenKind::Module, parse_module_expr);
    parser.register(TokenKind::Name, parse_name_expr);
    parser.register(TokenKind::Next, parse_basic_value);
    parser.register(TokenKind::Nil, parse_basic_value);
    parser.register(TokenKind::Not, parse_not_expr);
    parser.register(TokenKind::SelfKw, parse_basic_value);
    parser.register(TokenKind::True, parse_basic_value);
    parser.register(TokenKind::Unless, parse_unless_expr);

    Ok(())
}

// Lookup tables inside the parser struct, so setup stays one call
pub type PrefixLookup<S> = HashMap<TokenKind, PrefixHandler<S>>;
pub type InfixLookup<S> = HashMap<TokenKind, InfixHandler<S>>;
pub type PrecedenceLookup = HashMap<TokenKind, Precedence>;
