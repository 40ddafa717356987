//! Expression productions: literals, identifiers, operators, assignment
//! and both call forms.
//!
//! Each production is a stateless function registered once in the
//! engine's lookup tables. Prefix productions receive the token that
//! selected them (already consumed); infix productions additionally
//! receive the expression parsed so far.

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenSource},
};

use super::{
    blocks::parse_optional_do_block,
    lookups::{binary_precedence, Precedence},
    parser::Parser,
};

pub fn parse_name_expr<S: TokenSource>(
    _parser: &mut Parser<S>,
    token: Token,
) -> Result<Ast, Error> {
    Ok(Ast::Name { name: token.text })
}

pub fn parse_const_expr<S: TokenSource>(
    _parser: &mut Parser<S>,
    token: Token,
) -> Result<Ast, Error> {
    Ok(Ast::Const { name: token.text })
}

pub fn parse_int_expr<S: TokenSource>(
    _parser: &mut Parser<S>,
    token: Token,
) -> Result<Ast, Error> {
    let value = token.text.parse().map_err(|_| {
        Error::new(
            ErrorImpl::IntOutOfRange {
                token: token.text.clone(),
            },
            token.span.start.clone(),
        )
    })?;

    Ok(Ast::Int { value })
}

/// The lexer fans a string literal out into three tokens; the engine has
/// already consumed `dstring_start`, so the content and terminator are
/// next in line. The content text is kept verbatim, unescaped.
pub fn parse_double_string_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let content = parser.next_token(Some(TokenKind::StringContent))?;
    parser.next_token(Some(TokenKind::DStringEnd))?;

    Ok(Ast::DoubleString {
        string: content.text,
    })
}

/// Zero-argument productions keyed by the literal keyword itself. The
/// catch-all arm is unreachable as long as registration only binds this
/// to the six keywords below.
pub fn parse_basic_value<S: TokenSource>(
    _parser: &mut Parser<S>,
    token: Token,
) -> Result<Ast, Error> {
    match token.kind {
        TokenKind::True => Ok(Ast::True),
        TokenKind::False => Ok(Ast::False),
        TokenKind::Nil => Ok(Ast::Nil),
        TokenKind::SelfKw => Ok(Ast::SelfExp),
        TokenKind::Break => Ok(Ast::Break),
        TokenKind::Next => Ok(Ast::Next),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.to_string(),
            },
            token.span.start.clone(),
        )),
    }
}

pub fn parse_prefix_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    token: Token,
) -> Result<Ast, Error> {
    let operand = parser.parse_expression(Precedence::Unary)?;

    Ok(Ast::Prefix {
        op: token.kind,
        operand: Box::new(operand),
    })
}

pub fn parse_binary_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Ast,
    token: Token,
) -> Result<Ast, Error> {
    let precedence = binary_precedence(token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnknownOperator { op: token.kind },
            token.span.start.clone(),
        )
    })?;

    let right = parser.parse_expression(precedence)?;

    Ok(Ast::BinaryOp {
        left: Box::new(left),
        op: token.kind,
        right: Box::new(right),
    })
}

/// `and` and `or` share one production; only the resulting tag differs.
pub fn parse_logical_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Ast,
    token: Token,
) -> Result<Ast, Error> {
    let right = parser.parse_expression(Precedence::AndOr)?;

    let left = Box::new(left);
    let right = Box::new(right);

    Ok(match token.kind {
        TokenKind::And => Ast::And { left, right },
        _ => Ast::Or { left, right },
    })
}

pub fn parse_not_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let expr = parser.parse_expression(Precedence::Unary)?;

    Ok(Ast::Not {
        expr: Box::new(expr),
    })
}

/// Right-associative by construction: the value recurses from the bottom
/// of the precedence ladder, so `a = b = c` binds the tail first.
pub fn parse_assignment_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Ast,
    token: Token,
) -> Result<Ast, Error> {
    if !left.is_name() {
        return Err(Error::new(
            ErrorImpl::InvalidAssignmentTarget {
                found: left.node_name().to_string(),
            },
            token.span.start.clone(),
        ));
    }

    let value = parser.parse_expression(Precedence::None)?;

    Ok(Ast::Assign {
        name: Box::new(left),
        value: Box::new(value),
    })
}

/// Comma-separated expressions up to (and consuming) `closing`. An
/// immediately-closing token yields an empty list.
pub fn parse_arg_list<S: TokenSource>(
    parser: &mut Parser<S>,
    closing: TokenKind,
) -> Result<Ast, Error> {
    let mut args = vec![];

    if !parser.peek_is(closing)? {
        loop {
            args.push(parser.parse_expression(Precedence::None)?);

            if !parser.peek_is(TokenKind::Comma)? {
                break;
            }
            parser.next_token(Some(TokenKind::Comma))?;
        }
    }

    parser.next_token(Some(closing))?;

    Ok(Ast::ArgList { args })
}

/// `target.method`, `target.method(args)`, either with an optional
/// trailing `do ... end` block. The argument list is always present on
/// the resulting node, empty when no parentheses appear.
pub fn parse_dot_call_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Ast,
    _token: Token,
) -> Result<Ast, Error> {
    let method = parser.next_token(Some(TokenKind::Name))?;

    let args = if parser.peek_is(TokenKind::LParen)? {
        parser.next_token(Some(TokenKind::LParen))?;
        parse_arg_list(parser, TokenKind::RParen)?
    } else {
        Ast::empty_arg_list()
    };

    let block = parse_optional_do_block(parser)?;

    Ok(Ast::Call {
        target: Some(Box::new(left)),
        method: method.text,
        args: Box::new(args),
        block,
    })
}

/// `method(args)` without a receiver. The opening paren was consumed as
/// the infix token, so the callee is whatever was parsed to its left;
/// anything but a plain name is malformed.
pub fn parse_paren_call_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Ast,
    token: Token,
) -> Result<Ast, Error> {
    let method = match left {
        Ast::Name { name } => name,
        other => {
            return Err(Error::new(
                ErrorImpl::InvalidCallTarget {
                    found: other.node_name().to_string(),
                },
                token.span.start.clone(),
            ))
        }
    };

    let args = parse_arg_list(parser, TokenKind::RParen)?;
    let block = parse_optional_do_block(parser)?;

    Ok(Ast::Call {
        target: None,
        method,
        args: Box::new(args),
        block,
    })
}
