//! Productions for the keyword-terminated block constructs: if/unless,
//! case/when, class/module/def, begin/rescue/ensure/else and do-blocks.
//!
//! They all lean on `parse_block`, which reads expressions up to a
//! caller-supplied terminator set and leaves the terminator in the
//! stream for the caller to validate and consume.

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenSource},
};

use super::{expr::parse_arg_list, lookups::Precedence, parser::Parser};

const BEGIN_CLAUSE_STARTS: [TokenKind; 4] = [
    TokenKind::Rescue,
    TokenKind::Ensure,
    TokenKind::Else,
    TokenKind::End,
];

const CASE_CLAUSE_STARTS: [TokenKind; 3] = [TokenKind::When, TokenKind::Else, TokenKind::End];

/// Parses expressions until the next token is one of `terminators`,
/// without consuming it.
pub fn parse_block<S: TokenSource>(
    parser: &mut Parser<S>,
    terminators: &[TokenKind],
) -> Result<Ast, Error> {
    let mut exps = vec![];

    while !terminators.contains(&parser.peek()?.kind) {
        exps.push(parser.parse_expression(Precedence::None)?);
    }

    Ok(Ast::Block { exps })
}

/// `if cond ... [elsif cond ...]* [else ...] end`. An `elsif` recurses
/// into this production, so the chain nests in `else_branch` and the
/// final `end` is consumed by whichever branch terminates it.
pub fn parse_if_expr<S: TokenSource>(parser: &mut Parser<S>, _token: Token) -> Result<Ast, Error> {
    let cond = parser.parse_expression(Precedence::None)?;
    let then_branch = parse_block(
        parser,
        &[TokenKind::Else, TokenKind::Elsif, TokenKind::End],
    )?;

    let next = parser.next_token(None)?;
    let else_branch = match next.kind {
        TokenKind::Else => {
            let block = parse_block(parser, &[TokenKind::End])?;
            parser.next_token(Some(TokenKind::End))?;
            Some(Box::new(block))
        }
        TokenKind::Elsif => Some(Box::new(parse_if_expr(parser, next)?)),
        // end: the block terminator set admits nothing else
        _ => None,
    };

    Ok(Ast::If {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch,
    })
}

/// `unless cond ... [else ...] end`. No elsif chain here.
pub fn parse_unless_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let cond = parser.parse_expression(Precedence::None)?;
    let then_branch = parse_block(parser, &[TokenKind::Else, TokenKind::End])?;

    let next = parser.next_token(None)?;
    let else_branch = match next.kind {
        TokenKind::Else => {
            let block = parse_block(parser, &[TokenKind::End])?;
            parser.next_token(Some(TokenKind::End))?;
            Some(Box::new(block))
        }
        TokenKind::End => None,
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedElseOrEnd {
                    token: next.to_string(),
                },
                next.span.start.clone(),
            ))
        }
    };

    Ok(Ast::Unless {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch,
    })
}

/// `case [value] (when value ...)* [else ...] end`. The scrutinee is
/// absent when the first clause starts immediately. At most one `else`.
pub fn parse_case_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let case_value =
        if parser.peek_is(TokenKind::When)? || parser.peek_is(TokenKind::Else)? {
            None
        } else {
            Some(Box::new(parser.parse_expression(Precedence::None)?))
        };

    let mut when_clauses = vec![];
    let mut else_clause = None;

    loop {
        let next = parser.next_token(None)?;
        match next.kind {
            TokenKind::When => when_clauses.push(parse_when_clause(parser)?),
            TokenKind::Else => {
                if else_clause.is_some() {
                    return Err(Error::new(
                        ErrorImpl::TooManyClauses {
                            clause: String::from("else"),
                        },
                        next.span.start.clone(),
                    ));
                }
                else_clause = Some(Box::new(parse_block(parser, &CASE_CLAUSE_STARTS)?));
            }
            TokenKind::End => break,
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: next.to_string(),
                    },
                    next.span.start.clone(),
                ))
            }
        }
    }

    Ok(Ast::Case {
        case_value,
        when_clauses,
        else_clause,
    })
}

fn parse_when_clause<S: TokenSource>(parser: &mut Parser<S>) -> Result<Ast, Error> {
    let when_value = parser.parse_expression(Precedence::None)?;
    let when_block = parse_block(parser, &CASE_CLAUSE_STARTS)?;

    Ok(Ast::When {
        when_value: Box::new(when_value),
        when_block: Box::new(when_block),
    })
}

/// `class Const [< Const] ... end`.
pub fn parse_class_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let name_token = parser.next_token(Some(TokenKind::Const))?;

    let parent = if parser.peek_is(TokenKind::Lt)? {
        parser.next_token(Some(TokenKind::Lt))?;
        let parent_token = parser.next_token(Some(TokenKind::Const))?;
        Some(Box::new(Ast::Const {
            name: parent_token.text,
        }))
    } else {
        None
    };

    let body = parse_block(parser, &[TokenKind::End])?;
    parser.next_token(Some(TokenKind::End))?;

    Ok(Ast::Class {
        name: Box::new(Ast::Const {
            name: name_token.text,
        }),
        parent,
        body: Box::new(body),
    })
}

/// `module Const ... end`.
pub fn parse_module_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let name_token = parser.next_token(Some(TokenKind::Const))?;

    let body = parse_block(parser, &[TokenKind::End])?;
    parser.next_token(Some(TokenKind::End))?;

    Ok(Ast::Module {
        name: Box::new(Ast::Const {
            name: name_token.text,
        }),
        body: Box::new(body),
    })
}

/// `def name[(params)] ... end` or `def self.name[(params)] ... end`.
/// The method name is a plain identifier, never a constant.
pub fn parse_method_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let on_self = parser.peek_is(TokenKind::SelfKw)?;
    if on_self {
        parser.next_token(Some(TokenKind::SelfKw))?;
        parser.next_token(Some(TokenKind::Dot))?;
    }

    let name = parser.next_token(Some(TokenKind::Name))?.text;

    let params = if parser.peek_is(TokenKind::LParen)? {
        parser.next_token(Some(TokenKind::LParen))?;
        parse_arg_list(parser, TokenKind::RParen)?
    } else {
        Ast::empty_arg_list()
    };

    let body = parse_block(parser, &[TokenKind::End])?;
    parser.next_token(Some(TokenKind::End))?;

    let params = Box::new(params);
    let body = Box::new(body);

    if on_self {
        Ok(Ast::SelfMethod { name, params, body })
    } else {
        Ok(Ast::Method { name, params, body })
    }
}

/// `begin ... (rescue [Const] [=> name] ...)* [ensure ...] [else ...]
/// end`. Clauses interleave in source order; a second `ensure` or `else`
/// is a grammar error.
pub fn parse_begin_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    _token: Token,
) -> Result<Ast, Error> {
    let body = parse_block(parser, &BEGIN_CLAUSE_STARTS)?;

    let mut rescues = vec![];
    let mut ensure_clause = None;
    let mut else_clause = None;

    loop {
        let next = parser.next_token(None)?;
        match next.kind {
            TokenKind::Rescue => rescues.push(parse_rescue_clause(parser)?),
            TokenKind::Ensure => {
                if ensure_clause.is_some() {
                    return Err(Error::new(
                        ErrorImpl::TooManyClauses {
                            clause: String::from("ensure"),
                        },
                        next.span.start.clone(),
                    ));
                }
                ensure_clause = Some(Box::new(parse_block(parser, &BEGIN_CLAUSE_STARTS)?));
            }
            TokenKind::Else => {
                if else_clause.is_some() {
                    return Err(Error::new(
                        ErrorImpl::TooManyClauses {
                            clause: String::from("else"),
                        },
                        next.span.start.clone(),
                    ));
                }
                else_clause = Some(Box::new(parse_block(parser, &BEGIN_CLAUSE_STARTS)?));
            }
            TokenKind::End => break,
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: next.to_string(),
                    },
                    next.span.start.clone(),
                ))
            }
        }
    }

    Ok(Ast::BeginBlock {
        body: Box::new(body),
        rescues,
        ensure_clause,
        else_clause,
    })
}

fn parse_rescue_clause<S: TokenSource>(parser: &mut Parser<S>) -> Result<Ast, Error> {
    let exception_class = if parser.peek_is(TokenKind::Const)? {
        let token = parser.next_token(Some(TokenKind::Const))?;
        Some(Box::new(Ast::Const { name: token.text }))
    } else {
        None
    };

    let exception_variable = if parser.peek_is(TokenKind::Rocket)? {
        parser.next_token(Some(TokenKind::Rocket))?;
        let token = parser.next_token(Some(TokenKind::Name))?;
        Some(Box::new(Ast::Name { name: token.text }))
    } else {
        None
    };

    let body = parse_block(parser, &BEGIN_CLAUSE_STARTS)?;

    Ok(Ast::Rescue {
        body: Box::new(body),
        exception_class,
        exception_variable,
    })
}

/// `do [|params|] ... end`, attached to a call. The parameter list uses
/// the same production as call arguments, closed by the second pipe.
pub fn parse_do_block<S: TokenSource>(parser: &mut Parser<S>) -> Result<Ast, Error> {
    let args = if parser.peek_is(TokenKind::Pipe)? {
        parser.next_token(Some(TokenKind::Pipe))?;
        parse_arg_list(parser, TokenKind::Pipe)?
    } else {
        Ast::empty_arg_list()
    };

    let block = parse_block(parser, &[TokenKind::End])?;
    parser.next_token(Some(TokenKind::End))?;

    Ok(Ast::DoBlock {
        args: Box::new(args),
        block: Box::new(block),
    })
}

pub fn parse_optional_do_block<S: TokenSource>(
    parser: &mut Parser<S>,
) -> Result<Option<Box<Ast>>, Error> {
    if parser.peek_is(TokenKind::Do)? {
        parser.next_token(Some(TokenKind::Do))?;
        Ok(Some(Box::new(parse_do_block(parser)?)))
    } else {
        Ok(None)
    }
}
