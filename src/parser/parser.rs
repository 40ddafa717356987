//! Parser engine: token consumption, lookup-table dispatch and the
//! precedence-climbing loop.
//!
//! Grammar productions live in `expr` and `blocks`; they call back into
//! the engine to parse sub-expressions and sub-blocks. The engine itself
//! knows nothing about individual constructs.

use std::collections::HashMap;

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        reader::Reader,
        tokens::{Token, TokenKind, TokenSource},
    },
};

use super::{
    blocks::parse_block,
    expr::{parse_binary_expr, parse_prefix_expr},
    lookups::{
        binary_precedence, create_token_lookups, InfixHandler, InfixLookup, Precedence,
        PrecedenceLookup, PrefixHandler, PrefixLookup,
    },
};

/// The main parser structure.
///
/// Holds the token source and the dispatch tables:
/// - prefix productions, keyed by the token kind that starts a construct
/// - infix productions plus their precedence, keyed by operator kind
///
/// The tables are filled by [`create_token_lookups`] before parsing
/// starts; a configured parser only reads them, so one engine setup can
/// serve any number of sequential parses.
pub struct Parser<S: TokenSource> {
    tokens: S,
    prefix_lookup: PrefixLookup<S>,
    infix_lookup: InfixLookup<S>,
    precedence_lookup: PrecedenceLookup,
}

impl<S: TokenSource> Parser<S> {
    pub fn new(tokens: S) -> Self {
        Parser {
            tokens,
            prefix_lookup: HashMap::new(),
            infix_lookup: HashMap::new(),
            precedence_lookup: HashMap::new(),
        }
    }

    /// Registers a prefix production for a token kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind that introduces the construct
    /// * `prefix_fn` - The production to run after consuming that token
    pub fn register(&mut self, kind: TokenKind, prefix_fn: PrefixHandler<S>) {
        self.prefix_lookup.insert(kind, prefix_fn);
    }

    /// Binds the generic unary-prefix production to a token kind.
    pub fn prefix(&mut self, kind: TokenKind) {
        self.prefix_lookup.insert(kind, parse_prefix_expr);
    }

    /// Registers an infix production and its precedence for a token kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The operator token kind
    /// * `precedence` - How tightly the operator binds
    /// * `infix_fn` - The production receiving the already-parsed left side
    pub fn infix(&mut self, kind: TokenKind, precedence: Precedence, infix_fn: InfixHandler<S>) {
        self.precedence_lookup.insert(kind, precedence);
        self.infix_lookup.insert(kind, infix_fn);
    }

    /// Binds the generic left-associative binary production to an
    /// operator kind at that operator's precedence.
    pub fn binary_op(&mut self, kind: TokenKind) -> Result<(), Error> {
        let precedence = binary_precedence(kind).ok_or_else(|| {
            Error::new(ErrorImpl::UnknownOperator { op: kind }, crate::Position::null())
        })?;
        self.infix(kind, precedence, parse_binary_expr);
        Ok(())
    }

    /// Parses a top-level sequence of expressions until `eof`. A single
    /// expression is returned directly, anything else comes back wrapped
    /// in a Block.
    pub fn parse(&mut self) -> Result<Ast, Error> {
        let mut block = parse_block(self, &[TokenKind::Eof])?;

        if let Ast::Block { exps } = &mut block {
            if exps.len() == 1 {
                return Ok(exps.remove(0));
            }
        }

        Ok(block)
    }

    /// Parses exactly one expression and requires the input to end there.
    pub fn parse_one(&mut self) -> Result<Ast, Error> {
        let ast = self.parse_expression(Precedence::None)?;

        if !self.tokens.is_empty()? {
            let token = self.tokens.next_token()?;
            return Err(Error::new(
                ErrorImpl::TrailingInput {
                    token: token.to_string(),
                },
                token.span.start.clone(),
            ));
        }

        Ok(ast)
    }

    /// The Pratt core. Consumes one token, dispatches its prefix
    /// production, then folds in infix productions for as long as the
    /// upcoming token binds tighter than `min_precedence`.
    pub fn parse_expression(&mut self, min_precedence: Precedence) -> Result<Ast, Error> {
        let token = self.tokens.next_token()?;

        let prefix_fn = match self.prefix_lookup.get(&token.kind) {
            Some(prefix_fn) => *prefix_fn,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.to_string(),
                    },
                    token.span.start.clone(),
                ))
            }
        };

        let mut left = prefix_fn(self, token)?;

        while min_precedence < self.next_precedence()? {
            let token = self.tokens.next_token()?;
            let infix_fn = match self.infix_lookup.get(&token.kind) {
                Some(infix_fn) => *infix_fn,
                // next_precedence only exceeds None for registered kinds
                None => break,
            };
            left = infix_fn(self, left, token)?;
        }

        Ok(left)
    }

    /// Precedence of the upcoming token's infix production; `None` when
    /// the token has no infix production.
    fn next_precedence(&mut self) -> Result<Precedence, Error> {
        let kind = self.tokens.peek()?.kind;
        Ok(self
            .precedence_lookup
            .get(&kind)
            .copied()
            .unwrap_or(Precedence::None))
    }

    /// Consumes and returns the next token. When `expected` is given, a
    /// token of any other kind is a mismatch error carrying both kinds.
    pub fn next_token(&mut self, expected: Option<TokenKind>) -> Result<Token, Error> {
        let token = self.tokens.next_token()?;

        if let Some(expected) = expected {
            if token.kind != expected {
                return Err(Error::new(
                    ErrorImpl::TokenMismatch {
                        expected,
                        actual: token.kind,
                    },
                    token.span.start.clone(),
                ));
            }
        }

        Ok(token)
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token, Error> {
        self.tokens.peek()
    }

    /// True iff the next token has the given kind.
    pub fn peek_is(&mut self, kind: TokenKind) -> Result<bool, Error> {
        Ok(self.tokens.peek()?.kind == kind)
    }
}

/// Parses a source string into an AST.
///
/// This is the main entry point. It wires up the whole pipeline (Reader,
/// Lexer, a parser with freshly populated lookup tables) and parses
/// until `eof`.
pub fn parse(source: &str, file: Option<String>) -> Result<Ast, Error> {
    let reader = Reader::new(source);
    let lexer = Lexer::new(reader, file);

    let mut parser = Parser::new(lexer);
    create_token_lookups(&mut parser)?;

    parser.parse()
}
