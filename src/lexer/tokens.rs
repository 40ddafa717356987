use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{errors::errors::Error, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("begin", TokenKind::Begin);
        map.insert("break", TokenKind::Break);
        map.insert("case", TokenKind::Case);
        map.insert("class", TokenKind::Class);
        map.insert("def", TokenKind::Def);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("elsif", TokenKind::Elsif);
        map.insert("end", TokenKind::End);
        map.insert("ensure", TokenKind::Ensure);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("module", TokenKind::Module);
        map.insert("next", TokenKind::Next);
        map.insert("nil", TokenKind::Nil);
        map.insert("not", TokenKind::Not);
        map.insert("or", TokenKind::Or);
        map.insert("rescue", TokenKind::Rescue);
        map.insert("return", TokenKind::Return);
        map.insert("self", TokenKind::SelfKw);
        map.insert("super", TokenKind::Super);
        map.insert("true", TokenKind::True);
        map.insert("unless", TokenKind::Unless);
        map.insert("until", TokenKind::Until);
        map.insert("when", TokenKind::When);
        map.insert("while", TokenKind::While);
        map.insert("yield", TokenKind::Yield);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,

    Int,
    Name,
    Const,

    DStringStart,
    StringContent,
    DStringEnd,

    Plus,
    Minus,
    Prod,
    Div,

    Gt,
    Lt,
    Assign, // =
    Equals, // ==
    Rocket, // =>

    Dot,
    LParen,
    RParen,
    Comma,
    Pipe,

    // Reserved
    And,
    Begin,
    Break,
    Case,
    Class,
    Def,
    Do,
    Else,
    Elsif,
    End,
    Ensure,
    False,
    If,
    Module,
    Next,
    Nil,
    Not,
    Or,
    Rescue,
    Return,
    SelfKw,
    Super,
    True,
    Unless,
    Until,
    When,
    While,
    Yield,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Eof => "eof",
            TokenKind::Int => "int",
            TokenKind::Name => "name",
            TokenKind::Const => "const",
            TokenKind::DStringStart => "dstring_start",
            TokenKind::StringContent => "string_content",
            TokenKind::DStringEnd => "dstring_end",
            TokenKind::Plus => "plus",
            TokenKind::Minus => "minus",
            TokenKind::Prod => "prod",
            TokenKind::Div => "div",
            TokenKind::Gt => "gt",
            TokenKind::Lt => "lt",
            TokenKind::Assign => "assign",
            TokenKind::Equals => "equals",
            TokenKind::Rocket => "rocket",
            TokenKind::Dot => "dot",
            TokenKind::LParen => "lparen",
            TokenKind::RParen => "rparen",
            TokenKind::Comma => "comma",
            TokenKind::Pipe => "pipe",
            TokenKind::And => "and",
            TokenKind::Begin => "begin",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Class => "class",
            TokenKind::Def => "def",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Elsif => "elsif",
            TokenKind::End => "end",
            TokenKind::Ensure => "ensure",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Module => "module",
            TokenKind::Next => "next",
            TokenKind::Nil => "nil",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Rescue => "rescue",
            TokenKind::Return => "return",
            TokenKind::SelfKw => "self",
            TokenKind::Super => "super",
            TokenKind::True => "true",
            TokenKind::Unless => "unless",
            TokenKind::Until => "until",
            TokenKind::When => "when",
            TokenKind::While => "while",
            TokenKind::Yield => "yield",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Token whose text is the stringified kind. Keywords and punctuation
    /// carry their own spelling this way.
    pub fn new(kind: TokenKind) -> Token {
        Token {
            kind,
            text: kind.to_string(),
            span: Span::null(),
        }
    }

    pub fn with_text(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            text: String::from(text),
            span: Span::null(),
        }
    }

    pub fn spanned(kind: TokenKind, text: String, span: Span) -> Token {
        Token { kind, text, span }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` ({})", self.text, self.kind)
    }
}

/// The parser's view of a token stream: one-token lookahead plus
/// consumption. Satisfied by the lexer and by a plain token queue, so
/// productions never depend on lexer internals.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, Error>;
    fn peek(&mut self) -> Result<&Token, Error>;

    fn is_empty(&mut self) -> Result<bool, Error> {
        Ok(self.peek()?.kind == TokenKind::Eof)
    }
}

/// Pre-built token list acting as a token source. Keeps handing out `eof`
/// once the list is exhausted.
pub struct TokenQueue {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl TokenQueue {
    pub fn new(tokens: Vec<Token>) -> TokenQueue {
        TokenQueue {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof),
        }
    }
}

impl TokenSource for TokenQueue {
    fn next_token(&mut self) -> Result<Token, Error> {
        if self.pos < self.tokens.len() {
            self.pos += 1;
            Ok(self.tokens[self.pos - 1].clone())
        } else {
            Ok(self.eof.clone())
        }
    }

    fn peek(&mut self) -> Result<&Token, Error> {
        if self.pos < self.tokens.len() {
            Ok(&self.tokens[self.pos])
        } else {
            Ok(&self.eof)
        }
    }
}
