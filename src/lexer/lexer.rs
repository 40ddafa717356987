use std::collections::VecDeque;
use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::{
    reader::Reader,
    tokens::{Token, TokenKind, TokenSource, RESERVED_LOOKUP},
};

/// Single-pass tokenizer over a [`Reader`].
///
/// Tokens are produced on demand. A pending queue in front of the scanner
/// provides the one-token lookahead for `peek` and lets one lexical
/// construct fan out into several tokens: a double-quoted string is
/// returned as `dstring_start` with `string_content` and `dstring_end`
/// queued behind it.
pub struct Lexer {
    reader: Reader,
    pending: VecDeque<Token>,
    file: Rc<String>,
    line: u32,
}

impl Lexer {
    pub fn new(reader: Reader, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<input>"))
        };

        Lexer {
            reader,
            pending: VecDeque::new(),
            file: file_name,
            line: 1,
        }
    }

    /// 1-based line of the cursor. Bumped on every newline the scanner
    /// skips; not consulted by the parser.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Drains the remaining stream into a vector, excluding `eof`.
    pub fn all(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = vec![];
        while !self.is_empty()? {
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn position(&self) -> Position {
        Position(self.reader.position(), Rc::clone(&self.file))
    }

    fn span_from(&self, start: u32) -> Span {
        Span {
            start: Position(start, Rc::clone(&self.file)),
            end: self.position(),
        }
    }

    fn token_from(&self, kind: TokenKind, start: u32) -> Token {
        Token::spanned(kind, kind.to_string(), self.span_from(start))
    }

    fn scan(&mut self) -> Result<Token, Error> {
        loop {
            let start = self.reader.position();

            let r = match self.reader.next_char() {
                Some(r) => r,
                None => return Ok(self.token_from(TokenKind::Eof, start)),
            };

            match r {
                '\n' => {
                    self.line += 1;
                    continue;
                }
                c if c.is_whitespace() => continue,
                '+' => return Ok(self.token_from(TokenKind::Plus, start)),
                '-' => return Ok(self.token_from(TokenKind::Minus, start)),
                '*' => return Ok(self.token_from(TokenKind::Prod, start)),
                '/' => return Ok(self.token_from(TokenKind::Div, start)),
                '>' => return Ok(self.token_from(TokenKind::Gt, start)),
                '<' => return Ok(self.token_from(TokenKind::Lt, start)),
                '=' => {
                    match self.reader.next_char() {
                        Some('=') => return Ok(self.token_from(TokenKind::Equals, start)),
                        Some('>') => return Ok(self.token_from(TokenKind::Rocket, start)),
                        Some(_) => self.reader.back(),
                        None => {}
                    }
                    return Ok(self.token_from(TokenKind::Assign, start));
                }
                '.' => return Ok(self.token_from(TokenKind::Dot, start)),
                '(' => return Ok(self.token_from(TokenKind::LParen, start)),
                ')' => return Ok(self.token_from(TokenKind::RParen, start)),
                ',' => return Ok(self.token_from(TokenKind::Comma, start)),
                '|' => return Ok(self.token_from(TokenKind::Pipe, start)),
                '"' => return self.scan_double_string(start),
                '0'..='9' => return self.scan_int(r, start),
                'a'..='z' | 'A'..='Z' => return self.scan_name(r, start),
                other => {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedCharacter {
                            character: other.to_string(),
                        },
                        Position(start, Rc::clone(&self.file)),
                    ))
                }
            }
        }
    }

    /// One source construct, three tokens: `dstring_start` is returned
    /// and the content and terminator go into the pending queue. A quote
    /// preceded by a backslash does not terminate the string; no other
    /// escape processing happens here.
    fn scan_double_string(&mut self, start: u32) -> Result<Token, Error> {
        let mut last_seen = None;
        let mut string = String::new();

        loop {
            match self.reader.next_char() {
                Some('"') if last_seen != Some('\\') => {
                    let content = Token::spanned(TokenKind::StringContent, string, self.span_from(start));
                    let terminator = self.token_from(TokenKind::DStringEnd, start);
                    self.pending.push_back(content);
                    self.pending.push_back(terminator);
                    return Ok(self.token_from(TokenKind::DStringStart, start));
                }
                Some(s) => {
                    last_seen = Some(s);
                    string.push(s);
                }
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnterminatedString,
                        Position(start, Rc::clone(&self.file)),
                    ))
                }
            }
        }
    }

    fn scan_int(&mut self, first_digit: char, start: u32) -> Result<Token, Error> {
        let mut int = String::from(first_digit);

        loop {
            match self.reader.next_char() {
                Some(i) if i.is_ascii_digit() => int.push(i),
                Some(_) => {
                    self.reader.back();
                    break;
                }
                None => break,
            }
        }

        Ok(Token::spanned(TokenKind::Int, int, self.span_from(start)))
    }

    fn scan_name(&mut self, first_char: char, start: u32) -> Result<Token, Error> {
        let mut name = String::from(first_char);

        loop {
            match self.reader.next_char() {
                Some(c) if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
                Some(_) => {
                    self.reader.back();
                    break;
                }
                None => break,
            }
        }

        let span = self.span_from(start);

        if let Some(kind) = RESERVED_LOOKUP.get(name.as_str()) {
            Ok(Token::spanned(*kind, name, span))
        } else if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            Ok(Token::spanned(TokenKind::Const, name, span))
        } else {
            Ok(Token::spanned(TokenKind::Name, name, span))
        }
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, Error> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }
        self.scan()
    }

    fn peek(&mut self) -> Result<&Token, Error> {
        if self.pending.is_empty() {
            let token = self.scan()?;
            self.pending.push_front(token);
        }
        // Just ensured the queue is non-empty
        Ok(self.pending.front().unwrap())
    }
}
