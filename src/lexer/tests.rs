//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, names and constants
//! - Integer literals
//! - Operators and punctuation
//! - Double-quoted strings and their three-token fan-out
//! - Lookahead and error cases

use crate::errors::errors::Error;

use super::lexer::Lexer;
use super::reader::Reader;
use super::tokens::{Token, TokenKind, TokenSource};

fn lexer(source: &str) -> Lexer {
    Lexer::new(Reader::new(source), None)
}

fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    lexer(source).all()
}

#[test]
fn test_reader_pushback() {
    let mut reader = Reader::new("ab");

    assert_eq!(reader.next_char(), Some('a'));
    assert_eq!(reader.next_char(), Some('b'));
    reader.back();
    assert_eq!(reader.next_char(), Some('b'));
    assert_eq!(reader.next_char(), None);
}

#[test]
fn test_tokenize_keywords() {
    let source = "and begin break case class def do else elsif end ensure false \
                  if module next nil not or rescue return self super true unless \
                  until when while yield";
    let tokens = tokenize(source).unwrap();

    let expected = [
        TokenKind::And,
        TokenKind::Begin,
        TokenKind::Break,
        TokenKind::Case,
        TokenKind::Class,
        TokenKind::Def,
        TokenKind::Do,
        TokenKind::Else,
        TokenKind::Elsif,
        TokenKind::End,
        TokenKind::Ensure,
        TokenKind::False,
        TokenKind::If,
        TokenKind::Module,
        TokenKind::Next,
        TokenKind::Nil,
        TokenKind::Not,
        TokenKind::Or,
        TokenKind::Rescue,
        TokenKind::Return,
        TokenKind::SelfKw,
        TokenKind::Super,
        TokenKind::True,
        TokenKind::Unless,
        TokenKind::Until,
        TokenKind::When,
        TokenKind::While,
        TokenKind::Yield,
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, kind) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
    }
}

#[test]
fn test_tokenize_names_and_consts() {
    let tokens = tokenize("foo Bar baz_123 x9 CONST").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[0].text, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Const);
    assert_eq!(tokens[1].text, "Bar");
    assert_eq!(tokens[2].kind, TokenKind::Name);
    assert_eq!(tokens[2].text, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Name);
    assert_eq!(tokens[3].text, "x9");
    assert_eq!(tokens[4].kind, TokenKind::Const);
    assert_eq!(tokens[4].text, "CONST");
}

#[test]
fn test_tokenize_ints() {
    let tokens = tokenize("42 0 873").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].text, "42");
    assert_eq!(tokens[1].kind, TokenKind::Int);
    assert_eq!(tokens[1].text, "0");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[2].text, "873");
}

#[test]
fn test_int_backs_off_at_non_digit() {
    let tokens = tokenize("12abc").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].text, "12");
    assert_eq!(tokens[1].kind, TokenKind::Name);
    assert_eq!(tokens[1].text, "abc");
}

#[test]
fn test_tokenize_punctuation() {
    let tokens = tokenize("+ - * / > < = == => . ( ) , |").unwrap();

    let expected = [
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Prod,
        TokenKind::Div,
        TokenKind::Gt,
        TokenKind::Lt,
        TokenKind::Assign,
        TokenKind::Equals,
        TokenKind::Rocket,
        TokenKind::Dot,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Comma,
        TokenKind::Pipe,
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, kind) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
    }
}

#[test]
fn test_equals_lookahead() {
    let tokens = tokenize("a=b a==b a=>b").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Assign);
    assert_eq!(tokens[4].kind, TokenKind::Equals);
    assert_eq!(tokens[7].kind, TokenKind::Rocket);
}

#[test]
fn test_assign_at_end_of_input() {
    let tokens = tokenize("x =").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Assign);
}

#[test]
fn test_string_fans_out_into_three_tokens() {
    let mut lexer = lexer(r#""hello""#);

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::DStringStart);

    let content = lexer.next_token().unwrap();
    assert_eq!(content.kind, TokenKind::StringContent);
    assert_eq!(content.text, "hello");

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::DStringEnd);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_empty_string() {
    let tokens = tokenize(r#""""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::DStringStart);
    assert_eq!(tokens[1].kind, TokenKind::StringContent);
    assert_eq!(tokens[1].text, "");
    assert_eq!(tokens[2].kind, TokenKind::DStringEnd);
}

#[test]
fn test_escaped_quote_does_not_terminate_string() {
    // The backslash stays in the content; nothing is unescaped
    let tokens = tokenize(r#""goodbye\" world""#).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::StringContent);
    assert_eq!(tokens[1].text, r#"goodbye\" world"#);
    assert_eq!(tokens[2].kind, TokenKind::DStringEnd);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_unterminated_string() {
    let result = tokenize(r#""abc"#);

    assert!(result.is_err());
    assert_eq!(result.err().unwrap().get_error_name(), "LexError");
}

#[test]
fn test_unexpected_character() {
    let result = tokenize("a @ b");

    assert!(result.is_err());
    assert_eq!(result.err().unwrap().get_error_name(), "LexError");
}

#[test]
fn test_peek_is_cached_and_not_consuming() {
    let mut lexer = lexer("a b");

    assert_eq!(lexer.peek().unwrap().text, "a");
    assert_eq!(lexer.peek().unwrap().text, "a");
    assert_eq!(lexer.next_token().unwrap().text, "a");
    assert_eq!(lexer.next_token().unwrap().text, "b");
}

#[test]
fn test_peek_string_start() {
    let mut lexer = lexer(r#""hi""#);

    assert_eq!(lexer.peek().unwrap().kind, TokenKind::DStringStart);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::DStringStart);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::StringContent);
}

#[test]
fn test_is_empty() {
    let mut blank = lexer("   ");
    assert!(blank.is_empty().unwrap());

    let mut nonblank = lexer("1");
    assert!(!nonblank.is_empty().unwrap());
}

#[test]
fn test_eof_repeats() {
    let mut lexer = lexer("");

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_line_counting() {
    let mut lexer = lexer("a\nb\n\nc");
    lexer.all().unwrap();

    assert_eq!(lexer.line(), 4);
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("ab + cd").unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 3);
    assert_eq!(tokens[2].span.start.0, 5);
}

#[test]
fn test_token_text_defaults_to_kind() {
    let token = Token::new(TokenKind::Plus);
    assert_eq!(token.text, "plus");

    let token = Token::new(TokenKind::DStringStart);
    assert_eq!(token.text, "dstring_start");
}

#[test]
fn test_token_queue_source() {
    let mut queue = super::tokens::TokenQueue::new(vec![
        Token::with_text(TokenKind::Name, "a"),
        Token::new(TokenKind::Plus),
    ]);

    assert_eq!(queue.peek().unwrap().text, "a");
    assert_eq!(queue.next_token().unwrap().text, "a");
    assert_eq!(queue.next_token().unwrap().kind, TokenKind::Plus);
    assert_eq!(queue.next_token().unwrap().kind, TokenKind::Eof);
    assert!(queue.is_empty().unwrap());
}
