use std::fmt;

use super::error::ParseError;

/// Token represents the lexical items of the stream expression language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Word(String),
    StringLiteral(String),
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Equals,     // =
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::StringLiteral(s) => write!(f, "\"{}\"", s),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
            Token::Equals => f.write_str("="),
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LeftParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RightParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Equals);
            }
            '"' => {
                tokens.push(parse_string_literal(&mut chars)?);
            }
            _ => {
                tokens.push(parse_word(&mut chars));
            }
        }
    }

    Ok(tokens)
}

fn parse_string_literal<I>(chars: &mut std::iter::Peekable<I>) -> Result<Token, ParseError>
where
    I: Iterator<Item = char>,
{
    let mut string = String::new();
    chars.next(); // consume opening quote

    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(Token::StringLiteral(string)),
            '\\' => match chars.next() {
                Some('n') => string.push('\n'),
                Some('t') => string.push('\t'),
                Some('r') => string.push('\r'),
                Some(escaped) => string.push(escaped), // \" and \\ included
                None => break,
            },
            _ => string.push(c),
        }
    }

    Err(ParseError::UnterminatedString)
}

fn parse_word<I>(chars: &mut std::iter::Peekable<I>) -> Token
where
    I: Iterator<Item = char>,
{
    let mut word = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() || matches!(c, '(' | ')' | ',' | '=' | '"') {
            break;
        }
        word.push(c);
        chars.next();
    }

    Token::Word(word)
}
