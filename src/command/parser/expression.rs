use crate::command::types::{
    StreamExpression, StreamExpressionNamedParameter, StreamExpressionParameter,
};

use super::error::ParseError;
use super::tokenizer::{Token, tokenize};

/// Parses expression text such as `hashRollup(list(), over="a,b", sum(x))`.
pub fn parse_expression(input: &str) -> Result<StreamExpression, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut parser = ExpressionParser { tokens: &tokens, pos: 0 };
    let expression = parser.expression()?;

    match parser.peek() {
        None => Ok(expression),
        Some(tok) => Err(ParseError::UnexpectedToken(tok.to_string())),
    }
}

struct ExpressionParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> ExpressionParser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn next(&mut self, expected: &str) -> Result<&'a Token, ParseError> {
        let tok = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| ParseError::UnexpectedEnd(expected.to_string()))?;
        self.pos += 1;
        Ok(tok)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        let tok = self.next(&expected.to_string())?;
        if *tok == expected {
            Ok(())
        } else {
            Err(ParseError::ExpectedToken(
                expected.to_string(),
                tok.to_string(),
            ))
        }
    }

    fn expression(&mut self) -> Result<StreamExpression, ParseError> {
        let name = match self.next("function name")? {
            Token::Word(w) => w.clone(),
            other => {
                return Err(ParseError::ExpectedToken(
                    "function name".to_string(),
                    other.to_string(),
                ));
            }
        };
        self.expect(Token::LeftParen)?;

        let mut expression = StreamExpression::new(name);
        if self.peek() == Some(&Token::RightParen) {
            self.pos += 1;
            return Ok(expression);
        }

        loop {
            let parameter = self.parameter()?;
            expression.add_parameter(parameter);

            match self.next("',' or ')'")? {
                Token::Comma => continue,
                Token::RightParen => return Ok(expression),
                other => {
                    return Err(ParseError::ExpectedToken(
                        "',' or ')'".to_string(),
                        other.to_string(),
                    ));
                }
            }
        }
    }

    fn parameter(&mut self) -> Result<StreamExpressionParameter, ParseError> {
        match (self.peek(), self.peek_at(1)) {
            (Some(Token::Word(_)), Some(Token::LeftParen)) => {
                Ok(StreamExpressionParameter::Expression(self.expression()?))
            }
            (Some(Token::Word(name)), Some(Token::Equals)) => {
                self.pos += 2;
                let value = self.value_or_expression()?;
                Ok(StreamExpressionNamedParameter::new(name.clone(), value).into())
            }
            _ => self.value_or_expression(),
        }
    }

    fn value_or_expression(&mut self) -> Result<StreamExpressionParameter, ParseError> {
        if let (Some(Token::Word(_)), Some(Token::LeftParen)) = (self.peek(), self.peek_at(1)) {
            return Ok(StreamExpressionParameter::Expression(self.expression()?));
        }
        match self.next("a value")? {
            Token::Word(w) => Ok(StreamExpressionParameter::Value(w.clone())),
            Token::StringLiteral(s) => Ok(StreamExpressionParameter::Value(s.clone())),
            other => Err(ParseError::UnexpectedToken(other.to_string())),
        }
    }
}
