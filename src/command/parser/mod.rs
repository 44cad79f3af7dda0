pub mod error;
pub mod expression;
pub mod tokenizer;

pub use error::ParseError;
pub use expression::parse_expression;

#[cfg(test)]
mod expression_tests;
