#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input was empty or only whitespace
    EmptyInput,

    /// A quoted string was never closed
    UnterminatedString,

    /// Input ended while more tokens were expected
    UnexpectedEnd(String),

    /// Unexpected token found while parsing
    UnexpectedToken(String),

    /// Expected a specific token but found something else
    ExpectedToken(String, String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "Expression is empty"),
            ParseError::UnterminatedString => write!(f, "Unterminated string literal"),
            ParseError::UnexpectedEnd(expected) => {
                write!(f, "Unexpected end of expression, expected {}", expected)
            }
            ParseError::UnexpectedToken(tok) => write!(f, "Unexpected token: {}", tok),
            ParseError::ExpectedToken(expected, found) => {
                write!(f, "Expected '{}', but found '{}'", expected, found)
            }
        }
    }
}

impl std::error::Error for ParseError {}
