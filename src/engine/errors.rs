use thiserror::Error;
use tracing::{debug, error};

use crate::command::parser::ParseError;
use crate::command::types::StreamExpression;

/// Errors raised while building or driving a tuple stream.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Invalid expression {expression} - {reason}")]
    InvalidExpression { expression: String, reason: String },

    #[error("Expression parse failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Upstream read failed: {0}")]
    Upstream(String),

    #[error("Metric {identifier} failed: {reason}")]
    Metric { identifier: String, reason: String },

    #[error("Stream {0} is not open")]
    NotOpen(String),

    #[error("Stream {0} was aborted by an earlier failure; close and reopen it")]
    Aborted(String),

    #[error("Rollup exceeded the limit of {limit} distinct groups")]
    GroupLimitExceeded { limit: usize },
}

impl StreamError {
    pub fn invalid_expression<S: Into<String>>(expression: &StreamExpression, reason: S) -> Self {
        StreamError::InvalidExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    pub fn metric<S: Into<String>>(identifier: &str, reason: S) -> Self {
        StreamError::Metric {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    pub fn log_error(&self) {
        match self {
            StreamError::InvalidExpression { expression, reason } => {
                error!("Invalid expression: {}", reason);
                debug!("Offending expression: {}", expression);
            }
            StreamError::Parse(e) => {
                error!("Expression parse failed: {}", e);
                debug!("Parse error details: {:?}", e);
            }
            StreamError::UnknownFunction(name) => {
                error!("Unknown function: {}", name);
            }
            StreamError::Upstream(e) => {
                error!("Upstream read failed: {}", e);
            }
            StreamError::Metric { identifier, reason } => {
                error!("Metric {} failed: {}", identifier, reason);
            }
            StreamError::NotOpen(stream) => {
                error!("Stream {} used while not open", stream);
            }
            StreamError::Aborted(stream) => {
                error!("Stream {} read after abort", stream);
                debug!("Close and reopen the stream to retry");
            }
            StreamError::GroupLimitExceeded { limit } => {
                error!("Rollup exceeded group limit {}", limit);
            }
        }
    }
}
