use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::engine::core::tuple::Tuple;
use crate::engine::errors::StreamError;

/// Numeric input of a metric. Integers stay exact until mixed with floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn as_f64(&self) -> f64 {
        match self {
            Numeric::Int(i) => *i as f64,
            Numeric::Float(f) => *f,
        }
    }

    pub fn compare(&self, other: &Numeric) -> Ordering {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Numeric::Int(i) => Value::Number(Number::from(*i)),
            Numeric::Float(f) => float_to_json(*f),
        }
    }
}

pub fn float_to_json(value: f64) -> Value {
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Reads `column` from the tuple as a number. Null and missing read as `None`;
/// numeric strings are accepted; anything else is a metric error.
pub fn numeric_field(
    tuple: &Tuple,
    column: &str,
    identifier: &str,
) -> Result<Option<Numeric>, StreamError> {
    match tuple.get_or_null(column) {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(Numeric::Int(i))),
            None => n
                .as_f64()
                .map(|f| Some(Numeric::Float(f)))
                .ok_or_else(|| StreamError::metric(identifier, format!("unreadable number {}", n))),
        },
        Value::String(s) => {
            if let Ok(i) = s.trim().parse::<i64>() {
                return Ok(Some(Numeric::Int(i)));
            }
            match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Some(Numeric::Float(f))),
                _ => Err(StreamError::metric(
                    identifier,
                    format!("non-numeric value '{}' in field {}", s, column),
                )),
            }
        }
        other => Err(StreamError::metric(
            identifier,
            format!("non-numeric value {} in field {}", other, column),
        )),
    }
}
