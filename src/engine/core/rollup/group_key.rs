use serde_json::{Number, Value};

use crate::engine::core::tuple::Tuple;

use super::bucket::Bucket;

/// Hashable form of one tuple value. Null equals null; integers, floats and
/// strings never compare equal to each other.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum GroupValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    // f64 bits, with -0.0 folded into 0.0
    Float(u64),
    Str(String),
    // canonical JSON text of an array or object
    Nested(String),
}

impl GroupValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => GroupValue::Null,
            Value::Bool(b) => GroupValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    GroupValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    GroupValue::UInt(u)
                } else {
                    let f = n.as_f64().unwrap_or(0.0);
                    let f = if f == 0.0 { 0.0 } else { f };
                    GroupValue::Float(f.to_bits())
                }
            }
            Value::String(s) => GroupValue::Str(s.clone()),
            nested => GroupValue::Nested(nested.to_string()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            GroupValue::Null => Value::Null,
            GroupValue::Bool(b) => Value::Bool(*b),
            GroupValue::Int(i) => Value::Number(Number::from(*i)),
            GroupValue::UInt(u) => Value::Number(Number::from(*u)),
            GroupValue::Float(bits) => Number::from_f64(f64::from_bits(*bits))
                .map(Value::Number)
                .unwrap_or(Value::Null),
            GroupValue::Str(s) => Value::String(s.clone()),
            GroupValue::Nested(text) => serde_json::from_str(text).unwrap_or(Value::Null),
        }
    }
}

/// Bucket values of one tuple, in bucket declaration order.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GroupKey {
    parts: Vec<GroupValue>,
}

impl GroupKey {
    pub fn new(parts: Vec<GroupValue>) -> Self {
        Self { parts }
    }

    pub fn from_tuple(buckets: &[Bucket], tuple: &Tuple) -> Self {
        Self {
            parts: buckets.iter().map(|b| b.bucket_value(tuple)).collect(),
        }
    }

    pub fn parts(&self) -> &[GroupValue] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
