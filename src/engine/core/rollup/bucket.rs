use std::fmt;

use crate::engine::core::tuple::Tuple;

use super::group_key::GroupValue;

/// Grouping field of a rollup. Two buckets are the same when they name the
/// same field.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Bucket {
    field: String,
}

impl Bucket {
    pub fn new<S: Into<String>>(field: S) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The tuple's value for this field; missing fields group as null.
    pub fn bucket_value(&self, tuple: &Tuple) -> GroupValue {
        GroupValue::from_json(tuple.get_or_null(&self.field))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field)
    }
}
