use crate::engine::core::tuple::Tuple;
use serde_json::Value;

pub struct TupleFactory {
    params: Vec<(String, Value)>,
}

impl TupleFactory {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    pub fn create(self) -> Tuple {
        Tuple::from_fields(self.params)
    }

    /// One tuple per JSON object, fields in the object's key order.
    pub fn create_list(rows: &[Value]) -> Vec<Tuple> {
        rows.iter()
            .map(|row| {
                let obj = row.as_object().expect("row must be a JSON object");
                Tuple::from_fields(obj.iter().map(|(k, v)| (k.clone(), v.clone())))
            })
            .collect()
    }
}
