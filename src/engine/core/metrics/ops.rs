use std::cmp::Ordering;

use serde_json::{Value, json};

use crate::command::types::{StreamExpression, StreamExpressionParameter};
use crate::engine::core::stream::StreamNodeId;
use crate::engine::core::tuple::Tuple;
use crate::engine::errors::StreamError;

use super::metric::Metric;
use super::numeric::{Numeric, float_to_json, numeric_field};

pub const COUNT_ALL: &str = "*";

/// The single column operand of `fn(column)`.
fn single_column(expression: &StreamExpression, allow_star: bool) -> Result<String, StreamError> {
    match expression.parameters() {
        [StreamExpressionParameter::Value(column)] => {
            if column == COUNT_ALL && !allow_star {
                return Err(StreamError::invalid_expression(
                    expression,
                    format!("{} requires a field name", expression.function_name()),
                ));
            }
            Ok(column.clone())
        }
        params => Err(StreamError::invalid_expression(
            expression,
            format!("expecting a single column operand but found {}", params.len()),
        )),
    }
}

/// `count(*)` counts tuples; `count(field)` counts non-null values of a field.
#[derive(Debug, Clone)]
pub struct CountMetric {
    column: String,
    count: i64,
    node_id: StreamNodeId,
}

impl CountMetric {
    pub fn new<S: Into<String>>(column: S) -> Self {
        Self {
            column: column.into(),
            count: 0,
            node_id: StreamNodeId::random(),
        }
    }

    pub fn all() -> Self {
        Self::new(COUNT_ALL)
    }

    pub fn from_expression(expression: &StreamExpression) -> Result<Self, StreamError> {
        Ok(Self::new(single_column(expression, true)?))
    }
}

impl Metric for CountMetric {
    fn spawn_fresh(&self) -> Box<dyn Metric> {
        Box::new(Self::new(self.column.clone()))
    }

    fn update(&mut self, tuple: &Tuple) -> Result<(), StreamError> {
        if self.column == COUNT_ALL || !tuple.get_or_null(&self.column).is_null() {
            self.count += 1;
        }
        Ok(())
    }

    fn current_value(&self) -> Result<Value, StreamError> {
        Ok(json!(self.count))
    }

    fn function_name(&self) -> &str {
        "count"
    }

    fn column(&self) -> &str {
        &self.column
    }

    fn node_id(&self) -> StreamNodeId {
        self.node_id
    }
}

/// Integer sum while every input is an integer, float sum otherwise.
/// Nulls are skipped.
#[derive(Debug, Clone)]
pub struct SumMetric {
    column: String,
    int_sum: i64,
    float_sum: f64,
    has_float: bool,
    node_id: StreamNodeId,
}

impl SumMetric {
    pub fn new<S: Into<String>>(column: S) -> Self {
        Self {
            column: column.into(),
            int_sum: 0,
            float_sum: 0.0,
            has_float: false,
            node_id: StreamNodeId::random(),
        }
    }

    pub fn from_expression(expression: &StreamExpression) -> Result<Self, StreamError> {
        Ok(Self::new(single_column(expression, false)?))
    }

    fn add(&mut self, value: Numeric) {
        match value {
            Numeric::Int(i) if !self.has_float => match self.int_sum.checked_add(i) {
                Some(sum) => self.int_sum = sum,
                None => {
                    self.has_float = true;
                    self.float_sum = self.int_sum as f64 + i as f64;
                }
            },
            other => {
                if !self.has_float {
                    self.has_float = true;
                    self.float_sum = self.int_sum as f64;
                }
                self.float_sum += other.as_f64();
            }
        }
    }
}

impl Metric for SumMetric {
    fn spawn_fresh(&self) -> Box<dyn Metric> {
        Box::new(Self::new(self.column.clone()))
    }

    fn update(&mut self, tuple: &Tuple) -> Result<(), StreamError> {
        if let Some(value) = numeric_field(tuple, &self.column, &self.identifier())? {
            self.add(value);
        }
        Ok(())
    }

    fn current_value(&self) -> Result<Value, StreamError> {
        if self.has_float {
            Ok(float_to_json(self.float_sum))
        } else {
            Ok(json!(self.int_sum))
        }
    }

    fn function_name(&self) -> &str {
        "sum"
    }

    fn column(&self) -> &str {
        &self.column
    }

    fn node_id(&self) -> StreamNodeId {
        self.node_id
    }
}

/// Keeps whichever numeric value wins `keep` against the current one.
#[derive(Debug, Clone)]
struct Extremum {
    column: String,
    current: Option<Numeric>,
    node_id: StreamNodeId,
}

impl Extremum {
    fn new(column: String) -> Self {
        Self {
            column,
            current: None,
            node_id: StreamNodeId::random(),
        }
    }

    fn update(
        &mut self,
        tuple: &Tuple,
        identifier: &str,
        keep: Ordering,
    ) -> Result<(), StreamError> {
        if let Some(value) = numeric_field(tuple, &self.column, identifier)? {
            match self.current {
                Some(current) if value.compare(&current) != keep => {}
                _ => self.current = Some(value),
            }
        }
        Ok(())
    }

    fn value(&self) -> Value {
        self.current.map(|n| n.to_json()).unwrap_or(Value::Null)
    }
}

/// Smallest numeric value; null when every input was null.
#[derive(Debug, Clone)]
pub struct MinMetric(Extremum);

impl MinMetric {
    pub fn new<S: Into<String>>(column: S) -> Self {
        Self(Extremum::new(column.into()))
    }

    pub fn from_expression(expression: &StreamExpression) -> Result<Self, StreamError> {
        Ok(Self::new(single_column(expression, false)?))
    }
}

impl Metric for MinMetric {
    fn spawn_fresh(&self) -> Box<dyn Metric> {
        Box::new(Self::new(self.0.column.clone()))
    }

    fn update(&mut self, tuple: &Tuple) -> Result<(), StreamError> {
        let identifier = self.identifier();
        self.0.update(tuple, &identifier, Ordering::Less)
    }

    fn current_value(&self) -> Result<Value, StreamError> {
        Ok(self.0.value())
    }

    fn function_name(&self) -> &str {
        "min"
    }

    fn column(&self) -> &str {
        &self.0.column
    }

    fn node_id(&self) -> StreamNodeId {
        self.0.node_id
    }
}

/// Largest numeric value; null when every input was null.
#[derive(Debug, Clone)]
pub struct MaxMetric(Extremum);

impl MaxMetric {
    pub fn new<S: Into<String>>(column: S) -> Self {
        Self(Extremum::new(column.into()))
    }

    pub fn from_expression(expression: &StreamExpression) -> Result<Self, StreamError> {
        Ok(Self::new(single_column(expression, false)?))
    }
}

impl Metric for MaxMetric {
    fn spawn_fresh(&self) -> Box<dyn Metric> {
        Box::new(Self::new(self.0.column.clone()))
    }

    fn update(&mut self, tuple: &Tuple) -> Result<(), StreamError> {
        let identifier = self.identifier();
        self.0.update(tuple, &identifier, Ordering::Greater)
    }

    fn current_value(&self) -> Result<Value, StreamError> {
        Ok(self.0.value())
    }

    fn function_name(&self) -> &str {
        "max"
    }

    fn column(&self) -> &str {
        &self.0.column
    }

    fn node_id(&self) -> StreamNodeId {
        self.0.node_id
    }
}

/// Float mean of the non-null inputs.
#[derive(Debug, Clone)]
pub struct AvgMetric {
    column: String,
    sum: f64,
    count: u64,
    node_id: StreamNodeId,
}

impl AvgMetric {
    pub fn new<S: Into<String>>(column: S) -> Self {
        Self {
            column: column.into(),
            sum: 0.0,
            count: 0,
            node_id: StreamNodeId::random(),
        }
    }

    pub fn from_expression(expression: &StreamExpression) -> Result<Self, StreamError> {
        Ok(Self::new(single_column(expression, false)?))
    }
}

impl Metric for AvgMetric {
    fn spawn_fresh(&self) -> Box<dyn Metric> {
        Box::new(Self::new(self.column.clone()))
    }

    fn update(&mut self, tuple: &Tuple) -> Result<(), StreamError> {
        if let Some(value) = numeric_field(tuple, &self.column, &self.identifier())? {
            self.sum += value.as_f64();
            self.count += 1;
        }
        Ok(())
    }

    fn current_value(&self) -> Result<Value, StreamError> {
        if self.count == 0 {
            return Ok(Value::Null);
        }
        Ok(float_to_json(self.sum / self.count as f64))
    }

    fn function_name(&self) -> &str {
        "avg"
    }

    fn column(&self) -> &str {
        &self.column
    }

    fn node_id(&self) -> StreamNodeId {
        self.node_id
    }
}
