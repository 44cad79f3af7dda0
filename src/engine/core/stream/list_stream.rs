use serde_json::Value;
use tracing::debug;

use crate::command::explain::{Explanation, ExpressionType};
use crate::command::factory::StreamFactory;
use crate::command::types::{StreamExpression, StreamExpressionParameter};
use crate::engine::core::tuple::Tuple;
use crate::engine::errors::StreamError;

use super::{Expressible, StreamComparator, StreamContext, StreamNodeId, TupleStream};

pub const TUPLE_FUNCTION: &str = "tuple";

/// In-memory source: `list(tuple(a=1,b="x"), tuple(a=2))`.
///
/// Tuple field values are read as JSON literals when they parse as one
/// (`1`, `true`, `null`, `{"k":1}`) and as strings otherwise, so the string
/// `"1"` and the number `1` are written the same way.
pub struct ListStream {
    tuples: Vec<Tuple>,
    position: usize,
    open: bool,
    node_id: StreamNodeId,
}

impl ListStream {
    pub fn new(tuples: Vec<Tuple>) -> Self {
        Self {
            tuples,
            position: 0,
            open: false,
            node_id: StreamNodeId::random(),
        }
    }

    pub fn from_expression(
        expression: &StreamExpression,
        _factory: &StreamFactory,
    ) -> Result<Self, StreamError> {
        let mut tuples = Vec::with_capacity(expression.parameters().len());
        for parameter in expression.parameters() {
            match parameter {
                StreamExpressionParameter::Expression(tuple_expr)
                    if tuple_expr.function_name() == TUPLE_FUNCTION =>
                {
                    tuples.push(tuple_from_expression(expression, tuple_expr)?);
                }
                other => {
                    return Err(StreamError::invalid_expression(
                        expression,
                        format!("expecting tuple(...) operands but found {}", other),
                    ));
                }
            }
        }
        Ok(Self::new(tuples))
    }
}

fn tuple_from_expression(
    list: &StreamExpression,
    expression: &StreamExpression,
) -> Result<Tuple, StreamError> {
    let mut tuple = Tuple::new();
    for parameter in expression.parameters() {
        let StreamExpressionParameter::Named(named) = parameter else {
            return Err(StreamError::invalid_expression(
                list,
                format!("tuple fields must be name=value, found {}", parameter),
            ));
        };
        let Some(raw) = named.value() else {
            return Err(StreamError::invalid_expression(
                list,
                format!("tuple field {} must hold a value", named.name()),
            ));
        };
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        tuple.put(named.name(), value);
    }
    Ok(tuple)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl TupleStream for ListStream {
    fn open(&mut self) -> Result<(), StreamError> {
        self.position = 0;
        self.open = true;
        debug!(target: "snel_stream::list", node = %self.node_id, tuples = self.tuples.len(), "list stream opened");
        Ok(())
    }

    fn read(&mut self) -> Result<Tuple, StreamError> {
        if !self.open {
            return Err(StreamError::NotOpen(format!("list {}", self.node_id)));
        }
        match self.tuples.get(self.position) {
            Some(tuple) => {
                self.position += 1;
                Ok(tuple.clone())
            }
            None => Ok(Tuple::eof()),
        }
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.open = false;
        Ok(())
    }

    fn children(&self) -> Vec<&dyn TupleStream> {
        Vec::new()
    }

    fn stream_sort(&self) -> Option<StreamComparator> {
        None
    }

    fn set_stream_context(&mut self, _context: &StreamContext) {}

    fn node_id(&self) -> StreamNodeId {
        self.node_id
    }
}

impl Expressible for ListStream {
    fn to_expression(&self, factory: &StreamFactory) -> Result<StreamExpression, StreamError> {
        let mut expression = StreamExpression::new(factory.function_name_of::<Self>()?);
        for tuple in &self.tuples {
            let mut tuple_expr = StreamExpression::new(TUPLE_FUNCTION);
            for (name, value) in tuple.fields() {
                tuple_expr = tuple_expr.with_named(name.as_str(), value_text(value));
            }
            expression.add_parameter(tuple_expr);
        }
        Ok(expression)
    }

    fn to_explanation(&self, factory: &StreamFactory) -> Result<Explanation, StreamError> {
        Ok(
            Explanation::new(self.node_id.to_string(), ExpressionType::StreamSource)
                .with_function_name(factory.function_name_of::<Self>()?)
                .with_implementing_type(std::any::type_name::<Self>())
                .with_expression(self.to_expression(factory)?.to_string()),
        )
    }
}
