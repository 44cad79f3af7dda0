use std::fmt;

use serde_json::Value;

use crate::command::explain::{Explanation, ExpressionType};
use crate::command::factory::StreamFactory;
use crate::command::types::StreamExpression;
use crate::engine::core::stream::StreamNodeId;
use crate::engine::core::tuple::Tuple;
use crate::engine::errors::StreamError;

/// Accumulator contract used by rollups.
///
/// A configured metric acts as a template: the rollup calls `spawn_fresh`
/// once per group and only ever updates the spawned instances, so the
/// template itself never accumulates state.
pub trait Metric: Send + fmt::Debug {
    /// A new instance with the same configuration and zero state.
    fn spawn_fresh(&self) -> Box<dyn Metric>;

    fn update(&mut self, tuple: &Tuple) -> Result<(), StreamError>;

    fn current_value(&self) -> Result<Value, StreamError>;

    /// Name used in the output identifier.
    fn function_name(&self) -> &str;

    /// Input column, `*` when the metric reads whole tuples.
    fn column(&self) -> &str;

    fn node_id(&self) -> StreamNodeId;

    /// Output field name, e.g. `sum(price)`.
    fn identifier(&self) -> String {
        format!("{}({})", self.function_name(), self.column())
    }

    fn implementing_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Written under the name the factory registered this type as.
    fn to_expression(&self, factory: &StreamFactory) -> Result<StreamExpression, StreamError> {
        let name = factory.function_name_for(self.implementing_type())?;
        Ok(StreamExpression::new(name).with_parameter(self.column()))
    }

    fn to_explanation(&self, factory: &StreamFactory) -> Result<Explanation, StreamError> {
        let expression = self.to_expression(factory)?;
        Ok(
            Explanation::new(self.node_id().to_string(), ExpressionType::Metric)
                .with_function_name(expression.function_name())
                .with_implementing_type(self.implementing_type())
                .with_expression(expression.to_string()),
        )
    }
}

pub type BoxedMetric = Box<dyn Metric>;
