use crate::command::explain::{Explanation, ExpressionType};
use crate::command::factory::StreamFactory;
use crate::command::types::{StreamExpression, StreamExpressionNamedParameter};
use crate::engine::core::metrics::BoxedMetric;
use crate::engine::core::stream::{Expressible, TupleStream};
use crate::engine::errors::StreamError;

use super::bucket::Bucket;
use super::hash_rollup::HashRollupStream;

pub const OVER_PARAMETER: &str = "over";
pub const OVER_DELIMITER: &str = ",";
pub const STREAM_PLACEHOLDER: &str = "<stream>";

impl HashRollupStream {
    /// Builds a rollup from `hashRollup(<stream>, over="a,b", <metric>...)`.
    ///
    /// Exactly one stream operand and one `over` value are required; any
    /// operand that is neither a stream, a metric, nor `over` is rejected.
    /// `over` accepts field names only; `left=right` pairs are rejected.
    pub fn from_expression(
        expression: &StreamExpression,
        factory: &StreamFactory,
    ) -> Result<Self, StreamError> {
        let stream_expressions = factory.stream_operands(expression);
        if stream_expressions.len() != 1 {
            return Err(StreamError::invalid_expression(
                expression,
                format!(
                    "expecting a single stream but found {}",
                    stream_expressions.len()
                ),
            ));
        }

        let over = factory
            .named_operand(expression, OVER_PARAMETER)
            .and_then(|named| named.value())
            .ok_or_else(|| {
                StreamError::invalid_expression(
                    expression,
                    "expecting single 'over' parameter listing fields to rollup by but didn't find one",
                )
            })?;

        let metric_expressions = factory.metric_operands(expression);

        if expression.parameters().len() != stream_expressions.len() + metric_expressions.len() + 1
        {
            return Err(StreamError::invalid_expression(
                expression,
                "unknown operands found",
            ));
        }

        let equalitor = factory.construct_equalitor(expression, over)?;
        let mut buckets = Vec::new();
        for field in equalitor.flatten() {
            if !field.is_single_field() {
                return Err(StreamError::invalid_expression(
                    expression,
                    format!("'over' accepts field names only, found {}", field),
                ));
            }
            buckets.push(Bucket::new(field.left_field()));
        }

        let metrics = metric_expressions
            .iter()
            .map(|m| factory.construct_metric(m))
            .collect::<Result<Vec<BoxedMetric>, _>>()?;

        let upstream = factory.construct_stream(stream_expressions[0])?;

        Ok(Self::new(upstream, buckets, metrics).with_group_limit(factory.rollup_group_limit()))
    }

    fn expression(
        &self,
        factory: &StreamFactory,
        include_streams: bool,
    ) -> Result<StreamExpression, StreamError> {
        let mut expression = StreamExpression::new(factory.function_name_of::<Self>()?);

        if include_streams {
            expression.add_parameter(self.upstream().to_expression(factory)?);
        } else {
            expression.add_parameter(STREAM_PLACEHOLDER);
        }

        let over = self
            .buckets()
            .iter()
            .map(|b| b.field())
            .collect::<Vec<_>>()
            .join(OVER_DELIMITER);
        expression.add_parameter(StreamExpressionNamedParameter::new(OVER_PARAMETER, over));

        for metric in self.metrics() {
            expression.add_parameter(metric.to_expression(factory)?);
        }

        Ok(expression)
    }
}

impl Expressible for HashRollupStream {
    fn to_expression(&self, factory: &StreamFactory) -> Result<StreamExpression, StreamError> {
        self.expression(factory, true)
    }

    fn to_explanation(&self, factory: &StreamFactory) -> Result<Explanation, StreamError> {
        let mut explanation =
            Explanation::new(self.node_id().to_string(), ExpressionType::StreamDecorator)
                .with_children(vec![self.upstream().to_explanation(factory)?])
                .with_function_name(factory.function_name_of::<Self>()?)
                .with_implementing_type(std::any::type_name::<Self>())
                .with_expression(self.expression(factory, false)?.to_string());

        for metric in self.metrics() {
            explanation = explanation.with_helper(metric.to_explanation(factory)?);
        }

        Ok(explanation)
    }
}
