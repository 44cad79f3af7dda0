use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::command::parser::parse_expression;
use crate::command::types::{
    StreamExpression, StreamExpressionNamedParameter, StreamExpressionParameter,
};
use crate::engine::core::metrics::{
    AvgMetric, BoxedMetric, CountMetric, MaxMetric, Metric, MinMetric, SumMetric,
};
use crate::engine::core::rollup::HashRollupStream;
use crate::engine::core::stream::{BoxedStream, ListStream, TupleStream};
use crate::engine::errors::StreamError;

use super::equalitor::StreamEqualitor;

pub type StreamConstructor =
    Arc<dyn Fn(&StreamExpression, &StreamFactory) -> Result<BoxedStream, StreamError> + Send + Sync>;

pub type MetricConstructor =
    Arc<dyn Fn(&StreamExpression, &StreamFactory) -> Result<BoxedMetric, StreamError> + Send + Sync>;

#[derive(Clone)]
enum FunctionKind {
    Stream(StreamConstructor),
    Metric(MetricConstructor),
}

#[derive(Clone)]
struct FunctionEntry {
    kind: FunctionKind,
    implementing_type: &'static str,
}

/// Registry of expression function names and the constructors behind them.
///
/// Constructors are bound here once, so building an operator resolves every
/// operand to a concrete stream or metric before any tuple is read.
#[derive(Clone, Default)]
pub struct StreamFactory {
    functions: IndexMap<String, FunctionEntry>,
    rollup_group_limit: Option<usize>,
}

impl StreamFactory {
    /// An empty factory with no registered functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the built-in sources, decorators and metrics.
    pub fn with_builtins(self) -> Self {
        self.with_stream_function("list", ListStream::from_expression)
            .with_stream_function("hashRollup", HashRollupStream::from_expression)
            .with_metric_function("count", |e, _| CountMetric::from_expression(e))
            .with_metric_function("sum", |e, _| SumMetric::from_expression(e))
            .with_metric_function("min", |e, _| MinMetric::from_expression(e))
            .with_metric_function("max", |e, _| MaxMetric::from_expression(e))
            .with_metric_function("avg", |e, _| AvgMetric::from_expression(e))
    }

    pub fn with_stream_function<T, F>(mut self, name: &str, constructor: F) -> Self
    where
        T: TupleStream + 'static,
        F: Fn(&StreamExpression, &StreamFactory) -> Result<T, StreamError> + Send + Sync + 'static,
    {
        let wrapped: StreamConstructor = Arc::new(
            move |expression: &StreamExpression, factory: &StreamFactory| {
                constructor(expression, factory).map(|s| Box::new(s) as BoxedStream)
            },
        );
        self.functions.insert(
            name.to_string(),
            FunctionEntry {
                kind: FunctionKind::Stream(wrapped),
                implementing_type: std::any::type_name::<T>(),
            },
        );
        self
    }

    pub fn with_metric_function<T, F>(mut self, name: &str, constructor: F) -> Self
    where
        T: Metric + 'static,
        F: Fn(&StreamExpression, &StreamFactory) -> Result<T, StreamError> + Send + Sync + 'static,
    {
        let wrapped: MetricConstructor = Arc::new(
            move |expression: &StreamExpression, factory: &StreamFactory| {
                constructor(expression, factory).map(|m| Box::new(m) as BoxedMetric)
            },
        );
        self.functions.insert(
            name.to_string(),
            FunctionEntry {
                kind: FunctionKind::Metric(wrapped),
                implementing_type: std::any::type_name::<T>(),
            },
        );
        self
    }

    /// Caps the number of distinct groups rollups built by this factory may hold.
    pub fn with_rollup_group_limit(mut self, limit: Option<usize>) -> Self {
        self.rollup_group_limit = limit;
        self
    }

    pub fn rollup_group_limit(&self) -> Option<usize> {
        self.rollup_group_limit
    }

    /// First function name registered for the implementing type `T`.
    pub fn function_name_of<T: ?Sized>(&self) -> Result<&str, StreamError> {
        self.function_name_for(std::any::type_name::<T>())
    }

    /// First function name registered for the implementing type named `type_name`.
    pub fn function_name_for(&self, type_name: &str) -> Result<&str, StreamError> {
        self.functions
            .iter()
            .find(|(_, entry)| entry.implementing_type == type_name)
            .map(|(name, _)| name.as_str())
            .ok_or_else(|| StreamError::UnknownFunction(type_name.to_string()))
    }

    pub fn is_stream(&self, expression: &StreamExpression) -> bool {
        matches!(
            self.functions.get(expression.function_name()),
            Some(FunctionEntry {
                kind: FunctionKind::Stream(_),
                ..
            })
        )
    }

    pub fn is_metric(&self, expression: &StreamExpression) -> bool {
        matches!(
            self.functions.get(expression.function_name()),
            Some(FunctionEntry {
                kind: FunctionKind::Metric(_),
                ..
            })
        )
    }

    /// Positional operands naming a registered stream function.
    pub fn stream_operands<'a>(&self, expression: &'a StreamExpression) -> Vec<&'a StreamExpression> {
        self.operands_where(expression, |e| self.is_stream(e))
    }

    /// Positional operands naming a registered metric function.
    pub fn metric_operands<'a>(&self, expression: &'a StreamExpression) -> Vec<&'a StreamExpression> {
        self.operands_where(expression, |e| self.is_metric(e))
    }

    fn operands_where<'a>(
        &self,
        expression: &'a StreamExpression,
        keep: impl Fn(&StreamExpression) -> bool,
    ) -> Vec<&'a StreamExpression> {
        expression
            .parameters()
            .iter()
            .filter_map(|p| match p {
                StreamExpressionParameter::Expression(e) if keep(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// The named operand `name`, only when it appears exactly once.
    pub fn named_operand<'a>(
        &self,
        expression: &'a StreamExpression,
        name: &str,
    ) -> Option<&'a StreamExpressionNamedParameter> {
        let mut named = expression.named_parameters(name);
        match (named.next(), named.next()) {
            (Some(first), None) => Some(first),
            _ => None,
        }
    }

    pub fn construct_stream(&self, expression: &StreamExpression) -> Result<BoxedStream, StreamError> {
        match self.functions.get(expression.function_name()) {
            Some(FunctionEntry {
                kind: FunctionKind::Stream(constructor),
                ..
            }) => {
                debug!(target: "snel_stream::factory", function = expression.function_name(), "constructing stream");
                constructor(expression, self)
            }
            _ => Err(StreamError::UnknownFunction(format!(
                "{} is not a registered stream",
                expression.function_name()
            ))),
        }
    }

    /// Parses expression text and constructs the stream it describes.
    pub fn construct_stream_from_str(&self, text: &str) -> Result<BoxedStream, StreamError> {
        let expression = parse_expression(text)?;
        self.construct_stream(&expression)
    }

    pub fn construct_metric(&self, expression: &StreamExpression) -> Result<BoxedMetric, StreamError> {
        match self.functions.get(expression.function_name()) {
            Some(FunctionEntry {
                kind: FunctionKind::Metric(constructor),
                ..
            }) => constructor(expression, self),
            _ => Err(StreamError::UnknownFunction(format!(
                "{} is not a registered metric",
                expression.function_name()
            ))),
        }
    }

    /// Builds the equalitor written in a named operand such as `over="a,b"`.
    pub fn construct_equalitor(
        &self,
        expression: &StreamExpression,
        text: &str,
    ) -> Result<StreamEqualitor, StreamError> {
        StreamEqualitor::parse(text).map_err(|reason| StreamError::invalid_expression(expression, reason))
    }
}
