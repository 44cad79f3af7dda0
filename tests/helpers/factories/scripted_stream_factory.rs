use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::command::explain::{Explanation, ExpressionType};
use crate::command::factory::StreamFactory;
use crate::command::types::StreamExpression;
use crate::engine::core::stream::{
    Expressible, StreamComparator, StreamContext, StreamNodeId, TupleStream,
};
use crate::engine::core::tuple::Tuple;
use crate::engine::errors::StreamError;

/// Shared counters observing a `ScriptedStream` after it has been boxed away.
#[derive(Clone, Default)]
pub struct StreamProbe {
    opens: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
    reads: Arc<AtomicUsize>,
    context: Arc<Mutex<Option<StreamContext>>>,
}

impl StreamProbe {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn context(&self) -> Option<StreamContext> {
        self.context.lock().unwrap().clone()
    }
}

enum Step {
    Emit(Tuple),
    Fail(String),
}

/// Upstream test double: emits scripted tuples, optionally fails, then EOF.
pub struct ScriptedStream {
    steps: Vec<Step>,
    position: usize,
    sort: Option<StreamComparator>,
    opens_allowed: Option<usize>,
    probe: StreamProbe,
    node_id: StreamNodeId,
}

impl TupleStream for ScriptedStream {
    fn open(&mut self) -> Result<(), StreamError> {
        let opened = self.probe.opens.fetch_add(1, Ordering::SeqCst);
        if self.opens_allowed.is_some_and(|allowed| opened >= allowed) {
            return Err(StreamError::Upstream("open refused".to_string()));
        }
        self.position = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<Tuple, StreamError> {
        self.probe.reads.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.get(self.position);
        self.position += 1;
        match step {
            Some(Step::Emit(tuple)) => Ok(tuple.clone()),
            Some(Step::Fail(message)) => Err(StreamError::Upstream(message.clone())),
            None => Ok(Tuple::eof()),
        }
    }

    fn close(&mut self) -> Result<(), StreamError> {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn children(&self) -> Vec<&dyn TupleStream> {
        Vec::new()
    }

    fn stream_sort(&self) -> Option<StreamComparator> {
        self.sort.clone()
    }

    fn set_stream_context(&mut self, context: &StreamContext) {
        *self.probe.context.lock().unwrap() = Some(context.clone());
    }

    fn node_id(&self) -> StreamNodeId {
        self.node_id
    }
}

impl Expressible for ScriptedStream {
    fn to_expression(&self, _factory: &StreamFactory) -> Result<StreamExpression, StreamError> {
        Ok(StreamExpression::new("scripted"))
    }

    fn to_explanation(&self, _factory: &StreamFactory) -> Result<Explanation, StreamError> {
        Ok(
            Explanation::new(self.node_id.to_string(), ExpressionType::StreamSource)
                .with_function_name("scripted")
                .with_implementing_type("ScriptedStream")
                .with_expression("scripted()"),
        )
    }
}

pub struct ScriptedStreamFactory {
    steps: Vec<Step>,
    sort: Option<StreamComparator>,
    opens_allowed: Option<usize>,
}

impl ScriptedStreamFactory {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            sort: None,
            opens_allowed: None,
        }
    }

    pub fn with_tuples(mut self, tuples: Vec<Tuple>) -> Self {
        self.steps.extend(tuples.into_iter().map(Step::Emit));
        self
    }

    pub fn then_fail(mut self, message: &str) -> Self {
        self.steps.push(Step::Fail(message.to_string()));
        self
    }

    pub fn with_sort(mut self, sort: StreamComparator) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Opens after the first `count` fail with an upstream error.
    pub fn failing_open_after(mut self, count: usize) -> Self {
        self.opens_allowed = Some(count);
        self
    }

    pub fn create(self) -> (ScriptedStream, StreamProbe) {
        let probe = StreamProbe::default();
        let stream = ScriptedStream {
            steps: self.steps,
            position: 0,
            sort: self.sort,
            opens_allowed: self.opens_allowed,
            probe: probe.clone(),
            node_id: StreamNodeId::random(),
        };
        (stream, probe)
    }
}
