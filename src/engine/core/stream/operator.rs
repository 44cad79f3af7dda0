use crate::command::explain::Explanation;
use crate::command::factory::StreamFactory;
use crate::command::types::StreamExpression;
use crate::engine::core::tuple::Tuple;
use crate::engine::errors::StreamError;

use super::{StreamComparator, StreamContext, StreamNodeId};

/// Streams and helpers that can render themselves back into an expression
/// and into a diagnostic explanation tree.
pub trait Expressible {
    fn to_expression(&self, factory: &StreamFactory) -> Result<StreamExpression, StreamError>;

    fn to_explanation(&self, factory: &StreamFactory) -> Result<Explanation, StreamError>;
}

/// Pull-based stream contract.
///
/// A consumer calls `open`, then `read` until it receives the EOF tuple, then
/// `close`. Decorators open and close their children themselves. A single
/// consumer drives an instance; nothing here is meant to be shared across
/// threads while a read is in flight.
pub trait TupleStream: Expressible + Send {
    fn open(&mut self) -> Result<(), StreamError>;

    /// Returns the next tuple. The final tuple of a stream has `is_eof() == true`.
    fn read(&mut self) -> Result<Tuple, StreamError>;

    fn close(&mut self) -> Result<(), StreamError>;

    /// Streams directly owned by this one.
    fn children(&self) -> Vec<&dyn TupleStream>;

    /// Ordering guaranteed by this stream's output, if any.
    fn stream_sort(&self) -> Option<StreamComparator>;

    /// Relative cost hint. Zero means the stream does not stream through and
    /// materializes its result.
    fn cost(&self) -> i32 {
        0
    }

    /// Called before `open`; decorators forward it to their children.
    fn set_stream_context(&mut self, context: &StreamContext);

    fn node_id(&self) -> StreamNodeId;
}

pub type BoxedStream = Box<dyn TupleStream>;
