mod context;
mod list_stream;
mod operator;
mod sort;

pub use context::{StreamContext, StreamNodeId};
pub use list_stream::{ListStream, TUPLE_FUNCTION};
pub use operator::{BoxedStream, Expressible, TupleStream};
pub use sort::{SortDirection, StreamComparator};
