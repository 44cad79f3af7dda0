pub mod metrics;
pub mod rollup;
pub mod stream;
pub mod tuple;

pub use rollup::HashRollupStream;
pub use stream::{ListStream, TupleStream};
pub use tuple::Tuple;
