mod equalitor;
mod stream_factory;

pub use equalitor::{FieldEqualitor, StreamEqualitor};
pub use stream_factory::{MetricConstructor, StreamConstructor, StreamFactory};
