pub mod scripted_stream_factory;
pub mod tuple_factory;

pub use scripted_stream_factory::{ScriptedStream, ScriptedStreamFactory, StreamProbe};
pub use tuple_factory::TupleFactory;
