pub use super::factories::{ScriptedStreamFactory, TupleFactory};

pub struct Factory;

impl Factory {
    pub fn tuple() -> TupleFactory {
        TupleFactory::new()
    }

    pub fn scripted_stream() -> ScriptedStreamFactory {
        ScriptedStreamFactory::new()
    }
}
