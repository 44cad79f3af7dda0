mod tuple;

pub use tuple::{EOF_FIELD, Tuple};
