mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{LoggingConfig, RollupConfig, Settings, load_settings};
