pub mod explain;
pub mod factory;
pub mod parser;
pub mod types;

pub use factory::StreamFactory;
pub use types::StreamExpression;
