mod explanation;

pub use explanation::{Explanation, ExpressionType};
