mod metric;
mod numeric;
pub mod ops;

pub use metric::{BoxedMetric, Metric};
pub use ops::{AvgMetric, CountMetric, MaxMetric, MinMetric, SumMetric};
