pub mod metrics;
pub mod tracing;

pub use metrics::EvalMetrics;
pub use tracing::init_tracing;
