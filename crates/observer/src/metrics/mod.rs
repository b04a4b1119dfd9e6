pub mod registry;

pub use registry::{gather_metrics, init};
