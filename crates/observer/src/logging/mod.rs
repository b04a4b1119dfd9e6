pub mod logger;

pub use logger::{LoggingConfig, LoggingError, LoggingGuard, init_with_config};
