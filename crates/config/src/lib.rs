mod args;
mod error;
mod log;
mod metrics;
mod poll;

pub use args::Args;
pub use error::ConfigError;
pub use log::LogConfig;
pub use metrics::{MetricsConfig, MetricsError};
pub use poll::PollConfig;

/// Runtime configuration for the balance observer.
///
/// Every section is read from its own `BO_<SECTION>_` prefix, e.g.
/// `BO_LOG_LEVEL`, `BO_POLL_TOKEN_INTERVAL_MS`, `BO_METRICS_ENABLED`.
#[derive(Debug, Clone, Default)]
pub struct ObserverConfig {
    pub log: LogConfig,
    pub poll: PollConfig,
    pub metrics: MetricsConfig,
}

impl ObserverConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            log: envy::prefixed("BO_LOG_").from_env::<LogConfig>()?,
            poll: envy::prefixed("BO_POLL_").from_env::<PollConfig>()?,
            metrics: envy::prefixed("BO_METRICS_").from_env::<MetricsConfig>()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the env file named by `args` (if it exists) and then reads the
    /// environment. Variables already set in the process take precedence.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let path = std::path::Path::new(&args.env_file);
        if path.exists() {
            dotenv::from_path(path).map_err(|source| ConfigError::EnvFileError {
                path: args.env_file.clone(),
                source,
            })?;
        }
        Self::from_env()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.log.validate()?;
        self.poll.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}
