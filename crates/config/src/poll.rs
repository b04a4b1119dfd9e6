use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Timing and fan-out settings for poll-based balance feeds.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Interval between contract token balance reads (PSP22, GRC20, VFT, ERC20)
    ///
    /// Env: BO_POLL_TOKEN_INTERVAL_MS
    /// Default: 30000
    #[serde(default = "default_token_interval_ms")]
    pub token_interval_ms: u64,

    /// Interval between EVM native balance reads
    ///
    /// Env: BO_POLL_EVM_NATIVE_INTERVAL_MS
    /// Default: 30000
    #[serde(default = "default_evm_native_interval_ms")]
    pub evm_native_interval_ms: u64,

    /// Upper bound on concurrent per-address calls inside one tick
    ///
    /// Env: BO_POLL_MAX_CONCURRENT_CALLS
    /// Default: 8
    #[serde(default = "default_max_concurrent_calls")]
    pub max_concurrent_calls: usize,
}

fn default_token_interval_ms() -> u64 {
    30_000
}

fn default_evm_native_interval_ms() -> u64 {
    30_000
}

fn default_max_concurrent_calls() -> usize {
    8
}

impl PollConfig {
    pub fn token_interval(&self) -> Duration {
        Duration::from_millis(self.token_interval_ms)
    }

    pub fn evm_native_interval(&self) -> Duration {
        Duration::from_millis(self.evm_native_interval_ms)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.token_interval_ms == 0 {
            return Err(ConfigError::ValidateError(
                "BO_POLL_TOKEN_INTERVAL_MS must be greater than 0".to_string(),
            ));
        }
        if self.evm_native_interval_ms == 0 {
            return Err(ConfigError::ValidateError(
                "BO_POLL_EVM_NATIVE_INTERVAL_MS must be greater than 0".to_string(),
            ));
        }
        if self.max_concurrent_calls == 0 {
            return Err(ConfigError::ValidateError(
                "BO_POLL_MAX_CONCURRENT_CALLS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            token_interval_ms: default_token_interval_ms(),
            evm_native_interval_ms: default_evm_native_interval_ms(),
            max_concurrent_calls: default_max_concurrent_calls(),
        }
    }
}
