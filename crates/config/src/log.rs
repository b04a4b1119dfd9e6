use crate::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log Level
    ///
    /// Env: BO_LOG_LEVEL
    /// Valid values: trace, debug, info, warn, error
    /// Default: info
    #[serde(default = "default_level")]
    pub level: String,

    /// Output logs in JSON format
    ///
    /// Env: BO_LOG_JSON
    /// Default: false
    #[serde(default)]
    pub json: bool,

    /// Strip ANSI color codes from logs
    ///
    /// Env: BO_LOG_STRIP_ANSI
    /// Default: false
    #[serde(default)]
    pub strip_ansi: bool,

    /// Also write logs to a size-rotated file
    ///
    /// Env: BO_LOG_WRITE
    /// Default: false
    #[serde(default)]
    pub write: bool,

    /// Directory for log files
    ///
    /// Env: BO_LOG_WRITE_PATH
    /// Default: ./logs
    #[serde(default = "default_write_path")]
    pub write_path: String,

    /// Maximum size of a single log file in bytes
    ///
    /// Env: BO_LOG_WRITE_MAX_FILE_SIZE
    /// Default: 5242880
    #[serde(default = "default_write_max_file_size")]
    pub write_max_file_size: u64,

    /// Number of rotated files to keep
    ///
    /// Env: BO_LOG_WRITE_MAX_FILES
    /// Default: 5
    #[serde(default = "default_write_max_files")]
    pub write_max_files: usize,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_write_path() -> String {
    "./logs".to_string()
}

fn default_write_max_file_size() -> u64 {
    5 * 1024 * 1024
}

fn default_write_max_files() -> usize {
    5
}

impl LogConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];

        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::ValidateError(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        if self.write {
            if self.write_path.trim().is_empty() {
                return Err(ConfigError::ValidateError(
                    "BO_LOG_WRITE_PATH must not be empty when file logging is enabled".to_string(),
                ));
            }
            if self.write_max_file_size == 0 {
                return Err(ConfigError::ValidateError(
                    "BO_LOG_WRITE_MAX_FILE_SIZE must be greater than 0".to_string(),
                ));
            }
            if self.write_max_files == 0 {
                return Err(ConfigError::ValidateError(
                    "BO_LOG_WRITE_MAX_FILES must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            strip_ansi: false,
            write: false,
            write_path: default_write_path(),
            write_max_file_size: default_write_max_file_size(),
            write_max_files: default_write_max_files(),
        }
    }
}
