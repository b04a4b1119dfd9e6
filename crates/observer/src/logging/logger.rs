// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::consts::SERVICE_NAME;
use balance_observer_config::ObserverConfig;
use rolling_file::*;
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse Loki URL '{url}': {source}")]
    InvalidLokiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to configure Loki integration: {0}")]
    LokiError(#[from] tracing_loki::Error),

    #[error("Loki logging needs a running Tokio runtime")]
    NoRuntime,

    #[error("A global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Configuration for logging initialization
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub json_format: bool,
    pub strip_ansi: bool,
    pub write_to_file: bool,
    pub write_path: &'a str,
    pub write_max_file_size: u64,
    pub write_max_files: usize,
    pub loki_url: Option<&'a str>,
}

impl<'a> From<&'a ObserverConfig> for LoggingConfig<'a> {
    fn from(config: &'a ObserverConfig) -> Self {
        Self {
            level: &config.log.level,
            json_format: config.log.json,
            strip_ansi: config.log.strip_ansi,
            write_to_file: config.log.write,
            write_path: &config.log.write_path,
            write_max_file_size: config.log.write_max_file_size,
            write_max_files: config.log.write_max_files,
            loki_url: config.metrics.loki_url.as_deref(),
        }
    }
}

/// Flushes buffered file output when dropped; keep it alive for the
/// lifetime of the program.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Install the global tracing subscriber.
///
/// # Examples
/// ```no_run
/// use balance_observer::logging::{self, LoggingConfig};
///
/// let _guard = logging::init_with_config(LoggingConfig {
///     level: "debug",
///     json_format: false,
///     strip_ansi: false,
///     write_to_file: true,
///     write_path: "./logs",
///     write_max_file_size: 5242880,
///     write_max_files: 5,
///     loki_url: None,
/// })?;
/// # Ok::<(), balance_observer::logging::LoggingError>(())
/// ```
///
/// # Loki Integration
/// When a Loki URL is provided, logs are shipped in the background with the
/// labels `service = "balance-observer"` and a `pid` field. This requires a
/// running Tokio runtime.
///
/// # Log Rotation
/// Files rotate at `write_max_file_size`: `logs.log`, then `logs.log.1`,
/// `logs.log.2`, ... keeping `write_max_files` files in total.
pub fn init_with_config(config: LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = EnvFilter::try_new(config.level).map_err(|source| LoggingError::InvalidLogLevel {
        level: config.level.to_string(),
        source,
    })?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.json_format {
        layers.push(fmt::layer().json().boxed());
    } else {
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(!config.strip_ansi)
                .boxed(),
        );
    }

    let mut file_guard = None;
    if config.write_to_file {
        std::fs::create_dir_all(config.write_path)?;

        let log_file_path = PathBuf::from(config.write_path).join("logs.log");
        // write_max_files counts the current file too
        let rotated_files_count = config.write_max_files.saturating_sub(1);
        let file_appender = BasicRollingFileAppender::new(
            log_file_path,
            RollingConditionBasic::new().max_size(config.write_max_file_size),
            rotated_files_count,
        )?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        file_guard = Some(guard);

        if config.json_format {
            layers.push(fmt::layer().json().with_writer(non_blocking).boxed());
        } else {
            layers.push(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .boxed(),
            );
        }
    }

    if let Some(url) = config.loki_url {
        let parsed_url = url::Url::parse(url).map_err(|source| LoggingError::InvalidLokiUrl {
            url: url.to_string(),
            source,
        })?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| LoggingError::NoRuntime)?;

        let (loki_layer, task) = tracing_loki::builder()
            .label("service", SERVICE_NAME)?
            .extra_field("pid", format!("{}", std::process::id()))?
            .build_url(parsed_url)?;

        runtime.spawn(task);
        layers.push(loki_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard { _file: file_guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(level: &str) -> LoggingConfig<'_> {
        LoggingConfig {
            level,
            json_format: false,
            strip_ansi: true,
            write_to_file: false,
            write_path: "./logs",
            write_max_file_size: 1024,
            write_max_files: 2,
            loki_url: None,
        }
    }

    #[test]
    fn test_invalid_level_rejected() {
        let result = init_with_config(console("observer=loud"));
        assert!(matches!(result, Err(LoggingError::InvalidLogLevel { .. })));
    }

    #[test]
    fn test_invalid_loki_url_rejected() {
        let result = init_with_config(LoggingConfig {
            loki_url: Some("not a url"),
            ..console("info")
        });
        assert!(matches!(result, Err(LoggingError::InvalidLokiUrl { .. })));
    }

    #[test]
    fn test_loki_needs_runtime() {
        let result = init_with_config(LoggingConfig {
            loki_url: Some("http://127.0.0.1:3100"),
            ..console("info")
        });
        assert!(matches!(result, Err(LoggingError::NoRuntime)));
    }

    #[test]
    fn test_config_conversion() {
        let mut config = ObserverConfig::default();
        config.log.level = "debug".to_string();
        config.metrics.loki_url = Some("http://loki:3100".to_string());

        let logging = LoggingConfig::from(&config);
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.loki_url, Some("http://loki:3100"));
        assert!(!logging.write_to_file);
    }
}
