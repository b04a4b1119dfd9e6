// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(
        "Invalid Prometheus prefix '{0}': must start with [a-zA-Z_:] and contain only [a-zA-Z0-9_:]"
    )]
    InvalidPrometheusPrefix(String),

    #[error("Invalid Loki URL '{0}': {1}")]
    InvalidLokiUrl(String, String),
}

/// Configuration for Prometheus metrics and Loki log shipping
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Enable or disable metrics collection
    ///
    /// Env: BO_METRICS_ENABLED
    #[serde(default)]
    pub enabled: bool,

    /// Prometheus metric name prefix (default: "balance_observer")
    ///
    /// Env: BO_METRICS_PREFIX
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Loki push endpoint, e.g. http://127.0.0.1:3100
    ///
    /// Env: BO_METRICS_LOKI_URL
    #[serde(default)]
    pub loki_url: Option<String>,
}

fn default_prefix() -> String {
    "balance_observer".to_string()
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            prefix: default_prefix(),
            loki_url: None,
        }
    }
}

/// Prometheus names must match [a-zA-Z_:][a-zA-Z0-9_:]*
fn is_valid_prometheus_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        None => true,
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == ':' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == ':')
        }
        Some(_) => false,
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<(), MetricsError> {
        if !is_valid_prometheus_prefix(&self.prefix) {
            return Err(MetricsError::InvalidPrometheusPrefix(self.prefix.clone()));
        }

        if let Some(loki_url) = &self.loki_url {
            let parsed = Url::parse(loki_url)
                .map_err(|e| MetricsError::InvalidLokiUrl(loki_url.clone(), e.to_string()))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(MetricsError::InvalidLokiUrl(
                    loki_url.clone(),
                    format!("unsupported scheme '{}'", parsed.scheme()),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_prefix(prefix: &str) -> MetricsConfig {
        MetricsConfig {
            enabled: true,
            prefix: prefix.to_string(),
            loki_url: None,
        }
    }

    #[test]
    fn test_default_metrics_config() {
        let config = MetricsConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.prefix, "balance_observer");
        assert!(config.loki_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_valid_prometheus_prefixes() {
        for prefix in ["my_app_metrics", "app:metrics", "_metrics", ""] {
            assert!(
                with_prefix(prefix).validate().is_ok(),
                "prefix '{}' should be valid",
                prefix
            );
        }
    }

    #[test]
    fn test_invalid_prometheus_prefixes() {
        for prefix in ["123metrics", "my-metrics", "my.metrics"] {
            assert!(
                matches!(
                    with_prefix(prefix).validate(),
                    Err(MetricsError::InvalidPrometheusPrefix(_))
                ),
                "prefix '{}' should be rejected",
                prefix
            );
        }
    }

    #[test]
    fn test_loki_url_validation() {
        let mut config = MetricsConfig {
            loki_url: Some("http://loki.monitoring.svc.cluster.local:3100".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.loki_url = Some("not a url".to_string());
        assert!(matches!(
            config.validate(),
            Err(MetricsError::InvalidLokiUrl(_, _))
        ));

        config.loki_url = Some("ftp://127.0.0.1:3100".to_string());
        assert!(config.validate().is_err());
    }
}
