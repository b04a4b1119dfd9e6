// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, IntGauge, Opts, Registry, TextEncoder};
use std::sync::{Mutex, Once};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Metrics not initialized - call init() first")]
    NotInitialized,

    #[error("Failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),

    #[error("Metrics output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

lazy_static! {
    pub static ref REGISTRY: Mutex<Option<Registry>> = Mutex::new(None);
    static ref INIT_ONCE: Once = Once::new();

    // Created without registering to the default registry
    pub static ref FEEDS_STARTED: CounterVec = CounterVec::new(
        Opts::new("feeds_started", "Number of balance feeds started"),
        &["adapter"]
    )
    .expect("Failed to create feeds_started counter");

    pub static ref FEED_FAILURES: CounterVec = CounterVec::new(
        Opts::new("feed_failures", "Number of degraded feed operations"),
        &["adapter"]
    )
    .expect("Failed to create feed_failures counter");

    pub static ref FEED_TICKS: CounterVec = CounterVec::new(
        Opts::new("feed_ticks", "Number of balance batches delivered to subscribers"),
        &["adapter"]
    )
    .expect("Failed to create feed_ticks counter");

    pub static ref NOT_SUPPORTED_ITEMS: Counter = Counter::new(
        "not_supported_items",
        "Number of NOT_SUPPORT balance items emitted"
    )
    .expect("Failed to create not_supported_items counter");

    pub static ref ACTIVE_ROUTERS: IntGauge = IntGauge::new(
        "active_chain_routers",
        "Number of chain routers currently running"
    )
    .expect("Failed to create active_chain_routers gauge");
}

/// Initialize metrics by registering them with the custom registry
pub fn init(prefix: &str) {
    INIT_ONCE.call_once(|| {
        let registry = match Registry::new_custom(Some(prefix.to_string()), None) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::error!(prefix, error = %e, "Failed to create Prometheus registry");
                return;
            }
        };

        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(FEEDS_STARTED.clone()),
            Box::new(FEED_FAILURES.clone()),
            Box::new(FEED_TICKS.clone()),
            Box::new(NOT_SUPPORTED_ITEMS.clone()),
            Box::new(ACTIVE_ROUTERS.clone()),
        ];
        for collector in collectors {
            if let Err(e) = registry.register(collector) {
                tracing::error!(error = %e, "Failed to register metric");
            }
        }

        *REGISTRY.lock().unwrap_or_else(|p| p.into_inner()) = Some(registry);
    });
}

/// Gather all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, MetricsError> {
    let encoder = TextEncoder::new();
    let registry_guard = REGISTRY.lock().unwrap_or_else(|p| p.into_inner());
    let registry = registry_guard.as_ref().ok_or(MetricsError::NotInitialized)?;
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub(crate) fn record_feed_started(adapter: &str) {
    FEEDS_STARTED.with_label_values(&[adapter]).inc();
}

pub(crate) fn record_feed_failure(adapter: &str) {
    FEED_FAILURES.with_label_values(&[adapter]).inc();
}

pub(crate) fn record_tick(adapter: &str) {
    FEED_TICKS.with_label_values(&[adapter]).inc();
}

pub(crate) fn record_not_supported(count: usize) {
    NOT_SUPPORTED_ITEMS.inc_by(count as f64);
}

/// Keeps `ACTIVE_ROUTERS` raised while alive.
pub(crate) struct ActiveRouterGuard;

impl ActiveRouterGuard {
    pub(crate) fn enter() -> Self {
        ACTIVE_ROUTERS.inc();
        ActiveRouterGuard
    }
}

impl Drop for ActiveRouterGuard {
    fn drop(&mut self) {
        ACTIVE_ROUTERS.dec();
    }
}
