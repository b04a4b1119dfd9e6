// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Live balance observation across Substrate, EVM and Gear based chains.
//!
//! [`subscribe_balance`] starts one router per chain; each router runs the
//! feeds its chain needs and every feed reports normalized [`BalanceItem`]
//! batches to the caller's sink until the returned handle is unsubscribed.

pub mod client;
pub mod consts;
pub mod dispatcher;
pub mod feeds;
pub mod handle;
pub mod logging;
pub mod metrics;
pub mod normalizer;
pub mod router;
pub mod runtime_queries;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod test_fixtures;

pub use balance_observer_config::ObserverConfig;
pub use client::{ClientError, EvmClient, KeyArg, StorageKey, StorageStream, SubstrateClient};
pub use dispatcher::{SubscribeParams, subscribe_balance};
pub use feeds::{BalanceSink, FeedSettings};
pub use handle::SubscriptionHandle;
pub use types::{
    AssetDescriptor, AssetRegistry, AssetType, BalanceItem, ChainDescriptor, ChainGroup, ChainRegistry,
    ItemState, OperationContext,
};

/// Install logging and, when enabled, the metrics registry described by
/// `config`. The returned guard flushes file logs when dropped.
///
/// Poll settings apply per subscription, see [`SubscribeParams::with_config`].
pub fn init(config: &ObserverConfig) -> Result<logging::LoggingGuard, logging::LoggingError> {
    let guard = logging::init_with_config(logging::LoggingConfig::from(config))?;
    if config.metrics.enabled {
        metrics::init(&config.metrics.prefix);
    }
    Ok(guard)
}
