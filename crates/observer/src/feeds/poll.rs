// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interval-driven reads for sources that have no storage subscription.

use super::{Adapter, FeedError, FeedRequest};
use crate::consts::MIN_POLL_INTERVAL;
use crate::metrics::registry as metrics;
use crate::normalizer::normalize_contract_balance;
use crate::types::{AssetDescriptor, BalanceItem};
use crate::utils::run_with_concurrency_ordered;
use futures::future::BoxFuture;
use primitive_types::U256;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

pub(crate) type ReadFuture = BoxFuture<'static, Result<U256, FeedError>>;

/// Reads one address's balance of one target.
pub(crate) type BalanceRead<T> = dyn Fn(&T, &str) -> ReadFuture + Send + Sync;

/// Read every `(token, target)` pair right away and then once per `period`,
/// emitting one batch per token and tick.
///
/// Every token of a tick is read in its own task, so a stalled endpoint only
/// delays its own token. Each call is cut off after one period and reported
/// as a failed read. Aborting the feed aborts every read still in flight.
pub(crate) async fn poll_tokens<T: Send + Sync + 'static>(
    adapter: Adapter,
    request: FeedRequest,
    period: Duration,
    targets: Vec<(AssetDescriptor, T)>,
    read: Arc<BalanceRead<T>>,
) -> Result<(), FeedError> {
    if targets.is_empty() {
        return Ok(());
    }

    let period = period.max(MIN_POLL_INTERVAL);
    let targets: Vec<Arc<(AssetDescriptor, T)>> = targets.into_iter().map(Arc::new).collect();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if request.sink.is_cancelled() {
                    return Ok(());
                }

                for target in &targets {
                    let request = request.clone();
                    let target = target.clone();
                    let read = read.clone();
                    in_flight.spawn(async move {
                        let (token, target) = target.as_ref();
                        let items = read_token(adapter, &request, token, target, read.as_ref(), period).await;
                        request.sink.emit(adapter.name(), items);
                    });
                }
            }
            Some(result) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(e) = result {
                    if e.is_panic() {
                        tracing::error!(chain = %request.chain.slug, adapter = adapter.name(), error = %e, "Poll read panicked");
                        metrics::record_feed_failure(adapter.name());
                    }
                }
            }
        }
    }
}

/// One item per address in request order. A failed or timed out read yields
/// a zero item for that address only.
async fn read_token<T>(
    adapter: Adapter,
    request: &FeedRequest,
    token: &AssetDescriptor,
    target: &T,
    read: &BalanceRead<T>,
    timeout: Duration,
) -> Vec<BalanceItem> {
    let calls = request.addresses.iter().map(|address| {
        let call = read(target, address.as_str());
        async move {
            match tokio::time::timeout(timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(FeedError::Timeout(timeout)),
            }
        }
    });
    let results = run_with_concurrency_ordered(request.settings.max_concurrent_calls, calls).await;

    request
        .addresses
        .iter()
        .zip(results)
        .map(|(address, result)| match result {
            Ok(balance) => normalize_contract_balance(address, &token.slug, balance),
            Err(e) => {
                tracing::warn!(
                    chain = %request.chain.slug,
                    token = %token.slug,
                    address = %address,
                    adapter = adapter.name(),
                    error = %e,
                    "Balance read failed"
                );
                metrics::record_feed_failure(adapter.name());
                BalanceItem::zero(address.as_str(), token.slug.as_str())
            }
        })
        .collect()
}
