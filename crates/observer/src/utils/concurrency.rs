// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded fan-out for the per-address calls of one feed tick.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs at most `max_concurrent` futures at once and returns every output in
/// input order. Outputs are collected whole; callers encode failures in `O`.
pub async fn run_with_concurrency_ordered<F, O>(
    max_concurrent: usize,
    tasks: impl IntoIterator<Item = F>,
) -> Vec<O>
where
    F: Future<Output = O>,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut futs = FuturesUnordered::new();

    for (idx, task) in tasks.into_iter().enumerate() {
        let sem = semaphore.clone();
        futs.push(async move {
            // The semaphore is never closed, a failed acquire only drops the bound
            let _permit = sem.acquire_owned().await.ok();
            (idx, task.await)
        });
    }

    let mut indexed = Vec::with_capacity(futs.len());
    while let Some(result) = futs.next().await {
        indexed.push(result);
    }
    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, out)| out).collect()
}
