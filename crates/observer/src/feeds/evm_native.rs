// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native balances of EVM accounts.

use super::poll::{BalanceRead, ReadFuture, poll_tokens};
use super::{Adapter, FeedError, FeedRequest};
use futures::FutureExt;
use primitive_types::U256;
use std::sync::Arc;

/// Native balance of EVM accounts via `eth_getBalance`, polled on the EVM
/// interval. EVM accounts have no locked part.
pub(crate) async fn run(adapter: Adapter, request: FeedRequest) -> Result<(), FeedError> {
    let client = request.evm_client(adapter)?;
    let token = request
        .tokens
        .first()
        .cloned()
        .ok_or_else(|| FeedError::MissingNativeToken(request.chain.slug.clone()))?;
    let period = request.settings.evm_native_interval;

    let read: Arc<BalanceRead<()>> = Arc::new(move |_: &(), address: &str| -> ReadFuture {
        let client = client.clone();
        let address = address.to_string();
        async move { Ok::<_, FeedError>(client.balance(&address).await?) }.boxed()
    });

    poll_tokens(adapter, request, period, vec![(token, ())], read).await
}
