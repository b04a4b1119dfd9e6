// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contract-held token balances (PSP22, GRC20, VFT, ERC20), polled on the
//! token interval.

use super::poll::{BalanceRead, ReadFuture, poll_tokens};
use super::{Adapter, FeedError, FeedRequest};
use crate::metrics::registry as metrics;
use crate::runtime_queries::contracts::{
    decode_erc20_balance, decode_grc20_balance, decode_psp22_balance, decode_vft_balance,
    encode_erc20_balance_of, encode_grc20_balance_of, encode_psp22_balance_of, encode_vft_balance_of,
};
use crate::types::AssetDescriptor;
use crate::types::address::{account_id, evm_address};
use futures::FutureExt;
use primitive_types::U256;
use std::sync::Arc;

/// Tokens paired with their contract address. Tokens without one report
/// zero balances once and are not polled.
fn contract_targets(adapter: Adapter, request: &FeedRequest) -> Vec<(AssetDescriptor, Arc<str>)> {
    let mut targets = Vec::with_capacity(request.tokens.len());

    for token in &request.tokens {
        match token.contract_address.as_deref().filter(|address| !address.is_empty()) {
            Some(contract) => targets.push((token.clone(), Arc::from(contract))),
            None => {
                let e = FeedError::MissingTokenField {
                    token: token.slug.clone(),
                    field: "contract address",
                };
                tracing::warn!(chain = %request.chain.slug, adapter = adapter.name(), error = %e, "Skipping token");
                metrics::record_feed_failure(adapter.name());
                request.sink.emit_zero(adapter.name(), token, &request.addresses);
            }
        }
    }

    targets
}

pub(crate) async fn run_psp22(adapter: Adapter, request: FeedRequest) -> Result<(), FeedError> {
    let client = request.substrate_client(adapter)?;
    let targets = contract_targets(adapter, &request);
    let period = request.settings.token_interval;

    let read: Arc<BalanceRead<Arc<str>>> = Arc::new(move |contract: &Arc<str>, address: &str| -> ReadFuture {
        let client = client.clone();
        let contract = contract.clone();
        let address = address.to_string();
        async move {
            let owner = account_id(&address)?;
            let reply = client
                .contract_call(&contract, &address, encode_psp22_balance_of(&owner))
                .await?;
            Ok::<_, FeedError>(U256::from(decode_psp22_balance(&reply)?))
        }
        .boxed()
    });

    poll_tokens(adapter, request, period, targets, read).await
}

pub(crate) async fn run_grc20(adapter: Adapter, request: FeedRequest) -> Result<(), FeedError> {
    let client = request.substrate_client(adapter)?;
    let targets = contract_targets(adapter, &request);
    let period = request.settings.token_interval;

    let read: Arc<BalanceRead<Arc<str>>> = Arc::new(move |program: &Arc<str>, address: &str| -> ReadFuture {
        let client = client.clone();
        let program = program.clone();
        let address = address.to_string();
        async move {
            let actor = account_id(&address)?;
            let reply = client
                .calculate_reply(&program, &address, encode_grc20_balance_of(&actor))
                .await?;
            Ok::<_, FeedError>(U256::from(decode_grc20_balance(&reply)?))
        }
        .boxed()
    });

    poll_tokens(adapter, request, period, targets, read).await
}

pub(crate) async fn run_vft(adapter: Adapter, request: FeedRequest) -> Result<(), FeedError> {
    let client = request.substrate_client(adapter)?;
    let targets = contract_targets(adapter, &request);
    let period = request.settings.token_interval;

    let read: Arc<BalanceRead<Arc<str>>> = Arc::new(move |program: &Arc<str>, address: &str| -> ReadFuture {
        let client = client.clone();
        let program = program.clone();
        let address = address.to_string();
        async move {
            let actor = account_id(&address)?;
            let reply = client
                .calculate_reply(&program, &address, encode_vft_balance_of(&actor))
                .await?;
            Ok::<_, FeedError>(decode_vft_balance(&reply)?)
        }
        .boxed()
    });

    poll_tokens(adapter, request, period, targets, read).await
}

pub(crate) async fn run_erc20(adapter: Adapter, request: FeedRequest) -> Result<(), FeedError> {
    let client = request.evm_client(adapter)?;
    let targets = contract_targets(adapter, &request);
    let period = request.settings.token_interval;

    let read: Arc<BalanceRead<Arc<str>>> = Arc::new(move |contract: &Arc<str>, address: &str| -> ReadFuture {
        let client = client.clone();
        let contract = contract.clone();
        let address = address.to_string();
        async move {
            let owner = evm_address(&address)?;
            let reply = client.call(&contract, encode_erc20_balance_of(&owner)).await?;
            Ok::<_, FeedError>(decode_erc20_balance(&reply)?)
        }
        .boxed()
    });

    poll_tokens(adapter, request, period, targets, read).await
}
