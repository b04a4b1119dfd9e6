// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native balance from `System::Account`, including nomination pool stake
//! on relay chains.

use super::{Adapter, FeedError, FeedRequest};
use crate::client::{KeyArg, StorageKey};
use crate::metrics::registry as metrics;
use crate::normalizer::{PoolStake, normalize_system_account};
use crate::runtime_queries::DecodeError;
use crate::runtime_queries::nomination_pools::{decode_delegation, decode_pool_member};
use crate::runtime_queries::system::decode_account_info;
use crate::types::{AssetDescriptor, BalanceItem, OperationContext};
use futures::StreamExt;

/// Storage carried by the subscription: `System::Account` for every address,
/// followed on pool-enabled relay chains by `NominationPools::PoolMembers`
/// and `DelegatedStaking::Delegators` for every address.
///
/// Delegator keys are carried before the runtime knows them; an absent
/// record reads as "not delegated", so members migrated by a later runtime
/// upgrade are picked up on the next update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyLayout {
    pools: bool,
}

impl KeyLayout {
    fn keys(&self, addresses: &[String]) -> Vec<StorageKey> {
        let per_address = |pallet: &'static str, entry: &'static str| {
            addresses
                .iter()
                .map(move |address| StorageKey::new(pallet, entry, vec![KeyArg::Account(address.clone())]))
        };

        let mut keys: Vec<StorageKey> = per_address("System", "Account").collect();
        if self.pools {
            keys.extend(per_address("NominationPools", "PoolMembers"));
            keys.extend(per_address("DelegatedStaking", "Delegators"));
        }
        keys
    }
}

pub(crate) async fn run(adapter: Adapter, request: FeedRequest) -> Result<(), FeedError> {
    let client = request.substrate_client(adapter)?;
    let chain = request.chain.slug.as_str();
    let token = request
        .tokens
        .first()
        .cloned()
        .ok_or_else(|| FeedError::MissingNativeToken(chain.to_string()))?;

    let layout = KeyLayout {
        pools: request.chain.relay_chain && client.has_storage("NominationPools", "PoolMembers").await,
    };

    let mut stream = client.subscribe_storage(layout.keys(&request.addresses)).await?;

    while let Some(update) = stream.next().await {
        let values = update?;
        let items = build_items(
            chain,
            &token,
            &request.addresses,
            &values,
            layout,
            request.context.as_ref(),
        );
        request.sink.emit(adapter.name(), items);
    }

    tracing::debug!(chain, "Native balance subscription ended");
    Ok(())
}

fn build_items(
    chain: &str,
    token: &AssetDescriptor,
    addresses: &[String],
    values: &[Option<Vec<u8>>],
    layout: KeyLayout,
    context: Option<&OperationContext>,
) -> Vec<BalanceItem> {
    let n = addresses.len();
    let value_at = |index: usize| values.get(index).and_then(|value| value.as_deref());

    addresses
        .iter()
        .enumerate()
        .map(|(i, address)| {
            let account = match decode_account_info(value_at(i)) {
                Ok(account) => account,
                Err(e) => {
                    tracing::warn!(chain, address = %address, error = %e, "Failed to decode native balance");
                    metrics::record_feed_failure(Adapter::SystemAccount.name());
                    return BalanceItem::zero(address.as_str(), token.slug.as_str());
                }
            };

            let pool = if layout.pools {
                pool_stake(value_at(n + i), value_at(2 * n + i)).unwrap_or_else(|e| {
                    tracing::warn!(chain, address = %address, error = %e, "Failed to decode pool membership");
                    PoolStake::None
                })
            } else {
                PoolStake::None
            };

            normalize_system_account(address, &token.slug, &account, pool, token.min_amount, context)
        })
        .collect()
}

/// Pool stake of a member; whether it still counts as locked is decided on
/// every update from the member's delegation record.
fn pool_stake(member: Option<&[u8]>, delegation: Option<&[u8]>) -> Result<PoolStake, DecodeError> {
    let Some(member) = decode_pool_member(member)? else {
        return Ok(PoolStake::None);
    };

    let stake = member.total_stake();
    if stake == 0 {
        return Ok(PoolStake::None);
    }

    if decode_delegation(delegation)? {
        Ok(PoolStake::Delegated(stake))
    } else {
        Ok(PoolStake::Transferred(stake))
    }
}
