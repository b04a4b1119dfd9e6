// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-chain strategy: which feeds observe a chain, and their supervision.

use crate::client::{ClientError, EvmClient, SubstrateClient};
use crate::feeds::{Adapter, FeedRequest, FeedSettings, FeedSink};
use crate::metrics::registry::{self as metrics, ActiveRouterGuard};
use crate::types::{AssetRegistry, AssetType, ChainDescriptor, ChainGroup, OperationContext};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("Chain '{0}' has no Substrate client")]
    MissingSubstrateClient(String),

    #[error("Chain '{0}' has no EVM client")]
    MissingEvmClient(String),

    #[error("Client of chain '{chain}' is not ready")]
    NotReady {
        chain: String,
        #[source]
        source: ClientError,
    },
}

/// Local-token feed of a balance group.
fn group_adapter(group: ChainGroup) -> Adapter {
    match group {
        ChainGroup::Bifrost => Adapter::Tokens { include_native: false },
        ChainGroup::Kintsugi => Adapter::Tokens { include_native: true },
        ChainGroup::Statemine => Adapter::Assets,
        ChainGroup::Genshiro | ChainGroup::EquilibriumParachain => Adapter::Equilibrium,
        ChainGroup::Centrifuge => Adapter::OrmlTokens,
    }
}

/// Feeds that together observe every token of `chain`.
pub fn plan_adapters(chain: &ChainDescriptor) -> Vec<Adapter> {
    if chain.is_pure_evm() {
        return vec![Adapter::EvmNative, Adapter::Erc20];
    }

    let group = chain.group();
    let mut adapters = Vec::new();

    if !group.is_some_and(|group| group.replaces_system_account()) {
        adapters.push(Adapter::SystemAccount);
    }
    if let Some(group) = group {
        adapters.push(group_adapter(group));
    }
    if chain.supports_bridged_assets() {
        adapters.push(Adapter::ForeignAssets);
    }
    if chain.supports_erc20() {
        adapters.push(Adapter::Erc20);
    }

    for (asset_type, adapter) in [
        (AssetType::Psp22, Adapter::Psp22),
        (AssetType::Grc20, Adapter::Grc20),
        (AssetType::Vft, Adapter::Vft),
    ] {
        if chain.supports_contract(asset_type) {
            adapters.push(adapter);
        }
    }

    adapters
}

/// Everything the router needs to observe one chain.
#[derive(Clone)]
pub struct ChainRoute {
    pub chain: Arc<ChainDescriptor>,
    pub assets: Arc<AssetRegistry>,
    pub addresses: Arc<[String]>,
    pub substrate: Option<Arc<dyn SubstrateClient>>,
    pub evm: Option<Arc<dyn EvmClient>>,
    pub sink: FeedSink,
    pub context: Option<OperationContext>,
    pub settings: FeedSettings,
}

/// Wait for the chain's clients, then run every planned feed until the task
/// is aborted. Feeds run in the router's own task set, so aborting the
/// router aborts them all.
///
/// A chain without a usable primary client is a setup failure. A missing or
/// failing EVM client on a Substrate chain only disables the EVM feeds.
pub async fn run_chain(route: ChainRoute) -> Result<(), RouterError> {
    let _active = ActiveRouterGuard::enter();
    let chain = route.chain.slug.as_str();
    let adapters = plan_adapters(&route.chain);

    let substrate = if adapters.iter().any(|adapter| !adapter.uses_evm()) {
        let client = route
            .substrate
            .clone()
            .ok_or_else(|| RouterError::MissingSubstrateClient(chain.to_string()))?;
        client.wait_ready().await.map_err(|source| RouterError::NotReady {
            chain: chain.to_string(),
            source,
        })?;
        Some(client)
    } else {
        None
    };

    let evm = match route.evm.clone() {
        Some(client) if adapters.iter().any(Adapter::uses_evm) => match client.wait_ready().await {
            Ok(()) => Some(client),
            Err(source) if substrate.is_none() => {
                return Err(RouterError::NotReady {
                    chain: chain.to_string(),
                    source,
                });
            }
            Err(e) => {
                tracing::warn!(chain, error = %e, "EVM client not ready, skipping EVM feeds");
                None
            }
        },
        None if substrate.is_none() => return Err(RouterError::MissingEvmClient(chain.to_string())),
        _ => None,
    };

    let mut feeds = JoinSet::new();
    for adapter in adapters {
        if adapter.uses_evm() && evm.is_none() {
            tracing::debug!(chain, adapter = adapter.name(), "No EVM client, feed not started");
            continue;
        }

        let tokens = adapter.select_tokens(&route.chain, &route.assets);
        if tokens.is_empty() {
            continue;
        }

        let request = FeedRequest {
            chain: route.chain.clone(),
            tokens,
            addresses: route.addresses.clone(),
            substrate: substrate.clone(),
            evm: evm.clone(),
            sink: route.sink.clone(),
            context: route.context.clone(),
            settings: route.settings.clone(),
        };
        feeds.spawn(async move { (adapter, adapter.run(request).await) });
    }

    tracing::debug!(chain, feeds = feeds.len(), "Chain router started");

    while let Some(result) = feeds.join_next().await {
        match result {
            Ok((adapter, Ok(()))) => {
                tracing::debug!(chain, adapter = adapter.name(), "Balance feed finished");
            }
            Ok((adapter, Err(e))) => {
                tracing::warn!(chain, adapter = adapter.name(), error = %e, "Balance feed failed");
                metrics::record_feed_failure(adapter.name());
            }
            Err(e) if e.is_panic() => {
                tracing::error!(chain, error = %e, "Balance feed panicked");
            }
            Err(_) => {}
        }
    }

    Ok(())
}
