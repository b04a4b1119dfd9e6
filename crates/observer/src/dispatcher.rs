// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point: fan a balance subscription out to one router per chain.

use crate::client::{EvmClients, SubstrateClients};
use crate::feeds::{BalanceSink, FeedSettings, FeedSink};
use crate::handle::SubscriptionHandle;
use crate::metrics::registry as metrics;
use crate::router::{self, ChainRoute};
use crate::types::{AssetRegistry, BalanceItem, ChainDescriptor, ChainRegistry, OperationContext, split_addresses};
use balance_observer_config::ObserverConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Adapter name used for items emitted before any feed starts.
const DISPATCHER: &str = "dispatcher";

/// Inputs of one balance subscription.
#[derive(Clone)]
pub struct SubscribeParams {
    pub addresses: Vec<String>,
    /// Chain slugs to observe, in the order routers are started.
    pub chains: Vec<String>,
    /// Token slugs to observe; `None` observes every token of the chains.
    pub tokens: Option<Vec<String>>,
    pub assets: Arc<AssetRegistry>,
    pub chain_registry: Arc<ChainRegistry>,
    pub substrate_clients: SubstrateClients,
    pub evm_clients: EvmClients,
    pub sink: BalanceSink,
    pub context: Option<OperationContext>,
    /// Hardware-wallet accounts and the genesis hashes they may be used on.
    pub hardware_accounts: HashMap<String, Vec<String>>,
    pub settings: FeedSettings,
}

impl SubscribeParams {
    pub fn new(
        addresses: Vec<String>,
        chains: Vec<String>,
        assets: Arc<AssetRegistry>,
        chain_registry: Arc<ChainRegistry>,
        sink: BalanceSink,
    ) -> Self {
        Self {
            addresses,
            chains,
            tokens: None,
            assets,
            chain_registry,
            substrate_clients: SubstrateClients::new(),
            evm_clients: EvmClients::new(),
            sink,
            context: None,
            hardware_accounts: HashMap::new(),
            settings: FeedSettings::default(),
        }
    }

    /// Take poll timing and fan-out from `config` (`BO_POLL_*`) instead of the
    /// built-in defaults.
    pub fn with_config(mut self, config: &ObserverConfig) -> Self {
        self.settings = FeedSettings::from(&config.poll);
        self
    }

    /// Whether `address` may be queried on `chain`. Only hardware-wallet
    /// accounts are restricted, to the genesis hashes they were set up for.
    fn allowed_on(&self, address: &str, chain: &ChainDescriptor) -> bool {
        match self.hardware_accounts.get(address) {
            None => true,
            Some(genesis_hashes) => chain.genesis_hash.as_deref().is_some_and(|genesis| {
                genesis_hashes
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(genesis))
            }),
        }
    }
}

/// Start observing every requested chain and return the handle that stops
/// them all.
///
/// Addresses a chain cannot serve get `NotSupport` items before this returns.
/// Routers start in the background on the current tokio runtime; their setup
/// failures are logged and never reach the caller.
pub fn subscribe_balance(params: SubscribeParams) -> SubscriptionHandle {
    let handle = SubscriptionHandle::new();
    let sink = FeedSink::new(params.sink.clone(), handle.clone());
    let assets = Arc::new(params.assets.restrict_to(params.tokens.as_deref()));
    let runtime = tokio::runtime::Handle::try_current().ok();

    for slug in &params.chains {
        let Some(chain) = params.chain_registry.get(slug) else {
            tracing::warn!(chain = %slug, "Chain is not in the registry, skipping");
            continue;
        };

        let tokens: Vec<&str> = assets
            .iter()
            .filter(|asset| asset.origin_chain == chain.slug)
            .map(|asset| asset.slug.as_str())
            .collect();
        if tokens.is_empty() {
            continue;
        }

        let (usable, mut unsupported) = split_addresses(&params.addresses, chain);
        let (usable, restricted): (Vec<String>, Vec<String>) = usable
            .into_iter()
            .partition(|address| params.allowed_on(address, chain));
        unsupported.extend(restricted);

        if !unsupported.is_empty() {
            let items: Vec<BalanceItem> = unsupported
                .iter()
                .flat_map(|address| {
                    tokens
                        .iter()
                        .map(move |token| BalanceItem::not_supported(address.as_str(), *token))
                })
                .collect();
            metrics::record_not_supported(items.len());
            sink.emit(DISPATCHER, items);
        }

        if usable.is_empty() {
            continue;
        }

        let Some(runtime) = runtime.as_ref() else {
            tracing::error!(chain = %chain.slug, "No tokio runtime, balance feeds not started");
            continue;
        };

        let route = ChainRoute {
            chain: Arc::new(chain.clone()),
            assets: assets.clone(),
            addresses: Arc::from(usable),
            substrate: params.substrate_clients.get(&chain.slug).cloned(),
            evm: params.evm_clients.get(&chain.slug).cloned(),
            sink: sink.clone(),
            context: params.context.clone(),
            settings: params.settings.clone(),
        };

        let chain_slug = chain.slug.clone();
        let task = runtime.spawn(async move {
            if let Err(e) = router::run_chain(route).await {
                tracing::warn!(chain = %chain_slug, error = %e, "Chain skipped");
            }
        });

        let chain_handle = SubscriptionHandle::new();
        chain_handle.attach_task(task.abort_handle());
        handle.attach_child(chain_handle);
    }

    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ALICE, BOB, EVM_ALICE, RecordingSink};
    use crate::types::{AssetDescriptor, AssetType, ItemState};

    fn params(chains: &[&str], addresses: &[&str], sink: &RecordingSink) -> SubscribeParams {
        let mut kusama = ChainDescriptor::new("kusama");
        kusama.genesis_hash = Some("0xb0a8".to_string());
        let registry = ChainRegistry::from_chains([ChainDescriptor::new("ethereum"), kusama]);
        let assets = AssetRegistry::from_assets([
            AssetDescriptor::new("ethereum-NATIVE-ETH", "ethereum", AssetType::Native),
            AssetDescriptor::new("kusama-NATIVE-KSM", "kusama", AssetType::Native),
        ]);

        SubscribeParams::new(
            addresses.iter().map(|a| a.to_string()).collect(),
            chains.iter().map(|c| c.to_string()).collect(),
            Arc::new(assets),
            Arc::new(registry),
            sink.sink(),
        )
    }

    #[test]
    fn test_incompatible_address_without_runtime() {
        let sink = RecordingSink::default();
        let handle = subscribe_balance(params(&["ethereum"], &[ALICE], &sink));

        let items = sink.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].state, ItemState::NotSupport);
        assert_eq!(items[0].token_slug, "ethereum-NATIVE-ETH");
        handle.unsubscribe();
    }

    #[test]
    fn test_hardware_account_outside_allow_list() {
        let sink = RecordingSink::default();
        let mut params = params(&["kusama"], &[ALICE, BOB], &sink);
        params
            .hardware_accounts
            .insert(ALICE.to_string(), vec!["0x91b1".to_string()]);
        params
            .hardware_accounts
            .insert(BOB.to_string(), vec!["0xB0A8".to_string()]);

        let chain = params.chain_registry.get("kusama").unwrap().clone();
        assert!(!params.allowed_on(ALICE, &chain));
        assert!(params.allowed_on(BOB, &chain));
        assert!(params.allowed_on(EVM_ALICE, &chain));

        subscribe_balance(params);
        let items = sink.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].address, ALICE);
        assert_eq!(items[0].state, ItemState::NotSupport);
    }

    #[test]
    fn test_poll_settings_from_config() {
        let sink = RecordingSink::default();
        let mut config = ObserverConfig::default();
        config.poll.token_interval_ms = 12_000;
        config.poll.evm_native_interval_ms = 6_000;
        config.poll.max_concurrent_calls = 2;

        let params = params(&["kusama"], &[ALICE], &sink);
        assert_eq!(params.settings.token_interval, crate::consts::DEFAULT_TOKEN_INTERVAL);

        let params = params.with_config(&config);
        assert_eq!(params.settings.token_interval, std::time::Duration::from_secs(12));
        assert_eq!(params.settings.evm_native_interval, std::time::Duration::from_secs(6));
        assert_eq!(params.settings.max_concurrent_calls, 2);
    }

    #[test]
    fn test_token_filter_and_unknown_chain() {
        let sink = RecordingSink::default();
        let mut params = params(&["ethereum", "unknown"], &[ALICE], &sink);
        params.tokens = Some(vec!["kusama-NATIVE-KSM".to_string()]);

        subscribe_balance(params);
        assert!(sink.items().is_empty());
    }
}
