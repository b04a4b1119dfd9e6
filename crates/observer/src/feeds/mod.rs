// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Balance feeds, one per balance source.
//!
//! A feed runs as a single task until it is aborted. Push feeds follow a
//! storage subscription, poll feeds read on a fixed interval. Feeds absorb
//! their own failures: a broken token or address degrades to zero balances
//! and never stops the rest of the feed.

mod assets;
mod contracts;
mod equilibrium;
mod evm_native;
mod poll;
mod subscription;
mod system_account;

use crate::client::{ClientError, EvmClient, SubstrateClient};
use crate::consts;
use crate::handle::SubscriptionHandle;
use crate::metrics::registry as metrics;
use crate::runtime_queries::DecodeError;
use crate::types::balance::now_millis;
use crate::types::{AssetDescriptor, AssetRegistry, AssetType, BalanceItem, ChainDescriptor, OperationContext};
use balance_observer_config::PollConfig;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Caller-supplied consumer of balance batches.
pub type BalanceSink = Arc<dyn Fn(Vec<BalanceItem>) + Send + Sync>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("{0} feed needs a Substrate client")]
    MissingSubstrateClient(&'static str),

    #[error("{0} feed needs an EVM client")]
    MissingEvmClient(&'static str),

    #[error("Native token of chain '{0}' is not in the asset registry")]
    MissingNativeToken(String),

    #[error("Token '{token}' has no {field}")]
    MissingTokenField { token: String, field: &'static str },

    #[error("Token '{token}' has an invalid {field} '{value}'")]
    InvalidTokenField {
        token: String,
        field: &'static str,
        value: String,
    },

    #[error("Balance read timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Address(#[from] crate::types::address::AddressError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Timing and fan-out of poll feeds.
#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub token_interval: Duration,
    pub evm_native_interval: Duration,
    pub max_concurrent_calls: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            token_interval: consts::DEFAULT_TOKEN_INTERVAL,
            evm_native_interval: consts::DEFAULT_EVM_NATIVE_INTERVAL,
            max_concurrent_calls: consts::DEFAULT_MAX_CONCURRENT_CALLS,
        }
    }
}

impl From<&PollConfig> for FeedSettings {
    fn from(config: &PollConfig) -> Self {
        Self {
            token_interval: config.token_interval(),
            evm_native_interval: config.evm_native_interval(),
            max_concurrent_calls: config.max_concurrent_calls,
        }
    }
}

/// Delivers batches to the caller's sink until the owning subscription is
/// cancelled. Results that resolve after teardown are dropped here.
#[derive(Clone)]
pub struct FeedSink {
    sink: BalanceSink,
    handle: SubscriptionHandle,
}

impl FeedSink {
    pub fn new(sink: BalanceSink, handle: SubscriptionHandle) -> Self {
        Self { sink, handle }
    }

    pub fn emit(&self, adapter: &'static str, mut items: Vec<BalanceItem>) {
        if items.is_empty() || self.handle.is_cancelled() {
            return;
        }

        let timestamp = now_millis();
        for item in &mut items {
            item.stamp(timestamp);
        }

        metrics::record_tick(adapter);
        (self.sink)(items);
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// One zero `Ready` item per address for `token`.
    pub fn emit_zero(&self, adapter: &'static str, token: &AssetDescriptor, addresses: &[String]) {
        let items = addresses
            .iter()
            .map(|address| BalanceItem::zero(address.as_str(), token.slug.as_str()))
            .collect();
        self.emit(adapter, items);
    }
}

/// Everything a feed needs to run against one chain.
#[derive(Clone)]
pub struct FeedRequest {
    pub chain: Arc<ChainDescriptor>,
    pub tokens: Vec<AssetDescriptor>,
    pub addresses: Arc<[String]>,
    pub substrate: Option<Arc<dyn SubstrateClient>>,
    pub evm: Option<Arc<dyn EvmClient>>,
    pub sink: FeedSink,
    pub context: Option<OperationContext>,
    pub settings: FeedSettings,
}

impl FeedRequest {
    fn substrate_client(&self, adapter: Adapter) -> Result<Arc<dyn SubstrateClient>, FeedError> {
        self.substrate
            .clone()
            .ok_or(FeedError::MissingSubstrateClient(adapter.name()))
    }

    fn evm_client(&self, adapter: Adapter) -> Result<Arc<dyn EvmClient>, FeedError> {
        self.evm.clone().ok_or(FeedError::MissingEvmClient(adapter.name()))
    }
}

/// A balance source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    /// `System::Account` for the native token, with nomination pool stake.
    SystemAccount,
    /// `Tokens::Accounts`, optionally also holding the native token.
    Tokens { include_native: bool },
    /// `OrmlTokens::Accounts`.
    OrmlTokens,
    /// `Assets::Account`.
    Assets,
    /// `ForeignAssets::Account` for bridged tokens.
    ForeignAssets,
    /// Multi-asset `System::Account` of Equilibrium runtimes.
    Equilibrium,
    Psp22,
    Grc20,
    Vft,
    EvmNative,
    Erc20,
}

impl Adapter {
    pub fn name(&self) -> &'static str {
        match self {
            Adapter::SystemAccount => "system_account",
            Adapter::Tokens { .. } => "tokens",
            Adapter::OrmlTokens => "orml_tokens",
            Adapter::Assets => "assets",
            Adapter::ForeignAssets => "foreign_assets",
            Adapter::Equilibrium => "equilibrium",
            Adapter::Psp22 => "psp22",
            Adapter::Grc20 => "grc20",
            Adapter::Vft => "vft",
            Adapter::EvmNative => "evm_native",
            Adapter::Erc20 => "erc20",
        }
    }

    /// Whether the feed reads through the chain's EVM client.
    pub fn uses_evm(&self) -> bool {
        matches!(self, Adapter::EvmNative | Adapter::Erc20)
    }

    fn token_types(&self) -> &'static [AssetType] {
        match self {
            Adapter::SystemAccount | Adapter::EvmNative => &[AssetType::Native],
            Adapter::Tokens { include_native: true } | Adapter::Equilibrium => {
                &[AssetType::Native, AssetType::Local]
            }
            Adapter::Tokens { include_native: false }
            | Adapter::OrmlTokens
            | Adapter::Assets
            | Adapter::ForeignAssets => &[AssetType::Local],
            Adapter::Psp22 => &[AssetType::Psp22],
            Adapter::Grc20 => &[AssetType::Grc20],
            Adapter::Vft => &[AssetType::Vft],
            Adapter::Erc20 => &[AssetType::Erc20],
        }
    }

    /// Tokens of `chain` this adapter is responsible for.
    ///
    /// On chains with a bridged-asset feed, bridged tokens belong to that
    /// feed alone. Manta "zk" assets are not readable through pallet-assets.
    pub fn select_tokens(&self, chain: &ChainDescriptor, assets: &AssetRegistry) -> Vec<AssetDescriptor> {
        let bridged_feed = chain.supports_bridged_assets();

        assets
            .filter_by_chain_and_type(&chain.slug, self.token_types())
            .into_iter()
            .filter(|token| match self {
                Adapter::ForeignAssets => token.is_bridged,
                Adapter::Assets => {
                    !(bridged_feed && token.is_bridged)
                        && !consts::is_manta_zk_asset(&token.origin_chain, &token.symbol)
                }
                Adapter::Tokens { .. } | Adapter::OrmlTokens | Adapter::Equilibrium => {
                    !(bridged_feed && token.is_bridged)
                }
                _ => true,
            })
            .cloned()
            .collect()
    }

    /// Run the feed until the task is aborted or the feed cannot continue.
    pub async fn run(self, request: FeedRequest) -> Result<(), FeedError> {
        metrics::record_feed_started(self.name());
        tracing::debug!(
            chain = %request.chain.slug,
            adapter = self.name(),
            tokens = request.tokens.len(),
            addresses = request.addresses.len(),
            "Starting balance feed"
        );

        match self {
            Adapter::SystemAccount => system_account::run(self, request).await,
            Adapter::Tokens { .. } => {
                subscription::run(self, request, Arc::new(assets::TokensPallet)).await
            }
            Adapter::OrmlTokens => {
                subscription::run(self, request, Arc::new(assets::OrmlTokensPallet)).await
            }
            Adapter::Assets => subscription::run(self, request, Arc::new(assets::AssetsPallet)).await,
            Adapter::ForeignAssets => {
                subscription::run(self, request, Arc::new(assets::ForeignAssetsPallet)).await
            }
            Adapter::Equilibrium => {
                subscription::run(self, request, Arc::new(equilibrium::EquilibriumAccounts)).await
            }
            Adapter::Psp22 => contracts::run_psp22(self, request).await,
            Adapter::Grc20 => contracts::run_grc20(self, request).await,
            Adapter::Vft => contracts::run_vft(self, request).await,
            Adapter::EvmNative => evm_native::run(self, request).await,
            Adapter::Erc20 => contracts::run_erc20(self, request).await,
        }
    }
}
