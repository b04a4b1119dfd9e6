// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::consts;
use crate::types::AssetType;
use serde::Deserialize;
use std::collections::HashMap;

/// Balance dialect of a Substrate runtime.
///
/// Chains in a group share the pallet layout used to hold non-native
/// tokens (and, for some groups, the native token too).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainGroup {
    /// `tokens.accounts` holds every token, the native one included.
    Kintsugi,
    /// Equilibrium runtime, `system.account` holds a multi-asset balance list.
    Genshiro,
    /// Same account layout as `Genshiro`.
    EquilibriumParachain,
    /// ORML `tokens.accounts` for local tokens.
    Bifrost,
    /// `assets.account` for local tokens.
    Statemine,
    /// `ormlTokens.accounts` for local tokens.
    Centrifuge,
}

impl ChainGroup {
    /// Groups whose runtime replaces `system.account` for the native token.
    pub fn replaces_system_account(&self) -> bool {
        matches!(
            self,
            ChainGroup::Kintsugi | ChainGroup::Genshiro | ChainGroup::EquilibriumParachain
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub slug: String,
    #[serde(default)]
    pub genesis_hash: Option<String>,
    #[serde(default)]
    pub evm_compatible: bool,
    /// `false` for chains reachable only through an EVM RPC.
    #[serde(default = "default_true")]
    pub has_substrate: bool,
    #[serde(default)]
    pub relay_chain: bool,
    /// Contract standards executed by the Substrate runtime (PSP22, GRC20, VFT).
    #[serde(default)]
    pub smart_contracts: Vec<AssetType>,
    /// Token standards reachable through the EVM layer (ERC20).
    #[serde(default)]
    pub evm_token_types: Vec<AssetType>,
    /// Overrides the built-in slug table.
    #[serde(default)]
    pub balance_group: Option<ChainGroup>,
    /// Forces the bridged `foreignAssets` feed on chains missing from the built-in table.
    #[serde(default)]
    pub bridged_assets: bool,
}

fn default_true() -> bool {
    true
}

impl ChainDescriptor {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            genesis_hash: None,
            evm_compatible: false,
            has_substrate: true,
            relay_chain: false,
            smart_contracts: Vec::new(),
            evm_token_types: Vec::new(),
            balance_group: None,
            bridged_assets: false,
        }
    }

    /// An EVM chain with no Substrate layer at all.
    pub fn is_pure_evm(&self) -> bool {
        (self.evm_compatible && !self.has_substrate) || consts::is_known_pure_evm(&self.slug)
    }

    pub fn supports_contract(&self, asset_type: AssetType) -> bool {
        self.smart_contracts.contains(&asset_type)
    }

    pub fn supports_erc20(&self) -> bool {
        self.evm_compatible && self.evm_token_types.contains(&AssetType::Erc20)
    }

    pub fn supports_bridged_assets(&self) -> bool {
        self.bridged_assets || consts::is_bridged_asset_chain(&self.slug)
    }

    /// Resolved balance dialect; explicit membership wins over the slug table.
    pub fn group(&self) -> Option<ChainGroup> {
        self.balance_group.or_else(|| consts::chain_group_of(&self.slug))
    }
}

/// Read-only snapshot of chain descriptors keyed by slug.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<String, ChainDescriptor>,
}

impl ChainRegistry {
    pub fn from_chains(chains: impl IntoIterator<Item = ChainDescriptor>) -> Self {
        Self {
            chains: chains
                .into_iter()
                .map(|chain| (chain.slug.clone(), chain))
                .collect(),
        }
    }

    pub fn get(&self, slug: &str) -> Option<&ChainDescriptor> {
        self.chains.get(slug)
    }
}
