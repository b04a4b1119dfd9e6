// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::ChainGroup;
use std::time::Duration;

/// Built-in chain group membership, used when a chain descriptor does not
/// declare its balance dialect explicitly.
pub const CHAIN_GROUPS: &[(ChainGroup, &[&str])] = &[
    (
        ChainGroup::Kintsugi,
        &["kintsugi", "interlay", "kintsugi_test", "mangatax_para"],
    ),
    (ChainGroup::Genshiro, &["genshiro_testnet", "genshiro"]),
    (ChainGroup::EquilibriumParachain, &["equilibrium_parachain"]),
    (
        ChainGroup::Bifrost,
        &[
            "bifrost",
            "acala",
            "karura",
            "acala_testnet",
            "pioneer",
            "bitcountry",
            "bifrost_dot",
            "hydradx_main",
            "hydradx_rococo",
            "pendulum",
            "amplitude",
            "continuum_network",
        ],
    ),
    (
        ChainGroup::Statemine,
        &[
            "statemine",
            "astar",
            "shiden",
            "statemint",
            "moonbeam",
            "moonbase",
            "moonriver",
            "crabParachain",
            "darwinia2",
            "parallel",
            "calamari",
            "manta_network",
            "rococo_assethub",
            "liberlandTest",
            "liberland",
            "dentnet",
            "pangolin",
            "crust",
            "phala",
            "shibuya",
            "dbcchain",
        ],
    ),
    (ChainGroup::Centrifuge, &["centrifuge"]),
];

/// Chains whose `foreignAssets` pallet holds bridged tokens.
pub const BRIDGED_ASSET_CHAINS: &[&str] = &["rococo_assethub", "statemint", "statemine"];

/// Chains that only expose an EVM RPC, with no Substrate layer.
pub const PURE_EVM_CHAINS: &[&str] = &[
    "binance",
    "binance_test",
    "ethereum",
    "ethereum_goerli",
    "astarEvm",
    "shidenEvm",
    "shibuyaEvm",
    "crabEvm",
    "pangolinEvm",
    "cloverEvm",
    "boba_rinkeby",
    "boba",
    "bobabase",
    "bobabeam",
    "watr_network_evm",
];

/// Manta chains keep shielded "zk" assets in pallet-assets; those balances
/// are not readable through `assets.account`.
pub const MANTA_ZK_CHAINS: &[&str] = &["calamari"];
pub const ZK_ASSET_PREFIX: &str = "zk";

/// Default refresh period of contract token feeds.
pub const DEFAULT_TOKEN_INTERVAL: Duration = Duration::from_secs(30);

/// Default refresh period of the EVM native balance feed.
pub const DEFAULT_EVM_NATIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Default bound on concurrent per-address calls within one tick.
pub const DEFAULT_MAX_CONCURRENT_CALLS: usize = 8;

/// Shortest accepted poll period; shorter settings are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// First four bytes of `blake2_256("PSP22::balance_of")`.
pub const PSP22_BALANCE_OF_SELECTOR: [u8; 4] = [0x65, 0x68, 0x38, 0x2f];

/// First four bytes of `keccak256("balanceOf(address)")`.
pub const ERC20_BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Service name attached to the Loki log stream.
pub const SERVICE_NAME: &str = "balance-observer";

/// Find the built-in balance group of a chain slug
pub fn chain_group_of(slug: &str) -> Option<ChainGroup> {
    CHAIN_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&slug))
        .map(|(group, _)| *group)
}

pub fn is_bridged_asset_chain(slug: &str) -> bool {
    BRIDGED_ASSET_CHAINS.contains(&slug)
}

pub fn is_known_pure_evm(slug: &str) -> bool {
    PURE_EVM_CHAINS.contains(&slug)
}

pub fn is_manta_zk_asset(origin_chain: &str, symbol: &str) -> bool {
    MANTA_ZK_CHAINS.contains(&origin_chain) && symbol.starts_with(ZK_ASSET_PREFIX)
}
