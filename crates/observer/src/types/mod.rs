// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Descriptors handed in by the chain/asset registries and the canonical
//! balance record emitted to subscribers.

pub mod address;
pub mod asset;
pub mod balance;
pub mod chain;

pub use address::{AddressKind, split_addresses};
pub use asset::{AssetDescriptor, AssetRegistry, AssetType};
pub use balance::{BalanceItem, ItemState, OperationContext, SubstrateBalanceInfo};
pub use chain::{ChainDescriptor, ChainGroup, ChainRegistry};
