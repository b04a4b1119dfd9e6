// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-asset balances of Equilibrium and Genshiro runtimes.

use super::FeedError;
use super::subscription::TokenStorage;
use crate::client::{KeyArg, StorageKey};
use crate::runtime_queries::DecodeError;
use crate::runtime_queries::equilibrium::{decode_eq_balances, positive_balance_of};
use crate::types::{AssetDescriptor, BalanceItem, OperationContext};

/// Equilibrium keeps all assets, native included, in `System::Account`.
/// Only positive balances are reported and nothing is locked.
pub(crate) struct EquilibriumAccounts;

fn eq_asset_id(token: &AssetDescriptor) -> Result<u64, FeedError> {
    let raw = token.asset_id.as_deref().ok_or_else(|| FeedError::MissingTokenField {
        token: token.slug.clone(),
        field: "asset id",
    })?;
    raw.parse().map_err(|_| FeedError::InvalidTokenField {
        token: token.slug.clone(),
        field: "asset id",
        value: raw.to_string(),
    })
}

impl TokenStorage for EquilibriumAccounts {
    fn keys(&self, token: &AssetDescriptor, addresses: &[String]) -> Result<Vec<StorageKey>, FeedError> {
        eq_asset_id(token)?;
        Ok(addresses
            .iter()
            .map(|address| StorageKey::new("System", "Account", vec![KeyArg::Account(address.clone())]))
            .collect())
    }

    fn normalize(
        &self,
        token: &AssetDescriptor,
        address: &str,
        raw: Option<&[u8]>,
        _context: Option<&OperationContext>,
    ) -> Result<BalanceItem, DecodeError> {
        let asset_id = eq_asset_id(token).map_err(|e| DecodeError::Invalid {
            what: "Equilibrium asset id",
            reason: e.to_string(),
        })?;
        let balances = decode_eq_balances(raw)?;
        Ok(BalanceItem::ready(
            address,
            token.slug.as_str(),
            positive_balance_of(&balances, asset_id),
            0,
        ))
    }
}
