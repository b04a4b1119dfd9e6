// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pallet layouts for local and bridged tokens.

use super::FeedError;
use super::subscription::TokenStorage;
use crate::client::{KeyArg, StorageKey};
use crate::normalizer::{normalize_asset_account, normalize_token_account};
use crate::runtime_queries::DecodeError;
use crate::runtime_queries::assets_common::decode_asset_account;
use crate::runtime_queries::tokens::decode_token_account;
use crate::types::{AssetDescriptor, BalanceItem, OperationContext};

fn missing(token: &AssetDescriptor, field: &'static str) -> FeedError {
    FeedError::MissingTokenField {
        token: token.slug.clone(),
        field,
    }
}

/// ORML currency id: the structured on-chain info when present, else the asset id.
fn currency_id(token: &AssetDescriptor) -> Result<KeyArg, FeedError> {
    if let Some(info) = &token.on_chain_info {
        return Ok(KeyArg::Json(info.clone()));
    }
    token
        .asset_id
        .clone()
        .map(KeyArg::AssetId)
        .ok_or_else(|| missing(token, "on-chain info or asset id"))
}

// ================================================================================================
// Tokens::Accounts
// ================================================================================================

pub(crate) struct TokensPallet;

impl TokenStorage for TokensPallet {
    fn keys(&self, token: &AssetDescriptor, addresses: &[String]) -> Result<Vec<StorageKey>, FeedError> {
        let currency = currency_id(token)?;
        Ok(addresses
            .iter()
            .map(|address| {
                StorageKey::new(
                    "Tokens",
                    "Accounts",
                    vec![KeyArg::Account(address.clone()), currency.clone()],
                )
            })
            .collect())
    }

    fn normalize(
        &self,
        token: &AssetDescriptor,
        address: &str,
        raw: Option<&[u8]>,
        context: Option<&OperationContext>,
    ) -> Result<BalanceItem, DecodeError> {
        let account = decode_token_account(raw)?;
        Ok(normalize_token_account(address, &token.slug, &account, token.min_amount, context))
    }
}

// ================================================================================================
// OrmlTokens::Accounts
// ================================================================================================

pub(crate) struct OrmlTokensPallet;

impl TokenStorage for OrmlTokensPallet {
    fn keys(&self, token: &AssetDescriptor, addresses: &[String]) -> Result<Vec<StorageKey>, FeedError> {
        let currency = token
            .on_chain_info
            .clone()
            .ok_or_else(|| missing(token, "on-chain info"))?;
        Ok(addresses
            .iter()
            .map(|address| {
                StorageKey::new(
                    "OrmlTokens",
                    "Accounts",
                    vec![KeyArg::Account(address.clone()), KeyArg::Json(currency.clone())],
                )
            })
            .collect())
    }

    fn normalize(
        &self,
        token: &AssetDescriptor,
        address: &str,
        raw: Option<&[u8]>,
        context: Option<&OperationContext>,
    ) -> Result<BalanceItem, DecodeError> {
        let account = decode_token_account(raw)?;
        Ok(normalize_token_account(address, &token.slug, &account, token.min_amount, context))
    }
}

// ================================================================================================
// Assets::Account
// ================================================================================================

pub(crate) struct AssetsPallet;

impl TokenStorage for AssetsPallet {
    fn keys(&self, token: &AssetDescriptor, addresses: &[String]) -> Result<Vec<StorageKey>, FeedError> {
        let asset_id = token.asset_id.clone().ok_or_else(|| missing(token, "asset id"))?;
        Ok(addresses
            .iter()
            .map(|address| {
                StorageKey::new(
                    "Assets",
                    "Account",
                    vec![KeyArg::AssetId(asset_id.clone()), KeyArg::Account(address.clone())],
                )
            })
            .collect())
    }

    fn normalize(
        &self,
        token: &AssetDescriptor,
        address: &str,
        raw: Option<&[u8]>,
        context: Option<&OperationContext>,
    ) -> Result<BalanceItem, DecodeError> {
        let account = decode_asset_account(raw)?;
        Ok(normalize_asset_account(address, &token.slug, &account, token.min_amount, context))
    }
}

// ================================================================================================
// ForeignAssets::Account
// ================================================================================================

pub(crate) struct ForeignAssetsPallet;

impl TokenStorage for ForeignAssetsPallet {
    fn keys(&self, token: &AssetDescriptor, addresses: &[String]) -> Result<Vec<StorageKey>, FeedError> {
        let location = token
            .multilocation
            .clone()
            .ok_or_else(|| missing(token, "XCM multilocation"))?;
        Ok(addresses
            .iter()
            .map(|address| {
                StorageKey::new(
                    "ForeignAssets",
                    "Account",
                    vec![KeyArg::Json(location.clone()), KeyArg::Account(address.clone())],
                )
            })
            .collect())
    }

    fn normalize(
        &self,
        token: &AssetDescriptor,
        address: &str,
        raw: Option<&[u8]>,
        context: Option<&OperationContext>,
    ) -> Result<BalanceItem, DecodeError> {
        let account = decode_asset_account(raw)?;
        Ok(normalize_asset_account(address, &token.slug, &account, token.min_amount, context))
    }
}
