// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Serialize;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemState {
    Pending,
    Ready,
    NotSupport,
    Cached,
}

/// Raw pallet fields carried alongside the normalized values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstrateBalanceInfo {
    #[serde(with = "as_string")]
    pub reserved: u128,
    #[serde(with = "as_string")]
    pub frozen: u128,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_as_string")]
    pub misc_frozen: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_as_string")]
    pub fee_frozen: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_as_string")]
    pub pooled: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sufficient: Option<bool>,
}

mod as_string {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }
}

mod opt_as_string {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<u128>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// One balance observation for an `(address, token)` pair.
///
/// `free` and `locked` are decimal strings in the token's smallest unit.
/// Items in the `NotSupport` state always carry zero balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceItem {
    pub address: String,
    pub token_slug: String,
    pub free: String,
    pub locked: String,
    pub state: ItemState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(rename = "substrateInfo", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SubstrateBalanceInfo>,
}

impl BalanceItem {
    pub fn ready(address: impl Into<String>, token_slug: impl Into<String>, free: u128, locked: u128) -> Self {
        Self {
            address: address.into(),
            token_slug: token_slug.into(),
            free: free.to_string(),
            locked: locked.to_string(),
            state: ItemState::Ready,
            timestamp: None,
            metadata: None,
        }
    }

    /// Zero balance in the `Ready` state, used when a feed degrades.
    pub fn zero(address: impl Into<String>, token_slug: impl Into<String>) -> Self {
        Self::ready(address, token_slug, 0, 0)
    }

    pub fn not_supported(address: impl Into<String>, token_slug: impl Into<String>) -> Self {
        Self {
            state: ItemState::NotSupport,
            ..Self::zero(address, token_slug)
        }
    }

    pub fn with_metadata(mut self, metadata: SubstrateBalanceInfo) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn stamp(&mut self, timestamp: u64) {
        self.timestamp = Some(timestamp);
    }
}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Kind of operation the caller is preparing, if any.
///
/// Transfers (including "transfer all") may spend down to zero; other
/// extrinsics, `transfer_keep_alive` included, must leave the existential
/// deposit in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationContext {
    Transfer,
    Other(String),
}

impl OperationContext {
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_ascii_lowercase();
        let compact: String = normalized.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if compact.starts_with("transfer") && !compact.contains("keepalive") {
            OperationContext::Transfer
        } else {
            OperationContext::Other(normalized)
        }
    }

    pub fn keeps_account_alive(&self) -> bool {
        !matches!(self, OperationContext::Transfer)
    }
}

impl fmt::Display for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationContext::Transfer => write!(f, "transfer"),
            OperationContext::Other(name) => write!(f, "{}", name),
        }
    }
}
