// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Boundary to the chain connectivity layer.
//!
//! The observer never opens connections itself: callers hand in one
//! Substrate-style and/or one EVM-style client per chain slug.

use async_trait::async_trait;
use futures::stream::BoxStream;
use primitive_types::U256;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ClientError {
    #[error("Client is not ready: {0}")]
    NotReady(String),

    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("Storage entry {0} is not available on this runtime")]
    StorageUnavailable(String),

    #[error("Subscription was closed by the node")]
    SubscriptionClosed,

    #[error("Contract call failed: {0}")]
    Contract(String),
}

/// One component of a storage map key, hashed by the client with the
/// hasher declared in the runtime metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyArg {
    /// Account in the chain's native format (SS58 or 20-byte hex).
    Account(String),
    /// Numeric or string asset identifier.
    AssetId(String),
    /// Structured value such as an ORML currency id or an XCM location.
    Json(Value),
}

impl fmt::Display for KeyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyArg::Account(account) => write!(f, "{account}"),
            KeyArg::AssetId(id) => write!(f, "{id}"),
            KeyArg::Json(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageKey {
    pub pallet: &'static str,
    pub entry: &'static str,
    pub args: Vec<KeyArg>,
}

impl StorageKey {
    pub fn new(pallet: &'static str, entry: &'static str, args: Vec<KeyArg>) -> Self {
        Self { pallet, entry, args }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.pallet, self.entry)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// Each item holds the current raw value of every subscribed key, in key
/// order; `None` for keys with no stored value.
pub type StorageStream = BoxStream<'static, Result<Vec<Option<Vec<u8>>>, ClientError>>;

#[async_trait]
pub trait SubstrateClient: Send + Sync {
    /// Resolves once the client is connected and has runtime metadata.
    async fn wait_ready(&self) -> Result<(), ClientError>;

    /// Whether the runtime declares `pallet.entry` in its metadata.
    async fn has_storage(&self, pallet: &str, entry: &str) -> bool;

    /// Subscribe to the values of `keys`; the stream yields on every change.
    async fn subscribe_storage(&self, keys: Vec<StorageKey>) -> Result<StorageStream, ClientError>;

    /// Dry-run an ink! message and return the raw return data.
    async fn contract_call(
        &self,
        contract: &str,
        caller: &str,
        input: Vec<u8>,
    ) -> Result<Vec<u8>, ClientError>;

    /// Compute a Gear program's reply payload without sending a message.
    async fn calculate_reply(
        &self,
        program: &str,
        origin: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, ClientError>;
}

#[async_trait]
pub trait EvmClient: Send + Sync {
    async fn wait_ready(&self) -> Result<(), ClientError>;

    /// `eth_getBalance` at the latest block.
    async fn balance(&self, address: &str) -> Result<U256, ClientError>;

    /// `eth_call` at the latest block.
    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ClientError>;
}

pub type SubstrateClients = HashMap<String, Arc<dyn SubstrateClient>>;
pub type EvmClients = HashMap<String, Arc<dyn EvmClient>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_storage_key_display() {
        let key = StorageKey::new(
            "Tokens",
            "Accounts",
            vec![
                KeyArg::Account("5Grw".to_string()),
                KeyArg::Json(json!({"Token": "KSM"})),
            ],
        );
        assert_eq!(key.to_string(), r#"Tokens.Accounts(5Grw, {"Token":"KSM"})"#);

        let key = StorageKey::new("System", "Account", vec![KeyArg::Account("5Grw".to_string())]);
        assert_eq!(key.to_string(), "System.Account(5Grw)");
    }
}
