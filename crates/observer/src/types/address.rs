// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::types::ChainDescriptor;
use sp_core::crypto::{AccountId32, Ss58Codec};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Invalid SS58 address '{0}'")]
    InvalidSs58(String),

    #[error("Invalid EVM address '{0}'")]
    InvalidEvm(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// SS58 or raw 32-byte public key.
    Substrate,
    /// `0x`-prefixed 20-byte account.
    Evm,
}

fn strip_hex_prefix(address: &str) -> Option<&str> {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
}

fn is_hex_of_len(body: &str, len: usize) -> bool {
    body.len() == len && body.chars().all(|c| c.is_ascii_hexdigit())
}

/// Detect the address format, `None` when it is neither.
pub fn classify(address: &str) -> Option<AddressKind> {
    if let Some(body) = strip_hex_prefix(address) {
        if is_hex_of_len(body, 40) {
            return Some(AddressKind::Evm);
        }
        if is_hex_of_len(body, 64) {
            return Some(AddressKind::Substrate);
        }
        return None;
    }

    AccountId32::from_ss58check(address)
        .ok()
        .map(|_| AddressKind::Substrate)
}

/// Decode a Substrate address into its 32-byte account id.
pub fn account_id(address: &str) -> Result<[u8; 32], AddressError> {
    if let Some(body) = strip_hex_prefix(address) {
        let bytes = hex::decode(body).map_err(|_| AddressError::InvalidSs58(address.to_string()))?;
        return <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| AddressError::InvalidSs58(address.to_string()));
    }

    AccountId32::from_ss58check(address)
        .map(<[u8; 32]>::from)
        .map_err(|_| AddressError::InvalidSs58(address.to_string()))
}

/// Decode a `0x`-prefixed EVM address.
pub fn evm_address(address: &str) -> Result<[u8; 20], AddressError> {
    let body = strip_hex_prefix(address).ok_or_else(|| AddressError::InvalidEvm(address.to_string()))?;
    let bytes = hex::decode(body).map_err(|_| AddressError::InvalidEvm(address.to_string()))?;
    <[u8; 20]>::try_from(bytes.as_slice()).map_err(|_| AddressError::InvalidEvm(address.to_string()))
}

/// Partition `addresses` into those usable on `chain` and those that are not.
///
/// Chains flagged `evm_compatible` take EVM addresses only: they are
/// Moonbeam-style runtimes whose accounts are 20-byte keys, so a Substrate
/// address is reported as not supported there even though the same flag
/// also enables the ERC20 feed. Every other chain takes Substrate
/// addresses. Unparseable addresses are never usable.
pub fn split_addresses(addresses: &[String], chain: &ChainDescriptor) -> (Vec<String>, Vec<String>) {
    let wanted = if chain.evm_compatible || chain.is_pure_evm() {
        AddressKind::Evm
    } else {
        AddressKind::Substrate
    };

    addresses
        .iter()
        .cloned()
        .partition(|address| classify(address) == Some(wanted))
}
