// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Equilibrium runtimes keep every asset balance inside `System::Account`.

use super::{DecodeError, decode_exact};
use parity_scale_codec::Decode;

#[derive(Debug, Clone, PartialEq, Eq, Decode)]
#[cfg_attr(test, derive(parity_scale_codec::Encode))]
pub enum SignedBalance {
    Positive(u128),
    Negative(u128),
}

#[derive(Debug, Clone, Decode)]
#[cfg_attr(test, derive(parity_scale_codec::Encode))]
#[allow(dead_code)]
enum EqAccountData {
    V0 {
        lock: u128,
        balance: Vec<(u64, SignedBalance)>,
    },
}

#[derive(Debug, Clone, Decode)]
#[cfg_attr(test, derive(parity_scale_codec::Encode))]
#[allow(dead_code)]
struct EqAccountInfo {
    nonce: u32,
    consumers: u32,
    providers: u32,
    sufficients: u32,
    data: EqAccountData,
}

/// Per-asset balances of one account; empty when the account does not exist.
pub fn decode_eq_balances(raw: Option<&[u8]>) -> Result<Vec<(u64, SignedBalance)>, DecodeError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let info: EqAccountInfo = decode_exact("System::Account (Equilibrium)", raw)?;
    let EqAccountData::V0 { balance, .. } = info.data;
    Ok(balance)
}

/// Positive balance held for `asset_id`, zero for debts or missing entries.
pub fn positive_balance_of(balances: &[(u64, SignedBalance)], asset_id: u64) -> u128 {
    balances
        .iter()
        .find(|(id, _)| *id == asset_id)
        .map(|(_, balance)| match balance {
            SignedBalance::Positive(amount) => *amount,
            SignedBalance::Negative(_) => 0,
        })
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) fn encode_eq_account(balances: Vec<(u64, SignedBalance)>) -> Vec<u8> {
    use parity_scale_codec::Encode;

    EqAccountInfo {
        nonce: 0,
        consumers: 0,
        providers: 1,
        sufficients: 0,
        data: EqAccountData::V0 {
            lock: 0,
            balance: balances,
        },
    }
    .encode()
}
