// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Account values shared by `Assets::Account` and `ForeignAssets::Account`.

use super::{DecodeError, decode_exact};
use parity_scale_codec::Decode;

// ================================================================================================
// SCALE Decode Types
// ================================================================================================

#[derive(Debug, Clone, Decode)]
pub enum AccountStatus {
    Liquid,
    Frozen,
    Blocked,
}

impl AccountStatus {
    /// Returns true if the account is frozen or blocked.
    pub fn is_frozen(&self) -> bool {
        matches!(self, AccountStatus::Frozen | AccountStatus::Blocked)
    }
}

#[derive(Debug, Clone, Decode)]
#[allow(dead_code)]
pub enum ExistenceReason {
    Consumer,
    Sufficient,
    DepositHeld(u128),
    DepositRefunded,
    DepositFrom([u8; 32], u128),
}

impl ExistenceReason {
    pub fn is_sufficient(&self) -> bool {
        matches!(self, ExistenceReason::Sufficient)
    }
}

#[derive(Debug, Clone, Decode)]
struct AssetAccount {
    balance: u128,
    status: AccountStatus,
    reason: ExistenceReason,
    #[allow(dead_code)]
    extra: (),
}

// ================================================================================================
// Public Data Types
// ================================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetAccountData {
    pub balance: u128,
    /// The whole balance is unusable.
    pub frozen: bool,
    pub sufficient: bool,
}

/// Decode an asset account; a missing value is an empty account.
///
/// Legacy runtimes store `(balance, is_frozen: bool, sufficient: bool)`.
/// Those bytes read as `Liquid`/`Frozen` and `Consumer`/`Sufficient` in the
/// current layout, so one decoder covers both.
pub fn decode_asset_account(raw: Option<&[u8]>) -> Result<AssetAccountData, DecodeError> {
    let Some(raw) = raw else {
        return Ok(AssetAccountData::default());
    };

    let account: AssetAccount = decode_exact("Assets::Account", raw)?;
    Ok(AssetAccountData {
        balance: account.balance,
        frozen: account.status.is_frozen(),
        sufficient: account.reason.is_sufficient(),
    })
}
