// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns pallet-specific account data into `{free, locked}` balance items.
//!
//! All arithmetic saturates; no rule can produce a negative amount.

use crate::runtime_queries::assets_common::AssetAccountData;
use crate::runtime_queries::system::{FrozenBalance, SystemAccountData};
use crate::runtime_queries::tokens::TokenAccountData;
use crate::types::{BalanceItem, OperationContext, SubstrateBalanceInfo};
use primitive_types::U256;

/// Spendable part of `free` for the given operation.
///
/// `untouchable` is the part of `free` held back by freezes. Operations that
/// must keep the account alive additionally withhold the existential
/// deposit; transfers and calls without context do not.
pub fn transferable(
    free: u128,
    untouchable: u128,
    existential_deposit: u128,
    context: Option<&OperationContext>,
) -> u128 {
    let reserve = match context {
        Some(ctx) if ctx.keeps_account_alive() => existential_deposit,
        _ => 0,
    };
    free.saturating_sub(untouchable.max(reserve))
}

/// Nomination pool stake of one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolStake {
    #[default]
    None,
    /// Stake transferred to the pool account; not part of the account balance.
    Transferred(u128),
    /// Stake held on the member account through delegated staking.
    Delegated(u128),
}

impl PoolStake {
    pub fn amount(&self) -> u128 {
        match self {
            PoolStake::None => 0,
            PoolStake::Transferred(amount) | PoolStake::Delegated(amount) => *amount,
        }
    }

    /// Stake that `locked` must account for on top of the account's own data.
    fn off_account(&self) -> u128 {
        match self {
            PoolStake::Transferred(amount) => *amount,
            _ => 0,
        }
    }
}

pub fn normalize_system_account(
    address: &str,
    token_slug: &str,
    account: &SystemAccountData,
    pool: PoolStake,
    existential_deposit: u128,
    context: Option<&OperationContext>,
) -> BalanceItem {
    let (untouchable, frozen, misc_frozen, fee_frozen) = match account.frozen {
        FrozenBalance::Modern(frozen) => (frozen.saturating_sub(account.reserved), frozen, None, None),
        FrozenBalance::Legacy {
            misc_frozen,
            fee_frozen,
        } => (
            misc_frozen.max(fee_frozen),
            misc_frozen.max(fee_frozen),
            Some(misc_frozen),
            Some(fee_frozen),
        ),
    };

    let free = transferable(account.free, untouchable, existential_deposit, context);
    let total = account.free.saturating_add(account.reserved);
    let locked = total
        .saturating_sub(free)
        .saturating_add(pool.off_account());

    BalanceItem::ready(address, token_slug, free, locked).with_metadata(SubstrateBalanceInfo {
        reserved: account.reserved,
        frozen,
        misc_frozen,
        fee_frozen,
        pooled: (pool != PoolStake::None).then(|| pool.amount()),
        sufficient: None,
    })
}

/// ORML-style token account: `free` already excludes `reserved`, and
/// `frozen` applies to `free`.
pub fn normalize_token_account(
    address: &str,
    token_slug: &str,
    account: &TokenAccountData,
    existential_deposit: u128,
    context: Option<&OperationContext>,
) -> BalanceItem {
    let free = transferable(account.free, account.frozen, existential_deposit, context);
    let locked = account.frozen.saturating_add(account.reserved);

    BalanceItem::ready(address, token_slug, free, locked).with_metadata(SubstrateBalanceInfo {
        reserved: account.reserved,
        frozen: account.frozen,
        ..Default::default()
    })
}

/// pallet-assets / foreign-assets account: a frozen or blocked account has
/// its whole balance locked.
pub fn normalize_asset_account(
    address: &str,
    token_slug: &str,
    account: &AssetAccountData,
    min_balance: u128,
    context: Option<&OperationContext>,
) -> BalanceItem {
    let (free, locked) = if account.frozen {
        (0, account.balance)
    } else {
        (transferable(account.balance, 0, min_balance, context), 0)
    };

    BalanceItem::ready(address, token_slug, free, locked).with_metadata(SubstrateBalanceInfo {
        reserved: 0,
        frozen: locked,
        sufficient: Some(account.sufficient),
        ..Default::default()
    })
}

/// Contract-held balances have no locked part.
pub fn normalize_contract_balance(address: &str, token_slug: &str, balance: U256) -> BalanceItem {
    BalanceItem {
        free: balance.to_string(),
        ..BalanceItem::zero(address, token_slug)
    }
}
