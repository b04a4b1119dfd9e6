// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! `NominationPools::PoolMembers` and `DelegatedStaking::Delegators` values.

use super::{DecodeError, decode_exact};
use parity_scale_codec::Decode;
use std::collections::BTreeMap;

// ================================================================================================
// SCALE Decode Types
// ================================================================================================

/// Pool member with reward counter (current runtimes).
#[derive(Debug, Clone, Decode)]
#[allow(dead_code)]
struct PoolMemberV2 {
    pool_id: u32,
    points: u128,
    last_recorded_reward_counter: u128,
    unbonding_eras: BTreeMap<u32, u128>,
}

/// Pool member before reward counters were introduced.
#[derive(Debug, Clone, Decode)]
#[allow(dead_code)]
struct PoolMemberV1 {
    pool_id: u32,
    points: u128,
    unbonding_eras: BTreeMap<u32, u128>,
}

/// Delegation held by an agent on behalf of a pool member.
#[derive(Debug, Clone, Decode)]
#[allow(dead_code)]
struct Delegation {
    agent: [u8; 32],
    amount: u128,
}

// ================================================================================================
// Public Data Types
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMember {
    pub pool_id: u32,
    pub points: u128,
    pub unbonding_eras: BTreeMap<u32, u128>,
}

impl PoolMember {
    /// Active points plus everything still unbonding.
    pub fn total_stake(&self) -> u128 {
        self.unbonding_eras
            .values()
            .fold(self.points, |acc, amount| acc.saturating_add(*amount))
    }
}

/// Decode a pool member record, falling back to the V1 layout.
pub fn decode_pool_member(raw: Option<&[u8]>) -> Result<Option<PoolMember>, DecodeError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(member) = decode_exact::<PoolMemberV2>("NominationPools::PoolMembers", raw) {
        return Ok(Some(PoolMember {
            pool_id: member.pool_id,
            points: member.points,
            unbonding_eras: member.unbonding_eras,
        }));
    }

    let member: PoolMemberV1 = decode_exact("NominationPools::PoolMembers (v1)", raw)?;
    Ok(Some(PoolMember {
        pool_id: member.pool_id,
        points: member.points,
        unbonding_eras: member.unbonding_eras,
    }))
}

/// Whether a `DelegatedStaking::Delegators` record exists for the member.
///
/// Members with a record hold their pool stake on their own account.
pub fn decode_delegation(raw: Option<&[u8]>) -> Result<bool, DecodeError> {
    match raw {
        None => Ok(false),
        Some(raw) => decode_exact::<Delegation>("DelegatedStaking::Delegators", raw).map(|_| true),
    }
}
