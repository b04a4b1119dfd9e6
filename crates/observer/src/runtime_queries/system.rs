// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! `System::Account` values.

use super::{DecodeError, decode_exact};
use parity_scale_codec::Decode;

// ================================================================================================
// SCALE Decode Types
// ================================================================================================

/// Account data as stored by every runtime since the fungible migration.
///
/// Accounts that were never touched after the upgrade still hold the old
/// `misc_frozen`/`fee_frozen` pair in the `frozen`/`flags` slots; the high
/// bit of `flags` marks accounts that use the new semantics.
#[derive(Debug, Clone, Decode)]
struct AccountData {
    free: u128,
    reserved: u128,
    frozen: u128,
    flags: u128,
}

#[derive(Debug, Clone, Decode)]
#[allow(dead_code)]
struct AccountInfo {
    nonce: u32,
    consumers: u32,
    providers: u32,
    sufficients: u32,
    data: AccountData,
}

const IS_NEW_LOGIC: u128 = 1 << 127;

// ================================================================================================
// Public Data Types
// ================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrozenBalance {
    /// Frozen amount applies to `free + reserved`.
    Modern(u128),
    /// Frozen amounts apply to `free` only.
    Legacy { misc_frozen: u128, fee_frozen: u128 },
}

impl Default for FrozenBalance {
    fn default() -> Self {
        FrozenBalance::Modern(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemAccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: FrozenBalance,
}

// ================================================================================================
// Decoding Functions
// ================================================================================================

/// Decode a `System::Account` value; a missing value is an empty account.
pub fn decode_account_info(raw: Option<&[u8]>) -> Result<SystemAccountData, DecodeError> {
    let Some(raw) = raw else {
        return Ok(SystemAccountData::default());
    };

    let info: AccountInfo = decode_exact("System::Account", raw)?;
    let data = info.data;
    let frozen = if data.flags & IS_NEW_LOGIC != 0 {
        FrozenBalance::Modern(data.frozen)
    } else {
        FrozenBalance::Legacy {
            misc_frozen: data.frozen,
            fee_frozen: data.flags,
        }
    };

    Ok(SystemAccountData {
        free: data.free,
        reserved: data.reserved,
        frozen,
    })
}

#[cfg(test)]
pub(crate) fn encode_account_info(free: u128, reserved: u128, frozen: u128, flags: u128) -> Vec<u8> {
    use parity_scale_codec::Encode;
    (1u32, 0u32, 1u32, 0u32, free, reserved, frozen, flags).encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_account_is_empty() {
        let data = decode_account_info(None).unwrap();
        assert_eq!(data, SystemAccountData::default());
    }

    #[test]
    fn test_decode_new_logic_account() {
        let raw = encode_account_info(1_000, 200, 300, IS_NEW_LOGIC);
        let data = decode_account_info(Some(&raw)).unwrap();
        assert_eq!(data.free, 1_000);
        assert_eq!(data.reserved, 200);
        assert_eq!(data.frozen, FrozenBalance::Modern(300));
    }

    #[test]
    fn test_decode_unmigrated_account() {
        let raw = encode_account_info(1_000, 0, 40, 70);
        let data = decode_account_info(Some(&raw)).unwrap();
        assert_eq!(
            data.frozen,
            FrozenBalance::Legacy {
                misc_frozen: 40,
                fee_frozen: 70
            }
        );
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut raw = encode_account_info(1, 0, 0, 0);
        raw.push(0);
        assert!(decode_account_info(Some(&raw)).is_err());
        assert!(decode_account_info(Some(&[0u8; 10])).is_err());
    }
}
