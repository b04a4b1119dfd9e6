// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Call payloads and reply decoders for contract-held token balances.
//!
//! - PSP22: ink! message `PSP22::balance_of(owner)`, reply `Result<u128, LangError>`.
//! - ERC20: `balanceOf(address)`, reply one big-endian 32-byte word.
//! - GRC20: Gear fungible token `FTAction::BalanceOf(actor)`, reply `FTEvent::Balance(u128)`.
//! - VFT: Sails service call `("Vft", "BalanceOf", actor)`, reply `("Vft", "BalanceOf", U256)`.

use super::{DecodeError, decode_exact};
use crate::consts::{ERC20_BALANCE_OF_SELECTOR, PSP22_BALANCE_OF_SELECTOR};
use parity_scale_codec::{Decode, Encode};
use primitive_types::U256;

// ================================================================================================
// PSP22
// ================================================================================================

pub fn encode_psp22_balance_of(owner: &[u8; 32]) -> Vec<u8> {
    let mut input = PSP22_BALANCE_OF_SELECTOR.to_vec();
    owner.encode_to(&mut input);
    input
}

pub fn decode_psp22_balance(reply: &[u8]) -> Result<u128, DecodeError> {
    // LangError is a single-variant enum encoded as one byte
    let result: Result<u128, u8> = decode_exact("PSP22::balance_of reply", reply)?;
    result.map_err(|code| DecodeError::UnexpectedReply {
        what: "PSP22::balance_of",
        reason: format!("contract returned LangError({code})"),
    })
}

// ================================================================================================
// ERC20
// ================================================================================================

pub fn encode_erc20_balance_of(owner: &[u8; 20]) -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&ERC20_BALANCE_OF_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(owner);
    data
}

pub fn decode_erc20_balance(reply: &[u8]) -> Result<U256, DecodeError> {
    if reply.len() != 32 {
        return Err(DecodeError::UnexpectedReply {
            what: "balanceOf",
            reason: format!("expected a 32 byte word, got {} bytes", reply.len()),
        });
    }
    Ok(U256::from_big_endian(reply))
}

// ================================================================================================
// GRC20
// ================================================================================================

#[derive(Debug, Encode)]
#[allow(dead_code)]
enum FungibleTokenAction {
    #[codec(index = 5)]
    BalanceOf([u8; 32]),
}

#[derive(Debug, Decode)]
#[allow(dead_code)]
enum FungibleTokenEvent {
    #[codec(index = 0)]
    Transfer {
        from: [u8; 32],
        to: [u8; 32],
        amount: u128,
    },
    #[codec(index = 1)]
    Approve {
        from: [u8; 32],
        to: [u8; 32],
        amount: u128,
    },
    #[codec(index = 2)]
    TotalSupply(u128),
    #[codec(index = 3)]
    Balance(u128),
}

pub fn encode_grc20_balance_of(actor: &[u8; 32]) -> Vec<u8> {
    FungibleTokenAction::BalanceOf(*actor).encode()
}

pub fn decode_grc20_balance(reply: &[u8]) -> Result<u128, DecodeError> {
    match decode_exact::<FungibleTokenEvent>("GRC20 reply", reply)? {
        FungibleTokenEvent::Balance(balance) => Ok(balance),
        other => Err(DecodeError::UnexpectedReply {
            what: "GRC20 BalanceOf",
            reason: format!("{other:?}"),
        }),
    }
}

// ================================================================================================
// VFT
// ================================================================================================

const VFT_SERVICE: &str = "Vft";
const VFT_BALANCE_OF: &str = "BalanceOf";

pub fn encode_vft_balance_of(actor: &[u8; 32]) -> Vec<u8> {
    (VFT_SERVICE, VFT_BALANCE_OF, actor).encode()
}

pub fn decode_vft_balance(reply: &[u8]) -> Result<U256, DecodeError> {
    let (service, method, value): (String, String, [u8; 32]) = decode_exact("VFT reply", reply)?;
    if service != VFT_SERVICE || method != VFT_BALANCE_OF {
        return Err(DecodeError::UnexpectedReply {
            what: "Vft/BalanceOf",
            reason: format!("reply routed to {service}/{method}"),
        });
    }
    Ok(U256::from_little_endian(&value))
}
