// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! ORML `Tokens::Accounts` / `OrmlTokens::Accounts` values.

use super::{DecodeError, decode_exact};
use parity_scale_codec::Decode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Decode)]
pub struct TokenAccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
}

/// Decode an ORML token account; a missing value is an empty account.
pub fn decode_token_account(raw: Option<&[u8]>) -> Result<TokenAccountData, DecodeError> {
    match raw {
        None => Ok(TokenAccountData::default()),
        Some(raw) => decode_exact("Tokens::Accounts", raw),
    }
}
