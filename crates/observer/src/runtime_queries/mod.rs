// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SCALE decoders for the storage values and contract replies read by the feeds.
//!
//! Every decoder requires the input to be consumed entirely, so a value in
//! an unexpected layout is rejected instead of being half-read.

pub mod assets_common;
pub mod contracts;
pub mod equilibrium;
pub mod nomination_pools;
pub mod system;
pub mod tokens;

use parity_scale_codec::DecodeAll;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to decode {what}: {reason}")]
    Invalid { what: &'static str, reason: String },

    #[error("Unexpected reply to {what}: {reason}")]
    UnexpectedReply { what: &'static str, reason: String },
}

/// Decode `bytes` as `T`, failing on trailing input.
pub(crate) fn decode_exact<T: DecodeAll>(what: &'static str, bytes: &[u8]) -> Result<T, DecodeError> {
    T::decode_all(&mut &bytes[..]).map_err(|e| DecodeError::Invalid {
        what,
        reason: e.to_string(),
    })
}
