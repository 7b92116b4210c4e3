// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::B256;
use thiserror::Error;

/// Errors raised at the decoding and configuration edges of the crate.
///
/// The hashing pipeline itself is infallible.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ABI decoding failed: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("Unknown inbound command discriminant {0}")]
    UnknownCommand(u8),

    #[error("Sender identity {0} has bits set above the contract flag")]
    InvalidSenderIdentity(B256),

    #[error("Invalid hex string: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("Value of `{field}` does not fit in {bits} bits")]
    ValueOutOfRange { field: &'static str, bits: u32 },

    #[error("Network {0} is configured more than once")]
    DuplicateNetwork(u16),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
