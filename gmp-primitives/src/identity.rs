// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chain-agnostic sender handles.

use std::{fmt, str::FromStr};

use alloy_primitives::{hex, Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Byte holding bit 160 of the big-endian 256-bit word.
const FLAG_BYTE: usize = 11;
/// First byte of the 20-byte account address.
const ADDRESS_OFFSET: usize = 12;

/// An opaque 256-bit sender handle: `(is_contract << 160) | address`.
///
/// Every value built through [`SenderIdentity::encode`] or accepted by
/// `TryFrom<B256>` has the upper 95 bits cleared.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct SenderIdentity(B256);

impl SenderIdentity {
    /// Packs an account address and its contract flag.
    pub fn encode(address: Address, is_contract: bool) -> Self {
        let mut word = B256::ZERO;
        word.0[FLAG_BYTE] = u8::from(is_contract);
        word.0[ADDRESS_OFFSET..].copy_from_slice(address.as_slice());
        SenderIdentity(word)
    }

    /// Returns the account address, dropping the contract flag.
    pub fn decode(&self) -> Address {
        Address::from_slice(&self.0[ADDRESS_OFFSET..])
    }

    /// Returns whether the sender is a contract account.
    pub fn is_contract(&self) -> bool {
        self.0[FLAG_BYTE] & 1 == 1
    }

    /// The 32-byte word that is hashed and placed in call data.
    pub fn as_bytes32(&self) -> &B256 {
        &self.0
    }
}

impl TryFrom<B256> for SenderIdentity {
    type Error = Error;

    fn try_from(word: B256) -> Result<Self, Self::Error> {
        let high_bits_clear =
            word.0[..FLAG_BYTE].iter().all(|byte| *byte == 0) && word.0[FLAG_BYTE] <= 1;
        if !high_bits_clear {
            return Err(Error::InvalidSenderIdentity(word));
        }
        Ok(SenderIdentity(word))
    }
}

impl From<SenderIdentity> for B256 {
    fn from(identity: SenderIdentity) -> Self {
        identity.0
    }
}

impl fmt::Display for SenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for SenderIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        B256::from_str(s)?.try_into()
    }
}

impl Serialize for SenderIdentity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SenderIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let word = B256::deserialize(deserializer)?;
        SenderIdentity::try_from(word).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "unit_tests/identity_tests.rs"]
mod tests;
