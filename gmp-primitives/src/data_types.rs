// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core data types exchanged between the source chain, the relay chain and the
//! destination gateway.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{float::UFloat9x56, identity::SenderIdentity};

/// Recovery value added to the parity bit when a key is consumed on chain.
const PARITY_OFFSET: u8 = 27;

/// The public key of one TSS signer.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SignerKey {
    /// Parity of the y-coordinate.
    pub y_parity: bool,
    /// The x-coordinate.
    pub x_coord: U256,
}

impl SignerKey {
    pub fn new(y_parity: bool, x_coord: U256) -> Self {
        SignerKey { y_parity, x_coord }
    }

    /// The parity in its on-chain `{27, 28}` form.
    pub fn v(&self) -> u8 {
        PARITY_OFFSET + u8::from(self.y_parity)
    }
}

/// A Schnorr signature produced by the signer set. Opaque to this crate.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub x_coord: U256,
    pub e: U256,
    pub s: U256,
}

/// A cross-chain call request.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct GmpMessage {
    pub source: SenderIdentity,
    pub src_network: u16,
    pub dest: Address,
    pub dest_network: u16,
    pub gas_limit: U256,
    /// Chosen by the caller so that messages with identical content stay distinct.
    pub salt: U256,
    pub data: Bytes,
}

/// Signer keys to revoke and to register, applied in order.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SignerKeySetUpdate {
    pub revoke: Vec<SignerKey>,
    pub register: Vec<SignerKey>,
}

/// Economic and replay-protection parameters of a network.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfoUpdate {
    pub network_id: u16,
    pub domain_separator: B256,
    pub gas_limit: u64,
    pub relative_gas_price: UFloat9x56,
    pub base_fee: u128,
    /// Block height after which the update must be rejected. Not covered by the
    /// struct hash; it is checked when the update is consumed.
    pub mortality: u64,
}

/// A known destination chain and its gateway contract.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: u16,
    pub gateway: Address,
}
