// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! Builds the `onGmpReceived` call for a GMP message together with the message id.
//!
//! The call data has the following layout, matching the Solidity ABI encoding of
//! `onGmpReceived(bytes32 id, uint128 network, bytes32 source, bytes payload)`:
//!
//! ```text
//! offset  size         content
//! 0       4            selector
//! 4       32           id (EIP-712 signing hash of the message)
//! 36      32           source network
//! 68      32           source identity
//! 100     32           offset of `payload` in the arguments (0x80)
//! 132     32           payload length
//! 164     len + pad    payload, zero-padded to a multiple of 32 bytes
//! ```
//!
//! The payload is copied once, into its final position, and the nested
//! `keccak256(data)` of the message hash is computed over that copy.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use tracing::trace;

use crate::{
    abi::IGmpReceiver::onGmpReceivedCall,
    data_types::GmpMessage,
    eip712::{hash_gmp_message, typed_hash},
};

const SELECTOR_SIZE: usize = 4;
const WORD_SIZE: usize = 32;

const ID_OFFSET: usize = SELECTOR_SIZE;
const NETWORK_OFFSET: usize = ID_OFFSET + WORD_SIZE;
const SOURCE_OFFSET: usize = NETWORK_OFFSET + WORD_SIZE;
const PAYLOAD_HEAD_OFFSET: usize = SOURCE_OFFSET + WORD_SIZE;
const PAYLOAD_LENGTH_OFFSET: usize = PAYLOAD_HEAD_OFFSET + WORD_SIZE;
const PAYLOAD_OFFSET: usize = PAYLOAD_LENGTH_OFFSET + WORD_SIZE;

/// Position of the payload tail relative to the start of the arguments.
const PAYLOAD_ARGUMENT_POSITION: u64 = (PAYLOAD_LENGTH_OFFSET - SELECTOR_SIZE) as u64;

/// A GMP message ready to be dispatched to its recipient.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GmpCallback {
    /// The EIP-712 signing hash of the message, also its unique id.
    pub id: B256,
    /// The recipient contract.
    pub dest: Address,
    /// The gas limit of the call.
    pub gas_limit: U256,
    /// The ABI-encoded `onGmpReceived` call.
    pub calldata: Bytes,
}

impl GmpCallback {
    /// Computes the id of `message` under `domain_separator` and builds its call data.
    #[tracing::instrument(level = "trace", skip_all, fields(src_network = message.src_network))]
    pub fn build(message: &GmpMessage, domain_separator: &B256) -> Self {
        let payload_len = message.data.len();
        let mut calldata = vec![0u8; calldata_size(payload_len)];

        calldata[..SELECTOR_SIZE].copy_from_slice(&onGmpReceivedCall::SELECTOR);
        write_word(
            &mut calldata,
            NETWORK_OFFSET,
            &U256::from(message.src_network).to_be_bytes::<32>(),
        );
        write_word(&mut calldata, SOURCE_OFFSET, &message.source.as_bytes32().0);
        write_word(
            &mut calldata,
            PAYLOAD_HEAD_OFFSET,
            &U256::from(PAYLOAD_ARGUMENT_POSITION).to_be_bytes::<32>(),
        );
        write_word(
            &mut calldata,
            PAYLOAD_LENGTH_OFFSET,
            &U256::from(payload_len).to_be_bytes::<32>(),
        );

        let payload = &mut calldata[PAYLOAD_OFFSET..PAYLOAD_OFFSET + payload_len];
        payload.copy_from_slice(&message.data);
        let data_hash = keccak256(payload);

        let id = typed_hash(domain_separator, &hash_gmp_message(message, &data_hash));
        write_word(&mut calldata, ID_OFFSET, &id.0);
        trace!(%id, calldata_len = calldata.len(), "built GMP callback");

        GmpCallback {
            id,
            dest: message.dest,
            gas_limit: message.gas_limit,
            calldata: calldata.into(),
        }
    }
}

/// The exact size of the call data for a payload of `payload_len` bytes.
pub fn calldata_size(payload_len: usize) -> usize {
    PAYLOAD_OFFSET + payload_len.div_ceil(WORD_SIZE) * WORD_SIZE
}

fn write_word(buffer: &mut [u8], offset: usize, word: &[u8; 32]) {
    buffer[offset..offset + WORD_SIZE].copy_from_slice(word);
}

#[cfg(test)]
#[path = "unit_tests/callback_tests.rs"]
mod tests;
