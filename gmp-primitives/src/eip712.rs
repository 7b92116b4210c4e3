// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! EIP-712 structured hashing of the gateway messages.
//!
//! Every struct hash starts with the hash of the schema's type string, so two
//! schemas whose fields happen to encode to the same bytes never share a digest.
//! Signing hashes then bind the struct hash to a gateway through its domain
//! separator.

use std::sync::LazyLock;

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::data_types::{GmpMessage, NetworkInfoUpdate, SignerKey, SignerKeySetUpdate};

// -- EIP-712 type strings --
//
// Referenced struct types are appended after the primary type, sorted alphabetically.

pub const TSS_KEY_TYPE: &str = "TssKey(uint8 yParity,uint256 xCoord)";

pub const UPDATE_KEYS_TYPE: &str = "\
UpdateKeysMessage(TssKey[] revoke,TssKey[] register)\
TssKey(uint8 yParity,uint256 xCoord)";

pub const UPDATE_NETWORK_INFO_TYPE: &str = "\
UpdateNetworkInfo(\
uint16 networkId,\
bytes32 domainSeparator,\
uint64 gasLimit,\
uint64 relativeGasPrice,\
uint128 baseFee,\
uint64 mortality\
)";

pub const GMP_MESSAGE_TYPE: &str = "\
GmpMessage(\
bytes32 source,\
uint16 srcNetwork,\
address dest,\
uint16 destNetwork,\
uint256 gasLimit,\
uint256 salt,\
bytes data\
)";

// -- Precomputed type hashes --

static TSS_KEY_TYPE_HASH: LazyLock<B256> = LazyLock::new(|| keccak256(TSS_KEY_TYPE));
static UPDATE_KEYS_TYPE_HASH: LazyLock<B256> = LazyLock::new(|| keccak256(UPDATE_KEYS_TYPE));
static UPDATE_NETWORK_INFO_TYPE_HASH: LazyLock<B256> =
    LazyLock::new(|| keccak256(UPDATE_NETWORK_INFO_TYPE));
static GMP_MESSAGE_TYPE_HASH: LazyLock<B256> = LazyLock::new(|| keccak256(GMP_MESSAGE_TYPE));

/// The message schemas known to the gateway.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Schema {
    TssKey,
    UpdateKeys,
    UpdateNetworkInfo,
    GmpMessage,
}

impl Schema {
    pub const ALL: [Schema; 4] = [
        Schema::TssKey,
        Schema::UpdateKeys,
        Schema::UpdateNetworkInfo,
        Schema::GmpMessage,
    ];

    /// The canonical EIP-712 type string.
    pub fn type_string(&self) -> &'static str {
        match self {
            Schema::TssKey => TSS_KEY_TYPE,
            Schema::UpdateKeys => UPDATE_KEYS_TYPE,
            Schema::UpdateNetworkInfo => UPDATE_NETWORK_INFO_TYPE,
            Schema::GmpMessage => GMP_MESSAGE_TYPE,
        }
    }

    /// `keccak256(type_string)`. Changing it changes every digest of the schema.
    pub fn type_hash(&self) -> B256 {
        match self {
            Schema::TssKey => *TSS_KEY_TYPE_HASH,
            Schema::UpdateKeys => *UPDATE_KEYS_TYPE_HASH,
            Schema::UpdateNetworkInfo => *UPDATE_NETWORK_INFO_TYPE_HASH,
            Schema::GmpMessage => *GMP_MESSAGE_TYPE_HASH,
        }
    }
}

/// A message with an EIP-712 struct hash.
pub trait Eip712Struct {
    const SCHEMA: Schema;

    /// `hashStruct(self) = keccak256(typeHash || encodeData(self))`.
    fn hash_struct(&self) -> B256;

    /// The digest signed by the signer set for this message on the gateway
    /// identified by `domain_separator`.
    fn eip712_signing_hash(&self, domain_separator: &B256) -> B256 {
        typed_hash(domain_separator, &self.hash_struct())
    }
}

// -- ABI word encoding --

fn encode_u16(value: u16) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[30..32].copy_from_slice(&value.to_be_bytes());
    word
}

/// Left-pads a u64 to 32 bytes (big-endian).
fn encode_u64(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..32].copy_from_slice(&value.to_be_bytes());
    word
}

/// Left-pads a u128 to 32 bytes (big-endian).
fn encode_u128(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..32].copy_from_slice(&value.to_be_bytes());
    word
}

fn encode_u256(value: &U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

fn encode_u8(value: u8) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = value;
    word
}

fn encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_slice());
    word
}

/// Encodes a dynamic array of struct hashes: `keccak256(concat(hashStruct(elem)...))`.
/// Empty arrays produce `keccak256(b"")`.
pub fn encode_hash_array(hashes: &[B256]) -> B256 {
    let mut buf = Vec::with_capacity(hashes.len() * 32);
    for hash in hashes {
        buf.extend_from_slice(hash.as_slice());
    }
    keccak256(&buf)
}

/// Hashes an ordered list of signer keys. Order matters; keys are never sorted.
pub fn hash_signer_keys(keys: &[SignerKey]) -> B256 {
    let hashes: Vec<B256> = keys.iter().map(SignerKey::hash_struct).collect();
    encode_hash_array(&hashes)
}

/// Returns `keccak256("\x19\x01" || domain_separator || struct_hash)`.
pub fn typed_hash(domain_separator: &B256, struct_hash: &B256) -> B256 {
    let mut buf = [0u8; 2 + 32 + 32];
    buf[..2].copy_from_slice(b"\x19\x01");
    buf[2..34].copy_from_slice(domain_separator.as_slice());
    buf[34..].copy_from_slice(struct_hash.as_slice());
    keccak256(buf)
}

// -- Struct hashing --

impl Eip712Struct for SignerKey {
    const SCHEMA: Schema = Schema::TssKey;

    fn hash_struct(&self) -> B256 {
        let mut buf = Vec::with_capacity(3 * 32);
        buf.extend_from_slice(TSS_KEY_TYPE_HASH.as_slice());
        buf.extend_from_slice(&encode_u8(u8::from(self.y_parity)));
        buf.extend_from_slice(&encode_u256(&self.x_coord));
        keccak256(&buf)
    }
}

impl Eip712Struct for SignerKeySetUpdate {
    const SCHEMA: Schema = Schema::UpdateKeys;

    fn hash_struct(&self) -> B256 {
        let mut buf = Vec::with_capacity(3 * 32);
        buf.extend_from_slice(UPDATE_KEYS_TYPE_HASH.as_slice());
        buf.extend_from_slice(hash_signer_keys(&self.revoke).as_slice());
        buf.extend_from_slice(hash_signer_keys(&self.register).as_slice());
        keccak256(&buf)
    }
}

impl Eip712Struct for NetworkInfoUpdate {
    const SCHEMA: Schema = Schema::UpdateNetworkInfo;

    /// `mortality` is part of the type string but not of the encoded data.
    fn hash_struct(&self) -> B256 {
        let mut buf = Vec::with_capacity(6 * 32);
        buf.extend_from_slice(UPDATE_NETWORK_INFO_TYPE_HASH.as_slice());
        buf.extend_from_slice(&encode_u16(self.network_id));
        buf.extend_from_slice(self.domain_separator.as_slice());
        buf.extend_from_slice(&encode_u64(self.gas_limit));
        buf.extend_from_slice(&encode_u64(self.relative_gas_price.raw()));
        buf.extend_from_slice(&encode_u128(self.base_fee));
        keccak256(&buf)
    }
}

impl Eip712Struct for GmpMessage {
    const SCHEMA: Schema = Schema::GmpMessage;

    fn hash_struct(&self) -> B256 {
        hash_gmp_message(self, &keccak256(&self.data))
    }
}

/// `hashStruct(GmpMessage)` given the already computed `keccak256(data)`.
pub(crate) fn hash_gmp_message(message: &GmpMessage, data_hash: &B256) -> B256 {
    let mut buf = [0u8; 8 * 32];
    let words = [
        GMP_MESSAGE_TYPE_HASH.0,
        message.source.as_bytes32().0,
        encode_u16(message.src_network),
        encode_address(&message.dest),
        encode_u16(message.dest_network),
        encode_u256(&message.gas_limit),
        encode_u256(&message.salt),
        data_hash.0,
    ];
    for (chunk, word) in buf.chunks_exact_mut(32).zip(words.iter()) {
        chunk.copy_from_slice(word);
    }
    keccak256(buf)
}

#[cfg(test)]
#[path = "unit_tests/eip712_tests.rs"]
mod tests;
