// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use alloy_primitives::{address, keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{Eip712Domain, SolStruct};
use test_case::test_case;
use test_strategy::proptest;

use super::*;
use crate::{abi, float::UFloat9x56, identity::SenderIdentity};

fn key(y_parity: bool, x_coord: u64) -> SignerKey {
    SignerKey::new(y_parity, U256::from(x_coord))
}

fn word(value: u64) -> [u8; 32] {
    U256::from(value).to_be_bytes::<32>()
}

fn gmp_message(data: &[u8]) -> GmpMessage {
    GmpMessage {
        source: SenderIdentity::encode(
            address!("0x0000000000000000000000000000000000000001"),
            false,
        ),
        src_network: 1,
        dest: address!("0x0000000000000000000000000000000000000002"),
        dest_network: 2,
        gas_limit: U256::from(100_000),
        salt: U256::from(42),
        data: Bytes::copy_from_slice(data),
    }
}

fn network_info() -> NetworkInfoUpdate {
    NetworkInfoUpdate {
        network_id: 3,
        domain_separator: B256::repeat_byte(0x5a),
        gas_limit: 15_000_000,
        relative_gas_price: UFloat9x56::from_rational(3, 2).unwrap(),
        base_fee: 1_000_000_000,
        mortality: 1_024,
    }
}

#[test]
fn type_hashes_are_distinct() {
    let hashes: HashSet<B256> = Schema::ALL.iter().map(Schema::type_hash).collect();
    assert_eq!(hashes.len(), Schema::ALL.len());
    for schema in Schema::ALL {
        assert_eq!(schema.type_hash(), keccak256(schema.type_string()));
    }
}

#[test]
fn type_strings_match_solidity_declarations() {
    assert_eq!(abi::TssKey::eip712_encode_type(), TSS_KEY_TYPE);
    assert_eq!(abi::UpdateKeysMessage::eip712_encode_type(), UPDATE_KEYS_TYPE);
    assert_eq!(
        abi::UpdateNetworkInfo::eip712_encode_type(),
        UPDATE_NETWORK_INFO_TYPE
    );
    assert_eq!(abi::GmpMessage::eip712_encode_type(), GMP_MESSAGE_TYPE);
    assert_eq!(
        SignerKey::SCHEMA.type_hash(),
        abi::TssKey::from(&key(false, 1)).eip712_type_hash()
    );
}

#[test_case(key(false, 1); "even parity")]
#[test_case(key(true, 2); "odd parity")]
#[test_case(SignerKey::new(true, U256::MAX); "maximal coordinate")]
fn signer_key_hash_matches_field_encoding(key: SignerKey) {
    let mut buf = Vec::new();
    buf.extend_from_slice(keccak256(TSS_KEY_TYPE).as_slice());
    buf.extend_from_slice(&word(u64::from(key.y_parity)));
    buf.extend_from_slice(&key.x_coord.to_be_bytes::<32>());
    assert_eq!(key.hash_struct(), keccak256(&buf));
    assert_eq!(key.hash_struct(), abi::TssKey::from(&key).eip712_hash_struct());
}

#[test_case(false, 27, 0; "even parity")]
#[test_case(true, 28, 1; "odd parity")]
fn parity_maps_to_recovery_value(y_parity: bool, v: u8, hashed_parity: u64) {
    let key = SignerKey::new(y_parity, U256::from(5));
    assert_eq!(key.v(), v);

    let mut buf = Vec::new();
    buf.extend_from_slice(keccak256(TSS_KEY_TYPE).as_slice());
    buf.extend_from_slice(&word(hashed_parity));
    buf.extend_from_slice(&word(5));
    assert_eq!(key.hash_struct(), keccak256(&buf));

    let mut recovery_form = Vec::new();
    recovery_form.extend_from_slice(keccak256(TSS_KEY_TYPE).as_slice());
    recovery_form.extend_from_slice(&word(u64::from(v)));
    recovery_form.extend_from_slice(&word(5));
    assert_ne!(key.hash_struct(), keccak256(&recovery_form));
}

#[test]
fn signer_key_array_hash_scenario() {
    let key1 = key(false, 1);
    let key2 = key(true, 2);

    let hash_of = |y_parity: u64, x_coord: u64| {
        let mut buf = Vec::new();
        buf.extend_from_slice(keccak256("TssKey(uint8 yParity,uint256 xCoord)").as_slice());
        buf.extend_from_slice(&word(y_parity));
        buf.extend_from_slice(&word(x_coord));
        keccak256(&buf)
    };
    let mut concatenated = Vec::new();
    concatenated.extend_from_slice(hash_of(0, 1).as_slice());
    concatenated.extend_from_slice(hash_of(1, 2).as_slice());

    assert_eq!(hash_signer_keys(&[key1, key2]), keccak256(&concatenated));
    assert_ne!(
        hash_signer_keys(&[key1, key2]),
        hash_signer_keys(&[key2, key1])
    );
}

#[test]
fn empty_array_hashes_empty_bytes() {
    assert_eq!(hash_signer_keys(&[]), keccak256(b""));
    assert_eq!(encode_hash_array(&[]), hash_signer_keys(&[]));
}

#[test]
fn key_set_update_hash_is_order_sensitive() {
    let update = SignerKeySetUpdate {
        revoke: vec![key(false, 10)],
        register: vec![key(false, 11), key(true, 12)],
    };
    let mut buf = Vec::new();
    buf.extend_from_slice(keccak256(UPDATE_KEYS_TYPE).as_slice());
    buf.extend_from_slice(hash_signer_keys(&update.revoke).as_slice());
    buf.extend_from_slice(hash_signer_keys(&update.register).as_slice());
    assert_eq!(update.hash_struct(), keccak256(&buf));
    assert_eq!(
        update.hash_struct(),
        abi::UpdateKeysMessage::from(&update).eip712_hash_struct()
    );

    let mut permuted = update.clone();
    permuted.register.reverse();
    assert_ne!(update.hash_struct(), permuted.hash_struct());

    let swapped = SignerKeySetUpdate {
        revoke: update.register.clone(),
        register: update.revoke.clone(),
    };
    assert_ne!(update.hash_struct(), swapped.hash_struct());
}

#[test]
fn network_info_hash_ignores_mortality() {
    let update = network_info();
    let mut later = update;
    later.mortality += 1_000;
    assert_eq!(update.hash_struct(), later.hash_struct());

    let mut pricier = update;
    pricier.base_fee += 1;
    assert_ne!(update.hash_struct(), pricier.hash_struct());
}

#[test]
fn network_info_hash_matches_field_encoding() {
    let update = network_info();
    let mut buf = Vec::new();
    buf.extend_from_slice(keccak256(UPDATE_NETWORK_INFO_TYPE).as_slice());
    buf.extend_from_slice(&word(3));
    buf.extend_from_slice(update.domain_separator.as_slice());
    buf.extend_from_slice(&word(15_000_000));
    buf.extend_from_slice(&word(update.relative_gas_price.raw()));
    buf.extend_from_slice(&U256::from(1_000_000_000u128).to_be_bytes::<32>());
    assert_eq!(update.hash_struct(), keccak256(&buf));
}

#[test]
fn gmp_message_hash_matches_solidity_struct() {
    for data in [Vec::new(), b"hello".to_vec(), vec![0xff; 100]] {
        let message = gmp_message(&data);
        assert_eq!(
            message.hash_struct(),
            abi::GmpMessage::from(&message).eip712_hash_struct()
        );
    }
}

#[test]
fn gmp_message_hash_covers_every_field() {
    let base = gmp_message(b"payload");
    let base_hash = base.hash_struct();
    let variants = [
        GmpMessage {
            source: SenderIdentity::encode(base.source.decode(), true),
            ..base.clone()
        },
        GmpMessage {
            src_network: 9,
            ..base.clone()
        },
        GmpMessage {
            dest: Address::repeat_byte(7),
            ..base.clone()
        },
        GmpMessage {
            dest_network: 9,
            ..base.clone()
        },
        GmpMessage {
            gas_limit: U256::from(100_001),
            ..base.clone()
        },
        GmpMessage {
            salt: U256::from(43),
            ..base.clone()
        },
        GmpMessage {
            data: Bytes::from_static(b"payloaD"),
            ..base.clone()
        },
    ];
    for variant in variants {
        assert_ne!(variant.hash_struct(), base_hash, "{variant:?}");
    }
}

#[test]
fn empty_body_message_hash() {
    let empty = gmp_message(b"");
    let hash = empty.hash_struct();
    assert_eq!(hash, empty.hash_struct());
    assert_ne!(hash, B256::ZERO);
    assert_ne!(hash, gmp_message(b"\0").hash_struct());
}

#[test]
fn schemas_never_collide_on_identical_fields() {
    let key = key(false, 1);
    for schema in [Schema::UpdateKeys, Schema::UpdateNetworkInfo, Schema::GmpMessage] {
        let mut buf = Vec::new();
        buf.extend_from_slice(schema.type_hash().as_slice());
        buf.extend_from_slice(&word(0));
        buf.extend_from_slice(&word(1));
        assert_ne!(key.hash_struct(), keccak256(&buf));
    }
}

#[test]
fn typed_hash_layout() {
    let domain_separator = B256::repeat_byte(1);
    let struct_hash = B256::repeat_byte(2);
    let mut buf = vec![0x19, 0x01];
    buf.extend_from_slice(domain_separator.as_slice());
    buf.extend_from_slice(struct_hash.as_slice());
    assert_eq!(typed_hash(&domain_separator, &struct_hash), keccak256(&buf));
}

#[test]
fn signing_hash_matches_alloy_domain() {
    let domain = Eip712Domain::new(
        Some("GMP Gateway".into()),
        Some("0.1.0".into()),
        Some(U256::from(1)),
        Some(Address::repeat_byte(0x42)),
        None,
    );
    let message = gmp_message(b"ping");
    assert_eq!(
        message.eip712_signing_hash(&domain.separator()),
        abi::GmpMessage::from(&message).eip712_signing_hash(&domain)
    );
}

#[proptest]
fn typed_hash_separates_domains(domain1: [u8; 32], domain2: [u8; 32], digest: [u8; 32]) {
    let digest = B256::from(digest);
    let (domain1, domain2) = (B256::from(domain1), B256::from(domain2));
    if domain1 != domain2 {
        assert_ne!(typed_hash(&domain1, &digest), typed_hash(&domain2, &digest));
    }
}

#[proptest]
fn typed_hash_separates_structs(domain: [u8; 32], digest1: [u8; 32], digest2: [u8; 32]) {
    let domain = B256::from(domain);
    let (digest1, digest2) = (B256::from(digest1), B256::from(digest2));
    if digest1 != digest2 {
        assert_ne!(typed_hash(&domain, &digest1), typed_hash(&domain, &digest2));
    }
}

#[proptest]
fn hashing_is_deterministic(data: Vec<u8>, salt: u64, y_parity: bool) {
    let message = GmpMessage {
        salt: U256::from(salt),
        ..gmp_message(&data)
    };
    assert_eq!(message.hash_struct(), message.clone().hash_struct());
    let keys = [key(y_parity, salt), key(!y_parity, salt)];
    assert_eq!(hash_signer_keys(&keys), hash_signer_keys(&keys));
}
