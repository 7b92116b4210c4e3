// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! Message encoding and hashing for a GMP gateway secured by a threshold
//! signature (TSS) signer set.
//!
//! Messages are hashed following EIP-712: a per-schema type hash is mixed into
//! every struct hash, and signing hashes bind the struct hash to one gateway
//! deployment through its domain separator. [`callback::GmpCallback`] produces
//! the call data delivered to a GMP recipient together with the message id.

pub mod abi;
pub mod callback;
pub mod data_types;
pub mod domain;
pub mod eip712;
mod error;
pub mod float;
pub mod identity;
pub mod inbound;

pub use callback::GmpCallback;
pub use data_types::{
    GmpMessage, Network, NetworkInfoUpdate, Signature, SignerKey, SignerKeySetUpdate,
};
pub use domain::{GatewayDomain, NetworkTable};
pub use eip712::{typed_hash, Eip712Struct, Schema};
pub use error::Error;
pub use float::UFloat9x56;
pub use identity::SenderIdentity;
pub use inbound::{Command, GatewayOp, InboundMessage};
