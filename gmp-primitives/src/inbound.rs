// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! Envelopes delivered by the relay chain to a gateway.

use alloy_primitives::{Bytes, B256, U256};
use alloy_sol_types::SolValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    abi,
    data_types::{GmpMessage, NetworkInfoUpdate, Signature, SignerKeySetUpdate},
    eip712::Eip712Struct,
    error::Error,
};

/// The operation requested by an inbound message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Command {
    Gmp = 0,
    SetShards = 1,
    SetRoute = 2,
}

impl TryFrom<u8> for Command {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Command::Gmp),
            1 => Ok(Command::SetShards),
            2 => Ok(Command::SetRoute),
            other => Err(Error::UnknownCommand(other)),
        }
    }
}

/// A signed envelope carrying one gateway operation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub signature: Signature,
    /// Strictly increasing per channel.
    pub nonce: u64,
    pub max_dispatch_gas: u64,
    pub max_fee_per_gas: U256,
    pub command: Command,
    /// ABI encoding of the operation selected by `command`.
    pub params: Bytes,
}

/// A decoded gateway operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GatewayOp {
    Gmp(GmpMessage),
    SetShards(SignerKeySetUpdate),
    SetRoute(NetworkInfoUpdate),
}

impl GatewayOp {
    pub fn command(&self) -> Command {
        match self {
            GatewayOp::Gmp(_) => Command::Gmp,
            GatewayOp::SetShards(_) => Command::SetShards,
            GatewayOp::SetRoute(_) => Command::SetRoute,
        }
    }

    /// The ABI encoding carried in [`InboundMessage::params`].
    pub fn encode_params(&self) -> Bytes {
        let encoded = match self {
            GatewayOp::Gmp(message) => abi::GmpMessage::from(message).abi_encode(),
            GatewayOp::SetShards(update) => abi::UpdateKeysMessage::from(update).abi_encode(),
            GatewayOp::SetRoute(update) => abi::UpdateNetworkInfo::from(update).abi_encode(),
        };
        encoded.into()
    }

    /// The digest the signer set signs for this operation.
    pub fn signing_hash(&self, domain_separator: &B256) -> B256 {
        match self {
            GatewayOp::Gmp(message) => message.eip712_signing_hash(domain_separator),
            GatewayOp::SetShards(update) => update.eip712_signing_hash(domain_separator),
            GatewayOp::SetRoute(update) => update.eip712_signing_hash(domain_separator),
        }
    }
}

impl InboundMessage {
    /// Wraps `op` into an envelope with its params encoded.
    pub fn new(
        signature: Signature,
        nonce: u64,
        max_dispatch_gas: u64,
        max_fee_per_gas: U256,
        op: &GatewayOp,
    ) -> Self {
        InboundMessage {
            signature,
            nonce,
            max_dispatch_gas,
            max_fee_per_gas,
            command: op.command(),
            params: op.encode_params(),
        }
    }

    pub fn abi_encode(&self) -> Vec<u8> {
        abi::InboundMessage {
            signature: abi::Signature::from(&self.signature),
            nonce: self.nonce,
            maxDispatchGas: self.max_dispatch_gas,
            maxFeePerGas: self.max_fee_per_gas,
            command: self.command as u8,
            params: self.params.clone(),
        }
        .abi_encode()
    }

    pub fn abi_decode(bytes: &[u8]) -> Result<Self, Error> {
        let message = abi::InboundMessage::abi_decode(bytes)?;
        Ok(InboundMessage {
            signature: message.signature.into(),
            nonce: message.nonce,
            max_dispatch_gas: message.maxDispatchGas,
            max_fee_per_gas: message.maxFeePerGas,
            command: Command::try_from(message.command)?,
            params: message.params,
        })
    }

    /// Decodes `params` according to `command`.
    pub fn decode_params(&self) -> Result<GatewayOp, Error> {
        let op = match self.command {
            Command::Gmp => {
                GatewayOp::Gmp(abi::GmpMessage::abi_decode(&self.params)?.try_into()?)
            }
            Command::SetShards => GatewayOp::SetShards(
                abi::UpdateKeysMessage::abi_decode(&self.params)?.try_into()?,
            ),
            Command::SetRoute => {
                GatewayOp::SetRoute(abi::UpdateNetworkInfo::abi_decode(&self.params)?.into())
            }
        };
        debug!(nonce = self.nonce, command = ?self.command, "decoded inbound message");
        Ok(op)
    }
}

#[cfg(test)]
#[path = "unit_tests/inbound_tests.rs"]
mod tests;
