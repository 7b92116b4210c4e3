// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! Solidity ABI mirrors of the gateway types and conversions from and to the
//! native types.

use crate::{
    data_types::{self, NetworkInfoUpdate, SignerKey},
    error::Error,
    float::UFloat9x56,
    identity::SenderIdentity,
};

alloy_sol_types::sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct TssKey {
        uint8 yParity;
        uint256 xCoord;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Signature {
        uint256 xCoord;
        uint256 e;
        uint256 s;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct UpdateKeysMessage {
        TssKey[] revoke;
        TssKey[] register;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct UpdateNetworkInfo {
        uint16 networkId;
        bytes32 domainSeparator;
        uint64 gasLimit;
        uint64 relativeGasPrice;
        uint128 baseFee;
        uint64 mortality;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct GmpMessage {
        bytes32 source;
        uint16 srcNetwork;
        address dest;
        uint16 destNetwork;
        uint256 gasLimit;
        uint256 salt;
        bytes data;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct InboundMessage {
        Signature signature;
        uint64 nonce;
        uint64 maxDispatchGas;
        uint256 maxFeePerGas;
        uint8 command;
        bytes params;
    }

    /// Entry point implemented by every GMP recipient contract.
    interface IGmpReceiver {
        function onGmpReceived(bytes32 id, uint128 network, bytes32 source, bytes calldata payload)
            external
            payable
            returns (bytes32);
    }
}

impl From<&SignerKey> for TssKey {
    fn from(key: &SignerKey) -> Self {
        TssKey {
            yParity: u8::from(key.y_parity),
            xCoord: key.x_coord,
        }
    }
}

impl TryFrom<TssKey> for SignerKey {
    type Error = Error;

    fn try_from(key: TssKey) -> Result<Self, Self::Error> {
        let y_parity = match key.yParity {
            0 => false,
            1 => true,
            _ => {
                return Err(Error::ValueOutOfRange {
                    field: "yParity",
                    bits: 1,
                })
            }
        };
        Ok(SignerKey::new(y_parity, key.xCoord))
    }
}

impl From<&data_types::Signature> for Signature {
    fn from(signature: &data_types::Signature) -> Self {
        Signature {
            xCoord: signature.x_coord,
            e: signature.e,
            s: signature.s,
        }
    }
}

impl From<Signature> for data_types::Signature {
    fn from(signature: Signature) -> Self {
        data_types::Signature {
            x_coord: signature.xCoord,
            e: signature.e,
            s: signature.s,
        }
    }
}

impl From<&data_types::SignerKeySetUpdate> for UpdateKeysMessage {
    fn from(update: &data_types::SignerKeySetUpdate) -> Self {
        UpdateKeysMessage {
            revoke: update.revoke.iter().map(TssKey::from).collect(),
            register: update.register.iter().map(TssKey::from).collect(),
        }
    }
}

impl TryFrom<UpdateKeysMessage> for data_types::SignerKeySetUpdate {
    type Error = Error;

    fn try_from(message: UpdateKeysMessage) -> Result<Self, Self::Error> {
        Ok(data_types::SignerKeySetUpdate {
            revoke: message
                .revoke
                .into_iter()
                .map(SignerKey::try_from)
                .collect::<Result<_, _>>()?,
            register: message
                .register
                .into_iter()
                .map(SignerKey::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl From<&NetworkInfoUpdate> for UpdateNetworkInfo {
    fn from(update: &NetworkInfoUpdate) -> Self {
        UpdateNetworkInfo {
            networkId: update.network_id,
            domainSeparator: update.domain_separator,
            gasLimit: update.gas_limit,
            relativeGasPrice: update.relative_gas_price.raw(),
            baseFee: update.base_fee,
            mortality: update.mortality,
        }
    }
}

impl From<UpdateNetworkInfo> for NetworkInfoUpdate {
    fn from(update: UpdateNetworkInfo) -> Self {
        NetworkInfoUpdate {
            network_id: update.networkId,
            domain_separator: update.domainSeparator,
            gas_limit: update.gasLimit,
            relative_gas_price: UFloat9x56::from_raw(update.relativeGasPrice),
            base_fee: update.baseFee,
            mortality: update.mortality,
        }
    }
}

impl From<&data_types::GmpMessage> for GmpMessage {
    fn from(message: &data_types::GmpMessage) -> Self {
        GmpMessage {
            source: *message.source.as_bytes32(),
            srcNetwork: message.src_network,
            dest: message.dest,
            destNetwork: message.dest_network,
            gasLimit: message.gas_limit,
            salt: message.salt,
            data: message.data.clone(),
        }
    }
}

impl TryFrom<GmpMessage> for data_types::GmpMessage {
    type Error = Error;

    fn try_from(message: GmpMessage) -> Result<Self, Self::Error> {
        Ok(data_types::GmpMessage {
            source: SenderIdentity::try_from(message.source)?,
            src_network: message.srcNetwork,
            dest: message.dest,
            dest_network: message.destNetwork,
            gas_limit: message.gasLimit,
            salt: message.salt,
            data: message.data,
        })
    }
}
