// Copyright (c) GMP Gateway Contributors
// SPDX-License-Identifier: Apache-2.0

//! Gateway domains and the table of known networks.

use std::{borrow::Cow, collections::BTreeMap};

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::Eip712Domain;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{data_types::Network, error::Error};

/// The EIP-712 domain of one gateway deployment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub gateway: Address,
}

impl GatewayDomain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        gateway: Address,
    ) -> Self {
        GatewayDomain {
            name: name.into(),
            version: version.into(),
            chain_id,
            gateway,
        }
    }

    /// The hash of
    /// `EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)`.
    pub fn separator(&self) -> B256 {
        Eip712Domain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(self.chain_id)),
            Some(self.gateway),
            None,
        )
        .separator()
    }
}

/// The networks a deployment knows about, keyed by network id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NetworkTable {
    networks: BTreeMap<u16, Network>,
}

impl NetworkTable {
    /// Builds the table, refusing to map one id to two gateways.
    pub fn new(networks: impl IntoIterator<Item = Network>) -> Result<Self, Error> {
        let mut table = BTreeMap::new();
        for network in networks {
            if table.insert(network.id, network).is_some() {
                return Err(Error::DuplicateNetwork(network.id));
            }
        }
        debug!(count = table.len(), "loaded network table");
        Ok(NetworkTable { networks: table })
    }

    /// Parses a JSON list of `{"id": .., "gateway": ..}` entries.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let networks: Vec<Network> = serde_json::from_str(json)?;
        Self::new(networks)
    }

    pub fn gateway(&self, id: u16) -> Option<Address> {
        self.networks.get(&id).map(|network| network.gateway)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.networks.values()
    }
}
