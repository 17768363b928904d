use std::collections::BTreeMap;

use alloy::{json_abi::JsonAbi, primitives::Address};
use tracing::debug;

use super::error::AdapterError;
use crate::{helpers::validate_address, registry::ContractDescriptor};

#[derive(Debug, Clone)]
pub struct RuntimeContract {
    pub name: String,
    /// `None` when the contract was generated with a placeholder or invalid address.
    pub address: Option<Address>,
    pub abi: JsonAbi,
}

/// Contracts an adapter can talk to, loaded from the generated `contracts.json`.
#[derive(Debug, Clone, Default)]
pub struct RuntimeRegistry {
    contracts: BTreeMap<String, RuntimeContract>,
}

impl RuntimeRegistry {
    pub fn from_json(json: &str) -> Result<Self, AdapterError> {
        let descriptors: BTreeMap<String, ContractDescriptor> = serde_json::from_str(json)?;
        Self::from_descriptors(descriptors.into_values())
    }

    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ContractDescriptor>,
    ) -> Result<Self, AdapterError> {
        let mut contracts = BTreeMap::new();

        for descriptor in descriptors {
            let abi: JsonAbi = serde_json::from_value(descriptor.abi)
                .map_err(|e| AdapterError::InvalidAbi(descriptor.name.clone(), e.to_string()))?;
            let address = validate_address(&descriptor.address).ok();
            if address.is_none() {
                debug!("Contract {} has no usable address: {}", descriptor.name, descriptor.address);
            }

            contracts.insert(
                descriptor.name.clone(),
                RuntimeContract { name: descriptor.name, address, abi },
            );
        }

        Ok(Self { contracts })
    }

    pub fn get(&self, name: &str) -> Option<&RuntimeContract> {
        self.contracts.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
