use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{hash::ContentHashes, helpers::UNSET_ADDRESS};

/// Project level settings for adapter generation, stored in `ethadapter.yaml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterConfig {
    /// Regenerate on every run, even when artifacts and config are unchanged.
    #[serde(default)]
    pub always_compile: bool,

    /// Deployed address per contract name. Names match the artifact file names.
    #[serde(default)]
    pub contract_addresses: BTreeMap<String, String>,

    /// Ask before amending `contractAddresses` when the artifact set changed.
    #[serde(default)]
    pub prompt_for_update_on_artifact_change: bool,

    /// Hashes of the inputs to the last successful generation.
    #[serde(default)]
    pub hashes: ContentHashes,
}

impl AdapterConfig {
    /// A fresh config with an unset address for every artifact.
    pub fn for_artifacts(contract_names: &BTreeSet<String>) -> Self {
        Self {
            contract_addresses: contract_names
                .iter()
                .map(|name| (name.clone(), UNSET_ADDRESS.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn has_contract_addresses(&self) -> bool {
        !self.contract_addresses.is_empty()
    }
}
