use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use super::config::AdapterConfig;
use crate::helpers::UNSET_ADDRESS;

/// Changes needed to bring `contractAddresses` in line with the artifact directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigAmendment {
    /// Artifact name to the address carried over from the existing config.
    pub kept: BTreeMap<String, String>,
    /// Existing keys that are rewritten to the artifact name they matched.
    pub renamed: Vec<(String, String)>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ConfigAmendment {
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

/// Exact case-insensitive keys are claimed for every artifact first. Artifacts left without one
/// fall back to the last unclaimed key containing their name.
pub fn plan_amendment(
    config: &AdapterConfig,
    artifact_names: &BTreeSet<String>,
) -> ConfigAmendment {
    let mut amendment = ConfigAmendment::default();
    let mut matched_keys: BTreeSet<&String> = BTreeSet::new();
    let mut matches: BTreeMap<&String, (&String, &String)> = BTreeMap::new();

    for name in artifact_names {
        if let Some((key, address)) =
            config.contract_addresses.iter().find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            matched_keys.insert(key);
            matches.insert(name, (key, address));
        }
    }

    let unmatched: Vec<&String> =
        artifact_names.iter().filter(|name| !matches.contains_key(name)).collect();
    for name in unmatched {
        let fallback = config
            .contract_addresses
            .iter()
            .filter(|(key, _)| !matched_keys.contains(key))
            .filter(|(key, _)| key.to_uppercase().contains(name.as_str()))
            .last();
        if let Some((key, address)) = fallback {
            matched_keys.insert(key);
            matches.insert(name, (key, address));
        }
    }

    for name in artifact_names {
        match matches.get(name) {
            Some((key, address)) => {
                if *key != name {
                    amendment.renamed.push(((*key).clone(), name.clone()));
                }
                amendment.kept.insert(name.clone(), (*address).clone());
            }
            None => amendment.added.push(name.clone()),
        }
    }

    amendment.removed = config
        .contract_addresses
        .keys()
        .filter(|key| !matched_keys.contains(key))
        .cloned()
        .collect();

    amendment
}

pub fn apply_amendment(config: &mut AdapterConfig, amendment: &ConfigAmendment) {
    let mut contract_addresses = amendment.kept.clone();
    for name in &amendment.added {
        contract_addresses.insert(name.clone(), UNSET_ADDRESS.to_string());
    }

    for (from, to) in &amendment.renamed {
        info!("Config entry {} now maps to artifact {}", from, to);
    }
    for name in &amendment.added {
        info!("Added {} to contractAddresses with an unset address", name);
    }
    for name in &amendment.removed {
        warn!("Removed {} from contractAddresses, no artifact matches it", name);
    }

    config.contract_addresses = contract_addresses;
}
