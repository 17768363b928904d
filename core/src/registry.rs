use std::{
    collections::{BTreeMap, BTreeSet},
    ffi::OsString,
    fmt,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{helpers::validate_address, manifest::config::AdapterConfig};

/// Environment variables carrying a deployed address contain this marker.
pub const CONTRACT_ADDRESS_MARKER: &str = "CONTRACT_ADDRESS";

// stripped in order from env keys, the framework prefixes last
const ENV_KEY_STRIPPED_PARTS: [&str; 4] =
    ["_CONTRACT_ADDRESS", CONTRACT_ADDRESS_MARKER, "REACT_APP__", "REACT_APP_"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDescriptor {
    pub name: String,
    pub address: String,
    pub abi: Value,
}

/// Resolved contracts keyed by canonical (uppercase) name. The name, address and ABI tables
/// are all derived from the same descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractRegistry {
    contracts: BTreeMap<String, ContractDescriptor>,
}

impl ContractRegistry {
    pub fn get(&self, name: &str) -> Option<&ContractDescriptor> {
        self.contracts.get(name)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &ContractDescriptor> {
        self.contracts.values()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.contracts.keys().cloned().collect()
    }

    pub fn addresses(&self) -> BTreeMap<String, String> {
        self.contracts
            .iter()
            .map(|(name, contract)| (name.clone(), contract.address.clone()))
            .collect()
    }

    pub fn abis(&self) -> BTreeMap<String, Value> {
        self.contracts.iter().map(|(name, contract)| (name.clone(), contract.abi.clone())).collect()
    }

    pub fn descriptor_table(&self) -> &BTreeMap<String, ContractDescriptor> {
        &self.contracts
    }
}

pub fn contract_name_from_env_key(key: &str) -> String {
    let mut name = key.to_string();
    for part in ENV_KEY_STRIPPED_PARTS {
        name = name.replacen(part, "", 1);
    }
    name.trim_matches('_').to_uppercase()
}

/// Entries whose key and value are both valid unicode, anything else cannot name a contract.
pub fn unicode_env_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// The process environment without the entries [`unicode_env_vars`] drops.
pub fn process_env_vars() -> Vec<(String, String)> {
    unicode_env_vars(std::env::vars_os())
}

/// Contract addresses found in environment variables, keyed by contract name.
pub fn env_contract_addresses<I>(vars: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut vars: Vec<(String, String)> =
        vars.into_iter().filter(|(key, _)| key.contains(CONTRACT_ADDRESS_MARKER)).collect();
    vars.sort();

    let mut addresses = BTreeMap::new();
    let mut seen_keys: BTreeMap<String, String> = BTreeMap::new();

    for (key, address) in vars {
        let name = contract_name_from_env_key(&key);
        if name.is_empty() {
            warn!("Ignoring {}, it does not name a contract", key);
            continue;
        }

        if let Some(previous) = seen_keys.insert(name.clone(), key.clone()) {
            warn!("{} and {} both set an address for {}, using {}", previous, key, name, key);
        }
        addresses.insert(name, address);
    }

    addresses
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSource {
    Environment,
    ConfigFile,
}

impl fmt::Display for AddressSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressSource::Environment => f.write_str("environment variables"),
            AddressSource::ConfigFile => f.write_str("config contractAddresses"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryWarning {
    EnvironmentIgnored { names: Vec<String> },
    InvalidAddress { contract: String, address: String, reason: String },
}

impl fmt::Display for RegistryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryWarning::EnvironmentIgnored { names } => write!(
                f,
                "Both environment addresses ({}) and config contractAddresses are present. Using the config file, remove one of them to silence this warning",
                names.join(", ")
            ),
            RegistryWarning::InvalidAddress { contract, address, reason } => write!(
                f,
                "Contract {contract} has an invalid address {address}: {reason}. Calls to it will fail until it is set"
            ),
        }
    }
}

/// Names expected from the artifact files next to the names an address source provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMismatch {
    pub source: AddressSource,
    pub expected: BTreeSet<String>,
    pub found: BTreeSet<String>,
}

impl NameMismatch {
    pub fn missing_addresses(&self) -> Vec<&String> {
        self.expected.difference(&self.found).collect()
    }

    pub fn unknown_names(&self) -> Vec<&String> {
        self.found.difference(&self.expected).collect()
    }
}

impl fmt::Display for NameMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MISSING: &str = "-";

        writeln!(f, "Contract names from {} do not match the artifact files.", self.source)?;

        let rows: BTreeSet<&String> = self.expected.union(&self.found).collect();
        let width = rows.iter().map(|name| name.len()).max().unwrap_or(0).max(24);

        writeln!(f, "  {:<width$} | {}", "from artifact files", format!("from {}", self.source))?;
        for name in rows {
            let expected = if self.expected.contains(name) { name.as_str() } else { MISSING };
            let found = if self.found.contains(name) { name.as_str() } else { MISSING };
            let marker = if expected == found { "" } else { "  <-- mismatch" };
            writeln!(f, "  {expected:<width$} | {found}{marker}")?;
        }

        match self.source {
            AddressSource::Environment => write!(
                f,
                "Every artifact needs one <NAME>_CONTRACT_ADDRESS variable, e.g. artifacts/Token.json -> TOKEN_CONTRACT_ADDRESS"
            ),
            AddressSource::ConfigFile => write!(
                f,
                "Every artifact needs one contractAddresses entry, e.g. artifacts/Token.json -> TOKEN. Run `ethadapter amend` to sync the config"
            ),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BuildRegistryError {
    #[error(
        "No contract addresses configured. Add a <NAME>_CONTRACT_ADDRESS environment variable per artifact or run `ethadapter init` to create a config file"
    )]
    NoAddressesConfigured,

    #[error("{0}")]
    NameMismatch(NameMismatch),

    #[error("Contract {0} has an address entry but no ABI could be read from its artifact")]
    MissingAbi(String),
}

#[derive(Debug)]
pub struct RegistryBuild {
    pub registry: ContractRegistry,
    pub source: AddressSource,
    pub warnings: Vec<RegistryWarning>,
}

fn config_addresses(config: &AdapterConfig) -> BTreeMap<String, String> {
    config
        .contract_addresses
        .iter()
        .map(|(name, address)| (name.to_uppercase(), address.clone()))
        .collect()
}

/// Joins addresses with parsed ABIs. The config file wins when both sources have entries.
pub fn build_contract_registry(
    artifact_names: &BTreeSet<String>,
    abis: &BTreeMap<String, Value>,
    config: Option<&AdapterConfig>,
    env_addresses: &BTreeMap<String, String>,
) -> Result<RegistryBuild, BuildRegistryError> {
    let mut warnings = Vec::new();

    let (source, addresses) = match config.filter(|c| c.has_contract_addresses()) {
        Some(config) => {
            if !env_addresses.is_empty() {
                warnings.push(RegistryWarning::EnvironmentIgnored {
                    names: env_addresses.keys().cloned().collect(),
                });
            }
            (AddressSource::ConfigFile, config_addresses(config))
        }
        None if !env_addresses.is_empty() => (AddressSource::Environment, env_addresses.clone()),
        None => return Err(BuildRegistryError::NoAddressesConfigured),
    };

    let found: BTreeSet<String> = addresses.keys().cloned().collect();
    if &found != artifact_names {
        return Err(BuildRegistryError::NameMismatch(NameMismatch {
            source,
            expected: artifact_names.clone(),
            found,
        }));
    }

    let mut contracts = BTreeMap::new();
    for (name, address) in addresses {
        let abi = abis.get(&name).ok_or_else(|| BuildRegistryError::MissingAbi(name.clone()))?;

        if source == AddressSource::ConfigFile {
            if let Err(e) = validate_address(&address) {
                warnings.push(RegistryWarning::InvalidAddress {
                    contract: name.clone(),
                    address: address.clone(),
                    reason: e.to_string(),
                });
            }
        }

        contracts.insert(
            name.clone(),
            ContractDescriptor { name, address, abi: abi.clone() },
        );
    }

    for warning in &warnings {
        warn!("{}", warning);
    }
    info!("Resolved {} contracts from {}", contracts.len(), source);

    Ok(RegistryBuild { registry: ContractRegistry { contracts }, source, warnings })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const STORAGE_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn names(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn abis(values: &[&str]) -> BTreeMap<String, Value> {
        values
            .iter()
            .map(|v| (v.to_string(), json!([{"type": "function", "name": "get"}])))
            .collect()
    }

    fn env(values: &[(&str, &str)]) -> BTreeMap<String, String> {
        env_contract_addresses(values.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    fn config(entries: &[(&str, &str)]) -> AdapterConfig {
        AdapterConfig {
            contract_addresses: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_contract_name_from_env_key() {
        assert_eq!(contract_name_from_env_key("STORAGE_CONTRACT_ADDRESS"), "STORAGE");
        assert_eq!(contract_name_from_env_key("REACT_APP_STORAGE_CONTRACT_ADDRESS"), "STORAGE");
        assert_eq!(contract_name_from_env_key("REACT_APP__MY_TOKEN_CONTRACT_ADDRESS"), "MY_TOKEN");
        assert_eq!(contract_name_from_env_key("CONTRACT_ADDRESS_VAULT"), "VAULT");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_env_entries_are_dropped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("STORAGE_CONTRACT_ADDRESS"), OsString::from(STORAGE_ADDRESS)),
            (OsString::from_vec(b"TOKEN_CONTRACT_ADDRESS\xff".to_vec()), OsString::from("0x1")),
            (OsString::from("VAULT_CONTRACT_ADDRESS"), OsString::from_vec(b"0x\xfe".to_vec())),
        ];

        let vars = unicode_env_vars(vars);

        assert_eq!(vars, vec![("STORAGE_CONTRACT_ADDRESS".to_string(), STORAGE_ADDRESS.to_string())]);
        assert_eq!(env_contract_addresses(vars)["STORAGE"], STORAGE_ADDRESS);
    }

    #[test]
    fn test_env_contract_addresses_filters_unrelated_variables() {
        let addresses = env(&[
            ("PATH", "/usr/bin"),
            ("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS),
            ("RPC_URL", "http://localhost:8545"),
        ]);

        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses["STORAGE"], STORAGE_ADDRESS);
    }

    #[test]
    fn test_registry_from_environment() {
        let build = build_contract_registry(
            &names(&["STORAGE"]),
            &abis(&["STORAGE"]),
            None,
            &env(&[("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS)]),
        )
        .unwrap();

        assert_eq!(build.source, AddressSource::Environment);
        assert!(build.warnings.is_empty());
        let storage = build.registry.get("STORAGE").unwrap();
        assert_eq!(storage.address, STORAGE_ADDRESS);
        assert_eq!(storage.abi, json!([{"type": "function", "name": "get"}]));
        assert_eq!(build.registry.names(), vec!["STORAGE".to_string()]);
        assert_eq!(build.registry.addresses()["STORAGE"], STORAGE_ADDRESS);
        assert_eq!(build.registry.abis().len(), 1);
    }

    #[test]
    fn test_environment_name_mismatch_is_fatal() {
        let result = build_contract_registry(
            &names(&["STORAGE", "TOKEN"]),
            &abis(&["STORAGE", "TOKEN"]),
            None,
            &env(&[
                ("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS),
                ("TOKENS_CONTRACT_ADDRESS", STORAGE_ADDRESS),
            ]),
        );

        let Err(BuildRegistryError::NameMismatch(mismatch)) = result else {
            panic!("expected a name mismatch");
        };
        assert_eq!(mismatch.missing_addresses(), vec!["TOKEN"]);
        assert_eq!(mismatch.unknown_names(), vec!["TOKENS"]);

        let message = mismatch.to_string();
        assert!(message.contains("TOKENS"));
        assert!(message.contains("mismatch"));
        assert!(message.contains("TOKEN_CONTRACT_ADDRESS"));
    }

    #[test]
    fn test_config_wins_over_environment() {
        let build = build_contract_registry(
            &names(&["STORAGE"]),
            &abis(&["STORAGE"]),
            Some(&config(&[("Storage", STORAGE_ADDRESS)])),
            &env(&[("STORAGE_CONTRACT_ADDRESS", "0x0000000000000000000000000000000000000001")]),
        )
        .unwrap();

        assert_eq!(build.source, AddressSource::ConfigFile);
        assert_eq!(build.registry.get("STORAGE").unwrap().address, STORAGE_ADDRESS);
        assert_eq!(
            build.warnings,
            vec![RegistryWarning::EnvironmentIgnored { names: vec!["STORAGE".to_string()] }]
        );
    }

    #[test]
    fn test_invalid_config_address_is_a_warning() {
        let build = build_contract_registry(
            &names(&["STORAGE"]),
            &abis(&["STORAGE"]),
            Some(&config(&[("STORAGE", "0x0")])),
            &BTreeMap::new(),
        )
        .unwrap();

        assert_eq!(build.registry.get("STORAGE").unwrap().address, "0x0");
        assert!(matches!(
            &build.warnings[..],
            [RegistryWarning::InvalidAddress { contract, .. }] if contract == "STORAGE"
        ));
    }

    #[test]
    fn test_no_sources_is_fatal() {
        let result =
            build_contract_registry(&names(&["MYTOKEN"]), &abis(&["MYTOKEN"]), None, &BTreeMap::new());
        assert!(matches!(result, Err(BuildRegistryError::NoAddressesConfigured)));

        let empty_config = AdapterConfig::default();
        let result = build_contract_registry(
            &names(&["MYTOKEN"]),
            &abis(&["MYTOKEN"]),
            Some(&empty_config),
            &BTreeMap::new(),
        );
        assert!(matches!(result, Err(BuildRegistryError::NoAddressesConfigured)));
    }

    #[test]
    fn test_missing_abi_is_fatal() {
        let result = build_contract_registry(
            &names(&["BROKEN", "STORAGE"]),
            &abis(&["STORAGE"]),
            Some(&config(&[("BROKEN", STORAGE_ADDRESS), ("STORAGE", STORAGE_ADDRESS)])),
            &BTreeMap::new(),
        );

        assert!(matches!(result, Err(BuildRegistryError::MissingAbi(name)) if name == "BROKEN"));
    }
}
