use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{error, info};

use crate::helpers::is_valid_identifier;

pub const ARTIFACTS_DIRECTORY: &str = "artifacts";
pub const ABI_KEY: &str = "abi";

/// How deep the `abi` search walks into an artifact before giving up.
const MAX_ABI_SEARCH_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub file_name: String,
    pub path: PathBuf,
    pub contract_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub file_name: String,
    pub abi: Value,
}

#[derive(thiserror::Error, Debug)]
pub enum ReadArtifactsError {
    #[error("Could not read artifacts directory {0}: {1}")]
    CouldNotReadDirectory(PathBuf, std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("Could not read artifact {file}: {source}")]
    CouldNotReadFile { file: String, source: std::io::Error },

    #[error("Could not parse artifact {file} as JSON: {source}")]
    CouldNotParseJson { file: String, source: serde_json::Error },

    #[error("Artifact {0} is not an ABI array and has no `abi` field")]
    AbiNotFound(String),

    #[error("Artifact {0} has an `abi` field that is not an array")]
    AbiNotAnArray(String),

    #[error("Artifact {file} gives contract name {name} which is not a valid identifier")]
    InvalidContractName { file: String, name: String },

    #[error("Artifact {file} gives contract name {name} which is already used by {existing}")]
    DuplicateContractName { file: String, name: String, existing: String },
}

/// Result of reading every artifact. Failures never stop the other files from being read.
#[derive(Debug, Default)]
pub struct ArtifactReadReport {
    pub files: Vec<ArtifactFile>,
    pub artifacts: BTreeMap<String, ContractArtifact>,
    pub failures: Vec<ArtifactError>,
}

impl ArtifactReadReport {
    pub fn abis(&self) -> BTreeMap<String, Value> {
        self.artifacts
            .iter()
            .map(|(name, artifact)| (name.clone(), artifact.abi.clone()))
            .collect()
    }

    /// Names derived from every artifact file, including the ones that failed to parse.
    pub fn file_contract_names(&self) -> BTreeSet<String> {
        self.files.iter().map(|file| file.contract_name.clone()).collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub fn contract_name_from_file_name(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(".json")
        .or_else(|| file_name.strip_suffix(".JSON"))
        .unwrap_or(file_name);
    stem.to_uppercase()
}

fn is_artifact_file_name(file_name: &str) -> bool {
    let is_json = file_name.ends_with(".json") || file_name.ends_with(".JSON");
    is_json && !file_name.starts_with('.') && !file_name.ends_with(".dbg.json")
}

/// `.json` files in lexicographic order. Hidden files and hardhat debug files are skipped.
pub async fn list_artifact_files(dir: &Path) -> Result<Vec<ArtifactFile>, ReadArtifactsError> {
    let map_err = |e| ReadArtifactsError::CouldNotReadDirectory(dir.to_path_buf(), e);

    let mut entries = tokio::fs::read_dir(dir).await.map_err(map_err)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(map_err)? {
        if !entry.file_type().await.map_err(map_err)?.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        if !is_artifact_file_name(&file_name) {
            continue;
        }

        files.push(ArtifactFile {
            contract_name: contract_name_from_file_name(&file_name),
            path: entry.path(),
            file_name,
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

fn collect_abi_value<'a>(value: &'a Value, depth: usize, found: &mut Option<&'a Value>) {
    if depth > MAX_ABI_SEARCH_DEPTH {
        return;
    }

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == ABI_KEY {
                    *found = Some(child);
                }
                collect_abi_value(child, depth + 1, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_abi_value(item, depth + 1, found);
            }
        }
        _ => {}
    }
}

/// Depth first search for a key named `abi`. When several exist the last one visited wins.
pub fn find_abi_value(root: &Value) -> Option<&Value> {
    let mut found = None;
    collect_abi_value(root, 0, &mut found);
    found
}

/// A root array is the ABI itself, anything else is searched for an `abi` key.
pub fn extract_abi(file_name: &str, root: &Value) -> Result<Value, ArtifactError> {
    if root.is_array() {
        return Ok(root.clone());
    }

    match find_abi_value(root) {
        None => Err(ArtifactError::AbiNotFound(file_name.to_string())),
        Some(abi) if !abi.is_array() => Err(ArtifactError::AbiNotAnArray(file_name.to_string())),
        Some(abi) => Ok(abi.clone()),
    }
}

async fn read_artifact(file: &ArtifactFile) -> Result<ContractArtifact, ArtifactError> {
    if !is_valid_identifier(&file.contract_name) {
        return Err(ArtifactError::InvalidContractName {
            file: file.file_name.clone(),
            name: file.contract_name.clone(),
        });
    }

    let contents = tokio::fs::read_to_string(&file.path).await.map_err(|source| {
        ArtifactError::CouldNotReadFile { file: file.file_name.clone(), source }
    })?;

    let root: Value = serde_json::from_str(&contents).map_err(|source| {
        ArtifactError::CouldNotParseJson { file: file.file_name.clone(), source }
    })?;

    Ok(ContractArtifact {
        contract_name: file.contract_name.clone(),
        file_name: file.file_name.clone(),
        abi: extract_abi(&file.file_name, &root)?,
    })
}

pub async fn read_artifacts(dir: &Path) -> Result<ArtifactReadReport, ReadArtifactsError> {
    let files = list_artifact_files(dir).await?;
    let mut report = ArtifactReadReport::default();

    for file in &files {
        match read_artifact(file).await {
            Ok(artifact) => {
                if let Some(existing) = report.artifacts.get(&artifact.contract_name) {
                    report.failures.push(ArtifactError::DuplicateContractName {
                        file: artifact.file_name,
                        name: artifact.contract_name,
                        existing: existing.file_name.clone(),
                    });
                } else {
                    report.artifacts.insert(artifact.contract_name.clone(), artifact);
                }
            }
            Err(e) => report.failures.push(e),
        }
    }

    for failure in &report.failures {
        error!("{}", failure);
    }

    info!(
        "Read {} of {} artifacts from {}",
        report.artifacts.len(),
        files.len(),
        dir.display()
    );

    report.files = files;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    const STORAGE_ABI: &str = r#"[{"type":"function","name":"get","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}]"#;

    #[test]
    fn test_contract_name_from_file_name() {
        assert_eq!(contract_name_from_file_name("Storage.json"), "STORAGE");
        assert_eq!(contract_name_from_file_name("my_token.JSON"), "MY_TOKEN");
        assert_eq!(contract_name_from_file_name("Registry"), "REGISTRY");
    }

    #[test]
    fn test_root_array_is_the_abi() {
        let root: Value = serde_json::from_str(STORAGE_ABI).unwrap();
        assert_eq!(extract_abi("Storage.json", &root).unwrap(), root);
    }

    #[test]
    fn test_abi_found_in_nested_artifact() {
        let root = json!({
            "_format": "hh-sol-artifact-1",
            "contractName": "Storage",
            "output": { "contracts": { "Storage.sol": { "Storage": { "abi": [{"type": "function", "name": "get"}] } } } },
            "bytecode": "0x00"
        });

        let abi = extract_abi("Storage.json", &root).unwrap();
        assert_eq!(abi, json!([{"type": "function", "name": "get"}]));
    }

    #[test]
    fn test_last_abi_key_wins() {
        let root = json!({
            "abi": [{"name": "first"}],
            "metadata": { "output": { "abi": [{"name": "second"}] } }
        });

        assert_eq!(find_abi_value(&root), Some(&json!([{"name": "second"}])));
    }

    #[test]
    fn test_missing_or_invalid_abi() {
        assert!(matches!(
            extract_abi("A.json", &json!({"bytecode": "0x"})),
            Err(ArtifactError::AbiNotFound(_))
        ));
        assert!(matches!(
            extract_abi("A.json", &json!({"abi": "not an abi"})),
            Err(ArtifactError::AbiNotAnArray(_))
        ));
    }

    #[test]
    fn test_search_depth_is_bounded() {
        let mut root = json!({"abi": []});
        for _ in 0..(MAX_ABI_SEARCH_DEPTH + 10) {
            root = json!({ "nested": root });
        }

        assert!(find_abi_value(&root).is_none());
    }

    #[tokio::test]
    async fn test_read_artifacts_collects_every_failure() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Storage.json"), STORAGE_ABI).unwrap();
        std::fs::write(dir.path().join("Broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join("NoAbi.json"), r#"{"bytecode":"0x"}"#).unwrap();
        std::fs::write(dir.path().join("Token.json"), format!(r#"{{"abi":{STORAGE_ABI}}}"#))
            .unwrap();
        std::fs::write(dir.path().join("Token.dbg.json"), "{}").unwrap();
        std::fs::write(dir.path().join(".DS_Store"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "# artifacts").unwrap();
        std::fs::create_dir(dir.path().join("build-info")).unwrap();

        let report = read_artifacts(dir.path()).await.unwrap();

        assert_eq!(
            report.artifacts.keys().cloned().collect::<Vec<_>>(),
            vec!["STORAGE".to_string(), "TOKEN".to_string()]
        );
        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .any(|f| matches!(f, ArtifactError::CouldNotParseJson { file, .. } if file == "Broken.json")));
        assert!(report
            .failures
            .iter()
            .any(|f| matches!(f, ArtifactError::AbiNotFound(file) if file == "NoAbi.json")));
        assert_eq!(
            report.file_contract_names().into_iter().collect::<Vec<_>>(),
            vec!["BROKEN", "NOABI", "STORAGE", "TOKEN"]
        );
    }

    #[tokio::test]
    async fn test_invalid_and_duplicate_names() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("My-Token.json"), STORAGE_ABI).unwrap();
        std::fs::write(dir.path().join("Vault.json"), STORAGE_ABI).unwrap();
        std::fs::write(dir.path().join("vault.json"), STORAGE_ABI).unwrap();

        let report = read_artifacts(dir.path()).await.unwrap();

        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts["VAULT"].file_name, "Vault.json");
        assert!(report
            .failures
            .iter()
            .any(|f| matches!(f, ArtifactError::InvalidContractName { name, .. } if name == "MY-TOKEN")));
        assert!(report.failures.iter().any(
            |f| matches!(f, ArtifactError::DuplicateContractName { file, .. } if file == "vault.json")
        ));
    }

    #[tokio::test]
    async fn test_underscore_file_is_not_a_contract() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("_.json"), STORAGE_ABI).unwrap();

        let report = read_artifacts(dir.path()).await.unwrap();

        assert!(report.artifacts.is_empty());
        assert!(matches!(
            report.failures.as_slice(),
            [ArtifactError::InvalidContractName { name, .. }] if name == "_"
        ));
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let result = read_artifacts(&dir.path().join("artifacts")).await;
        assert!(matches!(result, Err(ReadArtifactsError::CouldNotReadDirectory(_, _))));
    }
}
