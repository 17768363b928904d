use std::{collections::BTreeMap, fmt, path::Path};

use alloy::{hex, primitives::keccak256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    artifacts::{list_artifact_files, ReadArtifactsError},
    helpers::{write_file, WriteFileError},
    manifest::config::AdapterConfig,
};

pub const ARTIFACTS_HASH_FILE_NAME: &str = ".artifactsHash";
pub const UNSET_HASH: &str = "0x0";

/// Fingerprints of the generator inputs from a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHashes {
    pub artifacts: String,
    pub config: String,
}

impl Default for ContentHashes {
    fn default() -> Self {
        Self { artifacts: UNSET_HASH.to_string(), config: UNSET_HASH.to_string() }
    }
}

fn is_keccak_hex(value: &str) -> bool {
    value.len() == 66 &&
        value.starts_with("0x") &&
        value[2..].chars().all(|c| c.is_ascii_hexdigit())
}

impl ContentHashes {
    pub fn is_unset(&self) -> bool {
        self.artifacts == UNSET_HASH || self.config == UNSET_HASH
    }

    pub fn is_well_formed(&self) -> bool {
        is_keccak_hex(&self.artifacts) && is_keccak_hex(&self.config)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum HashError {
    #[error("{0}")]
    CouldNotListArtifacts(#[from] ReadArtifactsError),

    #[error("Could not read artifact {0} for hashing: {1}")]
    CouldNotReadArtifact(String, std::io::Error),

    #[error("Could not serialize config snapshot: {0}")]
    CouldNotSerializeSnapshot(#[from] serde_json::Error),

    #[error("Could not serialize hashes: {0}")]
    CouldNotSerializeHashes(#[from] serde_yaml::Error),

    #[error("Could not write hash file: {0}")]
    CouldNotWriteHashFile(#[from] WriteFileError),
}

pub fn keccak_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(keccak256(bytes))
}

/// keccak256 over the concatenated per-file keccak256 digests, files in lexicographic order.
pub async fn hash_artifacts(dir: &Path) -> Result<String, HashError> {
    let files = list_artifact_files(dir).await?;
    let mut digests = String::new();

    for file in &files {
        let contents = tokio::fs::read(&file.path)
            .await
            .map_err(|e| HashError::CouldNotReadArtifact(file.file_name.clone(), e))?;
        digests.push_str(&keccak_hex(&contents));
    }

    debug!("Hashed {} artifact files", files.len());
    Ok(keccak_hex(digests.as_bytes()))
}

/// Hash of the effective config, ignoring the hashes it records about itself.
pub fn hash_config(config: &AdapterConfig) -> Result<String, HashError> {
    let mut snapshot = config.clone();
    snapshot.hashes = ContentHashes::default();
    Ok(keccak_hex(serde_json::to_string(&snapshot)?))
}

/// Hash of the addresses discovered in the environment when no config file is used.
pub fn hash_env_addresses(addresses: &BTreeMap<String, String>) -> Result<String, HashError> {
    Ok(keccak_hex(serde_json::to_string(addresses)?))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorHashes {
    Missing,
    Corrupt(String),
    Recorded(ContentHashes),
}

impl PriorHashes {
    pub fn from_config(config: &AdapterConfig) -> Self {
        Self::from_hashes(&config.hashes)
    }

    fn from_hashes(hashes: &ContentHashes) -> Self {
        if hashes.is_unset() {
            PriorHashes::Missing
        } else if !hashes.is_well_formed() {
            PriorHashes::Corrupt(format!(
                "recorded hashes are not keccak256 hex values: {}, {}",
                hashes.artifacts, hashes.config
            ))
        } else {
            PriorHashes::Recorded(hashes.clone())
        }
    }
}

pub async fn read_hash_file(path: &Path) -> PriorHashes {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return PriorHashes::Missing,
        Err(e) => return PriorHashes::Corrupt(e.to_string()),
    };

    match serde_yaml::from_str::<ContentHashes>(&contents) {
        Ok(hashes) => PriorHashes::from_hashes(&hashes),
        Err(e) => PriorHashes::Corrupt(e.to_string()),
    }
}

pub fn write_hash_file(path: &Path, hashes: &ContentHashes) -> Result<(), HashError> {
    let contents = serde_yaml::to_string(hashes)?;
    write_file(path, &contents)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunReason {
    Forced,
    FirstRun,
    CorruptHashState,
    ArtifactsChanged,
    ConfigChanged,
}

impl fmt::Display for RunReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RunReason::Forced => "generation forced",
            RunReason::FirstRun => "no previous hashes found",
            RunReason::CorruptHashState => "previous hashes could not be read",
            RunReason::ArtifactsChanged => "artifacts changed",
            RunReason::ConfigChanged => "configuration changed",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Skip,
    Run(RunReason),
}

pub fn evaluate_gate(current: &ContentHashes, prior: &PriorHashes, force: bool) -> GateDecision {
    let decision = if force {
        GateDecision::Run(RunReason::Forced)
    } else {
        match prior {
            PriorHashes::Missing => GateDecision::Run(RunReason::FirstRun),
            PriorHashes::Corrupt(_) => GateDecision::Run(RunReason::CorruptHashState),
            PriorHashes::Recorded(previous) if previous.artifacts != current.artifacts => {
                GateDecision::Run(RunReason::ArtifactsChanged)
            }
            PriorHashes::Recorded(previous) if previous.config != current.config => {
                GateDecision::Run(RunReason::ConfigChanged)
            }
            PriorHashes::Recorded(_) => GateDecision::Skip,
        }
    };

    match (&decision, prior) {
        (GateDecision::Run(RunReason::CorruptHashState), PriorHashes::Corrupt(reason)) => {
            info!("Regenerating, previous hashes could not be read: {}", reason)
        }
        (GateDecision::Run(reason), _) => info!("Regenerating: {}", reason),
        (GateDecision::Skip, _) => info!("Artifacts and configuration unchanged, skipping"),
    }

    decision
}
