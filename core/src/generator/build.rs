use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use tracing::{error, info, warn};

use super::{
    methods::{plan_methods, GenerateMethodsError},
    serializer::{generate_adapter_code, generate_contract_names_code, generate_mod_code},
    splicer::{AdapterTemplate, SpliceError},
};
use crate::{
    artifacts::{list_artifact_files, read_artifacts, ReadArtifactsError, ARTIFACTS_DIRECTORY},
    hash::{
        evaluate_gate, hash_artifacts, hash_config, hash_env_addresses, read_hash_file,
        write_hash_file, ContentHashes, GateDecision, HashError, PriorHashes, RunReason,
        ARTIFACTS_HASH_FILE_NAME,
    },
    helpers::{format_rust_files, write_file, WriteFileError},
    manifest::{
        amend::{apply_amendment, plan_amendment, ConfigAmendment},
        config::AdapterConfig,
        yaml::{
            persist_config_hashes, read_config, read_config_raw, write_config, ReadConfigError,
            WriteConfigError, CONFIG_FILE_NAME,
        },
    },
    registry::{
        build_contract_registry, env_contract_addresses, process_env_vars, AddressSource,
        BuildRegistryError, RegistryWarning,
    },
};

pub const GENERATED_DIRECTORY: &str = "src/eth_adapter";
pub const ABIS_FILE_NAME: &str = "abis.json";
pub const CONTRACT_NAMES_FILE_NAME: &str = "contract_names.rs";
pub const CONTRACTS_FILE_NAME: &str = "contracts.json";
pub const ADAPTER_FILE_NAME: &str = "adapter.rs";
pub const MOD_FILE_NAME: &str = "mod.rs";

fn resolve(project: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project.join(path)
    }
}

/// Where a project keeps its inputs and where the adapter is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub project: PathBuf,
    pub artifacts: PathBuf,
    pub output: PathBuf,
    pub config: PathBuf,
    pub hash_file: PathBuf,
    /// Template replacing the bundled one.
    pub template: Option<PathBuf>,
}

impl ProjectPaths {
    pub fn from_project_path(project_path: &Path) -> Self {
        Self {
            project: project_path.to_path_buf(),
            artifacts: project_path.join(ARTIFACTS_DIRECTORY),
            output: project_path.join(GENERATED_DIRECTORY),
            config: project_path.join(CONFIG_FILE_NAME),
            hash_file: project_path.join(ARTIFACTS_HASH_FILE_NAME),
            template: None,
        }
    }

    pub fn with_artifacts(mut self, artifacts: &Path) -> Self {
        self.artifacts = resolve(&self.project, artifacts);
        self
    }

    pub fn with_output(mut self, output: &Path) -> Self {
        self.output = resolve(&self.project, output);
        self
    }

    pub fn with_template(mut self, template: &Path) -> Self {
        self.template = Some(resolve(&self.project, template));
        self
    }

    fn generated_file(&self, file_name: &str) -> PathBuf {
        self.output.join(file_name)
    }
}

#[derive(Default)]
pub struct BuildOptions<'a> {
    pub force: bool,
    /// Run rustfmt over the generated `.rs` files.
    pub format: bool,
    /// Variables scanned for `<NAME>_CONTRACT_ADDRESS` entries.
    pub environment: Vec<(String, String)>,
    /// Asked before amending the config when `promptForUpdateOnArtifactChange` is set. Without
    /// it the amendment is declined.
    pub confirm_amendment: Option<&'a dyn Fn(&ConfigAmendment) -> bool>,
}

impl BuildOptions<'_> {
    pub fn from_process_env() -> Self {
        Self { environment: process_env_vars(), ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub reason: RunReason,
    pub source: AddressSource,
    pub contracts: Vec<String>,
    pub functions: usize,
    pub written: Vec<PathBuf>,
    pub warnings: Vec<RegistryWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Skipped,
    Generated(BuildSummary),
}

#[derive(thiserror::Error, Debug)]
pub enum BuildAdapterError {
    #[error("{0}")]
    ReadConfig(#[from] ReadConfigError),

    #[error("{0}")]
    WriteConfig(#[from] WriteConfigError),

    #[error("{0}")]
    ReadArtifacts(#[from] ReadArtifactsError),

    #[error("No artifacts found in {0}")]
    NoArtifacts(PathBuf),

    #[error("{0} artifact(s) could not be read, fix them and run again")]
    ArtifactFailures(usize),

    #[error("{0}")]
    Hash(#[from] HashError),

    #[error("{0}")]
    Registry(#[from] BuildRegistryError),

    #[error("{0}")]
    GenerateMethods(#[from] GenerateMethodsError),

    #[error("{0}")]
    Splice(#[from] SpliceError),

    #[error("Could not serialize {0}: {1}")]
    Serialize(&'static str, serde_json::Error),

    #[error("{0}")]
    WriteFile(#[from] WriteFileError),
}

/// Brings `contractAddresses` in line with the artifact names. Works on the raw file so
/// `${VAR}` placeholders survive, then returns the config re-read with them resolved.
fn amend_config(
    paths: &ProjectPaths,
    config: &AdapterConfig,
    artifact_names: &BTreeSet<String>,
    options: &BuildOptions<'_>,
) -> Result<Option<AdapterConfig>, BuildAdapterError> {
    let configured: BTreeSet<String> =
        config.contract_addresses.keys().map(|key| key.to_uppercase()).collect();
    if &configured == artifact_names {
        return Ok(None);
    }

    let mut raw = read_config_raw(&paths.config)?;
    let amendment = plan_amendment(&raw, artifact_names);
    if amendment.is_empty() {
        return Ok(None);
    }

    if config.prompt_for_update_on_artifact_change {
        let confirmed = options.confirm_amendment.is_some_and(|confirm| confirm(&amendment));
        if !confirmed {
            warn!("Config not amended, contractAddresses no longer matches the artifacts");
            return Ok(None);
        }
    }

    apply_amendment(&mut raw, &amendment);
    write_config(&raw, &paths.config)?;
    info!("Amended {}", paths.config.display());

    Ok(read_config(&paths.config)?)
}

/// Amends the config file against the artifact directory outside of a build. Returns the
/// applied amendment, `None` when nothing changed.
pub async fn amend_project_config(
    paths: &ProjectPaths,
) -> Result<Option<ConfigAmendment>, BuildAdapterError> {
    let files = list_artifact_files(&paths.artifacts).await?;
    let artifact_names: BTreeSet<String> = files.into_iter().map(|f| f.contract_name).collect();

    let mut raw = read_config_raw(&paths.config)?;
    let amendment = plan_amendment(&raw, &artifact_names);
    if amendment.is_empty() {
        return Ok(None);
    }

    apply_amendment(&mut raw, &amendment);
    write_config(&raw, &paths.config)?;
    Ok(Some(amendment))
}

/// Hashes of the current inputs and the ones recorded by the last successful build.
pub async fn current_and_prior_hashes(
    paths: &ProjectPaths,
    config: Option<&AdapterConfig>,
    env_addresses: &BTreeMap<String, String>,
) -> Result<(ContentHashes, PriorHashes), BuildAdapterError> {
    let artifacts = hash_artifacts(&paths.artifacts).await?;

    let (config_hash, prior) = match config {
        Some(config) if config.has_contract_addresses() => {
            (hash_config(config)?, PriorHashes::from_config(config))
        }
        Some(config) => (hash_env_addresses(env_addresses)?, PriorHashes::from_config(config)),
        None => (hash_env_addresses(env_addresses)?, read_hash_file(&paths.hash_file).await),
    };

    Ok((ContentHashes { artifacts, config: config_hash }, prior))
}

fn write_json(
    path: &Path,
    what: &'static str,
    value: &impl serde::Serialize,
) -> Result<(), BuildAdapterError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| BuildAdapterError::Serialize(what, e))?;
    write_file(path, &json)?;
    Ok(())
}

/// Runs the whole generation pipeline for one project.
///
/// Nothing is written when the inputs are unchanged since the last successful build, unless
/// forced. Hashes are persisted last, so a failed build is retried in full on the next run.
pub async fn build_adapter(
    paths: &ProjectPaths,
    options: &BuildOptions<'_>,
) -> Result<BuildOutcome, BuildAdapterError> {
    let mut config = read_config(&paths.config)?;

    let files = list_artifact_files(&paths.artifacts).await?;
    if files.is_empty() {
        return Err(BuildAdapterError::NoArtifacts(paths.artifacts.clone()));
    }
    let artifact_names: BTreeSet<String> =
        files.iter().map(|file| file.contract_name.clone()).collect();

    if let Some(current) = config.as_ref().filter(|c| c.has_contract_addresses()) {
        if let Some(amended) = amend_config(paths, current, &artifact_names, options)? {
            config = Some(amended);
        }
    }

    let env_addresses = env_contract_addresses(options.environment.iter().cloned());
    let (hashes, prior) = current_and_prior_hashes(paths, config.as_ref(), &env_addresses).await?;

    let force = options.force || config.as_ref().is_some_and(|c| c.always_compile);
    let reason = match evaluate_gate(&hashes, &prior, force) {
        GateDecision::Skip => return Ok(BuildOutcome::Skipped),
        GateDecision::Run(reason) => reason,
    };

    let report = read_artifacts(&paths.artifacts).await?;
    if report.has_failures() {
        return Err(BuildAdapterError::ArtifactFailures(report.failures.len()));
    }

    let build = build_contract_registry(
        &artifact_names,
        &report.abis(),
        config.as_ref(),
        &env_addresses,
    )
    .inspect_err(|e| error!("{}", e))?;
    for warning in &build.warnings {
        warn!("{}", warning);
    }
    info!("Resolved {} contract addresses from {}", build.registry.len(), build.source);

    let contracts = plan_methods(&build.registry)?;
    let functions = contracts.iter().map(|contract| contract.functions.len()).sum();

    let template = match &paths.template {
        Some(path) => AdapterTemplate::from_path(path)?,
        None => AdapterTemplate::bundled(),
    };
    let adapter = template.splice(&generate_adapter_code(&contracts))?;

    let abis_path = paths.generated_file(ABIS_FILE_NAME);
    let contracts_path = paths.generated_file(CONTRACTS_FILE_NAME);
    let contract_names_path = paths.generated_file(CONTRACT_NAMES_FILE_NAME);
    let adapter_path = paths.generated_file(ADAPTER_FILE_NAME);
    let mod_path = paths.generated_file(MOD_FILE_NAME);

    write_json(&abis_path, ABIS_FILE_NAME, &build.registry.abis())?;
    write_json(&contracts_path, CONTRACTS_FILE_NAME, build.registry.descriptor_table())?;
    write_file(&contract_names_path, generate_contract_names_code(&build.registry).as_str())?;
    write_file(&adapter_path, adapter.as_str())?;
    write_file(&mod_path, generate_mod_code().as_str())?;

    let rust_files = vec![contract_names_path.clone(), adapter_path.clone(), mod_path.clone()];
    if options.format {
        if let Err(e) = format_rust_files(&rust_files) {
            warn!("Generated code was written but could not be formatted: {}", e);
        }
    }

    match &config {
        Some(_) => persist_config_hashes(&paths.config, &hashes)?,
        None => write_hash_file(&paths.hash_file, &hashes)?,
    }

    info!(
        "Generated {} functions for {} contracts in {}",
        functions,
        build.registry.len(),
        paths.output.display()
    );

    Ok(BuildOutcome::Generated(BuildSummary {
        reason,
        source: build.source,
        contracts: build.registry.names(),
        functions,
        written: vec![abis_path, contracts_path, contract_names_path, adapter_path, mod_path],
        warnings: build.warnings,
    }))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::{hash::UNSET_HASH, helpers::UNSET_ADDRESS};

    const STORAGE_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    const STORAGE_ARTIFACT: &str = r#"{
        "contractName": "Storage",
        "abi": [
            {"type": "constructor", "inputs": [], "stateMutability": "nonpayable"},
            {"type": "function", "name": "get", "inputs": [], "outputs": [{"name": "", "type": "uint256"}], "stateMutability": "view"},
            {"type": "function", "name": "set", "inputs": [{"name": "value", "type": "uint256"}], "outputs": [], "stateMutability": "nonpayable"}
        ],
        "bytecode": "0x"
    }"#;

    const TOKEN_ARTIFACT: &str = r#"[
        {"type": "function", "name": "mint", "inputs": [{"name": "to", "type": "address"}], "outputs": [], "stateMutability": "nonpayable"},
        {"type": "function", "name": "mint", "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}], "outputs": [], "stateMutability": "nonpayable"},
        {"type": "event", "name": "Minted", "inputs": [{"name": "to", "type": "address", "indexed": true}], "anonymous": false}
    ]"#;

    fn project(artifacts: &[(&str, &str)]) -> (TempDir, ProjectPaths) {
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_project_path(dir.path());
        fs::create_dir_all(&paths.artifacts).unwrap();
        for (file_name, contents) in artifacts {
            fs::write(paths.artifacts.join(file_name), contents).unwrap();
        }
        (dir, paths)
    }

    fn env_options(entries: &[(&str, &str)]) -> BuildOptions<'static> {
        BuildOptions {
            environment: entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            ..Default::default()
        }
    }

    fn generated(outcome: BuildOutcome) -> BuildSummary {
        match outcome {
            BuildOutcome::Generated(summary) => summary,
            BuildOutcome::Skipped => panic!("expected a generated build"),
        }
    }

    #[tokio::test]
    async fn test_first_run_generates_then_skips() {
        let (_dir, paths) = project(&[("Storage.json", STORAGE_ARTIFACT)]);
        let options = env_options(&[("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS)]);

        let summary = generated(build_adapter(&paths, &options).await.unwrap());
        assert_eq!(summary.reason, RunReason::FirstRun);
        assert_eq!(summary.source, AddressSource::Environment);
        assert_eq!(summary.contracts, vec!["STORAGE"]);
        assert_eq!(summary.functions, 2);
        for path in &summary.written {
            assert!(path.exists(), "{}", path.display());
        }

        let adapter = fs::read_to_string(paths.output.join(ADAPTER_FILE_NAME)).unwrap();
        assert!(adapter.contains("pub type ContractMethodsTable = ContractMethods;"));
        assert!(adapter.contains("pub async fn STORAGE_function_get_view_IN0_OUT1("));
        assert!(adapter.contains("pub async fn STORAGE_function_set_nonpayable_IN1_OUT0("));

        let contracts: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(paths.output.join(CONTRACTS_FILE_NAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(contracts["STORAGE"]["address"], STORAGE_ADDRESS);
        assert_eq!(contracts["STORAGE"]["abi"].as_array().unwrap().len(), 3);
        assert!(paths.hash_file.exists());

        fs::remove_file(paths.output.join(ADAPTER_FILE_NAME)).unwrap();
        assert_eq!(build_adapter(&paths, &options).await.unwrap(), BuildOutcome::Skipped);
        assert!(!paths.output.join(ADAPTER_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_force_and_changes_regenerate() {
        let (_dir, paths) = project(&[("Storage.json", STORAGE_ARTIFACT)]);
        let options = env_options(&[("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS)]);
        generated(build_adapter(&paths, &options).await.unwrap());

        let forced = BuildOptions { force: true, ..options };
        let summary = generated(build_adapter(&paths, &forced).await.unwrap());
        assert_eq!(summary.reason, RunReason::Forced);

        let moved =
            env_options(&[("STORAGE_CONTRACT_ADDRESS", "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512")]);
        let summary = generated(build_adapter(&paths, &moved).await.unwrap());
        assert_eq!(summary.reason, RunReason::ConfigChanged);

        let renamed = STORAGE_ARTIFACT.replace("\"get\"", "\"read\"");
        fs::write(paths.artifacts.join("Storage.json"), renamed).unwrap();
        let summary = generated(build_adapter(&paths, &moved).await.unwrap());
        assert_eq!(summary.reason, RunReason::ArtifactsChanged);
    }

    #[tokio::test]
    async fn test_missing_addresses_write_nothing() {
        let (_dir, paths) = project(&[("MyToken.json", TOKEN_ARTIFACT)]);

        let result = build_adapter(&paths, &BuildOptions::default()).await;
        assert!(matches!(
            result,
            Err(BuildAdapterError::Registry(BuildRegistryError::NoAddressesConfigured))
        ));
        assert!(!paths.output.join(ADAPTER_FILE_NAME).exists());
        assert!(!paths.hash_file.exists());

        // The failed run must not be skipped next time.
        let options = env_options(&[("MYTOKEN_CONTRACT_ADDRESS", STORAGE_ADDRESS)]);
        let summary = generated(build_adapter(&paths, &options).await.unwrap());
        assert_eq!(summary.reason, RunReason::FirstRun);
    }

    #[tokio::test]
    async fn test_name_mismatch_aborts() {
        let (_dir, paths) =
            project(&[("Storage.json", STORAGE_ARTIFACT), ("Token.json", TOKEN_ARTIFACT)]);
        let options = env_options(&[("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS)]);

        let Err(BuildAdapterError::Registry(BuildRegistryError::NameMismatch(mismatch))) =
            build_adapter(&paths, &options).await
        else {
            panic!("expected a name mismatch");
        };
        assert_eq!(mismatch.source, AddressSource::Environment);
        assert_eq!(mismatch.missing_addresses(), vec!["TOKEN"]);
        assert!(!paths.output.exists());
    }

    #[tokio::test]
    async fn test_config_file_records_hashes() {
        let (_dir, paths) = project(&[("Storage.json", STORAGE_ARTIFACT)]);
        fs::write(&paths.config, format!("contractAddresses:\n  STORAGE: \"{STORAGE_ADDRESS}\"\n"))
            .unwrap();

        let summary = generated(build_adapter(&paths, &BuildOptions::default()).await.unwrap());
        assert_eq!(summary.source, AddressSource::ConfigFile);
        assert!(summary.warnings.is_empty());
        assert!(!paths.hash_file.exists());

        let config = read_config(&paths.config).unwrap().unwrap();
        assert_ne!(config.hashes.artifacts, UNSET_HASH);
        assert_ne!(config.hashes.config, UNSET_HASH);

        assert_eq!(
            build_adapter(&paths, &BuildOptions::default()).await.unwrap(),
            BuildOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn test_always_compile_bypasses_gate() {
        let (_dir, paths) = project(&[("Storage.json", STORAGE_ARTIFACT)]);
        fs::write(
            &paths.config,
            format!("alwaysCompile: true\ncontractAddresses:\n  STORAGE: \"{STORAGE_ADDRESS}\"\n"),
        )
        .unwrap();

        generated(build_adapter(&paths, &BuildOptions::default()).await.unwrap());
        let summary = generated(build_adapter(&paths, &BuildOptions::default()).await.unwrap());
        assert_eq!(summary.reason, RunReason::Forced);
    }

    #[tokio::test]
    async fn test_config_is_amended_for_new_artifacts() {
        let (_dir, paths) =
            project(&[("Storage.json", STORAGE_ARTIFACT), ("Token.json", TOKEN_ARTIFACT)]);
        fs::write(
            &paths.config,
            format!("contractAddresses:\n  STORAGE_V1: \"{STORAGE_ADDRESS}\"\n  OLD: \"0x0\"\n"),
        )
        .unwrap();

        let summary = generated(build_adapter(&paths, &BuildOptions::default()).await.unwrap());
        assert_eq!(summary.contracts, vec!["STORAGE", "TOKEN"]);
        assert_eq!(summary.warnings.len(), 1);

        let config = read_config(&paths.config).unwrap().unwrap();
        assert_eq!(config.contract_addresses["STORAGE"], STORAGE_ADDRESS);
        assert_eq!(config.contract_addresses["TOKEN"], UNSET_ADDRESS);
        assert!(!config.contract_addresses.contains_key("OLD"));

        let adapter = fs::read_to_string(paths.output.join(ADAPTER_FILE_NAME)).unwrap();
        assert!(adapter.contains("\"mint(address,uint256)\""));
    }

    #[tokio::test]
    async fn test_declined_amendment_keeps_config() {
        let (_dir, paths) =
            project(&[("Storage.json", STORAGE_ARTIFACT), ("Token.json", TOKEN_ARTIFACT)]);
        let contents = format!(
            "promptForUpdateOnArtifactChange: true\ncontractAddresses:\n  STORAGE: \"{STORAGE_ADDRESS}\"\n"
        );
        fs::write(&paths.config, &contents).unwrap();

        let decline = |_: &ConfigAmendment| false;
        let options = BuildOptions { confirm_amendment: Some(&decline), ..Default::default() };

        assert!(matches!(
            build_adapter(&paths, &options).await,
            Err(BuildAdapterError::Registry(BuildRegistryError::NameMismatch(_)))
        ));
        assert_eq!(fs::read_to_string(&paths.config).unwrap(), contents);

        let accept = |amendment: &ConfigAmendment| amendment.added == vec!["TOKEN".to_string()];
        let options = BuildOptions { confirm_amendment: Some(&accept), ..Default::default() };
        generated(build_adapter(&paths, &options).await.unwrap());
    }

    #[tokio::test]
    async fn test_config_key_case_is_not_amended() {
        let (_dir, paths) = project(&[("Storage.json", STORAGE_ARTIFACT)]);
        fs::write(&paths.config, format!("contractAddresses:\n  Storage: \"{STORAGE_ADDRESS}\"\n"))
            .unwrap();

        let summary = generated(build_adapter(&paths, &BuildOptions::default()).await.unwrap());
        assert_eq!(summary.contracts, vec!["STORAGE"]);

        let raw = read_config_raw(&paths.config).unwrap();
        assert_eq!(raw.contract_addresses.keys().collect::<Vec<_>>(), vec!["Storage"]);
    }

    // Formatting aside, the checked-in playground output must match what a build produces now.
    #[tokio::test]
    async fn test_playground_output_is_current() {
        let playground = Path::new(env!("CARGO_MANIFEST_DIR")).join("../ethadapter_playground");
        let dir = tempdir().unwrap();
        let paths = ProjectPaths::from_project_path(dir.path());
        fs::create_dir_all(&paths.artifacts).unwrap();
        for entry in fs::read_dir(playground.join(ARTIFACTS_DIRECTORY)).unwrap() {
            let entry = entry.unwrap();
            fs::copy(entry.path(), paths.artifacts.join(entry.file_name())).unwrap();
        }
        fs::copy(playground.join(CONFIG_FILE_NAME), &paths.config).unwrap();

        let summary = generated(build_adapter(&paths, &BuildOptions::default()).await.unwrap());
        assert_eq!(summary.contracts, vec!["EMPTY", "STORAGE", "TOKEN"]);
        assert_eq!(summary.functions, 11);

        let checked_in = playground.join(GENERATED_DIRECTORY);
        let squashed = |path: PathBuf| -> String {
            fs::read_to_string(path).unwrap().split_whitespace().collect()
        };
        for file in [CONTRACT_NAMES_FILE_NAME, ADAPTER_FILE_NAME, MOD_FILE_NAME] {
            assert_eq!(
                squashed(paths.generated_file(file)),
                squashed(checked_in.join(file)),
                "{file} is stale, run `ethadapter build --force` in ethadapter_playground"
            );
        }

        let json = |path: PathBuf| -> serde_json::Value {
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
        };
        for file in [ABIS_FILE_NAME, CONTRACTS_FILE_NAME] {
            assert_eq!(json(paths.generated_file(file)), json(checked_in.join(file)), "{file}");
        }
    }

    #[tokio::test]
    async fn test_amend_project_config() {
        let (_dir, paths) = project(&[("Storage.json", STORAGE_ARTIFACT)]);
        fs::write(&paths.config, "contractAddresses:\n  TOKEN: \"0x0\"\n").unwrap();

        let amendment = amend_project_config(&paths).await.unwrap().unwrap();
        assert_eq!(amendment.added, vec!["STORAGE"]);
        assert_eq!(amendment.removed, vec!["TOKEN"]);
        assert_eq!(amend_project_config(&paths).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bad_artifacts_abort_before_writing() {
        let (_dir, paths) = project(&[
            ("Storage.json", STORAGE_ARTIFACT),
            ("Broken.json", "{ not json"),
            ("NoAbi.json", r#"{"bytecode": "0x"}"#),
        ]);
        let options = env_options(&[
            ("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS),
            ("BROKEN_CONTRACT_ADDRESS", STORAGE_ADDRESS),
            ("NOABI_CONTRACT_ADDRESS", STORAGE_ADDRESS),
        ]);

        assert!(matches!(
            build_adapter(&paths, &options).await,
            Err(BuildAdapterError::ArtifactFailures(2))
        ));
        assert!(!paths.output.exists());
        assert!(!paths.hash_file.exists());
    }

    #[tokio::test]
    async fn test_empty_artifact_directory() {
        let (_dir, paths) = project(&[]);
        assert!(matches!(
            build_adapter(&paths, &BuildOptions::default()).await,
            Err(BuildAdapterError::NoArtifacts(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_template_must_carry_marker() {
        let (dir, paths) = project(&[("Storage.json", STORAGE_ARTIFACT)]);
        fs::write(dir.path().join("template.rs"), "pub fn nothing() {}\n").unwrap();
        let paths = paths.with_template(Path::new("template.rs"));
        let options = env_options(&[("STORAGE_CONTRACT_ADDRESS", STORAGE_ADDRESS)]);

        assert!(matches!(
            build_adapter(&paths, &options).await,
            Err(BuildAdapterError::Splice(SpliceError::MarkerNotFound))
        ));
        assert!(!paths.output.exists());
    }
}
