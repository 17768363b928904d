use std::{env, fs, path::Path};

use regex::{Captures, Regex};
use tracing::error;

use super::config::AdapterConfig;
use crate::{
    hash::ContentHashes,
    helpers::{write_file, WriteFileError},
};

pub const CONFIG_FILE_NAME: &str = "ethadapter.yaml";

#[derive(thiserror::Error, Debug)]
pub enum ReadConfigError {
    #[error("Could not open file: {0}")]
    CouldNotOpenFile(#[from] std::io::Error),

    #[error("Could not parse config: {0}")]
    CouldNotParseConfig(#[from] serde_yaml::Error),

    #[error("Could not substitute env variables: {0}")]
    CouldNotSubstituteEnvVariables(#[from] regex::Error),

    #[error("Environment variables referenced in the config are not set: {0}")]
    MissingEnvVariables(String),
}

fn substitute_env_variables(contents: &str) -> Result<String, ReadConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;
    let mut missing = Vec::new();

    let result = re.replace_all(contents, |caps: &Captures| {
        let var_name = &caps[1];
        match env::var(var_name) {
            Ok(val) => val,
            Err(_) => {
                error!("Environment variable {} not found", var_name);
                missing.push(var_name.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        return Err(ReadConfigError::MissingEnvVariables(missing.join(", ")));
    }

    Ok(result.into_owned())
}

fn parse_config(contents: &str) -> Result<AdapterConfig, ReadConfigError> {
    if contents.trim().is_empty() {
        return Ok(AdapterConfig::default());
    }

    Ok(serde_yaml::from_str(contents)?)
}

/// Reads the config as written on disk, `${VAR}` placeholders untouched.
pub fn read_config_raw(file_path: &Path) -> Result<AdapterConfig, ReadConfigError> {
    let contents = fs::read_to_string(file_path)?;
    parse_config(&contents)
}

/// Reads the config with `${VAR}` placeholders resolved. `None` when the file does not exist.
pub fn read_config(file_path: &Path) -> Result<Option<AdapterConfig>, ReadConfigError> {
    if !file_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(file_path)?;
    let contents = substitute_env_variables(&contents)?;

    Ok(Some(parse_config(&contents)?))
}

#[derive(thiserror::Error, Debug)]
pub enum WriteConfigError {
    #[error("Could not parse config to string: {0}")]
    CouldNotTurnConfigToString(#[from] serde_yaml::Error),

    #[error("{0}")]
    CouldNotWriteFile(#[from] WriteFileError),

    #[error("Could not re-read config before updating it: {0}")]
    CouldNotReadConfig(#[from] ReadConfigError),
}

pub fn write_config(config: &AdapterConfig, file_path: &Path) -> Result<(), WriteConfigError> {
    let yaml_string = serde_yaml::to_string(config)?;
    write_file(file_path, &yaml_string)?;
    Ok(())
}

/// Records new hashes in the config file. The raw file is re-read so resolved env values are
/// never written back.
pub fn persist_config_hashes(
    file_path: &Path,
    hashes: &ContentHashes,
) -> Result<(), WriteConfigError> {
    let mut raw = read_config_raw(file_path)?;
    raw.hashes = hashes.clone();
    write_config(&raw, file_path)
}
