use std::{collections::BTreeSet, path::PathBuf};

use ethadapter::{
    artifacts::list_artifact_files,
    generator::ProjectPaths,
    manifest::{config::AdapterConfig, yaml::write_config},
};

use crate::console::{print_success_message, print_warn_message, prompt_for_address};

const ADDRESS_ATTEMPTS: usize = 3;

pub async fn handle_init_command(
    project_path: PathBuf,
    overwrite: bool,
    prompt: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let paths = ProjectPaths::from_project_path(&project_path);

    if paths.config.exists() && !overwrite {
        return Err(format!(
            "{} already exists, pass --overwrite to replace it.",
            paths.config.display()
        )
        .into());
    }

    let files = list_artifact_files(&paths.artifacts).await?;
    let names: BTreeSet<String> = files.into_iter().map(|file| file.contract_name).collect();
    if names.is_empty() {
        print_warn_message(&format!(
            "No artifacts found in {}, contractAddresses will be empty.",
            paths.artifacts.display()
        ));
    }

    let mut config = AdapterConfig::for_artifacts(&names);
    if prompt {
        for (name, address) in config.contract_addresses.iter_mut() {
            *address = prompt_for_address(name, ADDRESS_ATTEMPTS)?;
        }
    }

    write_config(&config, &paths.config)?;
    print_success_message(&format!(
        "Wrote {} with {} contracts.",
        paths.config.display(),
        config.contract_addresses.len()
    ));

    Ok(())
}
