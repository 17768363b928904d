use std::path::PathBuf;

use colored::Colorize;
use ethadapter::{
    generator::{build::current_and_prior_hashes, ProjectPaths},
    hash::PriorHashes,
    manifest::yaml::read_config,
    registry::{env_contract_addresses, process_env_vars},
};

pub async fn handle_hash_command(project_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let paths = ProjectPaths::from_project_path(&project_path);
    let config = read_config(&paths.config)?;
    let env_addresses = env_contract_addresses(process_env_vars());

    let (current, prior) =
        current_and_prior_hashes(&paths, config.as_ref(), &env_addresses).await?;

    println!("{}", "current".green());
    println!("  artifacts: {}", current.artifacts);
    println!("  config:    {}", current.config);

    match prior {
        PriorHashes::Missing => println!("{}", "no hashes recorded yet".yellow()),
        PriorHashes::Corrupt(reason) => {
            println!("{}", format!("recorded hashes unreadable: {}", reason).red())
        }
        PriorHashes::Recorded(recorded) => {
            println!("{}", "recorded".green());
            println!("  artifacts: {}", recorded.artifacts);
            println!("  config:    {}", recorded.config);
            if recorded == current {
                println!("{}", "unchanged, `ethadapter build` will skip".green());
            } else {
                println!("{}", "changed, `ethadapter build` will regenerate".yellow());
            }
        }
    }

    Ok(())
}
