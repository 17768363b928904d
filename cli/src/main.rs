use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use ethadapter::{level_from_verbosity, load_env_from_project_path, setup_logger};

use crate::{
    cli_interface::{Commands, CLI},
    commands::{
        amend::handle_amend_command,
        build::{handle_build_command, BuildDetails},
        hash::handle_hash_command,
        init::handle_init_command,
    },
    console::print_error_message,
};

mod cli_interface;
mod commands;
mod console;

fn resolve_path(override_path: &Option<String>) -> Result<PathBuf, String> {
    match override_path {
        Some(path) => {
            let path = PathBuf::from_str(path).map_err(|_| "Invalid path provided.".to_string())?;
            Ok(path)
        }
        None => {
            Ok(std::env::current_dir()
                .map_err(|_| "Failed to get current directory.".to_string())?)
        }
    }
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Build { path, force, format, artifacts, output, template } => {
            let resolved_path = resolve_path(&path)?;
            load_env_from_project_path(&resolved_path);
            handle_build_command(
                resolved_path,
                BuildDetails { force, format, artifacts, output, template },
            )
            .await
        }
        Commands::Init { path, overwrite, no_prompt } => {
            let resolved_path = resolve_path(&path)?;
            handle_init_command(resolved_path, overwrite, !no_prompt).await
        }
        Commands::Amend { path } => {
            let resolved_path = resolve_path(&path)?;
            handle_amend_command(resolved_path).await
        }
        Commands::Hash { path } => {
            let resolved_path = resolve_path(&path)?;
            load_env_from_project_path(&resolved_path);
            handle_hash_command(resolved_path).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = CLI::parse();
    setup_logger(level_from_verbosity(cli.verbose, cli.quiet));

    if let Err(e) = run(cli.command).await {
        print_error_message(&e.to_string());
        std::process::exit(1);
    }
}
