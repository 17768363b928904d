use std::path::PathBuf;

use ethadapter::generator::{amend_project_config, ProjectPaths};

use crate::console::{print_success_message, print_warn_message};

pub async fn handle_amend_command(project_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let paths = ProjectPaths::from_project_path(&project_path);

    if !paths.config.exists() {
        return Err(format!(
            "{} does not exist, run `ethadapter init` first.",
            paths.config.display()
        )
        .into());
    }

    match amend_project_config(&paths).await? {
        None => print_success_message("contractAddresses already matches the artifacts."),
        Some(amendment) => {
            for (from, to) in &amendment.renamed {
                println!("  {} -> {}", from, to);
            }
            for name in &amendment.added {
                println!("  + {}", name);
            }
            for name in &amendment.removed {
                print_warn_message(&format!("  - {} (no matching artifact)", name));
            }
            print_success_message(&format!("Amended {}.", paths.config.display()));
        }
    }

    Ok(())
}
