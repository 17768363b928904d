use std::path::{Path, PathBuf};

use ethadapter::{
    generator::{build_adapter, BuildOptions, BuildOutcome, ProjectPaths},
    manifest::amend::ConfigAmendment,
};

use crate::console::{print_success_message, print_warn_message, prompt_for_confirmation};

pub struct BuildDetails {
    pub force: bool,
    pub format: bool,
    pub artifacts: Option<String>,
    pub output: Option<String>,
    pub template: Option<String>,
}

fn describe_amendment(amendment: &ConfigAmendment) {
    print_warn_message("The artifacts no longer match contractAddresses in ethadapter.yaml:");
    for (from, to) in &amendment.renamed {
        println!("  {} -> {}", from, to);
    }
    for name in &amendment.added {
        println!("  + {}", name);
    }
    for name in &amendment.removed {
        println!("  - {}", name);
    }
}

fn confirm_amendment(amendment: &ConfigAmendment) -> bool {
    describe_amendment(amendment);
    prompt_for_confirmation("Update ethadapter.yaml?").unwrap_or(false)
}

pub async fn handle_build_command(
    project_path: PathBuf,
    details: BuildDetails,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut paths = ProjectPaths::from_project_path(&project_path);
    if let Some(artifacts) = &details.artifacts {
        paths = paths.with_artifacts(Path::new(artifacts));
    }
    if let Some(output) = &details.output {
        paths = paths.with_output(Path::new(output));
    }
    if let Some(template) = &details.template {
        paths = paths.with_template(Path::new(template));
    }

    let options = BuildOptions {
        force: details.force,
        format: details.format,
        confirm_amendment: Some(&confirm_amendment),
        ..BuildOptions::from_process_env()
    };

    match build_adapter(&paths, &options).await? {
        BuildOutcome::Skipped => {
            print_success_message("Artifacts and contract addresses unchanged, build skipped.");
        }
        BuildOutcome::Generated(summary) => {
            for warning in &summary.warnings {
                print_warn_message(&warning.to_string());
            }
            print_success_message(&format!(
                "Generated {} functions for {} ({} addresses) in {}",
                summary.functions,
                summary.contracts.join(", "),
                summary.source,
                paths.output.display()
            ));
        }
    }

    Ok(())
}
