use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use dotenv::{dotenv, from_path};
use tracing::debug;

#[derive(thiserror::Error, Debug)]
pub enum WriteFileError {
    #[error("Could not create directory {0}: {1}")]
    CouldNotCreateDir(PathBuf, std::io::Error),

    #[error("Could not create file {0}: {1}")]
    CouldNotCreateFile(PathBuf, std::io::Error),

    #[error("Could not write to file {0}: {1}")]
    CouldNotWriteToFile(PathBuf, std::io::Error),
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), WriteFileError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| WriteFileError::CouldNotCreateDir(dir.to_path_buf(), e))?;
    }

    let mut file =
        File::create(path).map_err(|e| WriteFileError::CouldNotCreateFile(path.to_path_buf(), e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| WriteFileError::CouldNotWriteToFile(path.to_path_buf(), e))?;

    debug!("Wrote {}", path.display());
    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum FormatFilesError {
    #[error("Could not run rustfmt: {0}")]
    CouldNotRunRustfmt(std::io::Error),

    #[error("rustfmt exited with {0}")]
    RustfmtFailed(std::process::ExitStatus),
}

pub fn format_rust_files(paths: &[PathBuf]) -> Result<(), FormatFilesError> {
    if paths.is_empty() {
        return Ok(());
    }

    let status = Command::new("rustfmt")
        .args(["--edition", "2021"])
        .args(paths)
        .status()
        .map_err(FormatFilesError::CouldNotRunRustfmt)?;

    if status.success() {
        Ok(())
    } else {
        Err(FormatFilesError::RustfmtFailed(status))
    }
}

/// Loads `.env` from the project path, falling back to the usual dotenv lookup from the
/// current directory.
pub fn load_env_from_project_path(project_path: &Path) {
    let env_file = project_path.join(".env");
    if env_file.exists() {
        if let Err(e) = from_path(&env_file) {
            debug!("Could not load {}: {}", env_file.display(), e);
        }
    } else {
        dotenv().ok();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("src").join("eth_adapter").join("mod.rs");

        write_file(&path, "pub mod adapter;\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "pub mod adapter;\n");
    }

    #[test]
    fn test_write_file_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abis.json");

        write_file(&path, "{}").unwrap();
        write_file(&path, "{\"A\":[]}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"A\":[]}");
    }
}
