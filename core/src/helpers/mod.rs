mod address;
mod file;
mod identifier;

pub use address::{validate_address, InvalidAddressError, UNSET_ADDRESS};
pub use file::{
    format_rust_files, load_env_from_project_path, write_file, FormatFilesError, WriteFileError,
};
pub use identifier::{is_valid_identifier, rust_ident};
