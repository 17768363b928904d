// public
pub mod abi;
pub mod artifacts;
pub mod generator;
pub mod hash;
pub mod manifest;
pub mod registry;
pub mod runtime;

mod helpers;
pub use helpers::{
    load_env_from_project_path, validate_address, write_file, InvalidAddressError,
    WriteFileError, UNSET_ADDRESS,
};

mod logger;
pub use logger::{level_from_verbosity, setup_info_logger, setup_logger};

mod types;
pub use types::code::Code;
