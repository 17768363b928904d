pub mod amend;
pub mod build;
pub mod hash;
pub mod init;
