pub mod amend;
pub mod config;
pub mod yaml;
