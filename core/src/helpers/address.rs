use std::str::FromStr;

use alloy::primitives::Address;

/// Placeholder written for contracts whose deployed address is not known yet.
pub const UNSET_ADDRESS: &str = "0x0";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum InvalidAddressError {
    #[error("Address cannot be empty")]
    Empty,

    #[error("Invalid address format: '{0}'. Ethereum addresses must start with '0x'")]
    MissingPrefix(String),

    #[error(
        "Invalid address length: '{0}'. Ethereum addresses must be exactly 42 characters (0x + 40 hex characters)"
    )]
    InvalidLength(String),

    #[error("Invalid address: '{0}' contains non hex characters")]
    NotHex(String),
}

pub fn validate_address(address: &str) -> Result<Address, InvalidAddressError> {
    let address = address.trim();

    if address.is_empty() {
        return Err(InvalidAddressError::Empty);
    }

    if !address.starts_with("0x") && !address.starts_with("0X") {
        return Err(InvalidAddressError::MissingPrefix(address.to_string()));
    }

    if address.len() != 42 {
        return Err(InvalidAddressError::InvalidLength(address.to_string()));
    }

    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InvalidAddressError::NotHex(address.to_string()));
    }

    Address::from_str(&address[2..]).map_err(|_| InvalidAddressError::NotHex(address.to_string()))
}
