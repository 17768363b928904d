use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum AdapterError {
    #[error("An EthAdapter has already been initialized in this process")]
    AlreadyInitialized,

    #[error("Invalid RPC url {0}: {1}")]
    InvalidRpcUrl(String, String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Could not parse contract descriptors: {0}")]
    InvalidDescriptors(#[from] serde_json::Error),

    #[error("ABI of contract {0} could not be parsed: {1}")]
    InvalidAbi(String, String),

    #[error("Contract {0} is not part of this adapter")]
    UnknownContract(String),

    #[error("Contract {0} has no deployed address configured")]
    MissingAddress(String),

    #[error("Contract {contract} has no function {accessor}")]
    UnknownFunction { contract: String, accessor: String },

    #[error(
        "Function {accessor} of contract {contract} is overloaded, call it by signature: {}",
        .candidates.join(", ")
    )]
    AmbiguousFunction { contract: String, accessor: String, candidates: Vec<String> },

    #[error("{function} expects {expected} arguments, got {actual}")]
    ArgumentCount { function: String, expected: usize, actual: usize },

    #[error("Invalid argument {param} for {function}: {reason}")]
    InvalidArgument { function: String, param: String, reason: String },

    #[error("Could not encode call to {0}: {1}")]
    Encode(String, String),

    #[error("Could not decode result of {0}: {1}")]
    Decode(String, String),

    #[error("A signer is required to call {0}, connect one with `with_signer`")]
    SignerRequired(String),

    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("Could not sign message: {0}")]
    Signing(String),

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),
}

/// Failure value returned by generated functions in place of an error type per call site.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error}")]
pub struct ContractCallError {
    pub error: String,
}

impl From<AdapterError> for ContractCallError {
    fn from(value: AdapterError) -> Self {
        ContractCallError { error: value.to_string() }
    }
}
