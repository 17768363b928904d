//! Runtime used by generated adapters: contract registry, provider/signer client and the
//! init-once adapter factory.

mod adapter;
mod args;
mod client;
mod error;
mod registry;
pub mod types;

pub use adapter::{DynamicMethodTable, EthAdapter, MethodMetadata, MethodParam, MethodTable};
pub use args::IntoSolArg;
pub use client::{
    encode_call, format_ether_fixed, resolve_function, ContractClient, ContractHandle,
    ContractReadResult, ContractWriteResult, NetworkInfo, ReadResponse, WriteResponse,
};
pub use error::{AdapterError, ContractCallError};
pub use registry::{RuntimeContract, RuntimeRegistry};
