// @generated by ethadapter. Do not edit, run `ethadapter build` to regenerate.
#![allow(
    non_snake_case,
    non_camel_case_types,
    non_upper_case_globals,
    dead_code,
    unused_imports,
    clippy::all
)]

use ethadapter::runtime::{
    AdapterError, ContractCallError, ContractClient, ContractReadResult, ContractWriteResult,
    DynamicMethodTable, EthAdapter, IntoSolArg, MethodMetadata, MethodParam, MethodTable,
    RuntimeRegistry,
};

/// Name, address and ABI of every contract, as resolved at generation time.
pub const CONTRACTS_JSON: &str = include_str!("contracts.json");

pub type ContractMethodsTable = DynamicMethodTable;

pub fn contract_registry() -> Result<RuntimeRegistry, AdapterError> {
    RuntimeRegistry::from_json(CONTRACTS_JSON)
}

pub fn contract_methods() -> ContractMethodsTable {
    ContractMethodsTable::default()
}

/// Connects a read-only client to `rpc_url` and creates the adapter. Only one adapter can be
/// created per process.
pub fn start_eth_adapter(rpc_url: &str) -> Result<EthAdapter<ContractMethodsTable>, AdapterError> {
    let client = ContractClient::connect_http(contract_registry()?, rpc_url)?;
    EthAdapter::initialize(client, contract_methods())
}

// !! GENERATED FUNCTIONS BELOW HERE
