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

pub type ContractMethodsTable = ContractMethods;

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

/// Solidity types by the names used in the ABI, arrays spelled `<type>array`.
pub mod abi_types {
    pub use ethadapter::runtime::types::*;
    pub type addressarray = Vec<address>;
    pub type tuplearray = Vec<tuple>;
    pub type uint256array = Vec<uint256>;
    pub type uint256array3 = [uint256; 3];
    pub type uint256arrayarray2 = [uint256array; 2];
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EMPTY_Methods;

impl EMPTY_Methods {
    pub const METADATA: &'static [MethodMetadata] = &[];
}

/// `STORAGE.get()` view, returns `(uint256)`
pub async fn STORAGE_function_get_view_IN0_OUT1(client: &ContractClient) -> ContractReadResult {
    client.call("STORAGE", "get", vec![])
        .await
        .map_err(ContractCallError::from)
}

pub const STORAGE_function_get_view_IN0_OUT1_PARAMS: &[MethodParam] = &[];

pub const STORAGE_function_get_view_IN0_OUT1_METADATA: MethodMetadata = MethodMetadata {
    contract: "STORAGE",
    name: "get",
    identifier: "STORAGE_function_get_view_IN0_OUT1",
    accessor: "get",
    state_mutability: "view",
    params: STORAGE_function_get_view_IN0_OUT1_PARAMS,
};

/// `STORAGE.set(uint256 x)` nonpayable, returns `()`
pub async fn STORAGE_function_set_nonpayable_IN1_OUT0(client: &ContractClient, x: abi_types::uint256) -> ContractWriteResult {
    client.send("STORAGE", "set", vec![x.into_sol_arg()], None)
        .await
        .map_err(ContractCallError::from)
}

pub const STORAGE_function_set_nonpayable_IN1_OUT0_PARAMS: &[MethodParam] = &[MethodParam { name: "x", type_: "uint256" }];

pub const STORAGE_function_set_nonpayable_IN1_OUT0_METADATA: MethodMetadata = MethodMetadata {
    contract: "STORAGE",
    name: "set",
    identifier: "STORAGE_function_set_nonpayable_IN1_OUT0",
    accessor: "set",
    state_mutability: "nonpayable",
    params: STORAGE_function_set_nonpayable_IN1_OUT0_PARAMS,
};

/// `STORAGE.match(address self, uint8 move)` pure, returns `(bool)`
pub async fn STORAGE_function_match_pure_IN2_OUT1(client: &ContractClient, self_: abi_types::address, r#move: abi_types::uint8) -> ContractReadResult {
    client.call("STORAGE", "match", vec![self_.into_sol_arg(), r#move.into_sol_arg()])
        .await
        .map_err(ContractCallError::from)
}

pub const STORAGE_function_match_pure_IN2_OUT1_PARAMS: &[MethodParam] = &[MethodParam { name: "self", type_: "address" }, MethodParam { name: "move", type_: "uint8" }];

pub const STORAGE_function_match_pure_IN2_OUT1_METADATA: MethodMetadata = MethodMetadata {
    contract: "STORAGE",
    name: "match",
    identifier: "STORAGE_function_match_pure_IN2_OUT1",
    accessor: "match",
    state_mutability: "pure",
    params: STORAGE_function_match_pure_IN2_OUT1_PARAMS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct STORAGE_Methods;

impl STORAGE_Methods {
    pub const METADATA: &'static [MethodMetadata] = &[STORAGE_function_get_view_IN0_OUT1_METADATA, STORAGE_function_set_nonpayable_IN1_OUT0_METADATA, STORAGE_function_match_pure_IN2_OUT1_METADATA];

    pub async fn get(&self, client: &ContractClient) -> ContractReadResult {
        STORAGE_function_get_view_IN0_OUT1(client).await
    }

    pub async fn set(&self, client: &ContractClient, x: abi_types::uint256) -> ContractWriteResult {
        STORAGE_function_set_nonpayable_IN1_OUT0(client, x).await
    }

    pub async fn r#match(&self, client: &ContractClient, self_: abi_types::address, r#move: abi_types::uint8) -> ContractReadResult {
        STORAGE_function_match_pure_IN2_OUT1(client, self_, r#move).await
    }
}

/// `TOKEN.balanceOf(address owner)` view, returns `(uint256)`
pub async fn TOKEN_function_balanceOf_view_IN1_OUT1(client: &ContractClient, owner: abi_types::address) -> ContractReadResult {
    client.call("TOKEN", "balanceOf", vec![owner.into_sol_arg()])
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_balanceOf_view_IN1_OUT1_PARAMS: &[MethodParam] = &[MethodParam { name: "owner", type_: "address" }];

pub const TOKEN_function_balanceOf_view_IN1_OUT1_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "balanceOf",
    identifier: "TOKEN_function_balanceOf_view_IN1_OUT1",
    accessor: "balanceOf",
    state_mutability: "view",
    params: TOKEN_function_balanceOf_view_IN1_OUT1_PARAMS,
};

/// `TOKEN.transfer(address to, uint256 amount)` nonpayable, returns `(bool)`
pub async fn TOKEN_function_transfer_nonpayable_IN2_OUT1(client: &ContractClient, to: abi_types::address, amount: abi_types::uint256) -> ContractWriteResult {
    client.send("TOKEN", "transfer(address,uint256)", vec![to.into_sol_arg(), amount.into_sol_arg()], None)
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_transfer_nonpayable_IN2_OUT1_PARAMS: &[MethodParam] = &[MethodParam { name: "to", type_: "address" }, MethodParam { name: "amount", type_: "uint256" }];

pub const TOKEN_function_transfer_nonpayable_IN2_OUT1_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "transfer",
    identifier: "TOKEN_function_transfer_nonpayable_IN2_OUT1",
    accessor: "transfer(address,uint256)",
    state_mutability: "nonpayable",
    params: TOKEN_function_transfer_nonpayable_IN2_OUT1_PARAMS,
};

/// `TOKEN.transfer(address[] to, uint256[3] amounts)` nonpayable, returns `()`
pub async fn TOKEN_function_transfer_nonpayable_IN2_OUT0(client: &ContractClient, to: abi_types::addressarray, amounts: abi_types::uint256array3) -> ContractWriteResult {
    client.send("TOKEN", "transfer(address[],uint256[3])", vec![to.into_sol_arg(), amounts.into_sol_arg()], None)
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_transfer_nonpayable_IN2_OUT0_PARAMS: &[MethodParam] = &[MethodParam { name: "to", type_: "address[]" }, MethodParam { name: "amounts", type_: "uint256[3]" }];

pub const TOKEN_function_transfer_nonpayable_IN2_OUT0_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "transfer",
    identifier: "TOKEN_function_transfer_nonpayable_IN2_OUT0",
    accessor: "transfer(address[],uint256[3])",
    state_mutability: "nonpayable",
    params: TOKEN_function_transfer_nonpayable_IN2_OUT0_PARAMS,
};

/// `TOKEN.deposit()` payable, returns `()`
pub async fn TOKEN_function_deposit_payable_IN0_OUT0(client: &ContractClient, tx_value: abi_types::uint256) -> ContractWriteResult {
    client.send("TOKEN", "deposit", vec![], Some(tx_value))
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_deposit_payable_IN0_OUT0_PARAMS: &[MethodParam] = &[];

pub const TOKEN_function_deposit_payable_IN0_OUT0_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "deposit",
    identifier: "TOKEN_function_deposit_payable_IN0_OUT0",
    accessor: "deposit",
    state_mutability: "payable",
    params: TOKEN_function_deposit_payable_IN0_OUT0_PARAMS,
};

/// `TOKEN.fund(address client)` payable, returns `()`
pub async fn TOKEN_function_fund_payable_IN1_OUT0(client: &ContractClient, client_1: abi_types::address, tx_value: abi_types::uint256) -> ContractWriteResult {
    client.send("TOKEN", "fund", vec![client_1.into_sol_arg()], Some(tx_value))
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_fund_payable_IN1_OUT0_PARAMS: &[MethodParam] = &[MethodParam { name: "client", type_: "address" }];

pub const TOKEN_function_fund_payable_IN1_OUT0_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "fund",
    identifier: "TOKEN_function_fund_payable_IN1_OUT0",
    accessor: "fund",
    state_mutability: "payable",
    params: TOKEN_function_fund_payable_IN1_OUT0_PARAMS,
};

/// `TOKEN.setConfig(tuple config)` nonpayable, returns `()`
pub async fn TOKEN_function_setConfig_nonpayable_IN1_OUT0(client: &ContractClient, config: abi_types::tuple) -> ContractWriteResult {
    client.send("TOKEN", "setConfig", vec![config.into_sol_arg()], None)
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_setConfig_nonpayable_IN1_OUT0_PARAMS: &[MethodParam] = &[MethodParam { name: "config", type_: "tuple" }];

pub const TOKEN_function_setConfig_nonpayable_IN1_OUT0_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "setConfig",
    identifier: "TOKEN_function_setConfig_nonpayable_IN1_OUT0",
    accessor: "setConfig",
    state_mutability: "nonpayable",
    params: TOKEN_function_setConfig_nonpayable_IN1_OUT0_PARAMS,
};

/// `TOKEN.batch(tuple[] orders, bytes32 ref, uint256[][2] grid)` nonpayable, returns `()`
pub async fn TOKEN_function_batch_nonpayable_IN3_OUT0(client: &ContractClient, orders: abi_types::tuplearray, r#ref: abi_types::bytes32, grid: abi_types::uint256arrayarray2) -> ContractWriteResult {
    client.send("TOKEN", "batch", vec![orders.into_sol_arg(), r#ref.into_sol_arg(), grid.into_sol_arg()], None)
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_batch_nonpayable_IN3_OUT0_PARAMS: &[MethodParam] = &[MethodParam { name: "orders", type_: "tuple[]" }, MethodParam { name: "ref", type_: "bytes32" }, MethodParam { name: "grid", type_: "uint256[][2]" }];

pub const TOKEN_function_batch_nonpayable_IN3_OUT0_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "batch",
    identifier: "TOKEN_function_batch_nonpayable_IN3_OUT0",
    accessor: "batch",
    state_mutability: "nonpayable",
    params: TOKEN_function_batch_nonpayable_IN3_OUT0_PARAMS,
};

/// `TOKEN.describe(string unnamed_1, bytes unnamed_2)` view, returns `(string, bool)`
pub async fn TOKEN_function_describe_view_IN2_OUT2(client: &ContractClient, unnamed_1: abi_types::string, unnamed_2: abi_types::bytes) -> ContractReadResult {
    client.call("TOKEN", "describe", vec![unnamed_1.into_sol_arg(), unnamed_2.into_sol_arg()])
        .await
        .map_err(ContractCallError::from)
}

pub const TOKEN_function_describe_view_IN2_OUT2_PARAMS: &[MethodParam] = &[MethodParam { name: "unnamed_1", type_: "string" }, MethodParam { name: "unnamed_2", type_: "bytes" }];

pub const TOKEN_function_describe_view_IN2_OUT2_METADATA: MethodMetadata = MethodMetadata {
    contract: "TOKEN",
    name: "describe",
    identifier: "TOKEN_function_describe_view_IN2_OUT2",
    accessor: "describe",
    state_mutability: "view",
    params: TOKEN_function_describe_view_IN2_OUT2_PARAMS,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TOKEN_Methods;

impl TOKEN_Methods {
    pub const METADATA: &'static [MethodMetadata] = &[TOKEN_function_balanceOf_view_IN1_OUT1_METADATA, TOKEN_function_transfer_nonpayable_IN2_OUT1_METADATA, TOKEN_function_transfer_nonpayable_IN2_OUT0_METADATA, TOKEN_function_deposit_payable_IN0_OUT0_METADATA, TOKEN_function_fund_payable_IN1_OUT0_METADATA, TOKEN_function_setConfig_nonpayable_IN1_OUT0_METADATA, TOKEN_function_batch_nonpayable_IN3_OUT0_METADATA, TOKEN_function_describe_view_IN2_OUT2_METADATA];

    pub async fn balanceOf(&self, client: &ContractClient, owner: abi_types::address) -> ContractReadResult {
        TOKEN_function_balanceOf_view_IN1_OUT1(client, owner).await
    }

    pub async fn transfer_nonpayable_IN2_OUT1(&self, client: &ContractClient, to: abi_types::address, amount: abi_types::uint256) -> ContractWriteResult {
        TOKEN_function_transfer_nonpayable_IN2_OUT1(client, to, amount).await
    }

    pub async fn transfer_nonpayable_IN2_OUT0(&self, client: &ContractClient, to: abi_types::addressarray, amounts: abi_types::uint256array3) -> ContractWriteResult {
        TOKEN_function_transfer_nonpayable_IN2_OUT0(client, to, amounts).await
    }

    pub async fn deposit(&self, client: &ContractClient, tx_value: abi_types::uint256) -> ContractWriteResult {
        TOKEN_function_deposit_payable_IN0_OUT0(client, tx_value).await
    }

    pub async fn fund(&self, client: &ContractClient, client_1: abi_types::address, tx_value: abi_types::uint256) -> ContractWriteResult {
        TOKEN_function_fund_payable_IN1_OUT0(client, client_1, tx_value).await
    }

    pub async fn setConfig(&self, client: &ContractClient, config: abi_types::tuple) -> ContractWriteResult {
        TOKEN_function_setConfig_nonpayable_IN1_OUT0(client, config).await
    }

    pub async fn batch(&self, client: &ContractClient, orders: abi_types::tuplearray, r#ref: abi_types::bytes32, grid: abi_types::uint256arrayarray2) -> ContractWriteResult {
        TOKEN_function_batch_nonpayable_IN3_OUT0(client, orders, r#ref, grid).await
    }

    pub async fn describe(&self, client: &ContractClient, unnamed_1: abi_types::string, unnamed_2: abi_types::bytes) -> ContractReadResult {
        TOKEN_function_describe_view_IN2_OUT2(client, unnamed_1, unnamed_2).await
    }
}

/// Generated functions grouped by contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractMethods {
    pub EMPTY: EMPTY_Methods,
    pub STORAGE: STORAGE_Methods,
    pub TOKEN: TOKEN_Methods,
}

impl MethodTable for ContractMethods {
    fn contract_names(&self) -> Vec<&str> {
        vec!["EMPTY", "STORAGE", "TOKEN"]
    }

    fn contract_methods(&self, contract: &str) -> Option<&[MethodMetadata]> {
        match contract {
            "EMPTY" => Some(EMPTY_Methods::METADATA),
            "STORAGE" => Some(STORAGE_Methods::METADATA),
            "TOKEN" => Some(TOKEN_Methods::METADATA),
            _ => None,
        }
    }
}

