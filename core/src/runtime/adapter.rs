use std::{
    ops::Deref,
    sync::atomic::{AtomicBool, Ordering},
};

use tracing::info;

use super::{client::ContractClient, error::AdapterError};

static ADAPTER_INITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodParam {
    pub name: &'static str,
    pub type_: &'static str,
}

/// Compile-time description of one generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodMetadata {
    pub contract: &'static str,
    pub name: &'static str,
    pub identifier: &'static str,
    /// Bare name, or the full signature when the function is overloaded.
    pub accessor: &'static str,
    pub state_mutability: &'static str,
    pub params: &'static [MethodParam],
}

impl MethodMetadata {
    pub fn is_read_only(&self) -> bool {
        matches!(self.state_mutability, "view" | "pure")
    }

    pub fn is_payable(&self) -> bool {
        self.state_mutability == "payable"
    }
}

/// Lookup over the functions generated for each contract.
pub trait MethodTable {
    fn contract_names(&self) -> Vec<&str>;

    fn contract_methods(&self, contract: &str) -> Option<&[MethodMetadata]>;

    fn method(&self, contract: &str, name: &str) -> Option<&MethodMetadata> {
        self.contract_methods(contract)?
            .iter()
            .find(|method| method.accessor == name || method.identifier == name)
            .or_else(|| {
                let mut matching = self
                    .contract_methods(contract)?
                    .iter()
                    .filter(|method| method.name == name);
                match (matching.next(), matching.next()) {
                    (Some(method), None) => Some(method),
                    _ => None,
                }
            })
    }
}

/// Table used before any artifacts have been generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicMethodTable;

impl MethodTable for DynamicMethodTable {
    fn contract_names(&self) -> Vec<&str> {
        Vec::new()
    }

    fn contract_methods(&self, _contract: &str) -> Option<&[MethodMetadata]> {
        None
    }
}

/// Process-wide adapter: the contract client plus the generated method table.
#[derive(Debug)]
pub struct EthAdapter<M> {
    client: ContractClient,
    methods: M,
}

impl<M: MethodTable> EthAdapter<M> {
    /// Fails with [`AdapterError::AlreadyInitialized`] on every call after the first.
    pub fn initialize(client: ContractClient, methods: M) -> Result<Self, AdapterError> {
        ADAPTER_INITIALIZED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| AdapterError::AlreadyInitialized)?;

        info!(
            "EthAdapter initialized for {} contracts on {}",
            client.registry().len(),
            client.rpc_url()
        );
        Ok(Self { client, methods })
    }

    pub fn client(&self) -> &ContractClient {
        &self.client
    }

    pub fn methods(&self) -> &M {
        &self.methods
    }
}

impl<M> Deref for EthAdapter<M> {
    type Target = ContractClient;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}
