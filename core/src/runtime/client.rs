use std::fmt;

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt, Specifier},
    hex,
    json_abi::{Function, JsonAbi},
    network::EthereumWallet,
    primitives::{utils::format_ether, Address, Bytes, Signature, TxHash, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::{local::PrivateKeySigner, Signer},
};
use alloy_chains::Chain;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{
    args::conform_arg,
    error::{AdapterError, ContractCallError},
    registry::{RuntimeContract, RuntimeRegistry},
};

pub type ContractReadResult = Result<ReadResponse, ContractCallError>;
pub type ContractWriteResult = Result<WriteResponse, ContractCallError>;

/// Decoded outputs of a read-only call, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadResponse {
    pub values: Vec<DynSolValue>,
}

impl ReadResponse {
    /// The only output of a single-return function.
    pub fn single(&self) -> Option<&DynSolValue> {
        match self.values.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }

    pub fn into_values(self) -> Vec<DynSolValue> {
        self.values
    }

    /// Numbers become decimal strings so 256-bit values survive JSON.
    pub fn to_json(&self) -> Value {
        match self.single() {
            Some(value) => sol_value_to_json(value),
            None => Value::Array(self.values.iter().map(sol_value_to_json).collect()),
        }
    }
}

fn sol_value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Address(address) => Value::String(address.to_checksum(None)),
        DynSolValue::Uint(number, _) => Value::String(number.to_string()),
        DynSolValue::Int(number, _) => Value::String(number.to_string()),
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Bytes(bytes) => Value::String(hex::encode_prefixed(bytes)),
        DynSolValue::FixedBytes(word, size) => Value::String(hex::encode_prefixed(&word[..*size])),
        DynSolValue::Array(values) |
        DynSolValue::FixedArray(values) |
        DynSolValue::Tuple(values) => Value::Array(values.iter().map(sol_value_to_json).collect()),
        DynSolValue::Function(function) => Value::String(hex::encode_prefixed(function.as_slice())),
        #[allow(unreachable_patterns)]
        _ => Value::Null,
    }
}

/// Submitted transaction; the receipt is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteResponse {
    pub transaction_hash: TxHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: Option<String>,
}

impl NetworkInfo {
    pub fn from_chain_id(chain_id: u64) -> Self {
        let name = Chain::from_id(chain_id).named().map(|named| named.to_string());
        Self { chain_id, name }
    }
}

/// Ether amount with exactly `decimals` fractional digits, truncated.
pub fn format_ether_fixed(wei: U256, decimals: usize) -> String {
    let ether = format_ether(wei);
    let (whole, fraction) = ether.split_once('.').unwrap_or((ether.as_str(), ""));
    let fraction = &fraction[..fraction.len().min(decimals)];
    if decimals == 0 {
        return whole.to_string();
    }
    format!("{whole}.{fraction:0<decimals$}")
}

/// Selects the ABI function for `accessor`, either a bare name or a full `name(types)`
/// signature for overloaded functions.
pub fn resolve_function<'a>(
    abi: &'a JsonAbi,
    contract: &str,
    accessor: &str,
) -> Result<&'a Function, AdapterError> {
    let unknown = || AdapterError::UnknownFunction {
        contract: contract.to_string(),
        accessor: accessor.to_string(),
    };

    match accessor.split_once('(') {
        Some((name, _)) => abi
            .function(name)
            .and_then(|functions| functions.iter().find(|f| f.signature() == accessor))
            .ok_or_else(unknown),
        None => match abi.function(accessor).map(Vec::as_slice) {
            Some([function]) => Ok(function),
            Some(functions) if !functions.is_empty() => Err(AdapterError::AmbiguousFunction {
                contract: contract.to_string(),
                accessor: accessor.to_string(),
                candidates: functions.iter().map(Function::signature).collect(),
            }),
            _ => Err(unknown()),
        },
    }
}

/// ABI-encodes a call to `function` after checking `args` against its parameters.
pub fn encode_call(function: &Function, args: Vec<DynSolValue>) -> Result<Vec<u8>, AdapterError> {
    let signature = function.signature();
    if args.len() != function.inputs.len() {
        return Err(AdapterError::ArgumentCount {
            function: signature,
            expected: function.inputs.len(),
            actual: args.len(),
        });
    }

    let mut values = Vec::with_capacity(args.len());
    for (param, arg) in function.inputs.iter().zip(args) {
        let invalid = |reason: String| AdapterError::InvalidArgument {
            function: signature.clone(),
            param: param.name.clone(),
            reason,
        };
        let ty: DynSolType = param.resolve().map_err(|e| invalid(e.to_string()))?;
        values.push(conform_arg(arg, &ty).map_err(invalid)?);
    }

    function.abi_encode_input(&values).map_err(|e| AdapterError::Encode(signature, e.to_string()))
}

struct SignerConnection {
    signer: PrivateKeySigner,
    provider: DynProvider,
}

/// A contract resolved for a call: address checked, provider chosen.
pub struct ContractHandle<'a> {
    pub name: &'a str,
    pub address: Address,
    pub abi: &'a JsonAbi,
    provider: &'a DynProvider,
}

impl<'a> ContractHandle<'a> {
    pub fn function(&self, accessor: &str) -> Result<&'a Function, AdapterError> {
        resolve_function(self.abi, self.name, accessor)
    }
}

/// Read-only provider plus an optional signing provider over one RPC endpoint.
pub struct ContractClient {
    registry: RuntimeRegistry,
    rpc_url: Url,
    provider: DynProvider,
    signer: Option<SignerConnection>,
}

impl fmt::Debug for ContractClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractClient")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("contracts", &self.registry.names().collect::<Vec<_>>())
            .field("signer", &self.signer_address())
            .finish()
    }
}

impl ContractClient {
    pub fn connect_http(registry: RuntimeRegistry, rpc_url: &str) -> Result<Self, AdapterError> {
        let url = Url::parse(rpc_url)
            .map_err(|e| AdapterError::InvalidRpcUrl(rpc_url.to_string(), e.to_string()))?;
        let provider = ProviderBuilder::new().connect_http(url.clone()).erased();
        debug!("Connected read-only provider to {}", url);

        Ok(Self { registry, rpc_url: url, provider, signer: None })
    }

    /// Connects the wallet used for state-changing calls and message signing.
    pub fn with_signer(mut self, signer: PrivateKeySigner) -> Self {
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_http(self.rpc_url.clone())
            .erased();
        debug!("Connected signer {} to {}", signer.address(), self.rpc_url);

        self.signer = Some(SignerConnection { signer, provider });
        self
    }

    pub fn with_private_key(self, private_key: &str) -> Result<Self, AdapterError> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e: alloy::signers::local::LocalSignerError| {
                AdapterError::InvalidPrivateKey(e.to_string())
            })?;
        Ok(self.with_signer(signer))
    }

    pub fn registry(&self) -> &RuntimeRegistry {
        &self.registry
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|connection| connection.signer.address())
    }

    fn require_contract(&self, name: &str) -> Result<&RuntimeContract, AdapterError> {
        self.registry.get(name).ok_or_else(|| AdapterError::UnknownContract(name.to_string()))
    }

    fn require_signer(&self, action: &str) -> Result<&SignerConnection, AdapterError> {
        self.signer.as_ref().ok_or_else(|| AdapterError::SignerRequired(action.to_string()))
    }

    fn handle<'a>(
        &'a self,
        contract: &'a RuntimeContract,
        provider: &'a DynProvider,
    ) -> Result<ContractHandle<'a>, AdapterError> {
        let address =
            contract.address.ok_or_else(|| AdapterError::MissingAddress(contract.name.clone()))?;
        Ok(ContractHandle { name: &contract.name, address, abi: &contract.abi, provider })
    }

    pub fn read_only_contract(&self, name: &str) -> Result<ContractHandle<'_>, AdapterError> {
        let contract = self.require_contract(name)?;
        self.handle(contract, &self.provider)
    }

    pub fn signer_contract(&self, name: &str) -> Result<ContractHandle<'_>, AdapterError> {
        let contract = self.require_contract(name)?;
        let connection = self.require_signer(name)?;
        self.handle(contract, &connection.provider)
    }

    /// Executes a view or pure function through `eth_call`.
    pub async fn call(
        &self,
        contract: &str,
        accessor: &str,
        args: Vec<DynSolValue>,
    ) -> Result<ReadResponse, AdapterError> {
        let handle = self.read_only_contract(contract)?;
        let function = handle.function(accessor)?;
        let calldata = encode_call(function, args)?;

        let tx = TransactionRequest::default()
            .to(handle.address)
            .input(Bytes::from(calldata).into());
        let output = handle.provider.call(tx).await.map_err(|e| AdapterError::Rpc(e.to_string()))?;

        let values = function
            .abi_decode_output(&output)
            .map_err(|e| AdapterError::Decode(function.signature(), e.to_string()))?;
        Ok(ReadResponse { values })
    }

    /// Signs and submits a transaction calling a state-changing function.
    pub async fn send(
        &self,
        contract: &str,
        accessor: &str,
        args: Vec<DynSolValue>,
        value: Option<U256>,
    ) -> Result<WriteResponse, AdapterError> {
        let handle = self.signer_contract(contract)?;
        let function = handle.function(accessor)?;
        let calldata = encode_call(function, args)?;

        let mut tx = TransactionRequest::default()
            .to(handle.address)
            .input(Bytes::from(calldata).into());
        if let Some(value) = value {
            tx = tx.value(value);
        }

        let pending = handle
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let transaction_hash = *pending.tx_hash();
        debug!("Sent {}.{}: {}", contract, function.signature(), transaction_hash);

        Ok(WriteResponse { transaction_hash })
    }

    /// Balance of `account` in ether with four decimals.
    pub async fn balance_of(&self, account: Address) -> Result<String, AdapterError> {
        let wei = self
            .provider
            .get_balance(account)
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))?;
        Ok(format_ether_fixed(wei, 4))
    }

    pub async fn signer_balance(&self) -> Result<String, AdapterError> {
        let address = self.require_signer("signer_balance")?.signer.address();
        self.balance_of(address).await
    }

    pub async fn sign_message(&self, message: &str) -> Result<Signature, AdapterError> {
        self.sign_raw(message.as_bytes()).await
    }

    /// Signs the bytes of a `0x`-prefixed hex string rather than its text.
    pub async fn sign_bytes(&self, hex_message: &str) -> Result<Signature, AdapterError> {
        let bytes = hex::decode(hex_message.trim())
            .map_err(|e| AdapterError::InvalidHex(e.to_string()))?;
        self.sign_raw(&bytes).await
    }

    async fn sign_raw(&self, bytes: &[u8]) -> Result<Signature, AdapterError> {
        let connection = self.require_signer("sign_message")?;
        connection.signer.sign_message(bytes).await.map_err(|e| AdapterError::Signing(e.to_string()))
    }

    pub async fn network(&self) -> Result<NetworkInfo, AdapterError> {
        let chain_id =
            self.provider.get_chain_id().await.map_err(|e| AdapterError::Rpc(e.to_string()))?;
        Ok(NetworkInfo::from_chain_id(chain_id))
    }
}
