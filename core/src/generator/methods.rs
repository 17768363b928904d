use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::debug;

use crate::{
    abi::{ABIInput, ABIItem, ParamTypeError, SolidityType, StateMutability},
    helpers::{is_valid_identifier, rust_ident},
    registry::ContractRegistry,
};

/// Parameter name of the client every generated function takes first.
pub const CLIENT_PARAM: &str = "client";
/// Trailing parameter of payable functions carrying the value sent along.
pub const VALUE_PARAM: &str = "tx_value";
const RESERVED_PARAM_NAMES: [&str; 2] = [CLIENT_PARAM, VALUE_PARAM];

/// Associated const on the per contract method structs.
pub const METADATA_CONST: &str = "METADATA";
const RESERVED_EXPORT_KEYS: [&str; 1] = [METADATA_CONST];

const UNNAMED_PARAM_PREFIX: &str = "unnamed_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPath {
    /// `view`/`pure`, goes through the read-only provider.
    ReadOnly,
    /// Anything else, needs the signer.
    Signer,
}

impl From<StateMutability> for CallPath {
    fn from(value: StateMutability) -> Self {
        if value.is_read_only() {
            CallPath::ReadOnly
        } else {
            CallPath::Signer
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParam {
    /// Name from the ABI, or an `unnamed_<n>` placeholder.
    pub name: String,
    /// Identifier used in the generated signature.
    pub ident: String,
    /// Type as declared in the ABI, e.g. `uint256[]`.
    pub solidity_type: String,
    pub type_: SolidityType,
}

impl MethodParam {
    pub fn type_token(&self) -> String {
        self.type_.token()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    pub contract_name: String,
    pub method_name: String,
    /// `{contract}_function_{name}_{mutability}_IN{n}_OUT{m}`, unique within the module.
    pub identifier: String,
    /// Method name in the export table, the bare name unless the function is overloaded.
    pub export_key: String,
    /// Bare name, or `name(type1,type2)` when the name is overloaded.
    pub accessor: String,
    pub state_mutability: StateMutability,
    pub call_path: CallPath,
    pub inputs: Vec<MethodParam>,
    pub outputs: Vec<MethodParam>,
}

impl GeneratedFunction {
    pub fn is_payable(&self) -> bool {
        self.state_mutability == StateMutability::Payable
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractFunctions {
    pub contract_name: String,
    pub functions: Vec<GeneratedFunction>,
}

/// How often each function name occurs in one contract's ABI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodNameTable(BTreeMap<String, usize>);

impl MethodNameTable {
    pub fn from_items(items: &[ABIItem]) -> Self {
        let mut counts = BTreeMap::new();
        for item in items.iter().filter(|item| item.is_function()) {
            *counts.entry(item.name.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn count(&self, name: &str) -> usize {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn is_overloaded(&self, name: &str) -> bool {
        self.count(name) > 1
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GenerateMethodsError {
    #[error("Could not read ABI of contract {0}: {1}")]
    InvalidAbi(String, serde_json::Error),

    #[error("Function {function} of contract {contract} has an invalid parameter type: {source}")]
    InvalidParamType { contract: String, function: String, source: ParamTypeError },

    #[error("Contract {contract} has a function named `{function}` which is not a valid identifier")]
    InvalidFunctionName { contract: String, function: String },
}

fn unique(candidate: String, used: &BTreeSet<String>, fallback: impl Fn(usize) -> String) -> String {
    if !used.contains(&candidate) {
        return candidate;
    }

    (2..).map(fallback).find(|name| !used.contains(name)).unwrap_or(candidate)
}

fn plan_params(
    contract: &str,
    function: &str,
    inputs: &[ABIInput],
    placeholder_names: bool,
) -> Result<Vec<MethodParam>, GenerateMethodsError> {
    let mut unnamed = 0;
    let mut used: BTreeSet<String> = RESERVED_PARAM_NAMES.iter().map(|n| n.to_string()).collect();
    let mut params = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.iter().enumerate() {
        let name = if is_valid_identifier(&input.name) || !placeholder_names {
            input.name.clone()
        } else {
            unnamed += 1;
            format!("{UNNAMED_PARAM_PREFIX}{unnamed}")
        };

        let base_ident = rust_ident(&name);
        let position = index + 1;
        let ident = unique(base_ident.clone(), &used, |n| {
            if n == 2 {
                format!("{base_ident}_{position}")
            } else {
                format!("{base_ident}_{position}_{n}")
            }
        });
        used.insert(ident.clone());

        let type_ = SolidityType::parse(&input.type_).map_err(|source| {
            GenerateMethodsError::InvalidParamType {
                contract: contract.to_string(),
                function: function.to_string(),
                source,
            }
        })?;

        params.push(MethodParam { name, ident, solidity_type: input.type_.clone(), type_ });
    }

    Ok(params)
}

fn plan_function(
    contract: &str,
    item: &ABIItem,
    names: &MethodNameTable,
    used_identifiers: &mut BTreeSet<String>,
    used_export_keys: &mut BTreeSet<String>,
) -> Result<GeneratedFunction, GenerateMethodsError> {
    if !is_valid_identifier(&item.name) {
        return Err(GenerateMethodsError::InvalidFunctionName {
            contract: contract.to_string(),
            function: item.name.clone(),
        });
    }

    let state_mutability = item.mutability();
    let inputs = plan_params(contract, &item.name, &item.inputs, true)?;
    let outputs = plan_params(contract, &item.name, &item.outputs, false)?;

    let prefix = format!("{contract}_{}_", item.type_);
    let composite = format!(
        "{prefix}{name}_{state_mutability}_IN{inputs}_OUT{outputs}",
        name = item.name,
        inputs = item.inputs.len(),
        outputs = item.outputs.len(),
    );
    let type_suffix =
        inputs.iter().map(|input| input.type_token()).collect::<Vec<_>>().join("_");
    let identifier = unique(composite.clone(), used_identifiers, |n| {
        if n == 2 && !type_suffix.is_empty() {
            format!("{composite}_{type_suffix}")
        } else {
            format!("{composite}_{n}")
        }
    });
    used_identifiers.insert(identifier.clone());

    let overloaded = names.is_overloaded(&item.name);
    let accessor = if overloaded {
        item.signature().map_err(|source| GenerateMethodsError::InvalidParamType {
            contract: contract.to_string(),
            function: item.name.clone(),
            source,
        })?
    } else {
        item.name.clone()
    };

    let disambiguated = identifier.strip_prefix(&prefix).unwrap_or(&identifier).to_string();
    let export_candidate = if overloaded || RESERVED_EXPORT_KEYS.contains(&item.name.as_str()) {
        disambiguated.clone()
    } else {
        item.name.clone()
    };
    let export_key = unique(export_candidate, used_export_keys, |n| {
        if n == 2 {
            disambiguated.clone()
        } else {
            format!("{disambiguated}_{n}")
        }
    });
    used_export_keys.insert(export_key.clone());

    debug!("Planned {} as {} ({})", accessor, identifier, export_key);

    Ok(GeneratedFunction {
        contract_name: contract.to_string(),
        method_name: item.name.clone(),
        identifier,
        export_key,
        accessor,
        state_mutability,
        call_path: state_mutability.into(),
        inputs,
        outputs,
    })
}

fn plan_contract(
    contract: &str,
    items: &[ABIItem],
    names: &MethodNameTable,
    used_identifiers: &mut BTreeSet<String>,
) -> Result<ContractFunctions, GenerateMethodsError> {
    let mut used_export_keys: BTreeSet<String> =
        RESERVED_EXPORT_KEYS.iter().map(|key| key.to_string()).collect();
    let mut functions = Vec::new();

    for item in items {
        if !item.is_function() {
            debug!("Skipping {} {} of {}", item.type_, item.name, contract);
            continue;
        }

        functions.push(plan_function(
            contract,
            item,
            names,
            used_identifiers,
            &mut used_export_keys,
        )?);
    }

    Ok(ContractFunctions { contract_name: contract.to_string(), functions })
}

/// Plans one wrapper per callable function of every contract, contracts in name order.
/// A contract without callable functions still gets an (empty) entry.
pub fn plan_methods(
    registry: &ContractRegistry,
) -> Result<Vec<ContractFunctions>, GenerateMethodsError> {
    plan_methods_from_abis(
        registry.contracts().map(|contract| (contract.name.as_str(), &contract.abi)),
    )
}

pub fn plan_methods_from_abis<'a>(
    abis: impl IntoIterator<Item = (&'a str, &'a Value)>,
) -> Result<Vec<ContractFunctions>, GenerateMethodsError> {
    let mut parsed = Vec::new();
    for (contract, abi) in abis {
        let items = ABIItem::read_abi_items(abi)
            .map_err(|e| GenerateMethodsError::InvalidAbi(contract.to_string(), e))?;
        let names = MethodNameTable::from_items(&items);
        parsed.push((contract, items, names));
    }

    let mut used_identifiers = BTreeSet::new();
    parsed
        .iter()
        .map(|(contract, items, names)| plan_contract(contract, items, names, &mut used_identifiers))
        .collect()
}
