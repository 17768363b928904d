use std::collections::BTreeMap;

use super::methods::{
    CallPath, ContractFunctions, GeneratedFunction, CLIENT_PARAM, METADATA_CONST, VALUE_PARAM,
};
use crate::{
    abi::{ArrayDimension, SolidityType},
    helpers::rust_ident,
    registry::ContractRegistry,
    runtime::types::is_builtin_type,
    types::code::Code,
};

const TYPES_MODULE: &str = "abi_types";
const EXPORT_TABLE: &str = "ContractMethods";

fn methods_struct_name(contract: &str) -> String {
    format!("{contract}_Methods")
}

fn params_const_name(function: &GeneratedFunction) -> String {
    format!("{}_PARAMS", function.identifier)
}

fn metadata_const_name(function: &GeneratedFunction) -> String {
    format!("{}_{METADATA_CONST}", function.identifier)
}

fn collect_type_aliases(type_: &SolidityType, aliases: &mut BTreeMap<String, String>) {
    if !type_.is_array() {
        if !is_builtin_type(&type_.base) {
            aliases.insert(type_.base.clone(), "tuple".to_string());
        }
        return;
    }

    let Some(element) = type_.element() else {
        return;
    };
    let definition = match type_.dimensions.last() {
        Some(ArrayDimension::Fixed(size)) => format!("[{}; {size}]", element.token()),
        _ => format!("Vec<{}>", element.token()),
    };
    aliases.insert(type_.token(), definition);
    collect_type_aliases(&element, aliases);
}

fn generate_types_module(contracts: &[ContractFunctions]) -> Code {
    let mut aliases = BTreeMap::new();
    for function in contracts.iter().flat_map(|contract| &contract.functions) {
        for param in function.inputs.iter().chain(&function.outputs) {
            collect_type_aliases(&param.type_, &mut aliases);
        }
    }

    let alias_code = aliases
        .iter()
        .map(|(token, definition)| format!("    pub type {token} = {definition};\n"))
        .collect::<String>();

    Code::new(format!(
        r#"
/// Solidity types by the names used in the ABI, arrays spelled `<type>array`.
pub mod {TYPES_MODULE} {{
    pub use ethadapter::runtime::types::*;
{alias_code}}}
"#
    ))
}

fn doc_signature(function: &GeneratedFunction) -> String {
    let inputs = function
        .inputs
        .iter()
        .map(|p| format!("{} {}", p.solidity_type, p.name))
        .collect::<Vec<_>>()
        .join(", ");
    let outputs =
        function.outputs.iter().map(|p| p.solidity_type.as_str()).collect::<Vec<_>>().join(", ");

    format!(
        "`{contract}.{name}({inputs})` {mutability}, returns `({outputs})`",
        contract = function.contract_name,
        name = function.method_name,
        mutability = function.state_mutability,
    )
}

fn typed_params(function: &GeneratedFunction) -> String {
    let mut params = vec![format!("{CLIENT_PARAM}: &ContractClient")];
    params.extend(
        function
            .inputs
            .iter()
            .map(|p| format!("{}: {TYPES_MODULE}::{}", p.ident, p.type_token())),
    );
    if function.is_payable() {
        params.push(format!("{VALUE_PARAM}: {TYPES_MODULE}::uint256"));
    }
    params.join(", ")
}

fn forwarded_args(function: &GeneratedFunction) -> String {
    let mut args = vec![CLIENT_PARAM.to_string()];
    args.extend(function.inputs.iter().map(|p| p.ident.clone()));
    if function.is_payable() {
        args.push(VALUE_PARAM.to_string());
    }
    args.join(", ")
}

fn result_type(function: &GeneratedFunction) -> &'static str {
    match function.call_path {
        CallPath::ReadOnly => "ContractReadResult",
        CallPath::Signer => "ContractWriteResult",
    }
}

fn generate_function(function: &GeneratedFunction) -> Code {
    let args = function
        .inputs
        .iter()
        .map(|p| format!("{}.into_sol_arg()", p.ident))
        .collect::<Vec<_>>()
        .join(", ");

    let call = match function.call_path {
        CallPath::ReadOnly => format!(
            "{CLIENT_PARAM}.call({contract:?}, {accessor:?}, vec![{args}])",
            contract = function.contract_name,
            accessor = function.accessor,
        ),
        CallPath::Signer => format!(
            "{CLIENT_PARAM}.send({contract:?}, {accessor:?}, vec![{args}], {value})",
            contract = function.contract_name,
            accessor = function.accessor,
            value = if function.is_payable() {
                format!("Some({VALUE_PARAM})")
            } else {
                "None".to_string()
            },
        ),
    };

    let params = function
        .inputs
        .iter()
        .map(|p| format!("MethodParam {{ name: {:?}, type_: {:?} }}", p.name, p.solidity_type))
        .collect::<Vec<_>>()
        .join(", ");

    Code::new(format!(
        r#"
/// {doc}
pub async fn {identifier}({typed_params}) -> {result_type} {{
    {call}
        .await
        .map_err(ContractCallError::from)
}}

pub const {params_const}: &[MethodParam] = &[{params}];

pub const {metadata_const}: MethodMetadata = MethodMetadata {{
    contract: {contract:?},
    name: {name:?},
    identifier: {identifier:?},
    accessor: {accessor:?},
    state_mutability: {state_mutability:?},
    params: {params_const},
}};
"#,
        doc = doc_signature(function),
        identifier = function.identifier,
        typed_params = typed_params(function),
        result_type = result_type(function),
        params_const = params_const_name(function),
        metadata_const = metadata_const_name(function),
        contract = function.contract_name,
        name = function.method_name,
        accessor = function.accessor,
        state_mutability = function.state_mutability.as_str(),
    ))
}

fn generate_contract_methods(contract: &ContractFunctions) -> Code {
    let struct_name = methods_struct_name(&contract.contract_name);

    let metadata = contract
        .functions
        .iter()
        .map(metadata_const_name)
        .collect::<Vec<_>>()
        .join(", ");

    let methods = contract
        .functions
        .iter()
        .map(|function| {
            format!(
                r#"
    pub async fn {method}(&self, {typed_params}) -> {result_type} {{
        {identifier}({forwarded}).await
    }}
"#,
                method = rust_ident(&function.export_key),
                typed_params = typed_params(function),
                result_type = result_type(function),
                identifier = function.identifier,
                forwarded = forwarded_args(function),
            )
        })
        .collect::<String>();

    Code::new(format!(
        r#"
#[derive(Debug, Clone, Copy, Default)]
pub struct {struct_name};

impl {struct_name} {{
    pub const {METADATA_CONST}: &'static [MethodMetadata] = &[{metadata}];
{methods}}}
"#
    ))
}

fn generate_export_table(contracts: &[ContractFunctions]) -> Code {
    let fields = contracts
        .iter()
        .map(|c| format!("    pub {}: {},\n", c.contract_name, methods_struct_name(&c.contract_name)))
        .collect::<String>();

    let lookups = contracts
        .iter()
        .map(|c| {
            format!(
                "            {:?} => Some({}::{METADATA_CONST}),\n",
                c.contract_name,
                methods_struct_name(&c.contract_name)
            )
        })
        .collect::<String>();

    let names =
        contracts.iter().map(|c| format!("{:?}", c.contract_name)).collect::<Vec<_>>().join(", ");

    Code::new(format!(
        r#"
/// Generated functions grouped by contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct {EXPORT_TABLE} {{
{fields}}}

impl MethodTable for {EXPORT_TABLE} {{
    fn contract_names(&self) -> Vec<&str> {{
        vec![{names}]
    }}

    fn contract_methods(&self, contract: &str) -> Option<&[MethodMetadata]> {{
        match contract {{
{lookups}            _ => None,
        }}
    }}
}}
"#
    ))
}

/// The generated section of the adapter: type aliases, one function per contract function,
/// and the export table.
pub fn generate_adapter_code(contracts: &[ContractFunctions]) -> Code {
    let mut code = generate_types_module(contracts);

    for contract in contracts {
        for function in &contract.functions {
            code.push_str(&generate_function(function));
        }
        code.push_str(&generate_contract_methods(contract));
    }

    code.push_str(&generate_export_table(contracts));
    code
}

pub fn generate_contract_names_code(registry: &ContractRegistry) -> Code {
    let names = registry.names();

    let variants = names.iter().map(|name| format!("    {name},\n")).collect::<String>();
    let all =
        names.iter().map(|name| format!("ContractName::{name}")).collect::<Vec<_>>().join(", ");
    let arms = if names.is_empty() {
        "        match *self {}\n".to_string()
    } else {
        let arms = names
            .iter()
            .map(|name| format!("            ContractName::{name} => {name:?},\n"))
            .collect::<String>();
        format!("        match self {{\n{arms}        }}\n")
    };

    Code::new(format!(
        r#"// @generated by ethadapter. Do not edit, run `ethadapter build` to regenerate.

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractName {{
{variants}}}

impl ContractName {{
    pub const ALL: &'static [ContractName] = &[{all}];

    pub fn as_str(&self) -> &'static str {{
{arms}    }}
}}

impl std::fmt::Display for ContractName {{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {{
        f.write_str(self.as_str())
    }}
}}
"#
    ))
}

pub fn generate_mod_code() -> Code {
    Code::from(
        r#"#![allow(dead_code)]
// @generated by ethadapter. Do not edit, run `ethadapter build` to regenerate.
pub mod adapter;
pub mod contract_names;
"#,
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::generator::methods::plan_methods_from_abis;

    fn token_code() -> Code {
        let abi = json!([
            {"type": "function", "name": "balanceOf", "stateMutability": "view",
             "inputs": [{"name": "owner", "type": "address"}],
             "outputs": [{"name": "", "type": "uint256"}]},
            {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
             "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
             "outputs": [{"name": "", "type": "bool"}]},
            {"type": "function", "name": "transfer", "stateMutability": "nonpayable",
             "inputs": [{"name": "to", "type": "address[]"}, {"name": "amounts", "type": "uint256[3]"}],
             "outputs": []},
            {"type": "function", "name": "deposit", "stateMutability": "payable", "inputs": [], "outputs": []}
        ]);
        let contracts = plan_methods_from_abis([("TOKEN", &abi)]).unwrap();
        generate_adapter_code(&contracts)
    }

    #[test]
    fn test_read_function_uses_call() {
        let code = token_code();

        assert!(code.as_str().contains(
            "pub async fn TOKEN_function_balanceOf_view_IN1_OUT1(client: &ContractClient, owner: abi_types::address) -> ContractReadResult {"
        ));
        assert!(code.as_str().contains(
            "client.call(\"TOKEN\", \"balanceOf\", vec![owner.into_sol_arg()])"
        ));
        assert!(code.as_str().contains(".map_err(ContractCallError::from)"));
    }

    #[test]
    fn test_write_function_uses_send_with_overload_accessor() {
        let code = token_code();

        assert!(code.as_str().contains(
            "client.send(\"TOKEN\", \"transfer(address,uint256)\", vec![to.into_sol_arg(), amount.into_sol_arg()], None)"
        ));
        assert!(code.as_str().contains("-> ContractWriteResult {"));
    }

    #[test]
    fn test_payable_function_takes_value() {
        let code = token_code();

        assert!(code.as_str().contains(
            "pub async fn TOKEN_function_deposit_payable_IN0_OUT0(client: &ContractClient, tx_value: abi_types::uint256)"
        ));
        assert!(code.as_str().contains("vec![], Some(tx_value))"));
    }

    #[test]
    fn test_params_metadata() {
        let code = token_code();

        assert!(code.as_str().contains(
            "pub const TOKEN_function_transfer_nonpayable_IN2_OUT1_PARAMS: &[MethodParam] = &[MethodParam { name: \"to\", type_: \"address\" }, MethodParam { name: \"amount\", type_: \"uint256\" }];"
        ));
        assert!(code.as_str().contains("state_mutability: \"payable\","));
    }

    #[test]
    fn test_array_aliases_are_declared() {
        let code = token_code();

        assert!(code.as_str().contains("pub type addressarray = Vec<address>;"));
        assert!(code.as_str().contains("pub type uint256array3 = [uint256; 3];"));
        assert!(code.as_str().contains("amounts: abi_types::uint256array3"));
    }

    #[test]
    fn test_export_table() {
        let code = token_code();

        assert!(code.as_str().contains("pub struct TOKEN_Methods;"));
        assert!(code.as_str().contains("pub TOKEN: TOKEN_Methods,"));
        assert!(code.as_str().contains("pub async fn balanceOf(&self, client: &ContractClient"));
        assert!(code.as_str().contains("pub async fn transfer_nonpayable_IN2_OUT1(&self"));
        assert!(code.as_str().contains("\"TOKEN\" => Some(TOKEN_Methods::METADATA),"));
    }

    #[test]
    fn test_empty_contract_still_exported() {
        let contracts =
            plan_methods_from_abis([("EMPTY", &json!([{"type": "constructor", "inputs": []}]))])
                .unwrap();

        let code = generate_adapter_code(&contracts);

        assert!(code.as_str().contains("pub struct EMPTY_Methods;"));
        assert!(code.as_str().contains("pub const METADATA: &'static [MethodMetadata] = &[];"));
        assert!(code.as_str().contains("pub EMPTY: EMPTY_Methods,"));
    }

    #[test]
    fn test_unknown_base_types_fall_back_to_tuple() {
        let abi = json!([{"type": "function", "name": "f", "stateMutability": "nonpayable",
            "inputs": [{"name": "rate", "type": "fixed128x18[]"}]}]);
        let contracts = plan_methods_from_abis([("X", &abi)]).unwrap();

        let code = generate_adapter_code(&contracts);

        assert!(code.as_str().contains("pub type fixed128x18 = tuple;"));
        assert!(code.as_str().contains("pub type fixed128x18array = Vec<fixed128x18>;"));
    }
}
