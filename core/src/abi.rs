use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ABIInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,

    /// Compilers omit the name for unnamed parameters and return values.
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub type_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ABIInput>>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParamTypeError {
    #[error("tuple type specified but no components found")]
    MissingComponents,

    #[error("invalid array suffix in type `{0}`")]
    InvalidArraySuffix(String),
}

impl ABIInput {
    /// Canonical type used in function signatures, tuples are expanded to `(t1,t2)` and keep
    /// their array suffix.
    pub fn format_param_type(&self) -> Result<String, ParamTypeError> {
        let base_type = self.type_.split('[').next().unwrap_or(&self.type_);
        let array_suffix = self.type_.strip_prefix(base_type).unwrap_or("");

        let type_str = match base_type {
            "tuple" => {
                let inner = self
                    .components
                    .as_ref()
                    .ok_or(ParamTypeError::MissingComponents)?
                    .iter()
                    .map(|component| component.format_param_type())
                    .collect::<Result<Vec<_>, _>>()?
                    .join(",");
                format!("({inner})")
            }
            _ => base_type.to_string(),
        };

        Ok(format!("{type_str}{array_suffix}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AbiItemType {
    /// The ABI format defaults a missing `type` to function.
    #[default]
    Function,
    Constructor,
    Event,
    Error,
    Fallback,
    Receive,
    #[serde(other)]
    Unknown,
}

impl AbiItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbiItemType::Function => "function",
            AbiItemType::Constructor => "constructor",
            AbiItemType::Event => "event",
            AbiItemType::Error => "error",
            AbiItemType::Fallback => "fallback",
            AbiItemType::Receive => "receive",
            AbiItemType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AbiItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl StateMutability {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        }
    }

    /// `view` and `pure` functions never change chain state and need no signer.
    pub fn is_read_only(&self) -> bool {
        matches!(self, StateMutability::View | StateMutability::Pure)
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ABIItem {
    #[serde(rename = "type", default)]
    pub type_: AbiItemType,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub inputs: Vec<ABIInput>,

    #[serde(default)]
    pub outputs: Vec<ABIInput>,

    #[serde(rename = "stateMutability", default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<StateMutability>,

    // pre 0.5 compilers describe mutability with these two flags instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
}

impl ABIItem {
    pub fn is_function(&self) -> bool {
        self.type_ == AbiItemType::Function
    }

    pub fn mutability(&self) -> StateMutability {
        if let Some(state_mutability) = self.state_mutability {
            return state_mutability;
        }

        if self.constant == Some(true) {
            StateMutability::View
        } else if self.payable == Some(true) {
            StateMutability::Payable
        } else {
            StateMutability::NonPayable
        }
    }

    /// `name(type1,type2)` as used to select one overload of a function.
    pub fn signature(&self) -> Result<String, ParamTypeError> {
        let params = self
            .inputs
            .iter()
            .map(|input| input.format_param_type())
            .collect::<Result<Vec<_>, _>>()?
            .join(",");

        Ok(format!("{}({})", self.name, params))
    }

    pub fn read_abi_items(abi: &serde_json::Value) -> Result<Vec<ABIItem>, serde_json::Error> {
        serde_json::from_value(abi.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArrayDimension {
    Dynamic,
    Fixed(usize),
}

/// A Solidity type split into its base type and array dimensions. Dimensions are kept in
/// source order, so `uint256[][3]` is a fixed array of three dynamic `uint256` arrays.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolidityType {
    pub base: String,
    pub dimensions: Vec<ArrayDimension>,
}

impl SolidityType {
    pub fn parse(type_: &str) -> Result<Self, ParamTypeError> {
        let base = type_.split('[').next().unwrap_or(type_);
        let mut rest = &type_[base.len()..];
        let mut dimensions = Vec::new();

        while !rest.is_empty() {
            let close = rest
                .find(']')
                .filter(|_| rest.starts_with('['))
                .ok_or_else(|| ParamTypeError::InvalidArraySuffix(type_.to_string()))?;
            let size = &rest[1..close];
            if size.is_empty() {
                dimensions.push(ArrayDimension::Dynamic);
            } else {
                let size = size
                    .parse::<usize>()
                    .map_err(|_| ParamTypeError::InvalidArraySuffix(type_.to_string()))?;
                dimensions.push(ArrayDimension::Fixed(size));
            }
            rest = &rest[close + 1..];
        }

        Ok(Self { base: base.to_string(), dimensions })
    }

    pub fn is_array(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// The type one array level down, `None` for scalars.
    pub fn element(&self) -> Option<SolidityType> {
        let mut dimensions = self.dimensions.clone();
        dimensions.pop()?;
        Some(SolidityType { base: self.base.clone(), dimensions })
    }

    /// Identifier-safe token for the type: every `[]` becomes `array` and every `[N]` becomes
    /// `arrayN`, so `address[]` is `addressarray`.
    pub fn token(&self) -> String {
        let mut token = self.base.clone();
        for dimension in &self.dimensions {
            match dimension {
                ArrayDimension::Dynamic => token.push_str("array"),
                ArrayDimension::Fixed(size) => {
                    token.push_str("array");
                    token.push_str(&size.to_string());
                }
            }
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(json: &str) -> Vec<ABIItem> {
        ABIItem::read_abi_items(&serde_json::from_str(json).unwrap()).unwrap()
    }

    #[test]
    fn test_reads_functions_and_other_items() {
        let abi = items(
            r#"[
                {"type":"constructor","inputs":[],"stateMutability":"nonpayable"},
                {"type":"function","name":"get","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
                {"type":"event","name":"Changed","inputs":[{"indexed":true,"name":"by","type":"address"}],"anonymous":false},
                {"type":"something_new","name":"future"}
            ]"#,
        );

        assert_eq!(abi.len(), 4);
        assert_eq!(abi[0].type_, AbiItemType::Constructor);
        assert!(abi[1].is_function());
        assert_eq!(abi[1].mutability(), StateMutability::View);
        assert_eq!(abi[1].outputs[0].name, "");
        assert_eq!(abi[2].type_, AbiItemType::Event);
        assert_eq!(abi[3].type_, AbiItemType::Unknown);
    }

    #[test]
    fn test_missing_type_defaults_to_function() {
        let abi = items(r#"[{"name":"set","inputs":[{"name":"x","type":"uint256"}]}]"#);
        assert!(abi[0].is_function());
        assert_eq!(abi[0].mutability(), StateMutability::NonPayable);
    }

    #[test]
    fn test_legacy_mutability_flags() {
        let abi = items(
            r#"[
                {"type":"function","name":"a","constant":true,"payable":false},
                {"type":"function","name":"b","constant":false,"payable":true}
            ]"#,
        );
        assert_eq!(abi[0].mutability(), StateMutability::View);
        assert_eq!(abi[1].mutability(), StateMutability::Payable);
    }

    #[test]
    fn test_signature_expands_tuples() {
        let abi = items(
            r#"[{"type":"function","name":"submit","stateMutability":"nonpayable","inputs":[
                {"name":"order","type":"tuple","components":[{"name":"maker","type":"address"},{"name":"amount","type":"uint256"}]},
                {"name":"orders","type":"tuple[]","components":[{"name":"id","type":"bytes32"}]},
                {"name":"ids","type":"uint256[]"}
            ]}]"#,
        );
        assert_eq!(
            abi[0].signature().unwrap(),
            "submit((address,uint256),(bytes32)[],uint256[])"
        );
    }

    #[test]
    fn test_tuple_without_components_is_an_error() {
        let input = ABIInput {
            indexed: None,
            name: "t".to_string(),
            type_: "tuple".to_string(),
            components: None,
        };
        assert_eq!(input.format_param_type(), Err(ParamTypeError::MissingComponents));
    }

    #[test]
    fn test_solidity_type_tokens() {
        assert_eq!(SolidityType::parse("uint256").unwrap().token(), "uint256");
        assert_eq!(SolidityType::parse("uint256[]").unwrap().token(), "uint256array");
        assert_eq!(SolidityType::parse("address[][]").unwrap().token(), "addressarrayarray");
        assert_eq!(SolidityType::parse("bytes32[3]").unwrap().token(), "bytes32array3");

        let nested = SolidityType::parse("uint8[][2]").unwrap();
        assert_eq!(nested.dimensions, vec![ArrayDimension::Dynamic, ArrayDimension::Fixed(2)]);
        assert_eq!(nested.element().unwrap().token(), "uint8array");
        assert_eq!(SolidityType::parse("bool").unwrap().element(), None);
    }

    #[test]
    fn test_invalid_array_suffix() {
        assert!(SolidityType::parse("uint256[").is_err());
        assert!(SolidityType::parse("uint256[x]").is_err());
        assert!(SolidityType::parse("uint256[]]").is_err());
    }
}
