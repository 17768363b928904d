//! Solidity type names as Rust aliases, so generated signatures read like the ABI.
#![allow(non_camel_case_types)]

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, Bytes, FixedBytes, I256, U256},
};

macro_rules! sol_aliases {
    ($target:ty => $($name:ident),* $(,)?) => {
        $(pub type $name = $target;)*
    };
}

macro_rules! fixed_bytes_aliases {
    ($($name:ident => $size:literal),* $(,)?) => {
        $(pub type $name = FixedBytes<$size>;)*
    };
}

sol_aliases!(U256 =>
    uint, uint8, uint16, uint24, uint32, uint40, uint48, uint56, uint64, uint72, uint80, uint88,
    uint96, uint104, uint112, uint120, uint128, uint136, uint144, uint152, uint160, uint168,
    uint176, uint184, uint192, uint200, uint208, uint216, uint224, uint232, uint240, uint248,
    uint256,
);

sol_aliases!(I256 =>
    int, int8, int16, int24, int32, int40, int48, int56, int64, int72, int80, int88, int96,
    int104, int112, int120, int128, int136, int144, int152, int160, int168, int176, int184,
    int192, int200, int208, int216, int224, int232, int240, int248, int256,
);

fixed_bytes_aliases!(
    bytes1 => 1, bytes2 => 2, bytes3 => 3, bytes4 => 4, bytes5 => 5, bytes6 => 6, bytes7 => 7,
    bytes8 => 8, bytes9 => 9, bytes10 => 10, bytes11 => 11, bytes12 => 12, bytes13 => 13,
    bytes14 => 14, bytes15 => 15, bytes16 => 16, bytes17 => 17, bytes18 => 18, bytes19 => 19,
    bytes20 => 20, bytes21 => 21, bytes22 => 22, bytes23 => 23, bytes24 => 24, bytes25 => 25,
    bytes26 => 26, bytes27 => 27, bytes28 => 28, bytes29 => 29, bytes30 => 30, bytes31 => 31,
    bytes32 => 32,
);

pub type address = Address;
pub type bool = core::primitive::bool;
pub type string = String;
pub type bytes = Bytes;
/// Structs and anything without a dedicated alias are passed as dynamic values.
pub type tuple = DynSolValue;

fn has_width(value: &str, max: usize, step: usize) -> core::primitive::bool {
    value.parse::<usize>().is_ok_and(|width| width > 0 && width <= max && width % step == 0) &&
        !value.starts_with('0')
}

/// Whether `name` is one of the aliases declared in this module.
pub fn is_builtin_type(name: &str) -> core::primitive::bool {
    match name {
        "address" | "bool" | "string" | "bytes" | "tuple" | "uint" | "int" => true,
        _ => {
            if let Some(width) = name.strip_prefix("uint") {
                has_width(width, 256, 8)
            } else if let Some(width) = name.strip_prefix("int") {
                has_width(width, 256, 8)
            } else if let Some(size) = name.strip_prefix("bytes") {
                has_width(size, 32, 1)
            } else {
                false
            }
        }
    }
}
