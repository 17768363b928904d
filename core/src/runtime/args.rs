use alloy::{
    dyn_abi::{DynSolType, DynSolValue},
    primitives::{Address, Bytes, FixedBytes, I256, U256},
    sol_types::Word,
};

/// Conversion of a typed argument into the dynamic value the ABI encoder consumes.
///
/// Widths are not known at this point, integers are emitted as 256-bit and fixed bytes as
/// right-padded words. [`conform_arg`] narrows them against the function's parameter types.
pub trait IntoSolArg {
    fn into_sol_arg(self) -> DynSolValue;
}

impl IntoSolArg for DynSolValue {
    fn into_sol_arg(self) -> DynSolValue {
        self
    }
}

impl IntoSolArg for U256 {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::Uint(self, 256)
    }
}

impl IntoSolArg for I256 {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::Int(self, 256)
    }
}

impl IntoSolArg for Address {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::Address(self)
    }
}

impl IntoSolArg for bool {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::Bool(self)
    }
}

impl IntoSolArg for String {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::String(self)
    }
}

impl IntoSolArg for &str {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::String(self.to_string())
    }
}

impl IntoSolArg for Bytes {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::Bytes(self.to_vec())
    }
}

impl<const N: usize> IntoSolArg for FixedBytes<N> {
    fn into_sol_arg(self) -> DynSolValue {
        let mut word = Word::ZERO;
        let size = N.min(32);
        word[..size].copy_from_slice(&self[..size]);
        DynSolValue::FixedBytes(word, size)
    }
}

impl<T: IntoSolArg> IntoSolArg for Vec<T> {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::Array(self.into_iter().map(IntoSolArg::into_sol_arg).collect())
    }
}

impl<T: IntoSolArg, const N: usize> IntoSolArg for [T; N] {
    fn into_sol_arg(self) -> DynSolValue {
        DynSolValue::FixedArray(self.into_iter().map(IntoSolArg::into_sol_arg).collect())
    }
}

macro_rules! unsigned_sol_args {
    ($($ty:ty),*) => {
        $(
            impl IntoSolArg for $ty {
                fn into_sol_arg(self) -> DynSolValue {
                    DynSolValue::Uint(U256::from(self), 256)
                }
            }
        )*
    };
}

unsigned_sol_args!(u8, u16, u32, u64, u128);

/// Narrows `value` to the shape of `ty`, rejecting values the parameter cannot hold.
pub(crate) fn conform_arg(value: DynSolValue, ty: &DynSolType) -> Result<DynSolValue, String> {
    match (value, ty) {
        (DynSolValue::Uint(value, _), DynSolType::Uint(bits)) => {
            if value.bit_len() > *bits {
                return Err(format!("{value} does not fit in uint{bits}"));
            }
            Ok(DynSolValue::Uint(value, *bits))
        }
        (DynSolValue::Int(value, _), DynSolType::Int(bits)) => {
            if value.bits() as usize > *bits {
                return Err(format!("{value} does not fit in int{bits}"));
            }
            Ok(DynSolValue::Int(value, *bits))
        }
        (DynSolValue::FixedBytes(word, _), DynSolType::FixedBytes(size)) => {
            if word[*size..].iter().any(|byte| *byte != 0) {
                return Err(format!("value is longer than bytes{size}"));
            }
            Ok(DynSolValue::FixedBytes(word, *size))
        }
        (DynSolValue::Array(values), DynSolType::Array(inner)) => Ok(DynSolValue::Array(
            values.into_iter().map(|v| conform_arg(v, inner)).collect::<Result<_, _>>()?,
        )),
        (
            DynSolValue::Array(values) | DynSolValue::FixedArray(values),
            DynSolType::FixedArray(inner, size),
        ) => {
            if values.len() != *size {
                return Err(format!("expected {size} elements, got {}", values.len()));
            }
            Ok(DynSolValue::FixedArray(
                values.into_iter().map(|v| conform_arg(v, inner)).collect::<Result<_, _>>()?,
            ))
        }
        (DynSolValue::Tuple(values), DynSolType::Tuple(types)) => {
            if values.len() != types.len() {
                return Err(format!("expected {} tuple fields, got {}", types.len(), values.len()));
            }
            Ok(DynSolValue::Tuple(
                values
                    .into_iter()
                    .zip(types)
                    .map(|(v, ty)| conform_arg(v, ty))
                    .collect::<Result<_, _>>()?,
            ))
        }
        (value, _) => Ok(value),
    }
}
