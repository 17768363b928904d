#![allow(dead_code)]
// @generated by ethadapter. Do not edit, run `ethadapter build` to regenerate.
pub mod adapter;
pub mod contract_names;
