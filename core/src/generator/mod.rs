pub mod build;
pub mod methods;
pub mod serializer;
pub mod splicer;

pub use build::{
    amend_project_config, build_adapter, BuildAdapterError, BuildOptions, BuildOutcome,
    BuildSummary, ProjectPaths,
};
pub use methods::{plan_methods, ContractFunctions, GenerateMethodsError, GeneratedFunction};
pub use splicer::{AdapterTemplate, SpliceError};
