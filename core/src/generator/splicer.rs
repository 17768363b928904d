use std::path::Path;

use crate::types::code::Code;

/// The generated section is appended after this line of the template.
pub const GENERATED_FUNCTIONS_MARKER: &str = "// !! GENERATED FUNCTIONS BELOW HERE";
/// Generic method table declaration in the template.
pub const GENERIC_METHOD_TABLE: &str = "pub type ContractMethodsTable = DynamicMethodTable;";
/// Concrete declaration swapped in once the export table exists.
pub const GENERATED_METHOD_TABLE: &str = "pub type ContractMethodsTable = ContractMethods;";

const BUNDLED_TEMPLATE: &str = include_str!("../../resources/adapter_template.rs");

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SpliceError {
    #[error("Adapter template does not contain the marker `// !! GENERATED FUNCTIONS BELOW HERE`")]
    MarkerNotFound,

    #[error(
        "Adapter template contains the marker `// !! GENERATED FUNCTIONS BELOW HERE` {0} times, expected once"
    )]
    MarkerNotUnique(usize),

    #[error(
        "Adapter template does not declare `pub type ContractMethodsTable = DynamicMethodTable;` exactly once"
    )]
    MethodTableDeclarationNotFound,

    #[error("Could not read adapter template {0}: {1}")]
    CouldNotReadTemplate(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterTemplate(String);

impl AdapterTemplate {
    pub fn bundled() -> Self {
        AdapterTemplate(BUNDLED_TEMPLATE.to_string())
    }

    pub fn from_path(path: &Path) -> Result<Self, SpliceError> {
        std::fs::read_to_string(path)
            .map(AdapterTemplate)
            .map_err(|e| {
                SpliceError::CouldNotReadTemplate(path.display().to_string(), e.to_string())
            })
    }

    pub fn new(contents: String) -> Self {
        AdapterTemplate(contents)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Inserts the generated section at the marker and narrows the method table type. The
    /// template is rejected unless the marker and the generic declaration occur exactly once.
    pub fn splice(&self, generated: &Code) -> Result<Code, SpliceError> {
        let marker_count = self.0.matches(GENERATED_FUNCTIONS_MARKER).count();
        match marker_count {
            0 => return Err(SpliceError::MarkerNotFound),
            1 => {}
            count => return Err(SpliceError::MarkerNotUnique(count)),
        }

        if self.0.matches(GENERIC_METHOD_TABLE).count() != 1 {
            return Err(SpliceError::MethodTableDeclarationNotFound);
        }

        let spliced = self
            .0
            .replacen(
                GENERATED_FUNCTIONS_MARKER,
                &format!("{GENERATED_FUNCTIONS_MARKER}\n{generated}"),
                1,
            )
            .replacen(GENERIC_METHOD_TABLE, GENERATED_METHOD_TABLE, 1);

        Ok(Code::new(spliced))
    }
}
