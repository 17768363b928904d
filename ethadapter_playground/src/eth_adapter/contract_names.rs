// @generated by ethadapter. Do not edit, run `ethadapter build` to regenerate.

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractName {
    EMPTY,
    STORAGE,
    TOKEN,
}

impl ContractName {
    pub const ALL: &'static [ContractName] = &[ContractName::EMPTY, ContractName::STORAGE, ContractName::TOKEN];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractName::EMPTY => "EMPTY",
            ContractName::STORAGE => "STORAGE",
            ContractName::TOKEN => "TOKEN",
        }
    }
}

impl std::fmt::Display for ContractName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
