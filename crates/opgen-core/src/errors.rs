use crate::generator::SyntaxRole;
use crate::ir::OperationKind;
use thiserror::Error;

/// Failure of a single generation call
///
/// Neither kind is retried: the caller abandons the edit rather than emit
/// partially-correct syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("contract violation: {0}")]
    ContractViolation(ContractViolation),

    #[error("not implemented: {0}")]
    NotImplemented(Unimplemented),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("{kind} cannot be generated in {role} role")]
    UnsupportedRole {
        kind: OperationKind,
        role: SyntaxRole,
    },

    #[error("{kind}.{slot} could not be generated")]
    MissingChild {
        kind: OperationKind,
        slot: &'static str,
    },

    #[error("{kind} has no type to generate")]
    MissingType { kind: OperationKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unimplemented {
    #[error("generation of {0} operations")]
    Kind(OperationKind),

    #[error("object and collection initializers")]
    Initializer,

    #[error("arguments in a different order than their parameters")]
    ReorderedArguments,
}

impl GenerateError {
    pub fn unsupported_role(kind: OperationKind, role: SyntaxRole) -> Self {
        GenerateError::ContractViolation(ContractViolation::UnsupportedRole { kind, role })
    }

    pub fn missing_child(kind: OperationKind, slot: &'static str) -> Self {
        GenerateError::ContractViolation(ContractViolation::MissingChild { kind, slot })
    }

    pub fn not_implemented(kind: OperationKind) -> Self {
        GenerateError::NotImplemented(Unimplemented::Kind(kind))
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, GenerateError::ContractViolation(_))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, GenerateError::NotImplemented(_))
    }
}

pub type GenerateResult<T> = std::result::Result<T, GenerateError>;

/// Errors loading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown language version '{0}'")]
    UnknownLanguageVersion(String),
}

/// Top-level error for hosts driving the library
#[derive(Debug, Error)]
pub enum OpgenError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    FixAll(#[from] crate::fix::FixAllError),

    #[error("invalid input document: {0}")]
    Document(#[from] serde_json::Error),
}
