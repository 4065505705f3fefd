//! Error types for rule registry operations.

use thiserror::Error;

/// Errors raised while resolving a rule from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No rule is registered under the resolved name.
    #[error("the rule `{name}` is not a built-in validation")]
    MissingValidation { name: String },
}

impl RegistryError {
    /// Create a MissingValidation error.
    pub fn missing_validation(name: impl Into<String>) -> Self {
        Self::MissingValidation { name: name.into() }
    }

    /// The rule name that failed to resolve.
    pub fn name(&self) -> &str {
        match self {
            Self::MissingValidation { name } => name,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
