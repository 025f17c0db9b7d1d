use thiserror::Error;

use productopts_core::DomainError;

pub type OptionResult<T> = Result<T, OptionError>;

/// Failures surfaced by option queries, stores and services.
///
/// None of these are recovered locally; listeners hand them back to whoever
/// dispatched the event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionError {
    /// Lookup or validation failure (e.g. unknown category).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Provenance tags could not be encoded to / decoded from storage.
    #[error("provenance serialization failed: {0}")]
    Serialization(String),

    /// The underlying store failed (e.g. poisoned lock).
    #[error("option store failure: {0}")]
    Store(String),
}

impl OptionError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_not_found())
    }
}

impl From<serde_json::Error> for OptionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}
