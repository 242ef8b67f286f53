//! Error types for decision storage.

/// Error types for storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unavailable or query failed
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A string did not name a known enum variant (stance, vote type, category...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: '{value}'. Must be one of: {expected}")]
pub struct UnknownVariant {
    /// What was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Comma-separated list of accepted values
    pub expected: &'static str,
}
