//! Error types for the decision engine.

use decision_store::{StoreError, UnknownVariant};

/// Error types for governance operations.
///
/// Everything except [`GovernanceError::Store`] is a rejection of a single
/// request: no state was mutated, and retrying without an external change
/// cannot succeed.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    /// Referenced record absent where it is required
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or out-of-range input
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Member already verified or disputed this evidence
    #[error("{0}")]
    DuplicateVote(String),

    /// Operation not allowed in the record's current state
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// Caller does not own the record
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Storage backend failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GovernanceError {
    /// Whether this is a caller-facing rejection rather than a backend failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

impl From<UnknownVariant> for GovernanceError {
    fn from(err: UnknownVariant) -> Self {
        Self::ValidationFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GovernanceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use decision_store::VoteType;

    #[test]
    fn test_unknown_variant_is_validation_failure() {
        let err: GovernanceError = "maybe".parse::<VoteType>().unwrap_err().into();
        assert!(matches!(err, GovernanceError::ValidationFailed(_)));
        assert!(err.is_rejection());
        assert!(err.to_string().contains("consent, concern, abstain, block"));
    }

    #[test]
    fn test_store_error_is_not_rejection() {
        let err = GovernanceError::from(StoreError::Backend("connection reset".into()));
        assert!(!err.is_rejection());
    }
}
