//! Input validation shared by the components.
//!
//! Handlers are expected to check request shape before calling in; the
//! components re-run these checks so nothing malformed reaches storage.

use crate::error::{GovernanceError, Result};

/// Threshold must be a finite share in `[0, 1]`.
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(GovernanceError::ValidationFailed(format!(
            "Threshold must be between 0 and 1, got {}",
            threshold
        )))
    }
}

/// Trim `text` and check its length in characters. Returns the trimmed text.
pub fn validate_text_length(
    field: &str,
    text: &str,
    min: usize,
    max: Option<usize>,
) -> Result<String> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();

    if len < min {
        return Err(GovernanceError::ValidationFailed(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }

    if let Some(max) = max {
        if len > max {
            return Err(GovernanceError::ValidationFailed(format!(
                "{} cannot exceed {} characters",
                field, max
            )));
        }
    }

    Ok(trimmed.to_string())
}

/// Ids must be non-blank.
pub fn require_id(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GovernanceError::ValidationFailed(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_text_length_counts_trimmed_chars() {
        assert!(validate_text_length("Reasoning", "   short    ", 10, None).is_err());
        assert_eq!(
            validate_text_length("Reasoning", "  ten chars!  ", 10, Some(20)).unwrap(),
            "ten chars!"
        );
        assert!(validate_text_length("Reasoning", "far too long here", 1, Some(5)).is_err());
        // multi-byte characters count once
        assert!(validate_text_length("Reasoning", "ééééé", 5, Some(5)).is_ok());
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("memberId", "m1").is_ok());
        assert!(require_id("memberId", "  ").is_err());
    }
}
