//! Configuration for the decision engine.

use serde::{Deserialize, Serialize};

use crate::error::{GovernanceError, Result};
use crate::votes::DEFAULT_CONSENT_THRESHOLD;

/// Configuration for all three governance components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Vote ledger configuration
    pub voting: VotingConfig,
    /// Position tracker configuration
    pub positions: PositionConfig,
    /// Evidence validation configuration
    pub evidence: EvidenceConfig,
}

impl GovernanceConfig {
    /// Load config from YAML. Missing sections fall back to defaults.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Reject settings the components cannot operate with.
    pub fn validate(&self) -> Result<()> {
        crate::validation::validate_threshold(self.voting.consent_threshold)?;

        if self.positions.min_reasoning_chars > self.positions.max_reasoning_chars {
            return Err(GovernanceError::ValidationFailed(format!(
                "positions.min_reasoning_chars ({}) exceeds max_reasoning_chars ({})",
                self.positions.min_reasoning_chars, self.positions.max_reasoning_chars
            )));
        }

        if self.evidence.verify_threshold == 0 || self.evidence.dispute_threshold == 0 {
            return Err(GovernanceError::ValidationFailed(
                "evidence thresholds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Vote ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VotingConfig {
    /// Share of non-abstaining votes that must consent (0.0 - 1.0)
    pub consent_threshold: f64,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            consent_threshold: DEFAULT_CONSENT_THRESHOLD,
        }
    }
}

/// Position tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Minimum reasoning length after trimming (characters)
    pub min_reasoning_chars: usize,
    /// Maximum reasoning length after trimming (characters)
    pub max_reasoning_chars: usize,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            min_reasoning_chars: 10,
            max_reasoning_chars: 2000,
        }
    }
}

/// Evidence validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceConfig {
    /// Verifications needed to mark evidence verified
    pub verify_threshold: u32,
    /// Disputes needed to escalate evidence to moderators
    pub dispute_threshold: u32,
    /// Minimum dispute explanation length after trimming (characters)
    pub min_dispute_explanation_chars: usize,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            verify_threshold: 3,
            dispute_threshold: 2,
            min_dispute_explanation_chars: 20,
        }
    }
}
