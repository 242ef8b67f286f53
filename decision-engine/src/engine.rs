//! GovernanceEngine - wires the three components to their stores.

use std::sync::Arc;
use tracing::info;

use decision_store::memory::{
    InMemoryMinorityReportStore, InMemoryPositionStore, InMemoryValidationStore, InMemoryVoteStore,
};
use decision_store::{
    MinorityReportStore, PositionStore, ProposalEvidenceSource, ValidationStore, VoteStore,
};

use crate::config::GovernanceConfig;
use crate::error::Result;
use crate::evidence::EvidenceValidationTracker;
use crate::positions::PositionTracker;
use crate::votes::VoteLedger;

/// Storage backends injected into the engine. Each component owns its own.
#[derive(Clone)]
pub struct GovernanceStores {
    pub votes: Arc<dyn VoteStore>,
    pub positions: Arc<dyn PositionStore>,
    pub reports: Arc<dyn MinorityReportStore>,
    pub validations: Arc<dyn ValidationStore>,
    /// Read-only view of the external proposal store
    pub proposals: Arc<dyn ProposalEvidenceSource>,
}

impl GovernanceStores {
    /// In-memory backends for everything the engine owns.
    ///
    /// The proposal store is external, so its view is always supplied.
    pub fn in_memory(proposals: Arc<dyn ProposalEvidenceSource>) -> Self {
        Self {
            votes: Arc::new(InMemoryVoteStore::new()),
            positions: Arc::new(InMemoryPositionStore::new()),
            reports: Arc::new(InMemoryMinorityReportStore::new()),
            validations: Arc::new(InMemoryValidationStore::new()),
            proposals,
        }
    }
}

/// The governance decision engine.
///
/// Holds a [`VoteLedger`], a [`PositionTracker`] and an
/// [`EvidenceValidationTracker`]. They share configuration but nothing else;
/// cross-component effects are the caller's to orchestrate.
pub struct GovernanceEngine {
    /// Configuration
    config: GovernanceConfig,
    /// Formal votes
    votes: VoteLedger,
    /// Deliberation positions
    positions: PositionTracker,
    /// Evidence peer review
    evidence: EvidenceValidationTracker,
}

impl GovernanceEngine {
    /// Build the engine. Fails if the configuration is invalid.
    pub fn new(config: GovernanceConfig, stores: GovernanceStores) -> Result<Self> {
        config.validate()?;

        info!(
            consent_threshold = config.voting.consent_threshold,
            verify_threshold = config.evidence.verify_threshold,
            dispute_threshold = config.evidence.dispute_threshold,
            "Initializing GovernanceEngine"
        );

        Ok(Self {
            votes: VoteLedger::with_config(stores.votes, config.voting.clone()),
            positions: PositionTracker::with_config(
                stores.positions,
                stores.reports,
                config.positions.clone(),
            ),
            evidence: EvidenceValidationTracker::with_config(
                stores.validations,
                stores.proposals,
                config.evidence.clone(),
            ),
            config,
        })
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn votes(&self) -> &VoteLedger {
        &self.votes
    }

    pub fn positions(&self) -> &PositionTracker {
        &self.positions
    }

    pub fn evidence(&self) -> &EvidenceValidationTracker {
        &self.evidence
    }
}
