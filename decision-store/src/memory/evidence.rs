//! In-memory evidence validation store and proposal evidence index.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreResult;
use crate::traits::{ProposalEvidenceSource, ValidationStore};
use crate::types::EvidenceValidation;

/// Validation records keyed by evidence id.
#[derive(Default)]
pub struct InMemoryValidationStore {
    validations: DashMap<String, EvidenceValidation>,
}

impl InMemoryValidationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ValidationStore for InMemoryValidationStore {
    async fn get_validation(&self, evidence_id: &str) -> StoreResult<Option<EvidenceValidation>> {
        Ok(self.validations.get(evidence_id).map(|v| v.clone()))
    }

    async fn save_validation(&self, validation: EvidenceValidation) -> StoreResult<()> {
        self.validations
            .insert(validation.evidence_id.clone(), validation);
        Ok(())
    }

    async fn list_validations(&self) -> StoreResult<Vec<EvidenceValidation>> {
        Ok(self.validations.iter().map(|v| v.value().clone()).collect())
    }
}

/// Which evidence items belong to which proposal.
///
/// Stands in for the proposal store in development and tests.
#[derive(Default)]
pub struct InMemoryProposalEvidence {
    evidence: DashMap<String, Vec<String>>,
}

impl InMemoryProposalEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a proposal known, with no evidence yet.
    pub fn register_proposal(&self, proposal_id: impl Into<String>) {
        self.evidence.entry(proposal_id.into()).or_default();
    }

    /// Attach an evidence item to a proposal, registering the proposal if needed.
    pub fn attach_evidence(&self, proposal_id: impl Into<String>, evidence_id: impl Into<String>) {
        let evidence_id = evidence_id.into();
        let mut ids = self.evidence.entry(proposal_id.into()).or_default();
        if !ids.contains(&evidence_id) {
            ids.push(evidence_id);
        }
    }
}

#[async_trait]
impl ProposalEvidenceSource for InMemoryProposalEvidence {
    async fn evidence_ids(&self, proposal_id: &str) -> StoreResult<Option<Vec<String>>> {
        Ok(self.evidence.get(proposal_id).map(|ids| ids.clone()))
    }
}
