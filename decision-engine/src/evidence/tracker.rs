//! Evidence validation tracker - verify/dispute voting and moderator review.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use decision_store::{
    DisputeCategory, DisputeReason, EvidenceValidation, ModeratorAction, ModeratorDecision,
    ModeratorReview, ProposalEvidenceSource, ValidationStats, ValidationStatus, ValidationStore,
};

use crate::config::EvidenceConfig;
use crate::error::{GovernanceError, Result};
use crate::validation::{require_id, validate_text_length};

const ALREADY_COMPLETE: &str = "Validation is already complete";
const ALREADY_VERIFIED: &str = "You have already verified this evidence";
const ALREADY_DISPUTED: &str = "You have already disputed this evidence";

/// Whether a member may verify or dispute a piece of evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteEligibility {
    pub can_vote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VoteEligibility {
    fn allowed() -> Self {
        Self {
            can_vote: true,
            reason: None,
        }
    }

    fn denied(reason: &str) -> Self {
        Self {
            can_vote: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Why `validation` refuses a vote from `member_id`, if it does.
fn vote_refusal(validation: &EvidenceValidation, member_id: &str) -> Option<&'static str> {
    if validation.status.is_terminal() {
        Some(ALREADY_COMPLETE)
    } else if validation.verifiers.contains(member_id) {
        Some(ALREADY_VERIFIED)
    } else if validation.disputers.contains(member_id) {
        Some(ALREADY_DISPUTED)
    } else {
        None
    }
}

/// Tracks peer review of evidence attached to proposals.
pub struct EvidenceValidationTracker {
    /// Validation records
    validations: Arc<dyn ValidationStore>,
    /// Proposal store view, for per-proposal queries
    proposals: Arc<dyn ProposalEvidenceSource>,
    /// Configuration
    config: EvidenceConfig,
    /// Serializes read-modify-write cycles on validation records
    write_gate: Mutex<()>,
}

impl EvidenceValidationTracker {
    /// Create a tracker with default thresholds.
    pub fn new(
        validations: Arc<dyn ValidationStore>,
        proposals: Arc<dyn ProposalEvidenceSource>,
    ) -> Self {
        Self::with_config(validations, proposals, EvidenceConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        validations: Arc<dyn ValidationStore>,
        proposals: Arc<dyn ProposalEvidenceSource>,
        config: EvidenceConfig,
    ) -> Self {
        Self {
            validations,
            proposals,
            config,
            write_gate: Mutex::new(()),
        }
    }

    /// Start tracking evidence. Returns the existing record if already tracked.
    pub async fn initialize_validation(&self, evidence_id: &str) -> Result<EvidenceValidation> {
        require_id("evidenceId", evidence_id)?;
        let _guard = self.write_gate.lock().await;
        self.load_or_init(evidence_id).await
    }

    async fn load_or_init(&self, evidence_id: &str) -> Result<EvidenceValidation> {
        if let Some(existing) = self.validations.get_validation(evidence_id).await? {
            return Ok(existing);
        }

        let validation = EvidenceValidation::new(
            evidence_id,
            self.config.verify_threshold,
            self.config.dispute_threshold,
        );
        self.validations.save_validation(validation.clone()).await?;

        debug!(evidence_id = %evidence_id, "Validation initialized");
        Ok(validation)
    }

    pub async fn get_validation(&self, evidence_id: &str) -> Result<Option<EvidenceValidation>> {
        Ok(self.validations.get_validation(evidence_id).await?)
    }

    /// Reject a vote the record cannot accept, with the matching error kind.
    fn check_vote(validation: &EvidenceValidation, member_id: &str) -> Result<()> {
        match vote_refusal(validation, member_id) {
            None => Ok(()),
            Some(ALREADY_COMPLETE) => {
                warn!(
                    evidence_id = %validation.evidence_id,
                    member_id = %member_id,
                    status = %validation.status,
                    "Vote on completed validation rejected"
                );
                Err(GovernanceError::InvalidStateTransition(
                    ALREADY_COMPLETE.to_string(),
                ))
            }
            Some(reason) => {
                warn!(
                    evidence_id = %validation.evidence_id,
                    member_id = %member_id,
                    "Duplicate evidence vote rejected"
                );
                Err(GovernanceError::DuplicateVote(reason.to_string()))
            }
        }
    }

    /// Add a verification. Reaching the verify threshold marks the evidence verified.
    pub async fn verify_evidence(
        &self,
        evidence_id: &str,
        member_id: &str,
    ) -> Result<EvidenceValidation> {
        require_id("evidenceId", evidence_id)?;
        require_id("memberId", member_id)?;

        let _guard = self.write_gate.lock().await;
        let mut validation = self.load_or_init(evidence_id).await?;
        Self::check_vote(&validation, member_id)?;

        validation.verifiers.insert(member_id.to_string());
        validation.verify_count += 1;
        validation.updated_at = Utc::now();

        if validation.verify_count >= validation.verify_threshold {
            validation.status = ValidationStatus::Verified;
            info!(
                evidence_id = %evidence_id,
                verify_count = validation.verify_count,
                "Evidence verified by peers"
            );
        }

        self.validations.save_validation(validation.clone()).await?;
        debug!(evidence_id = %evidence_id, member_id = %member_id, "Verification recorded");
        Ok(validation)
    }

    /// File a dispute. Reaching the dispute threshold escalates to moderators.
    pub async fn dispute_evidence(
        &self,
        evidence_id: &str,
        member_id: &str,
        category: DisputeCategory,
        explanation: &str,
    ) -> Result<EvidenceValidation> {
        require_id("evidenceId", evidence_id)?;
        require_id("memberId", member_id)?;
        let explanation = validate_text_length(
            "Explanation",
            explanation,
            self.config.min_dispute_explanation_chars,
            None,
        )?;

        let _guard = self.write_gate.lock().await;
        let mut validation = self.load_or_init(evidence_id).await?;
        Self::check_vote(&validation, member_id)?;

        let now = Utc::now();
        validation.disputers.insert(member_id.to_string());
        validation.dispute_count += 1;
        validation.dispute_reasons.push(DisputeReason {
            member_id: member_id.to_string(),
            category,
            explanation,
            filed_at: now,
        });
        validation.updated_at = now;

        if validation.dispute_count >= validation.dispute_threshold
            && validation.status != ValidationStatus::Disputed
        {
            validation.status = ValidationStatus::Disputed;
            info!(
                evidence_id = %evidence_id,
                dispute_count = validation.dispute_count,
                "Evidence disputed, awaiting moderator review"
            );
        }

        self.validations.save_validation(validation.clone()).await?;
        debug!(
            evidence_id = %evidence_id,
            member_id = %member_id,
            category = %category,
            "Dispute recorded"
        );
        Ok(validation)
    }

    /// Record a moderator ruling on disputed evidence.
    ///
    /// `needs_update` leaves the item disputed; counts are not reset.
    pub async fn submit_moderator_review(
        &self,
        evidence_id: &str,
        moderator_id: &str,
        decision: ModeratorDecision,
        reasoning: &str,
        action: Option<ModeratorAction>,
    ) -> Result<EvidenceValidation> {
        require_id("moderatorId", moderator_id)?;
        let reasoning = validate_text_length("Reasoning", reasoning, 1, None)?;

        let _guard = self.write_gate.lock().await;
        let mut validation = self
            .validations
            .get_validation(evidence_id)
            .await?
            .ok_or_else(|| {
                GovernanceError::NotFound(format!("Validation record for evidence {}", evidence_id))
            })?;

        if validation.status != ValidationStatus::Disputed {
            warn!(
                evidence_id = %evidence_id,
                status = %validation.status,
                "Moderator review on non-disputed evidence rejected"
            );
            return Err(GovernanceError::InvalidStateTransition(
                "Evidence is not in disputed status".to_string(),
            ));
        }

        let now = Utc::now();
        validation.moderator_review = Some(ModeratorReview {
            moderator_id: moderator_id.to_string(),
            decision,
            reasoning,
            action,
            reviewed_at: now,
        });
        validation.status = match decision {
            ModeratorDecision::Verified => ValidationStatus::Verified,
            ModeratorDecision::Rejected => ValidationStatus::Rejected,
            ModeratorDecision::NeedsUpdate => ValidationStatus::Disputed,
        };
        validation.updated_at = now;

        self.validations.save_validation(validation.clone()).await?;

        info!(
            evidence_id = %evidence_id,
            moderator_id = %moderator_id,
            decision = %decision,
            status = %validation.status,
            "Moderator review submitted"
        );
        Ok(validation)
    }

    /// Evidence on the proposal whose validation is still pending.
    ///
    /// Evidence never voted on has no record and is not included. An unknown
    /// proposal yields an empty list.
    pub async fn get_pending_validations(
        &self,
        proposal_id: &str,
    ) -> Result<Vec<EvidenceValidation>> {
        let Some(evidence_ids) = self.proposals.evidence_ids(proposal_id).await? else {
            debug!(proposal_id = %proposal_id, "Unknown proposal, no pending validations");
            return Ok(Vec::new());
        };

        let mut pending = Vec::new();
        for evidence_id in &evidence_ids {
            if let Some(validation) = self.validations.get_validation(evidence_id).await? {
                if validation.status == ValidationStatus::Pending {
                    pending.push(validation);
                }
            }
        }
        Ok(pending)
    }

    /// Moderator work queue: disputed evidence not yet reviewed.
    pub async fn get_disputed_evidence(&self) -> Result<Vec<EvidenceValidation>> {
        let validations = self.validations.list_validations().await?;
        Ok(validations
            .into_iter()
            .filter(|v| v.awaits_moderation())
            .collect())
    }

    /// Counts by status across all tracked evidence.
    pub async fn get_validation_stats(&self) -> Result<ValidationStats> {
        let validations = self.validations.list_validations().await?;

        let mut stats = ValidationStats {
            total: validations.len(),
            ..Default::default()
        };
        for validation in &validations {
            match validation.status {
                ValidationStatus::Pending => stats.pending += 1,
                ValidationStatus::Verified => stats.verified += 1,
                ValidationStatus::Disputed => stats.disputed += 1,
                ValidationStatus::Rejected => stats.rejected += 1,
            }
        }
        Ok(stats)
    }

    /// Whether the member may vote. Untracked evidence is open to anyone.
    pub async fn can_member_vote(
        &self,
        evidence_id: &str,
        member_id: &str,
    ) -> Result<VoteEligibility> {
        let Some(validation) = self.validations.get_validation(evidence_id).await? else {
            return Ok(VoteEligibility::allowed());
        };

        Ok(match vote_refusal(&validation, member_id) {
            Some(reason) => VoteEligibility::denied(reason),
            None => VoteEligibility::allowed(),
        })
    }
}
