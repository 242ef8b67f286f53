//! Vote ledger - one current vote per member per proposal.

use std::sync::Arc;
use tracing::{debug, info};

use decision_store::{Vote, VoteStore, VoteTally, VoteType};

use crate::config::VotingConfig;
use crate::error::Result;
use crate::validation::{require_id, validate_threshold};
use crate::votes::tally::calculate_tally;

/// Records votes and computes tallies.
///
/// Proposal existence is not checked here; votes may reference any proposal id.
pub struct VoteLedger {
    /// Backing store
    store: Arc<dyn VoteStore>,
    /// Configuration
    config: VotingConfig,
}

impl VoteLedger {
    /// Create a ledger with default configuration.
    pub fn new(store: Arc<dyn VoteStore>) -> Self {
        Self::with_config(store, VotingConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(store: Arc<dyn VoteStore>, config: VotingConfig) -> Self {
        Self { store, config }
    }

    /// Cast or re-cast a vote.
    ///
    /// A re-cast overwrites vote type, reasoning and `updated_at` on the
    /// existing record and returns it with its original id.
    pub async fn cast_vote(
        &self,
        proposal_id: &str,
        member_id: &str,
        vote_type: VoteType,
        reasoning: Option<String>,
    ) -> Result<Vote> {
        require_id("proposalId", proposal_id)?;
        require_id("memberId", member_id)?;

        let reasoning = reasoning
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let vote = self
            .store
            .upsert_vote(Vote::new(proposal_id, member_id, vote_type, reasoning))
            .await?;

        info!(
            proposal_id = %proposal_id,
            member_id = %member_id,
            vote_id = %vote.id,
            vote_type = %vote_type,
            "Vote cast"
        );

        Ok(vote)
    }

    /// A member's current vote, if any.
    pub async fn get_vote(&self, proposal_id: &str, member_id: &str) -> Result<Option<Vote>> {
        Ok(self.store.get_vote(proposal_id, member_id).await?)
    }

    /// Every current vote on a proposal, unordered and unpaginated.
    pub async fn get_votes_by_proposal(&self, proposal_id: &str) -> Result<Vec<Vote>> {
        Ok(self.store.list_votes(proposal_id).await?)
    }

    /// Withdraw a vote. Returns false when there was nothing to remove.
    pub async fn delete_vote(&self, proposal_id: &str, member_id: &str) -> Result<bool> {
        let removed = self.store.delete_vote(proposal_id, member_id).await?;

        debug!(
            proposal_id = %proposal_id,
            member_id = %member_id,
            removed = removed,
            "Vote deletion"
        );

        Ok(removed)
    }

    /// Tally the current votes on a proposal.
    ///
    /// Uses the configured consent threshold unless one is given. The read is
    /// not a snapshot: votes cast while the tally runs may or may not count.
    pub async fn get_vote_tally(
        &self,
        proposal_id: &str,
        threshold: Option<f64>,
    ) -> Result<VoteTally> {
        let threshold = validate_threshold(threshold.unwrap_or(self.config.consent_threshold))?;
        let votes = self.store.list_votes(proposal_id).await?;
        let tally = calculate_tally(&votes, threshold);

        debug!(
            proposal_id = %proposal_id,
            total = tally.total,
            consent_percentage = tally.consent_percentage,
            threshold_met = tally.threshold_met,
            "Tally computed"
        );

        Ok(tally)
    }

    /// Configured consent threshold.
    pub fn consent_threshold(&self) -> f64 {
        self.config.consent_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GovernanceError;
    use decision_store::memory::InMemoryVoteStore;

    fn ledger() -> VoteLedger {
        VoteLedger::new(Arc::new(InMemoryVoteStore::new()))
    }

    #[tokio::test]
    async fn test_recast_keeps_single_vote() {
        let ledger = ledger();

        let first = ledger
            .cast_vote("p1", "alice", VoteType::Consent, None)
            .await
            .unwrap();
        ledger
            .cast_vote("p1", "alice", VoteType::Concern, Some("Budget unclear".into()))
            .await
            .unwrap();
        let last = ledger
            .cast_vote("p1", "alice", VoteType::Block, Some("  Violates charter  ".into()))
            .await
            .unwrap();

        assert_eq!(first.id, last.id);
        assert_eq!(last.reasoning.as_deref(), Some("Violates charter"));

        let votes = ledger.get_votes_by_proposal("p1").await.unwrap();
        assert_eq!(votes.iter().filter(|v| v.member_id == "alice").count(), 1);
        assert_eq!(votes[0].vote_type, VoteType::Block);
    }

    #[tokio::test]
    async fn test_blank_reasoning_is_dropped() {
        let ledger = ledger();
        let vote = ledger
            .cast_vote("p1", "bob", VoteType::Abstain, Some("   ".into()))
            .await
            .unwrap();
        assert!(vote.reasoning.is_none());
    }

    #[tokio::test]
    async fn test_delete_vote_twice() {
        let ledger = ledger();
        ledger
            .cast_vote("p1", "carol", VoteType::Consent, None)
            .await
            .unwrap();

        assert!(ledger.delete_vote("p1", "carol").await.unwrap());
        assert!(!ledger.delete_vote("p1", "carol").await.unwrap());
        assert!(ledger.get_vote("p1", "carol").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tally_uses_configured_threshold() {
        let ledger = VoteLedger::with_config(
            Arc::new(InMemoryVoteStore::new()),
            VotingConfig {
                consent_threshold: 0.75,
            },
        );
        ledger.cast_vote("p1", "a", VoteType::Consent, None).await.unwrap();
        ledger.cast_vote("p1", "b", VoteType::Consent, None).await.unwrap();
        ledger.cast_vote("p1", "c", VoteType::Concern, None).await.unwrap();

        assert!(!ledger.get_vote_tally("p1", None).await.unwrap().threshold_met);
        assert!(ledger.get_vote_tally("p1", Some(0.5)).await.unwrap().threshold_met);
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let ledger = ledger();

        let err = ledger
            .get_vote_tally("p1", Some(2.0))
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::ValidationFailed(_)));

        let err = ledger
            .cast_vote("p1", "", VoteType::Consent, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_concurrent_recasts_leave_one_vote() {
        let ledger = Arc::new(ledger());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move {
                    let vote_type = if i % 2 == 0 { VoteType::Consent } else { VoteType::Concern };
                    ledger.cast_vote("p1", "dana", vote_type, None).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(ledger.get_votes_by_proposal("p1").await.unwrap().len(), 1);
    }
}
