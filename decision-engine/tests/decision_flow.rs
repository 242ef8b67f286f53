//! End-to-end decision flows against the in-memory backends.

use std::sync::Arc;

use async_trait::async_trait;
use decision_engine::decision_store::memory::InMemoryProposalEvidence;
use decision_engine::decision_store::{StoreError, StoreResult};
use decision_engine::{
    DecisionOutcome, DisputeCategory, GovernanceConfig, GovernanceEngine, GovernanceError,
    GovernanceStores, ModeratorDecision, PositionInput, PositionStance, ValidationStatus, Vote,
    VoteLedger, VoteStore, VoteType,
};

fn engine_with_proposals() -> (GovernanceEngine, Arc<InMemoryProposalEvidence>) {
    let proposals = Arc::new(InMemoryProposalEvidence::new());
    let engine = GovernanceEngine::new(
        GovernanceConfig::default(),
        GovernanceStores::in_memory(proposals.clone()),
    )
    .unwrap();
    (engine, proposals)
}

#[tokio::test]
async fn test_block_defeats_proposal_and_rejected_evidence_locks() {
    let (engine, proposals) = engine_with_proposals();
    proposals.attach_evidence("P1", "E1");

    // A and B consent, C blocks
    for (member, vote_type) in [
        ("A", VoteType::Consent),
        ("B", VoteType::Consent),
        ("C", VoteType::Block),
    ] {
        engine
            .votes()
            .cast_vote("P1", member, vote_type, None)
            .await
            .unwrap();
    }

    let tally = engine.votes().get_vote_tally("P1", None).await.unwrap();
    assert_eq!(tally.total, 3);
    assert_eq!(tally.consent, 2);
    assert_eq!(tally.concern, 0);
    assert_eq!(tally.abstain, 0);
    assert_eq!(tally.block, 1);
    assert!(!tally.threshold_met);
    assert!(tally.has_blocks);

    // D and E dispute the evidence
    let evidence = engine.evidence();
    evidence
        .dispute_evidence("E1", "D", DisputeCategory::Outdated, "Figures are from a 2015 census")
        .await
        .unwrap();
    let disputed = evidence
        .dispute_evidence("E1", "E", DisputeCategory::Misleading, "Chart axis omits the baseline")
        .await
        .unwrap();
    assert_eq!(disputed.status, ValidationStatus::Disputed);
    assert_eq!(evidence.get_disputed_evidence().await.unwrap().len(), 1);
    assert!(evidence.get_pending_validations("P1").await.unwrap().is_empty());

    // moderator M rejects it
    let reviewed = evidence
        .submit_moderator_review("E1", "M", ModeratorDecision::Rejected, "Both disputes hold", None)
        .await
        .unwrap();
    assert_eq!(reviewed.status, ValidationStatus::Rejected);

    let eligibility = evidence.can_member_vote("E1", "F").await.unwrap();
    assert!(!eligibility.can_vote);
    assert_eq!(eligibility.reason.as_deref(), Some("Validation is already complete"));

    let stats = evidence.get_validation_stats().await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.rejected, 1);
}

#[tokio::test]
async fn test_decision_preserves_dissent() {
    let (engine, _) = engine_with_proposals();
    let positions = engine.positions();

    for (member, stance, reasoning) in [
        ("A", PositionStance::Support, "Improves access for new members"),
        ("B", PositionStance::Support, "Aligns with the cooperative charter"),
        ("C", PositionStance::Oppose, "Adds cost without clear benefit"),
        ("D", PositionStance::Block, "Overrides a standing community agreement"),
    ] {
        positions
            .add_or_update_position(PositionInput::new("P2", member, stance, reasoning))
            .await
            .unwrap();
    }

    // the caller orchestrates the post-decision step
    positions
        .finalize_minority_positions("P2", DecisionOutcome::Approved)
        .await
        .unwrap();

    let minority: Vec<_> = positions
        .get_minority_positions("P2")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.member_id)
        .collect();
    assert_eq!(minority, vec!["C", "D"]);

    let report = positions
        .generate_and_save_minority_report("P2")
        .await
        .unwrap()
        .unwrap();
    assert!(report.contains("### Blocking Objections"));
    assert!(report.contains("Overrides a standing community agreement"));
    assert!(!report.contains("Improves access for new members"));

    let stats = positions.get_position_stats("P2").await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.minority_count, 2);
}

/// A vote store whose backend is down.
struct UnavailableVoteStore;

#[async_trait]
impl VoteStore for UnavailableVoteStore {
    async fn upsert_vote(&self, _vote: Vote) -> StoreResult<Vote> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn get_vote(&self, _proposal_id: &str, _member_id: &str) -> StoreResult<Option<Vote>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn list_votes(&self, _proposal_id: &str) -> StoreResult<Vec<Vote>> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn delete_vote(&self, _proposal_id: &str, _member_id: &str) -> StoreResult<bool> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_backend_failure_is_not_a_rejection() {
    let ledger = VoteLedger::new(Arc::new(UnavailableVoteStore));

    let err = ledger
        .cast_vote("P1", "A", VoteType::Consent, None)
        .await
        .unwrap_err();

    assert!(matches!(err, GovernanceError::Store(_)));
    assert!(!err.is_rejection());
}
