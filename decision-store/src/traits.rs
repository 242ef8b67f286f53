//! Storage abstraction for governance decision records.
//!
//! Each component of the decision engine owns exactly one of these stores.
//! Implementations must make keyed writes atomic (insert-or-update on the
//! natural key), so that "one record per member" holds under concurrent
//! requests without the caller doing a read-then-write.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{EvidenceValidation, Position, PositionStance, Vote};

/// Votes keyed by (proposal_id, member_id).
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Insert the vote, or update the existing one for the same member.
    ///
    /// On conflict the stored `id` and `voted_at` are kept and `vote_type`,
    /// `reasoning` and `updated_at` are overwritten. Returns the stored record.
    async fn upsert_vote(&self, vote: Vote) -> StoreResult<Vote>;

    async fn get_vote(&self, proposal_id: &str, member_id: &str) -> StoreResult<Option<Vote>>;

    /// All current votes on a proposal, unordered.
    async fn list_votes(&self, proposal_id: &str) -> StoreResult<Vec<Vote>>;

    /// Hard delete. Returns whether a record existed.
    async fn delete_vote(&self, proposal_id: &str, member_id: &str) -> StoreResult<bool>;
}

/// Positions keyed by (proposal_id, member_id).
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Insert the position, or update the existing one for the same member.
    ///
    /// On conflict the stored `id` is kept and `stance`, `reasoning` and
    /// `recorded_at` are overwritten. `is_minority` survives only when the
    /// stance is unchanged; a new stance clears it. Returns the stored record.
    async fn upsert_position(&self, position: Position) -> StoreResult<Position>;

    async fn get_position(
        &self,
        proposal_id: &str,
        member_id: &str,
    ) -> StoreResult<Option<Position>>;

    /// All positions on a proposal in the order they were first recorded.
    async fn list_positions(&self, proposal_id: &str) -> StoreResult<Vec<Position>>;

    /// Hard delete. Returns whether a record existed.
    async fn delete_position(&self, proposal_id: &str, member_id: &str) -> StoreResult<bool>;

    /// Flag every position on the proposal whose stance is in `stances`.
    ///
    /// Only ever sets `is_minority` to true. Returns how many positions carry
    /// the flag for those stances afterwards.
    async fn mark_minority(&self, proposal_id: &str, stances: &[PositionStance])
        -> StoreResult<usize>;
}

/// Evidence validations keyed 1:1 by evidence_id.
#[async_trait]
pub trait ValidationStore: Send + Sync {
    async fn get_validation(&self, evidence_id: &str) -> StoreResult<Option<EvidenceValidation>>;

    /// Insert or replace the record for `validation.evidence_id`.
    async fn save_validation(&self, validation: EvidenceValidation) -> StoreResult<()>;

    /// Every tracked validation, unordered.
    async fn list_validations(&self) -> StoreResult<Vec<EvidenceValidation>>;
}

/// Read-only view of the proposal store: which evidence is attached to a proposal.
#[async_trait]
pub trait ProposalEvidenceSource: Send + Sync {
    /// Evidence ids attached to the proposal, or `None` if the proposal is unknown.
    async fn evidence_ids(&self, proposal_id: &str) -> StoreResult<Option<Vec<String>>>;
}

/// Minority reports keyed by proposal_id.
#[async_trait]
pub trait MinorityReportStore: Send + Sync {
    async fn get_report(&self, proposal_id: &str) -> StoreResult<Option<String>>;

    /// Insert or replace the report for the proposal.
    async fn save_report(&self, proposal_id: &str, report: String) -> StoreResult<()>;
}
