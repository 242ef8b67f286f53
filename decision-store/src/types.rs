//! Core types for governance decision records.
//!
//! Votes, positions and evidence validations are owned by the proposal they
//! reference and point back at it (and at the member) by id only.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs so the web frontend consumes the same shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::UnknownVariant;

/// Implements `as_str`, `ALL`, `Display` and `FromStr` for a fieldless enum
/// whose wire form is a fixed lowercase string.
macro_rules! string_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                        expected: concat!($($name, ", "),+).trim_end_matches(", "),
                    }),
                }
            }
        }
    };
}

// ============================================================================
// Votes
// ============================================================================

/// A member's formal vote on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    /// Agree to proceed
    Consent,
    /// Agree with reservations
    Concern,
    /// Stand aside; excluded from the eligible count
    Abstain,
    /// Absolute veto
    Block,
}

string_enum!(VoteType, "vote type", {
    Consent => "consent",
    Concern => "concern",
    Abstain => "abstain",
    Block => "block",
});

/// One member's current vote on one proposal.
///
/// At most one exists per (proposal_id, member_id); casting again updates it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Stable identifier, kept across re-casts
    pub id: String,
    pub proposal_id: String,
    pub member_id: String,
    pub vote_type: VoteType,
    /// Optional free-text justification
    pub reasoning: Option<String>,
    /// When the member first voted
    pub voted_at: DateTime<Utc>,
    /// When the vote last changed
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Create a fresh vote stamped with the current time.
    pub fn new(
        proposal_id: impl Into<String>,
        member_id: impl Into<String>,
        vote_type: VoteType,
        reasoning: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            proposal_id: proposal_id.into(),
            member_id: member_id.into(),
            vote_type,
            reasoning,
            voted_at: now,
            updated_at: now,
        }
    }
}

/// Aggregate over the current votes of a proposal. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub total: usize,
    pub consent: usize,
    pub concern: usize,
    pub abstain: usize,
    pub block: usize,
    /// total - abstain
    pub eligible_votes: usize,
    /// consent / eligible_votes, or 0 when nobody is eligible
    pub consent_percentage: f64,
    pub threshold_met: bool,
    pub has_blocks: bool,
}

// ============================================================================
// Positions
// ============================================================================

/// Deliberation-stage stance, distinct from a formal vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum PositionStance {
    Support,
    Oppose,
    Abstain,
    Block,
}

string_enum!(PositionStance, "stance", {
    Support => "support",
    Oppose => "oppose",
    Abstain => "abstain",
    Block => "block",
});

/// Outcome of a decided proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Approved,
    Rejected,
    Amended,
}

string_enum!(DecisionOutcome, "decision outcome", {
    Approved => "approved",
    Rejected => "rejected",
    Amended => "amended",
});

/// A member's stance and reasoning on a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub proposal_id: String,
    pub member_id: String,
    pub stance: PositionStance,
    /// Never empty; validated before it reaches storage
    pub reasoning: String,
    /// Set only by post-decision finalization, never by the member
    #[serde(default)]
    pub is_minority: bool,
    pub recorded_at: DateTime<Utc>,
}

impl Position {
    /// Create an unmarked position stamped with the current time.
    pub fn new(
        proposal_id: impl Into<String>,
        member_id: impl Into<String>,
        stance: PositionStance,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            proposal_id: proposal_id.into(),
            member_id: member_id.into(),
            stance,
            reasoning: reasoning.into(),
            is_minority: false,
            recorded_at: Utc::now(),
        }
    }
}

/// Counts over the stored positions of a proposal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PositionStats {
    pub total: usize,
    pub support: usize,
    pub oppose: usize,
    pub abstain: usize,
    pub block: usize,
    pub minority_count: usize,
}

// ============================================================================
// Evidence validation
// ============================================================================

/// Peer review status of a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Pending,
    Verified,
    Disputed,
    Rejected,
}

string_enum!(ValidationStatus, "validation status", {
    Pending => "pending",
    Verified => "verified",
    Disputed => "disputed",
    Rejected => "rejected",
});

impl ValidationStatus {
    /// Verified and rejected accept no further votes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected)
    }
}

impl Default for ValidationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Why a member disputes a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum DisputeCategory {
    Inaccurate,
    Outdated,
    Misleading,
    Irrelevant,
    Fabricated,
}

string_enum!(DisputeCategory, "dispute category", {
    Inaccurate => "inaccurate",
    Outdated => "outdated",
    Misleading => "misleading",
    Irrelevant => "irrelevant",
    Fabricated => "fabricated",
});

/// A single filed dispute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct DisputeReason {
    pub member_id: String,
    pub category: DisputeCategory,
    pub explanation: String,
    pub filed_at: DateTime<Utc>,
}

/// Moderator ruling on disputed evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ModeratorDecision {
    /// Evidence stands
    Verified,
    /// Evidence is rejected
    Rejected,
    /// Author must revise; the item stays disputed
    NeedsUpdate,
}

string_enum!(ModeratorDecision, "moderator decision", {
    Verified => "verified",
    Rejected => "rejected",
    NeedsUpdate => "needs_update",
});

/// Follow-up a moderator attaches to a ruling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ModeratorAction {
    RemoveEvidence,
    RequestRevision,
    NoAction,
}

string_enum!(ModeratorAction, "moderator action", {
    RemoveEvidence => "remove_evidence",
    RequestRevision => "request_revision",
    NoAction => "no_action",
});

/// A moderator's review of disputed evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ModeratorReview {
    pub moderator_id: String,
    pub decision: ModeratorDecision,
    pub reasoning: String,
    pub action: Option<ModeratorAction>,
    pub reviewed_at: DateTime<Utc>,
}

/// Peer review state for one evidence item, keyed 1:1 by `evidence_id`.
///
/// `verifiers` and `disputers` are disjoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct EvidenceValidation {
    pub id: String,
    pub evidence_id: String,
    pub status: ValidationStatus,
    pub verify_count: u32,
    pub dispute_count: u32,
    pub verify_threshold: u32,
    pub dispute_threshold: u32,
    pub verifiers: BTreeSet<String>,
    pub disputers: BTreeSet<String>,
    pub dispute_reasons: Vec<DisputeReason>,
    pub moderator_review: Option<ModeratorReview>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EvidenceValidation {
    /// A pending record with no votes.
    pub fn new(
        evidence_id: impl Into<String>,
        verify_threshold: u32,
        dispute_threshold: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            evidence_id: evidence_id.into(),
            status: ValidationStatus::Pending,
            verify_count: 0,
            dispute_count: 0,
            verify_threshold,
            dispute_threshold,
            verifiers: BTreeSet::new(),
            disputers: BTreeSet::new(),
            dispute_reasons: Vec::new(),
            moderator_review: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the member already verified or disputed.
    pub fn has_voted(&self, member_id: &str) -> bool {
        self.verifiers.contains(member_id) || self.disputers.contains(member_id)
    }

    /// Disputed and not yet looked at by a moderator.
    pub fn awaits_moderation(&self) -> bool {
        self.status == ValidationStatus::Disputed && self.moderator_review.is_none()
    }
}

/// Counts of tracked evidence by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub total: usize,
    pub pending: usize,
    pub verified: usize,
    pub disputed: usize,
    pub rejected: usize,
}
