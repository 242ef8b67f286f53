//! Consent-Based Governance Decision Engine for TogetherOS
//!
//! Three independent components share one storage abstraction and the
//! member-identity concept, and are orchestrated by the caller (HTTP handlers):
//!
//! - **Vote ledger**: one current vote per member, consent tally with block veto
//! - **Position tracker**: deliberation stances, minority marking and reports
//! - **Evidence validation**: verify/dispute peer review escalating to moderators
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    GovernanceEngine                       │
//! │                                                           │
//! │  ┌────────────┐  ┌─────────────────┐  ┌────────────────┐  │
//! │  │ VoteLedger │  │ PositionTracker │  │ EvidenceValid- │  │
//! │  │            │  │                 │  │ ationTracker   │  │
//! │  └─────┬──────┘  └────────┬────────┘  └───────┬────────┘  │
//! │        │                  │                   │           │
//! │  ┌─────▼──────────────────▼───────────────────▼────────┐  │
//! │  │          decision-store (Arc<dyn ...Store>)          │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Components never call each other; e.g. after a decision the caller invokes
//! [`PositionTracker::finalize_minority_positions`].

pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod positions;
pub mod validation;
pub mod votes;

// Re-export main types
pub use config::GovernanceConfig;
pub use engine::{GovernanceEngine, GovernanceStores};
pub use error::{GovernanceError, Result};
pub use evidence::{EvidenceValidationTracker, VoteEligibility};
pub use positions::{PositionInput, PositionTracker};
pub use votes::{calculate_tally, VoteLedger};

pub use decision_store;
pub use decision_store::types::*;
pub use decision_store::{
    MinorityReportStore, PositionStore, ProposalEvidenceSource, StoreError, ValidationStore,
    VoteStore,
};
