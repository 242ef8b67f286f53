//! Governance Decision Records for TogetherOS
//!
//! This crate holds the records produced by consent-based decision making and
//! the storage abstraction the decision engine reads and writes through:
//!
//! - **Votes**: one current vote per (proposal, member), tallied on demand
//! - **Positions**: deliberation-stage stances with reasoning and minority flags
//! - **Evidence validations**: peer review state for evidence attached to proposals
//!
//! # Key Components
//!
//! - [`VoteStore`], [`PositionStore`], [`ValidationStore`]: atomic upsert-by-key storage traits
//! - [`ProposalEvidenceSource`]: read-only view of which evidence belongs to a proposal
//! - [`MinorityReportStore`]: persisted minority reports
//! - [`memory`]: `DashMap`-backed implementations for local development and tests
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use decision_store::{memory::InMemoryVoteStore, Vote, VoteStore, VoteType};
//!
//! let store: Arc<dyn VoteStore> = Arc::new(InMemoryVoteStore::new());
//! let vote = store
//!     .upsert_vote(Vote::new("proposal-1", "member-1", VoteType::Consent, None))
//!     .await?;
//! ```

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{StoreError, StoreResult, UnknownVariant};
pub use traits::{
    MinorityReportStore, PositionStore, ProposalEvidenceSource, ValidationStore, VoteStore,
};
pub use types::*;
