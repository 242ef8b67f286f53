//! Evidence peer review.
//!
//! ```text
//! pending ──(verify threshold)──────────────► verified
//!    │                                          ▲
//!    └─(dispute threshold)─► disputed ──(moderator: verified)
//!                               │  ▲
//!                               │  └─(moderator: needs_update)
//!                               └───(moderator: rejected)──► rejected
//! ```
//!
//! `verified` and `rejected` are terminal.

pub mod tracker;

pub use tracker::{EvidenceValidationTracker, VoteEligibility};
