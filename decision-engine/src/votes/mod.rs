//! Formal voting.
//!
//! One current vote per (proposal, member) and a consent tally in which a
//! single block defeats the proposal.

pub mod ledger;
pub mod tally;

pub use ledger::VoteLedger;
pub use tally::{calculate_tally, DEFAULT_CONSENT_THRESHOLD};
