//! In-memory storage backends.
//!
//! `DashMap`-backed implementations of the storage traits for local
//! development and tests. Keyed writes go through the map's entry API, so an
//! upsert holds the shard lock for its key and two concurrent casts by the same
//! member cannot produce two records.

mod evidence;
mod positions;
mod reports;
mod votes;

pub use evidence::{InMemoryProposalEvidence, InMemoryValidationStore};
pub use positions::InMemoryPositionStore;
pub use reports::InMemoryMinorityReportStore;
pub use votes::InMemoryVoteStore;
