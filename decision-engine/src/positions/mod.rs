//! Deliberation positions and minority tracking.

pub mod report;
pub mod tracker;

pub use report::render_minority_report;
pub use tracker::{
    minority_stances, PositionInput, PositionTracker, MAX_MINORITY_REPORT_CHARS,
};
