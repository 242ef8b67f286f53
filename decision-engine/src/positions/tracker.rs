//! Position tracker - deliberation stances and post-decision minority marking.

use std::sync::Arc;
use tracing::{debug, info, warn};

use decision_store::{
    DecisionOutcome, MinorityReportStore, Position, PositionStance, PositionStats, PositionStore,
};

use crate::config::PositionConfig;
use crate::error::{GovernanceError, Result};
use crate::positions::report::render_minority_report;
use crate::validation::{require_id, validate_text_length};

/// Longest minority report accepted from an editor, in characters.
pub const MAX_MINORITY_REPORT_CHARS: usize = 5000;

/// Request to record a member's position.
#[derive(Debug, Clone)]
pub struct PositionInput {
    pub proposal_id: String,
    pub member_id: String,
    pub stance: PositionStance,
    pub reasoning: String,
}

impl PositionInput {
    pub fn new(
        proposal_id: impl Into<String>,
        member_id: impl Into<String>,
        stance: PositionStance,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            member_id: member_id.into(),
            stance,
            reasoning: reasoning.into(),
        }
    }
}

/// Stances on the losing side of a decision.
pub fn minority_stances(outcome: DecisionOutcome) -> &'static [PositionStance] {
    match outcome {
        DecisionOutcome::Approved => &[PositionStance::Oppose, PositionStance::Block],
        DecisionOutcome::Rejected => &[PositionStance::Support],
        DecisionOutcome::Amended => &[],
    }
}

/// Tracks one position per member per proposal, minority flags and reports.
pub struct PositionTracker {
    /// Position storage
    positions: Arc<dyn PositionStore>,
    /// Minority report storage
    reports: Arc<dyn MinorityReportStore>,
    /// Configuration
    config: PositionConfig,
}

impl PositionTracker {
    /// Create a tracker with default configuration.
    pub fn new(positions: Arc<dyn PositionStore>, reports: Arc<dyn MinorityReportStore>) -> Self {
        Self::with_config(positions, reports, PositionConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(
        positions: Arc<dyn PositionStore>,
        reports: Arc<dyn MinorityReportStore>,
        config: PositionConfig,
    ) -> Self {
        Self {
            positions,
            reports,
            config,
        }
    }

    /// Record or replace the member's position.
    ///
    /// Reasoning is trimmed and must fall within the configured length. An
    /// existing minority flag survives a reasoning edit but not a change of
    /// stance.
    pub async fn add_or_update_position(&self, input: PositionInput) -> Result<Position> {
        require_id("proposalId", &input.proposal_id)?;
        require_id("memberId", &input.member_id)?;
        let reasoning = validate_text_length(
            "Reasoning",
            &input.reasoning,
            self.config.min_reasoning_chars,
            Some(self.config.max_reasoning_chars),
        )?;

        let position = self
            .positions
            .upsert_position(Position::new(
                input.proposal_id,
                input.member_id,
                input.stance,
                reasoning,
            ))
            .await?;

        info!(
            proposal_id = %position.proposal_id,
            member_id = %position.member_id,
            stance = %position.stance,
            "Position recorded"
        );

        Ok(position)
    }

    pub async fn get_positions_by_proposal(&self, proposal_id: &str) -> Result<Vec<Position>> {
        Ok(self.positions.list_positions(proposal_id).await?)
    }

    pub async fn get_member_position(
        &self,
        proposal_id: &str,
        member_id: &str,
    ) -> Result<Option<Position>> {
        Ok(self.positions.get_position(proposal_id, member_id).await?)
    }

    /// Delete a position on behalf of `requesting_member_id`.
    ///
    /// Only the author may delete; anyone else is rejected without mutation.
    /// Returns false when the author had no position.
    pub async fn delete_position(
        &self,
        proposal_id: &str,
        member_id: &str,
        requesting_member_id: &str,
    ) -> Result<bool> {
        if requesting_member_id != member_id {
            warn!(
                proposal_id = %proposal_id,
                member_id = %member_id,
                requester = %requesting_member_id,
                "Rejected position deletion by non-owner"
            );
            return Err(GovernanceError::Unauthorized(
                "You can only delete your own position".to_string(),
            ));
        }

        let removed = self.positions.delete_position(proposal_id, member_id).await?;
        debug!(proposal_id = %proposal_id, member_id = %member_id, removed, "Position deletion");
        Ok(removed)
    }

    /// Counts by stance plus how many positions are flagged minority.
    pub async fn get_position_stats(&self, proposal_id: &str) -> Result<PositionStats> {
        let positions = self.positions.list_positions(proposal_id).await?;

        let mut stats = PositionStats {
            total: positions.len(),
            ..Default::default()
        };
        for position in &positions {
            match position.stance {
                PositionStance::Support => stats.support += 1,
                PositionStance::Oppose => stats.oppose += 1,
                PositionStance::Abstain => stats.abstain += 1,
                PositionStance::Block => stats.block += 1,
            }
            if position.is_minority {
                stats.minority_count += 1;
            }
        }

        Ok(stats)
    }

    /// Flag positions on the losing side of the decision.
    ///
    /// One-way and idempotent: flags are only ever set, and re-running with the
    /// same outcome changes nothing. `Amended` flags nobody. Returns the number
    /// of positions carrying the flag for this outcome's minority stances.
    pub async fn finalize_minority_positions(
        &self,
        proposal_id: &str,
        outcome: DecisionOutcome,
    ) -> Result<usize> {
        let stances = minority_stances(outcome);
        if stances.is_empty() {
            debug!(proposal_id = %proposal_id, outcome = %outcome, "No minority for outcome");
            return Ok(0);
        }

        let flagged = self.positions.mark_minority(proposal_id, stances).await?;

        info!(
            proposal_id = %proposal_id,
            outcome = %outcome,
            flagged,
            "Minority positions finalized"
        );

        Ok(flagged)
    }

    pub async fn get_minority_positions(&self, proposal_id: &str) -> Result<Vec<Position>> {
        let positions = self.positions.list_positions(proposal_id).await?;
        Ok(positions.into_iter().filter(|p| p.is_minority).collect())
    }

    pub async fn has_minority_positions(&self, proposal_id: &str) -> Result<bool> {
        Ok(!self.get_minority_positions(proposal_id).await?.is_empty())
    }

    /// Render a minority report dated today, without saving it.
    pub async fn generate_minority_report(&self, proposal_id: &str) -> Result<Option<String>> {
        let minority = self.get_minority_positions(proposal_id).await?;
        Ok(render_minority_report(
            &minority,
            chrono::Utc::now().date_naive(),
        ))
    }

    /// Render and persist the minority report. `None` when there is no minority.
    pub async fn generate_and_save_minority_report(
        &self,
        proposal_id: &str,
    ) -> Result<Option<String>> {
        let Some(report) = self.generate_minority_report(proposal_id).await? else {
            return Ok(None);
        };

        self.reports.save_report(proposal_id, report.clone()).await?;
        info!(proposal_id = %proposal_id, "Minority report saved");
        Ok(Some(report))
    }

    pub async fn get_minority_report(&self, proposal_id: &str) -> Result<Option<String>> {
        Ok(self.reports.get_report(proposal_id).await?)
    }

    /// Replace the stored report with moderator-edited text.
    pub async fn update_minority_report(&self, proposal_id: &str, report: &str) -> Result<()> {
        require_id("proposalId", proposal_id)?;
        let report = validate_text_length("Report", report, 1, Some(MAX_MINORITY_REPORT_CHARS))?;

        self.reports.save_report(proposal_id, report).await?;
        info!(proposal_id = %proposal_id, "Minority report updated");
        Ok(())
    }
}
