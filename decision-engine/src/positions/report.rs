//! Minority report rendering.
//!
//! Compiles the reasoning of members on the losing side of a decision into a
//! Markdown document preserved alongside the proposal.

use chrono::NaiveDate;

use decision_store::{Position, PositionStance};

/// Render a report from minority positions, in the order given.
///
/// Returns `None` when there are no minority positions. Positions not flagged
/// as minority are ignored.
pub fn render_minority_report(positions: &[Position], generated_on: NaiveDate) -> Option<String> {
    let minority: Vec<&Position> = positions.iter().filter(|p| p.is_minority).collect();
    if minority.is_empty() {
        return None;
    }

    let mut lines = vec![
        "## Minority Report".to_string(),
        String::new(),
        format!(
            "This report codifies the objections and concerns raised by {} member(s) \
             who dissented from the majority decision.",
            minority.len()
        ),
        String::new(),
    ];

    for (stance, heading, label) in [
        (PositionStance::Block, "Blocking Objections", "Objection"),
        (PositionStance::Oppose, "Opposition Statements", "Statement"),
        (PositionStance::Support, "Statements in Support", "Statement"),
    ] {
        push_section(&mut lines, &minority, stance, heading, label);
    }

    lines.push("---".to_string());
    lines.push(format!("*Generated on {}*", generated_on.format("%Y-%m-%d")));

    Some(lines.join("\n"))
}

fn push_section(
    lines: &mut Vec<String>,
    minority: &[&Position],
    stance: PositionStance,
    heading: &str,
    label: &str,
) {
    let matching: Vec<&&Position> = minority.iter().filter(|p| p.stance == stance).collect();
    if matching.is_empty() {
        return;
    }

    lines.push(format!("### {}", heading));
    lines.push(String::new());
    for (i, position) in matching.iter().enumerate() {
        lines.push(format!("**{} {}:**", label, i + 1));
        lines.push(position.reasoning.clone());
        lines.push(String::new());
    }
}
