//! Consent tally with absolute block veto.

use decision_store::{Vote, VoteTally, VoteType};

/// Consent share required when no threshold is configured.
pub const DEFAULT_CONSENT_THRESHOLD: f64 = 0.5;

/// Tally an already-fetched set of votes. Pure; performs no I/O.
///
/// Abstentions are excluded from the eligible count. The threshold is met when
/// `consent / (total - abstain) >= threshold_percentage` and there are no
/// blocks at all. With no eligible votes the consent share is 0.
pub fn calculate_tally(votes: &[Vote], threshold_percentage: f64) -> VoteTally {
    let count = |vote_type: VoteType| votes.iter().filter(|v| v.vote_type == vote_type).count();

    let total = votes.len();
    let consent = count(VoteType::Consent);
    let concern = count(VoteType::Concern);
    let abstain = count(VoteType::Abstain);
    let block = count(VoteType::Block);

    let eligible_votes = total - abstain;
    let consent_percentage = if eligible_votes > 0 {
        consent as f64 / eligible_votes as f64
    } else {
        0.0
    };

    VoteTally {
        total,
        consent,
        concern,
        abstain,
        block,
        eligible_votes,
        consent_percentage,
        threshold_met: consent_percentage >= threshold_percentage && block == 0,
        has_blocks: block > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(counts: &[(VoteType, usize)]) -> Vec<Vote> {
        counts
            .iter()
            .flat_map(|(vote_type, n)| {
                (0..*n).map(move |i| {
                    Vote::new("p1", format!("{}-{}", vote_type, i), *vote_type, None)
                })
            })
            .collect()
    }

    #[test]
    fn test_single_block_vetoes_overwhelming_consent() {
        let tally = calculate_tally(
            &votes(&[(VoteType::Consent, 10), (VoteType::Block, 1)]),
            DEFAULT_CONSENT_THRESHOLD,
        );

        assert!(!tally.threshold_met);
        assert!(tally.has_blocks);
        assert_eq!(tally.total, 11);
    }

    #[test]
    fn test_abstentions_leave_eligible_pool() {
        let tally = calculate_tally(
            &votes(&[
                (VoteType::Consent, 3),
                (VoteType::Concern, 1),
                (VoteType::Abstain, 2),
            ]),
            DEFAULT_CONSENT_THRESHOLD,
        );

        assert_eq!(tally.total, 6);
        assert_eq!(tally.eligible_votes, 4);
        assert_eq!(tally.consent_percentage, 0.75);
        assert!(tally.threshold_met);
        assert!(!tally.has_blocks);
    }

    #[test]
    fn test_all_abstain_yields_zero_share() {
        let tally = calculate_tally(&votes(&[(VoteType::Abstain, 5)]), DEFAULT_CONSENT_THRESHOLD);

        assert_eq!(tally.eligible_votes, 0);
        assert_eq!(tally.consent_percentage, 0.0);
        assert!(!tally.threshold_met);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let ballot = votes(&[(VoteType::Consent, 1), (VoteType::Concern, 1)]);
        assert!(calculate_tally(&ballot, 0.5).threshold_met);
        assert!(!calculate_tally(&ballot, 0.51).threshold_met);
    }

    #[test]
    fn test_empty_ballot() {
        let tally = calculate_tally(&[], DEFAULT_CONSENT_THRESHOLD);
        assert_eq!(tally.total, 0);
        assert!(!tally.threshold_met);
        // a zero threshold is met by an empty, unblocked ballot
        assert!(calculate_tally(&[], 0.0).threshold_met);
    }
}
