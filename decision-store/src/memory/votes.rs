//! In-memory vote store.

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::StoreResult;
use crate::traits::VoteStore;
use crate::types::Vote;

/// Votes grouped by proposal, then by member.
#[derive(Default)]
pub struct InMemoryVoteStore {
    votes: DashMap<String, HashMap<String, Vote>>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total votes across all proposals.
    pub fn count(&self) -> usize {
        self.votes.iter().map(|entry| entry.value().len()).sum()
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn upsert_vote(&self, vote: Vote) -> StoreResult<Vote> {
        let mut by_member = self.votes.entry(vote.proposal_id.clone()).or_default();

        let stored = match by_member.entry(vote.member_id.clone()) {
            Entry::Occupied(mut occupied) => {
                let existing = occupied.get_mut();
                existing.vote_type = vote.vote_type;
                existing.reasoning = vote.reasoning;
                existing.updated_at = vote.updated_at;
                existing.clone()
            }
            Entry::Vacant(vacant) => vacant.insert(vote).clone(),
        };

        tracing::debug!(
            proposal_id = %stored.proposal_id,
            member_id = %stored.member_id,
            vote_id = %stored.id,
            "Upserted vote"
        );
        Ok(stored)
    }

    async fn get_vote(&self, proposal_id: &str, member_id: &str) -> StoreResult<Option<Vote>> {
        Ok(self
            .votes
            .get(proposal_id)
            .and_then(|by_member| by_member.get(member_id).cloned()))
    }

    async fn list_votes(&self, proposal_id: &str) -> StoreResult<Vec<Vote>> {
        Ok(self
            .votes
            .get(proposal_id)
            .map(|by_member| by_member.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_vote(&self, proposal_id: &str, member_id: &str) -> StoreResult<bool> {
        let removed = self
            .votes
            .get_mut(proposal_id)
            .map(|mut by_member| by_member.remove(member_id).is_some())
            .unwrap_or(false);

        self.votes.remove_if(proposal_id, |_, by_member| by_member.is_empty());
        Ok(removed)
    }
}
