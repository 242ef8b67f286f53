//! In-memory position store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreResult;
use crate::traits::PositionStore;
use crate::types::{Position, PositionStance};

/// Positions grouped by proposal, kept in first-recorded order.
#[derive(Default)]
pub struct InMemoryPositionStore {
    positions: DashMap<String, Vec<Position>>,
}

impl InMemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PositionStore for InMemoryPositionStore {
    async fn upsert_position(&self, position: Position) -> StoreResult<Position> {
        let mut positions = self.positions.entry(position.proposal_id.clone()).or_default();

        if let Some(existing) = positions
            .iter_mut()
            .find(|p| p.member_id == position.member_id)
        {
            if existing.stance != position.stance {
                existing.is_minority = false;
            }
            existing.stance = position.stance;
            existing.reasoning = position.reasoning;
            existing.recorded_at = position.recorded_at;
            return Ok(existing.clone());
        }

        positions.push(position.clone());
        tracing::debug!(
            proposal_id = %position.proposal_id,
            member_id = %position.member_id,
            "Recorded new position"
        );
        Ok(position)
    }

    async fn get_position(
        &self,
        proposal_id: &str,
        member_id: &str,
    ) -> StoreResult<Option<Position>> {
        Ok(self.positions.get(proposal_id).and_then(|positions| {
            positions.iter().find(|p| p.member_id == member_id).cloned()
        }))
    }

    async fn list_positions(&self, proposal_id: &str) -> StoreResult<Vec<Position>> {
        Ok(self
            .positions
            .get(proposal_id)
            .map(|positions| positions.clone())
            .unwrap_or_default())
    }

    async fn delete_position(&self, proposal_id: &str, member_id: &str) -> StoreResult<bool> {
        let removed = self
            .positions
            .get_mut(proposal_id)
            .map(|mut positions| {
                let before = positions.len();
                positions.retain(|p| p.member_id != member_id);
                positions.len() < before
            })
            .unwrap_or(false);

        self.positions.remove_if(proposal_id, |_, positions| positions.is_empty());
        Ok(removed)
    }

    async fn mark_minority(
        &self,
        proposal_id: &str,
        stances: &[PositionStance],
    ) -> StoreResult<usize> {
        let Some(mut positions) = self.positions.get_mut(proposal_id) else {
            return Ok(0);
        };

        let mut flagged = 0;
        for position in positions.iter_mut().filter(|p| stances.contains(&p.stance)) {
            position.is_minority = true;
            flagged += 1;
        }
        Ok(flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_preserves_order_and_minority_flag() {
        let store = InMemoryPositionStore::new();
        store
            .upsert_position(Position::new(
                "p1",
                "a",
                PositionStance::Oppose,
                "Too costly for now",
            ))
            .await
            .unwrap();
        store
            .upsert_position(Position::new(
                "p1",
                "b",
                PositionStance::Support,
                "Long overdue change",
            ))
            .await
            .unwrap();

        store
            .mark_minority("p1", &[PositionStance::Oppose])
            .await
            .unwrap();

        let updated = store
            .upsert_position(Position::new(
                "p1",
                "a",
                PositionStance::Oppose,
                "Still far too costly",
            ))
            .await
            .unwrap();
        assert!(updated.is_minority);
        assert_eq!(updated.reasoning, "Still far too costly");

        let members: Vec<_> = store
            .list_positions("p1")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.member_id)
            .collect();
        assert_eq!(members, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_stance_change_clears_minority_flag() {
        let store = InMemoryPositionStore::new();
        let original = store
            .upsert_position(Position::new(
                "p1",
                "a",
                PositionStance::Oppose,
                "Too costly for now",
            ))
            .await
            .unwrap();
        store
            .mark_minority("p1", &[PositionStance::Oppose])
            .await
            .unwrap();

        let updated = store
            .upsert_position(Position::new(
                "p1",
                "a",
                PositionStance::Support,
                "The revised budget works",
            ))
            .await
            .unwrap();
        assert!(!updated.is_minority);
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.stance, PositionStance::Support);

        let stored = store.get_position("p1", "a").await.unwrap().unwrap();
        assert!(!stored.is_minority);
    }

    #[tokio::test]
    async fn test_mark_minority_never_clears() {
        let store = InMemoryPositionStore::new();
        store
            .upsert_position(Position::new("p1", "a", PositionStance::Support, "Good for everyone"))
            .await
            .unwrap();

        assert_eq!(store.mark_minority("p1", &[PositionStance::Support]).await.unwrap(), 1);
        assert_eq!(store.mark_minority("p1", &[]).await.unwrap(), 0);

        let position = store.get_position("p1", "a").await.unwrap().unwrap();
        assert!(position.is_minority);
    }

    #[tokio::test]
    async fn test_delete_position() {
        let store = InMemoryPositionStore::new();
        store
            .upsert_position(Position::new(
                "p1",
                "a",
                PositionStance::Abstain,
                "Conflict of interest",
            ))
            .await
            .unwrap();

        assert!(store.delete_position("p1", "a").await.unwrap());
        assert!(!store.delete_position("p1", "a").await.unwrap());
        assert_eq!(store.mark_minority("p1", &[PositionStance::Abstain]).await.unwrap(), 0);
    }
}
