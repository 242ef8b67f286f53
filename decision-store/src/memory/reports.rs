//! In-memory minority report store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreResult;
use crate::traits::MinorityReportStore;

/// Reports keyed by proposal id.
#[derive(Default)]
pub struct InMemoryMinorityReportStore {
    reports: DashMap<String, String>,
}

impl InMemoryMinorityReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MinorityReportStore for InMemoryMinorityReportStore {
    async fn get_report(&self, proposal_id: &str) -> StoreResult<Option<String>> {
        Ok(self.reports.get(proposal_id).map(|r| r.clone()))
    }

    async fn save_report(&self, proposal_id: &str, report: String) -> StoreResult<()> {
        self.reports.insert(proposal_id.to_string(), report);
        Ok(())
    }
}
