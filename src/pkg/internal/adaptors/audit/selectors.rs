use crate::pkg::internal::adaptors::audit::spec::AuditEntry;
use crate::pkg::internal::store::MemoryStore;
use crate::prelude::Result;

pub struct AuditSelector<'a> {
    store: &'a MemoryStore,
}

impl<'a> AuditSelector<'a> {
    pub fn new(store: &'a MemoryStore) -> Self {
        AuditSelector { store }
    }

    pub async fn get_all(&self) -> Result<Vec<AuditEntry>> {
        let mut rows = self.store.find_audit(|_| true).await?;
        rows.sort_by_key(|e| e.timestamp);
        Ok(rows)
    }

    pub async fn get_by_job(&self, job_id: &str) -> Result<Vec<AuditEntry>> {
        let mut rows = self.store.find_audit(|e| e.job_id == job_id).await?;
        rows.sort_by_key(|e| e.timestamp);
        Ok(rows)
    }
}
