//! In-memory record store. Holds the durable state behind the same contract a
//! database-backed store would expose: find/insert/update/delete for postings,
//! append/find for audit entries.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::pkg::internal::adaptors::audit::spec::AuditEntry;
use crate::pkg::internal::adaptors::postings::spec::JobPosting;
use crate::prelude::Result;
#[cfg(test)]
use crate::prelude::Error;

#[derive(Default)]
struct StoreState {
    postings: HashMap<String, JobPosting>,
    /// Append-only; insertion order is preserved so equal timestamps keep a
    /// stable order.
    audit: Vec<AuditEntry>,
    #[cfg(test)]
    fail_posting_updates: std::collections::HashSet<String>,
    #[cfg(test)]
    fail_audit_inserts: std::collections::HashSet<String>,
}

#[derive(Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    pub async fn find_postings<P>(&self, pred: P) -> Result<Vec<JobPosting>>
    where
        P: Fn(&JobPosting) -> bool,
    {
        let state = self.state.read().await;
        Ok(state
            .postings
            .values()
            .filter(|p| pred(p))
            .cloned()
            .collect())
    }

    pub async fn find_posting_by_id(&self, id: &str) -> Result<Option<JobPosting>> {
        let state = self.state.read().await;
        Ok(state.postings.get(id).cloned())
    }

    pub async fn insert_posting(&self, posting: JobPosting) -> Result<JobPosting> {
        let mut state = self.state.write().await;
        state
            .postings
            .insert(posting.id.clone(), posting.clone());
        Ok(posting)
    }

    pub async fn update_posting(&self, id: &str, posting: JobPosting) -> Result<Option<JobPosting>> {
        let mut state = self.state.write().await;
        #[cfg(test)]
        if state.fail_posting_updates.contains(id) {
            return Err(Error::Store(format!("injected update failure for {}", id)));
        }
        if !state.postings.contains_key(id) {
            return Ok(None);
        }
        state.postings.insert(id.to_string(), posting.clone());
        Ok(Some(posting))
    }

    pub async fn delete_posting(&self, id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.postings.remove(id).is_some())
    }

    pub async fn insert_audit(&self, entry: AuditEntry) -> Result<AuditEntry> {
        let mut state = self.state.write().await;
        #[cfg(test)]
        if state.fail_audit_inserts.contains(&entry.job_id) {
            return Err(Error::Store(format!(
                "injected audit failure for {}",
                entry.job_id
            )));
        }
        state.audit.push(entry.clone());
        Ok(entry)
    }

    pub async fn find_audit<P>(&self, pred: P) -> Result<Vec<AuditEntry>>
    where
        P: Fn(&AuditEntry) -> bool,
    {
        let state = self.state.read().await;
        Ok(state.audit.iter().filter(|e| pred(e)).cloned().collect())
    }

    /// Make every update for the given posting id fail with a store error.
    #[cfg(test)]
    pub async fn inject_update_failure(&self, id: &str) {
        let mut state = self.state.write().await;
        state.fail_posting_updates.insert(id.to_string());
    }

    /// Make every audit append for the given job id fail with a store error.
    #[cfg(test)]
    pub async fn inject_audit_failure(&self, job_id: &str) {
        let mut state = self.state.write().await;
        state.fail_audit_inserts.insert(job_id.to_string());
    }
}
