//! Audit recorder: the single write path into the trail. Every state-affecting
//! action, whether user-initiated or sweep-initiated, goes through `record`.

use std::sync::Arc;

use uuid::Uuid;

use crate::pkg::internal::adaptors::audit::mutators::AuditMutator;
use crate::pkg::internal::adaptors::audit::selectors::AuditSelector;
use crate::pkg::internal::adaptors::audit::spec::{AuditAction, AuditEntry};
use crate::pkg::internal::clock::Clock;
use crate::pkg::internal::store::MemoryStore;
use crate::prelude::Result;

/// `job_id` value that selects the whole trail on reads.
pub const ALL_JOBS: &str = "all";

#[derive(Clone)]
pub struct AuditRecorder {
    store: MemoryStore,
    clock: Arc<dyn Clock>,
}

impl AuditRecorder {
    pub fn new(store: MemoryStore, clock: Arc<dyn Clock>) -> Self {
        AuditRecorder { store, clock }
    }

    /// Appends one entry, timestamp assigned here at insertion. Store failures
    /// propagate to the caller; the recorder never swallows them.
    pub async fn record(
        &self,
        job_id: &str,
        action: AuditAction,
        description: &str,
        recruiter: &str,
    ) -> Result<AuditEntry> {
        let entry = AuditEntry {
            id: Uuid::new_v4().to_string(),
            job_id: job_id.to_string(),
            action,
            description: description.to_string(),
            timestamp: self.clock.now(),
            recruiter: recruiter.to_string(),
        };
        AuditMutator::new(&self.store).append(entry).await
    }

    /// Entries for one job, or the whole trail for [`ALL_JOBS`], ordered by
    /// timestamp ascending.
    pub async fn get_for_job(&self, job_id: &str) -> Result<Vec<AuditEntry>> {
        let selector = AuditSelector::new(&self.store);
        if job_id == ALL_JOBS {
            selector.get_all().await
        } else {
            selector.get_by_job(job_id).await
        }
    }
}
