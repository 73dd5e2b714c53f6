//! Request-driven mutation path: create/edit/delete/duplicate/status-change.
//! Same contract as the sweep: validate, mutate the store, then record the
//! audit entry. A recorder failure after a committed mutation surfaces to the
//! caller and is never rolled back.

use std::sync::Arc;

use uuid::Uuid;

use crate::pkg::internal::adaptors::audit::spec::{AuditAction, AuditEntry};
use crate::pkg::internal::adaptors::postings::mutators::PostingMutator;
use crate::pkg::internal::adaptors::postings::selectors::PostingSelector;
use crate::pkg::internal::adaptors::postings::spec::{JobPosting, Status};
use crate::pkg::internal::clock::Clock;
use crate::pkg::internal::recorder::AuditRecorder;
use crate::pkg::internal::store::MemoryStore;
use crate::pkg::internal::transitions;
use crate::pkg::server::handlers::postings::PostingInput;
use crate::prelude::{Error, Result};

#[derive(Clone)]
pub struct PostingOps {
    store: MemoryStore,
    recorder: AuditRecorder,
    clock: Arc<dyn Clock>,
}

impl PostingOps {
    pub fn new(store: MemoryStore, recorder: AuditRecorder, clock: Arc<dyn Clock>) -> Self {
        PostingOps {
            store,
            recorder,
            clock,
        }
    }

    pub async fn list(&self) -> Result<Vec<JobPosting>> {
        PostingSelector::new(&self.store).get_all().await
    }

    pub async fn create(
        &self,
        input: &PostingInput,
        is_draft: bool,
        actor: &str,
    ) -> Result<JobPosting> {
        validate(input)?;
        let now = self.clock.now();
        let posting = JobPosting {
            id: Uuid::new_v4().to_string(),
            job_title: input.job_title.clone(),
            job_type: input.job_type.clone(),
            department: input.department.clone(),
            job_level: input.job_level.clone(),
            salary_range: input.salary_range.clone(),
            technical_skills: input.technical_skills.clone(),
            languages_required: input.languages_required.clone(),
            status: if is_draft { Status::Draft } else { Status::Active },
            application_deadline: input.application_deadline,
            created_at: now,
            updated_at: now,
        };
        let posting = PostingMutator::new(&self.store).create(posting).await?;
        let description = if is_draft {
            "New job posting saved as draft"
        } else {
            "New job posting published"
        };
        self.recorder
            .record(&posting.id, AuditAction::Creation, description, actor)
            .await?;
        Ok(posting)
    }

    /// Full update. The status carried in the input is honored as-is, which is
    /// how a closed posting gets reopened; `is_draft` overrides it to draft.
    pub async fn edit(
        &self,
        id: &str,
        input: &PostingInput,
        is_draft: bool,
        actor: &str,
    ) -> Result<JobPosting> {
        validate(input)?;
        let existing = PostingSelector::new(&self.store)
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let status = if is_draft {
            Status::Draft
        } else {
            input.status.unwrap_or(existing.status)
        };
        let updated = JobPosting {
            id: existing.id.clone(),
            job_title: input.job_title.clone(),
            job_type: input.job_type.clone(),
            department: input.department.clone(),
            job_level: input.job_level.clone(),
            salary_range: input.salary_range.clone(),
            technical_skills: input.technical_skills.clone(),
            languages_required: input.languages_required.clone(),
            status,
            application_deadline: input.application_deadline,
            created_at: existing.created_at,
            updated_at: self.clock.now(),
        };
        let updated = PostingMutator::new(&self.store)
            .update(id, updated)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let description = if is_draft {
            "Job posting saved as draft"
        } else {
            "Job posting updated"
        };
        self.recorder
            .record(id, AuditAction::Edit, description, actor)
            .await?;
        Ok(updated)
    }

    /// Hard delete. Prior audit entries for the id stay retrievable.
    pub async fn delete(&self, id: &str, actor: &str) -> Result<()> {
        let removed = PostingMutator::new(&self.store).delete(id).await?;
        if !removed {
            return Err(Error::NotFound(id.to_string()));
        }
        self.recorder
            .record(id, AuditAction::Deletion, "Job posting deleted", actor)
            .await?;
        Ok(())
    }

    pub async fn duplicate(&self, id: &str, actor: &str) -> Result<JobPosting> {
        let source = PostingSelector::new(&self.store)
            .get_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let now = self.clock.now();
        let copy = JobPosting {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            ..source
        };
        let copy = PostingMutator::new(&self.store).create(copy).await?;
        self.recorder
            .record(
                &copy.id,
                AuditAction::Duplication,
                &format!("Duplicated from job posting {}", id),
                actor,
            )
            .await?;
        Ok(copy)
    }

    pub async fn change_status(
        &self,
        id: &str,
        requested: &str,
        actor: &str,
    ) -> Result<JobPosting> {
        let transition = transitions::apply_requested(requested)?;
        let updated = PostingMutator::new(&self.store)
            .set_status(id, transition.status, self.clock.now())
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        self.recorder
            .record(
                id,
                AuditAction::StatusChange,
                &transition.description,
                actor,
            )
            .await?;
        Ok(updated)
    }

    pub async fn audit_trail(&self, job_id: &str) -> Result<Vec<AuditEntry>> {
        self.recorder.get_for_job(job_id).await
    }
}

fn validate(input: &PostingInput) -> Result<()> {
    let mut missing = Vec::new();
    if input.job_title.trim().is_empty() {
        missing.push("jobTitle");
    }
    if input.job_type.is_empty() {
        missing.push("jobType");
    }
    if input.department.trim().is_empty() {
        missing.push("department");
    }
    if input.job_level.trim().is_empty() {
        missing.push("jobLevel");
    }
    if input.salary_range.currency.trim().is_empty() {
        missing.push("salaryRange.currency");
    }
    if input.technical_skills.is_empty() {
        missing.push("technicalSkills");
    }
    if input.languages_required.is_empty() {
        missing.push("languagesRequired");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}
