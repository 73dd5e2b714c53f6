use chrono::{DateTime, Utc};

use crate::pkg::internal::adaptors::postings::spec::{JobPosting, Status};
use crate::pkg::internal::store::MemoryStore;
use crate::prelude::Result;

pub struct PostingMutator<'a> {
    store: &'a MemoryStore,
}

impl<'a> PostingMutator<'a> {
    pub fn new(store: &'a MemoryStore) -> Self {
        PostingMutator { store }
    }

    pub async fn create(&self, posting: JobPosting) -> Result<JobPosting> {
        self.store.insert_posting(posting).await
    }

    pub async fn update(&self, id: &str, posting: JobPosting) -> Result<Option<JobPosting>> {
        self.store.update_posting(id, posting).await
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: Status,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JobPosting>> {
        let Some(mut posting) = self.store.find_posting_by_id(id).await? else {
            return Ok(None);
        };
        posting.status = status;
        posting.updated_at = updated_at;
        self.store.update_posting(id, posting).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.store.delete_posting(id).await
    }
}
