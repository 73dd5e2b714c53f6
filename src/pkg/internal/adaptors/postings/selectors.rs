use crate::pkg::internal::adaptors::postings::spec::{JobPosting, Status};
use crate::pkg::internal::store::MemoryStore;
use crate::prelude::Result;

pub struct PostingSelector<'a> {
    store: &'a MemoryStore,
}

impl<'a> PostingSelector<'a> {
    pub fn new(store: &'a MemoryStore) -> Self {
        PostingSelector { store }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<JobPosting>> {
        self.store.find_posting_by_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<JobPosting>> {
        let mut rows = self.store.find_postings(|_| true).await?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    pub async fn get_by_status(&self, status: Status) -> Result<Vec<JobPosting>> {
        let mut rows = self.store.find_postings(|p| p.status == status).await?;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
