use crate::pkg::internal::adaptors::audit::spec::AuditEntry;
use crate::pkg::internal::store::MemoryStore;
use crate::prelude::Result;

pub struct AuditMutator<'a> {
    store: &'a MemoryStore,
}

impl<'a> AuditMutator<'a> {
    pub fn new(store: &'a MemoryStore) -> Self {
        AuditMutator { store }
    }

    /// Append only. Entries are never updated or removed.
    pub async fn append(&self, entry: AuditEntry) -> Result<AuditEntry> {
        self.store.insert_audit(entry).await
    }
}
