use std::sync::Arc;

use crate::pkg::internal::clock::{Clock, SystemClock};
use crate::pkg::internal::postings::PostingOps;
use crate::pkg::internal::recorder::AuditRecorder;
use crate::pkg::internal::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
    pub recorder: AuditRecorder,
    pub ops: PostingOps,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new() -> AppState {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Tests inject a manual clock here.
    pub fn with_clock(clock: Arc<dyn Clock>) -> AppState {
        let store = MemoryStore::new();
        let recorder = AuditRecorder::new(store.clone(), clock.clone());
        let ops = PostingOps::new(store.clone(), recorder.clone(), clock.clone());
        AppState {
            store,
            recorder,
            ops,
            clock,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
