use std::sync::atomic::{AtomicU64, Ordering};

/// Handle for one issued search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket(u64);

/// Last-query-wins bookkeeping for callers that fire overlapping searches
///
/// Each `begin` supersedes every earlier ticket. A caller checks
/// `is_current` before applying results and discards them otherwise.
#[derive(Debug, Default)]
pub struct QueryGeneration {
    latest: AtomicU64,
}

impl QueryGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}
