//! Latest-query-wins bookkeeping for search-as-you-type clients.
//!
//! A client tags every search with an increasing sequence number. Responses
//! can be produced out of order, so before a response goes out it is checked
//! against the newest sequence number seen; anything older is stale and is
//! dropped instead of overwriting newer results.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct SearchSession {
    latest: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a response for `seq` is still the newest one. Records `seq`
    /// as issued if it was not seen before.
    pub fn admit(&self, seq: u64) -> bool {
        let previous = self.latest.fetch_max(seq, Ordering::AcqRel);
        seq >= previous
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}
