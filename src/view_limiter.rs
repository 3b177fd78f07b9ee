//! Per-(client address, product) suppression window for view counting.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// How long a detail read suppresses further increments from the same client.
pub const VIEW_DEDUP_TTL: Duration = Duration::from_secs(10);

/// Every this many recorded hits, expired entries are swept.
const GC_INTERVAL: usize = 1024;

type ViewKey = (String, i32);

/// In-process expiring-key cache deciding whether a detail read counts.
///
/// The map is advisory: losing an entry (restart, `gc`) only risks one extra
/// increment, never data corruption. Concurrent reads from the same client
/// may race and both pass; at most one extra increment is acceptable for an
/// analytics counter.
#[derive(Clone)]
pub struct ViewLimiter {
    entries: Arc<DashMap<ViewKey, Instant>>,
    hits: Arc<AtomicUsize>,
    ttl: Duration,
}

impl Default for ViewLimiter {
    fn default() -> Self {
        Self::new(VIEW_DEDUP_TTL)
    }
}

impl ViewLimiter {
    /// Create a limiter with the given suppression window.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            hits: Arc::new(AtomicUsize::new(0)),
            ttl,
        }
    }

    /// Record a view attempt. Returns `true` when no live entry exists for
    /// `(client_addr, product_id)`, writing a fresh one; the caller should
    /// then increment the counter. Returns `false` while a live entry
    /// suppresses the key. Suppressed hits do not refresh the window.
    ///
    /// Every [`GC_INTERVAL`] hits the map is swept of expired entries, so
    /// one-off client addresses do not accumulate forever.
    pub fn set_if_new(&self, client_addr: &str, product_id: i32) -> bool {
        if self.hits.fetch_add(1, Ordering::Relaxed) % GC_INTERVAL == GC_INTERVAL - 1 {
            self.gc();
        }

        let now = Instant::now();

        match self.entries.entry((client_addr.to_string(), product_id)) {
            Entry::Occupied(mut occupied) => {
                if now.duration_since(*occupied.get()) < self.ttl {
                    false
                } else {
                    occupied.insert(now);
                    true
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(now);
                true
            }
        }
    }

    /// Remove expired entries to keep memory usage bounded.
    pub fn gc(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, written_at| now.duration_since(*written_at) < self.ttl);
    }
}
