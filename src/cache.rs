use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::ThreadAnalysis;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    thread_id: String,
    post_count: usize,
}

impl CacheKey {
    pub fn new(thread_id: &str, post_count: usize) -> Self {
        Self {
            thread_id: thread_id.to_string(),
            post_count,
        }
    }
}

struct CacheEntry {
    analysis: ThreadAnalysis,
    inserted_at: Instant,
}

/// Time-bounded memoization of thread analyses, keyed by thread identity plus
/// post count. Entries are immutable once written; duplicate computation under
/// concurrent access is last-writer-wins, not a correctness problem.
pub struct AnalysisCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl AnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the entry only while it is younger than the TTL. Expired
    /// entries are evicted lazily on probe; no background sweep.
    pub fn get(&self, key: &CacheKey) -> Option<ThreadAnalysis> {
        let mut guard = self.lock();
        match guard.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                debug!(thread_id = %key.thread_id, post_count = key.post_count, "analysis cache hit");
                Some(entry.analysis.clone())
            }
            Some(_) => {
                debug!(thread_id = %key.thread_id, post_count = key.post_count, "analysis cache expired");
                guard.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: CacheKey, analysis: ThreadAnalysis) {
        let mut guard = self.lock();
        guard.insert(
            key,
            CacheEntry {
                analysis,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn clear(&self) {
        let mut guard = self.lock();
        guard.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
