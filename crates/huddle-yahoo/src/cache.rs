// In-memory response cache keyed by (endpoint, parameters).
//
// Each entry carries its own TTL. Callers pass `now` explicitly so expiry is
// deterministic under test.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Logical endpoint name, e.g. "scoreboard".
    pub endpoint: &'static str,
    /// Parameters that distinguish one response from another.
    pub params: Vec<(&'static str, String)>,
}

impl CacheKey {
    pub fn new<I, V>(endpoint: &'static str, params: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: ToString,
    {
        CacheKey {
            endpoint,
            params: params.into_iter().map(|(k, v)| (k, v.to_string())).collect(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: Arc<Value>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }
}

#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: HashMap<CacheKey, CacheEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a fresh entry, evicting it if it has expired.
    pub fn get(&mut self, key: &CacheKey, now: Instant) -> Option<Arc<Value>> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now) => {
                debug!(endpoint = key.endpoint, "cache hit");
                Some(Arc::clone(&entry.value))
            }
            Some(_) => {
                debug!(endpoint = key.endpoint, "cache entry expired");
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, key: CacheKey, value: Arc<Value>, ttl: Duration, now: Instant) {
        if ttl.is_zero() {
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
                ttl,
            },
        );
    }

    /// Drop every entry; the next lookups miss.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
