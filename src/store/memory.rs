//! In-memory key-value store backend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::KeyValueStore;
use crate::error::Result;

/// A stored value together with its expiration deadline.
#[derive(Debug, Clone)]
struct StoredValue {
    data: Vec<u8>,
    expires_at: Instant,
}

impl StoredValue {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// An in-process store backend with native TTL semantics.
///
/// Entries past their TTL behave as absent: they are dropped lazily when
/// read, or eagerly via [`purge_expired`](Self::purge_expired). Cloning is
/// cheap and clones share the same underlying map, so a `MemoryStore` can be
/// handed to several limiters at once.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including expired entries that have
    /// not been swept yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry whose TTL has elapsed.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, value| !value.is_expired(now));
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.data.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove_if(key, |_, value| value.is_expired(now));
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: Vec<u8>, expire_after: Duration) -> Result<()> {
        self.entries.insert(
            key.to_string(),
            StoredValue {
                data: value,
                expires_at: Instant::now() + expire_after,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
