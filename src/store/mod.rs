//! Key-value store abstraction and backends.

mod memory;

pub use memory::MemoryStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// The key-value store contract consumed by the rate limiter.
///
/// The limiter only ever needs these three operations, so any backend that
/// can honor them (an in-memory map, a distributed cache, a database table)
/// can be substituted without touching the rate-limiting logic. Values are
/// opaque bytes; the limiter owns encoding and decoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value for a key. Returns `None` when the key is absent or
    /// its TTL has elapsed.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a value with a best-effort time-to-live. Once the TTL elapses
    /// the entry must behave as absent on subsequent reads.
    async fn put(&self, key: &str, value: Vec<u8>, expire_after: Duration) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
