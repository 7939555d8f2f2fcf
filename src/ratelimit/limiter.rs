//! Core rate limiter implementation.

use chrono::Utc;
use http::HeaderMap;
use tracing::{debug, trace};

use crate::config::RateLimitOptions;
use crate::error::Result;
use crate::store::KeyValueStore;

use super::metadata;
use super::window::WindowState;

/// Prefix applied to every store key, keeping limiter state from colliding
/// with unrelated data in a shared store.
const KEY_PREFIX: &str = "rl:";

/// The outcome of a single rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the request was admitted
    pub success: bool,
}

/// A fixed-window rate limiter backed by a key-value store.
///
/// The limiter holds no mutable state of its own; every correctness-relevant
/// value lives in the store. One instance can be shared across tasks, and
/// several instances (or processes) sharing a store enforce one combined
/// limit per key.
///
/// The read-then-write sequence in [`limit`](Self::limit) is not atomic: two
/// concurrent calls for the same key may both observe the same remaining
/// count, so the effective limit can be exceeded slightly under contention.
pub struct RateLimiter<S> {
    /// The key-value store holding per-key window state
    store: S,
    /// Immutable limiter options
    options: RateLimitOptions,
}

impl<S: KeyValueStore> RateLimiter<S> {
    /// Create a rate limiter with the given store and options.
    pub fn new(store: S, options: RateLimitOptions) -> Self {
        Self { store, options }
    }

    /// Create a rate limiter with the default options (10 requests per
    /// 60-second window).
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, RateLimitOptions::default())
    }

    /// The options this limiter was built with.
    pub fn options(&self) -> &RateLimitOptions {
        &self.options
    }

    /// Record one request against `key` and report whether to admit it.
    ///
    /// Absent, expired, or undecodable state counts as a fresh window with
    /// the full allowance. Every call, admitted or not, performs one store
    /// read and one store write, pushes the window expiry a full period into
    /// the future, and refreshes the stored entry's TTL; an idle key's state
    /// self-expires after one period.
    ///
    /// The call that brings `remaining` to exactly zero is the last admitted
    /// one; the call that pushes it negative is reported as denied.
    pub async fn limit(&self, key: &str) -> Result<Outcome> {
        let store_key = self.store_key(key);
        let now = Utc::now().timestamp_millis();

        trace!(key = %store_key, "Checking rate limit");

        let mut state = self.read_state(&store_key).await?.unwrap_or_else(|| {
            debug!(
                key = %store_key,
                limit = self.options.limit,
                period = self.options.period.as_secs(),
                "Starting new window"
            );
            WindowState::fresh(&self.options, now)
        });

        state.consume();
        // Every call restarts the window, denied calls included.
        state.reset_at = now + self.options.period.as_millis();

        let encoded = serde_json::to_vec(&state)?;
        self.store
            .put(&store_key, encoded, self.options.period.duration())
            .await?;

        if !state.is_admitted() {
            debug!(key = %store_key, remaining = state.remaining, "Rate limit exceeded");
        }

        Ok(Outcome {
            success: state.is_admitted(),
        })
    }

    /// Forget any stored state for `key`.
    ///
    /// The next [`limit`](Self::limit) call treats the key as brand new.
    /// Resetting a key with no stored state is a no-op, not an error.
    pub async fn reset(&self, key: &str) -> Result<()> {
        let store_key = self.store_key(key);
        debug!(key = %store_key, "Resetting rate limit");
        self.store.delete(&store_key).await
    }

    /// Read the current window state for `key` without recording a request.
    ///
    /// Returns `None` when the key has no usable stored state.
    pub async fn current_state(&self, key: &str) -> Result<Option<WindowState>> {
        let store_key = self.store_key(key);
        self.read_state(&store_key).await
    }

    /// Append the standard rate-limit response headers for `key`.
    ///
    /// This is a read-only view: it never writes state back and never
    /// consumes a request, so calling it cannot change the outcome of a
    /// subsequent [`limit`](Self::limit). Keys with no stored state report a
    /// fresh, untouched window.
    pub async fn write_http_metadata(
        &self,
        key: &str,
        resource: Option<&str>,
        headers: &mut HeaderMap,
    ) -> Result<()> {
        let state = self.current_state(key).await?.unwrap_or_else(|| {
            WindowState::fresh(&self.options, Utc::now().timestamp_millis())
        });

        metadata::write_rate_limit_headers(headers, self.options.limit, &state, resource)
    }

    /// Build a new header map populated with the rate-limit metadata for
    /// `key`, for callers without an existing response to append into.
    pub async fn http_metadata(&self, key: &str, resource: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        self.write_http_metadata(key, resource, &mut headers).await?;
        Ok(headers)
    }

    /// Derive the store key for a caller key.
    fn store_key(&self, key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    /// Read and decode stored state, treating malformed values as absent so
    /// a corrupted entry cannot permanently block a key.
    async fn read_state(&self, store_key: &str) -> Result<Option<WindowState>> {
        let Some(raw) = self.store.get(store_key).await? else {
            return Ok(None);
        };

        match serde_json::from_slice(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                debug!(key = %store_key, error = %err, "Discarding undecodable window state");
                Ok(None)
            }
        }
    }
}
