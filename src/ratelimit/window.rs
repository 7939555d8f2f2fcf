//! Per-key window state.

use serde::{Deserialize, Serialize};

use crate::config::RateLimitOptions;

/// The stored record for one rate-limited key.
///
/// `remaining` counts the admits left in the current window. It goes
/// negative once the limit is exceeded, which lets observers distinguish a
/// key that just ran out from one that is being hammered; the admit decision
/// only cares about the sign. `reset_at` marks the window expiry in epoch
/// milliseconds and is rewritten to now + period on every recorded request.
///
/// Serialized as JSON with the field names `remaining` and `reset`, so
/// entries written by other implementations sharing the same store stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    /// Admits left before denial; negative once over the limit
    pub remaining: i64,

    /// Window expiry, in milliseconds since the Unix epoch
    #[serde(rename = "reset")]
    pub reset_at: i64,
}

impl WindowState {
    /// A fresh window with the full allowance.
    pub fn fresh(options: &RateLimitOptions, now_ms: i64) -> Self {
        Self {
            remaining: i64::from(options.limit),
            reset_at: now_ms + options.period.as_millis(),
        }
    }

    /// Record one request against this window.
    ///
    /// The decrement is skipped once `remaining` is negative, so the value
    /// floors at -1 no matter how many over-limit calls arrive.
    pub fn consume(&mut self) {
        if self.remaining >= 0 {
            self.remaining -= 1;
        }
    }

    /// Whether the state admits the request most recently recorded.
    pub fn is_admitted(&self) -> bool {
        self.remaining >= 0
    }

    /// How many admits have been used, relative to the configured limit.
    pub fn used(&self, limit: u32) -> i64 {
        i64::from(limit) - self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Period;

    fn options(limit: u32) -> RateLimitOptions {
        RateLimitOptions::new(limit, Period::Minute)
    }

    #[test]
    fn test_fresh_window_has_full_allowance() {
        let state = WindowState::fresh(&options(5), 1_000);

        assert_eq!(state.remaining, 5);
        assert_eq!(state.reset_at, 61_000);
        assert_eq!(state.used(5), 0);
    }

    #[test]
    fn test_consume_floors_at_minus_one() {
        let mut state = WindowState::fresh(&options(2), 0);

        state.consume();
        assert_eq!(state.remaining, 1);
        assert!(state.is_admitted());

        state.consume();
        assert_eq!(state.remaining, 0);
        assert!(state.is_admitted());

        state.consume();
        assert_eq!(state.remaining, -1);
        assert!(!state.is_admitted());

        // Further calls are clamped, not decremented.
        state.consume();
        state.consume();
        assert_eq!(state.remaining, -1);
    }

    #[test]
    fn test_used_counts_past_the_limit() {
        let mut state = WindowState::fresh(&options(1), 0);

        state.consume();
        assert_eq!(state.used(1), 1);

        state.consume();
        assert_eq!(state.used(1), 2);
    }

    #[test]
    fn test_decodes_stored_wire_format() {
        let state: WindowState =
            serde_json::from_str(r#"{"remaining":3,"reset":1700000000000}"#).unwrap();

        assert_eq!(state.remaining, 3);
        assert_eq!(state.reset_at, 1_700_000_000_000);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let state: WindowState =
            serde_json::from_str(r#"{"remaining":0,"reset":1,"note":"extra"}"#).unwrap();

        assert_eq!(state.remaining, 0);
    }
}
