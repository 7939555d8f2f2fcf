//! HTTP rate-limit metadata headers.

use http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};

use super::window::WindowState;
use crate::error::Result;

/// Maximum admits per window.
pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
/// Admits left in the current window; negative once over the limit.
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
/// Admits consumed so far, including over-limit calls.
pub const X_RATELIMIT_USED: HeaderName = HeaderName::from_static("x-ratelimit-used");
/// Window expiry as an epoch-milliseconds string.
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
/// Caller-supplied resource label; only present when one was supplied.
pub const X_RATELIMIT_RESOURCE: HeaderName = HeaderName::from_static("x-ratelimit-resource");

/// Append the standard rate-limit response headers for `state`.
///
/// `Retry-After` carries the same epoch-millisecond instant as
/// `X-RateLimit-Reset`. That is not what the HTTP spec prescribes for the
/// header (seconds-delta or HTTP-date), but existing clients depend on the
/// exact value.
pub fn write_rate_limit_headers(
    headers: &mut HeaderMap,
    limit: u32,
    state: &WindowState,
    resource: Option<&str>,
) -> Result<()> {
    headers.append(X_RATELIMIT_LIMIT, HeaderValue::from(limit));
    headers.append(X_RATELIMIT_REMAINING, HeaderValue::from(state.remaining));
    headers.append(X_RATELIMIT_USED, HeaderValue::from(state.used(limit)));
    headers.append(X_RATELIMIT_RESET, HeaderValue::from(state.reset_at));

    if let Some(resource) = resource {
        headers.append(X_RATELIMIT_RESOURCE, HeaderValue::from_str(resource)?);
    }

    headers.append(RETRY_AFTER, HeaderValue::from(state.reset_at));
    Ok(())
}
