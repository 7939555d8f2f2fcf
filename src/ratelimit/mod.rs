//! Rate limiting logic and state management.

mod limiter;
mod metadata;
mod window;

pub use limiter::{Outcome, RateLimiter};
pub use metadata::{
    write_rate_limit_headers, X_RATELIMIT_LIMIT, X_RATELIMIT_REMAINING, X_RATELIMIT_RESET,
    X_RATELIMIT_RESOURCE, X_RATELIMIT_USED,
};
pub use window::WindowState;
