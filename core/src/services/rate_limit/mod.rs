//! Per-client request throttling

mod limiter;

#[cfg(test)]
mod tests;

pub use limiter::{RateLimitPolicy, RateLimitStatus, RateLimiter, RATE_KEY_PREFIX};
