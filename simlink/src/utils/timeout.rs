//! Timeout helpers used across the crate.
//!
//! Keep these helpers minimal: they centralize the default timing values of
//! the serial link and provide a small conversion helper so tests and code
//! can express timeouts in milliseconds clearly.

use std::time::{Duration, Instant};

/// Default per-byte read timeout in milliseconds used when a caller doesn't
/// provide an explicit one.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Time the reset line is held active before release.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Interval between presence polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Budget for NULL procedure bytes while a card stalls an exchange.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default read timeout as Duration.
pub fn default_read_timeout() -> Duration {
    ms(DEFAULT_READ_TIMEOUT_MS)
}

/// Deadline `timeout` from now, or `None` for "wait forever".
pub fn deadline_after(timeout: Option<Duration>) -> Option<Instant> {
    timeout.map(|t| Instant::now() + t)
}

/// True once `deadline` has passed. A missing deadline never expires.
pub fn expired(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}
