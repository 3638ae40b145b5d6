//! Min-interval gate shared by every external API caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

/// Enforces a minimum delay between consecutive external calls.
///
/// One limiter is shared (via `Arc`) by all KB clients so the interval holds
/// per process, not per question.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
    permits: AtomicU64,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
            permits: AtomicU64::new(0),
        }
    }

    /// A limiter that never waits.
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Waits until `interval` has elapsed since the previous permit.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                trace!(wait = ?(ready_at - Instant::now()), "Rate limiter waiting");
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_call = Some(Instant::now());
        self.permits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of permits granted so far.
    pub fn permits(&self) -> u64 {
        self.permits.load(Ordering::Relaxed)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_RATE_LIMIT_INTERVAL)
    }
}
