//! Request-rate throttling for batch fan-out.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

/// Quota policy: at most `limit` lookups per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub window: Duration,
    pub limit: u32,
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared limiter handed to every lookup task in a batch.
///
/// Waiting for budget suspends only the task that asked; sibling lookups
/// keep running.
#[derive(Clone)]
pub struct RequestThrottle {
    limiter: Arc<DirectRateLimiter>,
    poll_interval: Duration,
}

impl RequestThrottle {
    pub fn new(policy: QuotaPolicy) -> Self {
        let safe_limit = policy.limit.max(1);
        let burst = NonZeroU32::new(safe_limit).expect("safe limit must be non-zero");

        let seconds_per_cell = (policy.window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
        let period = Duration::from_secs_f64(seconds_per_cell);

        let quota = Quota::with_period(period)
            .expect("period is always greater than zero")
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            poll_interval: period,
        }
    }

    /// Tries to take one unit of rate budget; on refusal returns how long
    /// to wait before asking again.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        if self.limiter.check().is_ok() {
            Ok(())
        } else {
            Err(self.poll_interval)
        }
    }

    /// Suspends the calling task until budget is available.
    pub async fn acquire(&self) {
        while let Err(wait) = self.try_acquire() {
            tokio::time::sleep(wait).await;
        }
    }
}
