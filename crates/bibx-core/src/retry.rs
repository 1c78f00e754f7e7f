//! Retry logic with exponential backoff.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::domain::BibKey;
use crate::outcome::FetchOutcome;
use crate::source::RecordSource;

/// Backoff strategy between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Fixed delay between attempts.
    Fixed {
        /// Delay between attempts.
        delay: Duration,
    },
    /// Exponential delay: `base * (factor ^ retry)`.
    Exponential {
        /// Delay before the first retry.
        base: Duration,
        /// Multiplicative factor applied per retry.
        factor: f64,
        /// Upper bound for any single delay.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        ///
        /// Off by default in this crate: the doubling schedule is part of
        /// the contract and timing tests pin the delay ratios.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_secs(1),
            factor: 2.0,
            max: Duration::from_secs(60),
            jitter: false,
        }
    }
}

impl Backoff {
    /// Delay before retry number `retry` (0-based: `delay(0)` precedes the
    /// second attempt).
    pub fn delay(self, retry: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let scale = factor.powi(retry as i32);
                let seconds = base.as_secs_f64() * scale;
                let capped_seconds = seconds.min(max.as_secs_f64());

                let mut delay = Duration::from_secs_f64(capped_seconds);

                if jitter {
                    let jitter_ms = (delay.as_millis() as f64 * 0.5) as u64;
                    let random_offset = fastrand::u64(0..=(jitter_ms * 2));
                    let total_ms =
                        delay.as_millis() as i64 + (random_offset as i64 - jitter_ms as i64);
                    delay = Duration::from_millis(total_ms.max(0) as u64);
                }

                delay
            }
        }
    }
}

/// Retry schedule for one key's lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts per key, the first try included. Clamped to >= 1.
    pub max_attempts: u32,
    /// Backoff applied between attempts, never after the last one.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::default(),
        }
    }
}

impl RetryConfig {
    /// Exponential schedule starting at `initial_delay` and doubling.
    pub fn exponential(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Exponential {
                base: initial_delay,
                factor: 2.0,
                max: Duration::from_secs(60),
                jitter: false,
            },
        }
    }

    /// Fixed-delay schedule.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed { delay },
        }
    }

    /// One attempt, no retries.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Retry decorator over any [`RecordSource`].
///
/// Retries failures only: `Success` and `NotFound` are terminal, and a
/// `NotFound` reflects a confirmed absence, not a transient fault. When
/// every attempt fails, the last observed failure comes back unchanged.
#[derive(Debug, Clone)]
pub struct RetryingSource<S> {
    inner: S,
    config: RetryConfig,
}

impl<S: RecordSource> RetryingSource<S> {
    pub fn new(inner: S, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    async fn lookup_with_retry(&self, key: &BibKey) -> FetchOutcome {
        let attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let outcome = self.inner.lookup(key).await;
            if !outcome.is_failure() || attempt >= attempts {
                return outcome;
            }

            let delay = self.config.backoff.delay(attempt - 1);
            tracing::warn!(
                key = %key,
                attempt,
                max_attempts = attempts,
                delay_ms = delay.as_millis() as u64,
                "lookup attempt failed, backing off"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl<S: RecordSource> RecordSource for RetryingSource<S> {
    fn lookup<'a>(
        &'a self,
        key: &'a BibKey,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>> {
        Box::pin(self.lookup_with_retry(key))
    }
}
