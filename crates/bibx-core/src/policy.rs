//! Host-supplied fetch configuration.

use std::time::Duration;

use crate::retry::RetryConfig;
use crate::throttle::QuotaPolicy;

/// Everything a host configures about batch fetching, as one explicit value
/// rather than defaults baked into the components.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPolicy {
    /// Timeout budget for one network call.
    pub request_timeout: Duration,
    /// Retry schedule applied around every key.
    pub retry: RetryConfig,
    /// Upper bound on in-flight lookups; `None` leaves fan-out unbounded.
    pub max_concurrency: Option<usize>,
    /// Optional request-rate quota shared by the whole batch.
    pub quota: Option<QuotaPolicy>,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            max_concurrency: None,
            quota: None,
        }
    }
}

impl FetchPolicy {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_concurrency(mut self, cap: usize) -> Self {
        self.max_concurrency = Some(cap);
        self
    }

    pub fn with_quota(mut self, quota: QuotaPolicy) -> Self {
        self.quota = Some(quota);
        self
    }
}
