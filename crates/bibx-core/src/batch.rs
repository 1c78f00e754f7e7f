//! Concurrent batch orchestration.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::domain::BibKey;
use crate::outcome::{BatchResult, FetchError, FetchOutcome};
use crate::policy::FetchPolicy;
use crate::retry::RetryingSource;
use crate::source::RecordSource;
use crate::throttle::RequestThrottle;

/// Task handle that aborts its task when dropped before completion, so a
/// cancelled batch leaves no lookup running in the background.
struct AbortOnDrop(JoinHandle<FetchOutcome>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Fans one batch of keys out over a retry-wrapped source.
///
/// Every key runs its own independent pipeline; the fetcher only brings the
/// results back together, in input order.
pub struct BatchFetcher<S> {
    source: Arc<RetryingSource<S>>,
    max_concurrency: Option<usize>,
    throttle: Option<RequestThrottle>,
}

impl<S: RecordSource + 'static> BatchFetcher<S> {
    pub fn new(source: S, policy: &FetchPolicy) -> Self {
        Self {
            source: Arc::new(RetryingSource::new(source, policy.retry.clone())),
            max_concurrency: policy.max_concurrency,
            throttle: policy.quota.map(RequestThrottle::new),
        }
    }

    /// Looks every key up concurrently and returns outcomes in input order.
    ///
    /// Slot `i` always answers `keys[i]`. A fault inside one key's pipeline,
    /// panics included, lands in that slot as a failure and leaves the other
    /// slots alone. An empty batch returns an empty result.
    pub async fn fetch_batch(&self, keys: &[BibKey]) -> BatchResult {
        let semaphore = self
            .max_concurrency
            .map(|cap| Arc::new(Semaphore::new(cap.max(1))));

        let handles: Vec<_> = keys
            .iter()
            .cloned()
            .map(|key| {
                let source = Arc::clone(&self.source);
                let semaphore = semaphore.clone();
                let throttle = self.throttle.clone();
                AbortOnDrop(tokio::spawn(async move {
                    let _permit = match &semaphore {
                        Some(semaphore) => Some(
                            semaphore
                                .acquire()
                                .await
                                .expect("batch semaphore is never closed"),
                        ),
                        None => None,
                    };
                    if let Some(throttle) = &throttle {
                        throttle.acquire().await;
                    }
                    source.lookup(&key).await
                }))
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (mut handle, key) in handles.into_iter().zip(keys) {
            let outcome = match (&mut handle.0).await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    tracing::error!(key = %key, error = %join_error, "lookup task died");
                    FetchOutcome::failure(
                        key.clone(),
                        FetchError::internal(format!("lookup task for {key} died: {join_error}")),
                    )
                }
            };
            outcomes.push(outcome);
        }

        let result = BatchResult { outcomes };
        tracing::info!(
            keys = keys.len(),
            found = result.success_count(),
            missing = result.not_found_count(),
            failed = result.failure_count(),
            "batch fetch complete"
        );
        result
    }
}
