//! The one-key lookup seam.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::domain::BibKey;
use crate::outcome::FetchOutcome;

/// Contract for anything that can look one key up: the HTTP client, the
/// retry decorator wrapped around it, or a scripted stub in tests.
///
/// Implementations resolve every failure path into the returned
/// [`FetchOutcome`]; the future itself never fails.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the batch orchestrator shares one
/// source across all of a batch's tasks.
pub trait RecordSource: Send + Sync {
    fn lookup<'a>(
        &'a self,
        key: &'a BibKey,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>>;
}

impl<S: RecordSource + ?Sized> RecordSource for Arc<S> {
    fn lookup<'a>(
        &'a self,
        key: &'a BibKey,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>> {
        self.as_ref().lookup(key)
    }
}
