//! Open Library `/api/books` adapter: the single-fetch unit of the pipeline.
//!
//! One `lookup` is exactly one network call. No caching, no shared mutable
//! state beyond the failure breaker, and no error ever crosses the boundary
//! as anything but a [`FetchOutcome`] value.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::breaker::{BreakerConfig, FailureBreaker};
use crate::domain::{BibKey, KeyScheme};
use crate::http_client::{
    HttpClient, HttpRequest, ReqwestHttpClient, TransportError, TransportKind,
};
use crate::outcome::{FetchError, FetchOutcome};
use crate::parser;
use crate::source::RecordSource;

/// Public Open Library endpoint.
pub const OPEN_LIBRARY_BASE_URL: &str = "https://openlibrary.org";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for an Open Library style books endpoint.
#[derive(Clone)]
pub struct OpenLibraryClient {
    base_url: String,
    scheme: KeyScheme,
    request_timeout: Duration,
    http_client: Arc<dyn HttpClient>,
    breaker: Arc<FailureBreaker>,
}

impl Default for OpenLibraryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenLibraryClient {
    /// Client over a real reqwest transport with default settings.
    pub fn new() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }

    /// Client over a caller-supplied transport (tests use scripted ones).
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: String::from(OPEN_LIBRARY_BASE_URL),
            scheme: KeyScheme::Isbn,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            http_client,
            breaker: Arc::new(FailureBreaker::default()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_scheme(mut self, scheme: KeyScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_breaker(mut self, config: BreakerConfig) -> Self {
        self.breaker = Arc::new(FailureBreaker::new(config));
        self
    }

    pub const fn scheme(&self) -> KeyScheme {
        self.scheme
    }

    fn endpoint(&self, bibkey: &str) -> String {
        format!(
            "{}/api/books?bibkeys={}&format=json&jscmd=data",
            self.base_url,
            urlencoding::encode(bibkey)
        )
    }

    async fn lookup_inner(&self, key: &BibKey) -> FetchOutcome {
        if !self.breaker.allow() {
            return FetchOutcome::failure(
                key.clone(),
                FetchError::network("lookup breaker is open; skipping upstream call"),
            );
        }

        let bibkey = self.scheme.bibkey(key);
        let request = HttpRequest::get(self.endpoint(&bibkey))
            .with_header("accept", "application/json")
            .with_timeout(self.request_timeout);

        let response = match self.http_client.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                self.breaker.on_failure();
                tracing::warn!(key = %key, error = %error, "lookup transport failed");
                return FetchOutcome::failure(key.clone(), classify_transport(&error));
            }
        };

        if !response.is_success() {
            self.breaker.on_failure();
            tracing::warn!(key = %key, status = response.status, "lookup service rejected request");
            return FetchOutcome::failure(
                key.clone(),
                FetchError::http(
                    response.status,
                    format!("lookup service returned status {}", response.status),
                ),
            );
        }

        let body: BTreeMap<String, Value> = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(error) => {
                // A 2xx that does not decode means the upstream is serving
                // garbage; that counts against the breaker like any failure.
                self.breaker.on_failure();
                return FetchOutcome::failure(
                    key.clone(),
                    FetchError::decode(format!("lookup body was not a JSON object map: {error}")),
                );
            }
        };

        // The upstream answered coherently from here on; the breaker sees
        // success even when the individual record is absent or unusable.
        self.breaker.on_success();

        match body.get(&bibkey) {
            None => {
                tracing::debug!(key = %key, bibkey = %bibkey, "no record for key");
                FetchOutcome::not_found(key.clone())
            }
            Some(fragment) => match parser::parse_record(key, fragment) {
                Ok(record) => FetchOutcome::success(record),
                Err(error) => FetchOutcome::failure(key.clone(), error),
            },
        }
    }
}

impl RecordSource for OpenLibraryClient {
    fn lookup<'a>(
        &'a self,
        key: &'a BibKey,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>> {
        Box::pin(self.lookup_inner(key))
    }
}

fn classify_transport(error: &TransportError) -> FetchError {
    match error.kind() {
        TransportKind::Timeout => FetchError::timeout(error.message()),
        TransportKind::Connect | TransportKind::Other => FetchError::network(error.message()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http_client::HttpResponse;

    #[derive(Debug)]
    struct RecordingHttpClient {
        response: Result<HttpResponse, TransportError>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn respond(response: Result<HttpResponse, TransportError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>
        {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self.response.clone();
            Box::pin(async move { response })
        }

        fn is_mock(&self) -> bool {
            true
        }
    }

    fn key() -> BibKey {
        BibKey::parse("978-1593276034").expect("valid key")
    }

    #[tokio::test]
    async fn request_targets_encoded_bibkey() {
        let transport = Arc::new(RecordingHttpClient::respond(Ok(HttpResponse::ok_json("{}"))));
        let client = OpenLibraryClient::with_http_client(transport.clone())
            .with_base_url("https://books.example.test/")
            .with_request_timeout(Duration::from_secs(4));

        let outcome = client.lookup(&key()).await;
        assert!(outcome.is_not_found());

        let requests = transport.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "https://books.example.test/api/books?bibkeys=ISBN%3A978-1593276034&format=json&jscmd=data"
        );
        assert_eq!(requests[0].timeout, Duration::from_secs(4));
    }

    #[tokio::test]
    async fn open_breaker_short_circuits_without_a_network_call() {
        let transport = Arc::new(RecordingHttpClient::respond(Err(TransportError::connect(
            "refused",
        ))));
        let client = OpenLibraryClient::with_http_client(transport.clone()).with_breaker(
            BreakerConfig {
                failure_threshold: 2,
                cooldown: Duration::from_secs(60),
            },
        );

        for _ in 0..2 {
            let outcome = client.lookup(&key()).await;
            assert!(outcome.is_failure());
        }
        assert_eq!(transport.recorded_requests().len(), 2);

        let outcome = client.lookup(&key()).await;
        let error = outcome.error().expect("breaker failure");
        assert!(error.message().contains("breaker is open"));
        assert_eq!(transport.recorded_requests().len(), 2);
    }
}
