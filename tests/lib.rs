//! Shared fixtures for bibx behavior tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use bibx_core::{
    BibKey, BookRecord, FetchError, FetchOutcome, HttpClient, HttpRequest, HttpResponse,
    RecordSource, TransportError, UNKNOWN_AUTHOR,
};

/// What a stubbed source should answer for one call.
#[derive(Debug, Clone)]
pub enum StubReply {
    Found { title: &'static str },
    Missing,
    TimeoutFail,
    NetworkFail,
    Panic,
}

impl StubReply {
    fn into_outcome(self, key: &BibKey) -> FetchOutcome {
        match self {
            Self::Found { title } => FetchOutcome::success(BookRecord {
                key: key.clone(),
                title: title.to_string(),
                author: UNKNOWN_AUTHOR.to_string(),
                publishers: Vec::new(),
                publish_date: None,
                page_count: None,
                raw: serde_json::json!({ "title": title }),
            }),
            Self::Missing => FetchOutcome::not_found(key.clone()),
            Self::TimeoutFail => {
                FetchOutcome::failure(key.clone(), FetchError::timeout("stub timed out"))
            }
            Self::NetworkFail => {
                FetchOutcome::failure(key.clone(), FetchError::network("stub connection refused"))
            }
            Self::Panic => panic!("stub pipeline fault for {key}"),
        }
    }
}

/// Source answering from a FIFO script, then from a fallback reply.
/// Records the key and tokio instant of every call.
pub struct ScriptedSource {
    script: Mutex<VecDeque<StubReply>>,
    fallback: StubReply,
    calls: Mutex<Vec<(BibKey, tokio::time::Instant)>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<StubReply>, fallback: StubReply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: StubReply) -> Self {
        Self::new(Vec::new(), reply)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log is not poisoned").len()
    }

    pub fn call_instants(&self) -> Vec<tokio::time::Instant> {
        self.calls
            .lock()
            .expect("call log is not poisoned")
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }
}

impl RecordSource for ScriptedSource {
    fn lookup<'a>(
        &'a self,
        key: &'a BibKey,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>> {
        Box::pin(async move {
            self.calls
                .lock()
                .expect("call log is not poisoned")
                .push((key.clone(), tokio::time::Instant::now()));
            let reply = self
                .script
                .lock()
                .expect("script is not poisoned")
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone());
            reply.into_outcome(key)
        })
    }
}

/// Source with one scripted reply per key, an optional per-key delay to
/// scramble completion order, and an in-flight gauge for concurrency checks.
/// Unknown keys answer `Missing`.
#[derive(Default)]
pub struct KeyedSource {
    replies: HashMap<String, (StubReply, Duration)>,
    in_flight: AtomicUsize,
    high_water: AtomicUsize,
}

impl KeyedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, key: &str, reply: StubReply) -> Self {
        self.with_delayed_reply(key, reply, Duration::ZERO)
    }

    pub fn with_delayed_reply(mut self, key: &str, reply: StubReply, delay: Duration) -> Self {
        self.replies.insert(key.to_string(), (reply, delay));
        self
    }

    /// Highest number of lookups observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.high_water.load(Ordering::SeqCst)
    }
}

impl RecordSource for KeyedSource {
    fn lookup<'a>(
        &'a self,
        key: &'a BibKey,
    ) -> Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'a>> {
        Box::pin(async move {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.high_water.fetch_max(current, Ordering::SeqCst);

            let (reply, delay) = self
                .replies
                .get(key.as_str())
                .cloned()
                .unwrap_or((StubReply::Missing, Duration::ZERO));
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            reply.into_outcome(key)
        })
    }
}

/// Scripted HTTP transport: pops one response per request, records requests,
/// and answers an empty object map once the script runs dry.
pub struct ScriptedHttpClient {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new(script: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .expect("request log is not poisoned")
            .len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log is not poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request log is not poisoned")
            .push(request);
        let response = self
            .script
            .lock()
            .expect("script is not poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::ok_json("{}")));
        Box::pin(async move { response })
    }

    fn is_mock(&self) -> bool {
        true
    }
}
