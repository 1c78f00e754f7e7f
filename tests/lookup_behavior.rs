//! Behavior-driven tests for single-key lookup classification.
//!
//! These tests pin the outcome mapping of the Open Library client: every
//! transport, status, decode, and parse condition lands in exactly one
//! `FetchOutcome` variant, and one lookup is one network call.

use std::sync::Arc;
use std::time::Duration;

use bibx_core::{
    BibKey, BreakerConfig, FetchErrorKind, HttpResponse, OpenLibraryClient, RecordSource,
    TransportError, UNKNOWN_AUTHOR,
};
use bibx_tests::ScriptedHttpClient;

fn key(raw: &str) -> BibKey {
    BibKey::parse(raw).expect("valid key")
}

fn client_with(
    script: Vec<Result<HttpResponse, TransportError>>,
) -> (OpenLibraryClient, Arc<ScriptedHttpClient>) {
    let transport = Arc::new(ScriptedHttpClient::new(script));
    let client = OpenLibraryClient::with_http_client(transport.clone());
    (client, transport)
}

// =============================================================================
// Success and not-found
// =============================================================================

#[tokio::test]
async fn when_service_knows_the_key_lookup_returns_a_matching_record() {
    let body = serde_json::json!({
        "ISBN:978-1593276034": {
            "title": "Python Crash Course",
            "authors": [{"name": "Eric Matthes"}],
            "publishers": [{"name": "No Starch Press"}],
            "number_of_pages": 560
        }
    })
    .to_string();
    let (client, transport) = client_with(vec![Ok(HttpResponse::ok_json(body))]);

    let outcome = client.lookup(&key("978-1593276034")).await;

    let record = outcome.record().expect("lookup should succeed");
    assert_eq!(record.key.as_str(), "978-1593276034");
    assert_eq!(record.title, "Python Crash Course");
    assert_eq!(record.author, "Eric Matthes");
    assert_eq!(record.page_count, Some(560));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn when_record_has_no_authors_the_author_defaults() {
    let body = serde_json::json!({ "ISBN:978-1593276034": { "title": "Dune" } }).to_string();
    let (client, _) = client_with(vec![Ok(HttpResponse::ok_json(body))]);

    let outcome = client.lookup(&key("978-1593276034")).await;

    let record = outcome.record().expect("lookup should succeed");
    assert_eq!(record.title, "Dune");
    assert_eq!(record.author, UNKNOWN_AUTHOR);
}

#[tokio::test]
async fn when_service_answers_without_the_key_lookup_is_not_found() {
    let (client, transport) = client_with(vec![Ok(HttpResponse::ok_json("{}"))]);

    let outcome = client.lookup(&key("000-000-0000")).await;

    assert!(outcome.is_not_found());
    assert_eq!(outcome.key(), &key("000-000-0000"));
    assert_eq!(transport.request_count(), 1);
}

// =============================================================================
// Failure classification
// =============================================================================

#[tokio::test]
async fn transport_timeout_maps_to_a_timeout_failure() {
    let (client, _) = client_with(vec![Err(TransportError::timeout("request timeout"))]);

    let outcome = client.lookup(&key("978-1593276034")).await;

    let error = outcome.error().expect("lookup should fail");
    assert_eq!(error.kind(), FetchErrorKind::Timeout);
}

#[tokio::test]
async fn connection_failure_maps_to_a_network_failure() {
    let (client, _) = client_with(vec![Err(TransportError::connect("connection refused"))]);

    let outcome = client.lookup(&key("978-1593276034")).await;

    let error = outcome.error().expect("lookup should fail");
    assert_eq!(error.kind(), FetchErrorKind::Network);
}

#[tokio::test]
async fn non_2xx_status_maps_to_an_http_failure_with_that_status() {
    let (client, _) = client_with(vec![Ok(HttpResponse {
        status: 503,
        body: String::from("Service Unavailable"),
    })]);

    let outcome = client.lookup(&key("978-1593276034")).await;

    let error = outcome.error().expect("lookup should fail");
    assert_eq!(error.kind(), FetchErrorKind::Http(503));
}

#[tokio::test]
async fn undecodable_2xx_body_maps_to_a_decode_failure() {
    let (client, _) = client_with(vec![Ok(HttpResponse::ok_json("<html>rate limited</html>"))]);

    let outcome = client.lookup(&key("978-1593276034")).await;

    let error = outcome.error().expect("lookup should fail");
    assert_eq!(error.kind(), FetchErrorKind::Decode);
}

#[tokio::test]
async fn non_object_fragment_maps_to_a_parse_failure_not_a_partial_record() {
    let body = serde_json::json!({ "ISBN:978-1593276034": 42 }).to_string();
    let (client, _) = client_with(vec![Ok(HttpResponse::ok_json(body))]);

    let outcome = client.lookup(&key("978-1593276034")).await;

    let error = outcome.error().expect("lookup should fail");
    assert_eq!(error.kind(), FetchErrorKind::Parse);
}

// =============================================================================
// Breaker interaction
// =============================================================================

#[tokio::test]
async fn repeated_upstream_failures_trip_the_breaker_and_stop_network_calls() {
    let transport = Arc::new(ScriptedHttpClient::new(vec![
        Err(TransportError::connect("refused")),
        Err(TransportError::connect("refused")),
    ]));
    let client = OpenLibraryClient::with_http_client(transport.clone()).with_breaker(
        BreakerConfig {
            failure_threshold: 2,
            cooldown: Duration::from_secs(60),
        },
    );

    for _ in 0..2 {
        assert!(client.lookup(&key("978-1593276034")).await.is_failure());
    }
    assert_eq!(transport.request_count(), 2);

    let outcome = client.lookup(&key("978-1593276034")).await;
    let error = outcome.error().expect("breaker should fail fast");
    assert_eq!(error.kind(), FetchErrorKind::Network);
    assert!(error.message().contains("breaker is open"));
    assert_eq!(transport.request_count(), 2, "no further network call");
}

#[tokio::test]
async fn not_found_counts_as_upstream_health_for_the_breaker() {
    let transport = Arc::new(ScriptedHttpClient::new(vec![
        Err(TransportError::connect("refused")),
        Ok(HttpResponse::ok_json("{}")),
        Err(TransportError::connect("refused")),
    ]));
    let client = OpenLibraryClient::with_http_client(transport.clone()).with_breaker(
        BreakerConfig {
            failure_threshold: 2,
            cooldown: Duration::from_secs(60),
        },
    );

    assert!(client.lookup(&key("1111111111")).await.is_failure());
    assert!(client.lookup(&key("2222222222")).await.is_not_found());
    assert!(client.lookup(&key("3333333333")).await.is_failure());

    // The not-found reset the streak, so the breaker never tripped.
    let outcome = client.lookup(&key("4444444444")).await;
    assert!(outcome.is_not_found());
    assert_eq!(transport.request_count(), 4);
}
