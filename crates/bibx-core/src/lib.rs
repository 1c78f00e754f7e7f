//! # Bibx Core
//!
//! Resilient concurrent lookup core for bibliographic records.
//!
//! ## Overview
//!
//! This crate fetches book records by key (ISBN, OCLC, ...) from an
//! Open Library style HTTP service and folds every failure mode into plain
//! data the caller pattern-matches on:
//!
//! - **Normalized records** with documented defaults for missing fields
//! - **Outcome sum type** distinguishing found, confirmed-absent, and failed
//! - **Retry decorator** with exponential backoff between attempts
//! - **Batch fan-out** that preserves input order and isolates per-key faults
//! - **Failure breaker** that short-circuits a misbehaving upstream
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Lookup-service adapters (Open Library) |
//! | [`batch`] | Concurrent batch orchestration |
//! | [`breaker`] | Upstream failure breaker |
//! | [`domain`] | Domain types ([`BibKey`], [`BookRecord`]) |
//! | [`error`] | Validation and core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`outcome`] | Fetch outcomes and error taxonomy |
//! | [`parser`] | Raw fragment normalization |
//! | [`policy`] | Host-supplied fetch configuration |
//! | [`retry`] | Backoff and the retry decorator |
//! | [`source`] | One-key lookup seam |
//! | [`throttle`] | Request-rate throttling |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bibx_core::{BatchFetcher, BibKey, FetchPolicy, OpenLibraryClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let keys = vec![
//!         BibKey::parse("978-1593276034")?,
//!         BibKey::parse("978-0134685991")?,
//!     ];
//!
//!     let fetcher = BatchFetcher::new(OpenLibraryClient::new(), &FetchPolicy::default());
//!     let result = fetcher.fetch_batch(&keys).await;
//!
//!     for record in result.records() {
//!         println!("{record}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  Batch Fetcher   │  one task per key, order-preserving collect
//! └────────┬─────────┘
//!          │ per key
//!          ▼
//! ┌──────────────────┐
//! │ Retrying Source  │  bounded attempts, doubling backoff
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ OpenLibraryClient│────▶│ Failure Breaker  │
//! │ (RecordSource)   │     └──────────────────┘
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ HTTP Client      │     │ Record Parser    │
//! │ (reqwest/mock)   │────▶│ (defaults, raw)  │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! The fetch path never returns `Err` or panics across its boundary; every
//! attempt resolves to a [`FetchOutcome`]:
//!
//! ```rust
//! use bibx_core::FetchOutcome;
//!
//! fn describe(outcome: &FetchOutcome) -> String {
//!     match outcome {
//!         FetchOutcome::Success { record } => record.to_string(),
//!         FetchOutcome::NotFound { key } => format!("{key}: no such record"),
//!         FetchOutcome::Failure { key, error } => format!("{key}: {error}"),
//!     }
//! }
//! ```
//!
//! Only input validation ([`BibKey::parse`]) returns a conventional
//! [`Result`], before any fetching starts.

pub mod adapters;
pub mod batch;
pub mod breaker;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod outcome;
pub mod parser;
pub mod policy;
pub mod retry;
pub mod source;
pub mod throttle;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{OpenLibraryClient, OPEN_LIBRARY_BASE_URL};

// Batch orchestration
pub use batch::BatchFetcher;

// Failure breaker
pub use breaker::{BreakerConfig, BreakerState, FailureBreaker};

// Domain types
pub use domain::{BibKey, BookRecord, KeyScheme, UNKNOWN_AUTHOR, UNKNOWN_TITLE};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient, TransportError,
    TransportKind,
};

// Outcome types
pub use outcome::{BatchResult, FetchError, FetchErrorKind, FetchOutcome};

// Fragment parsing
pub use parser::parse_record;

// Policy
pub use policy::FetchPolicy;

// Retry logic
pub use retry::{Backoff, RetryConfig, RetryingSource};

// Lookup seam
pub use source::RecordSource;

// Throttling
pub use throttle::{QuotaPolicy, RequestThrottle};
