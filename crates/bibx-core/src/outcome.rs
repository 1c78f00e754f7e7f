//! Per-attempt fetch outcomes and the error taxonomy carried inside them.
//!
//! Every layer of the fetch pipeline resolves to a [`FetchOutcome`] value;
//! nothing in the pipeline signals failure by returning `Err` or panicking
//! across its boundary. Callers pattern-match on the outcome to distinguish
//! a found record, a confirmed absence, and a failed attempt.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::domain::{BibKey, BookRecord};

/// Classification of one failed fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// The request ran past its timeout budget.
    Timeout,
    /// Connection-level failure short of a timeout.
    Network,
    /// The service answered with a non-2xx status.
    Http(u16),
    /// 2xx body that was not the expected JSON shape.
    Decode,
    /// Record fragment present but structurally unusable.
    Parse,
    /// A fault escaped a fetch pipeline (task panic and the like).
    /// Never produced by the fetcher's own classification.
    Internal,
}

/// Structured error carried inside a [`FetchOutcome::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Timeout,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Network,
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Http(status),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Parse,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Timeout => "fetch.timeout",
            FetchErrorKind::Network => "fetch.network",
            FetchErrorKind::Http(_) => "fetch.http_status",
            FetchErrorKind::Decode => "fetch.decode",
            FetchErrorKind::Parse => "fetch.parse",
            FetchErrorKind::Internal => "fetch.internal",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Terminal result of one lookup attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The service knows the key and the fragment parsed.
    Success { record: BookRecord },
    /// The service answered, and has no record for the key. Terminal:
    /// retrying a confirmed absence cannot change it.
    NotFound { key: BibKey },
    /// The attempt failed; the caller's retry policy decides what happens.
    Failure { key: BibKey, error: FetchError },
}

impl FetchOutcome {
    pub fn success(record: BookRecord) -> Self {
        Self::Success { record }
    }

    pub fn not_found(key: BibKey) -> Self {
        Self::NotFound { key }
    }

    pub fn failure(key: BibKey, error: FetchError) -> Self {
        Self::Failure { key, error }
    }

    /// The key this outcome answers, whichever variant it is.
    pub fn key(&self) -> &BibKey {
        match self {
            Self::Success { record } => &record.key,
            Self::NotFound { key } | Self::Failure { key, .. } => key,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    pub fn record(&self) -> Option<&BookRecord> {
        match self {
            Self::Success { record } => Some(record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<BookRecord> {
        match self {
            Self::Success { record } => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Order-preserving outcomes for one batch: slot `i` answers `keys[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub outcomes: Vec<FetchOutcome>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Records from the successful slots, in batch order.
    pub fn records(&self) -> impl Iterator<Item = &BookRecord> {
        self.outcomes.iter().filter_map(FetchOutcome::record)
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn not_found_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_not_found()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

impl IntoIterator for BatchResult {
    type Item = FetchOutcome;
    type IntoIter = std::vec::IntoIter<FetchOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a FetchOutcome;
    type IntoIter = std::slice::Iter<'a, FetchOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
