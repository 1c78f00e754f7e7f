//! Normalization of raw lookup-service record fragments.
//!
//! The service's schema is untrusted input: fields may be missing, empty,
//! reordered, or accompanied by fields this crate has never heard of. Every
//! optional field degrades to its documented default; only a fragment whose
//! shape is structurally unusable is an error.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{BibKey, BookRecord, UNKNOWN_AUTHOR, UNKNOWN_TITLE};
use crate::outcome::FetchError;

/// Typed view of the fields this crate reads from a record fragment.
#[derive(Debug, Default, Deserialize)]
struct RecordFragment {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<NamedEntry>,
    #[serde(default)]
    publishers: Vec<NamedEntry>,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    number_of_pages: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct NamedEntry {
    #[serde(default)]
    name: Option<String>,
}

/// Build a [`BookRecord`] from one service fragment.
///
/// Never returns a partially built record: either every field is populated
/// (sentinels included) or the fragment is rejected whole.
pub fn parse_record(key: &BibKey, fragment: &Value) -> Result<BookRecord, FetchError> {
    if !fragment.is_object() {
        return Err(FetchError::parse(format!(
            "record fragment for {key} is {}, expected a JSON object",
            json_type_name(fragment)
        )));
    }

    let typed: RecordFragment = serde_json::from_value(fragment.clone())
        .map_err(|error| FetchError::parse(format!("record fragment for {key}: {error}")))?;

    let title = typed
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let author = typed
        .authors
        .into_iter()
        .next()
        .and_then(|entry| entry.name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    let publishers = typed
        .publishers
        .into_iter()
        .filter_map(|entry| entry.name)
        .collect();

    Ok(BookRecord {
        key: key.clone(),
        title,
        author,
        publishers,
        publish_date: typed.publish_date,
        page_count: typed.number_of_pages,
        raw: fragment.clone(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
