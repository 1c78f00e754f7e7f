use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::Value;

use super::BibKey;

/// Sentinel title for records the service returned without a usable title.
pub const UNKNOWN_TITLE: &str = "unknown title";

/// Sentinel author for records with no usable author entry.
pub const UNKNOWN_AUTHOR: &str = "unknown author";

/// Normalized bibliographic record built from one successful lookup.
///
/// Constructed only by the parser, and never partially: `title` and `author`
/// always hold either service data or their documented sentinel. `raw` keeps
/// the fragment exactly as the service returned it so hosts can reach fields
/// this crate does not model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub key: BibKey,
    pub title: String,
    pub author: String,
    pub publishers: Vec<String>,
    pub publish_date: Option<String>,
    pub page_count: Option<u32>,
    pub raw: Value,
}

impl Display for BookRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.key)
    }
}
