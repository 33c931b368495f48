//! Recovering a JSON array of news items from free text.

use pulse_core::error::ParseError;
use serde::Deserialize;

/// One news object as emitted by the model, before cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawNewsItem {
    pub headline: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Outcome of scanning a reply for a news array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The first well-formed non-empty array of news objects, or an empty
    /// one when that is all the text holds.
    Parsed(Vec<RawNewsItem>),
    /// The text contains no `[` at all.
    NoMatch,
    /// Brackets were present but none opened a decodable array.
    Malformed(String),
}

impl Extraction {
    /// Collapse into the items, failing on no match, malformed or empty.
    pub fn into_items(self) -> Result<Vec<RawNewsItem>, ParseError> {
        match self {
            Extraction::Parsed(items) if items.is_empty() => Err(ParseError::Empty),
            Extraction::Parsed(items) => Ok(items),
            Extraction::NoMatch => Err(ParseError::NoArray),
            Extraction::Malformed(reason) => Err(ParseError::Malformed(reason)),
        }
    }
}

/// Locate the first bracketed JSON array of news objects in `text`.
///
/// Each `[` is tried as the start of an array in turn, so prose or inline
/// markers like `[1]` before the payload are skipped. An empty `[]` only
/// wins when no later array holds items. Trailing text after the array is
/// ignored.
pub fn extract_items(text: &str) -> Extraction {
    let mut first_error: Option<String> = None;
    let mut saw_empty = false;

    for (start, _) in text.match_indices('[') {
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<Vec<RawNewsItem>>();
        match stream.next() {
            Some(Ok(items)) if items.is_empty() => saw_empty = true,
            Some(Ok(items)) => return Extraction::Parsed(items),
            Some(Err(e)) => {
                first_error.get_or_insert_with(|| e.to_string());
            }
            None => {}
        }
    }

    if saw_empty {
        return Extraction::Parsed(Vec::new());
    }
    match first_error {
        Some(reason) => Extraction::Malformed(reason),
        None => Extraction::NoMatch,
    }
}
