//! News digest types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cleaned, citation-resolved news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Synthetic id, `news-<position>`
    pub id: String,
    pub headline: String,
    pub summary: String,
    /// Publication name
    pub source: String,
    /// Resolved citation URL, empty when none resolved
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// Deduplicated top-N news items sharing one fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDigest {
    pub fetched_at: DateTime<Utc>,
    pub items: Vec<NewsItem>,
}
