//! Dedup, truncation and citation mapping.

use chrono::{DateTime, Utc};
use pulse_core::types::{NewsDigest, NewsItem};
use std::collections::HashSet;

use crate::citation::{resolve_url, strip_markers};
use crate::extract::RawNewsItem;

/// Number of stories kept after dedup.
pub const DIGEST_SIZE: usize = 8;

/// Normalized headline used for duplicate detection.
fn dedup_key(headline: &str) -> String {
    strip_markers(headline).to_lowercase()
}

/// Turn raw model output into a digest stamped with `now`.
///
/// The first occurrence of a headline wins and order is preserved. Only the
/// first `limit` unique stories are kept.
pub fn build_digest(
    raw: Vec<RawNewsItem>,
    citations: &[String],
    limit: usize,
    now: DateTime<Utc>,
) -> NewsDigest {
    let mut seen = HashSet::new();

    let items = raw
        .into_iter()
        .filter(|item| seen.insert(dedup_key(&item.headline)))
        .take(limit)
        .enumerate()
        .map(|(i, item)| NewsItem {
            id: format!("news-{}", i),
            url: resolve_url(&item.headline, citations),
            headline: strip_markers(&item.headline),
            summary: strip_markers(item.summary.as_deref().unwrap_or_default()),
            source: item.source.unwrap_or_default(),
            timestamp: now,
        })
        .collect();

    NewsDigest {
        fetched_at: now,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headline: &str, summary: &str, source: &str) -> RawNewsItem {
        RawNewsItem {
            headline: headline.to_string(),
            summary: Some(summary.to_string()),
            source: Some(source.to_string()),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn citations() -> Vec<String> {
        vec![
            "https://one.example".to_string(),
            "https://two.example".to_string(),
            "https://three.example".to_string(),
        ]
    }

    #[test]
    fn test_duplicate_headlines_collapse() {
        let digest = build_digest(
            vec![
                raw("Fed cuts rates [1]", "First summary.", "Reuters"),
                raw("fed cuts rates", "Second summary.", "Bloomberg"),
            ],
            &citations(),
            DIGEST_SIZE,
            now(),
        );

        assert_eq!(digest.items.len(), 1);
        let item = &digest.items[0];
        assert_eq!(item.headline, "Fed cuts rates");
        assert_eq!(item.summary, "First summary.");
        assert_eq!(item.source, "Reuters");
        assert_eq!(item.url, "https://one.example");
    }

    #[test]
    fn test_citation_mapping() {
        let digest = build_digest(
            vec![
                raw("Oil rises [2]", "Brent up [2].", "FT"),
                raw("Yen slides [9]", "BoJ holds.", "Nikkei"),
            ],
            &citations(),
            DIGEST_SIZE,
            now(),
        );

        assert_eq!(digest.items[0].url, "https://two.example");
        assert_eq!(digest.items[0].summary, "Brent up.");
        assert_eq!(digest.items[1].url, "");
        assert_eq!(digest.items[1].headline, "Yen slides");
    }

    #[test]
    fn test_truncates_after_dedup() {
        let mut items: Vec<RawNewsItem> = (0..12)
            .map(|i| raw(&format!("Story {} [1]", i), "s", "src"))
            .collect();
        items.insert(1, raw("STORY 0", "dup", "src"));

        let digest = build_digest(items, &[], DIGEST_SIZE, now());

        assert_eq!(digest.items.len(), 8);
        let ids: Vec<&str> = digest.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids[0], "news-0");
        assert_eq!(ids[7], "news-7");
        assert_eq!(digest.items[1].headline, "Story 1");
        assert_eq!(digest.items[7].headline, "Story 7");
    }

    #[test]
    fn test_shared_timestamp_and_missing_fields() {
        let digest = build_digest(
            vec![RawNewsItem {
                headline: "Gold steady".to_string(),
                summary: None,
                source: None,
            }],
            &[],
            DIGEST_SIZE,
            now(),
        );

        assert_eq!(digest.fetched_at, now());
        assert_eq!(digest.items[0].timestamp, now());
        assert_eq!(digest.items[0].summary, "");
        assert_eq!(digest.items[0].source, "");
    }
}
