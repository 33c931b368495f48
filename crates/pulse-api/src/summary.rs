//! Read-only site summary and its markdown rendering.

use chrono::{DateTime, SecondsFormat, Utc};
use pulse_config::SiteSettings;
use pulse_core::types::{CacheEntry, EtfQuote, FearGreedLabel, NewsItem};
use pulse_indicators::{daily_change_pct, round2, RsiZone, TrendPosition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;
use tracing::warn;

/// A snapshot row with the derived labels the summary views show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub price: f64,
    pub daily_change_pct: f64,
    pub ma9: f64,
    pub ma50: f64,
    pub ma200: f64,
    pub ma50_trend: TrendPosition,
    pub ma200_trend: TrendPosition,
    /// Rounded to two decimals
    pub rsi: f64,
    pub rsi_label: RsiZone,
    pub fear_greed_score: u8,
    pub fear_greed_label: FearGreedLabel,
    #[serde(skip)]
    raw_rsi: f64,
}

impl SummaryRow {
    pub fn from_quote(quote: &EtfQuote) -> Self {
        let ind = &quote.indicators;
        Self {
            ticker: quote.meta.ticker.clone(),
            name: quote.meta.name.clone(),
            sector: quote.meta.sector.clone(),
            price: ind.price,
            daily_change_pct: daily_change_pct(ind.price, ind.ma9),
            ma9: ind.ma9,
            ma50: ind.ma50,
            ma200: ind.ma200,
            ma50_trend: TrendPosition::of(ind.price, ind.ma50),
            ma200_trend: TrendPosition::of(ind.price, ind.ma200),
            rsi: round2(ind.rsi),
            rsi_label: RsiZone::from_rsi(ind.rsi),
            fear_greed_score: ind.fear_greed_score,
            fear_greed_label: ind.fear_greed_label,
            raw_rsi: ind.rsi,
        }
    }
}

/// One cached dataset as seen by the summary.
///
/// `fetched_at` is `None` when nothing usable is cached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section<T> {
    pub fetched_at: Option<DateTime<Utc>>,
    pub count: usize,
    pub items: Vec<T>,
}

impl<T> Section<T> {
    fn from_decoded(decoded: Option<(DateTime<Utc>, Vec<T>)>) -> Self {
        match decoded {
            Some((fetched_at, items)) => Self {
                fetched_at: Some(fetched_at),
                count: items.len(),
                items,
            },
            None => Self {
                fetched_at: None,
                count: 0,
                items: Vec::new(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        self.fetched_at.is_some()
    }
}

/// Public, unauthenticated view of both caches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub site: String,
    pub description: String,
    pub url: String,
    pub etf: Section<SummaryRow>,
    pub news: Section<NewsItem>,
    pub generated_at: DateTime<Utc>,
}

/// Pull items out of a cached payload.
///
/// Accepts a bare array or an object with an `items` array. The payload's
/// own `fetchedAt` wins over the row timestamp. Items that do not decode are
/// skipped.
fn decode_items<T: DeserializeOwned>(entry: Option<CacheEntry>) -> Option<(DateTime<Utc>, Vec<T>)> {
    let entry = entry?;
    let (fetched_at, raw) = match entry.payload {
        Value::Array(items) => (entry.fetched_at, items),
        Value::Object(mut map) => {
            let Some(Value::Array(items)) = map.remove("items") else {
                return None;
            };
            let fetched_at = map
                .remove("fetchedAt")
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or(entry.fetched_at);
            (fetched_at, items)
        }
        _ => return None,
    };

    let total = raw.len();
    let items: Vec<T> = raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    if items.len() < total {
        warn!(
            key = %entry.key,
            skipped = total - items.len(),
            "Skipped cached items that do not decode"
        );
    }

    Some((fetched_at, items))
}

/// Assemble the summary from whatever the cache holds.
pub fn build_summary(
    site: &SiteSettings,
    etf: Option<CacheEntry>,
    news: Option<CacheEntry>,
    now: DateTime<Utc>,
) -> SiteSummary {
    let etf = decode_items::<EtfQuote>(etf)
        .map(|(at, quotes)| (at, quotes.iter().map(SummaryRow::from_quote).collect()));

    SiteSummary {
        site: site.name.clone(),
        description: site.description.clone(),
        url: site.url.clone(),
        etf: Section::from_decoded(etf),
        news: Section::from_decoded(decode_items::<NewsItem>(news)),
        generated_at: now,
    }
}

fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render the summary as an llms.txt markdown document.
pub fn render_llms_txt(summary: &SiteSummary, api_base_url: &str) -> String {
    let mut md = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(md, "# {}\n", summary.site);
    let _ = writeln!(md, "> {}", summary.description);
    let _ = writeln!(md, "> Website: {}\n", summary.url);

    match summary.etf.fetched_at {
        Some(at) => {
            let _ = writeln!(md, "## Current ETF Data (as of {})\n", iso(at));
            for row in &summary.etf.items {
                // adding 0.0 turns -0.0 into 0.0 so it prints as +0.00
                let change = row.daily_change_pct + 0.0;
                let _ = writeln!(
                    md,
                    "- [{}] {}: ${:.2} ({:+.2}%) | RSI {:.1} ({}) | 50d MA ${:.2} ({}) | F/G {} {}",
                    row.ticker,
                    row.name,
                    row.price,
                    change,
                    row.raw_rsi,
                    row.rsi_label.as_str(),
                    row.ma50,
                    row.ma50_trend.as_str(),
                    row.fear_greed_score,
                    row.fear_greed_label,
                );
            }
        }
        None => md.push_str("## Current ETF Data\n\nNo data currently available.\n"),
    }

    md.push('\n');

    match summary.news.fetched_at {
        Some(at) => {
            let _ = writeln!(md, "## Market News (as of {})\n", iso(at));
            for item in &summary.news.items {
                let url_part = if item.url.is_empty() {
                    String::new()
                } else {
                    format!(" — {}", item.url)
                };
                let _ = writeln!(md, "- {} ({}){}", item.headline, item.source, url_part);
                let _ = writeln!(md, "  {}", item.summary);
            }
        }
        None => md.push_str("## Market News\n\nNo news currently available.\n"),
    }

    md.push_str("\n## API\n\n");
    let _ = writeln!(
        md,
        "- [JSON API]({}/site-summary): Full structured data in JSON format",
        api_base_url.trim_end_matches('/')
    );

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pulse_core::types::{IndicatorSet, SymbolMeta};
    use serde_json::json;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn quote() -> EtfQuote {
        EtfQuote {
            meta: SymbolMeta::new("XLK", "Technology Select Sector", "Technology"),
            indicators: IndicatorSet {
                price: 202.0,
                ma9: 200.0,
                ma50: 190.0,
                ma200: 202.5,
                rsi: 71.234,
                volume: 1_000,
                avg_volume: 900,
                fear_greed_score: 66,
                fear_greed_label: FearGreedLabel::Greed,
            },
        }
    }

    fn entry(key: &str, payload: Value) -> CacheEntry {
        CacheEntry::new(key, payload, t0(), Duration::minutes(30))
    }

    #[test]
    fn test_row_enrichment() {
        let row = SummaryRow::from_quote(&quote());
        assert_eq!(row.daily_change_pct, 1.0);
        assert_eq!(row.ma50_trend, TrendPosition::Above);
        assert_eq!(row.ma200_trend, TrendPosition::At);
        assert_eq!(row.rsi, 71.23);
        assert_eq!(row.rsi_label, RsiZone::Overbought);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["ma50Trend"], "Above");
        assert_eq!(json["rsiLabel"], "Overbought");
        assert_eq!(json["fearGreedLabel"], "Greed");
        assert!(json.get("rawRsi").is_none());
    }

    #[test]
    fn test_both_payload_shapes() {
        let items = json!([serde_json::to_value(quote()).unwrap()]);
        let later = t0() + Duration::minutes(5);

        let bare = build_summary(
            &SiteSettings::default(),
            Some(entry("etf-data", items.clone())),
            None,
            later,
        );
        assert_eq!(bare.etf.count, 1);
        assert_eq!(bare.etf.fetched_at, Some(t0()));

        let wrapped = build_summary(
            &SiteSettings::default(),
            Some(entry(
                "etf-data",
                json!({"fetchedAt": "2023-11-14T22:00:00Z", "items": items}),
            )),
            None,
            later,
        );
        assert_eq!(wrapped.etf.count, 1);
        assert_eq!(
            wrapped.etf.fetched_at.map(|t| t.timestamp()),
            Some(1_699_999_200)
        );
        assert!(!wrapped.news.is_available());
        assert_eq!(wrapped.news.count, 0);
    }

    #[test]
    fn test_unusable_payload_is_unavailable() {
        let summary = build_summary(
            &SiteSettings::default(),
            Some(entry("etf-data", json!("oops"))),
            Some(entry("etf-news", json!({"nothing": true}))),
            t0(),
        );
        assert!(!summary.etf.is_available());
        assert!(!summary.news.is_available());
    }

    #[test]
    fn test_render_with_data() {
        let news = json!({
            "fetchedAt": "2023-11-14T22:13:20Z",
            "items": [{
                "id": "news-0",
                "headline": "Fed holds",
                "summary": "Rates unchanged.",
                "source": "Reuters",
                "url": "https://r.example",
                "timestamp": "2023-11-14T22:13:20Z"
            }]
        });
        let summary = build_summary(
            &SiteSettings::default(),
            Some(entry("etf-data", json!([serde_json::to_value(quote()).unwrap()]))),
            Some(entry("etf-news", news)),
            t0(),
        );

        let md = render_llms_txt(&summary, "https://pulse.example/");
        assert!(md.starts_with("# ClarionGTM Sector ETF Dashboard\n\n> Real-time"));
        assert!(md.contains("## Current ETF Data (as of 2023-11-14T22:13:20.000Z)"));
        assert!(md.contains(
            "- [XLK] Technology Select Sector: $202.00 (+1.00%) | RSI 71.2 (Overbought) | 50d MA $190.00 (Above) | F/G 66 Greed"
        ));
        assert!(md.contains("- Fed holds (Reuters) — https://r.example\n  Rates unchanged.\n"));
        assert!(md.contains("- [JSON API](https://pulse.example/site-summary)"));
    }

    #[test]
    fn test_render_without_data() {
        let summary = build_summary(&SiteSettings::default(), None, None, t0());
        let md = render_llms_txt(&summary, "");

        assert!(md.contains("## Current ETF Data\n\nNo data currently available.\n"));
        assert!(md.contains("## Market News\n\nNo news currently available.\n"));
        assert!(md.contains("- [JSON API](/site-summary)"));
    }
}
