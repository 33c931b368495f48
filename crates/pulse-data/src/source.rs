//! Yahoo chart price source.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::error::{PulseError, SourceError};
use pulse_core::traits::PriceSource;
use pulse_core::types::PriceSeries;
use reqwest::{header, Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Yahoo chart endpoint configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Scheme and host, e.g. `https://query1.finance.yahoo.com`
    pub base_url: String,
    /// Lookback window, e.g. `1y`
    pub range: String,
    /// Sample interval, e.g. `1d`
    pub interval: String,
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            range: "1y".to_string(),
            interval: "1d".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Option<ChartNode>,
}

#[derive(Debug, Deserialize)]
struct ChartNode {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<Option<i64>>>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Daily series from the Yahoo v8 chart API.
pub struct YahooChartSource {
    config: YahooConfig,
    client: Client,
}

impl YahooChartSource {
    /// Create a new chart source.
    pub fn new(config: YahooConfig) -> Result<Self, PulseError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| PulseError::Config(format!("invalid user agent: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PulseError::Config(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, SourceError> {
        let decode_err = |message: String| SourceError::Decode {
            symbol: symbol.to_string(),
            message,
        };

        let mut url = Url::parse(&self.config.base_url).map_err(|e| decode_err(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| decode_err(format!("base URL cannot hold a path: {}", self.config.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        url.query_pairs_mut()
            .append_pair("range", &self.config.range)
            .append_pair("interval", &self.config.interval);
        Ok(url)
    }

    fn into_series(symbol: &str, envelope: ChartEnvelope) -> Result<PriceSeries, SourceError> {
        let no_data = || SourceError::NoData {
            symbol: symbol.to_string(),
        };

        let result = envelope
            .chart
            .and_then(|c| c.result)
            .and_then(|r| r.into_iter().next())
            .ok_or_else(no_data)?;

        let quote = result
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .unwrap_or_default();

        let volumes: Vec<Option<u64>> = quote
            .volume
            .iter()
            .map(|v| v.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
            .collect();

        let mut series = PriceSeries::from_optional(symbol, &quote.close, &volumes);
        if series.is_empty() {
            return Err(no_data());
        }

        let as_of = result
            .timestamp
            .and_then(|ts| ts.into_iter().flatten().next_back())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        if let Some(as_of) = as_of {
            series = series.with_as_of(as_of);
        }

        Ok(series)
    }
}

#[async_trait]
impl PriceSource for YahooChartSource {
    async fn fetch_series(&self, symbol: &str) -> Result<PriceSeries, SourceError> {
        let url = self.chart_url(symbol)?;

        let resp = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout {
                    symbol: symbol.to_string(),
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                SourceError::Network {
                    symbol: symbol.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        if !resp.status().is_success() {
            return Err(SourceError::Status {
                symbol: symbol.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let envelope: ChartEnvelope = resp.json().await.map_err(|e| SourceError::Decode {
            symbol: symbol.to_string(),
            message: e.to_string(),
        })?;

        let series = Self::into_series(symbol, envelope)?;
        debug!(
            symbol,
            closes = series.closes().len(),
            volumes = series.volumes().len(),
            "Fetched chart series"
        );
        Ok(series)
    }

    fn name(&self) -> &str {
        "Yahoo Chart"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    fn source_for(server: &MockServer) -> YahooChartSource {
        YahooChartSource::new(YahooConfig {
            base_url: server.base_url(),
            ..YahooConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_filters_nulls() {
        let server = MockServer::start();
        let body = r#"{
          "chart": {
            "result": [{
              "timestamp": [1704153600, 1704240000, 1704326400, 1704412800],
              "indicators": {
                "quote": [{
                  "close": [470.5, null, 472.25, 471.0],
                  "volume": [1000, 2000, null, null]
                }]
              }
            }],
            "error": null
          }
        }"#;

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v8/finance/chart/SPY")
                .query_param("range", "1y")
                .query_param("interval", "1d");
            then.status(200)
                .header("content-type", "application/json")
                .body(body);
        });

        let series = source_for(&server).fetch_series("SPY").await.unwrap();
        mock.assert();

        assert_eq!(series.symbol(), "SPY");
        assert_eq!(series.closes(), &[470.5, 472.25, 471.0]);
        assert_eq!(series.volumes(), &[1000, 2000]);
        assert_eq!(series.latest_close(), Some(471.0));
        assert_eq!(series.latest_volume(), 2000);
        assert_eq!(series.as_of().map(|t| t.timestamp()), Some(1704412800));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v8/finance/chart/XLC");
            then.status(429).body("Too Many Requests");
        });

        let err = source_for(&server).fetch_series("XLC").await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_missing_result_is_no_data() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v8/finance/chart/NOPE");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#);
        });

        let err = source_for(&server).fetch_series("NOPE").await.unwrap_err();
        assert!(matches!(err, SourceError::NoData { .. }));
    }

    #[tokio::test]
    async fn test_all_null_closes_is_no_data() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v8/finance/chart/XLRE");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"chart":{"result":[{"indicators":{"quote":[{"close":[null,null],"volume":[5,6]}]}}]}}"#);
        });

        let err = source_for(&server).fetch_series("XLRE").await.unwrap_err();
        assert!(matches!(err, SourceError::NoData { .. }));
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v8/finance/chart/XLV");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = source_for(&server).fetch_series("XLV").await.unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
    }

    #[test]
    fn test_chart_url_keeps_symbol_in_one_segment() {
        let source = YahooChartSource::new(YahooConfig::default()).unwrap();

        let url = source.chart_url("^GSPC").unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/^GSPC?range=1y&interval=1d"
        );

        let url = source.chart_url("BRK/B").unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/BRK%2FB?range=1y&interval=1d"
        );
    }
}
