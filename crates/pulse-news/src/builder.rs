//! End-to-end digest production.

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::traits::{ChatMessage, CompletionRequest, CompletionSource};
use pulse_core::types::NewsDigest;
use std::sync::Arc;
use tracing::{info, warn};

use crate::digest::{build_digest, DIGEST_SIZE};
use crate::extract::extract_items;

/// Default system instruction for the news model.
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a financial news aggregator. Return ONLY a JSON array of the 12 most important financial and market news stories from today. Cover a mix of: macroeconomic data, Federal Reserve and interest rate developments, geopolitical events affecting markets, major equity moves, sector trends, commodities, bonds, and ETF flows. Each item must have: headline, summary (1-2 sentences), source (publication name). After each headline, include the citation number in square brackets like [1]. Do NOT include URLs. Format: [{"headline":"Headline text [1]","summary":"...","source":"..."}]"#;

/// Default user question for the news model.
pub const DEFAULT_USER_PROMPT: &str = "What are today's top financial and market news stories? Include macroeconomic indicators, Fed/central bank actions, geopolitical developments, major stock moves, sector rotation, commodities, bonds, and notable ETF flows.";

/// Longest slice of a bad reply that is logged.
const PREVIEW_CHARS: usize = 500;

/// Static prompt configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub search_recency_filter: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Stories kept after dedup
    pub digest_size: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            model: "sonar-pro".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt: DEFAULT_USER_PROMPT.to_string(),
            search_recency_filter: Some("day".to_string()),
            temperature: 0.1,
            max_tokens: 3000,
            digest_size: DIGEST_SIZE,
        }
    }
}

impl PromptConfig {
    fn request(&self) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(&self.system_prompt),
                ChatMessage::user(&self.user_prompt),
            ],
            search_recency_filter: self.search_recency_filter.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Asks the completion source for today's stories and cleans them up.
#[derive(Clone)]
pub struct NewsDigestBuilder {
    source: Arc<dyn CompletionSource>,
    prompt: PromptConfig,
}

impl NewsDigestBuilder {
    pub fn new(source: Arc<dyn CompletionSource>, prompt: PromptConfig) -> Self {
        Self { source, prompt }
    }

    pub fn prompt(&self) -> &PromptConfig {
        &self.prompt
    }

    /// Build a digest stamped with the current time.
    pub async fn build(&self) -> PulseResult<NewsDigest> {
        self.build_at(Utc::now()).await
    }

    /// Build a digest stamped with `now`.
    pub async fn build_at(&self, now: DateTime<Utc>) -> PulseResult<NewsDigest> {
        let completion = self.source.complete(&self.prompt.request()).await?;

        let raw = extract_items(&completion.content)
            .into_items()
            .inspect_err(|e| {
                let preview: String = completion.content.chars().take(PREVIEW_CHARS).collect();
                warn!(error = %e, %preview, "Could not recover news items");
            })?;

        let parsed = raw.len();
        let digest = build_digest(raw, &completion.citations, self.prompt.digest_size, now);

        info!(
            source = self.source.name(),
            parsed,
            kept = digest.items.len(),
            citations = completion.citations.len(),
            "News digest built"
        );

        Ok(digest)
    }
}
