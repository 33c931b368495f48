//! One-off news digest command.

use anyhow::{Context, Result};
use pulse_config::AppConfig;
use pulse_news::{ChatCompletionClient, NewsDigestBuilder};
use std::sync::Arc;

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = ChatCompletionClient::new(config.news.client_config())
        .context("Failed to create news client")?;
    if !client.has_api_key() {
        anyhow::bail!("Set {} to build a news digest", config.news.api_key_env);
    }

    let builder = NewsDigestBuilder::new(Arc::new(client), config.news.prompt_config());
    let digest = builder.build().await?;

    println!("{}", serde_json::to_string_pretty(&digest)?);
    Ok(())
}
