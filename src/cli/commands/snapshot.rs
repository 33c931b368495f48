//! One-off snapshot command.

use anyhow::{Context, Result};
use pulse_config::AppConfig;
use pulse_data::{BatchAggregator, YahooChartSource};
use std::sync::Arc;
use tracing::info;

use crate::cli::SnapshotArgs;

pub async fn run(args: SnapshotArgs, config: &AppConfig) -> Result<()> {
    let source = YahooChartSource::new(config.source.yahoo_config())
        .context("Failed to create price source")?;
    let mut aggregator = BatchAggregator::new(
        Arc::new(source),
        config.symbols.clone(),
        config.source.fetch_timeout(),
    );

    if !args.symbols.is_empty() {
        aggregator = aggregator.only(&args.symbols);
        if aggregator.symbols().is_empty() {
            anyhow::bail!(
                "None of {} are configured symbols",
                args.symbols.join(", ")
            );
        }
    }

    info!(symbols = aggregator.symbols().len(), "Fetching snapshot");
    let snapshot = aggregator.snapshot().await?;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
