//! `roster ingest`

use anyhow::{Context, Result};
use colored::*;

use super::IngestArgs;
use crate::config::Config;

pub async fn handle_ingest_command(args: IngestArgs, config: &Config) -> Result<()> {
    if !args.path.exists() {
        anyhow::bail!("Workbook does not exist: {}", args.path.display());
    }

    let ingestor = crate::cli::build_ingestor(config).await?;

    // Ingestion errors already carry the user-facing message
    let summary = ingestor
        .ingest(&args.path)
        .await
        .map_err(|e| anyhow::anyhow!(e.messages().join("\n")))?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to format JSON output")?;
        println!("{}", json);
    } else {
        println!(
            "{} {} users from {}",
            summary.message.bright_green(),
            summary.count.to_string().bold(),
            args.path.display().to_string().cyan()
        );
    }

    Ok(())
}
