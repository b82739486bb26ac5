//! Command-line interface

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::ingest::{Ingestor, Validator};
use crate::records::RecordSchema;
use crate::store::SqliteUserStore;

use commands::{IngestArgs, ListArgs, ServeArgs, TemplateArgs};

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Validate and ingest spreadsheets of user records")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a workbook and store its users
    Ingest(IngestArgs),
    /// Show stored users
    List(ListArgs),
    /// Run the HTTP upload server
    Serve(ServeArgs),
    /// Write an empty workbook with the expected header row
    Template(TemplateArgs),
}

/// Open the configured database and wire up the ingestion pipeline
pub async fn build_ingestor(config: &Config) -> Result<Ingestor> {
    if let Some(path) = config.database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
    }

    let store = SqliteUserStore::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database: {}", config.database_url))?;

    let validator = Validator::new(RecordSchema::users(), config.validation_mode());
    Ok(Ingestor::new(
        Arc::new(store),
        validator,
        config.ingest_options(),
    ))
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Ingest(args) => commands::ingest::handle_ingest_command(args, &config).await,
        Commands::List(args) => commands::list::handle_list_command(args, &config).await,
        Commands::Serve(args) => commands::serve::handle_serve_command(args, &config).await,
        Commands::Template(args) => commands::template::handle_template_command(args),
    }
}
