//! Subcommand arguments and handlers

pub mod ingest;
pub mod list;
pub mod serve;
pub mod template;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Workbook (.xlsx) to ingest
    pub path: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on, overriding the config
    #[arg(long)]
    pub addr: Option<String>,
}

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Where to write the template workbook
    #[arg(default_value = "users-template.xlsx")]
    pub path: PathBuf,
}
