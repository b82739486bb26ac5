//! Runtime configuration
//!
//! Values are layered, later layers winning:
//! 1. built-in defaults
//! 2. a TOML file (`--config`, or `<config dir>/roster/config.toml` when present)
//! 3. `ROSTER_*` environment variables, including those from a `.env` file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ingest::{IngestOptions, ValidationMode};

const ENV_PREFIX: &str = "ROSTER_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// sqlx connection URL for the user table
    pub database_url: String,
    pub max_connections: u32,
    /// Where the HTTP layer stores uploaded files
    pub upload_dir: PathBuf,
    /// Delete each upload after it has been processed
    pub delete_uploads: bool,
    /// Report every incomplete row instead of stopping at the first one
    pub collect_all_errors: bool,
    pub listen_addr: String,
    pub max_upload_bytes: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: 5,
            upload_dir: PathBuf::from("./uploadedFiles"),
            delete_uploads: false,
            collect_all_errors: false,
            listen_addr: "127.0.0.1:3000".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

fn default_database_url() -> String {
    let path = dirs::data_dir()
        .map(|dir| dir.join("roster").join("roster.db"))
        .unwrap_or_else(|| PathBuf::from("roster.db"));
    format!("sqlite://{}", path.display())
}

/// Default config file location, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("roster").join("config.toml"))
}

impl Config {
    /// Load defaults, then `path` (or the default file), then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // A missing .env file is normal
        let _ = dotenvy::dotenv();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Override fields from `ROSTER_*` variables looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(url) = var("DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
            self.database_url = url.trim().to_string();
        }
        if let Some(value) = var("MAX_CONNECTIONS") {
            self.max_connections = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid ROSTER_MAX_CONNECTIONS: {}", value))?;
        }
        if let Some(dir) = var("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(dir.trim());
        }
        if let Some(value) = var("DELETE_UPLOADS") {
            self.delete_uploads = parse_bool(&value)
                .with_context(|| format!("Invalid ROSTER_DELETE_UPLOADS: {}", value))?;
        }
        if let Some(value) = var("COLLECT_ALL_ERRORS") {
            self.collect_all_errors = parse_bool(&value)
                .with_context(|| format!("Invalid ROSTER_COLLECT_ALL_ERRORS: {}", value))?;
        }
        if let Some(addr) = var("LISTEN_ADDR") {
            self.listen_addr = addr.trim().to_string();
        }
        if let Some(value) = var("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid ROSTER_MAX_UPLOAD_BYTES: {}", value))?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level.trim().to_string();
        }

        Ok(())
    }

    pub fn validation_mode(&self) -> ValidationMode {
        if self.collect_all_errors {
            ValidationMode::CollectAll
        } else {
            ValidationMode::FailFast
        }
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            delete_uploads: self.delete_uploads,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}
