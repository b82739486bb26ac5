//! HTTP surface for browser uploads

mod error;
mod routes;

use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::ingest::Ingestor;

pub use error::{ApiError, ErrorBody, ErrorMessage};
pub use routes::{FILE_FIELD, accept_upload, list_users, stored_file_name, upload_file};

#[derive(Clone)]
pub struct AppState {
    pub ingestor: Ingestor,
    /// Directory uploads are written to before ingestion
    pub upload_dir: PathBuf,
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/user/upload", post(upload_file))
        .route("/user/all", get(list_users))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(state: AppState, addr: &str, max_upload_bytes: usize) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!("Listening on http://{}", addr);

    axum::serve(listener, router(state, max_upload_bytes))
        .await
        .context("HTTP server failed")
}
