//! `/user` routes: upload a workbook, list stored users

use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::{Multipart, State};

use super::AppState;
use super::error::ApiError;
use crate::ingest::UploadSummary;
use crate::records::Record;

/// Multipart field carrying the workbook
pub const FILE_FIELD: &str = "file";

/// `POST /user/upload`
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadSummary>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.xlsx").to_string();
        let bytes = field.bytes().await?;
        let summary = accept_upload(&state, &file_name, &bytes).await?;
        return Ok(Json(summary));
    }

    Err(ApiError::MissingFile)
}

/// `GET /user/all`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let users = state.ingestor.list_all().await?;
    Ok(Json(users))
}

/// Store the upload under the upload dir, then ingest it
pub async fn accept_upload(
    state: &AppState,
    file_name: &str,
    bytes: &[u8],
) -> Result<UploadSummary, ApiError> {
    let path = store_upload(&state.upload_dir, file_name, bytes).await?;
    Ok(state.ingestor.ingest(&path).await?)
}

async fn store_upload(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    tokio::fs::create_dir_all(dir).await.map_err(ApiError::Save)?;

    let millis = chrono::Utc::now().timestamp_millis();
    let path = dir.join(stored_file_name(file_name, millis));
    tokio::fs::write(&path, bytes).await.map_err(ApiError::Save)?;

    log::debug!("Stored {} bytes at {}", bytes.len(), path.display());
    Ok(path)
}

/// `report.xlsx` uploaded at `millis` is stored as `report-<millis>.xlsx`
///
/// Only the final path component of the client's name is used.
pub fn stored_file_name(original: &str, millis: i64) -> String {
    let name = Path::new(original)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = Path::new(&name);

    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "upload".to_string());

    match name.extension() {
        Some(ext) => format!("{}-{}.{}", stem, millis, ext.to_string_lossy()),
        None => format!("{}-{}", stem, millis),
    }
}
