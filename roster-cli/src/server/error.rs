//! HTTP error responses
//!
//! Bodies use the shape `{"statusCode": 400, "message": "...", "error": "Bad Request"}`;
//! `message` becomes an array when there is more than one problem to report.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::IngestError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file was uploaded.")]
    MissingFile,

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to store upload: {0}")]
    Save(#[source] std::io::Error),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Save(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ingest(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Ingest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Ingest(err) => err.messages(),
            other => vec![other.to_string()],
        }
    }
}

/// One message or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl From<Vec<String>> for ErrorMessage {
    fn from(mut messages: Vec<String>) -> Self {
        if messages.len() == 1 {
            ErrorMessage::One(messages.remove(0))
        } else {
            ErrorMessage::Many(messages)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: ErrorMessage,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if code.is_server_error() {
            log::error!("Upload failed: {}", self);
        }

        let body = ErrorBody {
            status_code: code.as_u16(),
            message: self.messages().into(),
            error: code.canonical_reason().unwrap_or("Error").to_string(),
        };
        (code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ValidationError;
    use crate::store::StoreError;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let err = ApiError::from(IngestError::from(ValidationError::RowIncomplete { row: 2 }));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(
            body["message"],
            "Row 2: Empty value found in one or more required fields."
        );
    }

    #[tokio::test]
    async fn test_collected_rows_become_message_array() {
        let err = ApiError::from(IngestError::from(ValidationError::RowsIncomplete {
            rows: vec![2, 4],
        }));
        let (_, body) = body_of(err).await;

        assert_eq!(
            body["message"],
            serde_json::json!([
                "Row 2: Empty value found in one or more required fields.",
                "Row 4: Empty value found in one or more required fields."
            ])
        );
    }

    #[tokio::test]
    async fn test_storage_error_is_server_error() {
        let err = ApiError::from(IngestError::from(StoreError::Unavailable("down".into())));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Storage unavailable: down");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let (status, body) = body_of(ApiError::MissingFile).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No file was uploaded.");
    }

    #[test]
    fn test_error_message_shapes() {
        let one: ErrorMessage = vec!["a".to_string()].into();
        let many: ErrorMessage = vec!["a".to_string(), "b".to_string()].into();

        assert_eq!(serde_json::to_string(&one).unwrap(), r#""a""#);
        assert_eq!(serde_json::to_string(&many).unwrap(), r#"["a","b"]"#);
        assert_eq!(
            serde_json::from_str::<ErrorMessage>(r#"["x"]"#).unwrap(),
            ErrorMessage::Many(vec!["x".to_string()])
        );
    }
}
