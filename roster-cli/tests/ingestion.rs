//! End-to-end ingestion: stored upload → validation → batch write

mod common;

use std::sync::Arc;

use common::{upload, workbook};
use roster::ingest::{IngestOptions, ValidationMode, Validator};
use roster::{
    IngestError, Ingestor, MemoryUserStore, Record, RecordSchema, SqliteUserStore, UploadSummary,
    ValidationError,
};

fn scenario_c() -> Vec<u8> {
    workbook(&[
        &["id", "name", "email"],
        &["1", "Mukesh", "a@b.com"],
        &["2", "John", "john@x.com"],
    ])
}

#[tokio::test]
async fn valid_upload_is_saved_in_one_batch() {
    // Scenario D
    let (_dir, path) = upload(&scenario_c());
    let store = Arc::new(MemoryUserStore::new());
    let ingestor = Ingestor::with_store(store.clone());

    let summary = ingestor.ingest(&path).await.unwrap();

    assert_eq!(
        summary,
        UploadSummary {
            message: "File uploaded successfully.".to_string(),
            count: 2,
        }
    );
    assert_eq!(store.batch_count(), 1);
    assert_eq!(
        store.records(),
        vec![
            Record::new("1", "Mukesh", "a@b.com"),
            Record::new("2", "John", "john@x.com"),
        ]
    );
}

#[tokio::test]
async fn summary_serializes_for_clients() {
    let (_dir, path) = upload(&scenario_c());
    let ingestor = Ingestor::with_store(Arc::new(MemoryUserStore::new()));

    let summary = ingestor.ingest(&path).await.unwrap();
    assert_eq!(
        serde_json::to_value(&summary).unwrap(),
        serde_json::json!({ "message": "File uploaded successfully.", "count": 2 })
    );
}

#[tokio::test]
async fn invalid_uploads_never_reach_the_store() {
    let cases: Vec<Vec<u8>> = vec![
        Vec::new(),
        workbook(&[&["id", "name", "email"]]),
        workbook(&[&["wrong", "header", "names"], &["1", "John", "a@b.com"]]),
        workbook(&[&["id", "name", "email"], &["", "John", "a@b.com"]]),
    ];

    for bytes in cases {
        let (_dir, path) = upload(&bytes);
        let store = Arc::new(MemoryUserStore::new());
        let ingestor = Ingestor::with_store(store.clone());

        let err = ingestor.ingest(&path).await.unwrap_err();
        assert!(matches!(err, IngestError::Validation(_)), "{:?}", err);
        assert_eq!(store.batch_count(), 0);
        assert!(store.records().is_empty());
    }
}

#[tokio::test]
async fn validation_errors_pass_through_unchanged() {
    let (_dir, path) = upload(&workbook(&[
        &["id", "name", "email"],
        &["", "John", "a@b.com"],
    ]));
    let ingestor = Ingestor::with_store(Arc::new(MemoryUserStore::new()));

    match ingestor.ingest(&path).await {
        Err(IngestError::Validation(err)) => {
            assert_eq!(err, ValidationError::RowIncomplete { row: 2 });
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn storage_failures_propagate() {
    let (_dir, path) = upload(&scenario_c());
    let store = Arc::new(MemoryUserStore::failing("connection refused"));
    let ingestor = Ingestor::with_store(store.clone());

    let err = ingestor.ingest(&path).await.unwrap_err();

    assert!(matches!(err, IngestError::Storage(_)));
    assert_eq!(err.to_string(), "Storage unavailable: connection refused");
    assert_eq!(store.batch_count(), 1);
}

#[tokio::test]
async fn missing_upload_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryUserStore::new());
    let ingestor = Ingestor::with_store(store.clone());

    let err = ingestor
        .ingest(&dir.path().join("gone.xlsx"))
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Read { .. }));
    assert!(err.to_string().contains("gone.xlsx"));
    assert_eq!(store.batch_count(), 0);
}

#[tokio::test]
async fn sqlite_round_trip_lists_uploaded_users() {
    let store = Arc::new(SqliteUserStore::in_memory().await.unwrap());
    let ingestor = Ingestor::with_store(store);

    let (_dir, path) = upload(&scenario_c());
    ingestor.ingest(&path).await.unwrap();

    let (_dir2, path2) = upload(&workbook(&[
        &["id", "name", "email"],
        &["1", "Mukesh", "a@b.com"],
    ]));
    ingestor.ingest(&path2).await.unwrap();

    // Repeated ids are stored again; uniqueness is not enforced
    let users = ingestor.list_all().await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0], Record::new("1", "Mukesh", "a@b.com"));
    assert_eq!(users[2], Record::new("1", "Mukesh", "a@b.com"));
}

#[tokio::test]
async fn collect_all_mode_through_ingest() {
    let (_dir, path) = upload(&workbook(&[
        &["id", "name", "email"],
        &["", "Ann", "ann@x.com"],
        &["3", "", "cy@x.com"],
    ]));
    let store = Arc::new(MemoryUserStore::new());
    let ingestor = Ingestor::new(
        store.clone(),
        Validator::new(RecordSchema::users(), ValidationMode::CollectAll),
        IngestOptions::default(),
    );

    let err = ingestor.ingest(&path).await.unwrap_err();
    assert_eq!(err.messages().len(), 2);
    assert_eq!(store.batch_count(), 0);
}

#[tokio::test]
async fn delete_uploads_removes_processed_file() {
    let (_dir, path) = upload(&scenario_c());
    let ingestor = Ingestor::new(
        Arc::new(MemoryUserStore::new()),
        Validator::default(),
        IngestOptions {
            delete_uploads: true,
        },
    );

    ingestor.ingest(&path).await.unwrap();
    assert!(!path.exists());
}
