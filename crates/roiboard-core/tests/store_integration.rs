//! Integration tests for DataStore import semantics
//!
//! An import replaces the working dataset only when it succeeds.

use roiboard_core::error::ImportError;
use roiboard_core::event::DataEvent;
use roiboard_core::export::template;
use roiboard_core::DataStore;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_failed_import_keeps_previous_dataset() {
    let store = DataStore::new();
    let (original, _) = store.import_text(&template(), "template").unwrap();

    let broken = template().replace("# Campaigns", "# Archived");
    let err = store.import_text(&broken, "paste").unwrap_err();
    assert!(err.is_structural());

    let current = store.current().unwrap();
    assert!(Arc::ptr_eq(&original, &current));
    assert_eq!(store.last_import().unwrap().source, "template");
}

#[test]
fn test_failed_first_import_leaves_store_empty() {
    let store = DataStore::new();
    assert!(store.import_text("# Channels\nEmail,1,2,3,4,5\n", "paste").is_err());
    assert!(!store.is_loaded());
}

#[test]
fn test_dropped_rows_recorded() {
    let store = DataStore::new();
    let text = template().replace("Google Ads,15.8,4500,35,6,-1.4", "Google Ads,15.8");
    let (data, report) = store.import_text(&text, "paste").unwrap();

    assert_eq!(data.channels.len(), 3);
    assert_eq!(report.dropped_rows(), 1);
    assert_eq!(store.last_import().unwrap().dropped_rows, 1);
}

#[tokio::test]
async fn test_events_published() {
    let store = DataStore::new();
    let mut rx = store.event_bus().subscribe();

    store.import_text(&template(), "template").unwrap();
    let _ = store.import_text("", "empty");

    assert_eq!(
        rx.recv().await.unwrap(),
        DataEvent::DatasetReplaced {
            source: "template".to_string(),
            channels: 4,
            campaigns: 3,
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        DataEvent::ImportRejected {
            source: "empty".to_string(),
            code: "missing-required-section",
        }
    );
}

#[tokio::test]
async fn test_import_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roi.csv");
    std::fs::write(&path, template()).unwrap();

    let store = DataStore::new();
    let (data, _) = store.import_file(&path).await.unwrap();

    assert_eq!(data.summary.ad_spend.value, 25000.0);
    assert_eq!(
        store.last_import().unwrap().source,
        path.display().to_string()
    );
}

#[tokio::test]
async fn test_import_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let store = DataStore::new();
    store.import_text(&template(), "template").unwrap();

    let err = store
        .import_file(&dir.path().join("nope.csv"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::FileNotFound { .. }));
    assert!(!err.is_structural());
    assert!(store.is_loaded());
}
