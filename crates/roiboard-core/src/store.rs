//! Working dataset store with parking_lot::RwLock
//!
//! Holds the dashboard's current [`RoiData`]. An import either replaces it
//! wholesale or leaves it untouched; there is no partial merge.

use crate::error::{ImportError, ImportReport};
use crate::event::{DataEvent, EventBus};
use crate::models::RoiData;
use crate::parsers::roi_csv::read_document;
use crate::parsers::RoiCsvParser;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where and when the current dataset came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    /// Source label (file path, or "paste" for text input)
    pub source: String,
    pub imported_at: DateTime<Utc>,
    /// Rows dropped under row-level tolerance
    pub dropped_rows: usize,
}

/// Central data store for roiboard
///
/// Readers get a cheap `Arc` snapshot; an import swaps the `Arc` so readers
/// holding the previous snapshot are unaffected.
pub struct DataStore {
    current: RwLock<Option<Arc<RoiData>>>,
    last_import: RwLock<Option<ImportRecord>>,
    event_bus: EventBus,
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            last_import: RwLock::new(None),
            event_bus: EventBus::default(),
        }
    }

    /// Get the event bus
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Snapshot of the working dataset
    pub fn current(&self) -> Option<Arc<RoiData>> {
        self.current.read().clone()
    }

    pub fn last_import(&self) -> Option<ImportRecord> {
        self.last_import.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Import raw text, replacing the working dataset on success
    ///
    /// On error the previous dataset (if any) is kept as is.
    pub fn import_text(
        &self,
        text: &str,
        source: impl Into<String>,
    ) -> Result<(Arc<RoiData>, ImportReport), ImportError> {
        let source = source.into();
        let (result, report) = RoiCsvParser::parse_with_report(text);

        match result {
            Ok(data) => {
                let data = Arc::new(data);
                let event = DataEvent::DatasetReplaced {
                    source: source.clone(),
                    channels: data.channels.len(),
                    campaigns: data.campaigns.len(),
                };

                *self.current.write() = Some(Arc::clone(&data));
                *self.last_import.write() = Some(ImportRecord {
                    source: source.clone(),
                    imported_at: Utc::now(),
                    dropped_rows: report.dropped_rows(),
                });

                info!(%source, "Working dataset replaced");
                let receivers = self.event_bus.publish(event);
                debug!(receivers, "Dataset change published");
                Ok((data, report))
            }
            Err(err) => {
                self.reject(source, &err);
                Err(err)
            }
        }
    }

    /// Read a file and import it
    ///
    /// I/O failures are reported without touching the parser or the dataset.
    pub async fn import_file(
        &self,
        path: &Path,
    ) -> Result<(Arc<RoiData>, ImportReport), ImportError> {
        let source = path.display().to_string();
        let text = match read_document(path).await {
            Ok(text) => text,
            Err(err) => {
                self.reject(source, &err);
                return Err(err);
            }
        };
        self.import_text(&text, source)
    }

    /// Drop the working dataset
    pub fn clear(&self) {
        *self.current.write() = None;
        *self.last_import.write() = None;
        self.event_bus.publish(DataEvent::DatasetCleared);
    }

    fn reject(&self, source: String, err: &ImportError) {
        warn!(%source, error = %err, "Import rejected, keeping previous dataset");
        self.event_bus.publish(DataEvent::ImportRejected {
            source,
            code: err.code(),
        });
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
