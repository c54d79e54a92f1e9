//! roiboard-core - Core library for roiboard
//!
//! Parses sectioned ROI CSV documents into [`RoiData`](models::RoiData),
//! derives the prospect journey and budget recommendations, and writes the
//! same format back out.

pub mod analytics;
pub mod error;
pub mod event;
pub mod export;
pub mod format;
pub mod models;
pub mod parsers;
pub mod preferences;
pub mod store;

pub use error::{ImportError, ImportReport, RequiredSection};
pub use event::{DataEvent, EventBus};
pub use export::{export_roi_to_csv, export_roi_to_json, template, to_csv_string};
pub use parsers::RoiCsvParser;
pub use store::DataStore;
