//! Parsers for ROI import documents

pub mod fields;
pub mod roi_csv;

pub use fields::parse_number;
pub use roi_csv::{ImportPreview, RoiCsvParser, UnrecognizedLine};
