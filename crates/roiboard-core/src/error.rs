//! Error types for roiboard-core
//!
//! Three tiers:
//! - structural errors abort an import ([`ImportError::MissingRequiredSection`])
//! - I/O errors never reach the parser ([`ImportError::FileRead`] and friends)
//! - row-level problems are not errors at all: dropped rows are recorded as
//!   warnings in an [`ImportReport`] and the import carries on.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Section whose absence (or emptiness) rejects an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredSection {
    /// `# ROI Summary` with a parseable ad spend row
    Summary,
    /// `# Channels` with at least one data row
    Channels,
    /// `# Campaigns` with at least one data row
    Campaigns,
}

impl RequiredSection {
    /// Marker line expected in the document for this section
    pub fn marker(&self) -> &'static str {
        match self {
            RequiredSection::Summary => "# ROI Summary",
            RequiredSection::Channels => "# Channels",
            RequiredSection::Campaigns => "# Campaigns",
        }
    }
}

impl fmt::Display for RequiredSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Error returned by the import pipeline
#[derive(Error, Debug)]
pub enum ImportError {
    // ===================
    // Structural Errors
    // ===================
    #[error("Missing required section data: {}", join_sections(.missing))]
    MissingRequiredSection { missing: Vec<RequiredSection> },

    // ===================
    // IO Errors
    // ===================
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_sections(sections: &[RequiredSection]) -> String {
    sections
        .iter()
        .map(|s| s.marker())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ImportError {
    /// Stable kebab-case code for UI surfacing
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::MissingRequiredSection { .. } => "missing-required-section",
            ImportError::FileNotFound { .. } => "file-not-found",
            ImportError::FileRead { .. } => "file-read",
        }
    }

    /// True for errors raised by the parser itself (as opposed to I/O)
    pub fn is_structural(&self) -> bool {
        matches!(self, ImportError::MissingRequiredSection { .. })
    }

    /// Actionable hint for the user, if there is one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ImportError::MissingRequiredSection { missing } => Some(format!(
                "Add {} with at least one data row (see `roiboard template`)",
                join_sections(missing)
            )),
            ImportError::FileNotFound { path } => {
                Some(format!("Check if file exists: ls {}", path.display()))
            }
            ImportError::FileRead { path, .. } => {
                Some(format!("Check permissions: chmod +r {}", path.display()))
            }
        }
    }
}

/// Severity level for row diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Row was dropped, import continues
    Warning,
    /// Import was rejected
    Fatal,
}

/// A single diagnostic collected while parsing
#[derive(Debug, Clone, PartialEq)]
pub struct RowDiagnostic {
    /// 1-based line number in the raw document
    pub line_number: usize,
    /// Lower-cased section name the line belonged to
    pub section: String,
    pub message: String,
    pub severity: ErrorSeverity,
}

impl RowDiagnostic {
    pub fn warning(line_number: usize, section: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line_number,
            section: section.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
        }
    }
}

/// Report of what happened during a single import
///
/// `parse` discards this; `parse_with_report` hands it back so callers can
/// tell the user which rows were skipped.
#[derive(Debug, Default, Clone)]
pub struct ImportReport {
    pub diagnostics: Vec<RowDiagnostic>,
    pub summary_rows: usize,
    pub channel_rows: usize,
    pub campaign_rows: usize,
    /// Data lines that belonged to no recognised section
    pub unrecognized_lines: usize,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(
        &mut self,
        line_number: usize,
        section: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics
            .push(RowDiagnostic::warning(line_number, section, message));
    }

    pub fn add_fatal(&mut self, message: impl Into<String>) {
        self.diagnostics.push(RowDiagnostic {
            line_number: 0,
            section: String::new(),
            message: message.into(),
            severity: ErrorSeverity::Fatal,
        });
    }

    /// Returns true if the import was rejected
    pub fn has_fatal_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == ErrorSeverity::Fatal)
    }

    /// Rows dropped under row-level tolerance
    pub fn warnings(&self) -> impl Iterator<Item = &RowDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == ErrorSeverity::Warning)
    }

    pub fn dropped_rows(&self) -> usize {
        self.warnings().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_section_message_and_code() {
        let err = ImportError::MissingRequiredSection {
            missing: vec![RequiredSection::Channels, RequiredSection::Campaigns],
        };
        assert_eq!(err.code(), "missing-required-section");
        assert!(err.is_structural());
        assert_eq!(
            err.to_string(),
            "Missing required section data: # Channels, # Campaigns"
        );
        assert!(err.suggestion().unwrap().contains("roiboard template"));
    }

    #[test]
    fn test_io_errors_are_not_structural() {
        let err = ImportError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert!(!err.is_structural());
        assert_eq!(err.code(), "file-not-found");
    }

    #[test]
    fn test_import_report_counts() {
        let mut report = ImportReport::new();
        report.add_warning(4, "channels", "expected 6 fields, found 3");
        report.add_warning(9, "campaigns", "expected 9 fields, found 2");
        assert_eq!(report.dropped_rows(), 2);
        assert!(!report.has_fatal_errors());

        report.add_fatal("no channels");
        assert!(report.has_fatal_errors());
        assert_eq!(report.dropped_rows(), 2);
    }
}
