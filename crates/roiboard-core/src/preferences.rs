//! User preferences persistence for roiboard
//!
//! Stored as `preferences.json` in the roiboard config directory
//! (`~/.config/roiboard/` on Linux).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

/// How the CLI prints results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// roiboard-specific user preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoiboardPreferences {
    /// Default output format when no flag is given
    pub format: OutputFormat,
    /// Disable ANSI colors in tables
    pub no_color: bool,
}

impl Default for RoiboardPreferences {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            no_color: false,
        }
    }
}

impl RoiboardPreferences {
    /// Default config directory (`<config_dir>/roiboard`)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("roiboard"))
    }

    /// Load preferences from `<config_dir>/preferences.json`.
    /// Returns defaults on any I/O or parse error (graceful degradation).
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join(PREFERENCES_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed preferences");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences to `<config_dir>/preferences.json`.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)
            .context("Failed to create config directory for preferences")?;
        let path = config_dir.join(PREFERENCES_FILE);
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }
}
