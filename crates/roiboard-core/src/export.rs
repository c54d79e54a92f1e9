//! Export functionality for ROI data and import templates
//!
//! The CSV writer is the mirror image of [`RoiCsvParser`]: anything it
//! produces parses back into equivalent summary, channel and campaign
//! records. Column headers and section names come from the parser's
//! constants so the two cannot drift apart.
//!
//! [`RoiCsvParser`]: crate::parsers::RoiCsvParser

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{CampaignRecord, ChannelRecord, Metric, RoiData, SummaryRecord};
use crate::parsers::fields::{is_header_cell, NAME_ESCAPE};
use crate::parsers::roi_csv::{
    AUM_SCALE, CAMPAIGNS_SECTION, CAMPAIGN_COLUMNS, CHANNELS_SECTION, CHANNEL_COLUMNS,
    SECTION_MARKER, SUMMARY_SECTION,
};

/// Summary row labels, in export order
pub const SUMMARY_LABELS: [&str; 4] = [
    "Total Ad Spend",
    "Conversion Rate",
    "New Prospects",
    "New AUM",
];

// ============================================================================
// CSV Document
// ============================================================================

/// Render ROI data in the sectioned import format
///
/// Free-text cells cannot carry commas, line breaks or surrounding
/// whitespace in this format; separators become spaces and padding is
/// trimmed (with a warning). A row's first cell that would read as a section
/// marker or header label gets a leading `'`, which the parser strips.
///
/// # Examples
///
/// ```
/// use roiboard_core::export::{template, to_csv_string};
/// use roiboard_core::parsers::RoiCsvParser;
///
/// let data = RoiCsvParser::parse(&template()).unwrap();
/// let again = RoiCsvParser::parse(&to_csv_string(&data)).unwrap();
/// assert_eq!(data.channels, again.channels);
/// ```
pub fn to_csv_string(data: &RoiData) -> String {
    write_document(&data.summary, &data.channels, &data.campaigns)
}

fn write_document(
    summary: &SummaryRecord,
    channels: &[ChannelRecord],
    campaigns: &[CampaignRecord],
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{}{}", SECTION_MARKER, SUMMARY_SECTION));
    lines.push(summary_line(
        SUMMARY_LABELS[0],
        &format!("${}", num(summary.ad_spend.value)),
        &summary.ad_spend,
    ));
    lines.push(summary_line(
        SUMMARY_LABELS[1],
        &format!("{}%", num(summary.conversion_rate.value)),
        &summary.conversion_rate,
    ));
    lines.push(summary_line(
        SUMMARY_LABELS[2],
        &num(summary.prospects.value),
        &summary.prospects,
    ));
    lines.push(summary_line(
        SUMMARY_LABELS[3],
        &format!("${}M", num(summary.aum.value / AUM_SCALE)),
        &summary.aum,
    ));
    lines.push(String::new());

    lines.push(format!("{}{}", SECTION_MARKER, CHANNELS_SECTION));
    lines.push(CHANNEL_COLUMNS.join(","));
    for channel in channels {
        lines.push(
            [
                leading_cell(&channel.name),
                num(channel.roi),
                num(channel.spend),
                num(channel.prospects),
                num(channel.clients),
                num(channel.change),
            ]
            .join(","),
        );
    }
    lines.push(String::new());

    lines.push(format!("{}{}", SECTION_MARKER, CAMPAIGNS_SECTION));
    lines.push(CAMPAIGN_COLUMNS.join(","));
    for campaign in campaigns {
        lines.push(
            [
                leading_cell(&campaign.name),
                cell(&campaign.channel),
                cell(&campaign.start_date),
                cell(&campaign.end_date),
                cell(&campaign.status),
                num(campaign.spend),
                num(campaign.prospects),
                num(campaign.clients),
                num(campaign.roi),
            ]
            .join(","),
        );
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn summary_line(label: &str, value: &str, metric: &Metric) -> String {
    format!("{},{},{}%", label, value, num(metric.change))
}

/// Shortest representation that parses back to the same value
fn num(value: f64) -> String {
    format!("{}", value)
}

fn cell(text: &str) -> String {
    let cleaned = text.replace([',', '\n', '\r'], " ");
    let cleaned = cleaned.trim();
    if cleaned != text {
        warn!(
            value = text,
            "Free-text cell has separators or padding, writing it normalized"
        );
    }
    cleaned.to_string()
}

/// First cell of a data row
fn leading_cell(text: &str) -> String {
    let text = cell(text);
    let ambiguous = text.starts_with(NAME_ESCAPE)
        || text.starts_with(SECTION_MARKER)
        || is_header_cell(&text, CHANNEL_COLUMNS[0])
        || is_header_cell(&text, CAMPAIGN_COLUMNS[0]);

    if ambiguous {
        debug!(value = %text, "Escaping leading cell");
        format!("{}{}", NAME_ESCAPE, text)
    } else {
        text
    }
}

// ============================================================================
// Template
// ============================================================================

/// Sample summary shown in the downloadable template
fn sample_summary() -> SummaryRecord {
    SummaryRecord {
        ad_spend: Metric::new(25000.0, 12.5),
        conversion_rate: Metric::new(18.5, 2.3),
        prospects: Metric::new(145.0, 15.2),
        aum: Metric::new(42_800_000.0, 14.5),
    }
}

fn sample_channels() -> Vec<ChannelRecord> {
    [
        ("Facebook Ads", 17.5, 8500.0, 40.0, 8.0, 5.2),
        ("LinkedIn Ads", 18.2, 10000.0, 42.0, 9.0, 3.8),
        ("Google Ads", 15.8, 4500.0, 35.0, 6.0, -1.4),
        ("Email Marketing", 22.4, 2000.0, 28.0, 7.0, 8.1),
    ]
    .into_iter()
    .map(|(name, roi, spend, prospects, clients, change)| ChannelRecord {
        name: name.to_string(),
        roi,
        spend,
        prospects,
        clients,
        change,
    })
    .collect()
}

fn sample_campaigns() -> Vec<CampaignRecord> {
    [
        ("Retirement Planning", "Facebook", "2025-01-15", "2025-03-15", "Active", 5200.0, 22.0, 4.0, 18.2),
        ("Wealth Management", "LinkedIn", "2025-02-01", "2025-04-30", "Active", 6500.0, 25.0, 6.0, 19.5),
        ("Tax Strategies", "Google", "2024-11-01", "2025-01-31", "Completed", 3000.0, 20.0, 3.0, 14.1),
    ]
    .into_iter()
    .map(
        |(name, channel, start, end, status, spend, prospects, clients, roi)| CampaignRecord {
            name: name.to_string(),
            channel: channel.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            status: status.to_string(),
            spend,
            prospects,
            clients,
            roi,
        },
    )
    .collect()
}

/// Import template pre-filled with sample rows
///
/// Generated by the same writer as [`to_csv_string`], so it always parses.
pub fn template() -> String {
    write_document(&sample_summary(), &sample_channels(), &sample_campaigns())
}

// ============================================================================
// File Export Functions
// ============================================================================

/// Export ROI data to the sectioned CSV format
///
/// # Errors
/// Returns error if file creation or write operations fail
pub fn export_roi_to_csv(data: &RoiData, path: &Path) -> Result<()> {
    write_text(path, &to_csv_string(data))
}

/// Write the import template to `path`
pub fn export_template(path: &Path) -> Result<()> {
    write_text(path, &template())
}

/// Export ROI data (including derived journey and recommendations) as
/// pretty-printed JSON
///
/// Unparsable figures (`NaN`) are written as `null`.
pub fn export_roi_to_json(data: &RoiData, path: &Path) -> Result<()> {
    let json = to_json_string(data)?;
    write_text(path, &json)
}

/// Pretty-printed JSON for ROI data
pub fn to_json_string(data: &RoiData) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize ROI data to JSON")
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush().context("Failed to flush writer")?;

    Ok(())
}
