//! Parser for sectioned ROI CSV documents
//!
//! The document is a hand-editable layout of marker-delimited sections:
//!
//! ```text
//! # ROI Summary
//! Total Ad Spend,$25000,12.5%
//! ...
//! # Channels
//! Channel Name,ROI (%),Spend ($),Prospects,Clients,Change (%)
//! Facebook Ads,17.5,8500,40,8,5.2
//! # Campaigns
//! Campaign Name,Channel,Start Date,End Date,Status,Spend ($),Prospects,Clients,ROI (%)
//! Retirement Planning,Facebook,2025-01-15,2025-03-15,Active,5200,22,4,18.2
//! ```
//!
//! Rows are split on bare commas. Malformed rows are dropped rather than
//! failing the import; only a missing required section rejects it.

use crate::analytics;
use crate::error::{ImportError, ImportReport, RequiredSection};
use crate::models::{CampaignRecord, ChannelRecord, Metric, RoiData, SummaryRecord};
use crate::parsers::fields::{is_header_cell, parse_number, split_row, unescape_leading};
use std::path::Path;
use tracing::{debug, info, warn};

/// Prefix of a section marker line
pub const SECTION_MARKER: &str = "# ";

/// AUM values in the summary section are written in millions
pub const AUM_SCALE: f64 = 1_000_000.0;

/// Minimum cells in a summary row (`key,value,change`)
pub const SUMMARY_FIELDS: usize = 3;

/// Minimum cells in a channel row
pub const CHANNEL_FIELDS: usize = 6;

/// Minimum cells in a campaign row
pub const CAMPAIGN_FIELDS: usize = 9;

/// Marker names of the three typed sections, as written by the exporter
pub const SUMMARY_SECTION: &str = "ROI Summary";
pub const CHANNELS_SECTION: &str = "Channels";
pub const CAMPAIGNS_SECTION: &str = "Campaigns";

/// Header row of the channels section; its first cell is matched
/// case-insensitively to skip the header when parsing
pub const CHANNEL_COLUMNS: [&str; CHANNEL_FIELDS] = [
    "Channel Name",
    "ROI (%)",
    "Spend ($)",
    "Prospects",
    "Clients",
    "Change (%)",
];

/// Header row of the campaigns section
pub const CAMPAIGN_COLUMNS: [&str; CAMPAIGN_FIELDS] = [
    "Campaign Name",
    "Channel",
    "Start Date",
    "End Date",
    "Status",
    "Spend ($)",
    "Prospects",
    "Clients",
    "ROI (%)",
];

/// Summary metric a row key resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryField {
    AdSpend,
    ConversionRate,
    Prospects,
    Aum,
}

/// Key substrings, checked in order; first match wins
const SUMMARY_KEYS: [(&str, SummaryField); 4] = [
    ("ad spend", SummaryField::AdSpend),
    ("conversion", SummaryField::ConversionRate),
    ("prospects", SummaryField::Prospects),
    ("aum", SummaryField::Aum),
];

/// Section cursor while walking the document
#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Summary,
    Channels,
    Campaigns,
    /// Unknown marker, or data before the first marker (empty name)
    Other(String),
}

impl Section {
    fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case(SUMMARY_SECTION) {
            Section::Summary
        } else if name.eq_ignore_ascii_case(CHANNELS_SECTION) {
            Section::Channels
        } else if name.eq_ignore_ascii_case(CAMPAIGNS_SECTION) {
            Section::Campaigns
        } else {
            Section::Other(name.to_string())
        }
    }

    fn name(&self) -> &str {
        match self {
            Section::Summary => "roi summary",
            Section::Channels => "channels",
            Section::Campaigns => "campaigns",
            Section::Other(name) => name,
        }
    }
}

/// A data line that belonged to no recognised section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedLine {
    /// 1-based line number in the raw document
    pub line_number: usize,
    /// Lower-cased section name, empty for lines before the first marker
    pub section: String,
    pub text: String,
}

/// Dry-run view of a document, for showing the user what an import would do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    /// Section names in the order their markers appear (lower-cased)
    pub sections: Vec<String>,
    pub summary_rows: usize,
    pub channel_rows: usize,
    pub campaign_rows: usize,
    pub dropped_rows: usize,
    /// Generic preview buffer: lines from unknown sections, not type-parsed
    pub unrecognized: Vec<UnrecognizedLine>,
    /// Required sections that would reject the import
    pub missing: Vec<RequiredSection>,
}

impl ImportPreview {
    /// True if importing this text would succeed
    pub fn is_importable(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Default)]
struct SummaryBuilder {
    ad_spend: Option<Metric>,
    conversion_rate: Option<Metric>,
    prospects: Option<Metric>,
    aum: Option<Metric>,
}

impl SummaryBuilder {
    fn set(&mut self, field: SummaryField, metric: Metric) {
        let slot = match field {
            SummaryField::AdSpend => &mut self.ad_spend,
            SummaryField::ConversionRate => &mut self.conversion_rate,
            SummaryField::Prospects => &mut self.prospects,
            SummaryField::Aum => &mut self.aum,
        };
        if slot.is_some() {
            debug!(?field, "Summary metric repeated, later row wins");
        }
        *slot = Some(metric);
    }

    fn has_ad_spend(&self) -> bool {
        self.ad_spend.is_some_and(|m| !m.value.is_nan())
    }

    fn build(self) -> SummaryRecord {
        SummaryRecord {
            ad_spend: self.ad_spend.unwrap_or_default(),
            conversion_rate: self.conversion_rate.unwrap_or_default(),
            prospects: self.prospects.unwrap_or_default(),
            aum: self.aum.unwrap_or_default(),
        }
    }
}

/// Intermediate result of the section walk, discarded after validation
#[derive(Debug, Default)]
struct ParsedDocument {
    sections: Vec<String>,
    summary: SummaryBuilder,
    summary_rows: usize,
    channels: Vec<ChannelRecord>,
    campaigns: Vec<CampaignRecord>,
    unrecognized: Vec<UnrecognizedLine>,
}

impl ParsedDocument {
    fn missing_sections(&self) -> Vec<RequiredSection> {
        let mut missing = Vec::new();
        if !self.summary.has_ad_spend() {
            missing.push(RequiredSection::Summary);
        }
        if self.channels.is_empty() {
            missing.push(RequiredSection::Channels);
        }
        if self.campaigns.is_empty() {
            missing.push(RequiredSection::Campaigns);
        }
        missing
    }
}

/// Parser for sectioned ROI CSV documents
pub struct RoiCsvParser;

impl RoiCsvParser {
    /// Parse raw text into a complete [`RoiData`]
    ///
    /// All-or-nothing: either every required section yielded data and a full
    /// result (with derived journey and recommendations) is returned, or
    /// [`ImportError::MissingRequiredSection`] is.
    pub fn parse(text: &str) -> Result<RoiData, ImportError> {
        Self::parse_with_report(text).0
    }

    /// Same as [`parse`](Self::parse), also returning per-row diagnostics
    pub fn parse_with_report(text: &str) -> (Result<RoiData, ImportError>, ImportReport) {
        let mut report = ImportReport::new();
        let doc = Self::walk(text, &mut report);

        report.summary_rows = doc.summary_rows;
        report.channel_rows = doc.channels.len();
        report.campaign_rows = doc.campaigns.len();
        report.unrecognized_lines = doc.unrecognized.len();

        let missing = doc.missing_sections();
        if !missing.is_empty() {
            let err = ImportError::MissingRequiredSection { missing };
            warn!(error = %err, "ROI import rejected");
            report.add_fatal(err.to_string());
            return (Err(err), report);
        }

        let summary = doc.summary.build();
        let derived = analytics::derive(&summary, &doc.channels, &doc.campaigns);

        info!(
            channels = doc.channels.len(),
            campaigns = doc.campaigns.len(),
            dropped = report.dropped_rows(),
            "ROI import parsed"
        );

        let data = RoiData {
            summary,
            channels: doc.channels,
            campaigns: doc.campaigns,
            journey: derived.journey,
            recommendations: derived.recommendations,
        };

        (Ok(data), report)
    }

    /// Read a file and parse it
    ///
    /// I/O failures are reported as such and never reach the parser.
    pub async fn parse_file(path: &Path) -> Result<RoiData, ImportError> {
        let text = read_document(path).await?;
        Self::parse(&text)
    }

    /// Walk the document without validating it
    pub fn preview(text: &str) -> ImportPreview {
        let mut report = ImportReport::new();
        let doc = Self::walk(text, &mut report);
        let missing = doc.missing_sections();

        ImportPreview {
            summary_rows: doc.summary_rows,
            channel_rows: doc.channels.len(),
            campaign_rows: doc.campaigns.len(),
            dropped_rows: report.dropped_rows(),
            sections: doc.sections,
            unrecognized: doc.unrecognized,
            missing,
        }
    }

    /// Split the text into sections and type each data line
    fn walk(text: &str, report: &mut ImportReport) -> ParsedDocument {
        let mut doc = ParsedDocument::default();
        let mut current = Section::Other(String::new());

        for (idx, raw) in text.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix(SECTION_MARKER) {
                let name = name.trim().to_lowercase();
                debug!(line_number, section = %name, "Section marker");
                doc.sections.push(name.clone());
                current = Section::from_name(&name);
                continue;
            }

            let cells = split_row(line);
            match &current {
                Section::Summary => match Self::parse_summary_row(&cells) {
                    Ok(Some((field, metric))) => {
                        doc.summary.set(field, metric);
                        doc.summary_rows += 1;
                    }
                    Ok(None) => {
                        debug!(line_number, key = cells[0], "Unknown summary key, skipped");
                    }
                    Err(message) => Self::drop_row(report, line_number, &current, message),
                },
                Section::Channels => {
                    if is_header_cell(cells[0], CHANNEL_COLUMNS[0]) {
                        continue;
                    }
                    match Self::parse_channel_row(&cells) {
                        Ok(channel) => doc.channels.push(channel),
                        Err(message) => Self::drop_row(report, line_number, &current, message),
                    }
                }
                Section::Campaigns => {
                    if is_header_cell(cells[0], CAMPAIGN_COLUMNS[0]) {
                        continue;
                    }
                    match Self::parse_campaign_row(&cells) {
                        Ok(campaign) => doc.campaigns.push(campaign),
                        Err(message) => Self::drop_row(report, line_number, &current, message),
                    }
                }
                Section::Other(name) => doc.unrecognized.push(UnrecognizedLine {
                    line_number,
                    section: name.clone(),
                    text: line.to_string(),
                }),
            }
        }

        doc
    }

    fn drop_row(report: &mut ImportReport, line_number: usize, section: &Section, message: String) {
        debug!(line_number, section = section.name(), %message, "Row dropped");
        report.add_warning(line_number, section.name(), message);
    }

    /// `Ok(None)` means the key matched no known metric
    fn parse_summary_row(cells: &[&str]) -> Result<Option<(SummaryField, Metric)>, String> {
        if cells.len() < SUMMARY_FIELDS {
            return Err(format!(
                "expected {} fields, found {}",
                SUMMARY_FIELDS,
                cells.len()
            ));
        }

        let key = cells[0].to_lowercase();
        let Some(field) = SUMMARY_KEYS
            .iter()
            .find(|(label, _)| key.contains(label))
            .map(|(_, field)| *field)
        else {
            return Ok(None);
        };

        let mut value = parse_number(cells[1]);
        if field == SummaryField::Aum {
            value *= AUM_SCALE;
        }
        let change = parse_number(cells[2]);

        Ok(Some((field, Metric::new(value, change))))
    }

    fn parse_channel_row(cells: &[&str]) -> Result<ChannelRecord, String> {
        if cells.len() < CHANNEL_FIELDS {
            return Err(format!(
                "expected {} fields, found {}",
                CHANNEL_FIELDS,
                cells.len()
            ));
        }

        Ok(ChannelRecord {
            name: unescape_leading(cells[0]).to_string(),
            roi: parse_number(cells[1]),
            spend: parse_number(cells[2]),
            prospects: parse_number(cells[3]),
            clients: parse_number(cells[4]),
            change: parse_number(cells[5]),
        })
    }

    fn parse_campaign_row(cells: &[&str]) -> Result<CampaignRecord, String> {
        if cells.len() < CAMPAIGN_FIELDS {
            return Err(format!(
                "expected {} fields, found {}",
                CAMPAIGN_FIELDS,
                cells.len()
            ));
        }

        Ok(CampaignRecord {
            name: unescape_leading(cells[0]).to_string(),
            channel: cells[1].to_string(),
            start_date: cells[2].to_string(),
            end_date: cells[3].to_string(),
            status: cells[4].to_string(),
            spend: parse_number(cells[5]),
            prospects: parse_number(cells[6]),
            clients: parse_number(cells[7]),
            roi: parse_number(cells[8]),
        })
    }
}

/// Read an import document from disk
pub async fn read_document(path: &Path) -> Result<String, ImportError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ImportError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ImportError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
