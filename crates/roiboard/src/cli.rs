//! CLI formatters for imported ROI data
//!
//! Renders tables with comfy-table, or pretty JSON when requested.

use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Row, Table};
use roiboard_core::error::{ImportError, ImportReport};
use roiboard_core::format::{
    format_change, format_count, format_currency, format_millions, format_percent,
};
use roiboard_core::models::RoiData;
use roiboard_core::parsers::ImportPreview;

// ============================================================================
// Tables
// ============================================================================

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Apply colors only if enabled
    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
    table
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Headline metrics
pub fn format_summary(data: &RoiData, no_color: bool) -> String {
    let s = &data.summary;
    let mut table = new_table(&["Metric", "Value", "Change"], no_color);

    let rows = [
        ("Ad Spend", format_currency(s.ad_spend.value), s.ad_spend.change),
        (
            "Conversion Rate",
            format_percent(s.conversion_rate.value),
            s.conversion_rate.change,
        ),
        ("New Prospects", format_count(s.prospects.value), s.prospects.change),
        ("New AUM", format_millions(s.aum.value), s.aum.change),
    ];

    for (label, value, change) in rows {
        table.add_row(Row::from(vec![
            Cell::new(label),
            right(value),
            right(format_change(change)),
        ]));
    }

    table.to_string()
}

/// Channel breakdown, in import order
pub fn format_channels(data: &RoiData, no_color: bool) -> String {
    let mut table = new_table(
        &[
            "Channel", "ROI", "Spend", "Prospects", "Clients", "Change", "Campaigns",
        ],
        no_color,
    );

    for c in &data.channels {
        let campaigns = data.campaigns_for_channel(&c.name).count();
        table.add_row(Row::from(vec![
            Cell::new(&c.name),
            right(format_percent(c.roi)),
            right(format_currency(c.spend)),
            right(format_count(c.prospects)),
            right(format_count(c.clients)),
            right(format_change(c.change)),
            right(campaigns.to_string()),
        ]));
    }

    format!(
        "{}\nTotal channel spend: {}",
        table,
        format_currency(data.total_channel_spend())
    )
}

pub fn format_campaigns(data: &RoiData, no_color: bool) -> String {
    let mut table = new_table(
        &[
            "Campaign", "Channel", "Start", "End", "Status", "Spend", "Prospects", "Clients",
            "ROI",
        ],
        no_color,
    );

    for c in &data.campaigns {
        table.add_row(Row::from(vec![
            Cell::new(&c.name),
            Cell::new(&c.channel),
            Cell::new(&c.start_date),
            Cell::new(&c.end_date),
            Cell::new(&c.status),
            right(format_currency(c.spend)),
            right(format_count(c.prospects)),
            right(format_count(c.clients)),
            right(format_percent(c.roi)),
        ]));
    }

    table.to_string()
}

/// Funnel stages with a proportional bar
pub fn format_journey(data: &RoiData) -> String {
    const BAR_WIDTH: f64 = 30.0;

    let mut lines = Vec::new();
    for stage in &data.journey.stages {
        let filled = (stage.percent / 100.0 * BAR_WIDTH).round().max(0.0) as usize;
        lines.push(format!(
            "  {:<16} {:>8}  {:>4.0}%  {}",
            stage.name,
            format_count(stage.count),
            stage.percent,
            "█".repeat(filled)
        ));
    }
    for insight in &data.journey.insights {
        lines.push(format!("  💡 {}", insight));
    }
    lines.join("\n")
}

pub fn format_recommendations(data: &RoiData) -> String {
    if data.recommendations.is_empty() {
        return "  No recommendations.".to_string();
    }

    data.recommendations
        .iter()
        .map(|r| {
            let mut text = format!(
                "  [{}] {} ({})\n      {}\n      Impact: {} | Value: {}",
                r.priority.as_str().to_uppercase(),
                r.title,
                r.metric,
                r.description,
                r.impact,
                r.value.as_str()
            );
            if let Some(channel) = data.channel(&r.channel) {
                text.push_str(&format!(
                    " | Current spend: {}",
                    format_currency(channel.spend)
                ));
            }
            text
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Full Reports
// ============================================================================

/// Everything an import produced (human or JSON)
pub fn format_import(data: &RoiData, report: &ImportReport, json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
    }

    let mut out = vec![
        "ROI Summary".to_string(),
        format_summary(data, no_color),
        String::new(),
        format!("Channels ({})", data.channels.len()),
        format_channels(data, no_color),
        String::new(),
        format!("Campaigns ({})", data.campaigns.len()),
        format_campaigns(data, no_color),
        String::new(),
        "Prospect Journey".to_string(),
        format_journey(data),
        String::new(),
        "Recommendations".to_string(),
        format_recommendations(data),
    ];

    if report.dropped_rows() > 0 {
        out.push(String::new());
        out.push(format_diagnostics(report));
    }

    out.join("\n")
}

/// Rows skipped under row-level tolerance
pub fn format_diagnostics(report: &ImportReport) -> String {
    let mut lines = vec![format!("Skipped rows ({}):", report.dropped_rows())];
    for d in report.warnings() {
        lines.push(format!(
            "  - line {} [{}]: {}",
            d.line_number, d.section, d.message
        ));
    }
    lines.join("\n")
}

/// One-shot failure message: code, error and optional suggestion
pub fn format_import_failure(err: &ImportError) -> String {
    let mut out = format!("✗ Import failed [{}]: {}", err.code(), err);
    if let Some(suggestion) = err.suggestion() {
        out.push_str(&format!("\n  💡 {}", suggestion));
    }
    out
}

/// Dry-run overview of a document
pub fn format_preview(preview: &ImportPreview, no_color: bool) -> String {
    let mut table = new_table(&["Section", "Rows"], no_color);
    table.add_row(vec!["ROI Summary".to_string(), preview.summary_rows.to_string()]);
    table.add_row(vec!["Channels".to_string(), preview.channel_rows.to_string()]);
    table.add_row(vec!["Campaigns".to_string(), preview.campaign_rows.to_string()]);
    table.add_row(vec![
        "(unrecognized)".to_string(),
        preview.unrecognized.len().to_string(),
    ]);

    let mut out = vec![table.to_string()];

    if preview.dropped_rows > 0 {
        out.push(format!("Malformed rows skipped: {}", preview.dropped_rows));
    }

    if !preview.unrecognized.is_empty() {
        out.push(String::new());
        out.push("Unrecognized lines:".to_string());
        for line in &preview.unrecognized {
            let section = if line.section.is_empty() {
                "before first section"
            } else {
                line.section.as_str()
            };
            out.push(format!(
                "  {:>4} [{}] {}",
                line.line_number,
                section,
                truncate(&line.text, 60)
            ));
        }
    }

    out.push(String::new());
    if preview.is_importable() {
        out.push("✓ Ready to import".to_string());
    } else {
        let missing: Vec<_> = preview.missing.iter().map(|m| m.marker()).collect();
        out.push(format!("✗ Missing required data: {}", missing.join(", ")));
    }

    out.join("\n")
}

/// Truncate to `max` characters (not bytes) with an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
