//! roiboard - ROI data import for the marketing dashboard

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roiboard_core::error::{ImportError, ImportReport};
use roiboard_core::models::RoiData;
use roiboard_core::preferences::{OutputFormat, RoiboardPreferences};
use roiboard_core::{export, DataStore, RoiCsvParser};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "roiboard",
    version,
    about = "Import, validate and export ROI dashboard data",
    long_about = "Parses sectioned ROI CSV documents (# ROI Summary, # Channels, # Campaigns)\n\
                  into the dashboard dataset, derives the prospect journey and budget\n\
                  recommendations, and writes the same format back out.\n\
                  \n\
                  Examples:\n\
                    roiboard template -o roi.csv         # Write a pre-filled template\n\
                    roiboard import roi.csv              # Import and show the dataset\n\
                    roiboard validate roi.csv            # List skipped rows, fail on missing sections\n\
                    roiboard preview - < pasted.txt      # Dry run from stdin\n\
                    roiboard export roi.csv --to json -o roi.json\n\
                  \n\
                  Environment Variables:\n\
                    ROIBOARD_FORMAT                      # Force output format: json|table\n\
                    ROIBOARD_NO_COLOR                    # Disable ANSI colors (log-friendly)\n\
                    ROIBOARD_CONFIG_DIR                  # Override preferences directory\n\
                    RUST_LOG                             # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Force output format (json|table)
    #[arg(long, global = true, env = "ROIBOARD_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "ROIBOARD_NO_COLOR")]
    no_color: bool,

    /// Preferences directory (default: <config dir>/roiboard)
    #[arg(long, global = true, env = "ROIBOARD_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Import a document and print the resulting dataset
    Import {
        /// Document path, or "-" for stdin
        file: PathBuf,
    },
    /// Import a document and report skipped rows; fails on missing sections
    Validate {
        /// Document path, or "-" for stdin
        file: PathBuf,
    },
    /// Show how a document splits into sections without importing it
    Preview {
        /// Document path, or "-" for stdin
        file: PathBuf,
    },
    /// Write the import template with sample rows
    Template {
        /// Output path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Import a document and write it back out
    Export {
        /// Document path, or "-" for stdin
        file: PathBuf,
        /// Output format
        #[arg(long, default_value = "csv", value_parser = ["csv", "json"])]
        to: String,
        /// Output path
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

/// Settings resolved from flags, environment and preferences
struct OutputSettings {
    json: bool,
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let prefs = cli
        .config_dir
        .clone()
        .or_else(RoiboardPreferences::default_dir)
        .map(|dir| RoiboardPreferences::load(&dir))
        .unwrap_or_default();

    let format = cli
        .format
        .as_deref()
        .and_then(OutputFormat::parse)
        .unwrap_or(prefs.format);
    let output = OutputSettings {
        json: format == OutputFormat::Json,
        no_color: cli.no_color || prefs.no_color,
    };

    match cli.command {
        Command::Import { file } => run_import(&file, &output).await,
        Command::Validate { file } => run_validate(&file).await,
        Command::Preview { file } => run_preview(&file, &output).await,
        Command::Template { output } => run_template(output.as_deref()),
        Command::Export { file, to, output } => run_export(&file, &to, &output).await,
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

async fn read_stdin() -> std::io::Result<String> {
    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    Ok(text)
}

/// Import through the store so failures are reported the same way for
/// files and stdin
async fn import(
    store: &DataStore,
    file: &Path,
) -> Result<(Arc<RoiData>, ImportReport), ImportError> {
    if is_stdin(file) {
        let text = read_stdin().await.map_err(|source| ImportError::FileRead {
            path: file.to_path_buf(),
            source,
        })?;
        store.import_text(&text, "stdin")
    } else {
        store.import_file(file).await
    }
}

/// Print an import failure with its suggestion and exit non-zero
///
/// Exits directly so the error is not printed a second time by `main`.
fn fail_import(err: &ImportError) -> ! {
    eprintln!("{}", cli::format_import_failure(err));
    std::process::exit(1);
}

// ============================================================================
// Command Handlers
// ============================================================================

async fn run_import(file: &Path, output: &OutputSettings) -> Result<()> {
    let store = DataStore::new();
    let (data, report) = match import(&store, file).await {
        Ok(ok) => ok,
        Err(err) => fail_import(&err),
    };

    println!(
        "{}",
        cli::format_import(&data, &report, output.json, output.no_color)
    );
    Ok(())
}

async fn run_validate(file: &Path) -> Result<()> {
    let store = DataStore::new();
    match import(&store, file).await {
        Ok((data, report)) => {
            println!(
                "✓ Valid: {} channels, {} campaigns",
                data.channels.len(),
                data.campaigns.len()
            );
            if report.dropped_rows() > 0 {
                println!("{}", cli::format_diagnostics(&report));
            }
            if report.unrecognized_lines > 0 {
                println!(
                    "Lines outside known sections (ignored): {}",
                    report.unrecognized_lines
                );
            }
            Ok(())
        }
        Err(err) => fail_import(&err),
    }
}

async fn run_preview(file: &Path, output: &OutputSettings) -> Result<()> {
    let text = if is_stdin(file) {
        read_stdin()
            .await
            .context("Failed to read document from stdin")?
    } else {
        roiboard_core::parsers::roi_csv::read_document(file).await?
    };

    let preview = RoiCsvParser::preview(&text);

    if output.json {
        let value = serde_json::json!({
            "sections": preview.sections,
            "summaryRows": preview.summary_rows,
            "channelRows": preview.channel_rows,
            "campaignRows": preview.campaign_rows,
            "droppedRows": preview.dropped_rows,
            "unrecognized": preview.unrecognized.iter().map(|l| serde_json::json!({
                "line": l.line_number,
                "section": l.section,
                "text": l.text,
            })).collect::<Vec<_>>(),
            "missing": preview.missing.iter().map(|m| m.marker()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", cli::format_preview(&preview, output.no_color));
    }

    Ok(())
}

fn run_template(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            export::export_template(path)?;
            println!("✓ Template written to {}", path.display());
        }
        None => print!("{}", export::template()),
    }
    Ok(())
}

async fn run_export(file: &Path, to: &str, output: &Path) -> Result<()> {
    let store = DataStore::new();
    let (data, report) = match import(&store, file).await {
        Ok(ok) => ok,
        Err(err) => fail_import(&err),
    };

    match to {
        "json" => export::export_roi_to_json(&data, output)?,
        _ => export::export_roi_to_csv(&data, output)?,
    }

    println!("✓ Exported to {}", output.display());
    if report.dropped_rows() > 0 {
        println!(
            "  ({} malformed rows were skipped and are not in the export)",
            report.dropped_rows()
        );
    }
    Ok(())
}
