// LogBoundary - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (explicit --config or platform default)
// 3. Logging initialisation
// 4. The conversion run with per-file console narration
// 5. Optional run report

use clap::Parser;
use logboundary::app::convert::{self, ConvertOptions};
use logboundary::core::model::ConversionProgress;
use logboundary::core::parser::MessageExtractor;
use logboundary::core::report::{self, ReportFormat};
use logboundary::platform::config::{self, PlatformPaths};
use logboundary::util;
use logboundary::util::error::ReportError;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// LogBoundary - rewrite legacy conversation logs with message boundary markers.
///
/// Every `*.log` file under the root is rewritten IN PLACE. There is no
/// backup; use --dry-run to preview.
#[derive(Parser, Debug)]
#[command(name = "logboundary", version, about)]
struct Cli {
    /// Directory to convert recursively [default: logs/conversations].
    root: Option<PathBuf>,

    /// Config file to use instead of the platform default location.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Parse and report every file without writing anything.
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Write a run report to this path (.csv for CSV, otherwise JSON).
    #[arg(short = 'r', long = "report")]
    report: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Conversion aborted");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> util::error::Result<()> {
    let loaded = match &cli.config {
        Some(path) => config::load_explicit_config(path),
        None => Ok(config::load_config(&PlatformPaths::resolve().config_file())),
    };

    // The config may carry the log level, so logging starts after it is read.
    let config_level = loaded
        .as_ref()
        .ok()
        .and_then(|(c, _)| c.log_level.clone());
    util::logging::init(cli.debug, config_level.as_deref());

    let (app_config, config_warnings) = loaded?;
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        dry_run = cli.dry_run,
        "LogBoundary starting"
    );

    // Root: CLI > config.toml > built-in default.
    let root = cli
        .root
        .or(app_config.root)
        .unwrap_or_else(|| PathBuf::from(util::constants::DEFAULT_ROOT));

    let options = ConvertOptions {
        root,
        dry_run: cli.dry_run,
    };
    let extractor = MessageExtractor::new();

    let summary = convert::run_conversion(&options, &extractor, print_progress)?;

    if let Some(report_path) = &cli.report {
        let rows = save_report(&summary, report_path)?;
        tracing::info!(path = %report_path.display(), rows, "Report written");
    }

    Ok(())
}

/// Console narration, one line per event.
fn print_progress(progress: &ConversionProgress) {
    match progress {
        ConversionProgress::FileStarted { path } => {
            println!("Converting {}...", path.display());
        }
        ConversionProgress::FileConverted {
            path,
            dry_run: false,
            ..
        } => {
            println!("Successfully converted {}", path.display());
        }
        ConversionProgress::FileConverted {
            path,
            records,
            dry_run: true,
        } => {
            println!("Dry run: {} has {records} record(s), not written", path.display());
        }
        ConversionProgress::FileFailed { path, error } => {
            println!("Error converting {}: {error}", path.display());
        }
        ConversionProgress::Warning { message } => {
            eprintln!("Warning: {message}");
        }
    }
}

fn save_report(
    summary: &logboundary::core::model::ConversionSummary,
    path: &Path,
) -> Result<usize, ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let rows = report::write_report(summary, ReportFormat::from_path(path), &mut writer, path)?;
    writer.flush().map_err(io_err)?;
    Ok(rows)
}
