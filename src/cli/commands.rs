//! Command implementation for the Telepase monitor CLI
//!
//! Runs the pipeline over the requested file and renders the view the
//! dashboard shows: headline metrics, the status proportions and the
//! transit table, all restricted to the selected lanes.

use crate::TelepaseProcessor;
use crate::app::models::ReadStatus;
use crate::app::services::report::{ClassificationReport, LaneFilter, StatusSummary};
use crate::cli::args::Args;
use anyhow::Context;
use colored::*;
use std::time::Instant;
use tracing::{debug, info, warn};

const CHART_WIDTH: usize = 40;

/// Main command runner
///
/// 1. Set up logging and validate arguments
/// 2. Read the upload and run the pipeline
/// 3. Render metrics, chart and table for the selected lanes
pub async fn run(args: Args) -> anyhow::Result<StatusSummary> {
    let start_time = Instant::now();

    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let processor = TelepaseProcessor::new(args.to_config())?;
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let report = processor
        .process_bytes(&bytes, &filename)
        .map_err(|error| {
            warn!("{} while processing '{}'", error.kind(), filename);
            error
        })
        .with_context(|| format!("Could not analyze {}", filename))?;

    let filter = args.lane_filter();
    warn_unknown_lanes(&report, &args.lanes);

    let summary = report.filtered_summary(&filter);
    print_header(&report, &filter);
    print_metrics(&summary);
    print_diagnostics(&report);
    print_chart(&summary);

    if !args.no_table {
        print_table(&report, &filter, args.max_rows)?;
    }

    info!("Finished in {:?}", start_time.elapsed());
    Ok(summary)
}

fn setup_logging(args: &Args) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("telepase_monitor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn warn_unknown_lanes(report: &ClassificationReport, requested: &[String]) {
    let known = report.lanes();
    for lane in requested {
        if !known.iter().any(|known| known == lane.trim()) {
            warn!(
                "Lane '{}' does not appear in the file (available: {})",
                lane.trim(),
                known.join(", ")
            );
        }
    }
}

fn print_header(report: &ClassificationReport, filter: &LaneFilter) {
    println!();
    println!("{}", "Telepase Antenna Read Monitor".bold());
    println!("{}", "=============================".bold());
    println!("File:    {}", report.filename);
    println!("Source:  {} (header at row {})", report.source, report.header_row + 1);
    if filter.is_unrestricted() {
        println!("Lanes:   all ({})", report.lanes().join(", "));
    } else {
        let selected: Vec<String> = report
            .lanes()
            .into_iter()
            .filter(|lane| {
                report
                    .records
                    .iter()
                    .any(|record| &record.lane == lane && filter.matches(record))
            })
            .collect();
        println!("Lanes:   {}", selected.join(", "));
    }
    println!();
}

fn print_metrics(summary: &StatusSummary) {
    println!("  {:<18} {}", "Total vehicles", summary.total.to_string().bold());
    println!("  {:<18} {}", "Reads OK", summary.read_ok.to_string().green());
    println!(
        "  {:<18} {}",
        "Failed (manual)",
        summary.manual_unread.to_string().red()
    );
    println!(
        "  {:<18} {}",
        "Effectiveness",
        summary.effectiveness_label().bold()
    );
    println!();
}

fn print_diagnostics(report: &ClassificationReport) {
    let stats = &report.stats;
    println!(
        "  {}",
        format!(
            "{} of {} data rows were transits ({:.1}%), {} skipped, {} manual markers",
            stats.records_emitted,
            stats.rows_scanned,
            stats.emission_rate(),
            stats.rows_skipped,
            stats.manual_markers_seen
        )
        .dimmed()
    );
    if stats.trailing_manual_marker {
        println!(
            "  {}",
            "Last manual marker had no transit after it".yellow()
        );
    }
    println!();
}

fn status_color(status: ReadStatus, text: &str) -> ColoredString {
    match status {
        ReadStatus::ReadOk => text.green(),
        ReadStatus::ManualUnread => text.red(),
        ReadStatus::OtherViolationOrExempt => text.yellow(),
    }
}

fn print_chart(summary: &StatusSummary) {
    for share in summary.proportions() {
        let width = (share.share * CHART_WIDTH as f64).round() as usize;
        let bar = "█".repeat(width.max(1));
        println!(
            "  {:<26} {} {} ({:.1}%)",
            share.status.label(),
            status_color(share.status, &bar),
            share.count,
            share.share * 100.0
        );
    }
    println!();
}

fn print_table(
    report: &ClassificationReport,
    filter: &LaneFilter,
    max_rows: Option<usize>,
) -> anyhow::Result<()> {
    let df = report
        .to_dataframe(filter)
        .context("Failed to build transit table")?;
    let df = match max_rows {
        Some(rows) => df.head(Some(rows)),
        None => df,
    };
    println!("{}", df);
    Ok(())
}
