// Logtally - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Config loading and CLI overrides
// 4. Batch ingestion, aggregation, and report/export output
//
// Results go to stdout; logs and warnings go to stderr. Empty results are
// a normal state and exit 0; only usage and export failures are nonzero.

use clap::{Parser, ValueEnum};
use logtally::app::ingest;
use logtally::core::export::{self, Report};
use logtally::core::model::{GroupKeyPolicy, LevelFilter};
use logtally::core::repository::AnalysisSnapshot;
use logtally::platform::config;
use logtally::util::constants;
use logtally::util::logging;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Level filter choices exposed on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    All,
    Errors,
    Warnings,
}

impl From<LevelArg> for LevelFilter {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::All => LevelFilter::All,
            LevelArg::Errors => LevelFilter::ErrorsOnly,
            LevelArg::Warnings => LevelFilter::WarningsOnly,
        }
    }
}

/// Grouping key policy choices exposed on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GroupKeyArg {
    FullMessage,
    FirstLine,
}

impl From<GroupKeyArg> for GroupKeyPolicy {
    fn from(arg: GroupKeyArg) -> Self {
        match arg {
            GroupKeyArg::FullMessage => GroupKeyPolicy::FullMessage,
            GroupKeyArg::FirstLine => GroupKeyPolicy::FirstLine,
        }
    }
}

/// Output format choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Human-readable report.
    Text,
    /// Complete report as one JSON document.
    Json,
    /// Filtered entries as flat CSV.
    Csv,
}

/// Logtally - log ingestion and aggregation engine.
///
/// Point Logtally at one or more .log / .txt files to parse multi-line
/// entries, rank the most frequent messages, and bucket them into a
/// 15-minute timeline.
#[derive(Parser, Debug)]
#[command(name = "logtally", version, about)]
struct Cli {
    /// Log files to analyse (.log / .txt), in selection order.
    files: Vec<PathBuf>,

    /// Level filter applied before aggregation.
    #[arg(short = 'f', long = "filter-level", value_enum, default_value = "all")]
    filter_level: LevelArg,

    /// Maximum number of ranked groups (overrides config).
    #[arg(short = 'n', long = "top")]
    top: Option<usize>,

    /// Grouping key policy (overrides config).
    #[arg(long = "group-key", value_enum)]
    group_key: Option<GroupKeyArg>,

    /// Select a group by key: narrows timeline counts and reports overlap
    /// flags for the other ranked groups.
    #[arg(short = 'g', long = "select-group")]
    select_group: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: FormatArg,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before the logging subsystem comes up so the
    // [logging] level can take effect; load-time diagnostics are returned
    // as warnings rather than traced.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let (mut app_config, warnings) = config::load_config(&config_path);

    logging::init(cli.debug, app_config.log_level.as_deref());

    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        files = cli.files.len(),
        "Logtally starting"
    );

    // CLI overrides, validated against the same bounds as the config file.
    if let Some(top) = cli.top {
        if (constants::MIN_GROUP_LIMIT..=constants::MAX_GROUP_LIMIT).contains(&top) {
            app_config.group_limit = top;
        } else {
            eprintln!(
                "Warning: --top {top} is out of range ({}-{}). Keeping {}.",
                constants::MIN_GROUP_LIMIT,
                constants::MAX_GROUP_LIMIT,
                app_config.group_limit
            );
        }
    }
    if let Some(key) = cli.group_key {
        app_config.group_key = key.into();
    }

    // One batch: read, tally, parse, and swap in the snapshot.
    let batch = ingest::process_files(&cli.files);
    let repository = batch.into_repository();

    let mut snapshot = AnalysisSnapshot::new(
        repository,
        cli.filter_level.into(),
        app_config.group_key,
        app_config.group_limit,
    );
    if let Some(ref key) = cli.select_group {
        snapshot = snapshot.toggle_group(key);
    }

    let stdout = std::io::stdout();
    let result = match cli.format {
        FormatArg::Text => {
            print!("{}", render_report(&snapshot));
            Ok(())
        }
        FormatArg::Json => {
            let ranking = snapshot.groups();
            let timeline = snapshot.timeline();
            let report = Report {
                summaries: snapshot.repository().summaries(),
                read_failures: snapshot.repository().read_failures(),
                groups: &ranking.groups,
                total_occurrences: ranking.total_occurrences,
                timeline: &timeline,
                selected_group: snapshot.selected_group(),
                scatter: snapshot.scatter(),
            };
            export::export_report_json(&report, stdout.lock(), "stdout")
        }
        FormatArg::Csv => {
            export::export_entries_csv(&snapshot.filtered_entries(), stdout.lock(), "stdout")
                .map(|_| ())
        }
    };

    if let Err(e) = result {
        let e = logtally::util::error::LogTallyError::from(e);
        tracing::error!(error = %e, "Export failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

// =============================================================================
// Text report
// =============================================================================

/// Render the human-readable report: file summaries, read failures, the
/// ranked groups (with overlap flags when a group is selected), and the
/// timeline histogram.
fn render_report(snapshot: &AnalysisSnapshot) -> String {
    let mut out = String::new();
    let repo = snapshot.repository();

    writeln!(out, "Files").ok();
    if repo.summaries().is_empty() && repo.read_failures().is_empty() {
        writeln!(out, "  (none)").ok();
    }
    for summary in repo.summaries() {
        writeln!(
            out,
            "  {:<32} {:>6} ERR  {:>6} WRN",
            summary.file_name, summary.error_count, summary.warning_count
        )
        .ok();
    }
    for failure in repo.read_failures() {
        writeln!(out, "  {:<32} unreadable: {}", failure.file_name, failure.reason).ok();
    }

    let ranking = snapshot.groups();
    writeln!(out).ok();
    if ranking.is_empty() {
        writeln!(out, "No entries match the current filter.").ok();
        return out;
    }

    writeln!(
        out,
        "Top {} message groups ({} occurrences)",
        ranking.groups.len(),
        ranking.total_occurrences
    )
    .ok();
    for group in &ranking.groups {
        let marker = match snapshot.selected_group() {
            Some(selected) if selected == group.key => "[selected]",
            Some(_) => match snapshot.overlaps_selection(&group.key) {
                Some(true) => "[overlaps]",
                _ => "",
            },
            None => "",
        };
        writeln!(
            out,
            "  {:>6}x  {:<10} {}",
            group.count,
            marker,
            key_preview(&group.key)
        )
        .ok();
    }

    let timeline = snapshot.timeline();
    let max_total = timeline.iter().map(|i| i.total()).max().unwrap_or(0);
    writeln!(out).ok();
    writeln!(out, "Timeline (15-minute intervals)").ok();
    for interval in &timeline {
        let bar_len = if max_total == 0 {
            0
        } else {
            interval.total() * constants::REPORT_BAR_WIDTH / max_total
        };
        writeln!(
            out,
            "  {} |{:<width$}| {:>4} ERR  {:>4} WRN",
            interval.start.format("%Y-%m-%d %H:%M"),
            "#".repeat(bar_len),
            interval.error_count,
            interval.warning_count,
            width = constants::REPORT_BAR_WIDTH
        )
        .ok();
    }

    out
}

/// First line of a group key, truncated for single-row display.
fn key_preview(key: &str) -> String {
    let first_line = key.lines().next().unwrap_or(key);
    let truncated: String = first_line
        .chars()
        .take(constants::REPORT_KEY_PREVIEW)
        .collect();
    if truncated.len() < key.len() {
        format!("{truncated}...")
    } else {
        truncated
    }
}
