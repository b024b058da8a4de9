// Logtally - tests/e2e_pipeline.rs
//
// End-to-end tests for the ingestion and aggregation pipeline.
//
// These tests exercise the real filesystem, real regex classification, and
// real chrono timestamp resolution. No mocks, no stubs: raw log files on
// disk all the way to ranked groups, timeline intervals, and overlap flags.
//
// Fixture facts (tests/fixtures/, grouping under the full-message policy):
//   service_alpha.log  (+02:00)  4 entries: ERR "Database connection
//       failed" with a two-frame trace (twice), WRN "Retrying connection",
//       ERR "Request timed out". One [INF] header contributes nothing.
//       Marker tally 3 ERR / 1 WRN.
//   service_beta.txt   (-05:00)  3 entries: ERR "Unhandled exception in
//       worker" with a bridged plain-text line and trace (twice), WRN
//       "Queue depth above threshold". Marker tally 2 ERR / 1 WRN.
//   notes.txt          zero matching lines, zero entries, 0/0 tally.

use logtally::app::ingest;
use logtally::core::model::{GroupKeyPolicy, Level, LevelFilter};
use logtally::core::repository::AnalysisSnapshot;
use logtally::core::timeline;
use chrono::{TimeZone, Utc};
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn all_fixtures() -> Vec<PathBuf> {
    vec![
        fixture("service_alpha.log"),
        fixture("service_beta.txt"),
        fixture("notes.txt"),
    ]
}

/// The full message key of the beta worker exception group.
fn beta_exception_key() -> String {
    "Unhandled exception in worker\n\
     Queue state: draining\n\
     \u{20}\u{20}\u{20}at Worker.Loop()\n\
     --- End of stack trace from previous location ---"
        .to_string()
}

fn snapshot(filter: LevelFilter) -> AnalysisSnapshot {
    let batch = ingest::process_files(&all_fixtures());
    AnalysisSnapshot::new(
        batch.into_repository(),
        filter,
        GroupKeyPolicy::FullMessage,
        100,
    )
}

// =============================================================================
// Summaries
// =============================================================================

/// The quick tally counts marker substrings per file, before parsing.
#[test]
fn e2e_summaries_match_marker_counts() {
    let (summaries, failures) = ingest::summarize_files(&all_fixtures());
    assert!(failures.is_empty(), "unexpected failures: {failures:?}");
    assert_eq!(summaries.len(), 3);

    assert_eq!(summaries[0].file_name, "service_alpha.log");
    assert_eq!(summaries[0].error_count, 3);
    assert_eq!(summaries[0].warning_count, 1);

    assert_eq!(summaries[1].file_name, "service_beta.txt");
    assert_eq!(summaries[1].error_count, 2);
    assert_eq!(summaries[1].warning_count, 1);

    assert_eq!(summaries[2].file_name, "notes.txt");
    assert_eq!(summaries[2].error_count, 0);
    assert_eq!(summaries[2].warning_count, 0);
}

// =============================================================================
// Parsing
// =============================================================================

/// All files parse independently and concatenate in selection order;
/// timestamps are normalised across different zone offsets.
#[test]
fn e2e_process_concatenates_in_selection_order() {
    let batch = ingest::process_files(&all_fixtures());
    assert!(batch.read_failures.is_empty());
    assert_eq!(batch.entries.len(), 7);

    // Alpha entries first, beta after, notes contributes nothing.
    let sources: Vec<&str> = batch
        .entries
        .iter()
        .map(|e| e.source_file.as_str())
        .collect();
    assert_eq!(
        sources,
        vec![
            "service_alpha.log",
            "service_alpha.log",
            "service_alpha.log",
            "service_alpha.log",
            "service_beta.txt",
            "service_beta.txt",
            "service_beta.txt",
        ]
    );

    // Multi-line assembly keeps physical indentation.
    assert_eq!(
        batch.entries[0].message,
        "Database connection failed\n\
         \u{20}\u{20}\u{20}at Npgsql.NpgsqlConnection.Open()\n\
         \u{20}\u{20}\u{20}at Api.Data.SessionFactory.Create()"
    );
    assert_eq!(batch.entries[0].level, Level::Error);

    // +02:00 local 08:21:24.838 is 06:21:24.838 UTC.
    assert_eq!(
        batch.entries[0].timestamp,
        Utc.with_ymd_and_hms(2025, 4, 17, 6, 21, 24).unwrap()
            + chrono::Duration::milliseconds(838)
    );

    // Beta's bridged plain-text line is part of the assembled message.
    assert_eq!(batch.entries[4].message, beta_exception_key());
    // -05:00 local 01:25:00 is 06:25:00 UTC.
    assert_eq!(
        batch.entries[4].timestamp,
        Utc.with_ymd_and_hms(2025, 4, 17, 6, 25, 0).unwrap()
    );

    let errors = batch
        .entries
        .iter()
        .filter(|e| e.level == Level::Error)
        .count();
    assert_eq!(errors, 5);
}

// =============================================================================
// Grouping
// =============================================================================

/// Ranked groups sort by count descending with stable first-seen ties.
/// (Fixture assumes the full-message policy.)
#[test]
fn e2e_group_ranking() {
    let snap = snapshot(LevelFilter::All);
    let ranking = snap.groups();

    let heads: Vec<(&str, usize)> = ranking
        .groups
        .iter()
        .map(|g| (g.key.lines().next().unwrap(), g.count))
        .collect();
    assert_eq!(
        heads,
        vec![
            ("Database connection failed", 2),
            ("Unhandled exception in worker", 2),
            ("Retrying connection", 1),
            ("Request timed out", 1),
            ("Queue depth above threshold", 1),
        ]
    );
    assert_eq!(ranking.total_occurrences, 7);
}

/// The level filter is applied before grouping.
#[test]
fn e2e_level_filter_narrows_groups() {
    let snap = snapshot(LevelFilter::ErrorsOnly);
    assert_eq!(snap.filtered_entries().len(), 5);

    let ranking = snap.groups();
    assert_eq!(ranking.groups.len(), 3);
    assert_eq!(ranking.total_occurrences, 5);
    assert!(ranking
        .groups
        .iter()
        .all(|g| g.occurrences.iter().all(|e| e.level == Level::Error)));
}

// =============================================================================
// Timeline
// =============================================================================

/// The padded range is exactly 30 minutes beyond the extremes, and no
/// entry is lost or double-counted across the intervals.
#[test]
fn e2e_timeline_padding_and_conservation() {
    let snap = snapshot(LevelFilter::All);
    let filtered = snap.filtered_entries();
    let (start, end) = timeline::padded_range(&filtered).unwrap();

    // min 06:21:24.838Z − 30min, max 07:25:00Z + 30min.
    assert_eq!(
        start,
        Utc.with_ymd_and_hms(2025, 4, 17, 5, 51, 24).unwrap()
            + chrono::Duration::milliseconds(838)
    );
    assert_eq!(end, Utc.with_ymd_and_hms(2025, 4, 17, 7, 55, 0).unwrap());

    let intervals = snap.timeline();
    assert_eq!(intervals[0].start, start);
    let last = intervals.last().unwrap();
    assert!(last.start <= end && end < last.end());

    let errors: usize = intervals.iter().map(|i| i.error_count).sum();
    let warnings: usize = intervals.iter().map(|i| i.warning_count).sum();
    assert_eq!(errors, 5);
    assert_eq!(warnings, 2);
}

/// Selecting a group narrows the counted subset but never moves the axis;
/// the scatter overlay exposes one point per raw occurrence.
#[test]
fn e2e_selection_narrows_counts_keeps_axis() {
    let unselected = snapshot(LevelFilter::All);
    let selected = snapshot(LevelFilter::All).toggle_group(&beta_exception_key());

    let base = unselected.timeline();
    let narrowed = selected.timeline();
    assert_eq!(base.len(), narrowed.len());
    assert_eq!(base[0].start, narrowed[0].start);

    let counted: usize = narrowed.iter().map(|i| i.total()).sum();
    assert_eq!(counted, 2);

    let scatter = selected.scatter().expect("selection implies scatter");
    assert_eq!(scatter.len(), 2);
    assert!(scatter.iter().all(|p| p.level == Level::Error));
    assert!(scatter.iter().all(|p| p.source_file == "service_beta.txt"));
}

// =============================================================================
// Overlap
// =============================================================================

/// Epoch-anchored bucket intersection across groups, symmetric by
/// construction.
#[test]
fn e2e_overlap_flags_against_selection() {
    let snap = snapshot(LevelFilter::All).toggle_group(&beta_exception_key());

    // The database failure at 06:21Z shares the [06:15, 06:30) bucket with
    // the selected group's 06:25Z occurrence.
    let db_key = "Database connection failed\n\
                  \u{20}\u{20}\u{20}at Npgsql.NpgsqlConnection.Open()\n\
                  \u{20}\u{20}\u{20}at Api.Data.SessionFactory.Create()";
    assert_eq!(snap.overlaps_selection(db_key), Some(true));

    // "Request timed out" at 07:02Z shares no bucket with 06:25Z / 07:25Z.
    assert_eq!(snap.overlaps_selection("Request timed out"), Some(false));

    // Overlap is undefined against the selection itself.
    assert_eq!(snap.overlaps_selection(&beta_exception_key()), None);
}

// =============================================================================
// Failure isolation
// =============================================================================

/// An unreadable or unsupported file never prevents the rest of the batch.
#[test]
fn e2e_read_failures_are_isolated() {
    let missing = fixture("does_not_exist.log");

    // A real file with a rejected extension.
    let dir = tempfile::TempDir::new().unwrap();
    let unsupported = dir.path().join("dump.json");
    std::fs::write(&unsupported, "{}").unwrap();

    let batch =
        ingest::process_files(&[fixture("service_alpha.log"), missing, unsupported]);
    assert_eq!(batch.entries.len(), 4);
    assert_eq!(batch.read_failures.len(), 2);
    assert_eq!(batch.summaries.len(), 1);
}

/// Zero files and zero matching entries surface as empty results, never
/// as raised failures.
#[test]
fn e2e_empty_input_is_a_state_not_an_error() {
    let batch = ingest::process_files::<PathBuf>(&[]);
    let snap = AnalysisSnapshot::new(
        batch.into_repository(),
        LevelFilter::All,
        GroupKeyPolicy::FullMessage,
        100,
    );
    assert!(snap.groups().is_empty());
    assert!(snap.timeline().is_empty());

    let batch = ingest::process_files(&[fixture("notes.txt")]);
    assert!(batch.entries.is_empty());
    assert!(batch.read_failures.is_empty());
}
