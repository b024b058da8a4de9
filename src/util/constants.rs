// Logtally - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Logtally";

/// Application identifier used for config directories.
pub const APP_ID: &str = "Logtally";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Ingest
// =============================================================================

/// File extensions accepted for ingestion (compared case-insensitively).
/// Acceptance is extension-only; content is validated line-by-line during
/// parsing, and a file with zero matching lines yields zero entries.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["log", "txt"];

/// Literal marker counted by the quick per-file summary scan.
pub const ERROR_MARKER: &str = "[ERR]";

/// Literal marker counted by the quick per-file summary scan.
pub const WARNING_MARKER: &str = "[WRN]";

// =============================================================================
// Aggregation
// =============================================================================

/// Width of one timeline interval in minutes. Intervals are contiguous and
/// fixed-width; every timestamp in the padded range maps to exactly one.
pub const INTERVAL_MINUTES: i64 = 15;

/// Padding applied on both sides of the timeline range, in minutes.
/// The range is computed over the level-filtered set so the axis does not
/// shift when a group is selected.
pub const RANGE_PADDING_MINUTES: i64 = 30;

/// Bucket width in seconds for overlap detection. Overlap buckets are
/// anchored at the Unix epoch, not at the padded timeline range start.
pub const OVERLAP_BUCKET_SECS: i64 = INTERVAL_MINUTES * 60;

/// Default number of ranked message groups returned by the aggregator.
/// Deployments have run with values between 15 and 100; the limit is
/// configurable via `[analysis] group_limit`.
pub const DEFAULT_GROUP_LIMIT: usize = 100;

/// Minimum configurable group limit.
pub const MIN_GROUP_LIMIT: usize = 1;

/// Maximum configurable group limit.
pub const MAX_GROUP_LIMIT: usize = 1_000;

// =============================================================================
// Report rendering
// =============================================================================

/// Maximum width in characters of a timeline histogram bar in the text report.
pub const REPORT_BAR_WIDTH: usize = 40;

/// Maximum characters of a group key shown per row in the text report.
pub const REPORT_KEY_PREVIEW: usize = 80;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
