// Logtally - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// rendering dependencies; these types are the shared vocabulary across
// parsing, aggregation, and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Level
// =============================================================================

/// Normalised entry level. A closed two-value enumeration: lines whose
/// bracketed token maps to neither variant never become entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Error,
    Warning,
}

impl Level {
    /// Map a raw bracketed token to a level. Only `ERR` and `WRN` normalise;
    /// any other token is rejected (case-sensitive, matching the grammar).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ERR" => Some(Level::Error),
            "WRN" => Some(Level::Warning),
            _ => None,
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Error => "Error",
            Level::Warning => "Warning",
        }
    }

    /// The bracketed token form as it appears in headers.
    pub fn token(&self) -> &'static str {
        match self {
            Level::Error => "ERR",
            Level::Warning => "WRN",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Level filter
// =============================================================================

/// Pure level predicate applied over the repository. Filtering never mutates
/// the underlying entry set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LevelFilter {
    #[default]
    All,
    ErrorsOnly,
    WarningsOnly,
}

impl LevelFilter {
    pub fn matches(&self, level: Level) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::ErrorsOnly => level == Level::Error,
            LevelFilter::WarningsOnly => level == Level::Warning,
        }
    }
}

// =============================================================================
// Log entry (normalised output of parsing)
// =============================================================================

/// A single parsed log event.
///
/// Immutable once built. `message` is the header remainder plus any appended
/// continuation lines joined by newline. Entries are owned by the repository
/// after a batch completes and retain per-file appearance order; any
/// chronological ordering is applied explicitly by the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Absolute instant, normalised to UTC so entries from files with
    /// different zone offsets compare correctly.
    pub timestamp: DateTime<Utc>,

    /// Normalised level.
    pub level: Level,

    /// Full message text, including continuation lines.
    pub message: String,

    /// Name of the source file this entry was parsed from.
    pub source_file: String,
}

impl LogEntry {
    /// First line of the message (the header remainder).
    pub fn first_line(&self) -> &str {
        self.message.lines().next().unwrap_or(&self.message)
    }
}

// =============================================================================
// Grouping key policy
// =============================================================================

/// Which portion of an entry's message identifies its group.
///
/// The policy has varied across this system's history (full message
/// including stack trace vs. first line only), so it is configuration
/// rather than a hardcoded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKeyPolicy {
    /// Group by the full message; two occurrences share a group only if the
    /// header line and every continuation line are textually identical.
    #[default]
    FullMessage,

    /// Group by the first message line only.
    FirstLine,
}

impl GroupKeyPolicy {
    /// The grouping key for an entry under this policy.
    pub fn key_for<'a>(&self, entry: &'a LogEntry) -> &'a str {
        match self {
            GroupKeyPolicy::FullMessage => &entry.message,
            GroupKeyPolicy::FirstLine => entry.first_line(),
        }
    }
}

// =============================================================================
// Message group (frequency ranking)
// =============================================================================

/// Entries sharing one grouping key, with their occurrence count.
/// Derived per aggregation call; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MessageGroup {
    /// The grouping key, verbatim.
    pub key: String,

    /// Number of occurrences.
    pub count: usize,

    /// Occurrences in first-seen order.
    pub occurrences: Vec<LogEntry>,
}

impl MessageGroup {
    /// Occurrences ordered most recent first, for detail navigation.
    /// The repository itself never imposes a chronological sort.
    pub fn occurrences_recent_first(&self) -> Vec<&LogEntry> {
        let mut sorted: Vec<&LogEntry> = self.occurrences.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted
    }
}

// =============================================================================
// Time interval (timeline bucket)
// =============================================================================

/// One fixed-width timeline bucket. Intervals are contiguous, 15 minutes
/// wide, and half-open on the low end: an entry belongs to the interval
/// whose `[start, start + 15min)` window contains its timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct TimeInterval {
    /// Inclusive start of the interval.
    pub start: DateTime<Utc>,

    /// Entries of level Error assigned to this interval.
    pub error_count: usize,

    /// Entries of level Warning assigned to this interval.
    pub warning_count: usize,

    /// Entries assigned to this interval, in assignment order.
    pub entries: Vec<LogEntry>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            error_count: 0,
            warning_count: 0,
            entries: Vec::new(),
        }
    }

    /// Exclusive end of the interval.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + chrono::Duration::minutes(crate::util::constants::INTERVAL_MINUTES)
    }

    /// Total entries in this interval across both levels.
    pub fn total(&self) -> usize {
        self.error_count + self.warning_count
    }
}

// =============================================================================
// Scatter point (selected-group overlay)
// =============================================================================

/// One raw occurrence of the selected group, for overlaying exact
/// occurrences on the binned timeline series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterPoint {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub source_file: String,
}

// =============================================================================
// File summary (quick marker tally)
// =============================================================================

/// Cheap per-file error/warning tally from a raw substring scan.
///
/// Deliberately decoupled from the structural parse so it can run
/// immediately on file selection. Its counts may diverge from the parser's
/// emitted counts (a substring match does not imply a valid full header);
/// that divergence is accepted behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub error_count: usize,
    pub warning_count: usize,
}

// =============================================================================
// File read failure
// =============================================================================

/// A per-file ingest failure carried in the batch result. The file
/// contributes zero entries; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReadFailure {
    pub file_name: String,
    pub reason: String,
}
