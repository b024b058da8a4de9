// Logtally - core/timeline.rs
//
// Fixed-width time bucketing for the timeline series.
//
// The range is computed over the level-filtered set (ignoring any group
// selection) so the axis does not shift when a group is selected; the
// counted subset may be narrower. Intervals are contiguous, 15 minutes
// wide, half-open on the low end, and the generated sequence extends until
// the final interval contains the padded range end.

use crate::core::model::{Level, LogEntry, ScatterPoint, TimeInterval};
use crate::util::constants::{INTERVAL_MINUTES, RANGE_PADDING_MINUTES};
use chrono::{DateTime, Duration, Utc};

/// Bucket `counted` into 15-minute intervals over the padded range of
/// `range_entries`.
///
/// `range_entries` is the level-filtered set that fixes the axis;
/// `counted` is the subset actually tallied (the group-filtered entries
/// when a group is selected, otherwise the same set). Entries of `counted`
/// outside the computed range are ignored; in practice `counted` is always
/// a subset of `range_entries`, whose range covers it.
///
/// Zero range entries produce an empty output without touching min/max.
pub fn aggregate(range_entries: &[&LogEntry], counted: &[&LogEntry]) -> Vec<TimeInterval> {
    let Some((start, end)) = padded_range(range_entries) else {
        return Vec::new();
    };

    let width = Duration::minutes(INTERVAL_MINUTES);
    let mut intervals: Vec<TimeInterval> = Vec::new();
    let mut cursor = start;
    loop {
        intervals.push(TimeInterval::new(cursor));
        let next = cursor + width;
        if next > end {
            break;
        }
        cursor = next;
    }

    let width_secs = INTERVAL_MINUTES * 60;
    for entry in counted {
        if entry.timestamp < start || entry.timestamp > end {
            continue;
        }
        // Half-open assignment: a timestamp exactly on a boundary lands in
        // the interval that starts there.
        let offset_secs = (entry.timestamp - start).num_seconds();
        let idx = (offset_secs / width_secs) as usize;
        let slot = idx.min(intervals.len() - 1);
        let interval = &mut intervals[slot];
        match entry.level {
            Level::Error => interval.error_count += 1,
            Level::Warning => interval.warning_count += 1,
        }
        interval.entries.push((*entry).clone());
    }

    intervals
}

/// The padded `[min − 30min, max + 30min]` range of the given set, or
/// `None` when the set is empty.
pub fn padded_range(entries: &[&LogEntry]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let min = entries.iter().map(|e| e.timestamp).min()?;
    let max = entries.iter().map(|e| e.timestamp).max()?;
    let padding = Duration::minutes(RANGE_PADDING_MINUTES);
    Some((min - padding, max + padding))
}

/// One point per raw occurrence of the selected group, for overlaying
/// exact occurrences on the binned series.
pub fn scatter(selected: &[&LogEntry]) -> Vec<ScatterPoint> {
    selected
        .iter()
        .map(|entry| ScatterPoint {
            timestamp: entry.timestamp,
            level: entry.level,
            source_file: entry.source_file.clone(),
        })
        .collect()
}
