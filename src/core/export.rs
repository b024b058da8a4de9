// Logtally - core/export.rs
//
// CSV and JSON renderings of the aggregation outputs.
// Writes to any Write trait object; the caller decides the destination
// (stdout for the CLI). `target` is a label used only for error context.

use crate::core::model::{
    FileReadFailure, FileSummary, LogEntry, MessageGroup, ScatterPoint, TimeInterval,
};
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;

/// Complete analysis report, serialised as one JSON document.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub summaries: &'a [FileSummary],
    pub read_failures: &'a [FileReadFailure],
    pub groups: &'a [MessageGroup],
    pub total_occurrences: usize,
    pub timeline: &'a [TimeInterval],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_group: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter: Option<Vec<ScatterPoint>>,
}

/// Export entries as CSV: timestamp, level, source_file, message.
pub fn export_entries_csv<W: Write>(
    entries: &[&LogEntry],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["timestamp", "level", "source_file", "message"])
        .map_err(|e| ExportError::Csv {
            target: target.to_string(),
            source: e,
        })?;

    let mut count = 0;
    for entry in entries {
        csv_writer
            .write_record([
                &entry.timestamp.to_rfc3339(),
                entry.level.label(),
                &entry.source_file,
                &entry.message,
            ])
            .map_err(|e| ExportError::Csv {
                target: target.to_string(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;

    Ok(count)
}

/// Export entries as a JSON array of objects.
pub fn export_entries_json<W: Write>(
    entries: &[&LogEntry],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, entries).map_err(|e| ExportError::Json {
        target: target.to_string(),
        source: e,
    })?;
    Ok(entries.len())
}

/// Export the timeline as CSV: interval start, error count, warning count.
pub fn export_timeline_csv<W: Write>(
    intervals: &[TimeInterval],
    writer: W,
    target: &str,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["interval_start", "error_count", "warning_count"])
        .map_err(|e| ExportError::Csv {
            target: target.to_string(),
            source: e,
        })?;

    for interval in intervals {
        csv_writer
            .write_record([
                &interval.start.to_rfc3339(),
                &interval.error_count.to_string(),
                &interval.warning_count.to_string(),
            ])
            .map_err(|e| ExportError::Csv {
                target: target.to_string(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        target: target.to_string(),
        source: e,
    })?;

    Ok(intervals.len())
}

/// Export a complete report as one pretty-printed JSON document.
pub fn export_report_json<W: Write>(
    report: &Report<'_>,
    writer: W,
    target: &str,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json {
        target: target.to_string(),
        source: e,
    })
}
