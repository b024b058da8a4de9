// Logtally - core/parser.rs
//
// Per-file entry assembly: a two-state machine (Idle / Open) over the
// ordered non-empty trimmed lines, with one line of lookahead.
//
// Classification operates on the trimmed form of each line; appended
// continuation text keeps the physical indentation (stack frames stay
// recognisable in the assembled message).
//
// The parser never raises. Malformed input yields fewer or zero entries:
// lines that fail to open or extend an entry are discarded, and headers
// whose token or timestamp does not normalise contribute nothing beyond
// closing whatever entry was open. Files are parsed independently and
// concatenated by the ingest layer in selection order.

use crate::core::classify::{classify, LineClass};
use crate::core::model::{Level, LogEntry};
use crate::core::timestamp;
use chrono::{DateTime, Utc};

/// An entry currently being assembled.
struct OpenEntry {
    timestamp: DateTime<Utc>,
    level: Level,
    message: String,
}

impl OpenEntry {
    fn finish(self, source_file: &str) -> LogEntry {
        LogEntry {
            timestamp: self.timestamp,
            level: self.level,
            message: self.message,
            source_file: source_file.to_string(),
        }
    }

    fn append(&mut self, line: &str) {
        self.message.push('\n');
        self.message.push_str(line);
    }
}

/// Parse one file's raw text into an ordered entry sequence.
///
/// State transitions, per trimmed non-empty line with lookahead `N`
/// (the next non-empty trimmed line, if any):
/// - Header with recognised level: emit any open entry, open a new one with
///   message = header remainder.
/// - Header with unrecognised level (or an unresolvable instant): emit any
///   open entry, go idle; the line contributes nothing.
/// - Idle + non-header line: discarded.
/// - Open + continuation line: appended to the open entry's message.
/// - Open + plain text: if `N` is a continuation line, appended anyway
///   (bridges a non-matching line sandwiched between trace lines);
///   otherwise the open entry is emitted and the line discarded, never
///   retried as a new entry.
/// - End of file while open: the entry is emitted.
pub fn parse_file(content: &str, source_file: &str) -> Vec<LogEntry> {
    // (physical line without trailing whitespace, trimmed form for
    // classification); whitespace-only lines are dropped entirely.
    let lines: Vec<(&str, &str)> = content
        .lines()
        .map(|line| (line.trim_end(), line.trim()))
        .filter(|(_, trimmed)| !trimmed.is_empty())
        .collect();

    let mut entries: Vec<LogEntry> = Vec::new();
    let mut open: Option<OpenEntry> = None;

    for (idx, (raw, trimmed)) in lines.iter().enumerate() {
        match classify(trimmed) {
            LineClass::Header(parts) => {
                if let Some(entry) = open.take() {
                    entries.push(entry.finish(source_file));
                }
                let level = match parts.level() {
                    Some(level) => level,
                    None => continue,
                };
                match timestamp::resolve(parts.datetime, parts.offset) {
                    Some(ts) => {
                        open = Some(OpenEntry {
                            timestamp: ts,
                            level,
                            message: parts.rest.to_string(),
                        });
                    }
                    None => {
                        // Header shape with an impossible instant: the entry
                        // cannot normalise, so the line is dropped like an
                        // unrecognised token.
                        tracing::debug!(
                            file = source_file,
                            datetime = parts.datetime,
                            offset = parts.offset,
                            "Header timestamp did not resolve; line dropped"
                        );
                    }
                }
            }
            LineClass::Continuation => {
                if let Some(entry) = open.as_mut() {
                    entry.append(raw);
                }
                // Idle: discarded.
            }
            LineClass::Text => {
                if open.is_some() {
                    let next_is_continuation = lines
                        .get(idx + 1)
                        .map(|(_, next)| matches!(classify(next), LineClass::Continuation))
                        .unwrap_or(false);
                    if next_is_continuation {
                        if let Some(entry) = open.as_mut() {
                            entry.append(raw);
                        }
                    } else if let Some(entry) = open.take() {
                        entries.push(entry.finish(source_file));
                    }
                }
                // Idle: discarded.
            }
        }
    }

    if let Some(entry) = open.take() {
        entries.push(entry.finish(source_file));
    }

    tracing::debug!(
        file = source_file,
        lines = lines.len(),
        entries = entries.len(),
        "File parsed"
    );

    entries
}
