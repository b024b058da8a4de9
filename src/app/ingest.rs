// Logtally - app/ingest.rs
//
// Batch ingestion: read each selected file from disk and run the quick
// marker tally and the structural parse. Failures are contained at file
// granularity: an unreadable or unsupported file is recorded as a read
// failure and contributes zero entries; the batch always completes.
//
// Files are processed independently, in selection order, single-threaded
// and synchronous: every batch is a pure, bounded function of the selected
// files, and a new batch replaces the previous repository wholesale.

use crate::core::model::{FileReadFailure, FileSummary, LogEntry};
use crate::core::repository::EntryRepository;
use crate::core::{parser, summary};
use crate::util::constants::ACCEPTED_EXTENSIONS;
use crate::util::error::IngestError;
use std::path::Path;

/// Everything one batch produced: entries concatenated in selection order,
/// per-file summaries, and per-file read failures.
#[derive(Debug, Default)]
pub struct IngestBatch {
    pub entries: Vec<LogEntry>,
    pub summaries: Vec<FileSummary>,
    pub read_failures: Vec<FileReadFailure>,
}

impl IngestBatch {
    pub fn into_repository(self) -> EntryRepository {
        EntryRepository::new(self.entries, self.summaries, self.read_failures)
    }
}

/// Extension-only acceptance check (.log / .txt, case-insensitive).
/// Content is validated line-by-line during parsing, not here.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            ACCEPTED_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// Quick per-file tallies for newly selected files, ahead of the heavier
/// structural parse. Unreadable files are reported as read failures.
pub fn summarize_files<P: AsRef<Path>>(paths: &[P]) -> (Vec<FileSummary>, Vec<FileReadFailure>) {
    let mut summaries = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match read_file(path) {
            Ok(content) => summaries.push(summary::collect(&display_name(path), &content)),
            Err(err) => {
                tracing::warn!(error = %err, "File skipped during summary");
                failures.push(FileReadFailure {
                    file_name: display_name(path),
                    reason: err.reason(),
                });
            }
        }
    }

    (summaries, failures)
}

/// The user-triggered "process" action: parse all selected files into one
/// batch. Per-file outputs are concatenated in selection order.
pub fn process_files<P: AsRef<Path>>(paths: &[P]) -> IngestBatch {
    let mut batch = IngestBatch::default();

    for path in paths {
        let path = path.as_ref();
        let name = display_name(path);
        match read_file(path) {
            Ok(content) => {
                batch.summaries.push(summary::collect(&name, &content));
                let entries = parser::parse_file(&content, &name);
                tracing::debug!(file = %name, entries = entries.len(), "File ingested");
                batch.entries.extend(entries);
            }
            Err(err) => {
                tracing::warn!(error = %err, "File skipped during processing");
                batch.read_failures.push(FileReadFailure {
                    file_name: name,
                    reason: err.reason(),
                });
            }
        }
    }

    tracing::info!(
        files = paths.len(),
        entries = batch.entries.len(),
        failures = batch.read_failures.len(),
        "Batch processed"
    );

    batch
}

/// Obtain a file's contents as text, or the isolated per-file failure.
fn read_file(path: &Path) -> Result<String, IngestError> {
    if !is_supported(path) {
        return Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// The file name component used in summaries and entry metadata.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
