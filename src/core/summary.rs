// Logtally - core/summary.rs
//
// Quick per-file marker tally, deliberately decoupled from the structural
// parse so it can run the moment a file is selected. A substring match does
// not imply a valid full header, so these counts may diverge from the
// parser's emitted counts; that divergence is accepted behaviour.

use crate::core::model::FileSummary;
use crate::util::constants::{ERROR_MARKER, WARNING_MARKER};

/// Tally lines whose trimmed content contains the literal `[ERR]` or
/// `[WRN]` marker. A line containing both markers counts toward both
/// tallies.
pub fn collect(file_name: &str, content: &str) -> FileSummary {
    let mut error_count = 0;
    let mut warning_count = 0;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.contains(ERROR_MARKER) {
            error_count += 1;
        }
        if trimmed.contains(WARNING_MARKER) {
            warning_count += 1;
        }
    }

    FileSummary {
        file_name: file_name.to_string(),
        error_count,
        warning_count,
    }
}
