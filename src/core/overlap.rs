// Logtally - core/overlap.rs
//
// Cross-group temporal overlap: two entry sets overlap when they share at
// least one 15-minute bucket. Buckets here are anchored at the Unix epoch,
// not at the padded, range-relative grid the timeline uses.

use crate::core::model::LogEntry;
use crate::util::constants::OVERLAP_BUCKET_SECS;
use std::collections::HashSet;

/// Epoch-anchored bucket keys for an entry set.
fn bucket_keys(entries: &[&LogEntry]) -> HashSet<i64> {
    entries
        .iter()
        .map(|e| e.timestamp.timestamp().div_euclid(OVERLAP_BUCKET_SECS))
        .collect()
}

/// True iff the two sets share at least one bucket. Symmetric by
/// construction; callers never pass the same set on both sides.
pub fn overlaps(a: &[&LogEntry], b: &[&LogEntry]) -> bool {
    let keys_a = bucket_keys(a);
    if keys_a.is_empty() {
        return false;
    }
    b.iter()
        .any(|e| keys_a.contains(&e.timestamp.timestamp().div_euclid(OVERLAP_BUCKET_SECS)))
}
