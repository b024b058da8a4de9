// Logtally - core/group.rs
//
// Frequency ranking: group the filtered entry set by message key and keep
// the top N groups. Recomputed whenever the filtered set or the level
// filter changes; never persisted.

use crate::core::model::{GroupKeyPolicy, LogEntry, MessageGroup};
use std::collections::HashMap;

/// Result of one ranking pass.
#[derive(Debug, Clone)]
pub struct GroupRanking {
    /// Top groups, sorted by count descending; ties keep first-seen order.
    pub groups: Vec<MessageGroup>,

    /// Total occurrences across the returned groups.
    pub total_occurrences: usize,
}

impl GroupRanking {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up a returned group by its key.
    pub fn group(&self, key: &str) -> Option<&MessageGroup> {
        self.groups.iter().find(|g| g.key == key)
    }
}

/// Rank `entries` into at most `limit` groups under the given key policy.
///
/// Grouping preserves first-seen order per key, the sort is stable (equal
/// counts retain relative first-seen order), and occurrence lists keep the
/// input order of the filtered set.
pub fn rank(entries: &[&LogEntry], policy: GroupKeyPolicy, limit: usize) -> GroupRanking {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<MessageGroup> = Vec::new();

    for entry in entries {
        let key = policy.key_for(entry);
        match index.get(key) {
            Some(&slot) => {
                let group = &mut groups[slot];
                group.count += 1;
                group.occurrences.push((*entry).clone());
            }
            None => {
                index.insert(key, groups.len());
                groups.push(MessageGroup {
                    key: key.to_string(),
                    count: 1,
                    occurrences: vec![(*entry).clone()],
                });
            }
        }
    }

    // Stable: equal counts keep first-seen order.
    groups.sort_by_key(|g| std::cmp::Reverse(g.count));
    groups.truncate(limit);

    let total_occurrences = groups.iter().map(|g| g.count).sum();

    tracing::debug!(
        groups = groups.len(),
        occurrences = total_occurrences,
        "Group ranking computed"
    );

    GroupRanking {
        groups,
        total_occurrences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Level;
    use chrono::{TimeZone, Utc};

    fn entry(message: &str, minute: u32) -> LogEntry {
        LogEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 4, 17, 8, minute, 0).unwrap(),
            level: Level::Error,
            message: message.to_string(),
            source_file: "test.log".to_string(),
        }
    }

    fn rank_all(entries: &[LogEntry], policy: GroupKeyPolicy, limit: usize) -> GroupRanking {
        let refs: Vec<&LogEntry> = entries.iter().collect();
        rank(&refs, policy, limit)
    }

    /// Counts sort non-increasing; equal counts keep first-seen order.
    /// (Fixture assumes the full-message policy.)
    #[test]
    fn test_sorted_by_count_with_stable_ties() {
        let entries = vec![
            entry("alpha", 0),
            entry("beta", 1),
            entry("gamma", 2),
            entry("beta", 3),
            entry("gamma", 4),
            entry("beta", 5),
            entry("delta", 6),
        ];
        let ranking = rank_all(&entries, GroupKeyPolicy::FullMessage, 10);

        let keys: Vec<&str> = ranking.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["beta", "gamma", "alpha", "delta"]);
        let counts: Vec<usize> = ranking.groups.iter().map(|g| g.count).collect();
        assert_eq!(counts, vec![3, 2, 1, 1]);
        // alpha vs delta: both count 1, alpha seen first.
        assert_eq!(ranking.total_occurrences, 7);
    }

    /// Group identity is key-exact under the full-message policy: a
    /// different stack trace splits the group even when first lines match.
    #[test]
    fn test_full_message_identity_is_exact() {
        let entries = vec![
            entry("Boom\nat Foo.Bar()", 0),
            entry("Boom\nat Baz.Qux()", 1),
            entry("Boom\nat Foo.Bar()", 2),
        ];
        let ranking = rank_all(&entries, GroupKeyPolicy::FullMessage, 10);
        assert_eq!(ranking.groups.len(), 2);
        assert_eq!(ranking.groups[0].key, "Boom\nat Foo.Bar()");
        assert_eq!(ranking.groups[0].count, 2);
    }

    /// The first-line policy merges entries that differ only in trace.
    /// (Fixture assumes the first-line policy.)
    #[test]
    fn test_first_line_policy_merges_by_header_remainder() {
        let entries = vec![
            entry("Boom\nat Foo.Bar()", 0),
            entry("Boom\nat Baz.Qux()", 1),
        ];
        let ranking = rank_all(&entries, GroupKeyPolicy::FirstLine, 10);
        assert_eq!(ranking.groups.len(), 1);
        assert_eq!(ranking.groups[0].key, "Boom");
        assert_eq!(ranking.groups[0].count, 2);
    }

    /// Truncation keeps the top N and the total reflects returned groups
    /// only.
    #[test]
    fn test_truncates_to_limit() {
        let entries = vec![
            entry("a", 0),
            entry("a", 1),
            entry("a", 2),
            entry("b", 3),
            entry("b", 4),
            entry("c", 5),
        ];
        let ranking = rank_all(&entries, GroupKeyPolicy::FullMessage, 2);
        assert_eq!(ranking.groups.len(), 2);
        assert_eq!(ranking.groups[0].key, "a");
        assert_eq!(ranking.groups[1].key, "b");
        assert_eq!(ranking.total_occurrences, 5);
    }

    /// Occurrence lists keep input order per key.
    #[test]
    fn test_occurrences_keep_input_order() {
        let entries = vec![entry("x", 5), entry("x", 1), entry("x", 3)];
        let ranking = rank_all(&entries, GroupKeyPolicy::FullMessage, 10);
        let minutes: Vec<u32> = ranking.groups[0]
            .occurrences
            .iter()
            .map(|e| {
                use chrono::Timelike;
                e.timestamp.minute()
            })
            .collect();
        assert_eq!(minutes, vec![5, 1, 3]);
    }

    #[test]
    fn test_empty_input_yields_empty_ranking() {
        let ranking = rank_all(&[], GroupKeyPolicy::FullMessage, 10);
        assert!(ranking.is_empty());
        assert_eq!(ranking.total_occurrences, 0);
    }
}
