// Logtally - core/repository.rs
//
// The per-batch entry repository and the immutable analysis snapshot.
//
// A repository is the concatenation of all files' parser outputs for the
// current batch, rebuilt wholesale on each batch and discarded on the next;
// there is no incremental merge. The snapshot pairs a repository with the
// level filter and the optional selected group, and every user action swaps
// in a whole new snapshot; no shared mutable state and no locking.

use crate::core::group::{self, GroupRanking};
use crate::core::model::{
    FileReadFailure, FileSummary, GroupKeyPolicy, LevelFilter, LogEntry, ScatterPoint,
    TimeInterval,
};
use crate::core::{overlap, timeline};

// =============================================================================
// Entry repository
// =============================================================================

/// All parsed entries of one batch, with the per-file summaries and read
/// failures recorded while ingesting it.
#[derive(Debug, Clone, Default)]
pub struct EntryRepository {
    entries: Vec<LogEntry>,
    summaries: Vec<FileSummary>,
    read_failures: Vec<FileReadFailure>,
}

impl EntryRepository {
    pub fn new(
        entries: Vec<LogEntry>,
        summaries: Vec<FileSummary>,
        read_failures: Vec<FileReadFailure>,
    ) -> Self {
        Self {
            entries,
            summaries,
            read_failures,
        }
    }

    /// All entries, in per-file appearance order, files in selection order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn summaries(&self) -> &[FileSummary] {
        &self.summaries
    }

    pub fn read_failures(&self) -> &[FileReadFailure] {
        &self.read_failures
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply the level filter as a pure predicate; the underlying set is
    /// never mutated and keeps its order.
    pub fn filtered(&self, filter: LevelFilter) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .filter(|e| filter.matches(e.level))
            .collect()
    }
}

// =============================================================================
// Analysis snapshot
// =============================================================================

/// One immutable (entries, filter, selection) state. All aggregations are
/// pure functions of a snapshot; changing the filter or toggling a group
/// produces a new snapshot rather than mutating this one.
#[derive(Debug, Clone)]
pub struct AnalysisSnapshot {
    repository: EntryRepository,
    filter: LevelFilter,
    policy: GroupKeyPolicy,
    group_limit: usize,
    selected_group: Option<String>,
}

impl AnalysisSnapshot {
    pub fn new(
        repository: EntryRepository,
        filter: LevelFilter,
        policy: GroupKeyPolicy,
        group_limit: usize,
    ) -> Self {
        Self {
            repository,
            filter,
            policy,
            group_limit,
            selected_group: None,
        }
    }

    pub fn repository(&self) -> &EntryRepository {
        &self.repository
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }

    pub fn policy(&self) -> GroupKeyPolicy {
        self.policy
    }

    pub fn selected_group(&self) -> Option<&str> {
        self.selected_group.as_deref()
    }

    /// Replace the level filter. Any group selection is cleared: the
    /// selected key may not exist in the re-ranked set.
    pub fn with_filter(self, filter: LevelFilter) -> Self {
        Self {
            filter,
            selected_group: None,
            ..self
        }
    }

    /// Toggle the selected group: selecting the current key clears the
    /// selection, any other key replaces it.
    pub fn toggle_group(self, key: &str) -> Self {
        let selected_group = if self.selected_group.as_deref() == Some(key) {
            None
        } else {
            Some(key.to_string())
        };
        Self {
            selected_group,
            ..self
        }
    }

    /// The level-filtered entry set, in repository order.
    pub fn filtered_entries(&self) -> Vec<&LogEntry> {
        self.repository.filtered(self.filter)
    }

    /// The subset tallied by the timeline: the selected group's occurrences
    /// when a group is selected, otherwise the whole filtered set.
    pub fn counted_entries(&self) -> Vec<&LogEntry> {
        let filtered = self.filtered_entries();
        match self.selected_group.as_deref() {
            Some(key) => filtered
                .into_iter()
                .filter(|e| self.policy.key_for(e) == key)
                .collect(),
            None => filtered,
        }
    }

    /// Frequency ranking of the filtered set, truncated to the configured
    /// group limit.
    pub fn groups(&self) -> GroupRanking {
        group::rank(&self.filtered_entries(), self.policy, self.group_limit)
    }

    /// The binned timeline. The axis range comes from the level-filtered
    /// set so it does not shift when a group is selected; only the counted
    /// subset narrows.
    pub fn timeline(&self) -> Vec<TimeInterval> {
        timeline::aggregate(&self.filtered_entries(), &self.counted_entries())
    }

    /// One point per raw occurrence of the selected group, or `None` when
    /// no group is selected.
    pub fn scatter(&self) -> Option<Vec<ScatterPoint>> {
        self.selected_group.as_deref()?;
        Some(timeline::scatter(&self.counted_entries()))
    }

    /// Whether the given group shares a time bucket with the selected one.
    /// `None` when nothing is selected or when `key` is the selection
    /// itself (overlap is only defined across distinct sets).
    pub fn overlaps_selection(&self, key: &str) -> Option<bool> {
        let selected = self.selected_group.as_deref()?;
        if key == selected {
            return None;
        }
        let filtered = self.filtered_entries();
        let candidate: Vec<&LogEntry> = filtered
            .iter()
            .copied()
            .filter(|e| self.policy.key_for(e) == key)
            .collect();
        let current: Vec<&LogEntry> = filtered
            .iter()
            .copied()
            .filter(|e| self.policy.key_for(e) == selected)
            .collect();
        Some(overlap::overlaps(&candidate, &current))
    }
}
