//! Frequency tables and top-k rankings of column values.
//!
//! Counting keeps first-seen order, and ranking uses a stable sort on count,
//! so values with equal counts always appear in the order they were first
//! encountered.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analyzers::missing::is_missing;

/// Label under which missing values are counted.
pub const NULL_LABEL: &str = "(null)";

/// Default number of entries returned by [`top_k`].
pub const DEFAULT_TOP_K: usize = 15;

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: usize,
}

impl FrequencyEntry {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Accumulates occurrence counts while remembering first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyCounter {
    counts: IndexMap<String, usize>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of a label.
    pub fn add(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    /// Number of distinct labels seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences recorded.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries in first-seen order.
    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        self.counts
            .into_iter()
            .map(|(label, count)| FrequencyEntry { label, count })
            .collect()
    }

    /// Entries by descending count, ties in first-seen order, at most `k`.
    pub fn into_ranked(self, k: usize) -> Vec<FrequencyEntry> {
        rank(self.into_entries(), k)
    }
}

/// Sorts entries by descending count, keeping input order among ties, and
/// truncates to `k` entries.
pub fn rank(mut entries: Vec<FrequencyEntry>, k: usize) -> Vec<FrequencyEntry> {
    // sort_by is stable, which is what keeps ties in first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(k);
    entries
}

/// Counts every value in first-seen order, bucketing missing values under
/// `null_label`.
pub fn value_counts<'a>(
    values: impl IntoIterator<Item = Option<&'a str>>,
    null_label: &str,
) -> Vec<FrequencyEntry> {
    let mut counter = FrequencyCounter::new();
    for value in values {
        counter.add(bucket_label(value, null_label));
    }
    counter.into_entries()
}

/// The `k` most frequent values, with missing values counted under
/// [`NULL_LABEL`].
///
/// ```rust
/// use dataset_profiler::analyzers::frequency::{top_k, FrequencyEntry};
///
/// let ranked = top_k(vec![Some("b"), Some("a"), None, Some("a"), Some("NA")], 2);
/// assert_eq!(
///     ranked,
///     vec![FrequencyEntry::new("a", 2), FrequencyEntry::new("(null)", 2)]
/// );
/// ```
pub fn top_k<'a>(values: impl IntoIterator<Item = Option<&'a str>>, k: usize) -> Vec<FrequencyEntry> {
    top_k_with_label(values, k, NULL_LABEL)
}

/// Like [`top_k`] with a caller-chosen label for missing values.
pub fn top_k_with_label<'a>(
    values: impl IntoIterator<Item = Option<&'a str>>,
    k: usize,
    null_label: &str,
) -> Vec<FrequencyEntry> {
    rank(value_counts(values, null_label), k)
}

fn bucket_label<'a>(value: Option<&'a str>, null_label: &'a str) -> &'a str {
    match value {
        Some(raw) if !is_missing(value) => raw,
        _ => null_label,
    }
}
