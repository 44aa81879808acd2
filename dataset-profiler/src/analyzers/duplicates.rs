//! Exact duplicate row detection.
//!
//! Rows are compared on their parsed cells, which are stored in schema order,
//! so two records that listed the same fields in a different order compare
//! equal. An absent cell and an empty one are different values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::dataset::{Dataset, Row};

/// A set of identical rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Position of the first occurrence
    pub first_index: usize,
    /// Total number of identical rows, including the first
    pub occurrences: usize,
}

impl DuplicateGroup {
    /// Copies beyond the first occurrence.
    pub fn excess(&self) -> usize {
        self.occurrences - 1
    }
}

/// Number of rows that repeat an earlier row.
///
/// A group of `m` identical rows contributes `m - 1`.
#[instrument(skip(dataset), fields(rows = dataset.row_count()))]
pub fn count_duplicates(dataset: &Dataset) -> usize {
    duplicate_groups(dataset).iter().map(DuplicateGroup::excess).sum()
}

/// Every group of two or more identical rows, ordered by first occurrence.
pub fn duplicate_groups(dataset: &Dataset) -> Vec<DuplicateGroup> {
    let mut seen: HashMap<&Row, usize> = HashMap::with_capacity(dataset.row_count());
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for (index, row) in dataset.rows().iter().enumerate() {
        match seen.get(row) {
            Some(&group) => groups[group].occurrences += 1,
            None => {
                seen.insert(row, groups.len());
                groups.push(DuplicateGroup {
                    first_index: index,
                    occurrences: 1,
                });
            }
        }
    }

    groups.retain(|group| group.occurrences > 1);
    groups
}
