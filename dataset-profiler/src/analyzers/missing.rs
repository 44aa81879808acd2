//! The canonical missing-value predicate.
//!
//! Every analyzer in the crate decides "is this cell missing?" through
//! [`is_missing`]. Summary statistics, type inference, histograms, frequency
//! tables and chart projections therefore agree on which cells carry no data.

use tracing::{debug, instrument};

use crate::analyzers::types::ColumnMap;
use crate::dataset::Dataset;

/// Literal tokens that denote a missing value, compared case-insensitively.
pub const MISSING_TOKENS: [&str; 3] = ["na", "nan", "null"];

/// Returns true when a cell represents "no data".
///
/// A cell is missing when it is absent, empty (after trimming surrounding
/// whitespace), or one of [`MISSING_TOKENS`] in any letter case.
///
/// ```rust
/// use dataset_profiler::analyzers::missing::is_missing;
///
/// assert!(is_missing(None));
/// assert!(is_missing(Some("")));
/// assert!(is_missing(Some("NaN")));
/// assert!(!is_missing(Some("0")));
/// ```
pub fn is_missing(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(raw) => {
            let trimmed = raw.trim();
            trimmed.is_empty()
                || MISSING_TOKENS
                    .iter()
                    .any(|token| trimmed.eq_ignore_ascii_case(token))
        }
    }
}

/// Counts missing cells in a sequence of values.
pub fn null_count<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> usize {
    values.into_iter().filter(|value| is_missing(*value)).count()
}

/// Counts missing cells per column, in schema order.
///
/// An empty dataset yields zero for every column it declares.
#[instrument(skip(dataset), fields(rows = dataset.row_count(), columns = dataset.column_count()))]
pub fn count_nulls(dataset: &Dataset) -> ColumnMap<usize> {
    let counts: ColumnMap<usize> = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| (column.clone(), null_count(dataset.column_at(index))))
        .collect();

    debug!(
        columns_with_nulls = counts.iter().filter(|(_, count)| **count > 0).count(),
        "Counted missing values"
    );
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_are_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some("")));
        assert!(is_missing(Some("   ")));
    }

    #[test]
    fn test_tokens_are_case_insensitive() {
        for token in ["na", "NA", "Na", "nan", "NaN", "NAN", "null", "NULL", "Null"] {
            assert!(is_missing(Some(token)), "expected {token} to be missing");
        }
        assert!(is_missing(Some(" null ")));
    }

    #[test]
    fn test_real_values_are_present() {
        for value in ["0", "n/a", "none", "nil", "-", "nana", "x"] {
            assert!(!is_missing(Some(value)), "expected {value} to be present");
        }
    }

    #[test]
    fn test_null_count() {
        let values = vec![Some("1"), None, Some("NA"), Some("2"), Some("")];
        assert_eq!(null_count(values), 3);
    }
}
