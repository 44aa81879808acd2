//! Per-column summary statistics.
//!
//! Numeric columns are summarized with count, mean, extrema and nearest-rank
//! quartiles; categorical columns with their non-missing count, cardinality and
//! most frequent values. Which path a column takes is decided by a
//! [`SummaryRouting`] policy.
//!
//! Summaries never fail: empty or degenerate columns produce zeroed or empty
//! summaries.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::frequency::{FrequencyCounter, FrequencyEntry};
use crate::analyzers::inference::{parse_numeric, ColumnKind, ColumnKinds};
use crate::analyzers::missing::is_missing;
use crate::analyzers::types::ColumnMap;
use crate::dataset::Dataset;

/// Distributional summary of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Number of values that parsed as numbers
    pub count: usize,
    /// Arithmetic mean; 0 when `count` is 0 by convention
    pub mean: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summarizes a set of parsed values.
    ///
    /// Quantiles use the nearest-rank rule without interpolation: `q(p)` is the
    /// element at sorted index `floor((n - 1) * p)`.
    ///
    /// ```rust
    /// use dataset_profiler::analyzers::summary::NumericSummary;
    ///
    /// let summary = NumericSummary::from_values(vec![4.0, 1.0, 3.0, 2.0]);
    /// assert_eq!(summary.count, 4);
    /// assert_eq!(summary.mean, 2.5);
    /// assert_eq!(summary.q25, 1.0);
    /// assert_eq!(summary.median, 2.0);
    /// assert_eq!(summary.q75, 3.0);
    /// ```
    pub fn from_values(mut values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let quantile = |p: f64| values[((n - 1) as f64 * p).floor() as usize];
        let sum: f64 = values.iter().sum();

        Self {
            count: n,
            mean: sum / n as f64,
            min: values[0],
            q25: quantile(0.25),
            median: quantile(0.5),
            q75: quantile(0.75),
            max: values[n - 1],
        }
    }

    /// Returns true if no value was summarized.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Frequency summary of a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Number of non-missing values
    pub count: usize,
    /// Number of distinct non-missing values
    pub distinct_count: usize,
    /// Most frequent values, descending, ties in first-seen order
    pub top_entries: Vec<FrequencyEntry>,
}

impl CategoricalSummary {
    /// Summarizes the non-missing values of a column, keeping `top` entries.
    pub fn from_values<'a>(values: impl IntoIterator<Item = Option<&'a str>>, top: usize) -> Self {
        let mut counter = FrequencyCounter::new();
        for value in values {
            if let Some(raw) = value.filter(|_| !is_missing(value)) {
                counter.add(raw);
            }
        }
        Self {
            count: counter.total(),
            distinct_count: counter.distinct(),
            top_entries: counter.into_ranked(top),
        }
    }
}

/// Summary of one column along the path chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl ColumnSummary {
    /// The kind matching this summary's path.
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnSummary::Numeric(_) => ColumnKind::Numeric,
            ColumnSummary::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericSummary> {
        match self {
            ColumnSummary::Numeric(summary) => Some(summary),
            ColumnSummary::Categorical(_) => None,
        }
    }

    pub fn as_categorical(&self) -> Option<&CategoricalSummary> {
        match self {
            ColumnSummary::Categorical(summary) => Some(summary),
            ColumnSummary::Numeric(_) => None,
        }
    }
}

/// How the summary engine chooses between the numeric and categorical path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum SummaryRouting {
    /// Re-check every non-missing value of the column; numeric when at least
    /// `threshold` of them parse as numbers.
    RatioRecheck { threshold: f64 },
    /// Follow the kinds produced by type inference.
    FollowKinds,
}

impl Default for SummaryRouting {
    fn default() -> Self {
        SummaryRouting::RatioRecheck { threshold: 0.6 }
    }
}

/// Configuration for the summary engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Path selection policy (default: 60% ratio re-check)
    pub routing: SummaryRouting,
    /// Number of top entries kept for categorical columns (default: 5)
    pub top_entries: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            routing: SummaryRouting::default(),
            top_entries: 5,
        }
    }
}

/// Computes a summary for every column of a dataset.
#[derive(Debug, Clone, Default)]
pub struct SummaryEngine {
    config: SummaryConfig,
}

impl SummaryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SummaryConfig) -> Self {
        Self { config }
    }

    /// Sets the routing policy.
    pub fn routing(mut self, routing: SummaryRouting) -> Self {
        self.config.routing = routing;
        self
    }

    /// Sets how many top entries categorical summaries keep.
    pub fn top_entries(mut self, top: usize) -> Self {
        self.config.top_entries = top;
        self
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Summarizes every column.
    ///
    /// A dataset without rows yields an empty map, including header-only
    /// datasets.
    #[instrument(skip(self, dataset, kinds), fields(rows = dataset.row_count(), columns = dataset.column_count()))]
    pub fn summarize(&self, dataset: &Dataset, kinds: &ColumnKinds) -> ColumnMap<ColumnSummary> {
        if dataset.is_empty() {
            return ColumnMap::new();
        }

        dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let kind = kinds.get(column).copied().unwrap_or(ColumnKind::Categorical);
                let summary = self.summarize_values(dataset.column_at(index), kind);
                debug!(column = column.as_str(), path = summary.kind().name(), "Summarized column");
                (column.clone(), summary)
            })
            .collect()
    }

    /// Summarizes one column's values. `kind` is only consulted under
    /// [`SummaryRouting::FollowKinds`].
    pub fn summarize_values<'a, I>(&self, values: I, kind: ColumnKind) -> ColumnSummary
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let present: Vec<&str> = values
            .into_iter()
            .filter(|value| !is_missing(*value))
            .flatten()
            .collect();
        let parsed: Vec<f64> = present.iter().filter_map(|v| parse_numeric(Some(v))).collect();

        let numeric = match self.config.routing {
            SummaryRouting::RatioRecheck { threshold } => {
                parsed.len() as f64 >= present.len() as f64 * threshold
            }
            SummaryRouting::FollowKinds => kind.is_numeric(),
        };

        if numeric {
            ColumnSummary::Numeric(NumericSummary::from_values(parsed))
        } else {
            ColumnSummary::Categorical(CategoricalSummary::from_values(
                present.into_iter().map(Some),
                self.config.top_entries,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::inference::TypeInferenceEngine;

    #[test]
    fn test_nearest_rank_quantiles() {
        let summary = NumericSummary::from_values((1..=10).map(f64::from).collect());
        // floor(9 * p): 2, 4, 6
        assert_eq!(summary.q25, 3.0);
        assert_eq!(summary.median, 5.0);
        assert_eq!(summary.q75, 7.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 10.0);
        assert_eq!(summary.mean, 5.5);
    }

    #[test]
    fn test_single_value_summary() {
        let summary = NumericSummary::from_values(vec![7.5]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.min, 7.5);
        assert_eq!(summary.median, 7.5);
        assert_eq!(summary.max, 7.5);
    }

    #[test]
    fn test_empty_numeric_summary_is_zeroed() {
        let summary = NumericSummary::from_values(Vec::new());
        assert!(summary.is_empty());
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn test_categorical_summary_excludes_missing() {
        let values = vec![Some("x"), Some("y"), None, Some("x"), Some("NA"), Some("z")];
        let summary = CategoricalSummary::from_values(values, 2);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.distinct_count, 3);
        assert_eq!(
            summary.top_entries,
            vec![FrequencyEntry::new("x", 2), FrequencyEntry::new("y", 1)]
        );
    }

    #[test]
    fn test_ratio_recheck_routes_mostly_numeric() {
        let engine = SummaryEngine::new();
        // 3 of 5 parse: exactly 60%
        let values = vec![Some("1"), Some("2"), Some("3"), Some("a"), Some("b")];
        let summary = engine.summarize_values(values, ColumnKind::Categorical);
        let numeric = summary.as_numeric().expect("numeric path");
        assert_eq!(numeric.count, 3);
        assert_eq!(numeric.mean, 2.0);
    }

    #[test]
    fn test_ratio_recheck_routes_mostly_text() {
        let engine = SummaryEngine::new();
        let values = vec![Some("1"), Some("a"), Some("b")];
        let summary = engine.summarize_values(values, ColumnKind::Numeric);
        assert_eq!(summary.kind(), ColumnKind::Categorical);
        assert_eq!(summary.as_categorical().unwrap().count, 3);
    }

    #[test]
    fn test_follow_kinds_routing() {
        let engine = SummaryEngine::new().routing(SummaryRouting::FollowKinds);
        let values = vec![Some("1"), Some("2"), Some("3"), Some("a"), Some("b")];
        let summary = engine.summarize_values(values, ColumnKind::Categorical);
        assert_eq!(summary.kind(), ColumnKind::Categorical);
    }

    #[test]
    fn test_all_missing_column_takes_numeric_path_with_zeroes() {
        let engine = SummaryEngine::new();
        let summary = engine.summarize_values(vec![None, Some(""), Some("na")], ColumnKind::Categorical);
        assert_eq!(summary, ColumnSummary::Numeric(NumericSummary::default()));
    }

    #[test]
    fn test_summarize_dataset() {
        let dataset = Dataset::from_records(vec![
            vec![("a", "1"), ("b", "x")],
            vec![("a", "2"), ("b", "y")],
            vec![("a", ""), ("b", "x")],
        ])
        .unwrap();
        let kinds = TypeInferenceEngine::new().infer_kinds(&dataset);
        let summaries = SummaryEngine::new().summarize(&dataset, &kinds);

        let a = summaries.get("a").unwrap().as_numeric().unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.mean, 1.5);
        let b = summaries.get("b").unwrap().as_categorical().unwrap();
        assert_eq!(b.count, 3);
        assert_eq!(b.distinct_count, 2);
    }

    #[test]
    fn test_header_only_dataset_has_no_summaries() {
        let dataset = Dataset::with_columns(["a", "b"]).unwrap();
        let kinds = TypeInferenceEngine::new().infer_kinds(&dataset);
        assert!(SummaryEngine::new().summarize(&dataset, &kinds).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let summary = ColumnSummary::Numeric(NumericSummary::from_values(vec![1.0]));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "numeric");
        assert_eq!(json["count"], 1);
    }
}
