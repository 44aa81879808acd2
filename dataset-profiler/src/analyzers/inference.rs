//! Column type inference from raw string cells.
//!
//! Each column is classified as [`ColumnKind::Numeric`] or
//! [`ColumnKind::Categorical`] by sampling its leading rows. A value counts as
//! numeric only when it matches a strict decimal pattern: an optional sign,
//! digits, and optionally a single decimal point followed by more digits.
//! Scientific notation (`1e5`), thousands separators (`1,000`), bare fractions
//! (`.5`) and values with surrounding text are all non-numeric.
//!
//! [`parse_numeric`] is the single numeric coercion used across the crate, so
//! summary statistics, histograms and chart projections accept exactly the
//! values this module counts as numeric.
//!
//! # Example
//!
//! ```rust
//! use dataset_profiler::analyzers::inference::{ColumnKind, TypeInferenceEngine};
//! use dataset_profiler::dataset::Dataset;
//!
//! let dataset = Dataset::from_records(vec![
//!     vec![("price", "9.99"), ("sku", "A-1")],
//!     vec![("price", "12"), ("sku", "B-7")],
//! ])
//! .unwrap();
//!
//! let engine = TypeInferenceEngine::builder().sample_size(50).build();
//! let kinds = engine.infer_kinds(&dataset);
//!
//! assert_eq!(kinds.get("price"), Some(&ColumnKind::Numeric));
//! assert_eq!(kinds.get("sku"), Some(&ColumnKind::Categorical));
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::analyzers::missing::is_missing;
use crate::analyzers::types::ColumnMap;
use crate::dataset::Dataset;

/// Strict decimal pattern. ASCII digits only, so other Unicode digits never
/// classify a value as numeric.
static NUMERIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("numeric pattern is a valid regex")
});

/// Parses a cell into a finite `f64` under the strict numeric pattern.
///
/// Returns `None` for missing cells, values that do not match the pattern, and
/// values too large to be represented as a finite double. Surrounding
/// whitespace is ignored.
///
/// ```rust
/// use dataset_profiler::analyzers::inference::parse_numeric;
///
/// assert_eq!(parse_numeric(Some("-3.25")), Some(-3.25));
/// assert_eq!(parse_numeric(Some(" 42 ")), Some(42.0));
/// assert_eq!(parse_numeric(Some("1e5")), None);
/// assert_eq!(parse_numeric(Some("1,000")), None);
/// assert_eq!(parse_numeric(Some("NA")), None);
/// ```
pub fn parse_numeric(value: Option<&str>) -> Option<f64> {
    if is_missing(value) {
        return None;
    }
    let trimmed = value?.trim();
    if !NUMERIC_PATTERN.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns true if the cell parses under [`parse_numeric`].
pub fn is_numeric(value: Option<&str>) -> bool {
    parse_numeric(value).is_some()
}

/// The analysis path chosen for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Mostly numeric values; summarized with quantiles and binned into histograms
    Numeric,
    /// Anything else; summarized by frequency
    Categorical,
}

impl ColumnKind {
    /// Returns true for [`ColumnKind::Numeric`].
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }

    /// Get the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column name to kind, in schema order.
pub type ColumnKinds = ColumnMap<ColumnKind>;

/// Names of the columns of one kind, in schema order.
pub fn columns_of_kind(kinds: &ColumnKinds, kind: ColumnKind) -> Vec<String> {
    kinds
        .iter()
        .filter(|(_, k)| **k == kind)
        .map(|(column, _)| column.to_string())
        .collect()
}

/// Configuration for the type inference engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Number of leading rows sampled per column (default: 100)
    pub sample_size: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self { sample_size: 100 }
    }
}

/// Sample counts gathered for one column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeStats {
    pub total_samples: usize,
    pub missing_count: usize,
    pub numeric_matches: usize,
    pub non_numeric: usize,
}

impl TypeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampled values that were not missing.
    pub fn present(&self) -> usize {
        self.total_samples - self.missing_count
    }
}

/// Builder for TypeInferenceEngine
pub struct TypeInferenceEngineBuilder {
    config: InferenceConfig,
}

impl TypeInferenceEngineBuilder {
    /// Set the number of leading rows sampled per column
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Build the TypeInferenceEngine
    pub fn build(self) -> TypeInferenceEngine {
        TypeInferenceEngine {
            config: self.config,
        }
    }
}

/// Classifies dataset columns as numeric or categorical.
#[derive(Debug, Clone)]
pub struct TypeInferenceEngine {
    config: InferenceConfig,
}

impl TypeInferenceEngine {
    /// Create a new builder for TypeInferenceEngine
    pub fn builder() -> TypeInferenceEngineBuilder {
        TypeInferenceEngineBuilder {
            config: InferenceConfig::default(),
        }
    }

    /// Create a TypeInferenceEngine with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a TypeInferenceEngine from an existing configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Classify every column of a dataset, in schema order.
    #[instrument(skip(self, dataset), fields(rows = dataset.row_count(), sample_size = self.config.sample_size))]
    pub fn infer_kinds(&self, dataset: &Dataset) -> ColumnKinds {
        let kinds: ColumnKinds = dataset
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let stats = self.analyze_samples(dataset.column_at(index));
                let kind = self.determine_kind(&stats);
                debug!(
                    column = column.as_str(),
                    numeric = stats.numeric_matches,
                    non_numeric = stats.non_numeric,
                    missing = stats.missing_count,
                    kind = kind.name(),
                    "Inferred column kind"
                );
                (column.clone(), kind)
            })
            .collect();

        info!(
            numeric = columns_of_kind(&kinds, ColumnKind::Numeric).len(),
            categorical = columns_of_kind(&kinds, ColumnKind::Categorical).len(),
            "Completed type inference"
        );
        kinds
    }

    /// Classify a single column, or `None` when the column is unknown.
    pub fn infer_column(&self, dataset: &Dataset, column: &str) -> Option<ColumnKind> {
        let values = dataset.column(column)?;
        Some(self.determine_kind(&self.analyze_samples(values)))
    }

    /// Count numeric and non-numeric values among the leading samples.
    pub fn analyze_samples<'a>(&self, values: impl IntoIterator<Item = Option<&'a str>>) -> TypeStats {
        let mut stats = TypeStats::new();
        for value in values.into_iter().take(self.config.sample_size) {
            stats.total_samples += 1;
            if is_missing(value) {
                stats.missing_count += 1;
            } else if is_numeric(value) {
                stats.numeric_matches += 1;
            } else {
                stats.non_numeric += 1;
            }
        }
        stats
    }

    /// Numeric only when numeric samples strictly outnumber the rest.
    ///
    /// Ties and columns without any present sample are categorical.
    pub fn determine_kind(&self, stats: &TypeStats) -> ColumnKind {
        if stats.numeric_matches > stats.non_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

impl Default for TypeInferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}
