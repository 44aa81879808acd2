//! Column analyzers that derive a profile from a [`Dataset`](crate::dataset::Dataset).
//!
//! Every analyzer is a pure function of the dataset it is given. Derived
//! structures are recomputed from scratch whenever the dataset changes.
//!
//! ## Available Analyzers
//!
//! - **Missing values** (`missing`): the single predicate deciding what counts as "no data"
//! - **Type inference** (`inference`): classifies columns as numeric or categorical from a sample
//! - **Summaries** (`summary`): quartiles and mean for numeric columns, cardinality and top values for categorical ones
//! - **Histograms** (`histogram`): equal-width binning of numeric columns
//! - **Frequencies** (`frequency`): top-k rankings with missing values bucketed under one label
//! - **Duplicates** (`duplicates`): counts rows that repeat an earlier row
//!
//! ## Canonical Rules
//!
//! All analyzers share one definition of a missing value ([`is_missing`]) and
//! one numeric coercion ([`parse_numeric`]). A value such as `"1e5"` or
//! `"1,000"` is text everywhere, not numeric in one place and text in another.
//!
//! ## Example Usage
//!
//! ```rust
//! use dataset_profiler::analyzers::{
//!     count_duplicates, count_nulls, top_k, ColumnKind, SummaryEngine, TypeInferenceEngine,
//! };
//! use dataset_profiler::dataset::Dataset;
//!
//! let dataset = Dataset::from_records(vec![
//!     vec![("a", "1"), ("b", "x")],
//!     vec![("a", "2"), ("b", "y")],
//!     vec![("a", ""), ("b", "x")],
//! ])
//! .unwrap();
//!
//! let kinds = TypeInferenceEngine::new().infer_kinds(&dataset);
//! assert_eq!(kinds.get("a"), Some(&ColumnKind::Numeric));
//! assert_eq!(kinds.get("b"), Some(&ColumnKind::Categorical));
//!
//! assert_eq!(count_nulls(&dataset).get("a"), Some(&1));
//! assert_eq!(count_duplicates(&dataset), 0);
//!
//! let ranked = top_k(dataset.column("b").unwrap(), 5);
//! assert_eq!(ranked[0].label, "x");
//! assert_eq!(ranked[0].count, 2);
//!
//! let summaries = SummaryEngine::new().summarize(&dataset, &kinds);
//! assert_eq!(summaries.len(), 2);
//! ```

pub mod duplicates;
pub mod frequency;
pub mod histogram;
pub mod inference;
pub mod missing;
pub mod summary;
pub mod types;

pub use duplicates::{count_duplicates, duplicate_groups, DuplicateGroup};
pub use frequency::{
    top_k, top_k_with_label, value_counts, FrequencyCounter, FrequencyEntry, DEFAULT_TOP_K,
    NULL_LABEL,
};
pub use histogram::{histogram, histogram_values, Bin, BinCount};
pub use inference::{
    columns_of_kind, is_numeric, parse_numeric, ColumnKind, ColumnKinds, InferenceConfig,
    TypeInferenceEngine, TypeInferenceEngineBuilder, TypeStats,
};
pub use missing::{count_nulls, is_missing, null_count};
pub use summary::{
    CategoricalSummary, ColumnSummary, NumericSummary, SummaryConfig, SummaryEngine,
    SummaryRouting,
};
pub use types::ColumnMap;
