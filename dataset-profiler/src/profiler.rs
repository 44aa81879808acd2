//! Whole-dataset profiling.
//!
//! [`DatasetProfiler`] runs every analyzer over a dataset and collects the
//! results into one serializable [`DatasetProfile`]: column kinds, summaries,
//! null counts and duplicate rows.
//!
//! # Example
//!
//! ```rust
//! use dataset_profiler::analyzers::ColumnKind;
//! use dataset_profiler::dataset::Dataset;
//! use dataset_profiler::profiler::DatasetProfiler;
//!
//! let dataset = Dataset::from_csv_str("id,city\n1,Oslo\n2,\n2,\n").unwrap();
//! let profile = DatasetProfiler::builder().top_entries(3).build().profile(&dataset);
//!
//! assert_eq!(profile.row_count, 3);
//! assert_eq!(profile.duplicate_rows, 1);
//! assert_eq!(profile.kinds.get("id"), Some(&ColumnKind::Numeric));
//! assert_eq!(profile.null_counts.get("city"), Some(&2));
//! ```

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::analyzers::duplicates::count_duplicates;
use crate::analyzers::frequency::{DEFAULT_TOP_K, NULL_LABEL};
use crate::analyzers::histogram::{DEFAULT_BINS, MAX_BINS};
use crate::analyzers::inference::{ColumnKind, ColumnKinds, InferenceConfig, TypeInferenceEngine};
use crate::analyzers::missing::count_nulls;
use crate::analyzers::summary::{ColumnSummary, SummaryConfig, SummaryEngine, SummaryRouting};
use crate::analyzers::types::ColumnMap;
use crate::chart::CHART_HISTOGRAM_BINS;
use crate::dataset::{Dataset, DatasetId};
use crate::error::{ProfileError, Result};
use crate::logging::{truncate_field, LogConfig};

/// Default number of rows shown in a table preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 1000;

/// Configuration shared by the profiler and the analysis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub inference: InferenceConfig,
    pub summary: SummaryConfig,
    /// Entries in top-k rankings (default: 15)
    pub top_k: usize,
    /// Bins in standalone histograms (default: 10)
    pub histogram_bins: usize,
    /// Bins when a bar chart falls back to a histogram (default: 12)
    pub chart_histogram_bins: usize,
    /// Label missing values are counted under (default: `(null)`)
    pub null_label: String,
    /// Rows returned by table previews (default: 1000)
    pub preview_rows: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            summary: SummaryConfig::default(),
            top_k: DEFAULT_TOP_K,
            histogram_bins: DEFAULT_BINS,
            chart_histogram_bins: CHART_HISTOGRAM_BINS,
            null_label: NULL_LABEL.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl ProfileConfig {
    /// Checks that every count is usable.
    pub fn validate(&self) -> Result<()> {
        if self.inference.sample_size == 0 {
            return Err(ProfileError::invalid_config("inference sample size must be positive"));
        }
        for (name, bins) in [
            ("histogram_bins", self.histogram_bins),
            ("chart_histogram_bins", self.chart_histogram_bins),
        ] {
            if !(1..=MAX_BINS).contains(&bins) {
                return Err(ProfileError::invalid_config(format!(
                    "{name} must be between 1 and {MAX_BINS}, got {bins}"
                )));
            }
        }
        if let SummaryRouting::RatioRecheck { threshold } = self.summary.routing {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ProfileError::invalid_config(format!(
                    "summary ratio threshold {threshold} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Parses a configuration from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn type_inference_engine(&self) -> TypeInferenceEngine {
        TypeInferenceEngine::with_config(self.inference.clone())
    }

    pub fn summary_engine(&self) -> SummaryEngine {
        SummaryEngine::with_config(self.summary.clone())
    }
}

/// Builder for [`DatasetProfiler`].
#[derive(Debug, Clone, Default)]
pub struct DatasetProfilerBuilder {
    config: ProfileConfig,
    log_config: LogConfig,
}

impl DatasetProfilerBuilder {
    /// Set the number of rows sampled for type inference
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.inference.sample_size = size;
        self
    }

    /// Set how summaries choose between the numeric and categorical path
    pub fn routing(mut self, routing: SummaryRouting) -> Self {
        self.config.summary.routing = routing;
        self
    }

    /// Set the number of top entries kept in categorical summaries
    pub fn top_entries(mut self, top: usize) -> Self {
        self.config.summary.top_entries = top;
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ProfileConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how much the profiler logs
    pub fn log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn build(self) -> DatasetProfiler {
        DatasetProfiler {
            config: self.config,
            log_config: self.log_config,
        }
    }
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    /// Fraction of rows that are missing, in `[0, 1]`
    pub null_percentage: f64,
    /// Absent when the dataset has no rows
    pub summary: Option<ColumnSummary>,
}

/// Complete profile of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub dataset_id: DatasetId,
    pub row_count: usize,
    pub column_count: usize,
    pub kinds: ColumnKinds,
    pub summaries: ColumnMap<ColumnSummary>,
    pub null_counts: ColumnMap<usize>,
    pub duplicate_rows: usize,
    pub profiled_at: DateTime<Utc>,
    pub profiling_time_ms: u64,
}

impl DatasetProfile {
    /// Per-column view, in schema order.
    pub fn columns(&self) -> Vec<ColumnProfile> {
        self.kinds
            .iter()
            .map(|(name, kind)| {
                let null_count = self.null_counts.get(name).copied().unwrap_or(0);
                ColumnProfile {
                    name: name.to_string(),
                    kind: *kind,
                    null_count,
                    null_percentage: null_percentage(null_count, self.row_count),
                    summary: self.summaries.get(name).cloned(),
                }
            })
            .collect()
    }

    /// Returns true if the profiled dataset had no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Fraction of `rows` that are missing; 0 for an empty dataset.
pub fn null_percentage(null_count: usize, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        null_count as f64 / rows as f64
    }
}

/// Runs every analyzer over a dataset.
#[derive(Debug, Clone, Default)]
pub struct DatasetProfiler {
    config: ProfileConfig,
    log_config: LogConfig,
}

impl DatasetProfiler {
    pub fn builder() -> DatasetProfilerBuilder {
        DatasetProfilerBuilder::default()
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfileConfig) -> Self {
        Self {
            config,
            log_config: LogConfig::default(),
        }
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    /// Profiles a dataset, inferring column kinds first.
    #[instrument(skip(self, dataset), fields(dataset_id = %dataset.id()))]
    pub fn profile(&self, dataset: &Dataset) -> DatasetProfile {
        let kinds = self.config.type_inference_engine().infer_kinds(dataset);
        self.profile_with_kinds(dataset, kinds)
    }

    /// Profiles a dataset whose column kinds are already known.
    pub fn profile_with_kinds(&self, dataset: &Dataset, kinds: ColumnKinds) -> DatasetProfile {
        let start_time = Instant::now();
        crate::log_data_op!(
            self.log_config,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Starting dataset profiling"
        );

        let summaries = self.config.summary_engine().summarize(dataset, &kinds);
        let null_counts = count_nulls(dataset);
        let duplicate_rows = count_duplicates(dataset);
        debug!(duplicate_rows, "Counted duplicate rows");

        for (column, summary) in summaries.iter() {
            crate::log_column!(
                self.log_config,
                column = %truncate_field(column, self.log_config.max_field_length),
                kind = summary.kind().name(),
                detail = %truncate_field(&describe(summary), self.log_config.max_field_length),
                "Profiled column"
            );
        }

        let profiling_time_ms = start_time.elapsed().as_millis() as u64;
        info!(time_ms = profiling_time_ms, duplicate_rows, "Completed dataset profiling");

        DatasetProfile {
            dataset_id: dataset.id().clone(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            kinds,
            summaries,
            null_counts,
            duplicate_rows,
            profiled_at: Utc::now(),
            profiling_time_ms,
        }
    }
}

fn describe(summary: &ColumnSummary) -> String {
    match summary {
        ColumnSummary::Numeric(s) => format!("count={} mean={}", s.count, s.mean),
        ColumnSummary::Categorical(s) => match s.top_entries.first() {
            Some(top) => format!("distinct={} top={}", s.distinct_count, top.label),
            None => format!("distinct={}", s.distinct_count),
        },
    }
}
