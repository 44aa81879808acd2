//! Prelude for commonly used types and traits in dataset-profiler.

pub use crate::analyzers::{
    BinCount, ColumnKind, ColumnKinds, ColumnSummary, FrequencyEntry, SummaryEngine,
    TypeInferenceEngine,
};
pub use crate::chart::{ChartDataset, ChartMode, ChartProjectionBuilder, ChartRequest};
pub use crate::dataset::{CsvOptions, Dataset, DatasetId};
pub use crate::error::{ProfileError, Result};
pub use crate::formatters::{FormatterConfig, HumanFormatter, JsonFormatter, ProfileFormatter};
pub use crate::logging::LogConfig;
pub use crate::profiler::{DatasetProfile, DatasetProfiler, ProfileConfig};
pub use crate::session::AnalysisSession;
