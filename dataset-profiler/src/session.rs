//! Analysis session holding the current dataset and the user's selections.
//!
//! An [`AnalysisSession`] owns one dataset at a time together with the
//! parameters a dashboard lets a user change: x/y columns, chart mode, bin
//! count and top-k size. Every derived structure is a pure function of the
//! dataset and those parameters. Chart projections and the profile report are
//! memoized under the dataset's content id, so loading a different dataset
//! invalidates them and reloading identical content does not.
//!
//! # Example
//!
//! ```rust
//! use dataset_profiler::chart::{ChartDataset, ChartMode};
//! use dataset_profiler::dataset::Dataset;
//! use dataset_profiler::session::AnalysisSession;
//!
//! let mut session = AnalysisSession::new();
//! session.load(Dataset::from_csv_str("city,temp\nOslo,3\nRome,18\n").unwrap());
//!
//! // x defaults to the first column, y to the first numeric one
//! assert_eq!(session.selection().x.as_deref(), Some("city"));
//! assert_eq!(session.selection().y.as_deref(), Some("temp"));
//!
//! session.set_mode(ChartMode::Line);
//! assert!(matches!(&*session.chart(), ChartDataset::Line(series) if series.len() == 2));
//! assert!(session.set_x("country").is_err());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::analyzers::duplicates::count_duplicates;
use crate::analyzers::frequency::{top_k_with_label, FrequencyEntry};
use crate::analyzers::histogram::{histogram, Bin, BinCount};
use crate::analyzers::inference::{ColumnKind, ColumnKinds};
use crate::analyzers::missing::count_nulls;
use crate::analyzers::summary::ColumnSummary;
use crate::analyzers::types::ColumnMap;
use crate::chart::{ChartDataset, ChartMode, ChartProjectionBuilder, ChartRequest};
use crate::dataset::{Dataset, DatasetId, Row};
use crate::error::{ProfileError, Result};
use crate::profiler::{DatasetProfile, DatasetProfiler, ProfileConfig};

/// Default capacity of the chart projection cache.
pub const DEFAULT_CACHE_ENTRIES: usize = 64;

/// The user-chosen parameters of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub x: Option<String>,
    pub y: Option<String>,
    pub mode: ChartMode,
    pub bins: BinCount,
    pub top_k: usize,
}

impl Selection {
    /// Default selection for a dataset: x is the first column, y the first
    /// numeric column, else the second column.
    fn defaults(dataset: &Dataset, kinds: &ColumnKinds, config: &ProfileConfig) -> Self {
        let columns = dataset.columns();
        let first_numeric = kinds
            .iter()
            .find(|(_, kind)| **kind == ColumnKind::Numeric)
            .map(|(column, _)| column.to_string());

        Self {
            x: columns.first().cloned(),
            y: first_numeric.or_else(|| columns.get(1).cloned()),
            mode: ChartMode::default(),
            bins: BinCount::Fixed(config.histogram_bins),
            top_k: config.top_k,
        }
    }

    /// The chart request this selection describes.
    pub fn chart_request(&self) -> ChartRequest {
        ChartRequest {
            mode: self.mode,
            x: self.x.clone(),
            y: self.y.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Arc<ChartDataset>,
    tick: u64,
}

/// Memoizes chart projections by dataset id and request.
#[derive(Debug)]
pub struct ProjectionCache {
    cache: HashMap<(DatasetId, ChartRequest), CacheEntry>,
    max_entries: usize,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl ProjectionCache {
    /// Creates a cache holding at most `max_entries` projections.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            cache: HashMap::new(),
            max_entries: max_entries.max(1),
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Gets a projection, marking it as recently used.
    pub fn get(&mut self, id: &DatasetId, request: &ChartRequest) -> Option<Arc<ChartDataset>> {
        self.tick += 1;
        let tick = self.tick;
        match self.cache.get_mut(&(id.clone(), request.clone())) {
            Some(entry) => {
                entry.tick = tick;
                self.hits += 1;
                Some(Arc::clone(&entry.value))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores a projection, evicting the least recently used one at capacity.
    pub fn insert(&mut self, id: DatasetId, request: ChartRequest, value: Arc<ChartDataset>) {
        if self.cache.len() >= self.max_entries {
            self.evict_oldest();
        }
        self.tick += 1;
        self.cache.insert(
            (id, request),
            CacheEntry {
                value,
                tick: self.tick,
            },
        );
    }

    /// Drops every entry that does not belong to `id`.
    pub fn retain_dataset(&mut self, id: &DatasetId) {
        self.cache.retain(|(entry_id, _), _| entry_id == id);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.cache.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self
            .cache
            .iter()
            .min_by_key(|(_, entry)| entry.tick)
            .map(|(key, _)| key.clone())
        {
            self.cache.remove(&oldest);
        }
    }
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_ENTRIES)
    }
}

/// Counters describing cache usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// The current dataset plus the parameters chosen over it.
#[derive(Debug)]
pub struct AnalysisSession {
    dataset: Arc<Dataset>,
    kinds: ColumnKinds,
    selection: Selection,
    config: ProfileConfig,
    charts: ProjectionCache,
    profile: Option<Arc<DatasetProfile>>,
}

impl AnalysisSession {
    /// Creates a session with no data and the default configuration.
    pub fn new() -> Self {
        Self::build(ProfileConfig::default())
    }

    /// Creates a session with a custom configuration.
    pub fn with_config(config: ProfileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ProfileConfig) -> Self {
        let dataset = Arc::new(Dataset::empty());
        let kinds = ColumnKinds::new();
        let selection = Selection::defaults(&dataset, &kinds, &config);
        Self {
            dataset,
            kinds,
            selection,
            config,
            charts: ProjectionCache::default(),
            profile: None,
        }
    }

    /// Replaces the dataset wholesale and resets the selection.
    #[instrument(skip(self, dataset))]
    pub fn load(&mut self, dataset: impl Into<Arc<Dataset>>) {
        let dataset = dataset.into();
        if dataset.id() != self.dataset.id() {
            self.charts.retain_dataset(dataset.id());
            self.profile = None;
        }

        self.kinds = self.config.type_inference_engine().infer_kinds(&dataset);
        self.dataset = dataset;
        self.reset_selection();

        info!(
            dataset_id = %self.dataset.id(),
            rows = self.dataset.row_count(),
            columns = self.dataset.column_count(),
            "Loaded dataset into session"
        );
    }

    /// Returns to the "no data yet" state.
    pub fn clear(&mut self) {
        self.load(Dataset::empty());
        self.charts.clear();
    }

    /// Restores the default x/y columns, chart mode, bin count and top-k size.
    pub fn reset_selection(&mut self) {
        self.selection = Selection::defaults(&self.dataset, &self.kinds, &self.config);
        debug!(x = ?self.selection.x, y = ?self.selection.y, "Reset selection");
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn kinds(&self) -> &ColumnKinds {
        &self.kinds
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Returns true if no rows are loaded.
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Selects the x column.
    pub fn set_x(&mut self, column: &str) -> Result<()> {
        self.selection.x = Some(self.known_column(column)?);
        Ok(())
    }

    /// Selects the y column.
    pub fn set_y(&mut self, column: &str) -> Result<()> {
        self.selection.y = Some(self.known_column(column)?);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: ChartMode) {
        self.selection.mode = mode;
    }

    pub fn set_bins(&mut self, bins: impl Into<BinCount>) {
        self.selection.bins = bins.into();
    }

    pub fn set_top_k(&mut self, k: usize) {
        self.selection.top_k = k;
    }

    fn known_column(&self, column: &str) -> Result<String> {
        if self.dataset.has_column(column) {
            Ok(column.to_string())
        } else {
            Err(ProfileError::column_not_found(column))
        }
    }

    /// The chart for the current selection.
    pub fn chart(&mut self) -> Arc<ChartDataset> {
        let request = self.selection.chart_request();
        self.chart_for(&request)
    }

    /// The chart for an explicit request, memoized per dataset.
    pub fn chart_for(&mut self, request: &ChartRequest) -> Arc<ChartDataset> {
        let id = self.dataset.id().clone();
        if let Some(cached) = self.charts.get(&id, request) {
            debug!(mode = ?request.mode, "Chart projection cache hit");
            return cached;
        }

        let projection = Arc::new(
            ChartProjectionBuilder::new(&self.dataset, &self.kinds)
                .histogram_bins(self.config.chart_histogram_bins)
                .null_label(self.config.null_label.clone())
                .build(request),
        );
        self.charts.insert(id, request.clone(), Arc::clone(&projection));
        projection
    }

    /// The full profile report, computed once per dataset.
    pub fn profile(&mut self) -> Arc<DatasetProfile> {
        if let Some(profile) = &self.profile {
            return Arc::clone(profile);
        }
        let profile = Arc::new(
            DatasetProfiler::with_config(self.config.clone())
                .profile_with_kinds(&self.dataset, self.kinds.clone()),
        );
        self.profile = Some(Arc::clone(&profile));
        profile
    }

    /// Histogram of the selected x column with the selected bin count.
    pub fn histogram(&self) -> Vec<Bin> {
        match &self.selection.x {
            Some(x) => histogram(&self.dataset, x, self.selection.bins),
            None => Vec::new(),
        }
    }

    /// Top-k ranking of the selected x column.
    pub fn top_k(&self) -> Vec<FrequencyEntry> {
        let Some(values) = self.selection.x.as_deref().and_then(|x| self.dataset.column(x)) else {
            return Vec::new();
        };
        top_k_with_label(values, self.selection.top_k, &self.config.null_label)
    }

    pub fn summaries(&mut self) -> ColumnMap<ColumnSummary> {
        self.profile().summaries.clone()
    }

    pub fn null_counts(&self) -> ColumnMap<usize> {
        count_nulls(&self.dataset)
    }

    pub fn duplicate_count(&self) -> usize {
        count_duplicates(&self.dataset)
    }

    /// Rows for a table preview, capped at the configured preview size.
    pub fn preview(&self) -> &[Row] {
        self.dataset.head(self.config.preview_rows)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.charts.stats()
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        Dataset::from_csv_str("city,temp,rain\nOslo,3,1.5\nRome,18,0.0\nOslo,5,0.2\n").unwrap()
    }

    #[test]
    fn test_new_session_has_no_data() {
        let mut session = AnalysisSession::new();
        assert!(session.is_empty());
        assert_eq!(session.selection().x, None);
        assert_eq!(session.selection().y, None);
        assert_eq!(*session.chart(), ChartDataset::Empty);
        assert!(session.histogram().is_empty());
        assert!(session.top_k().is_empty());
        assert!(session.summaries().is_empty());
        assert_eq!(session.duplicate_count(), 0);
    }

    #[test]
    fn test_default_selection_prefers_numeric_y() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        assert_eq!(session.selection().x.as_deref(), Some("city"));
        assert_eq!(session.selection().y.as_deref(), Some("temp"));
        assert_eq!(session.selection().bins, BinCount::Fixed(10));
        assert_eq!(session.selection().top_k, 15);
    }

    #[test]
    fn test_default_y_falls_back_to_second_column() {
        let mut session = AnalysisSession::new();
        session.load(Dataset::from_csv_str("a,b\nx,y\n").unwrap());
        assert_eq!(session.selection().y.as_deref(), Some("b"));

        session.load(Dataset::from_csv_str("only\nx\n").unwrap());
        assert_eq!(session.selection().y, None);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        let err = session.set_y("wind").unwrap_err();
        assert!(matches!(err, ProfileError::ColumnNotFound { ref column } if column == "wind"));
        assert_eq!(session.selection().y.as_deref(), Some("temp"));
    }

    #[test]
    fn test_reset_selection() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        session.set_x("rain").unwrap();
        session.set_mode(ChartMode::Scatter);
        session.set_bins(3);
        session.reset_selection();
        assert_eq!(session.selection().x.as_deref(), Some("city"));
        assert_eq!(session.selection().mode, ChartMode::Bar);
        assert_eq!(session.selection().bins, BinCount::Fixed(10));
    }

    #[test]
    fn test_chart_is_memoized() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        let first = session.chart();
        let second = session.chart();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(session.cache_stats().hits, 1);
        assert_eq!(session.cache_stats().misses, 1);
    }

    #[test]
    fn test_new_dataset_invalidates_cached_results() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        let chart = session.chart();
        let profile = session.profile();

        session.load(Dataset::from_csv_str("city,temp\nLima,21\n").unwrap());
        assert!(!Arc::ptr_eq(&chart, &session.chart()));
        assert_ne!(profile.dataset_id, session.profile().dataset_id);
        assert_eq!(session.cache_stats().entries, 1);
    }

    #[test]
    fn test_reloading_same_content_keeps_profile() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        let profile = session.profile();
        session.load(weather());
        assert!(Arc::ptr_eq(&profile, &session.profile()));
    }

    #[test]
    fn test_histogram_and_top_k_follow_selection() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        assert_eq!(session.top_k()[0], FrequencyEntry::new("Oslo", 2));

        session.set_x("temp").unwrap();
        session.set_bins(BinCount::SquareRoot);
        let bins = session.histogram();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_preview_is_capped() {
        let config = ProfileConfig {
            preview_rows: 2,
            ..ProfileConfig::default()
        };
        let mut session = AnalysisSession::with_config(config).unwrap();
        session.load(weather());
        assert_eq!(session.preview().len(), 2);
    }

    #[test]
    fn test_clear_returns_to_empty_state() {
        let mut session = AnalysisSession::new();
        session.load(weather());
        session.chart();
        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.selection().x, None);
        assert!(session.null_counts().is_empty());
        assert_eq!(session.cache_stats().entries, 0);
    }

    #[test]
    fn test_projection_cache_evicts_least_recently_used() {
        let id = Dataset::empty().id().clone();
        let mut cache = ProjectionCache::with_capacity(2);
        cache.insert(id.clone(), ChartRequest::bar("a"), Arc::new(ChartDataset::Empty));
        cache.insert(id.clone(), ChartRequest::bar("b"), Arc::new(ChartDataset::Empty));
        assert!(cache.get(&id, &ChartRequest::bar("a")).is_some());
        cache.insert(id.clone(), ChartRequest::bar("c"), Arc::new(ChartDataset::Empty));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&id, &ChartRequest::bar("a")).is_some());
        assert!(cache.get(&id, &ChartRequest::bar("b")).is_none());
    }
}
