//! Chart-ready projections of a dataset.
//!
//! A [`ChartRequest`] names a chart mode and the selected x/y columns; the
//! [`ChartProjectionBuilder`] turns it into the series a renderer draws. Any
//! request that cannot be satisfied (no data, unknown column, no y selected)
//! yields [`ChartDataset::Empty`] instead of an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::frequency::{rank, value_counts, FrequencyEntry, NULL_LABEL};
use crate::analyzers::histogram::{histogram_values, Bin, BinCount};
use crate::analyzers::inference::{parse_numeric, ColumnKind, ColumnKinds};
use crate::dataset::Dataset;

/// Bin count used when a bar chart falls back to a histogram.
pub const CHART_HISTOGRAM_BINS: usize = 12;

/// The three chart shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    /// Category bars for categorical x, a histogram for numeric x
    #[default]
    Bar,
    Line,
    Scatter,
}

/// Parameters selecting one chart projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartRequest {
    pub mode: ChartMode,
    pub x: Option<String>,
    pub y: Option<String>,
}

impl ChartRequest {
    pub fn bar(x: impl Into<String>) -> Self {
        Self {
            mode: ChartMode::Bar,
            x: Some(x.into()),
            y: None,
        }
    }

    pub fn line(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            mode: ChartMode::Line,
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    pub fn scatter(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            mode: ChartMode::Scatter,
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }
}

/// One point of a line series. `y` is `None` where the row's y value does not
/// parse as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    /// Raw x value, untransformed
    pub x: Option<String>,
    pub y: Option<f64>,
}

/// A line series with one point per row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSeries {
    pub points: Vec<LinePoint>,
}

impl LineSeries {
    /// Number of points without a y value.
    pub fn gap_count(&self) -> usize {
        self.points.iter().filter(|p| p.y.is_none()).count()
    }

    /// The series with every gap removed.
    pub fn without_gaps(&self) -> Vec<(Option<&str>, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.y.map(|y| (p.x.as_deref(), y)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One point of a scatter series; both axes are numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Output of a chart projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChartDataset {
    /// One bar per distinct x value
    Categories(Vec<FrequencyEntry>),
    Histogram(Vec<Bin>),
    Line(LineSeries),
    Scatter(Vec<ScatterPoint>),
    Empty,
}

impl ChartDataset {
    pub fn is_empty(&self) -> bool {
        match self {
            ChartDataset::Categories(entries) => entries.is_empty(),
            ChartDataset::Histogram(bins) => bins.is_empty(),
            ChartDataset::Line(series) => series.is_empty(),
            ChartDataset::Scatter(points) => points.is_empty(),
            ChartDataset::Empty => true,
        }
    }
}

/// Builds chart projections over one dataset and its kind map.
#[derive(Debug, Clone)]
pub struct ChartProjectionBuilder<'a> {
    dataset: &'a Dataset,
    kinds: &'a ColumnKinds,
    histogram_bins: usize,
    category_limit: Option<usize>,
    null_label: String,
}

impl<'a> ChartProjectionBuilder<'a> {
    pub fn new(dataset: &'a Dataset, kinds: &'a ColumnKinds) -> Self {
        Self {
            dataset,
            kinds,
            histogram_bins: CHART_HISTOGRAM_BINS,
            category_limit: None,
            null_label: NULL_LABEL.to_string(),
        }
    }

    /// Sets the bin count used for numeric bar charts.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Keeps only the `limit` most frequent categories in bar charts.
    pub fn category_limit(mut self, limit: usize) -> Self {
        self.category_limit = Some(limit);
        self
    }

    /// Sets the label missing values are counted under.
    pub fn null_label(mut self, label: impl Into<String>) -> Self {
        self.null_label = label.into();
        self
    }

    /// Builds the projection for a request.
    #[instrument(skip(self), fields(rows = self.dataset.row_count()))]
    pub fn build(&self, request: &ChartRequest) -> ChartDataset {
        let projection = match (request.mode, request.x.as_deref(), request.y.as_deref()) {
            (ChartMode::Bar, Some(x), _) => self.bar(x),
            (ChartMode::Line, Some(x), Some(y)) => self.line(x, y),
            (ChartMode::Scatter, Some(x), Some(y)) => self.scatter(x, y),
            _ => ChartDataset::Empty,
        };
        debug!(empty = projection.is_empty(), "Built chart projection");
        projection
    }

    /// Category bars when `x` is categorical, otherwise a histogram of `x`.
    pub fn bar(&self, x: &str) -> ChartDataset {
        if self.dataset.is_empty() {
            return ChartDataset::Empty;
        }
        let Some(values) = self.dataset.column(x) else {
            return ChartDataset::Empty;
        };

        match self.kinds.get(x) {
            Some(ColumnKind::Numeric) => {
                let parsed: Vec<f64> = values.filter_map(parse_numeric).collect();
                ChartDataset::Histogram(histogram_values(
                    &parsed,
                    BinCount::Fixed(self.histogram_bins),
                ))
            }
            _ => {
                let counts = value_counts(values, &self.null_label);
                let entries = match self.category_limit {
                    Some(limit) => rank(counts, limit),
                    None => counts,
                };
                ChartDataset::Categories(entries)
            }
        }
    }

    /// One point per row: raw `x`, coerced `y`.
    pub fn line(&self, x: &str, y: &str) -> ChartDataset {
        let (Some(xi), Some(yi)) = (self.dataset.column_index(x), self.dataset.column_index(y))
        else {
            return ChartDataset::Empty;
        };
        if self.dataset.is_empty() {
            return ChartDataset::Empty;
        }

        let points = self
            .dataset
            .rows()
            .iter()
            .map(|row| LinePoint {
                x: row.get(xi).map(str::to_string),
                y: parse_numeric(row.get(yi)),
            })
            .collect();
        ChartDataset::Line(LineSeries { points })
    }

    /// One point per row where both axes parse as numbers.
    pub fn scatter(&self, x: &str, y: &str) -> ChartDataset {
        let (Some(xi), Some(yi)) = (self.dataset.column_index(x), self.dataset.column_index(y))
        else {
            return ChartDataset::Empty;
        };
        if self.dataset.is_empty() {
            return ChartDataset::Empty;
        }

        let points = self
            .dataset
            .rows()
            .iter()
            .filter_map(|row| {
                let x = parse_numeric(row.get(xi))?;
                let y = parse_numeric(row.get(yi))?;
                Some(ScatterPoint { x, y })
            })
            .collect();
        ChartDataset::Scatter(points)
    }
}
