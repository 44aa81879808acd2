//! Equal-width histograms over numeric columns.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::analyzers::inference::parse_numeric;
use crate::dataset::Dataset;

/// Upper limit on the number of bins a histogram will produce.
pub const MAX_BINS: usize = 1000;

/// Default bin count for standalone histograms.
pub const DEFAULT_BINS: usize = 10;

/// One histogram bucket covering the half-open interval `[lower_bound, upper_bound)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Interval rendered as `[a.aa, b.bb)`
    pub range_label: String,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
}

impl Bin {
    fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            range_label: format!("[{lower_bound:.2}, {upper_bound:.2})"),
            lower_bound,
            upper_bound,
            count: 0,
        }
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        self.lower_bound / 2.0 + self.upper_bound / 2.0
    }
}

/// How many bins to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinCount {
    /// A caller-chosen count, clamped to `1..=MAX_BINS`.
    Fixed(usize),
    /// `ceil(sqrt(n))` over the number of usable values.
    SquareRoot,
}

impl BinCount {
    /// Resolves the number of bins for `n` usable values.
    pub fn resolve(self, n: usize) -> usize {
        let bins = match self {
            BinCount::Fixed(bins) => bins,
            BinCount::SquareRoot => (n as f64).sqrt().ceil() as usize,
        };
        bins.clamp(1, MAX_BINS)
    }
}

impl Default for BinCount {
    fn default() -> Self {
        BinCount::Fixed(DEFAULT_BINS)
    }
}

impl From<usize> for BinCount {
    fn from(bins: usize) -> Self {
        BinCount::Fixed(bins)
    }
}

/// Builds a histogram of one column.
///
/// Values that are missing, fail to parse, or are non-finite are left out. An
/// unknown column or a column without usable values yields no bins.
///
/// The bin count is capped at [`MAX_BINS`]: `BinCount::Fixed(2000)` produces
/// 1000 bins, and `BinCount::Fixed(0)` produces one. [`ProfileConfig`] rejects
/// configured counts outside that range instead.
///
/// [`ProfileConfig`]: crate::profiler::ProfileConfig
#[instrument(skip(dataset), fields(rows = dataset.row_count()))]
pub fn histogram(dataset: &Dataset, column: &str, bins: BinCount) -> Vec<Bin> {
    let Some(values) = dataset.column(column) else {
        debug!(column, "Histogram requested for unknown column");
        return Vec::new();
    };
    let parsed: Vec<f64> = values.filter_map(parse_numeric).collect();
    histogram_values(&parsed, bins)
}

/// Builds a histogram from already parsed values.
///
/// ```rust
/// use dataset_profiler::analyzers::histogram::{histogram_values, BinCount};
///
/// let bins = histogram_values(&[0.0, 1.0, 2.0, 3.0, 4.0], BinCount::Fixed(2));
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[0].range_label, "[0.00, 2.00)");
/// assert_eq!(bins[0].count, 2);
/// assert_eq!(bins[1].count, 3);
/// ```
pub fn histogram_values(values: &[f64], bins: BinCount) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }

    let bin_count = bins.resolve(finite.len());
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Work on halved values so `max - min` stays finite across the whole f64
    // range. Halving is exact, so bounds match the unscaled arithmetic.
    let half_min = min / 2.0;
    let mut half_width = (max / 2.0 - half_min) / bin_count as f64;
    if half_width == 0.0 {
        half_width = 0.5;
    }
    let bound = |i: usize| (half_min + i as f64 * half_width) * 2.0;

    let mut result: Vec<Bin> = (0..bin_count)
        .map(|i| Bin::new(bound(i), bound(i + 1)))
        .collect();

    for value in finite {
        let index = ((value / 2.0 - half_min) / half_width).floor() as usize;
        result[index.min(bin_count - 1)].count += 1;
    }

    result
}
