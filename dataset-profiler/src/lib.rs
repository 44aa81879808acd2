//! # dataset-profiler - Profiling for Tabular Data
//!
//! dataset-profiler takes a decoded table of string cells, such as a parsed CSV
//! upload, and derives everything a data dashboard needs to describe it:
//! per-column type classification, summary statistics, null and duplicate
//! diagnostics, and chart-ready projections.
//!
//! ## Overview
//!
//! The core is a synchronous, in-memory pipeline of pure functions. A
//! [`Dataset`](dataset::Dataset) goes through type inference, which yields a
//! column-to-kind map; summaries, null counts and duplicate counts are then
//! computed independently over the same rows, and chart projections are built
//! on demand from the rows, the kinds and the user's column selection.
//!
//! ## Quick Start
//!
//! ```rust
//! use dataset_profiler::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let dataset = Dataset::from_csv_str("city,temp\nOslo,3\nRome,18\nOslo,5\n")?;
//!
//! let profile = DatasetProfiler::new().profile(&dataset);
//! assert_eq!(profile.kinds.get("temp"), Some(&ColumnKind::Numeric));
//!
//! let kinds = TypeInferenceEngine::new().infer_kinds(&dataset);
//! let chart = ChartProjectionBuilder::new(&dataset, &kinds).build(&ChartRequest::bar("city"));
//! assert!(matches!(chart, ChartDataset::Categories(ref bars) if bars[0].count == 2));
//!
//! println!("{}", HumanFormatter::new().format(&profile)?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Canonical Rules
//!
//! - A value is **missing** when it is absent, empty or blank, or one of the
//!   tokens `na`, `nan`, `null` in any case.
//! - A value is **numeric** when, after trimming, it matches
//!   `^[+-]?[0-9]+(\.[0-9]+)?$` and parses to a finite number. Scientific
//!   notation and thousands separators are text.
//!
//! Every analyzer uses these two rules, so a column can never be numeric for
//! one analyzer and text for another.
//!
//! ## Modules
//!
//! - **`dataset`**: Schema-validated tables, CSV decoding and encoding
//! - **`analyzers`**: Type inference, summaries, histograms, frequencies, duplicates
//! - **`chart`**: Bar, line and scatter projections
//! - **`profiler`**: Whole-dataset profile reports and their configuration
//! - **`session`**: The current dataset and selection, with memoized results
//! - **`formatters`**: JSON, text and Markdown rendering of profiles
//! - **`logging`**: Logging configuration and subscriber setup
//! - **`error`**: Error types

pub mod analyzers;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod profiler;
pub mod session;
pub mod test_fixtures;
