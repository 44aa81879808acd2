//! Rendering of dataset profiles.
//!
//! A [`DatasetProfile`] can be written out as JSON for other tools, as plain
//! text for a terminal, or as Markdown for reports.
//!
//! # Examples
//!
//! ```rust
//! use dataset_profiler::dataset::Dataset;
//! use dataset_profiler::formatters::{HumanFormatter, MarkdownFormatter, ProfileFormatter};
//! use dataset_profiler::profiler::DatasetProfiler;
//!
//! let dataset = Dataset::from_csv_str("a,b\n1,x\n2,y\n").unwrap();
//! let profile = DatasetProfiler::new().profile(&dataset);
//!
//! let text = HumanFormatter::new().format(&profile).unwrap();
//! assert!(text.contains("Rows: 2"));
//!
//! let markdown = MarkdownFormatter::new().format(&profile).unwrap();
//! assert!(markdown.contains("| a | numeric |"));
//! ```

use std::fmt::Write;

use serde_json::Value;

use crate::analyzers::summary::ColumnSummary;
use crate::error::Result;
use crate::profiler::{ColumnProfile, DatasetProfile};

/// Configuration options for rendering a profile.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include per-column summaries
    pub include_summaries: bool,
    /// Include null counts and percentages
    pub include_nulls: bool,
    /// Include the profiling timestamp and duration
    pub include_timestamps: bool,
    /// Maximum number of columns to render (`None` for all)
    pub max_columns: Option<usize>,
    /// Whether to use ANSI colors (human formatter only)
    pub use_colors: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_summaries: true,
            include_nulls: true,
            include_timestamps: true,
            max_columns: None,
            use_colors: true,
        }
    }
}

impl FormatterConfig {
    /// Only the dataset-level counts and column kinds.
    pub fn minimal() -> Self {
        Self {
            include_summaries: false,
            include_nulls: false,
            include_timestamps: false,
            max_columns: None,
            use_colors: false,
        }
    }

    /// Everything, colorized.
    pub fn detailed() -> Self {
        Self::default()
    }

    /// Suitable for CI logs: no colors, bounded column count.
    pub fn ci() -> Self {
        Self {
            include_summaries: true,
            include_nulls: true,
            include_timestamps: true,
            max_columns: Some(50),
            use_colors: false,
        }
    }

    pub fn with_summaries(mut self, include: bool) -> Self {
        self.include_summaries = include;
        self
    }

    pub fn with_nulls(mut self, include: bool) -> Self {
        self.include_nulls = include;
        self
    }

    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    pub fn with_max_columns(mut self, max: usize) -> Self {
        self.max_columns = Some(max);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn visible_columns(&self, profile: &DatasetProfile) -> Vec<ColumnProfile> {
        let mut columns = profile.columns();
        if let Some(max) = self.max_columns {
            columns.truncate(max);
        }
        columns
    }
}

/// Renders a dataset profile into a string.
///
/// ```rust
/// use dataset_profiler::formatters::ProfileFormatter;
/// use dataset_profiler::profiler::DatasetProfile;
///
/// struct RowCountFormatter;
///
/// impl ProfileFormatter for RowCountFormatter {
///     fn format(&self, profile: &DatasetProfile) -> dataset_profiler::error::Result<String> {
///         Ok(format!("{} rows", profile.row_count))
///     }
/// }
/// ```
pub trait ProfileFormatter {
    fn format(&self, profile: &DatasetProfile) -> Result<String>;

    /// Renders with an explicit configuration. The default ignores it.
    fn format_with_config(
        &self,
        profile: &DatasetProfile,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(profile)
    }
}

/// Renders a profile as JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to pretty-print.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for JsonFormatter {
    fn format(&self, profile: &DatasetProfile) -> Result<String> {
        self.format_with_config(profile, &self.config)
    }

    fn format_with_config(
        &self,
        profile: &DatasetProfile,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut value = serde_json::to_value(profile)?;
        if let Value::Object(map) = &mut value {
            if !config.include_summaries {
                map.remove("summaries");
            }
            if !config.include_nulls {
                map.remove("null_counts");
            }
            if !config.include_timestamps {
                map.remove("profiled_at");
                map.remove("profiling_time_ms");
            }
        }

        let output = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(output)
    }
}

/// Renders a profile as plain text for a terminal.
#[derive(Debug, Clone)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for HumanFormatter {
    fn format(&self, profile: &DatasetProfile) -> Result<String> {
        self.format_with_config(profile, &self.config)
    }

    fn format_with_config(
        &self,
        profile: &DatasetProfile,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        let paint = |text: &str, code: &str| {
            if config.use_colors {
                format!("\x1b[{code}m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        };

        writeln!(output).unwrap();
        writeln!(output, "{}", paint("Dataset Profile", "1")).unwrap();
        writeln!(output, "Dataset: {}", profile.dataset_id).unwrap();
        writeln!(output, "Rows: {}", profile.row_count).unwrap();
        writeln!(output, "Columns: {}", profile.column_count).unwrap();
        writeln!(output, "Duplicate rows: {}", profile.duplicate_rows).unwrap();
        if config.include_timestamps {
            writeln!(output, "Profiled at: {}", profile.profiled_at.to_rfc3339()).unwrap();
            writeln!(output, "Profiling time: {}ms", profile.profiling_time_ms).unwrap();
        }

        let columns = config.visible_columns(profile);
        for column in &columns {
            writeln!(output).unwrap();
            let kind_code = if column.kind.is_numeric() { "36" } else { "35" };
            writeln!(
                output,
                "{} ({})",
                paint(column.name.as_str(), "1"),
                paint(column.kind.name(), kind_code)
            )
            .unwrap();

            if config.include_nulls {
                writeln!(
                    output,
                    "   Missing: {} ({:.1}%)",
                    column.null_count,
                    column.null_percentage * 100.0
                )
                .unwrap();
            }

            if config.include_summaries {
                match &column.summary {
                    Some(ColumnSummary::Numeric(s)) => {
                        writeln!(output, "   Count: {}", s.count).unwrap();
                        writeln!(output, "   Mean: {:.3}", s.mean).unwrap();
                        writeln!(
                            output,
                            "   Min / Q25 / Median / Q75 / Max: {} / {} / {} / {} / {}",
                            s.min, s.q25, s.median, s.q75, s.max
                        )
                        .unwrap();
                    }
                    Some(ColumnSummary::Categorical(s)) => {
                        writeln!(output, "   Count: {}", s.count).unwrap();
                        writeln!(output, "   Distinct: {}", s.distinct_count).unwrap();
                        for entry in &s.top_entries {
                            writeln!(output, "      {}: {}", entry.label, entry.count).unwrap();
                        }
                    }
                    None => {}
                }
            }
        }

        if profile.column_count > columns.len() {
            writeln!(output).unwrap();
            writeln!(
                output,
                "... and {} more columns",
                profile.column_count - columns.len()
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        Ok(output)
    }
}

/// Renders a profile as Markdown.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
    heading_level: u8,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            heading_level: 2,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            heading_level: 2,
        }
    }

    /// Sets the base heading level for the output.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFormatter for MarkdownFormatter {
    fn format(&self, profile: &DatasetProfile) -> Result<String> {
        self.format_with_config(profile, &self.config)
    }

    fn format_with_config(
        &self,
        profile: &DatasetProfile,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        let h = "#".repeat(self.heading_level as usize);

        writeln!(output, "{h} Dataset Profile").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "- **Dataset**: `{}`", profile.dataset_id).unwrap();
        writeln!(output, "- **Rows**: {}", profile.row_count).unwrap();
        writeln!(output, "- **Columns**: {}", profile.column_count).unwrap();
        writeln!(output, "- **Duplicate rows**: {}", profile.duplicate_rows).unwrap();
        if config.include_timestamps {
            writeln!(output, "- **Profiled at**: {}", profile.profiled_at.to_rfc3339()).unwrap();
        }
        writeln!(output).unwrap();

        let columns = config.visible_columns(profile);
        if columns.is_empty() {
            return Ok(output);
        }

        writeln!(output, "{h}# Columns").unwrap();
        writeln!(output).unwrap();
        if config.include_nulls {
            writeln!(output, "| Column | Kind | Missing | Missing % |").unwrap();
            writeln!(output, "|--------|------|---------|-----------|").unwrap();
            for column in &columns {
                writeln!(
                    output,
                    "| {} | {} | {} | {:.1}% |",
                    escape_cell(&column.name),
                    column.kind,
                    column.null_count,
                    column.null_percentage * 100.0
                )
                .unwrap();
            }
        } else {
            writeln!(output, "| Column | Kind |").unwrap();
            writeln!(output, "|--------|------|").unwrap();
            for column in &columns {
                writeln!(output, "| {} | {} |", escape_cell(&column.name), column.kind).unwrap();
            }
        }
        writeln!(output).unwrap();

        if !config.include_summaries {
            return Ok(output);
        }

        for column in &columns {
            let Some(summary) = &column.summary else {
                continue;
            };
            writeln!(output, "{h}## {}", column.name).unwrap();
            writeln!(output).unwrap();
            match summary {
                ColumnSummary::Numeric(s) => {
                    writeln!(output, "| Count | Mean | Min | Q25 | Median | Q75 | Max |").unwrap();
                    writeln!(output, "|-------|------|-----|-----|--------|-----|-----|").unwrap();
                    writeln!(
                        output,
                        "| {} | {:.3} | {} | {} | {} | {} | {} |",
                        s.count, s.mean, s.min, s.q25, s.median, s.q75, s.max
                    )
                    .unwrap();
                }
                ColumnSummary::Categorical(s) => {
                    writeln!(output, "{} values, {} distinct.", s.count, s.distinct_count).unwrap();
                    writeln!(output).unwrap();
                    writeln!(output, "| Value | Count |").unwrap();
                    writeln!(output, "|-------|-------|").unwrap();
                    for entry in &s.top_entries {
                        writeln!(output, "| {} | {} |", escape_cell(&entry.label), entry.count)
                            .unwrap();
                    }
                }
            }
            writeln!(output).unwrap();
        }

        Ok(output)
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
