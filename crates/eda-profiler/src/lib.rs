//! Exploratory Data Profiling Library
//!
//! An exploratory data analysis engine built with Rust, with CSV ingestion
//! through Polars.
//!
//! # Overview
//!
//! Given an in-memory [`Dataset`] this library provides:
//!
//! - **Type Inference**: every column classified as numeric, categorical,
//!   text or unknown
//! - **Column Statistics**: descriptive statistics for numeric columns and
//!   frequency tables for the rest
//! - **Dataset Overview**: missing-value and duplicate-row accounting
//! - **Relations**: correlation, grouped means or cross-tabulation between
//!   two columns, chosen from their types
//! - **Histograms**: equal-width binning of numeric distributions
//!
//! Degenerate input (zero variance, no valid rows, a constant column) never
//! fails; it resolves to a well-defined default. Only input that breaks the
//! dataset schema is reported as an error.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use eda_profiler::{ProfilerConfig, ProfilingSession, load_csv};
//!
//! # fn main() -> eda_profiler::Result<()> {
//! let dataset = load_csv("data.csv")?;
//! let session = ProfilingSession::new(dataset, ProfilerConfig::default())?;
//!
//! let overview = session.overview();
//! println!("{} rows, {}% missing", overview.row_count, overview.missing_percentage_display());
//!
//! let age = session.describe("age")?;
//! let relation = session.relation("age", "city")?;
//! # let _ = (age, relation);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Use [`ProfilerConfig`] to tune inference thresholds and output limits:
//!
//! ```rust
//! use eda_profiler::ProfilerConfig;
//!
//! let config = ProfilerConfig::builder()
//!     .numeric_ratio_threshold(0.9)
//!     .max_histogram_bins(10)
//!     .strip_numeric_formatting(true)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.categorical_min_unique, 10);
//! ```

pub mod binning;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod profiler;
pub mod relation;
pub mod reporting;
pub mod session;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use binning::{Histogram, histogram, histogram_with_max_bins};
pub use config::{ConfigValidationError, ProfilerConfig, ProfilerConfigBuilder};
pub use dataset::{Cell, Dataset, Row};
pub use error::{ProfilingError, Result, ResultExt};
pub use ingest::{load_csv, read_csv_str};
pub use profiler::{DataProfiler, describe, infer_column_type, infer_types, summarize};
pub use relation::{analyze_relation, scatter_points};
pub use reporting::{ProfileReport, ReportGenerator};
pub use session::ProfilingSession;
pub use types::{
    BoxPlotSummary, CategoricalSummary, ColumnDescription, ColumnProfile, ColumnType, CrossTab,
    DatasetProfile, FrequencyEntry, FrequencyTable, GroupMean, NumericStats, Overview,
    RelationResult, ScatterPoint, TypeDistribution, TypeMap,
};
pub use utils::{clean_numeric_string, parse_numeric_string};
