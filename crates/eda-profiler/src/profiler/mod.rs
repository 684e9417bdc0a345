//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for profiling datasets, including:
//! - Type inference for columns
//! - Statistical description of single columns
//! - Whole-dataset overview (missing values, duplicates, type mix)

mod statistics;
mod summary;
mod type_inference;

use crate::binning::histogram_with_max_bins;
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::{ProfilingError, Result};
use crate::types::{ColumnDescription, ColumnProfile, DatasetProfile, TypeMap};
use crate::utils::percentage;
use tracing::{debug, info};

pub use statistics::{calculate_numeric_stats, describe, frequency_table, numeric_values};
pub use summary::{count_duplicate_rows, summarize};
pub use type_inference::{infer_column_type, infer_types};

/// Data profiler for analyzing dataset structure and characteristics.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset.
    ///
    /// Infers every column type, computes the overview and builds a
    /// [`ColumnProfile`] per column, plus head/tail samples.
    pub fn profile_dataset(dataset: &Dataset, config: &ProfilerConfig) -> Result<DatasetProfile> {
        config.validate()?;
        info!(
            "Profiling dataset: {} rows x {} columns",
            dataset.row_count(),
            dataset.column_count()
        );

        let type_map = infer_types(dataset, config);
        let overview = summarize(dataset, &type_map);

        let column_profiles = dataset
            .schema()
            .iter()
            .map(|column| Self::profile_column(dataset, &type_map, column, config))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Profile complete: {} missing cells ({}%), {} duplicate rows",
            overview.total_missing,
            overview.missing_percentage_display(),
            overview.duplicate_rows
        );

        Ok(DatasetProfile {
            schema: dataset.schema().to_vec(),
            type_map,
            overview,
            column_profiles,
            head: dataset.head(config.sample_rows).to_vec(),
            tail: dataset.tail(config.sample_rows).to_vec(),
        })
    }

    /// Profile one column against an already inferred type map.
    ///
    /// Numeric columns carry a histogram and a box plot summary; all other
    /// columns carry their most frequent values.
    pub fn profile_column(
        dataset: &Dataset,
        type_map: &TypeMap,
        column: &str,
        config: &ProfilerConfig,
    ) -> Result<ColumnProfile> {
        let column_type = type_map
            .get(column)
            .ok_or_else(|| ProfilingError::ColumnNotFound(column.to_string()))?;

        let missing_count = dataset.column_cells(column)?.filter(|c| c.is_missing()).count();
        let description = describe(dataset, column, column_type, config)?;
        debug!("Described column '{}' ({})", column, column_type);

        let (histogram, box_plot, top_values) = match &description {
            ColumnDescription::Numeric(stats) => {
                let values = numeric_values(dataset.column_cells(column)?, config);
                let histogram = histogram_with_max_bins(&values, config.max_histogram_bins);
                (Some(histogram), Some(stats.box_plot()), Vec::new())
            }
            ColumnDescription::Categorical(summary) => (
                None,
                None,
                summary.frequencies.top(config.top_values_limit),
            ),
        };

        Ok(ColumnProfile {
            name: column.to_string(),
            column_type,
            missing_count,
            missing_percentage: percentage(missing_count, dataset.row_count()),
            description,
            histogram,
            box_plot,
            top_values,
        })
    }
}
