//! Caller-owned profiling context.
//!
//! A [`ProfilingSession`] holds one dataset together with its type map and
//! configuration. Every query goes through the session, so nothing is read
//! from ambient state. Loading a new dataset replaces the old one and
//! recomputes the type map from scratch.

use crate::binning::{Histogram, histogram_with_max_bins};
use crate::config::ProfilerConfig;
use crate::dataset::Dataset;
use crate::error::{ProfilingError, Result};
use crate::profiler::{self, DataProfiler};
use crate::relation;
use crate::types::{
    ColumnDescription, ColumnProfile, ColumnType, DatasetProfile, Overview, RelationResult,
    ScatterPoint, TypeMap,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProfilingSession {
    dataset: Dataset,
    type_map: TypeMap,
    config: ProfilerConfig,
}

impl ProfilingSession {
    /// Start a session over `dataset`, inferring its column types.
    pub fn new(dataset: Dataset, config: ProfilerConfig) -> Result<Self> {
        config.validate()?;
        let type_map = profiler::infer_types(&dataset, &config);
        info!(
            "Session started: {} rows x {} columns",
            dataset.row_count(),
            dataset.column_count()
        );
        Ok(Self {
            dataset,
            type_map,
            config,
        })
    }

    /// Replace the dataset and recompute everything derived from it.
    pub fn reload(&mut self, dataset: Dataset) {
        self.type_map = profiler::infer_types(&dataset, &self.config);
        self.dataset = dataset;
        info!(
            "Session reloaded: {} rows x {} columns",
            self.dataset.row_count(),
            self.dataset.column_count()
        );
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Inferred type of a column.
    pub fn column_type(&self, column: &str) -> Result<ColumnType> {
        self.type_map
            .get(column)
            .ok_or_else(|| ProfilingError::ColumnNotFound(column.to_string()))
    }

    pub fn overview(&self) -> Overview {
        profiler::summarize(&self.dataset, &self.type_map)
    }

    pub fn describe(&self, column: &str) -> Result<ColumnDescription> {
        let column_type = self.column_type(column)?;
        profiler::describe(&self.dataset, column, column_type, &self.config)
    }

    pub fn profile_column(&self, column: &str) -> Result<ColumnProfile> {
        DataProfiler::profile_column(&self.dataset, &self.type_map, column, &self.config)
    }

    /// Full profile of the current dataset.
    pub fn profile(&self) -> Result<DatasetProfile> {
        DataProfiler::profile_dataset(&self.dataset, &self.config)
    }

    /// Relation between two columns, dispatched on their inferred types.
    pub fn relation(&self, x: &str, y: &str) -> Result<RelationResult> {
        let type_x = self.column_type(x)?;
        let type_y = self.column_type(y)?;
        relation::analyze_relation(&self.dataset, x, y, type_x, type_y, &self.config)
    }

    pub fn scatter_points(&self, x: &str, y: &str) -> Result<Vec<ScatterPoint>> {
        relation::scatter_points(&self.dataset, x, y, &self.config)
    }

    /// Histogram of a column's parseable numbers.
    ///
    /// Works for any column type; a column without numbers gives an empty
    /// histogram.
    pub fn histogram(&self, column: &str) -> Result<Histogram> {
        let values = profiler::numeric_values(self.dataset.column_cells(column)?, &self.config);
        Ok(histogram_with_max_bins(&values, self.config.max_histogram_bins))
    }
}

static_assertions::assert_impl_all!(ProfilingSession: Send, Sync);
static_assertions::assert_impl_all!(TypeMap: Send, Sync);
