//! Type inference logic for column analysis.

use crate::config::ProfilerConfig;
use crate::dataset::{Cell, Dataset};
use crate::types::{ColumnType, TypeMap};
use crate::utils::parse_numeric_cell;
use std::collections::HashSet;
use tracing::debug;

/// Infer a [`ColumnType`] for every column of the dataset.
pub fn infer_types(dataset: &Dataset, config: &ProfilerConfig) -> TypeMap {
    dataset
        .schema()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells = dataset.rows().iter().map(|row| &row[idx]);
            let column_type = infer_column_type(cells, config);
            debug!("Inferred column '{}' as {}", name, column_type);
            (name.clone(), column_type)
        })
        .collect()
}

/// Classify one column from its cells.
///
/// 1. No non-missing values: `Unknown`.
/// 2. Share of parseable numbers strictly above the ratio threshold: `Numeric`.
/// 3. Distinct values at most `max(min_unique, ratio * non_missing)`:
///    `Categorical`, otherwise `Text`.
pub fn infer_column_type<'a>(
    cells: impl IntoIterator<Item = &'a Cell>,
    config: &ProfilerConfig,
) -> ColumnType {
    let values: Vec<&Cell> = cells.into_iter().filter(|c| !c.is_missing()).collect();
    if values.is_empty() {
        return ColumnType::Unknown;
    }

    let numeric_count = values
        .iter()
        .filter(|c| parse_numeric_cell(c, config.strip_numeric_formatting).is_some())
        .count();
    let numeric_ratio = numeric_count as f64 / values.len() as f64;

    if numeric_ratio > config.numeric_ratio_threshold {
        return ColumnType::Numeric;
    }

    let unique_count = values
        .iter()
        .map(|c| c.key())
        .collect::<HashSet<_>>()
        .len();
    let cardinality_limit = (config.categorical_min_unique as f64)
        .max(values.len() as f64 * config.categorical_unique_ratio);

    if unique_count as f64 <= cardinality_limit {
        ColumnType::Categorical
    } else {
        ColumnType::Text
    }
}
