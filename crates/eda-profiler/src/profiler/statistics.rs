//! Statistical analysis functions for column profiling.

use crate::config::ProfilerConfig;
use crate::dataset::{Cell, Dataset};
use crate::error::Result;
use crate::types::{
    CategoricalSummary, ColumnDescription, ColumnType, FrequencyTable, NumericStats,
};
use crate::utils::parse_numeric_cell;

/// Describe one column according to its inferred type.
///
/// Numeric columns get [`NumericStats`] over their parseable values; every
/// other type gets a [`CategoricalSummary`] over the raw non-missing values.
pub fn describe(
    dataset: &Dataset,
    column: &str,
    column_type: ColumnType,
    config: &ProfilerConfig,
) -> Result<ColumnDescription> {
    let cells = dataset.column_cells(column)?;
    let description = match column_type {
        ColumnType::Numeric => {
            let values = numeric_values(cells, config);
            ColumnDescription::Numeric(calculate_numeric_stats(&values))
        }
        ColumnType::Categorical | ColumnType::Text | ColumnType::Unknown => {
            ColumnDescription::Categorical(summarize_categorical(cells))
        }
    };
    Ok(description)
}

/// Parseable numbers of a column, in row order.
///
/// Missing and unparseable cells are skipped.
pub fn numeric_values<'a>(
    cells: impl IntoIterator<Item = &'a Cell>,
    config: &ProfilerConfig,
) -> Vec<f64> {
    cells
        .into_iter()
        .filter_map(|c| parse_numeric_cell(c, config.strip_numeric_formatting))
        .collect()
}

/// Compute [`NumericStats`] over `values`.
///
/// Returns [`NumericStats::empty`] when there are no values.
pub fn calculate_numeric_stats(values: &[f64]) -> NumericStats {
    if values.is_empty() {
        return NumericStats::empty();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let q1_idx = (n as f64 * 0.25) as usize;
    let q3_idx = (n as f64 * 0.75) as usize;

    NumericStats {
        count: n,
        mean,
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        median,
        q1: sorted[q1_idx],
        q3: sorted[q3_idx],
    }
}

/// Build the frequency table of the non-missing cells.
pub fn frequency_table<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for cell in cells.into_iter().filter(|c| !c.is_missing()) {
        table.record(cell.display());
    }
    table
}

fn summarize_categorical<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> CategoricalSummary {
    let frequencies = frequency_table(cells);
    CategoricalSummary {
        count: frequencies.total(),
        unique_count: frequencies.len(),
        top_value: frequencies.mode().cloned(),
        frequencies,
    }
}
