//! Pairwise relationship analysis between two columns.
//!
//! The analysis is chosen from the inferred types of the pair:
//! - numeric x numeric: Pearson correlation
//! - numeric x anything else (either order): mean of the numeric column per
//!   category of the other
//! - anything else: cross-tabulation of the two columns
//!
//! Only valid rows, where both cells are non-missing, take part.
//! Degenerate input never fails; it yields a zero coefficient, no groups or
//! an empty table.

mod correlation;
mod crosstab;
mod grouped;

use crate::config::ProfilerConfig;
use crate::dataset::{Cell, Dataset};
use crate::error::Result;
use crate::types::{ColumnType, RelationResult, ScatterPoint};
use crate::utils::parse_numeric_cell;
use tracing::debug;

pub use correlation::pearson;
pub use crosstab::crosstab;
pub use grouped::grouped_means;

/// Compute the relation between columns `x` and `y`.
pub fn analyze_relation(
    dataset: &Dataset,
    x: &str,
    y: &str,
    type_x: ColumnType,
    type_y: ColumnType,
    config: &ProfilerConfig,
) -> Result<RelationResult> {
    let rows = valid_pairs(dataset, x, y)?;
    debug!(
        "Relating '{}' ({}) to '{}' ({}) over {} valid rows",
        x,
        type_x,
        y,
        type_y,
        rows.len()
    );

    let strip = config.strip_numeric_formatting;
    let result = match (type_x.is_numeric(), type_y.is_numeric()) {
        (true, true) => {
            let pairs = numeric_pairs(&rows, strip);
            let coefficient = pearson(&pairs);
            if coefficient == 0.0 {
                debug!("Correlation of '{}' and '{}' is degenerate or zero", x, y);
            }
            RelationResult::Correlation {
                coefficient,
                pair_count: pairs.len(),
            }
        }
        (true, false) => RelationResult::GroupedMeans {
            numeric_column: x.to_string(),
            group_column: y.to_string(),
            groups: grouped_means(
                rows.iter()
                    .map(|(num, cat)| (cat.display(), parse_numeric_cell(num, strip))),
            ),
        },
        (false, true) => RelationResult::GroupedMeans {
            numeric_column: y.to_string(),
            group_column: x.to_string(),
            groups: grouped_means(
                rows.iter()
                    .map(|(cat, num)| (cat.display(), parse_numeric_cell(num, strip))),
            ),
        },
        (false, false) => RelationResult::CrossTab(crosstab(
            rows.iter().map(|(a, b)| (a.display(), b.display())),
            config.crosstab_max_categories,
        )),
    };

    Ok(result)
}

/// Points for a scatter plot of two numeric columns.
///
/// Valid rows where either side fails to parse are skipped.
pub fn scatter_points(
    dataset: &Dataset,
    x: &str,
    y: &str,
    config: &ProfilerConfig,
) -> Result<Vec<ScatterPoint>> {
    let rows = valid_pairs(dataset, x, y)?;
    let pairs = numeric_pairs(&rows, config.strip_numeric_formatting);
    Ok(correlation::to_scatter(&pairs))
}

fn valid_pairs<'a>(dataset: &'a Dataset, x: &str, y: &str) -> Result<Vec<(&'a Cell, &'a Cell)>> {
    let x_idx = dataset.column_index(x)?;
    let y_idx = dataset.column_index(y)?;
    Ok(dataset
        .rows()
        .iter()
        .map(|row| (&row[x_idx], &row[y_idx]))
        .filter(|(a, b)| !a.is_missing() && !b.is_missing())
        .collect())
}

fn numeric_pairs(rows: &[(&Cell, &Cell)], strip: bool) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|(a, b)| Some((parse_numeric_cell(a, strip)?, parse_numeric_cell(b, strip)?)))
        .collect()
}
