//! Whole-dataset overview metrics.

use crate::dataset::Dataset;
use crate::types::{ColumnMissing, Overview, TypeDistribution, TypeMap};
use crate::utils::percentage;
use std::collections::HashSet;

/// Compute the [`Overview`] of a dataset.
///
/// A row counts as a duplicate when an identical row (same cell values in
/// every column) appeared earlier.
pub fn summarize(dataset: &Dataset, type_map: &TypeMap) -> Overview {
    let missing_by_column = missing_per_column(dataset);
    let total_missing = missing_by_column.iter().map(|m| m.missing).sum();
    let total_cells = dataset.row_count() * dataset.column_count();

    let mut type_distribution = TypeDistribution::default();
    for (_, column_type) in type_map.iter() {
        type_distribution.add(column_type);
    }

    Overview {
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        total_cells,
        total_missing,
        missing_percentage: percentage(total_missing, total_cells),
        missing_by_column,
        duplicate_rows: count_duplicate_rows(dataset),
        type_distribution,
    }
}

fn missing_per_column(dataset: &Dataset) -> Vec<ColumnMissing> {
    dataset
        .schema()
        .iter()
        .enumerate()
        .map(|(idx, column)| ColumnMissing {
            column: column.clone(),
            missing: dataset
                .rows()
                .iter()
                .filter(|row| row[idx].is_missing())
                .count(),
        })
        .collect()
}

/// Rows minus distinct rows.
pub fn count_duplicate_rows(dataset: &Dataset) -> usize {
    let mut seen = HashSet::with_capacity(dataset.row_count());
    let mut duplicates = 0;
    for row in dataset.rows() {
        let mut key = String::new();
        for cell in row {
            cell.write_key(&mut key);
        }
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfilerConfig;
    use crate::dataset::Cell;
    use crate::profiler::infer_types;
    use pretty_assertions::assert_eq;

    fn people() -> Dataset {
        let rows = vec![
            vec![Cell::from(25.0), Cell::from("NY")],
            vec![Cell::from(30.0), Cell::from("LA")],
            vec![Cell::Missing, Cell::from("NY")],
            vec![Cell::from(25.0), Cell::from("NY")],
            vec![Cell::from(35.0), Cell::Missing],
        ];
        Dataset::new(vec!["age".into(), "city".into()], rows).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let ds = people();
        let types = infer_types(&ds, &ProfilerConfig::default());
        let overview = summarize(&ds, &types);

        assert_eq!(overview.row_count, 5);
        assert_eq!(overview.column_count, 2);
        assert_eq!(overview.total_cells, 10);
        assert_eq!(overview.total_missing, 2);
        assert_eq!(overview.missing_percentage, 20.0);
        assert_eq!(overview.missing_percentage_display(), "20.0");
        assert_eq!(overview.missing_for("age"), Some(1));
        assert_eq!(overview.missing_for("city"), Some(1));
        assert_eq!(overview.duplicate_rows, 1);
        assert_eq!(overview.type_distribution.numeric, 1);
        assert_eq!(overview.type_distribution.categorical, 1);
    }

    #[test]
    fn test_missing_sums_to_total() {
        let ds = people();
        let overview = summarize(&ds, &infer_types(&ds, &ProfilerConfig::default()));
        let sum: usize = overview.missing_by_column.iter().map(|m| m.missing).sum();
        assert_eq!(sum, overview.total_missing);
        assert_eq!(
            overview.type_distribution.total(),
            overview.column_count
        );
    }

    #[test]
    fn test_summary_is_idempotent() {
        let ds = people();
        let types = infer_types(&ds, &ProfilerConfig::default());
        assert_eq!(summarize(&ds, &types), summarize(&ds, &types));
    }

    #[test]
    fn test_empty_dataset_overview() {
        let ds = Dataset::new(vec!["a".into()], vec![]).unwrap();
        let overview = summarize(&ds, &infer_types(&ds, &ProfilerConfig::default()));
        assert_eq!(overview.total_cells, 0);
        assert_eq!(overview.missing_percentage, 0.0);
        assert_eq!(overview.duplicate_rows, 0);
        assert_eq!(overview.type_distribution.unknown, 1);
    }

    #[test]
    fn test_duplicates_distinguish_number_from_text() {
        let rows = vec![vec![Cell::from(1.0)], vec![Cell::from("1")]];
        let ds = Dataset::new(vec!["v".into()], rows).unwrap();
        assert_eq!(count_duplicate_rows(&ds), 0);
    }

    #[test]
    fn test_duplicates_count_every_repeat() {
        let rows = vec![vec![Cell::from("a")]; 4];
        let ds = Dataset::new(vec!["v".into()], rows).unwrap();
        assert_eq!(count_duplicate_rows(&ds), 3);
    }
}
