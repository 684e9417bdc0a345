//! Contingency table between two categorical columns.

use crate::types::CrossTab;

/// Count co-occurrences of `(row, column)` category pairs.
///
/// Only the first `max_categories` distinct row categories and the first
/// `max_categories` distinct column categories, by encounter order, are
/// kept. Pairs falling outside either set are dropped.
pub fn crosstab(pairs: impl IntoIterator<Item = (String, String)>, max_categories: usize) -> CrossTab {
    let pairs: Vec<(String, String)> = pairs.into_iter().collect();

    let row_categories = first_distinct(pairs.iter().map(|(r, _)| r.as_str()), max_categories);
    let column_categories = first_distinct(pairs.iter().map(|(_, c)| c.as_str()), max_categories);

    let mut counts = vec![vec![0usize; column_categories.len()]; row_categories.len()];
    for (row, column) in &pairs {
        let r = row_categories.iter().position(|c| c == row);
        let c = column_categories.iter().position(|c| c == column);
        if let (Some(r), Some(c)) = (r, c) {
            counts[r][c] += 1;
        }
    }

    CrossTab {
        row_categories,
        column_categories,
        counts,
    }
}

fn first_distinct<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for value in values {
        if distinct.len() == limit {
            break;
        }
        if !distinct.iter().any(|d| d == value) {
            distinct.push(value.to_string());
        }
    }
    distinct
}
