//! Pearson correlation between two numeric columns.

use crate::types::ScatterPoint;

/// Pearson correlation coefficient over paired values.
///
/// Uses the sum formula. Returns 0 for empty input or when either side has
/// zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let Some(&(x0, y0)) = pairs.first() else {
        return 0.0;
    };
    // The sum formula leaves rounding residue on constant input.
    if pairs.iter().all(|&(x, _)| x == x0) || pairs.iter().all(|&(_, y)| y == y0) {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
        sum_y2 += y * y;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let var_x = n * sum_x2 - sum_x * sum_x;
    let var_y = n * sum_y2 - sum_y * sum_y;
    if var_x <= 0.0 || var_y <= 0.0 {
        return 0.0;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    // Rounding can push |r| a hair past 1.
    (numerator / denominator).clamp(-1.0, 1.0)
}

pub(crate) fn to_scatter(pairs: &[(f64, f64)]) -> Vec<ScatterPoint> {
    pairs.iter().map(|&(x, y)| ScatterPoint { x, y }).collect()
}
