//! Histogram bucketization for numeric distributions.
//!
//! The bin count is `min(max_bins, ceil(sqrt(n)))`, never less than one.
//! Bins are equal-width over `[min, max]`; the maximum value is clamped into
//! the last bin. A zero-width range collapses to a single bin holding every
//! value.

use serde::{Deserialize, Serialize};

/// Default upper bound on the number of bins.
pub const DEFAULT_MAX_BINS: usize = 20;

/// Equal-width histogram: `bin_edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bin_edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin width, 0 for an empty or collapsed histogram.
    pub fn bin_width(&self) -> f64 {
        match (self.bin_edges.first(), self.bin_edges.get(1)) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        }
    }

    /// `start-end` label per bin.
    ///
    /// Narrow bins (width below 1) use two decimals, wider ones are rounded
    /// to integers.
    pub fn labels(&self) -> Vec<String> {
        let narrow = self.bin_width() < 1.0;
        self.bin_edges
            .windows(2)
            .map(|edge| {
                if narrow {
                    format!("{:.2}-{:.2}", edge[0], edge[1])
                } else {
                    format!("{}-{}", edge[0].round(), edge[1].round())
                }
            })
            .collect()
    }
}

/// Histogram with the default bin cap.
pub fn histogram(values: &[f64]) -> Histogram {
    histogram_with_max_bins(values, DEFAULT_MAX_BINS)
}

/// Histogram of finite `values` with at most `max_bins` bins.
///
/// An empty slice yields an empty histogram.
pub fn histogram_with_max_bins(values: &[f64], max_bins: usize) -> Histogram {
    if values.is_empty() {
        return Histogram::default();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let sqrt_bins = (values.len() as f64).sqrt().ceil() as usize;
    let bin_count = sqrt_bins.min(max_bins).max(1);
    let bin_width = (max - min) / bin_count as f64;

    if bin_width <= 0.0 || !bin_width.is_finite() {
        return Histogram {
            bin_edges: vec![min, max],
            counts: vec![values.len()],
        };
    }

    let mut counts = vec![0usize; bin_count];
    for &value in values {
        let idx = ((value - min) / bin_width).floor() as usize;
        counts[idx.min(bin_count - 1)] += 1;
    }

    let bin_edges = (0..=bin_count)
        .map(|i| min + i as f64 * bin_width)
        .collect();

    Histogram { bin_edges, counts }
}
