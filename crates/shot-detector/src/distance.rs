//! Frame-to-frame dissimilarity

use crate::matrix::FeatureMatrix;
use std::ops::Range;
use tracing::debug;

/// L1 distances between consecutive frames
///
/// Holds `frames + 1` slots. Slot `i` (for `1 <= i < frames`) is the distance
/// between rows `i - 1` and `i`; slot 0 and the final slot are unused
/// sentinels that stay at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSeries {
    values: Vec<f64>,
}

impl DistanceSeries {
    /// Wrap precomputed slots (including both sentinels)
    ///
    /// Mostly useful for exercising the detectors on hand-made series.
    #[must_use]
    pub fn from_slots(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Total slot count, `frames + 1`
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices that hold real distances
    #[must_use]
    pub fn scan_range(&self) -> Range<usize> {
        1..self.values.len().saturating_sub(1).max(1)
    }

    /// The meaningful distances, sentinels excluded
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        self.values.get(self.scan_range()).unwrap_or(&[])
    }

    /// Every slot including the sentinels
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Iterate `(index, distance)` over the meaningful slots
    pub fn iter_scan(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.scan_range().map(move |index| (index, self.values[index]))
    }
}

/// Compute the distance series of a matrix
///
/// Each distance is the sum of absolute per-bin differences between two
/// consecutive rows, skipping the diagnostic column 0.
#[must_use]
pub fn compute_distances(matrix: &FeatureMatrix) -> DistanceSeries {
    let frames = matrix.frames();
    let mut values = vec![0.0; frames + 1];

    for index in 1..frames {
        values[index] = l1_distance(matrix, index - 1, index);
    }

    debug!("Computed {} frame distances", frames.saturating_sub(1));
    DistanceSeries { values }
}

fn l1_distance(matrix: &FeatureMatrix, previous: usize, current: usize) -> f64 {
    matrix
        .row(previous)
        .iter()
        .zip(matrix.row(current).iter())
        .skip(1)
        .map(|(a, b)| (b - a).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances_skip_diagnostic_column() {
        let matrix = FeatureMatrix::from_rows(&[
            vec![100.0, 1.0, 5.0],
            vec![900.0, 4.0, 1.0],
            vec![50.0, 4.0, 1.0],
            vec![7.0, 0.0, 0.0],
        ])
        .unwrap();

        let series = compute_distances(&matrix);
        assert_eq!(series.len(), 5);
        assert_eq!(series.as_slice(), &[0.0, 7.0, 0.0, 5.0, 0.0]);
        assert_eq!(series.samples(), &[7.0, 0.0, 5.0]);
    }

    #[test]
    fn test_scan_range_excludes_sentinels() {
        let series = DistanceSeries::from_slots(vec![0.0, 1.0, 2.0, 3.0, 0.0]);
        assert_eq!(series.scan_range(), 1..4);
        let scanned: Vec<(usize, f64)> = series.iter_scan().collect();
        assert_eq!(scanned, vec![(1, 1.0), (2, 2.0), (3, 3.0)]);
    }
}
