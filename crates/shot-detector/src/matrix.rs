//! Per-frame feature matrix

use crate::config::MIN_FRAMES;
use crate::ShotDetectionError;
use ndarray::{Array2, ArrayView1};

/// Feature vectors for every analyzed frame, one row per frame
///
/// Column 0 is a diagnostic slot (the reference producer stores the frame
/// size there); the remaining columns are histogram bin counts. The matrix
/// is read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    /// Build a matrix from row-major values
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `values` does not hold exactly
    /// `frames * columns` entries, or the shape is too small to analyze.
    pub fn from_row_major(
        frames: usize,
        columns: usize,
        values: Vec<f64>,
    ) -> Result<Self, ShotDetectionError> {
        if frames < MIN_FRAMES || columns < 2 {
            return Err(ShotDetectionError::MalformedInput {
                token_index: values.len(),
                reason: format!(
                    "a {frames}x{columns} matrix is too small (need at least {MIN_FRAMES} frames and 2 columns)"
                ),
            });
        }

        let data = Array2::from_shape_vec((frames, columns), values).map_err(|e| {
            ShotDetectionError::MalformedInput {
                token_index: frames * columns,
                reason: format!("cannot shape values as {frames}x{columns}: {e}"),
            }
        })?;

        Ok(Self { data })
    }

    /// Build a matrix from per-frame rows
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the rows differ in length or the shape is
    /// too small to analyze.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShotDetectionError> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * columns);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(ShotDetectionError::MalformedInput {
                    token_index: values.len(),
                    reason: format!(
                        "row {index} has {} values, expected {columns}",
                        row.len()
                    ),
                });
            }
            values.extend_from_slice(row);
        }
        Self::from_row_major(rows.len(), columns, values)
    }

    /// Number of analyzed frames
    #[must_use]
    pub fn frames(&self) -> usize {
        self.data.nrows()
    }

    /// Length of each feature vector
    #[must_use]
    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// Feature vector of one frame
    ///
    /// # Panics
    ///
    /// Panics if `frame >= self.frames()`.
    #[must_use]
    pub fn row(&self, frame: usize) -> ArrayView1<'_, f64> {
        self.data.row(frame)
    }

    /// Iterate over feature vectors in frame order
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.data.rows().into_iter()
    }

    #[must_use]
    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_major_shape() {
        let matrix = FeatureMatrix::from_row_major(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        assert_eq!(matrix.frames(), 3);
        assert_eq!(matrix.columns(), 2);
        assert_eq!(matrix.row(1).to_vec(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]];
        let err = FeatureMatrix::from_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            ShotDetectionError::MalformedInput { token_index: 2, .. }
        ));
    }

    #[test]
    fn test_too_few_frames() {
        let err = FeatureMatrix::from_row_major(2, 2, vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, ShotDetectionError::MalformedInput { .. }));
    }

    #[test]
    fn test_value_count_mismatch() {
        let err = FeatureMatrix::from_row_major(3, 2, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, ShotDetectionError::MalformedInput { .. }));
    }
}
