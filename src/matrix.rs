//! Dense/sparse representation of two-dimensional numeric data.
//!
//! Datasets and projected outputs move through the crate as a [`Matrix`],
//! a tagged union over an `ndarray` dense array and an `sprs`
//! compressed-row matrix. The transformers branch on the tag explicitly
//! when deciding the representation of their output.

use ndarray::Array2;
use sprs::CsMat;

use crate::error::{ProjectionError, Result};

/// Two-dimensional numeric data, stored densely or in compressed-row form.
#[derive(Debug, Clone, PartialEq)]
pub enum Matrix {
    /// Every entry stored, row-major.
    Dense(Array2<f64>),
    /// Only nonzero entries stored (CSR).
    Sparse(CsMat<f64>),
}

impl Matrix {
    /// Builds a dense matrix from a row-per-entry slice, rejecting ragged
    /// or empty input.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidInput`] if `rows` is empty, the
    /// first row is empty, or any row has a different length than the
    /// first.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_rows = rows.len();
        if n_rows == 0 {
            return Err(ProjectionError::InvalidInput {
                message: "expected at least one row".to_string(),
            });
        }
        let n_cols = rows[0].len();
        if n_cols == 0 {
            return Err(ProjectionError::InvalidInput {
                message: "expected at least one column".to_string(),
            });
        }
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(ProjectionError::InvalidInput {
                    message: format!(
                        "row {} has {} entries, expected {}",
                        index,
                        row.len(),
                        n_cols
                    ),
                });
            }
            data.extend_from_slice(row);
        }
        let array = Array2::from_shape_vec((n_rows, n_cols), data).map_err(|e| {
            ProjectionError::InvalidInput {
                message: e.to_string(),
            }
        })?;
        Ok(Matrix::Dense(array))
    }

    /// Number of rows (samples).
    pub fn nrows(&self) -> usize {
        match self {
            Matrix::Dense(dense) => dense.nrows(),
            Matrix::Sparse(sparse) => sparse.rows(),
        }
    }

    /// Number of columns (features).
    pub fn ncols(&self) -> usize {
        match self {
            Matrix::Dense(dense) => dense.ncols(),
            Matrix::Sparse(sparse) => sparse.cols(),
        }
    }

    /// `(rows, columns)` pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Number of structurally nonzero entries. For the dense arm this
    /// counts entries that compare unequal to zero.
    pub fn nnz(&self) -> usize {
        match self {
            Matrix::Dense(dense) => dense.iter().filter(|&&value| value != 0.0).count(),
            Matrix::Sparse(sparse) => sparse.nnz(),
        }
    }

    /// True for the compressed-row arm.
    pub fn is_sparse(&self) -> bool {
        matches!(self, Matrix::Sparse(_))
    }

    /// True for the dense arm.
    pub fn is_dense(&self) -> bool {
        matches!(self, Matrix::Dense(_))
    }

    /// Materializes the data densely, cloning the dense arm as-is.
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            Matrix::Dense(dense) => dense.clone(),
            Matrix::Sparse(sparse) => sparse.to_dense(),
        }
    }

    /// Dense payload, if this is the dense arm.
    pub fn as_dense(&self) -> Option<&Array2<f64>> {
        match self {
            Matrix::Dense(dense) => Some(dense),
            Matrix::Sparse(_) => None,
        }
    }

    /// Sparse payload, if this is the compressed-row arm.
    pub fn as_sparse(&self) -> Option<&CsMat<f64>> {
        match self {
            Matrix::Dense(_) => None,
            Matrix::Sparse(sparse) => Some(sparse),
        }
    }
}

impl From<Array2<f64>> for Matrix {
    fn from(dense: Array2<f64>) -> Self {
        Matrix::Dense(dense)
    }
}

impl From<CsMat<f64>> for Matrix {
    fn from(sparse: CsMat<f64>) -> Self {
        Matrix::Sparse(sparse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use sprs::TriMat;

    #[test]
    fn from_rows_builds_a_dense_matrix() {
        let m = Matrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert!(m.is_dense());
        assert_eq!(m.to_dense(), array![[1.0, 0.0], [0.0, 2.0]]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(&[vec![0.0, 1.0], vec![2.0]]).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { .. }));

        let err = Matrix::from_rows(&[]).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { .. }));

        let err = Matrix::from_rows(&[vec![]]).unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { .. }));
    }

    #[test]
    fn nnz_counts_nonzero_entries_on_both_arms() {
        let dense = Matrix::from(array![[1.0, 0.0, 3.0], [0.0, 0.0, 0.0]]);
        assert_eq!(dense.nnz(), 2);

        let mut triplets = TriMat::new((2, 3));
        triplets.add_triplet(0, 0, 1.0);
        triplets.add_triplet(0, 2, 3.0);
        let sparse = Matrix::from(triplets.to_csr::<usize>());
        assert_eq!(sparse.nnz(), 2);
        assert_eq!(sparse.shape(), (2, 3));
        assert_eq!(sparse.to_dense(), dense.to_dense());
    }
}
