//! Conversion of coordinate-list matrices into dense row-major form

use std::borrow::Cow;

use lpbridge_model::{Matrix, SparseMatrix};

/// Expand a coordinate list into a zero-filled `shape[0] × shape[1]` matrix.
///
/// Duplicate coordinates are not summed: the last entry written wins.
///
/// # Panics
///
/// Panics if an index lies outside `shape`. Callers validate the problem first.
pub fn to_dense(sparse: &SparseMatrix) -> Vec<Vec<f64>> {
    let [num_rows, num_cols] = sparse.shape;
    let mut dense = vec![vec![0.0; num_cols]; num_rows];
    for ((&row, &col), &value) in sparse.rows.iter().zip(&sparse.cols).zip(&sparse.values) {
        dense[row][col] = value;
    }
    dense
}

/// Dense rows of either representation, borrowing when already dense
pub fn dense_rows(matrix: &Matrix) -> Cow<'_, [Vec<f64>]> {
    match matrix {
        Matrix::Dense(rows) => Cow::Borrowed(rows.as_slice()),
        Matrix::Sparse(sparse) => Cow::Owned(to_dense(sparse)),
    }
}
