//! Dense matrix helpers over `ndarray`.

pub mod svd;

use ndarray::Array2;

pub use self::svd::SingularValueDecomposition;

/// Scale every column to unit Euclidean length. Zero columns stay zero.
pub fn normalize_columns_l2(matrix: &mut Array2<f64>) {
    for mut column in matrix.columns_mut() {
        let norm = column.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            column.mapv_inplace(|v| v / norm);
        }
    }
}
