//! Singular value decomposition by one-sided Jacobi rotations.
//!
//! Term-document matrices of search results are small, a few hundred rows
//! by a few hundred columns at most. One-sided Jacobi is accurate at that
//! size and needs no external linear algebra backend. Only the left singular
//! vectors and the singular values are computed.
//!
//! # Examples
//!
//! ```
//! use ndarray::array;
//! use sheaf::matrix::SingularValueDecomposition;
//!
//! let a = array![[3.0, 0.0], [0.0, 4.0], [0.0, 0.0]];
//! let svd = SingularValueDecomposition::compute(&a);
//!
//! assert_eq!(svd.rank(), 2);
//! assert!((svd.singular_values[0] - 4.0).abs() < 1e-12);
//! assert!((svd.left_vectors[[1, 0]] - 1.0).abs() < 1e-12);
//! ```

use ndarray::{Array1, Array2, Axis};

const MAX_SWEEPS: usize = 60;
const EPSILON: f64 = 1e-12;

/// Left singular vectors (as columns) and singular values, sorted by
/// decreasing singular value.
#[derive(Debug, Clone, PartialEq)]
pub struct SingularValueDecomposition {
    pub left_vectors: Array2<f64>,
    pub singular_values: Vec<f64>,
}

impl SingularValueDecomposition {
    /// Decompose `a`. Directions with a numerically zero singular value are
    /// dropped, so the result may have fewer columns than `min(rows, cols)`.
    /// Each vector's sign is chosen so that its components sum to a
    /// non-negative value.
    pub fn compute(a: &Array2<f64>) -> Self {
        let (rows, cols) = a.dim();
        if rows == 0 || cols == 0 {
            return SingularValueDecomposition {
                left_vectors: Array2::zeros((rows, 0)),
                singular_values: Vec::new(),
            };
        }

        // The left vectors of A are the right vectors of A^T.
        let (vectors, values) = if rows >= cols {
            let (u, _, values) = jacobi(a.clone());
            (u, values)
        } else {
            let (_, v, values) = jacobi(a.t().to_owned());
            (v, values)
        };

        let largest = values.iter().copied().fold(0.0, f64::max);
        let mut order: Vec<usize> = (0..values.len())
            .filter(|&j| largest > 0.0 && values[j] > EPSILON * largest)
            .collect();
        order.sort_by(|&x, &y| values[y].total_cmp(&values[x]).then(x.cmp(&y)));

        let mut left_vectors = Array2::zeros((rows, order.len()));
        for (target, &source) in order.iter().enumerate() {
            let mut column: Array1<f64> = vectors.column(source).to_owned();
            let norm = column.dot(&column).sqrt();
            if norm > 0.0 {
                column /= norm;
            }
            if column.sum() < 0.0 {
                column.mapv_inplace(|v| -v);
            }
            left_vectors.column_mut(target).assign(&column);
        }

        SingularValueDecomposition {
            left_vectors,
            singular_values: order.iter().map(|&j| values[j]).collect(),
        }
    }

    pub fn rank(&self) -> usize {
        self.singular_values.len()
    }
}

/// Orthogonalize the columns of `u` (rows >= cols). Returns the rotated
/// matrix, whose column norms are the singular values, the accumulated
/// right rotations, and the column norms.
fn jacobi(mut u: Array2<f64>) -> (Array2<f64>, Array2<f64>, Vec<f64>) {
    let cols = u.ncols();
    let mut v = Array2::eye(cols);

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..cols {
            for q in p + 1..cols {
                let (alpha, beta, gamma) = {
                    let up = u.column(p);
                    let uq = u.column(q);
                    (up.dot(&up), uq.dot(&uq), up.dot(&uq))
                };
                if gamma.abs() <= EPSILON * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = c * t;
                rotate(&mut u, p, q, c, s);
                rotate(&mut v, p, q, c, s);
            }
        }
        if !rotated {
            break;
        }
    }

    let values = u
        .axis_iter(Axis(1))
        .map(|column| column.dot(&column).sqrt())
        .collect();
    (u, v, values)
}

fn rotate(matrix: &mut Array2<f64>, p: usize, q: usize, c: f64, s: f64) {
    for mut row in matrix.rows_mut() {
        let (xp, xq) = (row[p], row[q]);
        row[p] = c * xp - s * xq;
        row[q] = s * xp + c * xq;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_reconstructs_singular_values() {
        let a = array![[2.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 2.0], [0.0, 0.0, 0.0]];
        let svd = SingularValueDecomposition::compute(&a);

        assert_eq!(svd.rank(), 3);
        assert_close(svd.singular_values[0], 3.0);
        assert_close(svd.singular_values[1], 1.0);
        assert_close(svd.singular_values[2], 1.0);

        // First left vector is (1, 0, 1, 0) / sqrt(2), sign normalized.
        let first = svd.left_vectors.column(0);
        assert_close(first[0], 1.0 / 2f64.sqrt());
        assert_close(first[2], 1.0 / 2f64.sqrt());
        assert_close(first[1], 0.0);
    }

    #[test]
    fn test_orthonormal_columns() {
        let a = array![
            [1.0, 0.5, 0.0, 0.2, 0.0],
            [0.0, 0.5, 1.0, 0.0, 0.3],
            [0.7, 0.0, 0.0, 0.9, 0.0],
        ];
        let svd = SingularValueDecomposition::compute(&a);
        assert_eq!(svd.left_vectors.nrows(), 3);

        let gram = svd.left_vectors.t().dot(&svd.left_vectors);
        for i in 0..svd.rank() {
            for j in 0..svd.rank() {
                assert_close(gram[[i, j]], if i == j { 1.0 } else { 0.0 });
            }
        }
        assert!(svd.singular_values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_rank_deficient_and_empty() {
        let a = array![[1.0, 1.0], [1.0, 1.0]];
        let svd = SingularValueDecomposition::compute(&a);
        assert_eq!(svd.rank(), 1);
        assert_close(svd.singular_values[0], 2.0);
        assert!(svd.left_vectors.column(0).sum() > 0.0);

        let empty = SingularValueDecomposition::compute(&Array2::zeros((3, 0)));
        assert_eq!(empty.rank(), 0);
        assert_eq!(empty.left_vectors.dim(), (3, 0));

        let zero = SingularValueDecomposition::compute(&Array2::zeros((2, 2)));
        assert_eq!(zero.rank(), 0);
    }
}
