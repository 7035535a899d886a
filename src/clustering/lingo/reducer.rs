//! Reduction of the term-document matrix to a basis of cluster axes.

use ndarray::{s, Array2};

use crate::matrix::SingularValueDecomposition;

/// Computes the base matrix: the leading left singular vectors of the
/// term-document matrix, one column per candidate cluster.
#[derive(Debug, Clone)]
pub struct MatrixReducer {
    desired_cluster_count_base: usize,
}

impl MatrixReducer {
    pub fn new(desired_cluster_count_base: usize) -> Self {
        MatrixReducer {
            desired_cluster_count_base,
        }
    }

    /// `min(documents, floor(base / 10 * sqrt(documents)))`.
    pub fn desired_cluster_count(&self, document_count: usize) -> usize {
        let count = (self.desired_cluster_count_base as f64 / 10.0
            * (document_count as f64).sqrt())
        .floor() as usize;
        count.min(document_count)
    }

    /// Reduce `term_document` to at most the desired number of basis
    /// vectors. An empty matrix yields a base matrix with no columns.
    pub fn reduce(&self, term_document: &Array2<f64>) -> Array2<f64> {
        let (rows, documents) = term_document.dim();
        if rows == 0 || documents == 0 {
            return Array2::zeros((rows, 0));
        }

        let svd = SingularValueDecomposition::compute(term_document);
        let k = self.desired_cluster_count(documents).min(svd.rank());
        log::debug!(
            "Reduced {rows}x{documents} matrix of rank {} to {k} basis vectors",
            svd.rank()
        );

        svd.left_vectors.slice(s![.., ..k]).to_owned()
    }
}
