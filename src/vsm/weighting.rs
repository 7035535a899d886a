//! Term weighting schemes for the term-document matrix.

use serde::{Deserialize, Serialize};

/// How a term's frequency in a document turns into a matrix weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermWeighting {
    /// 1 if the term occurs, 0 otherwise.
    Binary,
    /// The raw term frequency.
    Tf,
    /// `tf * ln(documents / df)`. Terms present in every document weigh 0.
    #[default]
    LogTfIdf,
}

impl TermWeighting {
    /// Weight of a term occurring `tf` times, present in `df` of
    /// `document_count` documents.
    pub fn weight(self, tf: f64, df: usize, document_count: usize) -> f64 {
        match self {
            TermWeighting::Binary => {
                if tf > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            TermWeighting::Tf => tf,
            TermWeighting::LogTfIdf => {
                if df == 0 {
                    0.0
                } else {
                    tf * (document_count as f64 / df as f64).ln()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights() {
        assert_eq!(TermWeighting::Binary.weight(3.0, 2, 10), 1.0);
        assert_eq!(TermWeighting::Binary.weight(0.0, 2, 10), 0.0);
        assert_eq!(TermWeighting::Tf.weight(3.0, 2, 10), 3.0);
        assert!((TermWeighting::LogTfIdf.weight(2.0, 1, 10) - 2.0 * 10f64.ln()).abs() < 1e-12);
        assert_eq!(TermWeighting::LogTfIdf.weight(2.0, 10, 10), 0.0);
        assert_eq!(TermWeighting::LogTfIdf.weight(2.0, 0, 10), 0.0);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&TermWeighting::LogTfIdf).unwrap(),
            "\"log_tf_idf\""
        );
    }
}
