//! Matching label candidates to basis vectors.
//!
//! An assigner receives a score matrix with one row per label candidate and
//! one column per basis vector, and picks at most one candidate per column.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Which [`LabelAssigner`] a Lingo run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAssignmentMethod {
    /// Every candidate labels at most one basis vector.
    #[default]
    Unique,
    /// Every basis vector takes its best candidate, even if another vector
    /// took it too.
    Simple,
}

impl LabelAssignmentMethod {
    pub fn assigner(self) -> Box<dyn LabelAssigner> {
        match self {
            LabelAssignmentMethod::Unique => Box::new(UniqueLabelAssigner),
            LabelAssignmentMethod::Simple => Box::new(SimpleLabelAssigner),
        }
    }
}

/// The candidate chosen for one basis vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAssignment {
    /// Row of the score matrix.
    pub candidate: usize,
    pub score: f64,
}

pub trait LabelAssigner: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Choose a candidate for each column of `scores`. Columns whose best
    /// score is not positive stay unassigned.
    fn assign(&self, scores: &Array2<f64>) -> Vec<Option<LabelAssignment>>;
}

/// Greedy assignment: repeatedly takes the largest remaining score, then
/// retires its row and column.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueLabelAssigner;

impl LabelAssigner for UniqueLabelAssigner {
    fn name(&self) -> &'static str {
        "unique"
    }

    fn assign(&self, scores: &Array2<f64>) -> Vec<Option<LabelAssignment>> {
        let (rows, columns) = scores.dim();
        let mut assignments = vec![None; columns];
        let mut row_taken = vec![false; rows];
        let mut column_taken = vec![false; columns];

        for _ in 0..rows.min(columns) {
            let mut best: Option<(usize, usize, f64)> = None;
            for ((row, column), &score) in scores.indexed_iter() {
                if row_taken[row] || column_taken[column] {
                    continue;
                }
                if best.is_none_or(|(_, _, max)| score > max) {
                    best = Some((row, column, score));
                }
            }

            match best {
                Some((row, column, score)) if score > 0.0 => {
                    assignments[column] = Some(LabelAssignment {
                        candidate: row,
                        score,
                    });
                    row_taken[row] = true;
                    column_taken[column] = true;
                }
                _ => break,
            }
        }

        assignments
    }
}

/// Independent per-column maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleLabelAssigner;

impl LabelAssigner for SimpleLabelAssigner {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn assign(&self, scores: &Array2<f64>) -> Vec<Option<LabelAssignment>> {
        scores
            .columns()
            .into_iter()
            .map(|column| {
                let mut best: Option<LabelAssignment> = None;
                for (candidate, &score) in column.iter().enumerate() {
                    if score > 0.0 && best.is_none_or(|best| score > best.score) {
                        best = Some(LabelAssignment { candidate, score });
                    }
                }
                best
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn candidates(assignments: &[Option<LabelAssignment>]) -> Vec<Option<usize>> {
        assignments.iter().map(|a| a.map(|a| a.candidate)).collect()
    }

    #[test]
    fn test_unique_assigner() {
        let scores = array![[0.9, 0.8, 0.0], [0.5, 0.1, 0.0], [0.0, 0.0, 0.0]];
        let assignments = UniqueLabelAssigner.assign(&scores);

        // Row 0 wins column 0, so column 1 falls back to row 1; column 2 has
        // no positive score left.
        assert_eq!(candidates(&assignments), vec![Some(0), Some(1), None]);
        assert_eq!(assignments[1].map(|a| a.score), Some(0.1));
    }

    #[test]
    fn test_simple_assigner_reuses_labels() {
        let scores = array![[0.9, 0.8, 0.0], [0.5, 0.1, 0.0]];
        let assignments = SimpleLabelAssigner.assign(&scores);
        assert_eq!(candidates(&assignments), vec![Some(0), Some(0), None]);
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let scores = array![[0.5], [0.5]];
        assert_eq!(candidates(&UniqueLabelAssigner.assign(&scores)), vec![Some(0)]);
        assert_eq!(candidates(&SimpleLabelAssigner.assign(&scores)), vec![Some(0)]);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(LabelAssignmentMethod::Unique.assigner().name(), "unique");
        assert_eq!(LabelAssignmentMethod::Simple.assigner().name(), "simple");
        assert_eq!(
            serde_json::from_str::<LabelAssignmentMethod>("\"simple\"").unwrap(),
            LabelAssignmentMethod::Simple
        );
    }
}
