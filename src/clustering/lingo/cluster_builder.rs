//! Turning basis vectors into labeled clusters.
//!
//! Every label candidate is scored against every basis vector by cosine
//! similarity, scaled by how well the candidate's document count suits a
//! cluster label and, for phrases, by a length penalty and a phrase boost.
//! The label assigner then picks one candidate per basis vector; the
//! candidate's documents become the cluster's documents. Finally clusters
//! covering nearly the same documents are merged.

use ndarray::{Array2, Axis};

use crate::clustering::lingo::label_assigner::LabelAssigner;
use crate::config::LingoConfig;
use crate::preprocessing::context::PreprocessingContext;
use crate::util::bitset::DocumentSet;
use crate::util::graph::coherent_subgraphs;
use crate::util::linear::LinearApproximation;
use crate::vsm::VectorSpaceModel;

/// Score multiplier by the fraction of documents a candidate occurs in.
/// Candidates in about a tenth of the documents are favored, candidates in
/// most documents are nearly ruled out.
const DOCUMENT_SIZE_COEFFICIENTS: [f64; 11] =
    [1.0, 1.5, 1.3, 0.9, 0.7, 0.6, 0.3, 0.05, 0.05, 0.05, 0.05];

/// A cluster under construction. A `label` of `None` marks a cluster merged
/// into another one.
#[derive(Debug, Clone, PartialEq)]
pub struct LingoCluster {
    /// Index into the context's label candidates.
    pub label: Option<usize>,
    pub score: f64,
    pub documents: DocumentSet,
}

#[derive(Debug, Clone)]
pub struct ClusterBuilder {
    phrase_label_boost: f64,
    phrase_length_penalty_start: usize,
    phrase_length_penalty_stop: usize,
    cluster_merging_threshold: f64,
    document_size_coefficients: LinearApproximation,
}

impl ClusterBuilder {
    pub fn new(config: &LingoConfig) -> Self {
        ClusterBuilder {
            phrase_label_boost: config.phrase_label_boost,
            phrase_length_penalty_start: config.phrase_length_penalty_start,
            phrase_length_penalty_stop: config
                .phrase_length_penalty_stop
                .max(config.phrase_length_penalty_start),
            cluster_merging_threshold: config.cluster_merging_threshold,
            document_size_coefficients: LinearApproximation::new(
                DOCUMENT_SIZE_COEFFICIENTS.to_vec(),
                0.0,
                1.0,
            ),
        }
    }

    /// Score candidates against `base` (terms by basis vectors) and let the
    /// assigner pick a label for each basis vector.
    pub fn build_labels(
        &self,
        context: &PreprocessingContext<'_>,
        model: &VectorSpaceModel,
        base: &Array2<f64>,
        assigner: &dyn LabelAssigner,
    ) -> Vec<LingoCluster> {
        let (scores, candidates) = self.candidate_scores(context, model, base);
        let assignments = assigner.assign(&scores);

        assignments
            .into_iter()
            .flatten()
            .map(|assignment| {
                let label = candidates[assignment.candidate];
                LingoCluster {
                    label: Some(label),
                    score: assignment.score,
                    documents: context.labels[label].documents.clone(),
                }
            })
            .collect()
    }

    /// One row per scorable candidate: single words whose stem has a matrix
    /// row, then all phrases. Returns the scores and the label index of
    /// every row.
    fn candidate_scores(
        &self,
        context: &PreprocessingContext<'_>,
        model: &VectorSpaceModel,
        base: &Array2<f64>,
    ) -> (Array2<f64>, Vec<usize>) {
        let document_count = context.document_count();
        let mut rows = Vec::new();
        let mut candidates = Vec::new();

        for (label, candidate) in context.word_labels().iter().enumerate() {
            let stem = context.words[candidate.feature_index].stem_index;
            let Some(row) = model.stem_to_row[stem] else {
                continue;
            };
            let penalty = self.document_count_penalty(candidate.documents.len(), document_count);
            rows.push(base.row(row).mapv(|cosine| cosine * penalty));
            candidates.push(label);
        }

        let first_phrase = context.first_phrase_index.unwrap_or(context.labels.len());
        let phrase_cosines = model.term_phrase.t().dot(base);
        for (column, candidate) in context.phrase_labels().iter().enumerate() {
            let length = context.feature_word_indices(candidate.feature_index).len();
            let penalty = self.phrase_penalty(length, candidate.documents.len(), document_count);
            rows.push(
                phrase_cosines
                    .row(column)
                    .mapv(|cosine| cosine * penalty * self.phrase_label_boost),
            );
            candidates.push(first_phrase + column);
        }

        let mut scores = Array2::zeros((rows.len(), base.ncols()));
        for (mut target, row) in scores.axis_iter_mut(Axis(0)).zip(&rows) {
            target.assign(row);
        }
        (scores, candidates)
    }

    fn document_count_penalty(&self, label_documents: usize, document_count: usize) -> f64 {
        if document_count == 0 {
            return 0.0;
        }
        self.document_size_coefficients
            .value(label_documents as f64 / document_count as f64)
    }

    /// Phrases reaching the stop length score zero; from the start length on,
    /// the penalty decreases linearly.
    fn phrase_penalty(&self, length: usize, label_documents: usize, document_count: usize) -> f64 {
        if length >= self.phrase_length_penalty_stop {
            return 0.0;
        }

        let mut penalty = self.document_count_penalty(label_documents, document_count);
        if length >= self.phrase_length_penalty_start {
            let step = 1.0
                / (self.phrase_length_penalty_stop - self.phrase_length_penalty_start + 1) as f64;
            penalty *= 1.0 - step * (length - self.phrase_length_penalty_start + 1) as f64;
        }
        penalty
    }

    /// Merge clusters whose overlap, relative to the larger of the two,
    /// reaches the merging threshold. Each group of connected clusters
    /// collapses into its highest scoring member, the lowest index among
    /// equal scores; the others are tombstoned.
    pub fn merge(&self, clusters: &mut [LingoCluster]) {
        let groups = coherent_subgraphs(
            clusters.len(),
            |a, b| {
                let (a, b) = (&clusters[a], &clusters[b]);
                let larger = a.documents.len().max(b.documents.len());
                larger > 0
                    && a.documents.intersection_count(&b.documents) as f64 / larger as f64
                        >= self.cluster_merging_threshold
            },
            true,
        );

        for group in groups {
            let mut base = group[0];
            for &index in &group[1..] {
                let score = clusters[index].score;
                if score > clusters[base].score || (score == clusters[base].score && index < base) {
                    base = index;
                }
            }

            for &index in &group {
                if index == base {
                    continue;
                }
                let documents = clusters[index].documents.clone();
                clusters[base].documents.union_with(&documents);
                clusters[index].label = None;
            }
            log::debug!("Merged {} clusters into cluster {base}", group.len());
        }
    }
}
