//! Lingo: label-first clustering.
//!
//! Lingo looks for good cluster labels before it looks for clusters. The
//! term-document matrix of the input is reduced to a handful of orthogonal
//! basis vectors, each standing for one abstract topic. Frequent phrases and
//! words are then matched against the basis vectors, the best match naming
//! the topic, and each cluster takes the documents containing its label.
//!
//! The stages are:
//!
//! 1. complete preprocessing, yielding label candidates and their documents
//! 2. [`TermDocumentMatrixBuilder`]: term-document and term-phrase matrices
//! 3. [`MatrixReducer`]: truncated singular value decomposition
//! 4. [`ClusterBuilder`]: candidate scoring, label assignment, merging
//! 5. label formatting and ordering

pub mod cluster_builder;
pub mod label_assigner;
pub mod reducer;

use crate::analysis::language::LanguageModel;
use crate::cluster::{compare_by_weighted_score, Cluster};
use crate::clustering::MonolingualClusteringAlgorithm;
use crate::config::{LingoConfig, PreprocessingConfig};
use crate::document::Document;
use crate::error::Result;
use crate::preprocessing::{LabelFormatter, PreprocessingPipeline};
use crate::vsm::TermDocumentMatrixBuilder;

use self::cluster_builder::ClusterBuilder;
use self::label_assigner::LabelAssigner;
use self::reducer::MatrixReducer;

/// The Lingo clustering algorithm.
#[derive(Debug)]
pub struct LingoClusteringAlgorithm {
    config: LingoConfig,
    preprocessing: PreprocessingPipeline,
    matrix_builder: TermDocumentMatrixBuilder,
    reducer: MatrixReducer,
    cluster_builder: ClusterBuilder,
    label_assigner: Box<dyn LabelAssigner>,
    formatter: LabelFormatter,
}

impl LingoClusteringAlgorithm {
    pub fn new(preprocessing: PreprocessingConfig, config: LingoConfig) -> Self {
        LingoClusteringAlgorithm {
            preprocessing: PreprocessingPipeline::complete(preprocessing),
            matrix_builder: TermDocumentMatrixBuilder::new(
                config.term_weighting,
                config.title_words_boost,
                config.max_word_df,
                config.maximum_matrix_size,
            ),
            reducer: MatrixReducer::new(config.desired_cluster_count_base),
            cluster_builder: ClusterBuilder::new(&config),
            label_assigner: config.label_assignment.assigner(),
            formatter: LabelFormatter::new(),
            config,
        }
    }

    pub fn config(&self) -> &LingoConfig {
        &self.config
    }
}

impl MonolingualClusteringAlgorithm for LingoClusteringAlgorithm {
    fn name(&self) -> &'static str {
        "Lingo"
    }

    fn cluster(
        &mut self,
        documents: &[&Document],
        query: Option<&str>,
        language: LanguageModel,
    ) -> Result<Vec<Cluster>> {
        let context = self.preprocessing.preprocess(documents, query, language)?;
        if !context.has_labels() {
            log::debug!("No label candidates in {} documents", documents.len());
            return Ok(Vec::new());
        }

        let model = self.matrix_builder.build(&context);
        if model.row_count() == 0 {
            return Ok(Vec::new());
        }
        let base = self.reducer.reduce(&model.term_document);

        let mut candidates = self.cluster_builder.build_labels(
            &context,
            &model,
            &base,
            self.label_assigner.as_ref(),
        );
        self.cluster_builder.merge(&mut candidates);

        let mut clusters: Vec<Cluster> = candidates
            .into_iter()
            .filter(|candidate| candidate.documents.len() > 1)
            .filter_map(|candidate| {
                let label = candidate.label?;
                let feature_index = context.labels[label].feature_index;
                Some(
                    Cluster::new(
                        self.formatter.format(&context, feature_index),
                        candidate.documents.to_vec(),
                    )
                    .with_score(candidate.score),
                )
            })
            .collect();
        clusters.sort_by(compare_by_weighted_score(self.config.score_weight));

        log::debug!(
            "Lingo found {} clusters using {} basis vectors",
            clusters.len(),
            base.ncols()
        );
        Ok(clusters)
    }
}
