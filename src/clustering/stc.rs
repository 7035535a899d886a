//! Suffix tree clustering.
//!
//! STC treats every phrase shared by several documents as a candidate
//! cluster. All phrases of the input go into a generalized suffix tree,
//! whose internal nodes are exactly the repeated phrases together with the
//! documents containing them. The best scoring nodes become base clusters;
//! base clusters sharing most of their documents are then merged and
//! labeled with their most descriptive phrases.

pub mod merger;
pub mod sequence;
pub mod suffix_tree;

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::analysis::language::LanguageModel;
use crate::cluster::{compare_by_score, Cluster};
use crate::clustering::MonolingualClusteringAlgorithm;
use crate::config::{PreprocessingConfig, StcConfig};
use crate::document::Document;
use crate::error::Result;
use crate::preprocessing::{LabelFormatter, PreprocessingContext, PreprocessingPipeline};

use self::merger::{BaseCluster, ClusterMerger};
use self::sequence::{PhraseSequence, SequenceBuilder};
use self::suffix_tree::GeneralizedSuffixTree;

/// The suffix tree clustering algorithm.
#[derive(Debug)]
pub struct StcClusteringAlgorithm {
    config: StcConfig,
    preprocessing: PreprocessingPipeline,
    merger: ClusterMerger,
    formatter: LabelFormatter,
}

impl StcClusteringAlgorithm {
    pub fn new(preprocessing: PreprocessingConfig, config: StcConfig) -> Self {
        StcClusteringAlgorithm {
            preprocessing: PreprocessingPipeline::basic(preprocessing),
            merger: ClusterMerger::new(&config),
            formatter: LabelFormatter::new(),
            config,
        }
    }

    pub fn config(&self) -> &StcConfig {
        &self.config
    }

    /// Extract the highest scoring frequent phrases, best first.
    fn base_clusters(
        &self,
        context: &PreprocessingContext<'_>,
        tree: &GeneralizedSuffixTree,
    ) -> Result<Vec<BaseCluster>> {
        let mut queue = BaseClusterQueue::new(self.config.max_base_clusters);

        tree.visit(self.config.min_base_cluster_size, |node| {
            let Some(phrase) = self.acceptable_phrase(context, node.phrase, node.edge_start)
            else {
                return;
            };

            let effective_length = self.effective_length(context, phrase);
            if effective_length == 0 {
                return;
            }

            let score = self.base_cluster_score(effective_length, node.documents.len());
            if score > self.config.min_base_cluster_score && queue.will_insert(score) {
                queue.insert(BaseCluster {
                    phrase: phrase.to_vec(),
                    content_words: phrase
                        .iter()
                        .copied()
                        .filter(|&word| !context.words[word].stop_word)
                        .collect(),
                    documents: node.documents.clone(),
                    score,
                });
            }
        })?;

        Ok(queue.into_sorted_vec())
    }

    /// Reject phrases starting with a stop word, and phrases whose last
    /// edge holds only stop words: a shorter phrase describes the same
    /// documents. Trailing stop words are trimmed from the last edge.
    /// Phrases longer than `max_desc_phrase_length` words are rejected.
    fn acceptable_phrase<'p>(
        &self,
        context: &PreprocessingContext<'_>,
        phrase: &'p [usize],
        edge_start: usize,
    ) -> Option<&'p [usize]> {
        let is_stop_word = |word: usize| context.words[word].stop_word;

        if is_stop_word(*phrase.first()?) {
            return None;
        }

        let mut end = phrase.len();
        while end > edge_start && is_stop_word(phrase[end - 1]) {
            end -= 1;
        }
        if end == edge_start {
            return None;
        }

        (end <= self.config.max_desc_phrase_length).then(|| &phrase[..end])
    }

    /// Number of words that are neither stop words nor too rare or too
    /// frequent in the input.
    fn effective_length(&self, context: &PreprocessingContext<'_>, phrase: &[usize]) -> usize {
        let lower = self.config.ignore_word_if_in_fewer_docs;
        let upper = (self.config.ignore_word_if_in_higher_docs_percent
            * context.document_count() as f64) as usize;

        phrase
            .iter()
            .map(|&word| &context.words[word])
            .filter(|word| !word.stop_word)
            .filter(|word| (lower..=upper).contains(&(word.tf as usize)))
            .count()
    }

    /// `boost(length) * documents * document_count_boost`, where the boost
    /// is a Gaussian around the optimal phrase length, or the single term
    /// boost for one-word phrases when it is positive.
    fn base_cluster_score(&self, effective_length: usize, documents: usize) -> f64 {
        let boost = if effective_length == 1 && self.config.single_term_boost > 0.0 {
            self.config.single_term_boost
        } else {
            let distance = effective_length as f64 - self.config.optimal_phrase_length as f64;
            let deviation = self.config.optimal_phrase_length_dev;
            (-distance * distance / (2.0 * deviation * deviation)).exp()
        };
        boost * documents as f64 * self.config.document_count_boost
    }
}

impl MonolingualClusteringAlgorithm for StcClusteringAlgorithm {
    fn name(&self) -> &'static str {
        "STC"
    }

    fn cluster(
        &mut self,
        documents: &[&Document],
        query: Option<&str>,
        language: LanguageModel,
    ) -> Result<Vec<Cluster>> {
        let context = self.preprocessing.preprocess(documents, query, language)?;
        if documents.is_empty() || !context.has_words() {
            return Ok(Vec::new());
        }

        let tree = GeneralizedSuffixTree::build(phrase_sequence(&context));
        let base_clusters = self.base_clusters(&context, &tree)?;
        let merged = self.merger.merge(&base_clusters);
        log::debug!(
            "STC merged {} base clusters into {} clusters",
            base_clusters.len(),
            merged.len()
        );

        let mut clusters: Vec<Cluster> = merged
            .into_iter()
            .map(|cluster| {
                let phrases = cluster
                    .phrases
                    .iter()
                    .map(|phrase| self.formatter.format_words(&context, phrase))
                    .collect();
                Cluster::with_phrases(phrases, cluster.documents.to_vec()).with_score(cluster.score)
            })
            .collect();
        // Equal score and size: order by label.
        clusters.sort_by(compare_by_score);
        Ok(clusters)
    }
}

/// Split the token stream into phrases: maximal runs of words. Any token
/// that is not a word ends a phrase; document separators and the
/// terminator also end a document.
fn phrase_sequence(context: &PreprocessingContext<'_>) -> PhraseSequence {
    let tokens = &context.tokens;
    let mut builder = SequenceBuilder::new();
    let mut phrase = Vec::new();

    for (word, token_type) in tokens.word_index.iter().zip(&tokens.token_type) {
        match word {
            Some(word) => phrase.push(*word),
            None => {
                builder.add_phrase(&phrase);
                phrase.clear();
                if token_type.is_document_separator() || token_type.is_terminator() {
                    builder.end_document();
                }
            }
        }
    }
    builder.add_phrase(&phrase);
    builder.build()
}

/// Keeps the `capacity` best base clusters seen so far. Among equal scores
/// the earlier cluster ranks higher.
struct BaseClusterQueue {
    capacity: usize,
    heap: BinaryHeap<Reverse<RankedCluster>>,
    inserted: usize,
}

struct RankedCluster {
    sequence: usize,
    cluster: BaseCluster,
}

impl Ord for RankedCluster {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cluster
            .score
            .total_cmp(&other.cluster.score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for RankedCluster {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankedCluster {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedCluster {}

impl BaseClusterQueue {
    fn new(capacity: usize) -> Self {
        BaseClusterQueue {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(1024) + 1),
            inserted: 0,
        }
    }

    fn will_insert(&self, score: f64) -> bool {
        self.heap.len() < self.capacity
            || self
                .heap
                .peek()
                .is_some_and(|Reverse(worst)| worst.cluster.score < score)
    }

    fn insert(&mut self, cluster: BaseCluster) {
        self.heap.push(Reverse(RankedCluster {
            sequence: self.inserted,
            cluster,
        }));
        self.inserted += 1;
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    /// Best first.
    fn into_sorted_vec(self) -> Vec<BaseCluster> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(ranked)| ranked.cluster)
            .collect()
    }
}
