//! Merging base clusters into final clusters.
//!
//! Two base clusters are linked when their shared documents make up more
//! than `merge_threshold` of each of them. Connected groups of linked base
//! clusters become one cluster: documents are united, scores added and the
//! base clusters' phrases compete for the label.

use crate::config::StcConfig;
use crate::util::bitset::DocumentSet;
use crate::util::graph::coherent_subgraphs;

/// A frequent phrase and the documents containing it.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCluster {
    /// Words of the phrase, stop words included.
    pub phrase: Vec<usize>,
    /// Words of the phrase that are not stop words.
    pub content_words: Vec<usize>,
    pub documents: DocumentSet,
    pub score: f64,
}

impl BaseCluster {
    pub fn cardinality(&self) -> usize {
        self.documents.len()
    }
}

/// A group of merged base clusters.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCluster {
    /// Label phrases, by decreasing coverage.
    pub phrases: Vec<Vec<usize>>,
    pub documents: DocumentSet,
    pub score: f64,
}

impl MergedCluster {
    pub fn cardinality(&self) -> usize {
        self.documents.len()
    }
}

#[derive(Debug)]
struct PhraseCandidate<'b> {
    cluster: &'b BaseCluster,
    /// Fraction of the merged cluster's documents containing the phrase.
    coverage: f64,
    selected: bool,
    /// No other candidate is contained in this one.
    most_general: bool,
    /// This candidate is contained in no other one.
    most_specific: bool,
}

#[derive(Debug, Clone)]
pub struct ClusterMerger {
    merge_threshold: f64,
    max_clusters: usize,
    max_phrases: usize,
    max_phrase_overlap: f64,
    most_general_phrase_coverage: f64,
}

impl ClusterMerger {
    pub fn new(config: &StcConfig) -> Self {
        ClusterMerger {
            merge_threshold: config.merge_threshold,
            max_clusters: config.max_clusters,
            max_phrases: config.max_phrases,
            max_phrase_overlap: config.max_phrase_overlap,
            most_general_phrase_coverage: config.most_general_phrase_coverage,
        }
    }

    /// Whether two base clusters overlap enough to merge. The test is
    /// strict in both directions.
    pub fn overlaps(&self, a: &BaseCluster, b: &BaseCluster) -> bool {
        let common = a.documents.intersection_count(&b.documents) as f64;
        common / a.cardinality() as f64 > self.merge_threshold
            && common / b.cardinality() as f64 > self.merge_threshold
    }

    /// Merge `base_clusters` and return at most `max_clusters` results,
    /// sorted by decreasing score, then decreasing size.
    pub fn merge(&self, base_clusters: &[BaseCluster]) -> Vec<MergedCluster> {
        let groups = coherent_subgraphs(
            base_clusters.len(),
            |i, j| self.overlaps(&base_clusters[i], &base_clusters[j]),
            false,
        );

        let mut merged: Vec<MergedCluster> = groups
            .iter()
            .map(|group| self.merge_group(base_clusters, group))
            .collect();
        merged.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.cardinality().cmp(&a.cardinality()))
        });
        merged.truncate(self.max_clusters);
        merged
    }

    fn merge_group(&self, base_clusters: &[BaseCluster], group: &[usize]) -> MergedCluster {
        let Some(&first) = group.first() else {
            return MergedCluster {
                phrases: Vec::new(),
                documents: DocumentSet::new(0),
                score: 0.0,
            };
        };

        let mut documents = base_clusters[first].documents.clone();
        let mut score = 0.0;
        for &index in group {
            documents.union_with(&base_clusters[index].documents);
            score += base_clusters[index].score;
        }

        let cardinality = documents.len() as f64;
        let mut phrases: Vec<PhraseCandidate<'_>> = group
            .iter()
            .map(|&index| {
                let cluster = &base_clusters[index];
                PhraseCandidate {
                    cluster,
                    coverage: cluster.cardinality() as f64 / cardinality,
                    selected: true,
                    most_general: true,
                    most_specific: true,
                }
            })
            .collect();

        self.mark_sub_super_phrases(&mut phrases);
        phrases.retain(|phrase| phrase.selected);
        self.mark_overlapping_phrases(&mut phrases);
        phrases.retain(|phrase| phrase.selected);

        phrases.sort_by(|a, b| b.coverage.total_cmp(&a.coverage));
        MergedCluster {
            phrases: phrases
                .iter()
                .take(self.max_phrases)
                .map(|phrase| phrase.cluster.phrase.clone())
                .collect(),
            documents,
            score,
        }
    }

    /// Keep phrases that are most general or most specific. A most general
    /// phrase is also dropped when a more specific phrase covers nearly as
    /// many documents; the first such phrase decides.
    fn mark_sub_super_phrases(&self, phrases: &mut [PhraseCandidate<'_>]) {
        let count = phrases.len();
        for i in 0..count {
            for j in 0..count {
                if i != j
                    && contains_sequence(
                        &phrases[i].cluster.content_words,
                        &phrases[j].cluster.content_words,
                    )
                {
                    phrases[i].most_general = false;
                    phrases[j].most_specific = false;
                }
            }
        }

        for i in 0..count {
            if !phrases[i].most_general {
                continue;
            }
            for j in 0..count {
                if i == j || !phrases[j].most_specific {
                    continue;
                }
                if contains_sequence(
                    &phrases[j].cluster.content_words,
                    &phrases[i].cluster.content_words,
                ) && phrases[i].coverage - phrases[j].coverage
                    < self.most_general_phrase_coverage
                {
                    phrases[i].selected = false;
                    break;
                }
            }
        }

        for phrase in phrases.iter_mut() {
            if !phrase.most_general && !phrase.most_specific {
                phrase.selected = false;
            }
        }
    }

    /// Drop the less covering phrase of every pair sharing too many
    /// distinct words.
    fn mark_overlapping_phrases(&self, phrases: &mut [PhraseCandidate<'_>]) {
        let words: Vec<Vec<usize>> = phrases
            .iter()
            .map(|phrase| {
                let mut words = phrase.cluster.content_words.clone();
                words.sort_unstable();
                words.dedup();
                words
            })
            .collect();

        for i in 0..phrases.len() {
            for j in (i + 1)..phrases.len() {
                let common = sorted_intersection_count(&words[i], &words[j]) as f64;
                if common / words[j].len() as f64 > self.max_phrase_overlap
                    && phrases[j].coverage < phrases[i].coverage
                {
                    phrases[j].selected = false;
                }
                if common / words[i].len() as f64 > self.max_phrase_overlap
                    && phrases[i].coverage < phrases[j].coverage
                {
                    phrases[i].selected = false;
                }
            }
        }
    }
}

/// Whether `target` occurs as a contiguous run in `source`.
fn contains_sequence(source: &[usize], target: &[usize]) -> bool {
    target.is_empty() || source.windows(target.len()).any(|window| window == target)
}

fn sorted_intersection_count(a: &[usize], b: &[usize]) -> usize {
    let (mut i, mut j, mut common) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    common
}
