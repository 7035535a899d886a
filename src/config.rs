//! Configuration for clustering runs.
//!
//! Every tunable of the pipeline lives in a plain serde struct with a
//! documented default, grouped by component. Out-of-range values are not an
//! error: [`ClusteringConfig::normalized`] clamps them into range and logs a
//! warning for each correction.
//!
//! # Example
//!
//! ```
//! use sheaf::config::{ClusteringAlgorithm, ClusteringConfig};
//!
//! let mut config = ClusteringConfig::stc();
//! config.stc.max_clusters = 10;
//! config.lingo.phrase_length_penalty_start = 6;
//! config.lingo.phrase_length_penalty_stop = 4;
//!
//! let config = config.normalized();
//! assert_eq!(config.algorithm, ClusteringAlgorithm::Stc);
//! assert_eq!(config.lingo.phrase_length_penalty_stop, 6);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::language::LanguageCode;
use crate::clustering::lingo::label_assigner::LabelAssignmentMethod;
use crate::clustering::multilingual::LanguageAggregationStrategy;
use crate::error::Result;
use crate::vsm::weighting::TermWeighting;

/// The monolingual clustering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusteringAlgorithm {
    /// Label-first clustering over a reduced term-document matrix.
    #[default]
    Lingo,
    /// Suffix tree clustering of frequent phrases.
    Stc,
}

impl ClusteringAlgorithm {
    /// Get a human-readable name for the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            ClusteringAlgorithm::Lingo => "Lingo",
            ClusteringAlgorithm::Stc => "STC",
        }
    }
}

/// Top-level configuration of one clustering engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Which strategy clusters each language partition.
    pub algorithm: ClusteringAlgorithm,
    /// Tokenizing, normalization, phrase and label candidate extraction.
    pub preprocessing: PreprocessingConfig,
    /// Lingo parameters.
    pub lingo: LingoConfig,
    /// Suffix tree clustering parameters.
    pub stc: StcConfig,
    /// Language partitioning and result aggregation.
    pub multilingual: MultilingualConfig,
}

impl ClusteringConfig {
    /// Default configuration using Lingo.
    pub fn lingo() -> Self {
        ClusteringConfig::default()
    }

    /// Default configuration using suffix tree clustering.
    pub fn stc() -> Self {
        ClusteringConfig {
            algorithm: ClusteringAlgorithm::Stc,
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Clamp every value into its valid range.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Clamp every value into its valid range, in place.
    pub fn normalize(&mut self) {
        self.preprocessing.normalize();
        self.lingo.normalize();
        self.stc.normalize();
    }
}

/// Preprocessing parameters shared by both strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingConfig {
    /// Words occurring in fewer documents are dropped (1..=100).
    pub df_threshold: usize,
    /// Phrases occurring in fewer documents are dropped (1..=100).
    pub phrase_df_threshold: usize,
    /// Longest phrase extracted, in words (2..=16).
    pub max_phrase_length: usize,
    /// Label candidates covering fewer documents are dropped (1..=100).
    pub min_cluster_size: usize,
    /// Assign phrase labels only to documents containing the exact phrase,
    /// instead of all documents containing each of its words.
    pub exact_phrase_assignment: bool,
    /// Label candidate filters.
    pub label_filters: LabelFilterConfig,
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        PreprocessingConfig {
            df_threshold: 1,
            phrase_df_threshold: 1,
            max_phrase_length: 8,
            min_cluster_size: 2,
            exact_phrase_assignment: false,
            label_filters: LabelFilterConfig::default(),
        }
    }
}

impl PreprocessingConfig {
    fn normalize(&mut self) {
        clamp_usize("df_threshold", &mut self.df_threshold, 1, 100);
        clamp_usize("phrase_df_threshold", &mut self.phrase_df_threshold, 1, 100);
        clamp_usize("max_phrase_length", &mut self.max_phrase_length, 2, 16);
        clamp_usize("min_cluster_size", &mut self.min_cluster_size, 1, 100);
        clamp_f64(
            "complete_label_threshold",
            &mut self.label_filters.complete_label_threshold,
            0.0,
            1.0,
        );
        clamp_usize(
            "min_label_length",
            &mut self.label_filters.min_label_length,
            1,
            32,
        );
    }
}

/// Switches and thresholds of the label candidate filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelFilterConfig {
    /// Reject labels made only of query words.
    pub query: bool,
    /// Reject single words shorter than `min_label_length` characters.
    pub min_length: bool,
    /// Minimum single-word label length in characters.
    pub min_label_length: usize,
    /// Reject labels ending in a possessive (`'s`).
    pub genitive: bool,
    /// Reject stop words, and phrases starting or ending with one.
    pub stop_word: bool,
    /// Reject numbers, and phrases starting with one.
    pub numeric: bool,
    /// Reject labels that are almost always part of a longer phrase.
    pub complete: bool,
    /// Frequency ratio above which a longer phrase overrides a label (0..=1).
    pub complete_label_threshold: f64,
}

impl Default for LabelFilterConfig {
    fn default() -> Self {
        LabelFilterConfig {
            query: true,
            min_length: true,
            min_label_length: 3,
            genitive: true,
            stop_word: true,
            numeric: true,
            complete: true,
            complete_label_threshold: 0.65,
        }
    }
}

/// Lingo parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LingoConfig {
    /// Scales the number of basis vectors, `base / 10 * sqrt(documents)`
    /// (2..=100).
    pub desired_cluster_count_base: usize,
    /// Multiplier favoring phrase labels over single words (0..=10).
    pub phrase_label_boost: f64,
    /// Phrase length, in words, at which the length penalty starts (2..=8).
    pub phrase_length_penalty_start: usize,
    /// Phrase length at which phrase scores reach zero (2..=8, at least
    /// `phrase_length_penalty_start`).
    pub phrase_length_penalty_stop: usize,
    /// Document overlap above which clusters are merged (0..=1).
    pub cluster_merging_threshold: f64,
    /// Balance between cluster size (0) and label score (1) when sorting.
    pub score_weight: f64,
    /// How labels are matched to basis vectors.
    pub label_assignment: LabelAssignmentMethod,
    /// Term weighting of the term-document matrix.
    pub term_weighting: TermWeighting,
    /// Weight multiplier of words appearing in titles (0..=10).
    pub title_words_boost: f64,
    /// Words in a larger fraction of documents are left out of the matrix
    /// (0..=1).
    pub max_word_df: f64,
    /// Upper bound on the number of term-document matrix cells.
    pub maximum_matrix_size: usize,
}

impl Default for LingoConfig {
    fn default() -> Self {
        LingoConfig {
            desired_cluster_count_base: 30,
            phrase_label_boost: 1.5,
            phrase_length_penalty_start: 8,
            phrase_length_penalty_stop: 8,
            cluster_merging_threshold: 0.7,
            score_weight: 0.0,
            label_assignment: LabelAssignmentMethod::Unique,
            term_weighting: TermWeighting::LogTfIdf,
            title_words_boost: 2.0,
            max_word_df: 1.0,
            maximum_matrix_size: 250 * 150,
        }
    }
}

impl LingoConfig {
    fn normalize(&mut self) {
        clamp_usize(
            "desired_cluster_count_base",
            &mut self.desired_cluster_count_base,
            2,
            100,
        );
        clamp_f64("phrase_label_boost", &mut self.phrase_label_boost, 0.0, 10.0);
        clamp_usize(
            "phrase_length_penalty_start",
            &mut self.phrase_length_penalty_start,
            2,
            8,
        );
        clamp_usize(
            "phrase_length_penalty_stop",
            &mut self.phrase_length_penalty_stop,
            self.phrase_length_penalty_start,
            8,
        );
        clamp_f64(
            "cluster_merging_threshold",
            &mut self.cluster_merging_threshold,
            0.0,
            1.0,
        );
        clamp_f64("score_weight", &mut self.score_weight, 0.0, 1.0);
        clamp_f64("title_words_boost", &mut self.title_words_boost, 0.0, 10.0);
        clamp_f64("max_word_df", &mut self.max_word_df, 0.0, 1.0);
        clamp_usize(
            "maximum_matrix_size",
            &mut self.maximum_matrix_size,
            1,
            usize::MAX,
        );
    }
}

/// Suffix tree clustering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StcConfig {
    /// Words in fewer documents do not count towards phrase length.
    pub ignore_word_if_in_fewer_docs: usize,
    /// Words in a larger fraction of documents do not count towards phrase
    /// length (0..=1).
    pub ignore_word_if_in_higher_docs_percent: f64,
    /// Base clusters must score above this (0..=10).
    pub min_base_cluster_score: f64,
    /// Base clusters kept for merging (at least 2).
    pub max_base_clusters: usize,
    /// Minimum number of documents of a base cluster (2..=20).
    pub min_base_cluster_size: usize,
    /// Final clusters returned (at least 1).
    pub max_clusters: usize,
    /// Document overlap, in both directions, above which base clusters
    /// merge (0..=1).
    pub merge_threshold: f64,
    /// Word overlap above which the less covering label phrase is dropped
    /// (0..=1).
    pub max_phrase_overlap: f64,
    /// Coverage advantage a general phrase needs over a more specific one
    /// to be kept (0..=1).
    pub most_general_phrase_coverage: f64,
    /// Longest label phrase, in words (at least 1).
    pub max_desc_phrase_length: usize,
    /// Label phrases per cluster (at least 1).
    pub max_phrases: usize,
    /// Score multiplier of one-word phrases; zero uses the length curve.
    pub single_term_boost: f64,
    /// Phrase length with the highest score (at least 1).
    pub optimal_phrase_length: usize,
    /// Width of the phrase length curve (at least 0.5).
    pub optimal_phrase_length_dev: f64,
    /// Weight of the number of documents in a base cluster score.
    pub document_count_boost: f64,
}

impl Default for StcConfig {
    fn default() -> Self {
        StcConfig {
            ignore_word_if_in_fewer_docs: 2,
            ignore_word_if_in_higher_docs_percent: 0.9,
            min_base_cluster_score: 2.0,
            max_base_clusters: 300,
            min_base_cluster_size: 2,
            max_clusters: 15,
            merge_threshold: 0.6,
            max_phrase_overlap: 0.6,
            most_general_phrase_coverage: 0.5,
            max_desc_phrase_length: 4,
            max_phrases: 3,
            single_term_boost: 0.5,
            optimal_phrase_length: 3,
            optimal_phrase_length_dev: 2.0,
            document_count_boost: 1.0,
        }
    }
}

impl StcConfig {
    fn normalize(&mut self) {
        clamp_usize(
            "ignore_word_if_in_fewer_docs",
            &mut self.ignore_word_if_in_fewer_docs,
            2,
            usize::MAX,
        );
        clamp_f64(
            "ignore_word_if_in_higher_docs_percent",
            &mut self.ignore_word_if_in_higher_docs_percent,
            0.0,
            1.0,
        );
        clamp_f64(
            "min_base_cluster_score",
            &mut self.min_base_cluster_score,
            0.0,
            10.0,
        );
        clamp_usize(
            "max_base_clusters",
            &mut self.max_base_clusters,
            2,
            usize::MAX,
        );
        clamp_usize(
            "min_base_cluster_size",
            &mut self.min_base_cluster_size,
            2,
            20,
        );
        clamp_usize("max_clusters", &mut self.max_clusters, 1, usize::MAX);
        clamp_f64("merge_threshold", &mut self.merge_threshold, 0.0, 1.0);
        clamp_f64("max_phrase_overlap", &mut self.max_phrase_overlap, 0.0, 1.0);
        clamp_f64(
            "most_general_phrase_coverage",
            &mut self.most_general_phrase_coverage,
            0.0,
            1.0,
        );
        clamp_usize(
            "max_desc_phrase_length",
            &mut self.max_desc_phrase_length,
            1,
            usize::MAX,
        );
        clamp_usize("max_phrases", &mut self.max_phrases, 1, usize::MAX);
        clamp_f64(
            "single_term_boost",
            &mut self.single_term_boost,
            0.0,
            f64::MAX,
        );
        clamp_usize(
            "optimal_phrase_length",
            &mut self.optimal_phrase_length,
            1,
            usize::MAX,
        );
        clamp_f64(
            "optimal_phrase_length_dev",
            &mut self.optimal_phrase_length_dev,
            0.5,
            f64::MAX,
        );
        clamp_f64(
            "document_count_boost",
            &mut self.document_count_boost,
            0.0,
            f64::MAX,
        );
    }
}

/// Language partitioning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultilingualConfig {
    /// How per-language cluster lists are combined.
    pub aggregation: LanguageAggregationStrategy,
    /// Language of documents without a declared (or detected) language.
    pub default_language: LanguageCode,
    /// Guess the language of documents that do not declare one.
    pub detect_language: bool,
}

impl Default for MultilingualConfig {
    fn default() -> Self {
        MultilingualConfig {
            aggregation: LanguageAggregationStrategy::FlattenAll,
            default_language: LanguageCode::English,
            detect_language: false,
        }
    }
}

fn clamp_usize(name: &str, value: &mut usize, min: usize, max: usize) {
    let clamped = (*value).clamp(min, max);
    if clamped != *value {
        log::warn!("{name} = {value} is out of range [{min}, {max}], using {clamped}");
        *value = clamped;
    }
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    let clamped = if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    };
    if clamped != *value || value.is_nan() {
        log::warn!("{name} = {value} is out of range [{min}, {max}], using {clamped}");
        *value = clamped;
    }
}
