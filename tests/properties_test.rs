//! Properties every clustering result must have, checked over both
//! algorithms and both aggregation strategies.

use std::collections::BTreeSet;

use sheaf::analysis::language::{LanguageCode, LanguageModels};
use sheaf::cluster::{compare_by_score, compare_by_weighted_score, Cluster};
use sheaf::clustering::multilingual::LanguageAggregationStrategy;
use sheaf::clustering::stc::merger::{BaseCluster, ClusterMerger};
use sheaf::config::{ClusteringAlgorithm, ClusteringConfig, PreprocessingConfig, StcConfig};
use sheaf::document::Document;
use sheaf::engine::{ClusteringEngine, ProcessingResult};
use sheaf::preprocessing::PreprocessingPipeline;
use sheaf::util::bitset::DocumentSet;

fn corpus() -> Vec<Document> {
    [
        ("Data mining techniques for large databases", "Mining patterns in relational data"),
        ("Data mining techniques overview", "A survey of classification and clustering"),
        ("Introduction to data mining techniques", "Clustering, classification and association rules"),
        ("Machine learning for data mining", "Decision trees and neural networks"),
        ("Cooking pasta recipes at home", "Fresh pasta with tomato sauce"),
        ("Easy pasta recipes for beginners", "Tomato sauce and garlic bread"),
        ("Italian pasta recipes", "Traditional recipes from Italy"),
        ("Vegetarian pasta recipes", "Pasta with vegetables and tomato sauce"),
        ("Mountain hiking trails", "Hiking boots and trail maps"),
        ("Best hiking trails in the Alps", "Mountain huts and hiking routes"),
        ("Weather forecast", "Rain expected tomorrow"),
        ("Stock market news", "Shares fell on Monday"),
    ]
    .into_iter()
    .map(|(title, snippet)| Document::new(title, snippet))
    .collect()
}

fn multilingual_corpus() -> Vec<Document> {
    let mut documents = corpus();
    documents.extend(
        [
            "Die besten Wanderwege in den Alpen",
            "Wanderwege und Berghütten in den Alpen",
            "Wanderwege für Anfänger",
        ]
        .into_iter()
        .map(|title| Document::new(title, "").with_language("de")),
    );
    documents
}

fn configs() -> Vec<ClusteringConfig> {
    let mut configs = Vec::new();
    for algorithm in [ClusteringAlgorithm::Lingo, ClusteringAlgorithm::Stc] {
        for aggregation in [
            LanguageAggregationStrategy::FlattenAll,
            LanguageAggregationStrategy::FlattenNone,
        ] {
            let mut config = ClusteringConfig {
                algorithm,
                ..Default::default()
            };
            config.multilingual.aggregation = aggregation;
            configs.push(config);
        }
    }
    configs
}

fn flatten(clusters: &[Cluster], into: &mut Vec<Cluster>) {
    for cluster in clusters {
        into.push(cluster.clone());
        flatten(&cluster.subclusters, into);
    }
}

#[test]
fn test_deterministic() {
    let documents = multilingual_corpus();
    for config in configs() {
        let first = ClusteringEngine::new(config.clone())
            .cluster(&documents, Some("data"))
            .unwrap();
        let second = ClusteringEngine::new(config)
            .cluster(&documents, Some("data"))
            .unwrap();

        assert_eq!(first, second);
        let scores = |result: &ProcessingResult| {
            let mut all = Vec::new();
            flatten(&result.clusters, &mut all);
            all.iter().map(|c| c.score().to_bits()).collect::<Vec<_>>()
        };
        assert_eq!(scores(&first), scores(&second));
    }
}

#[test]
fn test_every_document_is_covered() {
    let documents = multilingual_corpus();
    for config in configs() {
        let result = ClusteringEngine::new(config).cluster(&documents, None).unwrap();

        let covered: BTreeSet<usize> = result
            .clusters
            .iter()
            .flat_map(|cluster| cluster.all_documents())
            .collect();
        assert_eq!(covered, (0..documents.len()).collect());
    }
}

#[test]
fn test_cluster_ids_are_unique() {
    let documents = multilingual_corpus();
    for config in configs() {
        let result = ClusteringEngine::new(config).cluster(&documents, None).unwrap();

        let mut all = Vec::new();
        flatten(&result.clusters, &mut all);
        let ids: BTreeSet<u32> = all.iter().map(|cluster| cluster.id.unwrap()).collect();
        assert_eq!(ids.len(), all.len());
    }
}

#[test]
fn test_flatten_none_groups_by_language() {
    let mut config = ClusteringConfig::stc();
    config.multilingual.aggregation = LanguageAggregationStrategy::FlattenNone;
    let result = ClusteringEngine::new(config)
        .cluster(&multilingual_corpus(), None)
        .unwrap();

    let labels: Vec<String> = result.clusters.iter().map(|c| c.label()).collect();
    assert_eq!(labels, vec!["English", "German"]);
    assert_eq!(result.clusters[1].all_documents(), vec![12, 13, 14]);
}

#[test]
fn test_score_ordering() {
    let mut flat_stc = ClusteringConfig::stc();
    flat_stc.multilingual.aggregation = LanguageAggregationStrategy::FlattenAll;

    for documents in [corpus(), multilingual_corpus()] {
        let result = ClusteringEngine::new(flat_stc.clone())
            .cluster(&documents, None)
            .unwrap();

        assert!(result.topic_clusters().count() > 0);
        for pair in result.clusters.windows(2) {
            assert_ne!(
                compare_by_score(&pair[0], &pair[1]),
                std::cmp::Ordering::Greater,
                "{} before {}",
                pair[0].label(),
                pair[1].label()
            );
        }
        assert!(result.clusters.last().unwrap().is_other_topics());
    }
}

#[test]
fn test_lingo_weighted_score_ordering() {
    let documents = corpus();

    for score_weight in [0.0, 0.5, 1.0] {
        let mut config = ClusteringConfig::lingo();
        config.lingo.score_weight = score_weight;
        let result = ClusteringEngine::new(config.clone())
            .cluster(&documents, None)
            .unwrap();

        assert!(result.topic_clusters().count() > 1);
        let compare = compare_by_weighted_score(config.lingo.score_weight);
        for pair in result.clusters.windows(2) {
            assert_ne!(
                compare(&pair[0], &pair[1]),
                std::cmp::Ordering::Greater,
                "weight {score_weight}: {} before {}",
                pair[0].label(),
                pair[1].label()
            );
        }
        assert!(result.clusters.last().unwrap().is_other_topics());
    }
}

#[test]
fn test_merge_threshold_boundary() {
    let base = |phrase: usize, documents: &[usize]| BaseCluster {
        phrase: vec![phrase],
        content_words: vec![phrase],
        documents: DocumentSet::from_indices(8, documents.iter().copied()).unwrap(),
        score: 3.0,
    };
    // Three of four documents shared in both directions.
    let clusters = [base(0, &[0, 1, 2, 3]), base(1, &[1, 2, 3, 4])];
    let merger = |threshold: f64| {
        ClusterMerger::new(&StcConfig {
            merge_threshold: threshold,
            ..Default::default()
        })
    };

    assert_eq!(merger(0.75).merge(&clusters).len(), 2);
    assert_eq!(merger(0.75 - 1e-9).merge(&clusters).len(), 1);
}

#[test]
fn test_document_frequency_threshold() {
    let documents = corpus();
    let refs: Vec<&Document> = documents.iter().collect();
    let models = LanguageModels::new();

    for threshold in [1, 2, 3] {
        let config = PreprocessingConfig {
            df_threshold: threshold,
            ..Default::default()
        };
        let context = PreprocessingPipeline::complete(config)
            .preprocess(&refs, None, models.model(LanguageCode::English))
            .unwrap();

        assert!(context.has_words());
        assert!(context
            .words
            .iter()
            .all(|word| word.document_frequency() >= threshold));
    }
}
