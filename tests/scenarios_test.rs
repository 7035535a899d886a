//! End-to-end clustering scenarios through the public engine API.

use sheaf::analysis::language::{LanguageCode, LanguageModels};
use sheaf::clustering::stc::merger::{BaseCluster, ClusterMerger};
use sheaf::config::{ClusteringAlgorithm, ClusteringConfig, StcConfig};
use sheaf::document::Document;
use sheaf::engine::ClusteringEngine;
use sheaf::preprocessing::PreprocessingPipeline;
use sheaf::util::bitset::DocumentSet;
use sheaf::vsm::TermWeighting;

fn documents(titles: &[&str]) -> Vec<Document> {
    titles.iter().map(|title| Document::new(*title, "")).collect()
}

const QUANTUM: [&str; 3] = [
    "Quantum computing breakthrough announced",
    "Researchers explain quantum computing",
    "Quantum computing startups raise funding",
];

#[test]
fn test_shared_phrase_lingo() {
    let mut config = ClusteringConfig::lingo();
    config.preprocessing.df_threshold = 1;
    config.lingo.term_weighting = TermWeighting::Tf;

    let result = ClusteringEngine::new(config)
        .cluster(&documents(&QUANTUM), None)
        .unwrap();

    assert_eq!(result.clusters.len(), 1);
    assert_eq!(result.clusters[0].label(), "Quantum Computing");
    assert_eq!(result.clusters[0].documents, vec![0, 1, 2]);
    assert!(result.other_topics().is_none());
}

#[test]
fn test_shared_phrase_stc() {
    let mut config = ClusteringConfig::stc();
    config.stc.ignore_word_if_in_higher_docs_percent = 1.0;

    let result = ClusteringEngine::new(config)
        .cluster(&documents(&QUANTUM), None)
        .unwrap();

    assert_eq!(result.clusters.len(), 1);
    assert_eq!(result.clusters[0].phrases, vec!["Quantum Computing"]);
    assert_eq!(result.clusters[0].documents, vec![0, 1, 2]);
    assert!(result.other_topics().is_none());
}

#[test]
fn test_no_shared_terms() {
    let input = documents(&[
        "Alpine glaciers",
        "Volcanic islands",
        "Desert caravans",
        "Tropical reefs",
        "Arctic tundra",
    ]);

    for algorithm in [ClusteringAlgorithm::Lingo, ClusteringAlgorithm::Stc] {
        let config = ClusteringConfig {
            algorithm,
            ..Default::default()
        };
        let result = ClusteringEngine::new(config).cluster(&input, None).unwrap();

        assert_eq!(result.topic_clusters().count(), 0);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(
            result.other_topics().unwrap().documents,
            vec![0, 1, 2, 3, 4]
        );
    }
}

#[test]
fn test_empty_input() {
    for config in [ClusteringConfig::lingo(), ClusteringConfig::stc()] {
        let result = ClusteringEngine::new(config).cluster(&[], None).unwrap();
        assert!(result.clusters.is_empty());
        assert_eq!(result.document_count, 0);
    }
}

#[test]
fn test_base_cluster_merge() {
    let base = |phrase: usize, documents: &[usize], score: f64| BaseCluster {
        phrase: vec![phrase],
        content_words: vec![phrase],
        documents: DocumentSet::from_indices(5, documents.iter().copied()).unwrap(),
        score,
    };
    let merger = ClusterMerger::new(&StcConfig {
        merge_threshold: 0.5,
        ..Default::default()
    });

    let merged = merger.merge(&[base(0, &[1, 2, 3], 3.0), base(1, &[2, 3, 4], 3.0)]);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].documents.to_vec(), vec![1, 2, 3, 4]);
}

#[test]
fn test_case_variants_collapse() {
    let snippet = format!(
        "{}{}{}",
        "MacOS ".repeat(20),
        "Macos ".repeat(5),
        "macos ".repeat(2)
    );
    let document = Document::new("", snippet);
    let documents = [&document];
    let models = LanguageModels::new();

    let context = PreprocessingPipeline::basic(Default::default())
        .preprocess(&documents, None, models.model(LanguageCode::English))
        .unwrap();

    assert_eq!(context.words.len(), 1);
    assert_eq!(context.words[0].image, "MacOS");
    assert_eq!(context.words[0].tf, 27);
}

#[test]
fn test_query_words_are_not_labels() {
    let input = documents(&[
        "Data mining techniques for large databases",
        "Data mining techniques overview",
        "Introduction to data mining techniques",
        "Data mining tools",
    ]);
    let result = ClusteringEngine::new(ClusteringConfig::lingo())
        .cluster(&input, Some("data mining"))
        .unwrap();

    for cluster in result.topic_clusters() {
        let label = cluster.label().to_lowercase();
        assert_ne!(label, "data");
        assert_ne!(label, "mining");
        assert_ne!(label, "data mining");
    }
    assert_eq!(result.query.as_deref(), Some("data mining"));
}
