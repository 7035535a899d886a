//! Command line front end: document loading, configuration files and
//! clustering through the CLI commands.

use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use sheaf::cli::args::{Command, SheafArgs};
use sheaf::cli::commands::{execute_command, load_config, load_documents, run_clustering};
use sheaf::config::ClusteringAlgorithm;
use sheaf::error::SheafError;

const DOCUMENTS: &str = r#"[
    {"title": "Data mining techniques for large databases"},
    {"title": "Data mining techniques overview"},
    {"title": "Introduction to data mining techniques"},
    {"title": "Cooking pasta at home", "url": "http://example.com/pasta"}
]"#;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn cluster_args(args: &[&str]) -> sheaf::cli::args::ClusterArgs {
    match SheafArgs::try_parse_from(args).unwrap().command {
        Command::Cluster(cluster_args) => cluster_args,
        other => panic!("Expected cluster command, got {other:?}"),
    }
}

#[test]
fn test_cluster_json_array() {
    let file = temp_file(DOCUMENTS);
    let path = file.path().to_str().unwrap();

    let output = run_clustering(&cluster_args(&[
        "sheaf",
        "cluster",
        path,
        "--algorithm",
        "stc",
        "--documents",
    ]))
    .unwrap();

    assert_eq!(output.result.algorithm, "STC");
    assert_eq!(output.result.document_count, 4);
    assert_eq!(output.result.clusters[0].label(), "Data Mining Techniques");
    assert_eq!(output.result.clusters[0].documents, vec![0, 1, 2]);
    assert_eq!(output.result.other_topics().unwrap().documents, vec![3]);
    assert_eq!(output.titles.len(), 4);
}

#[test]
fn test_cluster_json_lines_with_config() {
    let documents = temp_file(
        "{\"title\": \"Data mining techniques for large databases\"}\n\
         {\"title\": \"Data mining techniques overview\"}\n\
         \n\
         {\"title\": \"Introduction to data mining techniques\"}\n",
    );
    let config = temp_file(r#"{"algorithm": "stc", "stc": {"max_clusters": 1}}"#);

    let output = run_clustering(&cluster_args(&[
        "sheaf",
        "cluster",
        documents.path().to_str().unwrap(),
        "--config",
        config.path().to_str().unwrap(),
        "--query",
        "techniques",
    ]))
    .unwrap();

    assert_eq!(output.result.algorithm, "STC");
    assert_eq!(output.result.query.as_deref(), Some("techniques"));
    assert_eq!(output.result.document_count, 3);
    assert!(output.titles.is_empty());
}

#[test]
fn test_load_config() {
    let file = temp_file(r#"{"algorithm": "stc", "lingo": {"score_weight": 0.5}}"#);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.algorithm, ClusteringAlgorithm::Stc);
    assert_eq!(config.lingo.score_weight, 0.5);
    assert_eq!(config.stc.max_clusters, 15);

    let broken = temp_file(r#"{"algorithm": "kmeans"}"#);
    assert!(load_config(broken.path()).is_err());
}

#[test]
fn test_missing_document_file() {
    let error = load_documents(std::path::Path::new("/nonexistent/documents.json")).unwrap_err();
    assert!(matches!(error, SheafError::Anyhow(_)));
    assert!(error.to_string().contains("/nonexistent/documents.json"));
}

#[test]
fn test_execute_commands() {
    let file = temp_file(DOCUMENTS);
    let path = file.path().to_str().unwrap();

    let args = SheafArgs::try_parse_from(["sheaf", "-q", "-f", "json", "cluster", path]).unwrap();
    execute_command(args).unwrap();

    let args = SheafArgs::try_parse_from(["sheaf", "-q", "cluster", path, "-a", "lingo"]).unwrap();
    execute_command(args).unwrap();

    let args = SheafArgs::try_parse_from(["sheaf", "-f", "json", "--pretty", "config"]).unwrap();
    execute_command(args).unwrap();
}
