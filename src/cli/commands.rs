//! Command implementations for the sheaf CLI.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClusteringConfig;
use crate::document::Document;
use crate::engine::ClusteringEngine;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute_command(args: SheafArgs) -> Result<()> {
    match &args.command {
        Command::Cluster(cluster_args) => cluster_documents(cluster_args, &args),
        Command::Config(config_args) => show_config(config_args, &args),
    }
}

/// Cluster the documents of a file and print the clusters.
fn cluster_documents(args: &ClusterArgs, cli_args: &SheafArgs) -> Result<()> {
    let output = run_clustering(args)?;
    output_result("Clustering finished", &output, cli_args)
}

/// Load documents and configuration, then cluster.
pub fn run_clustering(args: &ClusterArgs) -> Result<ClusteringOutput> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ClusteringConfig::default(),
    };
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm.into();
    }

    let documents = load_documents(&args.document_file)?;
    log::info!(
        "Loaded {} documents from {}",
        documents.len(),
        args.document_file.display()
    );

    let start_time = Instant::now();
    let engine = ClusteringEngine::new(config);
    let result = engine.cluster(&documents, args.query.as_deref())?;
    let duration = start_time.elapsed();

    Ok(ClusteringOutput::new(
        result,
        &documents,
        args.documents,
        duration.as_millis() as u64,
    ))
}

/// Print the default configuration.
fn show_config(args: &ConfigArgs, cli_args: &SheafArgs) -> Result<()> {
    let mut config = ClusteringConfig::default();
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm.into();
    }
    output_result("Default configuration", &ConfigOutput { config }, cli_args)
}

/// Read a JSON configuration file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<ClusteringConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
    let config = ClusteringConfig::from_json_str(&content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    Ok(config)
}

/// Read documents from a file holding a JSON array or JSON Lines.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document file {}", path.display()))?;
    let documents = parse_documents(&content)
        .with_context(|| format!("Invalid documents in {}", path.display()))?;
    Ok(documents)
}

/// Parse a JSON array of documents, or one JSON document per line. Blank
/// lines are skipped.
pub fn parse_documents(content: &str) -> anyhow::Result<Vec<Document>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_num, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Error parsing document on line {}", line_num + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let documents = parse_documents(
            r#"[{"title": "Data mining", "snippet": "Techniques"}, {"title": "Pasta"}]"#,
        )
        .unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].snippet, "Techniques");
        assert_eq!(documents[1].title, "Pasta");
    }

    #[test]
    fn test_parse_json_lines() {
        let content = "{\"title\": \"a\", \"body\": \"b\"}\n\n{\"title\": \"c\", \"language\": \"de\"}\n";
        let documents = parse_documents(content).unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].snippet, "b");
        assert_eq!(documents[1].language.as_deref(), Some("de"));
    }

    #[test]
    fn test_parse_error_names_line() {
        let error = parse_documents("{\"title\": \"a\"}\nnot json\n").unwrap_err();
        assert!(error.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_documents("").unwrap().is_empty());
        assert!(parse_documents("[]").unwrap().is_empty());
    }
}
