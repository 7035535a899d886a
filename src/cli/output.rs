//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SheafArgs};
use crate::cluster::Cluster;
use crate::config::ClusteringConfig;
use crate::document::Document;
use crate::engine::ProcessingResult;
use crate::error::Result;

/// Types that know how to print themselves for a human reader.
pub trait HumanOutput {
    fn print_human(&self, args: &SheafArgs);
}

/// Result structure for a clustering run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringOutput {
    #[serde(flatten)]
    pub result: ProcessingResult,
    pub duration_ms: u64,
    /// Document titles, included when documents are listed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,
}

impl ClusteringOutput {
    pub fn new(
        result: ProcessingResult,
        documents: &[Document],
        list_documents: bool,
        duration_ms: u64,
    ) -> Self {
        let titles = if list_documents {
            documents.iter().map(display_title).collect()
        } else {
            Vec::new()
        };
        ClusteringOutput {
            result,
            duration_ms,
            titles,
        }
    }
}

impl HumanOutput for ClusteringOutput {
    fn print_human(&self, _args: &SheafArgs) {
        let result = &self.result;
        println!("Clusters:");
        println!("═════════");
        for cluster in &result.clusters {
            self.print_cluster(cluster, 0);
        }
        println!();
        println!("Algorithm: {}", result.algorithm);
        if let Some(query) = &result.query {
            println!("Query: {query}");
        }
        println!("Documents: {}", result.document_count);
        println!("Clusters: {}", result.topic_clusters().count());
        println!("Clustering time: {}ms", self.duration_ms);
    }
}

impl ClusteringOutput {
    fn print_cluster(&self, cluster: &Cluster, depth: usize) {
        let indent = "  ".repeat(depth);
        let id = cluster.id.map_or_else(String::new, |id| format!("[{id}] "));
        if cluster.is_other_topics() {
            println!("{indent}{id}{} ({} documents)", cluster.label(), cluster.size());
        } else {
            println!(
                "{indent}{id}{} ({} documents, score {:.3})",
                cluster.label(),
                cluster.size(),
                cluster.score()
            );
        }

        for document in &cluster.documents {
            if let Some(title) = self.titles.get(*document) {
                println!("{indent}    - {title}");
            }
        }
        for subcluster in &cluster.subclusters {
            self.print_cluster(subcluster, depth + 1);
        }
    }
}

/// The configuration printed by `sheaf config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigOutput {
    pub config: ClusteringConfig,
}

impl HumanOutput for ConfigOutput {
    fn print_human(&self, _args: &SheafArgs) {
        match serde_json::to_string_pretty(&self.config) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &SheafArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SheafArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// The title of a document, or the start of its snippet when untitled.
fn display_title(document: &Document) -> String {
    let title = document.title.trim();
    if !title.is_empty() {
        return title.to_string();
    }
    let snippet: String = document.snippet.chars().take(60).collect();
    if snippet.len() < document.snippet.len() {
        format!("{}...", snippet.trim_end())
    } else {
        snippet
    }
}
