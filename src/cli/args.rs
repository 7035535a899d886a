//! Command line argument parsing for the sheaf CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ClusteringAlgorithm;

/// sheaf - clusters search results into labeled topics
#[derive(Parser, Debug, Clone)]
#[command(name = "sheaf")]
#[command(about = "Clusters search results and other short texts into labeled topics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SheafArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SheafArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cluster the documents of a JSON or JSON Lines file
    Cluster(ClusterArgs),

    /// Print the default configuration
    Config(ConfigArgs),
}

/// Arguments for clustering
#[derive(Parser, Debug, Clone)]
pub struct ClusterArgs {
    /// Document file: a JSON array of documents, or one document per line
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Query that produced the documents
    #[arg(long)]
    pub query: Option<String>,

    /// Clustering algorithm (overrides the configuration file)
    #[arg(short, long)]
    pub algorithm: Option<AlgorithmArg>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SHEAF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the documents of every cluster
    #[arg(short, long)]
    pub documents: bool,
}

/// Arguments for printing the configuration
#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    /// Print the defaults of this algorithm only
    #[arg(short, long)]
    pub algorithm: Option<AlgorithmArg>,
}

/// Clustering algorithms selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmArg {
    /// Lingo
    Lingo,
    /// Suffix tree clustering
    Stc,
}

impl From<AlgorithmArg> for ClusteringAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Lingo => ClusteringAlgorithm::Lingo,
            AlgorithmArg::Stc => ClusteringAlgorithm::Stc,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
