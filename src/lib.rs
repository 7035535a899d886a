//! # Sheaf
//!
//! Clusters search results and other short texts into labeled topics.
//!
//! ## Features
//!
//! - Lingo: label-first clustering over a reduced term-document matrix
//! - STC: suffix tree clustering of frequent phrases
//! - Readable cluster labels chosen from phrases of the input
//! - Per-language stop words and stemming, with language partitioning
//! - "Other Topics" for documents no cluster claims
//! - Deterministic results for identical input and configuration
//!
//! ## Example
//!
//! ```
//! use sheaf::prelude::*;
//!
//! let documents = vec![
//!     Document::new("Data mining techniques", "Mining large databases"),
//!     Document::new("Data mining techniques overview", ""),
//!     Document::new("Introduction to data mining techniques", ""),
//! ];
//!
//! let engine = ClusteringEngine::new(ClusteringConfig::stc());
//! let result = engine.cluster(&documents, Some("data mining")).unwrap();
//! for cluster in &result.clusters {
//!     println!("{} ({})", cluster.label(), cluster.size());
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod cluster;
pub mod clustering;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod preprocessing;
pub mod util;
pub mod vsm;

pub mod prelude {
    pub use crate::analysis::language::{LanguageCode, LanguageModels};
    pub use crate::cluster::Cluster;
    pub use crate::config::{ClusteringAlgorithm, ClusteringConfig};
    pub use crate::document::Document;
    pub use crate::engine::{ClusteringEngine, ProcessingResult};
    pub use crate::error::{Result, SheafError};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
