//! The clustering engine: one call clusters one list of documents.
//!
//! # Examples
//!
//! ```
//! use sheaf::config::ClusteringConfig;
//! use sheaf::document::Document;
//! use sheaf::engine::ClusteringEngine;
//!
//! let documents = vec![
//!     Document::new("Data mining techniques", ""),
//!     Document::new("Data mining techniques overview", ""),
//!     Document::new("Introduction to data mining techniques", ""),
//!     Document::new("Cooking pasta", ""),
//! ];
//!
//! let engine = ClusteringEngine::new(ClusteringConfig::stc());
//! let result = engine.cluster(&documents, None).unwrap();
//!
//! assert_eq!(result.clusters[0].label(), "Data Mining Techniques");
//! assert_eq!(result.other_topics().map(|c| c.documents.clone()), Some(vec![3]));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::language::LanguageModels;
use crate::cluster::{append_other_topics, assign_cluster_ids, validate, Cluster};
use crate::clustering::{create_algorithm, MultilingualClustering};
use crate::config::ClusteringConfig;
use crate::document::Document;
use crate::error::Result;

/// Clusters of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Name of the algorithm that produced the clusters.
    pub algorithm: String,
    pub document_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Clusters in display order; "Other Topics", if any, comes last.
    pub clusters: Vec<Cluster>,
}

impl ProcessingResult {
    /// The cluster of unclustered documents.
    pub fn other_topics(&self) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.is_other_topics())
    }

    /// Clusters other than "Other Topics".
    pub fn topic_clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().filter(|cluster| !cluster.is_other_topics())
    }
}

/// Entry point of the library.
///
/// The engine itself holds only configuration and read-only language
/// models, so it can be shared between threads. Every call to
/// [`cluster`](ClusteringEngine::cluster) builds its own algorithm instance
/// and scratch state.
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    config: ClusteringConfig,
    language_models: Arc<LanguageModels>,
}

impl ClusteringEngine {
    /// Create an engine. The configuration is clamped into range first.
    pub fn new(config: ClusteringConfig) -> Self {
        Self::with_language_models(config, Arc::new(LanguageModels::new()))
    }

    /// Create an engine sharing existing language models.
    pub fn with_language_models(
        config: ClusteringConfig,
        language_models: Arc<LanguageModels>,
    ) -> Self {
        ClusteringEngine {
            config: config.normalized(),
            language_models,
        }
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster `documents`. Every document ends up in at least one cluster;
    /// those no topic cluster claims are collected in a trailing "Other
    /// Topics" cluster.
    pub fn cluster(&self, documents: &[Document], query: Option<&str>) -> Result<ProcessingResult> {
        let mut algorithm = create_algorithm(&self.config);
        let multilingual = MultilingualClustering::new(self.config.multilingual.clone());

        let mut clusters = multilingual.process(
            documents,
            query,
            &self.language_models,
            algorithm.as_mut(),
        )?;
        append_other_topics(documents.len(), &mut clusters);
        assign_cluster_ids(&mut clusters)?;
        validate(&clusters, documents.len())?;

        log::info!(
            "{} clustered {} documents into {} clusters",
            algorithm.name(),
            documents.len(),
            clusters.iter().filter(|c| !c.is_other_topics()).count()
        );

        Ok(ProcessingResult {
            algorithm: algorithm.name().to_string(),
            document_count: documents.len(),
            query: query.map(str::to_string),
            clusters,
        })
    }
}

impl Default for ClusteringEngine {
    fn default() -> Self {
        Self::new(ClusteringConfig::default())
    }
}
