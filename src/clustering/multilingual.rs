//! Clustering of documents written in several languages.
//!
//! Documents are partitioned by language and every partition is clustered
//! on its own, with the language's stop words and stemmer. Partitions are
//! processed one after another in language order, reusing one algorithm
//! instance. The per-language cluster lists are then combined according to
//! a [`LanguageAggregationStrategy`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::language::{guess_language, LanguageCode, LanguageModels};
use crate::cluster::{compare_by_score, Cluster};
use crate::clustering::MonolingualClusteringAlgorithm;
use crate::config::MultilingualConfig;
use crate::document::Document;
use crate::error::{Result, SheafError};

/// How clusters of different languages are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageAggregationStrategy {
    /// One list with the clusters of all languages.
    #[default]
    FlattenAll,
    /// One parent cluster per language, named after the language.
    FlattenNone,
}

/// Runs a monolingual algorithm once per language partition.
#[derive(Debug, Clone)]
pub struct MultilingualClustering {
    config: MultilingualConfig,
}

impl MultilingualClustering {
    pub fn new(config: MultilingualConfig) -> Self {
        MultilingualClustering { config }
    }

    /// The language a document is clustered in: its declared tag, a guess
    /// from its text when detection is enabled, or the default language.
    pub fn document_language(&self, document: &Document) -> LanguageCode {
        if let Some(tag) = document.language.as_deref().filter(|tag| !tag.trim().is_empty()) {
            return LanguageCode::from_tag(tag);
        }
        if self.config.detect_language {
            let text = format!("{} {}", document.title, document.snippet);
            if let Some(language) = guess_language(&text) {
                return language;
            }
        }
        self.config.default_language
    }

    /// Document indices of every language, in input order.
    pub fn partition(&self, documents: &[Document]) -> BTreeMap<LanguageCode, Vec<usize>> {
        let mut partitions: BTreeMap<LanguageCode, Vec<usize>> = BTreeMap::new();
        for (index, document) in documents.iter().enumerate() {
            partitions
                .entry(self.document_language(document))
                .or_default()
                .push(index);
        }
        partitions
    }

    /// Cluster every language partition with `algorithm` and combine the
    /// results. Returned clusters refer to indices of `documents`.
    pub fn process(
        &self,
        documents: &[Document],
        query: Option<&str>,
        models: &LanguageModels,
        algorithm: &mut dyn MonolingualClusteringAlgorithm,
    ) -> Result<Vec<Cluster>> {
        let partitions = self.partition(documents);
        let mut results = Vec::with_capacity(partitions.len());

        for (&language, indices) in &partitions {
            let partition: Vec<&Document> = indices.iter().map(|&i| &documents[i]).collect();
            let mut clusters = algorithm.cluster(&partition, query, models.model(language))?;
            for cluster in &mut clusters {
                remap_documents(cluster, indices)?;
            }
            log::debug!(
                "{} clustered {} {} documents into {} clusters",
                algorithm.name(),
                indices.len(),
                language.display_name(),
                clusters.len()
            );
            results.push((language, indices, clusters));
        }

        let language_count = results.len();
        match self.config.aggregation {
            LanguageAggregationStrategy::FlattenAll => {
                let mut clusters: Vec<Cluster> = results
                    .into_iter()
                    .flat_map(|(_, _, clusters)| clusters)
                    .collect();
                if language_count > 1 {
                    clusters.sort_by(compare_by_score);
                }
                Ok(clusters)
            }
            LanguageAggregationStrategy::FlattenNone if language_count == 1 => {
                Ok(results.into_iter().flat_map(|(_, _, clusters)| clusters).collect())
            }
            LanguageAggregationStrategy::FlattenNone => Ok(results
                .into_iter()
                .map(|(language, indices, mut clusters)| {
                    let mut clustered = vec![false; documents.len()];
                    for cluster in &clusters {
                        for document in cluster.all_documents() {
                            clustered[document] = true;
                        }
                    }
                    let unclustered: Vec<usize> =
                        indices.iter().copied().filter(|&i| !clustered[i]).collect();
                    if !unclustered.is_empty() {
                        clusters.push(Cluster::other_topics(unclustered));
                    }

                    let mut parent = Cluster::new(language.display_name(), Vec::new());
                    parent.subclusters = clusters;
                    parent
                })
                .collect()),
        }
    }
}

/// Map partition-local document indices back to input indices.
fn remap_documents(cluster: &mut Cluster, indices: &[usize]) -> Result<()> {
    cluster.documents = cluster
        .documents
        .iter()
        .map(|&local| {
            indices.get(local).copied().ok_or_else(|| {
                SheafError::internal(format!(
                    "Cluster '{}' refers to document {local} of a {}-document partition",
                    cluster.label(),
                    indices.len()
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    for subcluster in &mut cluster.subclusters {
        remap_documents(subcluster, indices)?;
    }
    Ok(())
}
