//! Clustering strategies.
//!
//! Both strategies implement [`MonolingualClusteringAlgorithm`]: they cluster
//! documents assumed to be written in one language. The
//! [`multilingual`] module partitions mixed input by language and runs one
//! algorithm per partition, strictly one after another.

pub mod lingo;
pub mod multilingual;
pub mod stc;

use crate::analysis::language::LanguageModel;
use crate::cluster::Cluster;
use crate::config::{ClusteringAlgorithm, ClusteringConfig};
use crate::document::Document;
use crate::error::Result;

pub use self::lingo::LingoClusteringAlgorithm;
pub use self::multilingual::{LanguageAggregationStrategy, MultilingualClustering};
pub use self::stc::StcClusteringAlgorithm;

/// Clusters documents written in a single language.
///
/// Implementations keep per-run scratch state, so one instance serves one
/// invocation at a time. Returned clusters refer to documents by their index
/// in `documents` and do not include an "Other Topics" cluster.
pub trait MonolingualClusteringAlgorithm: Send + std::fmt::Debug {
    /// Get the algorithm name.
    fn name(&self) -> &'static str;

    /// Cluster `documents`, optionally guided by the query that produced
    /// them.
    fn cluster(
        &mut self,
        documents: &[&Document],
        query: Option<&str>,
        language: LanguageModel,
    ) -> Result<Vec<Cluster>>;
}

/// Create the algorithm selected by `config`.
pub fn create_algorithm(config: &ClusteringConfig) -> Box<dyn MonolingualClusteringAlgorithm> {
    match config.algorithm {
        ClusteringAlgorithm::Lingo => Box::new(LingoClusteringAlgorithm::new(
            config.preprocessing.clone(),
            config.lingo.clone(),
        )),
        ClusteringAlgorithm::Stc => Box::new(StcClusteringAlgorithm::new(
            config.preprocessing.clone(),
            config.stc.clone(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_algorithm() {
        assert_eq!(create_algorithm(&ClusteringConfig::lingo()).name(), "Lingo");
        assert_eq!(create_algorithm(&ClusteringConfig::stc()).name(), "STC");
    }
}
