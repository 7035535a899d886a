//! Clusters: the output of a clustering run.
//!
//! A [`Cluster`] names a group of documents with one or more label phrases.
//! Documents are referred to by their index in the input list, and a document
//! may belong to any number of clusters. Clusters may nest. Once an engine
//! returns them, clusters carry unique ids and only valid document indices.
//!
//! # Examples
//!
//! ```
//! use sheaf::cluster::{append_other_topics, assign_cluster_ids, Cluster};
//!
//! let mut clusters = vec![Cluster::new("Data Mining", vec![0, 2]).with_score(3.5)];
//! append_other_topics(4, &mut clusters);
//! assign_cluster_ids(&mut clusters).unwrap();
//!
//! assert_eq!(clusters.len(), 2);
//! assert!(clusters[1].is_other_topics());
//! assert_eq!(clusters[1].documents, vec![1, 3]);
//! assert_eq!(clusters[1].id, Some(1));
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheafError};

/// Label of the cluster collecting unclustered documents.
pub const OTHER_TOPICS_LABEL: &str = "Other Topics";
/// Attribute flagging the cluster of unclustered documents.
pub const OTHER_TOPICS_ATTRIBUTE: &str = "other-topics";
/// Attribute holding the cluster score.
pub const SCORE_ATTRIBUTE: &str = "score";

/// Value of a cluster attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// A labeled group of documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Unique within one result, assigned by [`assign_cluster_ids`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    /// Label phrases, most descriptive first.
    pub phrases: Vec<String>,

    /// Indices of member documents in the input list, ascending.
    pub documents: Vec<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subclusters: Vec<Cluster>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Cluster {
    /// Create a cluster with a single label phrase.
    pub fn new<S: Into<String>>(label: S, documents: Vec<usize>) -> Self {
        Cluster {
            phrases: vec![label.into()],
            documents,
            ..Default::default()
        }
    }

    /// Create a cluster with several label phrases.
    pub fn with_phrases(phrases: Vec<String>, documents: Vec<usize>) -> Self {
        Cluster {
            phrases,
            documents,
            ..Default::default()
        }
    }

    /// Create the cluster of unclustered documents.
    pub fn other_topics(documents: Vec<usize>) -> Self {
        let mut cluster = Cluster::new(OTHER_TOPICS_LABEL, documents).with_score(0.0);
        cluster.attributes.insert(
            OTHER_TOPICS_ATTRIBUTE.to_string(),
            AttributeValue::Bool(true),
        );
        cluster
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.set_score(score);
        self
    }

    pub fn set_score(&mut self, score: f64) {
        self.attributes
            .insert(SCORE_ATTRIBUTE.to_string(), AttributeValue::Number(score));
    }

    /// The score attribute, 0 when absent.
    pub fn score(&self) -> f64 {
        match self.attributes.get(SCORE_ATTRIBUTE) {
            Some(AttributeValue::Number(score)) => *score,
            _ => 0.0,
        }
    }

    /// All label phrases joined with commas.
    pub fn label(&self) -> String {
        self.phrases.join(", ")
    }

    pub fn is_other_topics(&self) -> bool {
        matches!(
            self.attributes.get(OTHER_TOPICS_ATTRIBUTE),
            Some(AttributeValue::Bool(true))
        )
    }

    /// Documents of this cluster and all its subclusters, without
    /// duplicates, ascending.
    pub fn all_documents(&self) -> Vec<usize> {
        let mut documents = BTreeSet::new();
        self.collect_documents(&mut documents);
        documents.into_iter().collect()
    }

    /// Number of distinct documents in this cluster and its subclusters.
    pub fn size(&self) -> usize {
        if self.subclusters.is_empty() {
            return self.documents.len();
        }
        self.all_documents().len()
    }

    fn collect_documents(&self, documents: &mut BTreeSet<usize>) {
        documents.extend(self.documents.iter().copied());
        for subcluster in &self.subclusters {
            subcluster.collect_documents(documents);
        }
    }

    /// Visit this cluster and its subclusters in pre-order.
    fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a Cluster)) {
        visitor(self);
        for subcluster in &self.subclusters {
            subcluster.visit(visitor);
        }
    }

    fn visit_mut(&mut self, visitor: &mut impl FnMut(&mut Cluster)) {
        visitor(self);
        for subcluster in &mut self.subclusters {
            subcluster.visit_mut(visitor);
        }
    }
}

/// Append an "Other Topics" cluster holding every document in
/// `0..document_count` that no cluster (or subcluster) contains, in input
/// order. Nothing is appended when all documents are clustered.
pub fn append_other_topics(document_count: usize, clusters: &mut Vec<Cluster>) {
    let mut assigned = BTreeSet::new();
    for cluster in clusters.iter() {
        cluster.collect_documents(&mut assigned);
    }

    let unassigned: Vec<usize> = (0..document_count)
        .filter(|document| !assigned.contains(document))
        .collect();
    if !unassigned.is_empty() {
        clusters.push(Cluster::other_topics(unassigned));
    }
}

/// Give every cluster without an id a fresh one, in pre-order.
///
/// Ids already present are kept and must be unique. New ids start after the
/// largest id present, or at 0.
pub fn assign_cluster_ids(clusters: &mut [Cluster]) -> Result<()> {
    let mut ids = AHashSet::new();
    let mut duplicate = None;
    for cluster in clusters.iter() {
        cluster.visit(&mut |cluster| {
            if let Some(id) = cluster.id {
                if !ids.insert(id) && duplicate.is_none() {
                    duplicate = Some(id);
                }
            }
        });
    }
    if let Some(id) = duplicate {
        return Err(SheafError::internal(format!("Non-unique cluster id found: {id}")));
    }

    let mut next_id = ids.iter().max().map_or(0, |max| max + 1);
    for cluster in clusters.iter_mut() {
        cluster.visit_mut(&mut |cluster| {
            if cluster.id.is_none() {
                cluster.id = Some(next_id);
                next_id += 1;
            }
        });
    }
    Ok(())
}

/// Check that every cluster has a unique id and refers only to documents
/// in `0..document_count`.
pub fn validate(clusters: &[Cluster], document_count: usize) -> Result<()> {
    let mut ids = AHashSet::new();
    let mut error = None;
    for cluster in clusters {
        cluster.visit(&mut |cluster| {
            if error.is_some() {
                return;
            }
            match cluster.id {
                None => {
                    error = Some(format!("Cluster '{}' has no id", cluster.label()));
                }
                Some(id) if !ids.insert(id) => {
                    error = Some(format!("Non-unique cluster id found: {id}"));
                }
                Some(_) => {}
            }
            if let Some(&document) = cluster.documents.iter().find(|&&d| d >= document_count) {
                error = Some(format!(
                    "Cluster '{}' refers to document {document} of {document_count}",
                    cluster.label()
                ));
            }
        });
    }

    match error {
        Some(message) => Err(SheafError::internal(message)),
        None => Ok(()),
    }
}

/// Order by descending score, then descending size, then label, with
/// "Other Topics" last.
pub fn compare_by_score(a: &Cluster, b: &Cluster) -> Ordering {
    a.is_other_topics()
        .cmp(&b.is_other_topics())
        .then_with(|| b.score().total_cmp(&a.score()))
        .then_with(|| b.size().cmp(&a.size()))
        .then_with(|| a.label().cmp(&b.label()))
}

/// Order by descending `size^(1 - score_weight) * score^score_weight`, then
/// label, with "Other Topics" last. A weight of 0 orders by size alone, a
/// weight of 1 by score alone.
pub fn compare_by_weighted_score(score_weight: f64) -> impl Fn(&Cluster, &Cluster) -> Ordering {
    let score_weight = score_weight.clamp(0.0, 1.0);
    move |a, b| {
        let key = |cluster: &Cluster| {
            (cluster.size() as f64).powf(1.0 - score_weight) * cluster.score().powf(score_weight)
        };
        a.is_other_topics()
            .cmp(&b.is_other_topics())
            .then_with(|| key(b).total_cmp(&key(a)))
            .then_with(|| a.label().cmp(&b.label()))
    }
}
