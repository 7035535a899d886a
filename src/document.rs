//! Input documents.
//!
//! A [`Document`] is a search result: a title, a snippet, and optionally a
//! URL, a language tag and arbitrary source-specific fields. Documents are
//! read-only inputs; clusters refer to them by their position in the input
//! list.
//!
//! # Examples
//!
//! ```
//! use sheaf::document::Document;
//!
//! let document = Document::new("Data mining", "Techniques for large databases")
//!     .with_url("http://example.com/mining")
//!     .with_language("en");
//!
//! assert_eq!(document.title, "Data mining");
//! assert_eq!(document.language.as_deref(), Some("en"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the title field in the preprocessing field table.
pub const TITLE_FIELD: &str = "title";
/// Name of the snippet field in the preprocessing field table.
pub const SNIPPET_FIELD: &str = "snippet";

/// A search result to be clustered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Caller-assigned identifier; see [`assign_document_ids`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Title text.
    #[serde(default)]
    pub title: String,

    /// Snippet or body text.
    #[serde(default, alias = "body")]
    pub snippet: String,

    /// Source URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Declared language tag (`en`, `de-AT`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Source-specific fields, carried through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl Document {
    /// Create a document with a title and a snippet.
    pub fn new<T: Into<String>, S: Into<String>>(title: T, snippet: S) -> Self {
        Document {
            title: title.into(),
            snippet: snippet.into(),
            ..Default::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the URL.
    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the declared language tag.
    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Add a source-specific field.
    pub fn with_field<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The clustered text fields, in field-index order.
    pub fn text_fields(&self) -> [(&'static str, &str); 2] {
        [(TITLE_FIELD, &self.title), (SNIPPET_FIELD, &self.snippet)]
    }
}

/// Give every document without an identifier a fresh one.
///
/// New identifiers continue after the largest identifier already present,
/// in input order, so caller-assigned identifiers are never reused.
pub fn assign_document_ids(documents: &mut [Document]) {
    let mut next_id = documents
        .iter()
        .filter_map(|document| document.id)
        .max()
        .map_or(0, |max| max + 1);

    for document in documents.iter_mut().filter(|document| document.id.is_none()) {
        document.id = Some(next_id);
        next_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_document_ids() {
        let mut documents = vec![
            Document::new("a", ""),
            Document::new("b", "").with_id(7),
            Document::new("c", ""),
        ];
        assign_document_ids(&mut documents);

        let ids: Vec<_> = documents.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![Some(8), Some(7), Some(9)]);
    }

    #[test]
    fn test_assign_document_ids_from_zero() {
        let mut documents = vec![Document::new("a", ""), Document::new("b", "")];
        assign_document_ids(&mut documents);
        assert_eq!(documents[0].id, Some(0));
        assert_eq!(documents[1].id, Some(1));
    }

    #[test]
    fn test_deserialize_with_body_alias() {
        let document: Document =
            serde_json::from_str(r#"{"title": "T", "body": "B", "language": "de"}"#).unwrap();
        assert_eq!(document.snippet, "B");
        assert_eq!(document.language.as_deref(), Some("de"));
        assert_eq!(document.id, None);
    }
}
