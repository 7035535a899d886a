//! Per-invocation preprocessing state.
//!
//! A [`PreprocessingContext`] is created for one clustering call and owned
//! exclusively by it. Each pipeline stage fills in one more table: tokens,
//! then words, stems, phrases and finally label candidates. Tables refer to
//! each other by index.

use std::collections::BTreeSet;

use crate::analysis::language::LanguageModel;
use crate::analysis::token::TokenType;
use crate::document::{Document, SNIPPET_FIELD, TITLE_FIELD};
use crate::util::bitset::DocumentSet;

/// Positionally aligned token arrays: index `i` in every vector describes
/// the same token.
#[derive(Debug, Clone, Default)]
pub struct AllTokens {
    /// Token text; `None` for synthetic separators.
    pub image: Vec<Option<String>>,
    pub token_type: Vec<TokenType>,
    /// Field the token came from; `None` for synthetic separators.
    pub field_index: Vec<Option<usize>>,
    /// Document the token came from; `None` for synthetic separators.
    pub document_index: Vec<Option<usize>>,
    /// Resolved word, filled by case normalization.
    pub word_index: Vec<Option<usize>>,
}

impl AllTokens {
    pub fn len(&self) -> usize {
        self.image.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }

    /// Append a token; its word index is resolved later.
    pub fn push(
        &mut self,
        image: Option<String>,
        token_type: TokenType,
        field_index: Option<usize>,
        document_index: Option<usize>,
    ) {
        self.image.push(image);
        self.token_type.push(token_type);
        self.field_index.push(field_index);
        self.document_index.push(document_index);
        self.word_index.push(None);
    }

    /// Append a synthetic separator.
    pub fn push_separator(&mut self, token_type: TokenType) {
        self.push(None, token_type, None, None);
    }
}

/// Names of the document fields, indexed by field index.
#[derive(Debug, Clone)]
pub struct AllFields {
    pub names: Vec<&'static str>,
}

impl AllFields {
    /// Index of the title field.
    pub const TITLE: usize = 0;
    /// Index of the snippet field.
    pub const SNIPPET: usize = 1;
}

impl Default for AllFields {
    fn default() -> Self {
        AllFields {
            names: vec![TITLE_FIELD, SNIPPET_FIELD],
        }
    }
}

/// A case-normalized word.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// Most frequent case variant.
    pub image: String,
    pub token_type: TokenType,
    /// Occurrences over all documents and case variants.
    pub tf: u32,
    /// Sparse `(document, tf)` pairs, ascending by document.
    pub tf_by_document: Vec<(usize, u32)>,
    pub field_indices: BTreeSet<usize>,
    pub stop_word: bool,
    /// Whether the word's stem also occurs in the query.
    pub in_query: bool,
    pub stem_index: usize,
}

impl Word {
    /// Number of documents the word occurs in.
    pub fn document_frequency(&self) -> usize {
        self.tf_by_document.len()
    }
}

/// Words sharing one stem.
#[derive(Debug, Clone, PartialEq)]
pub struct Stem {
    pub image: String,
    /// The word of this stem with the highest term frequency.
    pub most_frequent_original_word: usize,
    pub tf: u32,
    pub tf_by_document: Vec<(usize, u32)>,
    pub field_indices: BTreeSet<usize>,
}

impl Stem {
    pub fn document_frequency(&self) -> usize {
        self.tf_by_document.len()
    }
}

/// A frequent word sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub word_indices: Vec<usize>,
    pub tf: u32,
    pub tf_by_document: Vec<(usize, u32)>,
}

impl Phrase {
    pub fn document_frequency(&self) -> usize {
        self.tf_by_document.len()
    }
}

/// A word or phrase that may become a cluster label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate {
    /// Word index for single words, word count plus phrase index for
    /// phrases.
    pub feature_index: usize,
    /// Documents the label is assigned to.
    pub documents: DocumentSet,
}

/// What a feature index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Word(usize),
    Phrase(usize),
}

/// State shared by the preprocessing stages of one clustering call.
#[derive(Debug)]
pub struct PreprocessingContext<'a> {
    pub documents: &'a [&'a Document],
    pub query: Option<&'a str>,
    pub language: LanguageModel,
    pub fields: AllFields,
    pub tokens: AllTokens,
    /// Lowercased indexed query tokens.
    pub query_words: Vec<String>,
    pub words: Vec<Word>,
    pub stems: Vec<Stem>,
    pub phrases: Vec<Phrase>,
    /// Label candidates ordered by feature index.
    pub labels: Vec<LabelCandidate>,
    /// Position in `labels` of the first phrase candidate.
    pub first_phrase_index: Option<usize>,
}

impl<'a> PreprocessingContext<'a> {
    pub fn new(
        documents: &'a [&'a Document],
        query: Option<&'a str>,
        language: LanguageModel,
    ) -> Self {
        PreprocessingContext {
            documents,
            query: query.filter(|query| !query.trim().is_empty()),
            language,
            fields: AllFields::default(),
            tokens: AllTokens::default(),
            query_words: Vec::new(),
            words: Vec::new(),
            stems: Vec::new(),
            phrases: Vec::new(),
            labels: Vec::new(),
            first_phrase_index: None,
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }

    pub fn has_labels(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Resolve a feature index.
    pub fn feature(&self, feature_index: usize) -> Feature {
        if feature_index < self.words.len() {
            Feature::Word(feature_index)
        } else {
            Feature::Phrase(feature_index - self.words.len())
        }
    }

    /// Feature index of a phrase.
    pub fn phrase_feature_index(&self, phrase_index: usize) -> usize {
        self.words.len() + phrase_index
    }

    /// Words making up a feature.
    pub fn feature_word_indices(&self, feature_index: usize) -> Vec<usize> {
        match self.feature(feature_index) {
            Feature::Word(word) => vec![word],
            Feature::Phrase(phrase) => self
                .phrases
                .get(phrase)
                .map(|phrase| phrase.word_indices.clone())
                .unwrap_or_default(),
        }
    }

    /// Stem sequence of a feature.
    pub fn feature_stem_indices(&self, feature_index: usize) -> Vec<usize> {
        self.feature_word_indices(feature_index)
            .into_iter()
            .map(|word| self.words[word].stem_index)
            .collect()
    }

    /// Label candidates that are phrases.
    pub fn phrase_labels(&self) -> &[LabelCandidate] {
        match self.first_phrase_index {
            Some(first) => &self.labels[first..],
            None => &[],
        }
    }

    /// Label candidates that are single words.
    pub fn word_labels(&self) -> &[LabelCandidate] {
        match self.first_phrase_index {
            Some(first) => &self.labels[..first],
            None => &self.labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::language::{LanguageCode, LanguageModels};

    #[test]
    fn test_feature_indices() {
        let models = LanguageModels::new();
        let documents: Vec<&Document> = Vec::new();
        let mut context =
            PreprocessingContext::new(&documents, Some("  "), models.model(LanguageCode::English));
        assert_eq!(context.query, None);

        for (stem_index, image) in ["data", "mining"].into_iter().enumerate() {
            context.words.push(Word {
                image: image.to_string(),
                token_type: TokenType::TERM,
                tf: 2,
                tf_by_document: vec![(0, 1), (1, 1)],
                field_indices: BTreeSet::new(),
                stop_word: false,
                in_query: false,
                stem_index,
            });
        }
        context.phrases.push(Phrase {
            word_indices: vec![0, 1],
            tf: 2,
            tf_by_document: vec![(0, 1), (1, 1)],
        });

        assert_eq!(context.feature(1), Feature::Word(1));
        assert_eq!(context.feature(2), Feature::Phrase(0));
        assert_eq!(context.phrase_feature_index(0), 2);
        assert_eq!(context.feature_word_indices(2), vec![0, 1]);
        assert_eq!(context.feature_stem_indices(0), vec![0]);
    }

    #[test]
    fn test_token_push() {
        let mut tokens = AllTokens::default();
        tokens.push(Some("data".to_string()), TokenType::TERM, Some(0), Some(0));
        tokens.push_separator(TokenType::TERMINATOR);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.document_index[1], None);
        assert_eq!(tokens.word_index, vec![None, None]);
    }
}
