//! Assigns documents to label candidates.

use crate::error::{Result, SheafError};
use crate::preprocessing::context::{Feature, PreprocessingContext};
use crate::util::bitset::DocumentSet;

/// Computes the documents of every label candidate and drops candidates
/// covering fewer than `min_cluster_size` documents.
///
/// A single-word label covers every document containing its stem. A phrase
/// label covers the documents containing all of its non-stop-word stems, or
/// only the documents containing the phrase itself when
/// `exact_phrase_assignment` is set.
#[derive(Debug, Clone)]
pub struct DocumentAssigner {
    min_cluster_size: usize,
    exact_phrase_assignment: bool,
}

impl DocumentAssigner {
    pub fn new(min_cluster_size: usize, exact_phrase_assignment: bool) -> Self {
        DocumentAssigner {
            min_cluster_size,
            exact_phrase_assignment,
        }
    }

    pub fn assign(&self, context: &mut PreprocessingContext<'_>) -> Result<()> {
        let document_count = context.document_count();
        let stem_documents = context
            .stems
            .iter()
            .map(|stem| {
                DocumentSet::from_indices(
                    document_count,
                    stem.tf_by_document.iter().map(|&(document, _)| document),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let mut labels = std::mem::take(&mut context.labels);
        for label in &mut labels {
            label.documents = match context.feature(label.feature_index) {
                Feature::Word(word) => context
                    .words
                    .get(word)
                    .and_then(|word| stem_documents.get(word.stem_index))
                    .cloned()
                    .ok_or_else(|| {
                        SheafError::internal(format!(
                            "Label feature {} refers to a missing word",
                            label.feature_index
                        ))
                    })?,
                Feature::Phrase(index) => {
                    let phrase = context.phrases.get(index).ok_or_else(|| {
                        SheafError::internal(format!(
                            "Label feature {} refers to a missing phrase",
                            label.feature_index
                        ))
                    })?;

                    let phrase_documents = DocumentSet::from_indices(
                        document_count,
                        phrase.tf_by_document.iter().map(|&(document, _)| document),
                    )?;
                    let content_words: Vec<usize> = phrase
                        .word_indices
                        .iter()
                        .copied()
                        .filter(|&word| !context.words[word].stop_word)
                        .collect();

                    if self.exact_phrase_assignment || content_words.is_empty() {
                        phrase_documents
                    } else {
                        let stem_of = |word: usize| context.words[word].stem_index;
                        let mut documents = stem_documents[stem_of(content_words[0])].clone();
                        for &word in &content_words[1..] {
                            documents.intersect_with(&stem_documents[stem_of(word)]);
                        }
                        documents
                    }
                }
            };
        }

        let before = labels.len();
        let first_phrase = context.first_phrase_index.unwrap_or(labels.len());
        let mut kept_words = 0;
        let mut kept = Vec::with_capacity(labels.len());
        for (position, label) in labels.into_iter().enumerate() {
            if label.documents.len() >= self.min_cluster_size {
                if position < first_phrase {
                    kept_words += 1;
                }
                kept.push(label);
            }
        }
        context.first_phrase_index = (kept.len() > kept_words).then_some(kept_words);
        context.labels = kept;

        log::debug!(
            "Assigned documents to {} of {} label candidates",
            context.labels.len(),
            before
        );
        Ok(())
    }
}
