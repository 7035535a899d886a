//! Selection of label candidates among words and phrases.
//!
//! Single-word candidates are chosen per stem: a stem is a candidate if its
//! most frequent word passes the word filters, and that word becomes the
//! candidate's feature. Phrases are filtered on their own words. Finally the
//! complete-label filter drops candidates that are nearly always seen as the
//! start or the end of a longer accepted phrase.

use crate::config::LabelFilterConfig;
use crate::preprocessing::context::{LabelCandidate, PreprocessingContext, Word};
use crate::util::bitset::DocumentSet;

/// A candidate under consideration by the complete-label filter.
struct Candidate {
    feature_index: usize,
    stems: Vec<usize>,
    tf: u32,
}

#[derive(Debug, Clone, Default)]
pub struct LabelFilterProcessor {
    config: LabelFilterConfig,
}

impl LabelFilterProcessor {
    pub fn new(config: LabelFilterConfig) -> Self {
        LabelFilterProcessor { config }
    }

    /// Fill `context.labels` with the accepted candidates, word features
    /// first. Document sets are left empty for the document assigner.
    pub fn filter(&self, context: &mut PreprocessingContext<'_>) {
        let mut word_candidates: Vec<Candidate> = context
            .stems
            .iter()
            .filter(|stem| self.accept_word(&context.words[stem.most_frequent_original_word]))
            .map(|stem| Candidate {
                feature_index: stem.most_frequent_original_word,
                stems: vec![context.words[stem.most_frequent_original_word].stem_index],
                tf: stem.tf,
            })
            .collect();
        word_candidates.sort_by_key(|candidate| candidate.feature_index);

        let phrase_candidates: Vec<Candidate> = context
            .phrases
            .iter()
            .enumerate()
            .filter(|(_, phrase)| self.accept_phrase(&context.words, &phrase.word_indices))
            .map(|(index, phrase)| Candidate {
                feature_index: context.phrase_feature_index(index),
                stems: phrase
                    .word_indices
                    .iter()
                    .map(|&word| context.words[word].stem_index)
                    .collect(),
                tf: phrase.tf,
            })
            .collect();

        let (word_candidates, phrase_candidates) = if self.config.complete {
            self.remove_incomplete(word_candidates, phrase_candidates)
        } else {
            (word_candidates, phrase_candidates)
        };

        let document_count = context.document_count();
        let first_phrase_index = if phrase_candidates.is_empty() {
            None
        } else {
            Some(word_candidates.len())
        };
        context.labels = word_candidates
            .into_iter()
            .chain(phrase_candidates)
            .map(|candidate| LabelCandidate {
                feature_index: candidate.feature_index,
                documents: DocumentSet::new(document_count),
            })
            .collect();
        context.first_phrase_index = first_phrase_index;

        log::debug!(
            "Accepted {} label candidates ({} phrases)",
            context.labels.len(),
            context.phrase_labels().len()
        );
    }

    fn accept_word(&self, word: &Word) -> bool {
        let config = &self.config;
        !(config.query && word.in_query
            || config.min_length && word.image.chars().count() < config.min_label_length
            || config.genitive && is_genitive(&word.image)
            || config.stop_word && word.stop_word
            || config.numeric && word.token_type.is_numeric())
    }

    fn accept_phrase(&self, words: &[Word], phrase: &[usize]) -> bool {
        let (Some(&first), Some(&last)) = (phrase.first(), phrase.last()) else {
            return false;
        };
        let (first, last) = (&words[first], &words[last]);
        let config = &self.config;

        let only_query_words = phrase
            .iter()
            .all(|&word| words[word].in_query || words[word].stop_word);
        !(config.query && only_query_words
            || config.genitive && is_genitive(&last.image)
            || config.stop_word && (first.stop_word || last.stop_word)
            || config.numeric && first.token_type.is_numeric())
    }

    /// Drop candidates overridden by a longer phrase that starts or ends
    /// with them. Every decision is made against the unfiltered candidate
    /// set.
    fn remove_incomplete(
        &self,
        words: Vec<Candidate>,
        phrases: Vec<Candidate>,
    ) -> (Vec<Candidate>, Vec<Candidate>) {
        let threshold = self.config.complete_label_threshold;
        let is_complete = |candidate: &Candidate| {
            !phrases.iter().any(|phrase| {
                phrase.stems.len() > candidate.stems.len()
                    && (phrase.stems.starts_with(&candidate.stems)
                        || phrase.stems.ends_with(&candidate.stems))
                    && candidate.tf > 0
                    && f64::from(phrase.tf) / f64::from(candidate.tf) >= threshold
            })
        };

        let word_keep: Vec<bool> = words.iter().map(is_complete).collect();
        let phrase_keep: Vec<bool> = phrases.iter().map(is_complete).collect();

        let retain = |candidates: Vec<Candidate>, flags: Vec<bool>| -> Vec<Candidate> {
            candidates
                .into_iter()
                .zip(flags)
                .filter_map(|(candidate, kept)| kept.then_some(candidate))
                .collect()
        };
        (retain(words, word_keep), retain(phrases, phrase_keep))
    }
}

/// Whether a word ends with a possessive suffix.
pub fn is_genitive(image: &str) -> bool {
    let lower = image.to_lowercase();
    ["'s", "’s", "s'", "s’"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::language::{LanguageCode, LanguageModels};
    use crate::analysis::tokenizer::SnippetTokenizer;
    use crate::document::Document;
    use crate::preprocessing::case_normalizer::CaseNormalizer;
    use crate::preprocessing::input_tokenizer::InputTokenizer;
    use crate::preprocessing::phrase_extractor::PhraseExtractor;
    use crate::preprocessing::stemming::LanguageModelStemmer;
    use crate::preprocessing::stop_list::StopListMarker;

    fn labels(documents: &[Document], query: Option<&str>, config: LabelFilterConfig) -> Vec<String> {
        let refs: Vec<&Document> = documents.iter().collect();
        let models = LanguageModels::new();
        let mut context =
            PreprocessingContext::new(&refs, query, models.model(LanguageCode::English));
        let tokenizer = SnippetTokenizer::new();
        InputTokenizer::new(&tokenizer).tokenize(&mut context);
        CaseNormalizer::new(1).normalize(&mut context);
        LanguageModelStemmer::new().stem(&mut context);
        StopListMarker::new().mark(&mut context);
        PhraseExtractor::new(8, 1).extract(&mut context);
        LabelFilterProcessor::new(config).filter(&mut context);

        context
            .labels
            .iter()
            .map(|label| {
                context
                    .feature_word_indices(label.feature_index)
                    .iter()
                    .map(|&w| context.words[w].image.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    #[test]
    fn test_word_filters() {
        let documents = [Document::new(
            "The 2024 guide to Linux's ox kernel",
            "",
        )];
        assert_eq!(
            labels(&documents, None, LabelFilterConfig::default()),
            vec!["guide", "kernel"]
        );
    }

    #[test]
    fn test_query_filter() {
        let documents = [Document::new("clustering engines", "")];
        assert_eq!(
            labels(&documents, Some("Clusters"), LabelFilterConfig::default()),
            vec!["engines"]
        );

        let config = LabelFilterConfig {
            query: false,
            ..Default::default()
        };
        assert_eq!(
            labels(&documents, Some("Clusters"), config),
            vec!["clustering", "engines"]
        );
    }

    #[test]
    fn test_stop_words_at_phrase_edges() {
        let documents = [
            Document::new("Art of war", "the art"),
            Document::new("Art of war", "the art"),
        ];
        assert_eq!(
            labels(&documents, None, LabelFilterConfig::default()),
            vec!["Art", "Art of war"]
        );
    }

    #[test]
    fn test_complete_label_filter() {
        let documents = [
            Document::new("quantum computing", ""),
            Document::new("quantum computing", ""),
            Document::new("quantum computing", ""),
        ];
        assert_eq!(
            labels(&documents, None, LabelFilterConfig::default()),
            vec!["quantum computing"]
        );

        let config = LabelFilterConfig {
            complete: false,
            ..Default::default()
        };
        assert_eq!(
            labels(&documents, None, config),
            vec!["computing", "quantum", "quantum computing"]
        );
    }

    #[test]
    fn test_genitive() {
        assert!(is_genitive("Linux's"));
        assert!(is_genitive("users'"));
        assert!(!is_genitive("linux"));
    }
}
