//! Maps words to stems with the context's language model.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::preprocessing::context::{PreprocessingContext, Stem};

/// Groups words by stem and aggregates their frequencies.
///
/// Also flags words whose stem occurs among the query's stems. One stemmer
/// is checked out of the language pool for the whole run and returned when
/// the stage finishes.
#[derive(Debug, Clone, Default)]
pub struct LanguageModelStemmer;

impl LanguageModelStemmer {
    pub fn new() -> Self {
        LanguageModelStemmer
    }

    pub fn stem(&self, context: &mut PreprocessingContext<'_>) {
        let mut stemmer = context.language.stemmer();

        let stem_images: Vec<String> = context
            .words
            .iter()
            .map(|word| stemmer.stem(&word.image.to_lowercase()))
            .collect();
        let query_stems: HashSet<String> = context
            .query_words
            .iter()
            .map(|word| stemmer.stem(word))
            .collect();
        drop(stemmer);

        let mut order: Vec<usize> = (0..context.words.len()).collect();
        order.sort_by(|&a, &b| stem_images[a].cmp(&stem_images[b]));

        let mut stems = Vec::new();
        let mut start = 0;
        while start < order.len() {
            let image = &stem_images[order[start]];
            let end = start
                + order[start..]
                    .iter()
                    .take_while(|&&word| stem_images[word] == *image)
                    .count();

            let stem_index = stems.len();
            let mut most_frequent_original_word = order[start];
            let mut max_word_tf = 0;
            let mut tf = 0;
            let mut tf_by_document = BTreeMap::new();
            let mut field_indices = BTreeSet::new();

            for &word_index in &order[start..end] {
                let word = &mut context.words[word_index];
                word.stem_index = stem_index;
                word.in_query = query_stems.contains(image);

                tf += word.tf;
                for &(document, count) in &word.tf_by_document {
                    *tf_by_document.entry(document).or_insert(0) += count;
                }
                field_indices.extend(word.field_indices.iter().copied());
                if word.tf > max_word_tf {
                    max_word_tf = word.tf;
                    most_frequent_original_word = word_index;
                }
            }

            stems.push(Stem {
                image: image.clone(),
                most_frequent_original_word,
                tf,
                tf_by_document: tf_by_document.into_iter().collect(),
                field_indices,
            });
            start = end;
        }

        log::debug!(
            "Stemming with {} grouped {} words into {} stems",
            context.language.language(),
            context.words.len(),
            stems.len()
        );
        context.stems = stems;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::language::{LanguageCode, LanguageModels};
    use crate::analysis::tokenizer::SnippetTokenizer;
    use crate::document::Document;
    use crate::preprocessing::case_normalizer::CaseNormalizer;
    use crate::preprocessing::input_tokenizer::InputTokenizer;

    #[test]
    fn test_words_share_stems() {
        let documents = [
            Document::new("Computer", "computing computers"),
            Document::new("Computing", "pasta"),
        ];
        let refs: Vec<&Document> = documents.iter().collect();
        let models = LanguageModels::new();
        let mut context =
            PreprocessingContext::new(&refs, Some("computer"), models.model(LanguageCode::English));
        let tokenizer = SnippetTokenizer::new();
        InputTokenizer::new(&tokenizer).tokenize(&mut context);
        CaseNormalizer::new(1).normalize(&mut context);
        LanguageModelStemmer::new().stem(&mut context);

        let stems: Vec<&str> = context.stems.iter().map(|s| s.image.as_str()).collect();
        assert_eq!(stems, vec!["comput", "pasta"]);

        let comput = &context.stems[0];
        assert_eq!(comput.tf, 4);
        assert_eq!(comput.tf_by_document, vec![(0, 3), (1, 1)]);
        assert_eq!(comput.field_indices.len(), 2);
        // "Computing" (tf 2) beats "Computer" and "computers" (tf 1 each)
        assert_eq!(context.words[comput.most_frequent_original_word].image, "Computing");

        assert!(context.words.iter().filter(|w| w.stem_index == 0).all(|w| w.in_query));
        assert!(!context.words[context.stems[1].most_frequent_original_word].in_query);
    }
}
