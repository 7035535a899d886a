//! Collapses case variants of a token into one word.

use std::collections::{BTreeMap, BTreeSet};

use crate::preprocessing::context::{PreprocessingContext, Word};

/// Groups indexed tokens by their lowercase image.
///
/// Within a group the most frequent exact spelling becomes the word image;
/// on a tie the spelling that sorts first wins. Words occurring in fewer
/// than `df_threshold` documents are discarded and their tokens stay
/// unresolved.
#[derive(Debug, Clone)]
pub struct CaseNormalizer {
    df_threshold: usize,
}

impl CaseNormalizer {
    pub fn new(df_threshold: usize) -> Self {
        CaseNormalizer {
            df_threshold: df_threshold.max(1),
        }
    }

    pub fn normalize(&self, context: &mut PreprocessingContext<'_>) {
        let tokens = &context.tokens;

        let mut order: Vec<(String, usize)> = (0..tokens.len())
            .filter(|&i| tokens.token_type[i].is_indexed() && tokens.document_index[i].is_some())
            .filter_map(|i| tokens.image[i].as_ref().map(|image| (image.to_lowercase(), i)))
            .collect();
        order.sort_by(|(a_lower, a), (b_lower, b)| {
            a_lower
                .cmp(b_lower)
                .then_with(|| exact_image(context, *a).cmp(exact_image(context, *b)))
        });

        let mut words = Vec::new();
        let mut word_index = vec![None; tokens.len()];

        let mut start = 0;
        while start < order.len() {
            let end = start
                + order[start..]
                    .iter()
                    .take_while(|(lower, _)| *lower == order[start].0)
                    .count();
            let group = &order[start..end];
            start = end;

            let mut tf_by_document = BTreeMap::new();
            let mut field_indices = BTreeSet::new();
            for &(_, token) in group {
                if let Some(document) = tokens.document_index[token] {
                    *tf_by_document.entry(document).or_insert(0u32) += 1;
                }
                if let Some(field) = tokens.field_index[token] {
                    field_indices.insert(field);
                }
            }
            if tf_by_document.len() < self.df_threshold {
                continue;
            }

            let canonical = most_frequent_variant(context, group);
            let index = words.len();
            for &(_, token) in group {
                word_index[token] = Some(index);
            }
            words.push(Word {
                image: exact_image(context, canonical).to_string(),
                token_type: tokens.token_type[canonical],
                tf: group.len() as u32,
                tf_by_document: tf_by_document.into_iter().collect(),
                field_indices,
                stop_word: false,
                in_query: false,
                stem_index: 0,
            });
        }

        log::debug!(
            "Case normalization produced {} words from {} indexed tokens",
            words.len(),
            order.len()
        );
        context.tokens.word_index = word_index;
        context.words = words;
    }
}

fn exact_image<'c>(context: &'c PreprocessingContext<'_>, token: usize) -> &'c str {
    context.tokens.image[token].as_deref().unwrap_or_default()
}

/// First token of the longest run of identical spellings in a sorted group.
fn most_frequent_variant(context: &PreprocessingContext<'_>, group: &[(String, usize)]) -> usize {
    let mut best = group[0].1;
    let mut best_count = 0;

    let mut run_start = 0;
    while run_start < group.len() {
        let image = exact_image(context, group[run_start].1);
        let run_length = group[run_start..]
            .iter()
            .take_while(|(_, token)| exact_image(context, *token) == image)
            .count();
        if run_length > best_count {
            best = group[run_start].1;
            best_count = run_length;
        }
        run_start += run_length;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::language::{LanguageCode, LanguageModels};
    use crate::analysis::tokenizer::SnippetTokenizer;
    use crate::document::Document;
    use crate::preprocessing::input_tokenizer::InputTokenizer;

    fn normalize(documents: &[Document], df_threshold: usize) -> (Vec<Word>, Vec<Option<usize>>) {
        let refs: Vec<&Document> = documents.iter().collect();
        let models = LanguageModels::new();
        let mut context =
            PreprocessingContext::new(&refs, None, models.model(LanguageCode::English));
        let tokenizer = SnippetTokenizer::new();
        InputTokenizer::new(&tokenizer).tokenize(&mut context);
        CaseNormalizer::new(df_threshold).normalize(&mut context);
        (context.words, context.tokens.word_index)
    }

    #[test]
    fn test_most_frequent_case_wins() {
        let text = [
            vec!["MacOS"; 20],
            vec!["Macos"; 5],
            vec!["macos"; 2],
        ]
        .concat()
        .join(" ");
        let (words, _) = normalize(&[Document::new("", text)], 1);

        assert_eq!(words.len(), 1);
        assert_eq!(words[0].image, "MacOS");
        assert_eq!(words[0].tf, 27);
        assert_eq!(words[0].tf_by_document, vec![(0, 27)]);
    }

    #[test]
    fn test_case_tie_takes_first_in_sort_order() {
        let (words, _) = normalize(&[Document::new("data Data", "")], 1);
        assert_eq!(words[0].image, "Data");
        assert_eq!(words[0].tf, 2);
    }

    #[test]
    fn test_df_threshold() {
        let documents = [
            Document::new("Data mining", "data"),
            Document::new("Data warehouse", ""),
            Document::new("Text mining", ""),
        ];
        let (words, word_index) = normalize(&documents, 2);

        let images: Vec<&str> = words.iter().map(|w| w.image.as_str()).collect();
        assert_eq!(images, vec!["Data", "mining"]);
        assert!(words.iter().all(|w| w.document_frequency() >= 2));
        assert_eq!(words[0].tf, 3);
        assert_eq!(words[0].tf_by_document, vec![(0, 2), (1, 1)]);
        assert_eq!(words[0].field_indices.iter().copied().collect::<Vec<_>>(), vec![0, 1]);

        // "warehouse", "Text" and the four separators are unresolved
        assert_eq!(word_index.iter().filter(|w| w.is_none()).count(), 2 + 4);
    }

    #[test]
    fn test_punctuation_is_not_indexed() {
        let (words, word_index) = normalize(&[Document::new("Hello, world!", "")], 1);
        let images: Vec<&str> = words.iter().map(|w| w.image.as_str()).collect();
        assert_eq!(images, vec!["Hello", "world"]);
        assert_eq!(word_index, vec![Some(0), None, Some(1), None, None]);
    }
}
