//! Frequent phrase discovery over the stemmed token stream.
//!
//! Every token is mapped to an integer: its stem index if it resolved to a
//! word, or a unique negative value otherwise. Separators, punctuation and
//! dropped words therefore never match anything, so no phrase crosses a
//! sentence, field or document boundary. Word positions are then sorted as
//! suffixes (compared on at most `max_phrase_length` elements) and a phrase
//! is any prefix shared by at least two adjacent suffixes.
//!
//! Only complete phrases are kept: a phrase is dropped if all of its
//! occurrences are followed by the same stem (it is a truncated form of a
//! longer phrase) or preceded by the same stem.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::preprocessing::context::{Phrase, PreprocessingContext};

#[derive(Debug, Clone)]
pub struct PhraseExtractor {
    max_phrase_length: usize,
    df_threshold: usize,
}

impl PhraseExtractor {
    pub fn new(max_phrase_length: usize, df_threshold: usize) -> Self {
        PhraseExtractor {
            max_phrase_length: max_phrase_length.max(2),
            df_threshold: df_threshold.max(1),
        }
    }

    pub fn extract(&self, context: &mut PreprocessingContext<'_>) {
        let tokens = &context.tokens;
        let token_count = tokens.len();
        let max = self.max_phrase_length;

        let sequence: Vec<i64> = (0..token_count)
            .map(|i| match tokens.word_index[i] {
                Some(word) => context.words[word].stem_index as i64,
                None => -(i as i64) - 1,
            })
            .collect();
        let window = |position: usize| &sequence[position..(position + max).min(token_count)];

        let mut suffixes: Vec<usize> = (0..token_count).filter(|&i| sequence[i] >= 0).collect();
        suffixes.sort_by(|&a, &b| window(a).cmp(window(b)));

        let mut lcp = vec![0; suffixes.len()];
        for i in 1..suffixes.len() {
            lcp[i] = window(suffixes[i - 1])
                .iter()
                .zip(window(suffixes[i]))
                .take_while(|(a, b)| a == b)
                .count();
        }

        let mut phrases = Vec::new();
        for length in 2..=max {
            let mut start = 0;
            while start < suffixes.len() {
                let mut end = start + 1;
                while end < suffixes.len() && lcp[end] >= length {
                    end += 1;
                }
                let occurrences = &suffixes[start..end];
                let mut inner = start + 1..end;
                start = end;

                if occurrences.len() < 2 {
                    continue;
                }
                let right_complete = length == max || inner.any(|i| lcp[i] == length);
                if !right_complete || !is_left_complete(&sequence, occurrences) {
                    continue;
                }

                if let Some(phrase) = self.build_phrase(context, occurrences, length) {
                    phrases.push(phrase);
                }
            }
        }

        log::debug!(
            "Extracted {} phrases from {} word positions",
            phrases.len(),
            suffixes.len()
        );
        context.phrases = phrases;
    }

    fn build_phrase(
        &self,
        context: &PreprocessingContext<'_>,
        occurrences: &[usize],
        length: usize,
    ) -> Option<Phrase> {
        let tokens = &context.tokens;

        let mut tf_by_document = BTreeMap::new();
        for &position in occurrences {
            if let Some(document) = tokens.document_index[position] {
                *tf_by_document.entry(document).or_insert(0u32) += 1;
            }
        }
        if tf_by_document.len() < self.df_threshold {
            return None;
        }

        // The same stems may be spelled with different words; the most
        // frequent spelling (earliest on ties) represents the phrase.
        let mut variants: BTreeMap<Vec<usize>, (usize, usize)> = BTreeMap::new();
        for &position in occurrences {
            let words: Option<Vec<usize>> =
                tokens.word_index[position..position + length].iter().copied().collect();
            let words = words?;
            let entry = variants.entry(words).or_insert((0, position));
            entry.0 += 1;
            entry.1 = entry.1.min(position);
        }
        let (word_indices, _) = variants
            .into_iter()
            .max_by_key(|(_, (count, first))| (*count, Reverse(*first)))?;

        Some(Phrase {
            word_indices,
            tf: occurrences.len() as u32,
            tf_by_document: tf_by_document.into_iter().collect(),
        })
    }
}

/// Whether the occurrences do not all follow the same stem.
fn is_left_complete(sequence: &[i64], occurrences: &[usize]) -> bool {
    let preceding = |position: usize| match position {
        0 => None,
        _ => Some(sequence[position - 1]).filter(|&stem| stem >= 0),
    };
    let first = preceding(occurrences[0]);
    first.is_none() || occurrences.iter().any(|&position| preceding(position) != first)
}
