//! Human-readable cluster labels.

use crate::preprocessing::context::PreprocessingContext;

/// Joins the words of a feature into a display label.
///
/// Stop words after the first position are lowercased. Other words are
/// capitalized, unless they already carry an inner capital (`MacOS`, `IBM`),
/// in which case they are kept as written.
#[derive(Debug, Clone, Default)]
pub struct LabelFormatter;

impl LabelFormatter {
    pub fn new() -> Self {
        LabelFormatter
    }

    pub fn format(&self, context: &PreprocessingContext<'_>, feature_index: usize) -> String {
        self.format_words(context, &context.feature_word_indices(feature_index))
    }

    /// Format an arbitrary sequence of words.
    pub fn format_words(&self, context: &PreprocessingContext<'_>, words: &[usize]) -> String {
        words
            .iter()
            .enumerate()
            .map(|(position, &word)| {
                let word = &context.words[word];
                if position > 0 && word.stop_word {
                    word.image.to_lowercase()
                } else {
                    capitalize(&word.image)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.clone().any(char::is_uppercase) {
        return word.to_string();
    }
    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
}
