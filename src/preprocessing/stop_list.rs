//! Marks stop words.

use crate::preprocessing::context::PreprocessingContext;

/// Flags words found on the language's stop word list.
#[derive(Debug, Clone, Default)]
pub struct StopListMarker;

impl StopListMarker {
    pub fn new() -> Self {
        StopListMarker
    }

    pub fn mark(&self, context: &mut PreprocessingContext<'_>) {
        let language = &context.language;
        let mut marked = 0;
        for word in &mut context.words {
            word.stop_word = language.is_stop_word(&word.image.to_lowercase());
            marked += usize::from(word.stop_word);
        }
        log::debug!("Marked {marked} of {} words as stop words", context.words.len());
    }
}
