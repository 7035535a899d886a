//! Preprocessing: from raw documents to words, stems, phrases and label
//! candidates.
//!
//! Both clustering strategies start here. Suffix tree clustering only needs
//! the [basic](PreprocessingPipeline::basic) pipeline (tokens, words, stems,
//! stop words); Lingo uses the [complete](PreprocessingPipeline::complete)
//! one, which also extracts phrases and selects label candidates.
//!
//! # Examples
//!
//! ```
//! use sheaf::analysis::language::{LanguageCode, LanguageModels};
//! use sheaf::config::PreprocessingConfig;
//! use sheaf::document::Document;
//! use sheaf::preprocessing::PreprocessingPipeline;
//!
//! let documents = vec![
//!     Document::new("Data mining", "Techniques for large databases"),
//!     Document::new("Data mining", "An overview"),
//! ];
//! let documents: Vec<&Document> = documents.iter().collect();
//!
//! let models = LanguageModels::new();
//! let pipeline = PreprocessingPipeline::complete(PreprocessingConfig::default());
//! let context = pipeline
//!     .preprocess(&documents, None, models.model(LanguageCode::English))
//!     .unwrap();
//!
//! assert!(context.has_labels());
//! ```

pub mod case_normalizer;
pub mod context;
pub mod document_assigner;
pub mod input_tokenizer;
pub mod label_filter;
pub mod label_formatter;
pub mod phrase_extractor;
pub mod stemming;
pub mod stop_list;

use std::sync::Arc;

use crate::analysis::language::LanguageModel;
use crate::analysis::tokenizer::{SnippetTokenizer, Tokenizer};
use crate::config::PreprocessingConfig;
use crate::document::Document;
use crate::error::Result;

pub use self::context::PreprocessingContext;
pub use self::label_formatter::LabelFormatter;

use self::case_normalizer::CaseNormalizer;
use self::document_assigner::DocumentAssigner;
use self::input_tokenizer::InputTokenizer;
use self::label_filter::LabelFilterProcessor;
use self::phrase_extractor::PhraseExtractor;
use self::stemming::LanguageModelStemmer;
use self::stop_list::StopListMarker;

/// Runs the preprocessing stages in order over one document list.
#[derive(Clone)]
pub struct PreprocessingPipeline {
    config: PreprocessingConfig,
    tokenizer: Arc<dyn Tokenizer>,
    extract_labels: bool,
}

impl PreprocessingPipeline {
    /// Tokenize, normalize case, stem and mark stop words.
    pub fn basic(config: PreprocessingConfig) -> Self {
        PreprocessingPipeline {
            config,
            tokenizer: Arc::new(SnippetTokenizer::new()),
            extract_labels: false,
        }
    }

    /// The basic stages followed by phrase extraction, label filtering and
    /// document assignment.
    pub fn complete(config: PreprocessingConfig) -> Self {
        PreprocessingPipeline {
            extract_labels: true,
            ..Self::basic(config)
        }
    }

    /// Use a different tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &PreprocessingConfig {
        &self.config
    }

    pub fn preprocess<'a>(
        &self,
        documents: &'a [&'a Document],
        query: Option<&'a str>,
        language: LanguageModel,
    ) -> Result<PreprocessingContext<'a>> {
        let mut context = PreprocessingContext::new(documents, query, language);

        InputTokenizer::new(self.tokenizer.as_ref()).tokenize(&mut context);
        CaseNormalizer::new(self.config.df_threshold).normalize(&mut context);
        LanguageModelStemmer::new().stem(&mut context);
        StopListMarker::new().mark(&mut context);

        if self.extract_labels {
            PhraseExtractor::new(self.config.max_phrase_length, self.config.phrase_df_threshold)
                .extract(&mut context);
            LabelFilterProcessor::new(self.config.label_filters.clone()).filter(&mut context);
            DocumentAssigner::new(
                self.config.min_cluster_size,
                self.config.exact_phrase_assignment,
            )
            .assign(&mut context)?;
        }

        Ok(context)
    }
}

impl std::fmt::Debug for PreprocessingPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreprocessingPipeline")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .field("extract_labels", &self.extract_labels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::language::{LanguageCode, LanguageModels};

    #[test]
    fn test_basic_pipeline_skips_labels() {
        let documents = [
            Document::new("Data mining", "techniques"),
            Document::new("Data mining", "overview"),
        ];
        let refs: Vec<&Document> = documents.iter().collect();
        let models = LanguageModels::new();

        let context = PreprocessingPipeline::basic(PreprocessingConfig::default())
            .preprocess(&refs, None, models.model(LanguageCode::English))
            .unwrap();
        assert_eq!(context.words.len(), 4);
        assert!(context.phrases.is_empty());
        assert!(!context.has_labels());

        let context = PreprocessingPipeline::complete(PreprocessingConfig::default())
            .preprocess(&refs, None, models.model(LanguageCode::English))
            .unwrap();
        assert_eq!(context.phrases.len(), 1);
        assert_eq!(context.labels.len(), 1);
        assert_eq!(context.first_phrase_index, Some(0));
    }

    #[test]
    fn test_empty_input() {
        let documents: Vec<&Document> = Vec::new();
        let models = LanguageModels::new();
        let context = PreprocessingPipeline::complete(PreprocessingConfig::default())
            .preprocess(&documents, None, models.model(LanguageCode::English))
            .unwrap();
        assert!(!context.has_words());
        assert!(!context.has_labels());
    }
}
