//! Tokenizes documents and the query into the context's token table.

use crate::analysis::token::TokenType;
use crate::analysis::tokenizer::Tokenizer;
use crate::preprocessing::context::PreprocessingContext;

/// Fills [`AllTokens`](crate::preprocessing::context::AllTokens) with the
/// tokens of every document field.
///
/// Non-empty fields of one document are separated by a field separator,
/// documents by a document separator, and the stream ends with a terminator.
/// Separators carry no image and no document or field index.
pub struct InputTokenizer<'t> {
    tokenizer: &'t dyn Tokenizer,
}

impl<'t> InputTokenizer<'t> {
    pub fn new(tokenizer: &'t dyn Tokenizer) -> Self {
        InputTokenizer { tokenizer }
    }

    pub fn tokenize(&self, context: &mut PreprocessingContext<'_>) {
        let documents = context.documents;
        for (document_index, document) in documents.iter().enumerate() {
            if document_index > 0 {
                context
                    .tokens
                    .push_separator(TokenType::DOCUMENT_SEPARATOR);
            }

            let mut field_emitted = false;
            for (field_index, (_, text)) in document.text_fields().into_iter().enumerate() {
                let tokens = self.tokenizer.tokenize(text);
                if tokens.is_empty() {
                    continue;
                }
                if field_emitted {
                    context.tokens.push_separator(TokenType::FIELD_SEPARATOR);
                }
                for token in tokens {
                    context.tokens.push(
                        Some(token.text),
                        token.token_type,
                        Some(field_index),
                        Some(document_index),
                    );
                }
                field_emitted = true;
            }
        }
        context.tokens.push_separator(TokenType::TERMINATOR);

        if let Some(query) = context.query {
            context.query_words = self
                .tokenizer
                .tokenize(query)
                .into_iter()
                .filter(|token| token.token_type.is_indexed())
                .map(|token| token.text.to_lowercase())
                .collect();
        }

        log::debug!(
            "Tokenized {} documents into {} tokens ({} query words)",
            documents.len(),
            context.tokens.len(),
            context.query_words.len()
        );
    }
}
