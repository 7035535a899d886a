//! Text analysis building blocks: token classification, stemming, stop words
//! and language models.
//!
//! The preprocessing pipeline drives these components; they know nothing
//! about documents or clusters themselves.

pub mod language;
pub mod stemmer;
pub mod stop_words;
pub mod token;
pub mod tokenizer;
