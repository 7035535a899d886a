//! Language codes and language models.
//!
//! A [`LanguageModel`] bundles what preprocessing needs to know about one
//! language: its stop words and a pool of stemmers. [`LanguageModels`] is the
//! shared, read-only registry models are taken from; it can be wrapped in an
//! `Arc` and used by concurrent clustering runs.
//!
//! # Examples
//!
//! ```
//! use sheaf::analysis::language::{LanguageCode, LanguageModels};
//!
//! let models = LanguageModels::new();
//! let english = models.model(LanguageCode::English);
//!
//! assert!(english.is_stop_word("the"));
//! assert_eq!(english.stemmer().stem("clusters"), "cluster");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use whatlang::Lang;

use crate::analysis::stemmer::{IdentityStemmer, PooledStemmer, PorterStemmer, StemmerPool};
use crate::analysis::stop_words::stop_words;
use crate::error::{Result, SheafError};

/// Languages known to the clustering pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum LanguageCode {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "it")]
    Italian,
    /// Text in an unknown or unsupported language: no stop words and no
    /// stemming.
    #[serde(rename = "unidentified")]
    Unidentified,
}

impl LanguageCode {
    /// All languages with a stop word list.
    pub const SUPPORTED: [LanguageCode; 5] = [
        LanguageCode::English,
        LanguageCode::German,
        LanguageCode::French,
        LanguageCode::Spanish,
        LanguageCode::Italian,
    ];

    /// ISO 639-1 code, or `unidentified`.
    pub fn iso_code(self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::German => "de",
            LanguageCode::French => "fr",
            LanguageCode::Spanish => "es",
            LanguageCode::Italian => "it",
            LanguageCode::Unidentified => "unidentified",
        }
    }

    /// Human readable language name.
    pub fn display_name(self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::German => "German",
            LanguageCode::French => "French",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::Italian => "Italian",
            LanguageCode::Unidentified => "Unidentified",
        }
    }

    /// Map a language tag such as `en`, `en-US` or `english` to a code.
    ///
    /// Tags of unsupported languages map to [`LanguageCode::Unidentified`].
    pub fn from_tag(tag: &str) -> LanguageCode {
        tag.parse().unwrap_or(LanguageCode::Unidentified)
    }
}

impl FromStr for LanguageCode {
    type Err = SheafError;

    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_lowercase();
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary {
            "en" | "eng" | "english" => Ok(LanguageCode::English),
            "de" | "deu" | "ger" | "german" => Ok(LanguageCode::German),
            "fr" | "fra" | "fre" | "french" => Ok(LanguageCode::French),
            "es" | "spa" | "spanish" => Ok(LanguageCode::Spanish),
            "it" | "ita" | "italian" => Ok(LanguageCode::Italian),
            "unidentified" => Ok(LanguageCode::Unidentified),
            _ => Err(SheafError::config(format!("Unknown language: {s}"))),
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iso_code())
    }
}

/// Stop words and stemmers of one language.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    language: LanguageCode,
    stop_words: &'static HashSet<String>,
    stemmers: Arc<StemmerPool>,
}

impl LanguageModel {
    /// The language this model describes.
    pub fn language(&self) -> LanguageCode {
        self.language
    }

    /// Check a lowercase word against the stop word list.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Check out a stemmer for the duration of one preprocessing run.
    pub fn stemmer(&self) -> PooledStemmer<'_> {
        self.stemmers.checkout()
    }
}

/// Registry of language models shared by all clustering runs.
#[derive(Debug)]
pub struct LanguageModels {
    pools: AHashMap<LanguageCode, Arc<StemmerPool>>,
}

impl LanguageModels {
    /// Create models for every known language.
    pub fn new() -> Self {
        let mut pools = AHashMap::new();
        for language in LanguageCode::SUPPORTED
            .into_iter()
            .chain([LanguageCode::Unidentified])
        {
            let pool = match language {
                LanguageCode::English => StemmerPool::new(|| Box::new(PorterStemmer::new())),
                _ => {
                    log::debug!("No stemmer for {language}, words are their own stems");
                    StemmerPool::new(|| Box::new(IdentityStemmer::new()))
                }
            };
            pools.insert(language, Arc::new(pool));
        }

        LanguageModels { pools }
    }

    /// Get the model of a language.
    pub fn model(&self, language: LanguageCode) -> LanguageModel {
        let stemmers = self
            .pools
            .get(&language)
            .cloned()
            .unwrap_or_else(|| Arc::new(StemmerPool::new(|| Box::new(IdentityStemmer::new()))));

        LanguageModel {
            language,
            stop_words: stop_words(language),
            stemmers,
        }
    }
}

impl Default for LanguageModels {
    fn default() -> Self {
        Self::new()
    }
}

/// Guess the language of a text with trigram statistics.
///
/// Returns `None` when the text is in a language without a model or the
/// detection is not reliable, which is common for very short texts.
pub fn guess_language(text: &str) -> Option<LanguageCode> {
    let info = whatlang::detect(text)?;
    if !info.is_reliable() {
        log::trace!(
            "Unreliable language guess {:?} ({:.2})",
            info.lang(),
            info.confidence()
        );
        return None;
    }

    match info.lang() {
        Lang::Eng => Some(LanguageCode::English),
        Lang::Deu => Some(LanguageCode::German),
        Lang::Fra => Some(LanguageCode::French),
        Lang::Spa => Some(LanguageCode::Spanish),
        Lang::Ita => Some(LanguageCode::Italian),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("en".parse::<LanguageCode>().unwrap(), LanguageCode::English);
        assert_eq!("en-US".parse::<LanguageCode>().unwrap(), LanguageCode::English);
        assert_eq!("German".parse::<LanguageCode>().unwrap(), LanguageCode::German);
        assert!("pl".parse::<LanguageCode>().is_err());
        assert_eq!(LanguageCode::from_tag("pl"), LanguageCode::Unidentified);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&LanguageCode::French).unwrap();
        assert_eq!(json, "\"fr\"");
        let parsed: LanguageCode = serde_json::from_str("\"it\"").unwrap();
        assert_eq!(parsed, LanguageCode::Italian);
    }

    #[test]
    fn test_models() {
        let models = LanguageModels::new();

        let english = models.model(LanguageCode::English);
        assert!(english.is_stop_word("and"));
        assert_eq!(english.stemmer().stem("computing"), "comput");

        let unidentified = models.model(LanguageCode::Unidentified);
        assert!(!unidentified.is_stop_word("and"));
        assert_eq!(unidentified.stemmer().stem("Computing"), "computing");
    }

    #[test]
    fn test_guess_language() {
        assert_eq!(
            guess_language(
                "The history of data mining starts with statistics, and today its tools \
                 are used by researchers and companies all over the world."
            ),
            Some(LanguageCode::English)
        );
        assert_eq!(
            guess_language(
                "Der Hund und die Katze sind nicht im Haus, weil sie den ganzen Tag \
                 draußen im Garten spielen wollen."
            ),
            Some(LanguageCode::German)
        );
        assert_eq!(
            guess_language(
                "La cucina italiana è famosa in tutto il mondo per la pasta fresca, \
                 il pomodoro e l'olio d'oliva che si usano ogni giorno. Nelle città \
                 e nei piccoli paesi della penisola ogni famiglia custodisce gelosamente \
                 le proprie ricette, che vengono tramandate di generazione in generazione."
            ),
            Some(LanguageCode::Italian)
        );
    }

    #[test]
    fn test_guess_language_without_model() {
        assert_eq!(guess_language(""), None);
        assert_eq!(guess_language("12345 67890"), None);
        assert_eq!(
            guess_language(
                "Дети играют во дворе, а их родители сидят на скамейке и разговаривают \
                 о погоде и о работе."
            ),
            None
        );
    }
}
