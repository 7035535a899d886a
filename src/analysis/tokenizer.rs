//! Tokenizers that split snippet text into classified tokens.
//!
//! Search result snippets are full of URLs, e-mail addresses, acronyms,
//! numbers and file names. [`SnippetTokenizer`] recognizes these with a
//! single ordered regular expression so that, for example, `www.google.com`
//! stays one token instead of three words. Every non-whitespace character
//! ends up in some token; characters that fit no other pattern become
//! single-character punctuation tokens.
//!
//! # Examples
//!
//! ```
//! use sheaf::analysis::token::TokenType;
//! use sheaf::analysis::tokenizer::{SnippetTokenizer, Tokenizer};
//!
//! let tokenizer = SnippetTokenizer::new();
//! let tokens = tokenizer.tokenize("Mail dweiss@go2.pl now!");
//!
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[1].text, "dweiss@go2.pl");
//! assert_eq!(tokens[1].token_type, TokenType::EMAIL);
//! assert!(tokens[3].token_type.is_sentence_separator());
//! ```

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::analysis::token::{Token, TokenType};
use crate::error::{Result, SheafError};

/// Trait for tokenizers that convert text into classified tokens.
pub trait Tokenizer: Send + Sync {
    /// Split text into tokens. Never fails: unrecognized input becomes
    /// punctuation.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// Alternatives of the snippet pattern, tried left to right at each position.
const SNIPPET_PATTERN: &str = concat!(
    r#"(?P<url>(?:https?|ftp)://[^\s"<>]+|[\p{L}\p{N}][\p{L}\p{N}-]*(?:\.\p{L}[\p{L}\p{N}-]*)+/[^\s"<>]*)"#,
    r"|(?P<email>[\p{L}\p{N}._%+-]+@[\p{L}\p{N}-]+(?:\.\p{L}[\p{L}\p{N}-]*)+)",
    r"|(?P<bare_url>www\.[\p{L}\p{N}-]+(?:\.\p{L}[\p{L}\p{N}-]*)+)",
    r"|(?P<acronym>(?:\p{L}\.){2,}|\p{L}+(?:&\p{L}+)+)",
    r"|(?P<hyphenated>\p{L}[\p{L}\p{M}\p{N}]*(?:-[\p{L}\p{M}\p{N}]+)+)",
    r"|(?P<file>[\p{L}\p{N}]*\p{L}[\p{L}\p{N}]*(?:[._][\p{L}\p{N}]+)+)",
    r"|(?P<term>\p{N}*\p{L}[\p{L}\p{M}\p{N}'’`]*)",
    r"|(?P<number>\p{N}+(?:[.,/-]\p{N}+)*)",
    r"|(?P<sentence>[.!?…]+)",
    r"|(?P<punctuation>[^\s\p{L}\p{N}])",
);

/// Capture group names and the token type each one produces.
const GROUP_TYPES: &[(&str, TokenType)] = &[
    ("url", TokenType::FULL_URL),
    ("email", TokenType::EMAIL),
    ("bare_url", TokenType::BARE_URL),
    ("acronym", TokenType::ACRONYM),
    ("hyphenated", TokenType::HYPHENATED_TERM),
    ("file", TokenType::FILE),
    ("term", TokenType::TERM),
    ("number", TokenType::NUMERIC),
    ("sentence", TokenType::PUNCTUATION.with(TokenType::SENTENCE_SEPARATOR)),
    ("punctuation", TokenType::PUNCTUATION),
];

static SNIPPET_REGEX: LazyLock<Arc<Regex>> = LazyLock::new(|| {
    Arc::new(Regex::new(SNIPPET_PATTERN).expect("snippet pattern should be valid"))
});

/// Regex-based tokenizer for search result snippets.
#[derive(Clone, Debug)]
pub struct SnippetTokenizer {
    /// The classification pattern
    pattern: Arc<Regex>,
}

impl SnippetTokenizer {
    /// Create a tokenizer with the built-in snippet pattern.
    pub fn new() -> Self {
        SnippetTokenizer {
            pattern: Arc::clone(&SNIPPET_REGEX),
        }
    }

    /// Create a tokenizer with a custom pattern.
    ///
    /// The pattern must use the same named groups as the built-in one;
    /// matches of unnamed or unknown groups are classified as punctuation.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SheafError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(SnippetTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for SnippetTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SnippetTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.pattern
            .captures_iter(text)
            .filter_map(|captures| {
                let matched = captures.get(0)?;
                let token_type = GROUP_TYPES
                    .iter()
                    .find(|(name, _)| captures.name(name).is_some())
                    .map(|(_, token_type)| *token_type)
                    .unwrap_or(TokenType::PUNCTUATION);
                Some(Token::new(matched.as_str(), token_type))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "snippet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Vec<(String, TokenType)> {
        SnippetTokenizer::new()
            .tokenize(text)
            .into_iter()
            .map(|token| (token.text, token.token_type))
            .collect()
    }

    fn assert_single(text: &str, expected: TokenType) {
        let tokens = classify(text);
        assert_eq!(tokens.len(), 1, "{text} split into {tokens:?}");
        assert_eq!(tokens[0].0, text);
        assert_eq!(tokens[0].1, expected, "wrong type for {text}");
    }

    #[test]
    fn test_terms() {
        for term in ["simple", "simple's", "9numterm", "term2003", "안녕하세요", "Müller"] {
            assert_single(term, TokenType::TERM);
        }
    }

    #[test]
    fn test_punctuation() {
        let sentence = TokenType::PUNCTUATION | TokenType::SENTENCE_SEPARATOR;
        assert_single("...", sentence);
        assert_single("!", sentence);
        assert_single(",", TokenType::PUNCTUATION);
        assert_single("§", TokenType::PUNCTUATION);
    }

    #[test]
    fn test_files_and_hyphens() {
        assert_single("S_NI_P", TokenType::FILE);
        assert_single("not.an.url", TokenType::FILE);
        assert_single("e-mails", TokenType::HYPHENATED_TERM);
        assert_single("state-of-the-art", TokenType::HYPHENATED_TERM);
    }

    #[test]
    fn test_emails_and_urls() {
        assert_single("dweiss@go2.pl", TokenType::EMAIL);
        assert_single("e.mail-x@cs.put.poznan.pl", TokenType::EMAIL);
        assert_single("http://www.digimine.com/usama/datamine/.", TokenType::FULL_URL);
        assert_single("ftp://ftp.cs.put.poznan.pl", TokenType::FULL_URL);
        assert_single("go2.pl/mail", TokenType::FULL_URL);
        assert_single("www.google.com", TokenType::BARE_URL);
    }

    #[test]
    fn test_acronyms() {
        assert_single("I.B.M.", TokenType::ACRONYM);
        assert_single("AT&T", TokenType::ACRONYM);
        assert_single("garey&johnson&willet", TokenType::ACRONYM);
    }

    #[test]
    fn test_numbers() {
        for number in ["127", "12.87", "12,12", "12-2003/23"] {
            assert_single(number, TokenType::NUMERIC);
        }
    }

    #[test]
    fn test_sentence() {
        let tokens = classify("Data mining, explained. See www.kdnuggets.com!");
        let texts: Vec<&str> = tokens.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Data", "mining", ",", "explained", ".", "See", "www.kdnuggets.com", "!"]
        );
        assert!(tokens[4].1.is_sentence_separator());
        assert_eq!(tokens[6].1, TokenType::BARE_URL);
    }

    #[test]
    fn test_never_drops_characters() {
        let tokens = classify("\u{301}a \u{200b} ~~ ✓");
        assert!(!tokens.is_empty());
        assert!(tokens.iter().all(|(text, _)| !text.is_empty()));
    }

    #[test]
    fn test_invalid_custom_pattern() {
        assert!(SnippetTokenizer::with_pattern("(unclosed").is_err());
    }
}
