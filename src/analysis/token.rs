//! Token types for snippet analysis.
//!
//! A [`TokenType`] packs a token kind (the low byte) together with boundary
//! flags (sentence, field and document separators, end of input). Synthetic
//! separator tokens carry only flags; their kind is zero.
//!
//! # Examples
//!
//! ```
//! use sheaf::analysis::token::TokenType;
//!
//! let full_stop = TokenType::PUNCTUATION | TokenType::SENTENCE_SEPARATOR;
//! assert_eq!(full_stop.kind(), TokenType::PUNCTUATION);
//! assert!(full_stop.is_sentence_separator());
//! assert!(!full_stop.is_indexed());
//! ```

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Token kind and boundary flags packed into one value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenType(u16);

impl TokenType {
    /// No kind (used by synthetic separators).
    pub const NONE: TokenType = TokenType(0);
    /// A plain word.
    pub const TERM: TokenType = TokenType(1);
    /// A number, possibly with inner separators (`12.87`, `12-2003/23`).
    pub const NUMERIC: TokenType = TokenType(2);
    /// Punctuation or any character that is neither a letter nor a digit.
    pub const PUNCTUATION: TokenType = TokenType(3);
    /// An e-mail address.
    pub const EMAIL: TokenType = TokenType(4);
    /// An acronym (`I.B.M.`, `AT&T`).
    pub const ACRONYM: TokenType = TokenType(5);
    /// A URL with a scheme or a path.
    pub const FULL_URL: TokenType = TokenType(6);
    /// A host name starting with `www.`.
    pub const BARE_URL: TokenType = TokenType(7);
    /// A dotted or underscored identifier (`not.an.url`, `S_NI_P`).
    pub const FILE: TokenType = TokenType(8);
    /// A hyphenated word (`e-mails`).
    pub const HYPHENATED_TERM: TokenType = TokenType(9);

    /// Ends a sentence.
    pub const SENTENCE_SEPARATOR: TokenType = TokenType(0x100);
    /// Separates two documents.
    pub const DOCUMENT_SEPARATOR: TokenType = TokenType(0x200);
    /// Separates two fields of one document.
    pub const FIELD_SEPARATOR: TokenType = TokenType(0x800);
    /// Ends the token stream.
    pub const TERMINATOR: TokenType = TokenType(0x1000);

    const KIND_MASK: u16 = 0xff;

    /// Raw bit representation.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Combine with additional flags.
    pub const fn with(self, flags: TokenType) -> TokenType {
        TokenType(self.0 | flags.0)
    }

    /// The token kind without boundary flags.
    pub fn kind(self) -> TokenType {
        TokenType(self.0 & Self::KIND_MASK)
    }

    fn has(self, flag: TokenType) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn is_sentence_separator(self) -> bool {
        self.has(Self::SENTENCE_SEPARATOR)
    }

    pub fn is_document_separator(self) -> bool {
        self.has(Self::DOCUMENT_SEPARATOR)
    }

    pub fn is_field_separator(self) -> bool {
        self.has(Self::FIELD_SEPARATOR)
    }

    pub fn is_terminator(self) -> bool {
        self.has(Self::TERMINATOR)
    }

    pub fn is_punctuation(self) -> bool {
        self.kind() == Self::PUNCTUATION
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == Self::NUMERIC
    }

    /// Whether tokens of this type become words.
    ///
    /// Punctuation, full URLs and every kind of separator are kept in the
    /// token stream for boundary detection but never indexed.
    pub fn is_indexed(self) -> bool {
        let boundaries = Self::SENTENCE_SEPARATOR.0
            | Self::DOCUMENT_SEPARATOR.0
            | Self::FIELD_SEPARATOR.0
            | Self::TERMINATOR.0;
        if self.0 & boundaries != 0 {
            return false;
        }
        !matches!(
            self.kind(),
            Self::NONE | Self::PUNCTUATION | Self::FULL_URL
        )
    }
}

impl BitOr for TokenType {
    type Output = TokenType;

    fn bitor(self, rhs: TokenType) -> TokenType {
        self.with(rhs)
    }
}

impl fmt::Debug for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            Self::NONE => "none",
            Self::TERM => "term",
            Self::NUMERIC => "numeric",
            Self::PUNCTUATION => "punctuation",
            Self::EMAIL => "email",
            Self::ACRONYM => "acronym",
            Self::FULL_URL => "full_url",
            Self::BARE_URL => "bare_url",
            Self::FILE => "file",
            Self::HYPHENATED_TERM => "hyphenated_term",
            _ => "unknown",
        };
        write!(f, "TokenType({kind}")?;
        for (flag, name) in [
            (Self::SENTENCE_SEPARATOR, "sentence"),
            (Self::DOCUMENT_SEPARATOR, "document"),
            (Self::FIELD_SEPARATOR, "field"),
            (Self::TERMINATOR, "terminator"),
        ] {
            if self.has(flag) {
                write!(f, "|{name}")?;
            }
        }
        write!(f, ")")
    }
}

/// A classified piece of input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The matched text.
    pub text: String,
    /// Kind and flags.
    pub token_type: TokenType,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(text: S, token_type: TokenType) -> Self {
        Token {
            text: text.into(),
            token_type,
        }
    }
}
