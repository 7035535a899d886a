//! Stop word lists.
//!
//! Stop words are marked rather than removed: they still break and join
//! phrases, but they never start or end a cluster label and do not count
//! towards phrase length in suffix tree clustering.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::analysis::language::LanguageCode;

/// Default English stop words.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "us", "very", "via", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Default German stop words.
const GERMAN_STOP_WORDS: &[&str] = &[
    "aber", "als", "am", "an", "auch", "auf", "aus", "bei", "bin", "bis", "bist", "da", "damit",
    "das", "dass", "dem", "den", "der", "des", "die", "dies", "diese", "dieser", "doch", "du",
    "durch", "ein", "eine", "einem", "einen", "einer", "eines", "er", "es", "für", "hat",
    "hatte", "ich", "ihr", "im", "in", "ist", "ja", "kann", "mit", "nach", "nicht", "noch",
    "nur", "oder", "sich", "sie", "sind", "so", "über", "um", "und", "uns", "unter", "vom",
    "von", "vor", "war", "was", "wenn", "werden", "wie", "wir", "wird", "zu", "zum", "zur",
];

/// Default French stop words.
const FRENCH_STOP_WORDS: &[&str] = &[
    "à", "au", "aux", "avec", "ce", "ces", "cette", "dans", "de", "des", "du", "elle", "en",
    "est", "et", "eux", "il", "ils", "je", "la", "le", "les", "leur", "lui", "ma", "mais", "me",
    "même", "mes", "moi", "mon", "ne", "nos", "notre", "nous", "on", "ou", "où", "par", "pas",
    "pour", "qu", "que", "qui", "sa", "se", "ses", "son", "sont", "sur", "ta", "te", "tes", "toi",
    "ton", "tu", "un", "une", "vos", "votre", "vous",
];

/// Default Spanish stop words.
const SPANISH_STOP_WORDS: &[&str] = &[
    "a", "al", "algo", "como", "con", "de", "del", "el", "ella", "ellos", "en", "entre", "era",
    "es", "esta", "este", "esto", "fue", "ha", "hay", "la", "las", "le", "les", "lo", "los", "más",
    "me", "mi", "muy", "no", "nos", "o", "para", "pero", "por", "que", "se", "ser", "si", "sin",
    "sobre", "su", "sus", "también", "te", "tu", "un", "una", "uno", "y", "ya", "yo",
];

/// Default Italian stop words.
const ITALIAN_STOP_WORDS: &[&str] = &[
    "a", "ad", "al", "alla", "anche", "che", "chi", "ci", "come", "con", "da", "dal", "dei",
    "del", "della", "di", "e", "è", "gli", "ha", "i", "il", "in", "io", "la", "le", "lo", "ma",
    "mi", "nel", "nella", "non", "o", "per", "più", "quella", "questo", "se", "si", "sono", "su",
    "sua", "suo", "tra", "un", "una", "uno",
];

fn to_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|&s| s.to_string()).collect()
}

static ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| to_set(ENGLISH_STOP_WORDS));
static GERMAN_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| to_set(GERMAN_STOP_WORDS));
static FRENCH_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| to_set(FRENCH_STOP_WORDS));
static SPANISH_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| to_set(SPANISH_STOP_WORDS));
static ITALIAN_STOP_WORDS_SET: LazyLock<HashSet<String>> =
    LazyLock::new(|| to_set(ITALIAN_STOP_WORDS));
static NO_STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(HashSet::new);

/// Stop words of a language, lowercased. Unidentified text has none.
pub fn stop_words(language: LanguageCode) -> &'static HashSet<String> {
    match language {
        LanguageCode::English => &ENGLISH_STOP_WORDS_SET,
        LanguageCode::German => &GERMAN_STOP_WORDS_SET,
        LanguageCode::French => &FRENCH_STOP_WORDS_SET,
        LanguageCode::Spanish => &SPANISH_STOP_WORDS_SET,
        LanguageCode::Italian => &ITALIAN_STOP_WORDS_SET,
        LanguageCode::Unidentified => &NO_STOP_WORDS,
    }
}
