//! Porter stemming algorithm implementation.
//!
//! This module implements the original Porter algorithm for English. It
//! works on lowercase ASCII letters only; words containing anything else
//! (digits, apostrophes, accented letters) are returned lowercased but
//! otherwise untouched.
//!
//! # Algorithm
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals, -ed/-ing suffixes and terminal y
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! # Examples
//!
//! ```
//! use sheaf::analysis::stemmer::{PorterStemmer, Stemmer};
//!
//! let mut stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("ponies"), "poni");
//! assert_eq!(stemmer.stem("relational"), "relat");
//! ```

use ahash::AHashMap;

use crate::analysis::stemmer::Stemmer;

/// Entries kept before the cache is reset.
const CACHE_CAPACITY: usize = 16_384;

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer {
    /// Cache for stemmed words.
    cache: AHashMap<String, String>,
}

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer {
            cache: AHashMap::new(),
        }
    }

    fn stem_ascii(word: &[u8]) -> Vec<u8> {
        let mut w = word.to_vec();
        if w.len() <= 2 {
            return w;
        }

        step1a(&mut w);
        step1b(&mut w);
        step1c(&mut w);
        step2(&mut w);
        step3(&mut w);
        step4(&mut w);
        step5(&mut w);
        w
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&mut self, word: &str) -> String {
        let lower = word.to_lowercase();
        if !lower.bytes().all(|b| b.is_ascii_lowercase()) {
            return lower;
        }

        if let Some(stem) = self.cache.get(&lower) {
            return stem.clone();
        }

        let stem = String::from_utf8(Self::stem_ascii(lower.as_bytes()))
            .unwrap_or_else(|_| lower.clone());
        if self.cache.len() >= CACHE_CAPACITY {
            self.cache.clear();
        }
        self.cache.insert(lower, stem.clone());
        stem
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Check if the letter at `i` is a consonant.
fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences in `w[..len]`.
fn measure(w: &[u8], len: usize) -> usize {
    let mut m = 0;
    let mut i = 0;

    while i < len && is_consonant(w, i) {
        i += 1;
    }

    loop {
        while i < len && !is_consonant(w, i) {
            i += 1;
        }
        if i >= len {
            return m;
        }
        while i < len && is_consonant(w, i) {
            i += 1;
        }
        m += 1;
    }
}

fn has_vowel(w: &[u8], len: usize) -> bool {
    (0..len).any(|i| !is_consonant(w, i))
}

fn ends_with_double_consonant(w: &[u8], len: usize) -> bool {
    len >= 2 && w[len - 1] == w[len - 2] && is_consonant(w, len - 1)
}

/// Consonant-vowel-consonant ending where the last consonant is not w, x or y.
fn ends_cvc(w: &[u8], len: usize) -> bool {
    len >= 3
        && is_consonant(w, len - 3)
        && !is_consonant(w, len - 2)
        && is_consonant(w, len - 1)
        && !matches!(w[len - 1], b'w' | b'x' | b'y')
}

/// Replace `suffix` with `replacement` if the remaining stem has a measure
/// above `min_measure`.
fn replace_if(w: &mut Vec<u8>, suffix: &[u8], replacement: &[u8], min_measure: usize) -> bool {
    let stem_len = w.len() - suffix.len();
    if measure(w, stem_len) > min_measure {
        w.truncate(stem_len);
        w.extend_from_slice(replacement);
        true
    } else {
        false
    }
}

fn step1a(w: &mut Vec<u8>) {
    if w.ends_with(b"sses") || w.ends_with(b"ies") {
        w.truncate(w.len() - 2);
    } else if w.ends_with(b"s") && !w.ends_with(b"ss") {
        w.pop();
    }
}

fn step1b(w: &mut Vec<u8>) {
    if w.ends_with(b"eed") {
        replace_if(w, b"eed", b"ee", 0);
        return;
    }

    let suffix_len = if w.ends_with(b"ed") {
        2
    } else if w.ends_with(b"ing") {
        3
    } else {
        return;
    };

    let stem_len = w.len() - suffix_len;
    if !has_vowel(w, stem_len) {
        return;
    }
    w.truncate(stem_len);

    if w.ends_with(b"at") || w.ends_with(b"bl") || w.ends_with(b"iz") {
        w.push(b'e');
    } else if ends_with_double_consonant(w, w.len())
        && !matches!(w[w.len() - 1], b'l' | b's' | b'z')
    {
        w.pop();
    } else if measure(w, w.len()) == 1 && ends_cvc(w, w.len()) {
        w.push(b'e');
    }
}

fn step1c(w: &mut Vec<u8>) {
    if w.ends_with(b"y") && has_vowel(w, w.len() - 1) {
        let last = w.len() - 1;
        w[last] = b'i';
    }
}

fn step2(w: &mut Vec<u8>) {
    const RULES: &[(&[u8], &[u8])] = &[
        (b"ational", b"ate"),
        (b"tional", b"tion"),
        (b"enci", b"ence"),
        (b"anci", b"ance"),
        (b"izer", b"ize"),
        (b"bli", b"ble"),
        (b"alli", b"al"),
        (b"entli", b"ent"),
        (b"eli", b"e"),
        (b"ousli", b"ous"),
        (b"ization", b"ize"),
        (b"ation", b"ate"),
        (b"ator", b"ate"),
        (b"alism", b"al"),
        (b"iveness", b"ive"),
        (b"fulness", b"ful"),
        (b"ousness", b"ous"),
        (b"aliti", b"al"),
        (b"iviti", b"ive"),
        (b"biliti", b"ble"),
        (b"logi", b"log"),
    ];

    if let Some((suffix, replacement)) = RULES.iter().find(|(suffix, _)| w.ends_with(suffix)) {
        replace_if(w, suffix, replacement, 0);
    }
}

fn step3(w: &mut Vec<u8>) {
    const RULES: &[(&[u8], &[u8])] = &[
        (b"icate", b"ic"),
        (b"ative", b""),
        (b"alize", b"al"),
        (b"iciti", b"ic"),
        (b"ical", b"ic"),
        (b"ful", b""),
        (b"ness", b""),
    ];

    if let Some((suffix, replacement)) = RULES.iter().find(|(suffix, _)| w.ends_with(suffix)) {
        replace_if(w, suffix, replacement, 0);
    }
}

fn step4(w: &mut Vec<u8>) {
    const SUFFIXES: &[&[u8]] = &[
        b"al", b"ance", b"ence", b"er", b"ic", b"able", b"ible", b"ant", b"ement", b"ment",
        b"ent", b"ion", b"ou", b"ism", b"ate", b"iti", b"ous", b"ive", b"ize",
    ];

    let Some(suffix) = SUFFIXES.iter().find(|suffix| w.ends_with(suffix)) else {
        return;
    };

    let stem_len = w.len() - suffix.len();
    if *suffix == b"ion" && !(stem_len > 0 && matches!(w[stem_len - 1], b's' | b't')) {
        return;
    }
    if measure(w, stem_len) > 1 {
        w.truncate(stem_len);
    }
}

fn step5(w: &mut Vec<u8>) {
    if w.ends_with(b"e") {
        let stem_len = w.len() - 1;
        let m = measure(w, stem_len);
        if m > 1 || (m == 1 && !ends_cvc(w, stem_len)) {
            w.truncate(stem_len);
        }
    }

    if w.ends_with(b"ll") && measure(w, w.len()) > 1 {
        w.pop();
    }
}
