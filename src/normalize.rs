//! Text normalization: cache-key slugs and lyric token filtering.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Anything that is not a word char, whitespace, or a hyphen.
pub static SLUG_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^-\w\s]").unwrap());

/// Runs of whitespace, collapsed to a single separator in slugs.
pub static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Non-word chars stripped from lyric tokens: "Love," → "Love", "don't" → "dont".
pub static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").unwrap());

// ============================================================================
// STOP WORDS
// ============================================================================

/// Tokens dropped from lyric corpora by default: section markers, remaster
/// tags, English function words and fillers. The empty string is included so
/// tokens made only of punctuation disappear.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    // Markers
    "remastered", "remaster", "chorus", "verse", "",
    // Function words
    "the", "a", "an", "and", "or", "but", "if", "so", "for", "to", "of", "at", "by",
    "in", "on", "with", "from", "up", "down", "out", "over", "under", "again", "once",
    "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may",
    "might", "must",
    // Fillers
    "uh", "um", "er", "ah", "oh", "like", "yeah", "yep", "okay", "ok", "really",
    "just", "very", "literally", "actually", "basically", "kinda", "sorta", "la",
];

/// Set of lowercase tokens excluded from word-frequency aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopWords {
    words: FxHashSet<String>,
}

impl StopWords {
    /// An empty set. Only the words added later are filtered.
    pub fn none() -> Self {
        Self {
            words: FxHashSet::default(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        DEFAULT_STOP_WORDS.iter().copied().collect()
    }
}

impl<'a> FromIterator<&'a str> for StopWords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut stop_words = StopWords::none();
        stop_words.extend(iter);
        stop_words
    }
}

impl<'a> Extend<&'a str> for StopWords {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Filesystem-safe, case-insensitive slug.
/// e.g., "AC/DC" → "acdc", "Don't  Stop Me Now" → "dont_stop_me_now"
pub fn slugify(text: &str) -> String {
    let stripped = SLUG_STRIP.replace_all(text, "");
    WHITESPACE_RUN
        .replace_all(stripped.trim(), "_")
        .to_lowercase()
}

/// Reduce a raw lyric token to its lowercase word chars.
pub fn clean_token(raw: &str) -> String {
    NON_WORD.replace_all(raw, "").to_lowercase()
}

/// Whitespace-split `text`, clean each token and drop stop words. Order is kept.
pub fn filter_tokens(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.split_whitespace()
        .map(clean_token)
        .filter(|token| !stop_words.contains(token))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
