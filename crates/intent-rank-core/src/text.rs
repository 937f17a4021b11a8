//! Text normalization and query tokenization.
//!
//! Every searchable field and every query goes through the same pipeline so
//! that index-time words and query-time tokens are directly comparable:
//!
//! 1. Lowercase.
//! 2. Drop every character that is not a letter, digit, whitespace, or `-`.
//! 3. Split on runs of whitespace and hyphens.
//!
//! Queries additionally lose their stop words (see [`STOP_WORDS`]).
//!
//! # Example
//!
//! ```rust
//! use intent_rank_core::text::{split_words, tokenize};
//!
//! assert_eq!(split_words("Docker-Compose (up)!"), vec!["docker", "compose", "up"]);
//! assert_eq!(tokenize("please start the backend"), vec!["start", "backend"]);
//! ```

/// Separator between hierarchy segments of a command id (`"infra:start"`).
pub const ID_DELIMITER: char = ':';

/// Filler words removed from queries before scoring.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "can", "do", "for", "how", "i", "in", "is", "it", "me", "my", "of",
    "on", "please", "pls", "some", "that", "the", "this", "to", "want", "with", "you",
];

/// Lowercase and strip everything except letters, digits, whitespace, and hyphens.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect()
}

/// Normalize `text` and split it into words on whitespace/hyphen runs.
pub fn split_words(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize and split every string in `items`, flattening the result.
pub fn split_all<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| split_words(item.as_ref()))
        .collect()
}

/// Returns true if `word` is in [`STOP_WORDS`].
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Split a query into scoring tokens, dropping stop words.
///
/// An empty result means "no query": callers show the whole catalogue.
pub fn tokenize(query: &str) -> Vec<String> {
    split_words(query)
        .into_iter()
        .filter(|w| !is_stop_word(w))
        .collect()
}

/// Returns true if every char of `needle` appears in `haystack` in order,
/// not necessarily contiguously.
pub fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle.chars().all(|n| hay.any(|h| h == n))
}
