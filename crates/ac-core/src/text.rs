//! Message text helpers shared by the parser and the dispatcher.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#([a-z0-9_\-]+)").expect("valid hashtag regex"));

/// Collapse every whitespace run into a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// NFKC-normalize a raw message body and collapse its whitespace.
///
/// Fullwidth digits and compatibility forms typed on some phone keyboards
/// become plain ASCII, so `１２:３０` parses like `12:30`.
pub fn normalize_body(raw: &str) -> String {
    let nfkc: String = raw.nfkc().collect();
    collapse_whitespace(&nfkc)
}

/// First `#tag` in the text, lowercased.
pub fn extract_hashtag(raw: &str) -> Option<String> {
    HASHTAG
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Remove every `#tag` token from the text.
pub fn strip_hashtags(text: &str) -> String {
    collapse_whitespace(&HASHTAG.replace_all(text, " "))
}

/// Truncate to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
