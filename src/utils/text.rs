use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref LINE_BREAK_RE: Regex = Regex::new(r"\r?\n").unwrap();
}

/// Uniqueness key for history and word favorites.
pub fn normalize_query(text: &str) -> String {
    WHITESPACE_RE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Splits a translation on its line breaks, keeping empty lines.
pub fn translation_lines(translation: &str) -> Vec<String> {
    if translation.is_empty() {
        return Vec::new();
    }
    LINE_BREAK_RE
        .split(translation)
        .map(str::to_string)
        .collect()
}
