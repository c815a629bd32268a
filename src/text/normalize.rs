//! Canonical text form: lowercase ascii alphanumerics separated by single
//! spaces.
//!
//! The pipeline is: lowercase, NFD-decompose, drop combining marks, map
//! everything outside `[a-z0-9]` to a space, collapse runs, trim. Tokens
//! shorter than 2 characters are dropped because single letters carry no
//! retrieval signal in this catalog ("o", "e", "4" notwithstanding - "4"
//! still matters, so digits pair with the length-2 minimum only as part of
//! longer tokens or not at all).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Minimum token length kept by [`tokenize`].
const MIN_TOKEN_LEN: usize = 2;

/// Normalize raw text to its canonical comparison form.
///
/// Lowercases, strips diacritics via NFD decomposition, replaces every
/// non-alphanumeric character with a space, and collapses whitespace.
/// Empty or all-punctuation input yields an empty string, never an error.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = true; // leading spaces are suppressed

    for ch in text.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                out.push(lower);
                last_was_space = false;
            } else if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        }
    }

    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Split text into normalized tokens, dropping tokens shorter than 2.
///
/// Empty input (or input that normalizes to nothing) yields an empty vec;
/// downstream scorers treat that as "no signal", not a fault.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}
