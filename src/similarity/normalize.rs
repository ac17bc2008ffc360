// src/similarity/normalize.rs
//! Canonical comparable form of a submission.
//!
//! Comments are removed first, then the text is lowercased, every character
//! other than word characters, whitespace, braces, parentheses, semicolons
//! and commas is dropped, and whitespace runs collapse to a single space.
//! The output never contains comment markers, so normalizing twice is the
//! same as normalizing once.

use regex::Regex;
use std::sync::LazyLock;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//[^\n]*|#[^\n]*|(?s:/\*.*?\*/)").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s{}();,]").unwrap_or_else(|_| panic!("Invalid Regex")));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Normalizes raw source text. Total over any input; may return "".
#[must_use]
pub fn normalize(source: &str) -> String {
    let stripped = strip_comments(source);
    let lowered = stripped.to_lowercase();
    let kept = DISALLOWED_RE.replace_all(&lowered, "");
    WHITESPACE_RE.replace_all(&kept, " ").trim().to_string()
}

/// Removes `//` and `#` line comments and `/* */` blocks.
#[must_use]
pub fn strip_comments(source: &str) -> String {
    COMMENT_RE.replace_all(source, "").into_owned()
}
