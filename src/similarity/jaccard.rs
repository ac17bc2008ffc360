// src/similarity/jaccard.rs
//! Lexical similarity over whitespace-separated token sets.

use std::collections::HashSet;
use std::hash::Hash;

/// Splits normalized text into its set of distinct tokens.
#[must_use]
pub fn token_set(text: &str) -> HashSet<&str> {
    text.split_whitespace().collect()
}

/// Jaccard similarity of two normalized texts, as a percentage in [0, 100].
#[must_use]
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    jaccard_index(&token_set(a), &token_set(b))
}

/// `|A ∩ B| / |A ∪ B| * 100`; 0 when both sets are empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard_index<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64 * 100.0
}
