// src/similarity/mod.rs
//! Multi-metric code similarity scoring.
//!
//! This module provides:
//! - **Normalization**: comment and punctuation stripping into a canonical form
//! - **Jaccard**: token-set overlap of normalized text
//! - **LCS**: longest common subsequence length of normalized text
//! - **Ratio**: gestalt matching-block ratio of raw text (cohort matrix)
//! - **Tree**: lockstep syntax tree comparison in a reference grammar

pub mod cache;
pub mod comparator;
pub mod jaccard;
pub mod lcs;
pub mod matrix;
pub mod normalize;
pub mod ratio;
pub mod tree;
pub mod types;

pub use cache::LcsCache;
pub use comparator::{Comparator, Prepared};
pub use jaccard::jaccard_similarity;
pub use lcs::lcs_length;
pub use matrix::{MatrixCell, SimilarityMatrix};
pub use normalize::normalize;
pub use ratio::ratio_similarity;
pub use tree::{tree_similarity, ParseOutcome, SyntaxTree};
pub use types::{
    Degradation, PairSimilarity, PairSimilarityReport, Participant, RatioResult, Side, Submission,
};

/// Scores two raw texts with default settings.
#[must_use]
pub fn compare_texts(text1: &str, text2: &str) -> PairSimilarity {
    Comparator::default().compare_texts(text1, text2)
}

/// Builds a cohort matrix with default settings.
#[must_use]
pub fn build_similarity_matrix<I, S>(members: I, submissions: &[Submission]) -> SimilarityMatrix
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Comparator::default().build_matrix(members, submissions)
}
