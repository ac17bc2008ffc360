//! Multi-metric code similarity for detecting copied submissions.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod lang;
pub mod report;
pub mod similarity;

pub use config::{Config, ScoringConfig};
pub use error::{CodematchError, Result, ScoreError};
pub use lang::Grammar;
pub use similarity::{
    build_similarity_matrix, compare_texts, Comparator, LcsCache, MatrixCell, PairSimilarity,
    PairSimilarityReport, RatioResult, SimilarityMatrix, Submission,
};
