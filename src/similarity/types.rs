// src/similarity/types.rs
//! Core types for submission comparison.
//!
//! Submissions are owned by whoever loads them; the engine only borrows
//! them. Every report type is built fresh per request and serializes to the
//! shape the presentation layer consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// One uploaded piece of code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Unique identifier of the submission (work id).
    pub id: String,
    /// Identity of the submitter (user name or student id).
    pub submitter: String,
    /// Raw source text as uploaded.
    pub code: String,
    /// Upload time, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<SystemTime>,
}

impl Submission {
    #[must_use]
    pub fn new(id: impl Into<String>, submitter: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            submitter: submitter.into(),
            code: code.into(),
            submitted_at: None,
        }
    }

    #[must_use]
    pub fn participant(&self) -> Participant {
        Participant {
            id: self.id.clone(),
            user: self.submitter.clone(),
        }
    }
}

/// Identity half of a submission, embedded in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub user: String,
}

/// Which side of a pair a degradation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

/// Why a score field of a pair was degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// The side's normalized text did not parse; tree similarity is 0.
    Unparseable { side: Side },
    /// The LCS table would exceed the cell budget; LCS is absent.
    LcsBudgetExceeded,
    /// Tree construction or comparison exceeded the node budget; tree
    /// similarity is absent.
    TreeBudgetExceeded,
}

impl Degradation {
    #[must_use]
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::Unparseable { side: Side::First } => "first submission does not parse",
            Self::Unparseable { side: Side::Second } => "second submission does not parse",
            Self::LcsBudgetExceeded => "too long for LCS scoring",
            Self::TreeBudgetExceeded => "syntax tree too large to compare",
        }
    }
}

/// Scores for one pair of texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSimilarity {
    /// Token-set Jaccard similarity in [0, 100], rounded to 2 decimals.
    pub jaccard_similarity: f64,
    /// LCS length of the normalized texts; `None` when over budget.
    pub lcs_similarity: Option<usize>,
    /// Structural score (shared node count); 0 when either side does not
    /// parse, `None` when over budget.
    pub tree_similarity: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

impl PairSimilarity {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Composite report for one unordered pair of distinct submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSimilarityReport {
    pub work_1: Participant,
    pub work_2: Participant,
    pub similarity: PairSimilarity,
}

/// Raw-text ratio comparison of two submissions, with its display line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    pub work_1: Participant,
    pub work_2: Participant,
    /// `None` when alignment ran past the step budget.
    pub similarity_percentage: Option<f64>,
    pub report: String,
}

/// Percentage with exactly two decimals, e.g. `73.50%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(pub f64);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Rounds to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
