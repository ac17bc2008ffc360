// src/similarity/comparator.rs
//! Pairwise orchestration of the scorers.
//!
//! Each submission is normalized and parsed once per request, then every
//! pair is scored independently. Pairs fan out on the rayon pool; results
//! are collected back in input order so output never depends on scheduling.

use super::cache::LcsCache;
use super::jaccard::jaccard_similarity;
use super::lcs::lcs_length_bounded;
use super::matrix::{MatrixCell, SimilarityMatrix};
use super::normalize::normalize;
use super::ratio::{ratio_similarity_with, RatioOptions};
use super::tree::{tree_similarity, ParseOutcome, SyntaxTree};
use super::types::{
    round2, Degradation, PairSimilarity, PairSimilarityReport, Percent, RatioResult, Side,
    Submission,
};
use crate::config::ScoringConfig;
use crate::error::ScoreError;
use rayon::prelude::*;
use std::sync::Arc;

/// Normalized text and parse of one submission.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub normalized: String,
    pub tree: ParseOutcome,
}

pub struct Comparator {
    scoring: ScoringConfig,
    cache: Option<Arc<LcsCache>>,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl Comparator {
    /// Builds a comparator with its own LCS cache sized from `scoring`.
    #[must_use]
    pub fn new(scoring: ScoringConfig) -> Self {
        let cache = LcsCache::new(scoring.lcs_cache_capacity).map(Arc::new);
        Self { scoring, cache }
    }

    /// Replaces the LCS cache, e.g. to share one across comparators or to
    /// disable caching with `None`.
    #[must_use]
    pub fn with_cache(mut self, cache: Option<Arc<LcsCache>>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    #[must_use]
    pub fn cache(&self) -> Option<&Arc<LcsCache>> {
        self.cache.as_ref()
    }

    #[must_use]
    pub fn prepare(&self, code: &str) -> Prepared {
        let normalized = normalize(code);
        let tree = SyntaxTree::parse(&normalized, self.scoring.grammar, self.scoring.max_tree_nodes);
        Prepared { normalized, tree }
    }

    /// Scores two raw texts.
    #[must_use]
    pub fn compare_texts(&self, text1: &str, text2: &str) -> PairSimilarity {
        let first = self.prepare(text1);
        let second = self.prepare(text2);
        self.compare_prepared(&first, &second)
    }

    /// Scores two already prepared texts.
    #[must_use]
    pub fn compare_prepared(&self, first: &Prepared, second: &Prepared) -> PairSimilarity {
        let mut degradations = Vec::new();

        let jaccard = round2(jaccard_similarity(&first.normalized, &second.normalized));

        let lcs = match self.lcs(&first.normalized, &second.normalized) {
            Ok(length) => Some(length),
            Err(e) => {
                tracing::warn!(error = %e, "LCS skipped");
                degradations.push(Degradation::LcsBudgetExceeded);
                None
            }
        };

        if first.tree.is_unparseable() {
            degradations.push(Degradation::Unparseable { side: Side::First });
        }
        if second.tree.is_unparseable() {
            degradations.push(Degradation::Unparseable { side: Side::Second });
        }
        let tree = match tree_similarity(&first.tree, &second.tree, self.scoring.max_tree_nodes) {
            Ok(score) => Some(score),
            Err(e) => {
                tracing::warn!(error = %e, "tree comparison skipped");
                degradations.push(Degradation::TreeBudgetExceeded);
                None
            }
        };

        PairSimilarity {
            jaccard_similarity: jaccard,
            lcs_similarity: lcs,
            tree_similarity: tree,
            degradations,
        }
    }

    fn lcs(&self, x: &str, y: &str) -> Result<usize, ScoreError> {
        let max_cells = self.scoring.max_lcs_cells;
        match &self.cache {
            Some(cache) => cache.get_or_try_insert(x, y, || lcs_length_bounded(x, y, max_cells)),
            None => lcs_length_bounded(x, y, max_cells),
        }
    }

    /// Full report for two submissions.
    #[must_use]
    pub fn compare_pair(&self, a: &Submission, b: &Submission) -> PairSimilarityReport {
        PairSimilarityReport {
            work_1: a.participant(),
            work_2: b.participant(),
            similarity: self.compare_texts(&a.code, &b.code),
        }
    }

    /// Reports for every unordered pair `(i, j)` with `i < j`, in that order.
    #[must_use]
    pub fn compare_group(&self, submissions: &[Submission]) -> Vec<PairSimilarityReport> {
        let prepared: Vec<Prepared> = if self.scoring.parallel {
            submissions.par_iter().map(|s| self.prepare(&s.code)).collect()
        } else {
            submissions.iter().map(|s| self.prepare(&s.code)).collect()
        };

        let pairs: Vec<(usize, usize)> = (0..submissions.len())
            .flat_map(|i| ((i + 1)..submissions.len()).map(move |j| (i, j)))
            .collect();

        let score = |&(i, j): &(usize, usize)| -> Option<PairSimilarityReport> {
            let (a, b) = (submissions.get(i)?, submissions.get(j)?);
            let similarity = self.compare_prepared(prepared.get(i)?, prepared.get(j)?);
            tracing::debug!(
                first = %a.id,
                second = %b.id,
                jaccard = similarity.jaccard_similarity,
                lcs = ?similarity.lcs_similarity,
                tree = ?similarity.tree_similarity,
                "pair scored"
            );
            Some(PairSimilarityReport {
                work_1: a.participant(),
                work_2: b.participant(),
                similarity,
            })
        };

        if self.scoring.parallel {
            pairs.par_iter().filter_map(score).collect()
        } else {
            pairs.iter().filter_map(score).collect()
        }
    }

    fn ratio_options(&self) -> RatioOptions {
        RatioOptions {
            autojunk: self.scoring.autojunk,
            max_steps: self.scoring.max_ratio_steps,
        }
    }

    /// Raw-text ratio similarity as a percentage.
    ///
    /// # Errors
    /// Returns [`ScoreError::RatioBudget`] when the step budget runs out.
    pub fn ratio(&self, a: &str, b: &str) -> Result<f64, ScoreError> {
        ratio_similarity_with(a, b, &self.ratio_options())
    }

    /// Ratio comparison record with its `Similarity: NN.NN%` line.
    #[must_use]
    pub fn ratio_result(&self, a: &Submission, b: &Submission) -> RatioResult {
        let percentage = match self.ratio(&a.code, &b.code) {
            Ok(pct) => Some(pct),
            Err(e) => {
                tracing::warn!(first = %a.id, second = %b.id, error = %e, "ratio skipped");
                None
            }
        };
        let report = match percentage {
            Some(pct) => format!("Similarity: {}", Percent(pct)),
            None => format!("Similarity: {}", super::matrix::PLACEHOLDER),
        };
        RatioResult {
            work_1: a.participant(),
            work_2: b.participant(),
            similarity_percentage: percentage,
            report,
        }
    }

    /// Cohort matrix over `members` from raw-text ratio comparisons.
    ///
    /// Every ordered pair of submissions from different cohort members is
    /// compared; a later pair for the same two members overwrites an earlier
    /// one, and a pair that runs past the step budget resets its cell to the
    /// placeholder. Submissions from non-members are ignored.
    #[must_use]
    pub fn build_matrix<I, S>(&self, members: I, submissions: &[Submission]) -> SimilarityMatrix
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matrix = SimilarityMatrix::new(members);
        if submissions.is_empty() {
            return matrix;
        }

        let pairs: Vec<(usize, usize)> = ordered_pairs(submissions)
            .filter(|&(i, j)| match (submissions.get(i), submissions.get(j)) {
                (Some(a), Some(b)) => {
                    a.submitter != b.submitter
                        && matrix.contains(&a.submitter)
                        && matrix.contains(&b.submitter)
                }
                _ => false,
            })
            .collect();

        let ratio_of = |&(i, j): &(usize, usize)| match (submissions.get(i), submissions.get(j)) {
            (Some(a), Some(b)) => self.ratio(&a.code, &b.code),
            _ => Ok(0.0),
        };
        let ratios: Vec<Result<f64, ScoreError>> = if self.scoring.parallel {
            pairs.par_iter().map(ratio_of).collect()
        } else {
            pairs.iter().map(ratio_of).collect()
        };

        for (&(i, j), ratio) in pairs.iter().zip(ratios) {
            let (Some(a), Some(b)) = (submissions.get(i), submissions.get(j)) else {
                continue;
            };
            match ratio {
                Ok(pct) => {
                    matrix.set(&a.submitter, &b.submitter, MatrixCell::Percent(round2(pct)));
                }
                Err(e) => {
                    tracing::warn!(first = %a.id, second = %b.id, error = %e, "matrix cell reset");
                    matrix.set(&a.submitter, &b.submitter, MatrixCell::Placeholder);
                }
            }
        }

        matrix
    }
}

/// Ordered pairs of distinct indices, row-major.
fn ordered_pairs(submissions: &[Submission]) -> impl Iterator<Item = (usize, usize)> {
    let n = submissions.len();
    (0..n).flat_map(move |i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Grammar;

    fn rust_comparator() -> Comparator {
        Comparator::new(ScoringConfig {
            grammar: Grammar::Rust,
            ..ScoringConfig::default()
        })
    }

    #[test]
    fn test_self_comparison() {
        let code = "// entry\nfn main() {\n    foo(a, b);\n}\n";
        let cmp = rust_comparator();
        let prepared = cmp.prepare(code);
        let tree_size = prepared.tree.tree().map(SyntaxTree::len).unwrap_or_default();
        assert!(tree_size > 0);

        let sim = cmp.compare_texts(code, code);
        assert!((sim.jaccard_similarity - 100.0).abs() < f64::EPSILON);
        assert_eq!(sim.lcs_similarity, Some(prepared.normalized.chars().count()));
        assert_eq!(sim.tree_similarity, Some(tree_size));
        assert!(!sim.is_degraded());
    }

    #[test]
    fn test_unparseable_side_recorded() {
        let sim = rust_comparator().compare_texts("fn main() { foo(a, b); }", "fn main() {");
        assert_eq!(sim.tree_similarity, Some(0));
        assert_eq!(sim.degradations, vec![Degradation::Unparseable { side: Side::Second }]);
        assert!(sim.jaccard_similarity > 0.0);
    }

    #[test]
    fn test_lcs_budget_degrades_only_lcs() {
        let cmp = Comparator::new(ScoringConfig {
            max_lcs_cells: 4,
            ..ScoringConfig::default()
        });
        let sim = cmp.compare_texts("print(a)", "print(b)");
        assert_eq!(sim.lcs_similarity, None);
        assert!(sim.degradations.contains(&Degradation::LcsBudgetExceeded));
        assert!(sim.tree_similarity.is_some());
    }

    #[test]
    fn test_cache_is_used_and_injectable() {
        let cache = Arc::new(LcsCache::new(8).unwrap());
        let cmp = Comparator::default().with_cache(Some(Arc::clone(&cache)));
        let _ = cmp.compare_texts("abc def", "abd xyz");
        let _ = cmp.compare_texts("abd xyz", "abc def");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().0, 1);

        let uncached = Comparator::default().with_cache(None);
        assert!(uncached.cache().is_none());
        assert_eq!(
            uncached.compare_texts("abc def", "abd xyz"),
            cmp.compare_texts("abc def", "abd xyz")
        );
    }

    #[test]
    fn test_group_pairs_in_order() {
        let subs = vec![
            Submission::new("1", "ann", "print(a)"),
            Submission::new("2", "bob", "print(b)"),
            Submission::new("3", "cy", "print(c)"),
        ];
        for parallel in [true, false] {
            let cmp = Comparator::new(ScoringConfig {
                parallel,
                ..ScoringConfig::default()
            });
            let ids: Vec<_> = cmp
                .compare_group(&subs)
                .into_iter()
                .map(|r| (r.work_1.id, r.work_2.id))
                .collect();
            assert_eq!(
                ids,
                vec![
                    ("1".to_string(), "2".to_string()),
                    ("1".to_string(), "3".to_string()),
                    ("2".to_string(), "3".to_string()),
                ]
            );
        }
    }

    #[test]
    fn test_group_of_one_is_empty() {
        let subs = vec![Submission::new("1", "ann", "print(a)")];
        assert!(Comparator::default().compare_group(&subs).is_empty());
    }

    #[test]
    fn test_ratio_result_line() {
        let a = Submission::new("1", "ann", "abcd");
        let b = Submission::new("2", "bob", "abxd");
        let result = Comparator::default().ratio_result(&a, &b);
        assert_eq!(result.similarity_percentage, Some(75.0));
        assert_eq!(result.report, "Similarity: 75.00%");
    }

    #[test]
    fn test_matrix_last_write_wins() {
        let subs = vec![
            Submission::new("1", "ann", "abcd"),
            Submission::new("2", "bob", "abcd"),
            Submission::new("3", "bob", "wxyz"),
        ];
        let m = Comparator::default().build_matrix(["ann", "bob"], &subs);
        // (ann, bob) is written by pair (1, 2) then overwritten by (1, 3)
        assert_eq!(m.get("ann", "bob"), Some(MatrixCell::Percent(0.0)));
        // (bob, ann) is last written by pair (3, 1)
        assert_eq!(m.get("bob", "ann"), Some(MatrixCell::Percent(0.0)));
        assert_eq!(m.get("ann", "ann"), Some(MatrixCell::Placeholder));
        assert_eq!(m.get("bob", "bob"), Some(MatrixCell::Placeholder));
    }

    #[test]
    fn test_matrix_ignores_non_members() {
        let subs = vec![
            Submission::new("1", "ann", "abcd"),
            Submission::new("2", "eve", "abcd"),
        ];
        let m = Comparator::default().build_matrix(["ann", "bob"], &subs);
        assert_eq!(m.filled(), 0);
    }
}
