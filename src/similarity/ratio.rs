// src/similarity/ratio.rs
//! Gestalt pattern matching ratio over raw text.
//!
//! Computes `2 * M / T` where `M` is the number of characters covered by the
//! matching blocks and `T` the combined length. Blocks come from repeatedly
//! taking the longest common substring of a range and splitting the range
//! around it. Ranges wait on an explicit stack rather than the call stack.

use crate::error::ScoreError;
use std::collections::HashMap;

/// Sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioOptions {
    /// Skip characters that make up more than 1% of the second text as
    /// match anchors.
    pub autojunk: bool,
    /// Upper bound on inner-loop steps across the whole alignment.
    pub max_steps: u64,
}

impl Default for RatioOptions {
    fn default() -> Self {
        Self {
            autojunk: true,
            max_steps: u64::MAX,
        }
    }
}

/// A run of `size` equal characters at `a[a_start..]` and `b[b_start..]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Ratio similarity of two texts as a percentage in [0, 100].
/// Two empty texts score 0.
#[must_use]
pub fn ratio_similarity(a: &str, b: &str) -> f64 {
    ratio_similarity_with(a, b, &RatioOptions::default()).unwrap_or(0.0)
}

/// Ratio similarity with explicit options.
///
/// # Errors
/// Returns [`ScoreError::RatioBudget`] when alignment needs more than
/// `options.max_steps` steps.
#[allow(clippy::cast_precision_loss)]
pub fn ratio_similarity_with(a: &str, b: &str, options: &RatioOptions) -> Result<f64, ScoreError> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return Ok(0.0);
    }
    let matched: usize = matching_blocks(&a, &b, options)?
        .iter()
        .map(|block| block.size)
        .sum();
    Ok(2.0 * matched as f64 / total as f64 * 100.0)
}

/// Matching blocks in ascending order of position.
///
/// # Errors
/// Returns [`ScoreError::RatioBudget`] when the step budget runs out.
pub fn matching_blocks<T: Eq + std::hash::Hash + Copy>(
    a: &[T],
    b: &[T],
    options: &RatioOptions,
) -> Result<Vec<MatchBlock>, ScoreError> {
    let mut matcher = Matcher::new(a, b, options);
    let mut blocks = Vec::new();
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let block = matcher.longest_match(a_lo, a_hi, b_lo, b_hi)?;
        if block.size == 0 {
            continue;
        }
        if a_lo < block.a_start && b_lo < block.b_start {
            pending.push((a_lo, block.a_start, b_lo, block.b_start));
        }
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < a_hi && b_end < b_hi {
            pending.push((a_end, a_hi, b_end, b_hi));
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|block| (block.a_start, block.b_start));
    Ok(blocks)
}

struct Matcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    // positions of each element in `b`, ascending
    b2j: HashMap<T, Vec<usize>>,
    steps: u64,
    max_steps: u64,
}

impl<'a, T: Eq + std::hash::Hash + Copy> Matcher<'a, T> {
    fn new(a: &'a [T], b: &'a [T], options: &RatioOptions) -> Self {
        let mut b2j: HashMap<T, Vec<usize>> = HashMap::new();
        for (j, &elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        if options.autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let popular = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular);
        }
        Self {
            a,
            b,
            b2j,
            steps: 0,
            max_steps: options.max_steps,
        }
    }

    fn tick(&mut self, n: u64) -> Result<(), ScoreError> {
        self.steps = self.steps.saturating_add(n);
        if self.steps > self.max_steps {
            return Err(ScoreError::RatioBudget {
                limit: self.max_steps,
            });
        }
        Ok(())
    }

    /// Longest block inside `a[a_lo..a_hi]` x `b[b_lo..b_hi]`, earliest in `a`
    /// then in `b` on ties, widened over equal neighbours that are not
    /// anchors (popular elements).
    #[allow(clippy::indexing_slicing)]
    fn longest_match(
        &mut self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Result<MatchBlock, ScoreError> {
        let (a, b) = (self.a, self.b);
        let mut best = MatchBlock {
            a_start: a_lo,
            b_start: b_lo,
            size: 0,
        };
        // j2len[j]: length of the match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in a_lo..a_hi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            let candidates = self.b2j.get(&a[i]).map_or(0, Vec::len);
            self.tick(1 + candidates as u64)?;
            let positions = self.b2j.get(&a[i]).map_or(&[][..], Vec::as_slice);
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                next.insert(j, k);
                if k > best.size {
                    best = MatchBlock {
                        a_start: i + 1 - k,
                        b_start: j + 1 - k,
                        size: k,
                    };
                }
            }
            j2len = next;
        }

        while best.a_start > a_lo && best.b_start > b_lo && a[best.a_start - 1] == b[best.b_start - 1] {
            best.a_start -= 1;
            best.b_start -= 1;
            best.size += 1;
        }
        while best.a_start + best.size < a_hi
            && best.b_start + best.size < b_hi
            && a[best.a_start + best.size] == b[best.b_start + best.size]
        {
            best.size += 1;
        }

        Ok(best)
    }
}
