// src/similarity/lcs.rs
//! Longest common subsequence length over characters.
//!
//! Bottom-up with two rolling rows, so memory is `O(min(|x|, |y|))` and the
//! call stack stays flat regardless of input size. Time is `O(|x| * |y|)`,
//! which is why callers from untrusted paths go through
//! [`lcs_length_bounded`].

use crate::error::ScoreError;

/// Length of the longest common subsequence of `x` and `y`, by `char`.
#[must_use]
pub fn lcs_length(x: &str, y: &str) -> usize {
    let a: Vec<char> = x.chars().collect();
    let b: Vec<char> = y.chars().collect();
    lcs_chars(&a, &b)
}

/// Like [`lcs_length`] but refuses tables larger than `max_cells`.
///
/// # Errors
/// Returns [`ScoreError::LcsBudget`] when `|x| * |y|` exceeds `max_cells`.
pub fn lcs_length_bounded(x: &str, y: &str, max_cells: u64) -> Result<usize, ScoreError> {
    let a: Vec<char> = x.chars().collect();
    let b: Vec<char> = y.chars().collect();
    let cells = a.len() as u128 * b.len() as u128;
    if cells > u128::from(max_cells) {
        return Err(ScoreError::LcsBudget {
            cells,
            limit: u128::from(max_cells),
        });
    }
    Ok(lcs_chars(&a, &b))
}

#[allow(clippy::indexing_slicing)]
fn lcs_chars(a: &[char], b: &[char]) -> usize {
    // Columns follow the shorter side.
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if inner.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for &oc in outer {
        for (j, &ic) in inner.iter().enumerate() {
            curr[j + 1] = if oc == ic {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_example() {
        assert_eq!(lcs_length("abcde", "ace"), 3);
        assert_eq!(lcs_length("AGGTAB", "GXTXAYB"), 4);
    }

    #[test]
    fn test_empty_side() {
        assert_eq!(lcs_length("", "anything"), 0);
        assert_eq!(lcs_length("anything", ""), 0);
        assert_eq!(lcs_length("", ""), 0);
    }

    #[test]
    fn test_symmetric_and_bounded_by_shorter() {
        let pairs = [("kitten", "sitting"), ("abc", "xyzabc"), ("aaaa", "aa")];
        for (x, y) in pairs {
            let n = lcs_length(x, y);
            assert_eq!(n, lcs_length(y, x));
            assert!(n <= x.chars().count().min(y.chars().count()));
        }
    }

    #[test]
    fn test_identical_is_full_length() {
        let s = "fn main() { foo(a, b); }";
        assert_eq!(lcs_length(s, s), s.chars().count());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(lcs_length("äbc", "äxc"), 2);
    }

    #[test]
    fn test_long_input_does_not_recurse() {
        let x = "ab".repeat(2_000);
        let y = "ba".repeat(2_000);
        assert_eq!(lcs_length(&x, &y), 3_999);
    }

    #[test]
    fn test_budget_exceeded() {
        let err = lcs_length_bounded("abcd", "abcd", 15).unwrap_err();
        assert_eq!(err, ScoreError::LcsBudget { cells: 16, limit: 15 });
        assert_eq!(lcs_length_bounded("abcd", "abcd", 16), Ok(4));
    }
}
