//! Damerau-Levenshtein distance implementation
//!
//! Unrestricted edit distance counting insertion, deletion, substitution and
//! adjacent transposition, where transposed elements may take part in later
//! edits. This is the variant that stays a true metric; `ca` to `abc` is 2
//! (transpose to `ac`, insert `b`), not the 3 the restricted alignment form
//! reports.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(m*n) for the table plus a last-seen position map

use super::EditDistance;
use crate::input::{collect_elements, SimilarityInput};
use ahash::AHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

// ============================================================================
// DP core
// ============================================================================

/// Full-table Damerau-Levenshtein for hashable elements.
///
/// The table carries an extra sentinel row and column holding `m + n`, which
/// lets the transposition term index one step before the origin without
/// special cases. `last_row` tracks the last row where each element of `a`
/// occurred; `last_col` tracks the last column in the current row where the
/// elements matched.
fn true_distance<T: Eq + Hash>(a: &[T], b: &[T]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let max_dist = m + n;
    let mut last_row: AHashMap<&T, usize> = AHashMap::new();

    let mut d: Vec<Vec<usize>> = vec![vec![0; n + 2]; m + 2];
    d[0][0] = max_dist;
    for i in 0..=m {
        d[i + 1][0] = max_dist;
        d[i + 1][1] = i;
    }
    for j in 0..=n {
        d[0][j + 1] = max_dist;
        d[1][j + 1] = j;
    }

    for i in 1..=m {
        let mut last_col = 0usize;

        for j in 1..=n {
            let i1 = *last_row.get(&b[j - 1]).unwrap_or(&0);
            let j1 = last_col;

            let cost = if a[i - 1] == b[j - 1] {
                last_col = j;
                0
            } else {
                1
            };

            d[i + 1][j + 1] = (d[i][j] + cost) // substitution
                .min(d[i + 1][j] + 1) // insertion
                .min(d[i][j + 1] + 1) // deletion
                .min(d[i1][j1] + (i - i1 - 1) + 1 + (j - j1 - 1)); // transposition
        }

        last_row.insert(&a[i - 1], i);
    }

    d[m + 1][n + 1]
}

/// Threshold wrapper around [`true_distance`].
///
/// The length-difference precheck rejects before allocating; after that the
/// full table runs and only the final cell is compared against the threshold.
/// Row-minimum termination is not sound here, since a transposition can reach
/// back past the current row.
fn true_distance_bounded<T: Eq + Hash>(a: &[T], b: &[T], threshold: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > threshold {
        return None;
    }
    let dist = true_distance(a, b);
    if dist <= threshold {
        Some(dist)
    } else {
        None
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Damerau-Levenshtein distance calculator with an optional threshold
///
/// # Complexity
/// - Time: O(m*n)
/// - Space: O(m*n)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamerauLevenshtein {
    threshold: Option<usize>,
}

impl DamerauLevenshtein {
    /// Unbounded calculator.
    #[must_use]
    pub fn new() -> Self {
        Self { threshold: None }
    }

    /// Calculator that gives up beyond `threshold` edits.
    #[must_use]
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold: Some(threshold),
        }
    }

    /// The configured threshold, if any.
    #[must_use]
    pub fn threshold(&self) -> Option<usize> {
        self.threshold
    }

    fn compute<T: Eq + Hash>(&self, a: &[T], b: &[T]) -> Option<usize> {
        match self.threshold {
            Some(t) => true_distance_bounded(a, b, t),
            None => Some(true_distance(a, b)),
        }
    }
}

impl EditDistance<str> for DamerauLevenshtein {
    type Output = Option<usize>;

    fn apply(&self, left: &str, right: &str) -> Option<usize> {
        if left == right {
            return Some(0);
        }
        let a: SmallVec<[char; 64]> = left.chars().collect();
        let b: SmallVec<[char; 64]> = right.chars().collect();
        self.compute(&a, &b)
    }
}

impl<I> EditDistance<I> for DamerauLevenshtein
where
    I: SimilarityInput + ?Sized,
    I::Elem: Eq + Hash,
{
    type Output = Option<usize>;

    fn apply(&self, left: &I, right: &I) -> Option<usize> {
        let a = collect_elements(left);
        let b = collect_elements(right);
        self.compute(&a, &b)
    }
}

/// Convenience function for simple distance calculation
///
/// # Example
/// ```
/// use seqsim::algorithms::damerau::damerau_levenshtein;
///
/// assert_eq!(damerau_levenshtein("ca", "abc"), 2);
/// assert_eq!(damerau_levenshtein("ab", "ba"), 1);
/// ```
#[inline]
#[must_use]
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    true_distance(&a_chars, &b_chars)
}

/// Compute Damerau-Levenshtein distance under a threshold.
///
/// Returns `None` when the distance exceeds `threshold`.
#[inline]
#[must_use]
pub fn damerau_levenshtein_bounded(a: &str, b: &str, threshold: usize) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    true_distance_bounded(&a_chars, &b_chars, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damerau_basic() {
        assert_eq!(damerau_levenshtein("", ""), 0);
        assert_eq!(damerau_levenshtein("abc", "abc"), 0);
        assert_eq!(damerau_levenshtein("abc", ""), 3);
        assert_eq!(damerau_levenshtein("", "abc"), 3);
        assert_eq!(damerau_levenshtein("ab", "ba"), 1);
        assert_eq!(damerau_levenshtein("abc", "acb"), 1);
    }

    #[test]
    fn test_transposition_feeds_later_edits() {
        // The restricted alignment variant reports 3 here; the unrestricted
        // distance transposes `ca` to `ac` and then inserts `b`.
        assert_eq!(damerau_levenshtein("ca", "abc"), 2);
        assert_eq!(damerau_levenshtein("00210000", "001020000"), 2);
    }

    #[test]
    fn test_reduces_to_levenshtein_without_swaps() {
        assert_eq!(damerau_levenshtein("kitten", "sitting"), 3);
        assert_eq!(damerau_levenshtein("saturday", "sunday"), 3);
    }

    #[test]
    fn test_damerau_symmetry() {
        let pairs = [("ca", "abc"), ("ab", "ba"), ("kitten", "sitting"), ("", "x")];
        for (a, b) in pairs {
            assert_eq!(
                damerau_levenshtein(a, b),
                damerau_levenshtein(b, a),
                "{a} / {b}"
            );
        }
    }

    #[test]
    fn test_damerau_triangle_bound() {
        let words = ["ca", "ac", "abc", "cab", ""];
        for a in words {
            for b in words {
                for c in words {
                    assert!(
                        damerau_levenshtein(a, c)
                            <= damerau_levenshtein(a, b) + damerau_levenshtein(b, c),
                        "{a} / {b} / {c}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_damerau_unicode() {
        assert_eq!(damerau_levenshtein("日本語", "日語本"), 1);
        assert_eq!(damerau_levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn test_bounded_semantics() {
        assert_eq!(damerau_levenshtein_bounded("abcdef", "ghijkl", 3), None);
        assert_eq!(damerau_levenshtein_bounded("abc", "acb", 2), Some(1));
        assert_eq!(damerau_levenshtein_bounded("abc", "abc", 0), Some(0));
        assert_eq!(damerau_levenshtein_bounded("ab", "abcdefgh", 3), None);
    }

    #[test]
    fn test_bounded_monotonic_in_threshold() {
        let exact = damerau_levenshtein("ca", "abc");
        for t in 0..=exact + 2 {
            let bounded = damerau_levenshtein_bounded("ca", "abc", t);
            if t >= exact {
                assert_eq!(bounded, Some(exact));
            } else {
                assert_eq!(bounded, None);
            }
        }
    }

    #[test]
    fn test_calculator() {
        let dl = DamerauLevenshtein::with_threshold(2);
        assert_eq!(dl.apply("abc", "acb"), Some(1));
        assert_eq!(dl.apply("abc", "xyz"), None);

        let unbounded = DamerauLevenshtein::new();
        assert_eq!(unbounded.apply("abc", "xyz"), Some(3));
    }

    #[test]
    fn test_calculator_on_element_slices() {
        let dl = DamerauLevenshtein::new();
        let a = [1u8, 2, 3];
        let b = [2u8, 1, 3];
        assert_eq!(dl.apply(&a[..], &b[..]), Some(1));

        let words_a = ["green", "tea"];
        let words_b = ["tea", "green"];
        assert_eq!(dl.apply(&words_a[..], &words_b[..]), Some(1));
    }
}
