//! Longest Common Subsequence (LCS) implementation
//!
//! The subsequence need not be contiguous, which makes LCS useful for
//! detecting shared structure across insertions. Length and distance run in
//! two rolling rows; extracting the subsequence itself keeps the full table
//! for the backtrack.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(min-row) for length and distance, O(m*n) for extraction

use super::{EditDistance, SimilarityScore};
use crate::input::{collect_elements, SimilarityInput};
use smallvec::SmallVec;

// ============================================================================
// Cores
// ============================================================================

fn lcs_length_core<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    // LCS is symmetric, so the shorter sequence can sit on the column axis
    // to keep the rolling rows small.
    let (a, b) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let m = a.len();
    let n = b.len();

    if n == 0 {
        return 0;
    }

    let mut prev: SmallVec<[usize; 64]> = SmallVec::from_elem(0, n + 1);
    let mut curr: SmallVec<[usize; 64]> = SmallVec::from_elem(0, n + 1);

    for i in 1..=m {
        curr[0] = 0;
        for j in 1..=n {
            if a[i - 1] == b[j - 1] {
                curr[j] = prev[j - 1] + 1;
            } else {
                curr[j] = prev[j].max(curr[j - 1]);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

// ============================================================================
// Calculators
// ============================================================================

/// LCS length calculator
///
/// Scores by the length of the longest common subsequence; for a normalized
/// score see [`lcs_similarity`], for the distance form see [`LcsDistance`].
/// Stateless; all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lcs;

impl Lcs {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityScore<str> for Lcs {
    type Output = usize;

    fn apply(&self, left: &str, right: &str) -> usize {
        lcs_length(left, right)
    }
}

impl<I> SimilarityScore<I> for Lcs
where
    I: SimilarityInput + ?Sized,
    I::Elem: PartialEq,
{
    type Output = usize;

    fn apply(&self, left: &I, right: &I) -> usize {
        let a = collect_elements(left);
        let b = collect_elements(right);
        lcs_length_core(&a, &b)
    }
}

/// LCS edit distance calculator
///
/// Distance under insertion and deletion only:
/// `len(a) + len(b) - 2 * lcs_length(a, b)`. Stateless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LcsDistance;

impl LcsDistance {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance<str> for LcsDistance {
    type Output = usize;

    fn apply(&self, left: &str, right: &str) -> usize {
        lcs_distance(left, right)
    }
}

impl<I> EditDistance<I> for LcsDistance
where
    I: SimilarityInput + ?Sized,
    I::Elem: PartialEq,
{
    type Output = usize;

    fn apply(&self, left: &I, right: &I) -> usize {
        let a = collect_elements(left);
        let b = collect_elements(right);
        a.len() + b.len() - 2 * lcs_length_core(&a, &b)
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Calculate the length of the Longest Common Subsequence.
#[must_use]
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    lcs_length_core(&a_chars, &b_chars)
}

/// Extract one longest common subsequence.
///
/// Multiple subsequences can share the maximum length; the backtrack resolves
/// ties deterministically, preferring later occurrences in the left operand.
///
/// # Example
/// ```
/// use seqsim::algorithms::lcs::lcs_subsequence;
///
/// assert_eq!(lcs_subsequence("ABCDGH", "AEDFHR"), "ADH");
/// ```
#[must_use]
pub fn lcs_subsequence(a: &str, b: &str) -> String {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 || n == 0 {
        return String::new();
    }

    // Full table needed for the backtrack
    let mut dp: Vec<Vec<usize>> = vec![vec![0; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            if a_chars[i - 1] == b_chars[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    let mut lcs = Vec::with_capacity(dp[m][n]);
    let mut i = m;
    let mut j = n;

    while i > 0 && j > 0 {
        if a_chars[i - 1] == b_chars[j - 1] {
            lcs.push(a_chars[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] > dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs.into_iter().collect()
}

/// LCS edit distance: `len(a) + len(b) - 2 * lcs_length(a, b)`.
///
/// Counts the insertions and deletions needed when substitution is not an
/// available operation.
///
/// # Example
/// ```
/// use seqsim::algorithms::lcs::lcs_distance;
///
/// assert_eq!(lcs_distance("frog", "fog"), 1);
/// assert_eq!(lcs_distance("ab", "ba"), 2);
/// ```
#[must_use]
pub fn lcs_distance(a: &str, b: &str) -> usize {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    a_chars.len() + b_chars.len() - 2 * lcs_length_core(&a_chars, &b_chars)
}

/// Calculate LCS-based similarity (0.0 to 1.0).
/// Uses the formula: 2 * LCS_length / (len(a) + len(b))
#[must_use]
pub fn lcs_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let lcs_len = lcs_length(a, b);
    (2.0 * lcs_len as f64) / (len_a + len_b) as f64
}
