//! Levenshtein (edit) distance implementation
//!
//! Three variants over one DP core:
//! - Plain distance with two rolling rows
//! - Threshold-bounded distance computing only a diagonal band of width
//!   `2*threshold + 1`, with early termination once a whole row exceeds
//!   the threshold
//! - Detailed distance recording a move code per cell, then walking the
//!   codes back to report insert/delete/substitute counts
//!
//! # Complexity
//! - Time: O(m*n), or O(n*threshold) for the bounded variant
//! - Space: O(min(m,n)) for the cost rows; the detailed variant adds one
//!   byte per cell for the move arena

use super::EditDistance;
use crate::input::{collect_elements, SimilarityInput};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

// ============================================================================
// DP cores
// ============================================================================

/// Two-row DP distance for comparable slices.
///
/// The shorter sequence always sits on the column axis so the rolling row is
/// O(min(m,n)), with the longer sequence driving the outer loop.
#[inline]
fn dp_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;

        for j in 0..n_target {
            let cost = usize::from(*sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[n_target]
}

/// Banded DP distance under a threshold.
///
/// Only the diagonal stripe of width `2*threshold + 1` is computed; cells
/// outside it stay at `usize::MAX` and count as unreachable. Returns `None`
/// as soon as every cell of the current row exceeds the threshold, since no
/// later cell can fall below its row minimum.
#[inline]
fn dp_distance_banded<T: PartialEq>(a: &[T], b: &[T], threshold: usize) -> Option<usize> {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return if n <= threshold { Some(n) } else { None };
    }
    if n == 0 {
        return if m <= threshold { Some(m) } else { None };
    }
    if m.abs_diff(n) > threshold {
        return None;
    }

    let (target, source) = if m < n { (a, b) } else { (b, a) };
    let cols = target.len();

    let mut prev: SmallVec<[usize; 64]> = SmallVec::from_elem(usize::MAX, cols + 1);
    let mut curr: SmallVec<[usize; 64]> = SmallVec::from_elem(usize::MAX, cols + 1);

    // Row 0 is reachable only up to the stripe edge.
    let boundary = cols.min(threshold) + 1;
    for (j, cell) in prev.iter_mut().take(boundary).enumerate() {
        *cell = j;
    }

    for (i, sc) in source.iter().enumerate() {
        let row = i + 1;
        curr[0] = row;

        let lo = 1.max(row.saturating_sub(threshold));
        let hi = cols.min(row.saturating_add(threshold));
        if lo > hi {
            return None;
        }
        // Guard the stripe's left edge against the stale cell two rows back.
        if lo > 1 {
            curr[lo - 1] = usize::MAX;
        }

        let mut row_min = usize::MAX;
        for j in lo..=hi {
            let cell = if *sc == target[j - 1] {
                prev[j - 1]
            } else {
                // prev[j - 1] is always inside the previous stripe, so the
                // minimum is finite and the increment cannot overflow.
                1 + prev[j - 1].min(prev[j]).min(curr[j - 1])
            };
            curr[j] = cell;
            row_min = row_min.min(cell);
        }

        if row_min > threshold {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let result = prev[cols];
    if result <= threshold {
        Some(result)
    } else {
        None
    }
}

// Backtrack move codes recorded during the detailed forward pass.
const MOVE_MATCH: u8 = 0;
const MOVE_SUBSTITUTE: u8 = 1;
const MOVE_INSERT: u8 = 2;
const MOVE_DELETE: u8 = 3;

/// Detailed DP: distance plus insert/delete/substitute attribution.
///
/// Operands are canonicalized so the shorter sequence is on the column axis;
/// the counts are swapped back on return when the operands were swapped,
/// which is what makes mirrored calls report mirrored insert/delete counts.
/// Per cell the forward pass records one move code into a flat arena, with
/// equal-cost ties resolved as substitute over insert over delete, and the
/// backtrack just follows the recorded codes.
fn dp_detailed<T: PartialEq>(
    left: &[T],
    right: &[T],
    threshold: Option<usize>,
) -> LevenshteinResults {
    let swapped = left.len() > right.len();
    let (a, b) = if swapped { (right, left) } else { (left, right) };
    let n = a.len();
    let m = b.len();

    if let Some(t) = threshold {
        if m - n > t {
            return LevenshteinResults::exceeded();
        }
    }
    if n == 0 {
        // Everything in the longer operand is one edit; direction depends on
        // which side it came in on.
        return if swapped {
            LevenshteinResults::new(Some(m), 0, m, 0)
        } else {
            LevenshteinResults::new(Some(m), m, 0, 0)
        };
    }

    let cols = n + 1;
    let mut moves = vec![MOVE_MATCH; (m + 1) * cols];
    for (i, mv) in moves.iter_mut().take(cols).enumerate() {
        if i > 0 {
            *mv = MOVE_DELETE;
        }
    }
    for j in 1..=m {
        moves[j * cols] = MOVE_INSERT;
    }

    let mut prev: SmallVec<[usize; 64]> = SmallVec::from_elem(usize::MAX, cols);
    let mut curr: SmallVec<[usize; 64]> = SmallVec::from_elem(usize::MAX, cols);
    let boundary = match threshold {
        Some(t) => n.min(t) + 1,
        None => cols,
    };
    for (i, cell) in prev.iter_mut().take(boundary).enumerate() {
        *cell = i;
    }

    for j in 1..=m {
        curr[0] = j;
        let (lo, hi) = match threshold {
            Some(t) => (1.max(j.saturating_sub(t)), n.min(j.saturating_add(t))),
            None => (1, n),
        };
        if lo > hi {
            return LevenshteinResults::exceeded();
        }
        if lo > 1 {
            curr[lo - 1] = usize::MAX;
        }

        let mut row_min = usize::MAX;
        for i in lo..=hi {
            let eq = a[i - 1] == b[j - 1];
            let substitute = prev[i - 1] + usize::from(!eq);
            let insert = prev[i].saturating_add(1);
            let delete = curr[i - 1].saturating_add(1);
            let best = substitute.min(insert).min(delete);

            curr[i] = best;
            row_min = row_min.min(best);
            moves[j * cols + i] = if eq && best == prev[i - 1] {
                MOVE_MATCH
            } else if best == substitute {
                MOVE_SUBSTITUTE
            } else if best == insert {
                MOVE_INSERT
            } else {
                MOVE_DELETE
            };
        }

        if let Some(t) = threshold {
            if row_min > t {
                return LevenshteinResults::exceeded();
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[n];
    if let Some(t) = threshold {
        if distance > t {
            return LevenshteinResults::exceeded();
        }
    }

    let mut inserts = 0usize;
    let mut deletes = 0usize;
    let mut substitutes = 0usize;
    let (mut j, mut i) = (m, n);
    while i > 0 || j > 0 {
        match moves[j * cols + i] {
            MOVE_MATCH => {
                i -= 1;
                j -= 1;
            }
            MOVE_SUBSTITUTE => {
                substitutes += 1;
                i -= 1;
                j -= 1;
            }
            MOVE_INSERT => {
                inserts += 1;
                j -= 1;
            }
            _ => {
                deletes += 1;
                i -= 1;
            }
        }
    }

    if swapped {
        std::mem::swap(&mut inserts, &mut deletes);
    }
    LevenshteinResults::new(Some(distance), inserts, deletes, substitutes)
}

// ============================================================================
// Result type
// ============================================================================

/// Distance plus edit attribution from the detailed variant.
///
/// Invariant: when `distance()` is `Some(d)`, then
/// `d == insert_count() + delete_count() + substitute_count()`; when the
/// threshold was exceeded, `distance()` is `None` and all counts are 0.
/// Plain value type: equality and hashing cover all four fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevenshteinResults {
    distance: Option<usize>,
    inserts: usize,
    deletes: usize,
    substitutes: usize,
}

impl LevenshteinResults {
    /// Builds a result; the distance must equal the sum of the counts.
    #[must_use]
    pub fn new(
        distance: Option<usize>,
        inserts: usize,
        deletes: usize,
        substitutes: usize,
    ) -> Self {
        debug_assert!(match distance {
            Some(d) => d == inserts + deletes + substitutes,
            None => inserts == 0 && deletes == 0 && substitutes == 0,
        });
        Self {
            distance,
            inserts,
            deletes,
            substitutes,
        }
    }

    fn exceeded() -> Self {
        Self::new(None, 0, 0, 0)
    }

    /// The edit distance, or `None` when it exceeded the threshold.
    #[must_use]
    pub fn distance(&self) -> Option<usize> {
        self.distance
    }

    /// Insertions on the chosen optimal path.
    #[must_use]
    pub fn insert_count(&self) -> usize {
        self.inserts
    }

    /// Deletions on the chosen optimal path.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes
    }

    /// Substitutions on the chosen optimal path.
    #[must_use]
    pub fn substitute_count(&self) -> usize {
        self.substitutes
    }
}

impl fmt::Display for LevenshteinResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.distance {
            Some(d) => write!(
                f,
                "distance: {}, inserts: {}, deletes: {}, substitutes: {}",
                d, self.inserts, self.deletes, self.substitutes
            ),
            None => write!(f, "distance: exceeds threshold"),
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Levenshtein distance calculator with an optional threshold
///
/// With a threshold set, `apply` computes only the diagonal band and returns
/// `None` once the distance provably exceeds the bound.
///
/// # Complexity
/// - Time: O(m*n), or O(n*threshold) when bounded
/// - Space: O(min(m,n))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein {
    threshold: Option<usize>,
}

impl Levenshtein {
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

    fn compute<T: PartialEq>(&self, a: &[T], b: &[T]) -> Option<usize> {
        match self.threshold {
            Some(t) => dp_distance_banded(a, b, t),
            None => Some(dp_distance(a, b)),
        }
    }
}

impl EditDistance<str> for Levenshtein {
    type Output = Option<usize>;

    fn apply(&self, left: &str, right: &str) -> Option<usize> {
        let a: SmallVec<[char; 64]> = left.chars().collect();
        let b: SmallVec<[char; 64]> = right.chars().collect();
        self.compute(&a, &b)
    }
}

impl<I> EditDistance<I> for Levenshtein
where
    I: SimilarityInput + ?Sized,
    I::Elem: PartialEq,
{
    type Output = Option<usize>;

    fn apply(&self, left: &I, right: &I) -> Option<usize> {
        let a = collect_elements(left);
        let b = collect_elements(right);
        self.compute(&a, &b)
    }
}

/// Detailed Levenshtein calculator reporting edit attribution
///
/// Same DP and threshold contract as [`Levenshtein`], but `apply` returns a
/// [`LevenshteinResults`] with insert/delete/substitute counts for one
/// deterministically chosen optimal path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevenshteinDetailed {
    threshold: Option<usize>,
}

impl LevenshteinDetailed {
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
}

impl EditDistance<str> for LevenshteinDetailed {
    type Output = LevenshteinResults;

    fn apply(&self, left: &str, right: &str) -> LevenshteinResults {
        let a: SmallVec<[char; 64]> = left.chars().collect();
        let b: SmallVec<[char; 64]> = right.chars().collect();
        dp_detailed(&a, &b, self.threshold)
    }
}

impl<I> EditDistance<I> for LevenshteinDetailed
where
    I: SimilarityInput + ?Sized,
    I::Elem: PartialEq,
{
    type Output = LevenshteinResults;

    fn apply(&self, left: &I, right: &I) -> LevenshteinResults {
        let a = collect_elements(left);
        let b = collect_elements(right);
        dp_detailed(&a, &b, self.threshold)
    }
}

/// Convenience function for simple distance calculation
///
/// # Example
/// ```
/// use seqsim::algorithms::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// ```
#[inline]
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    dp_distance(&a_chars, &b_chars)
}

/// Compute Levenshtein distance under a threshold.
///
/// Returns `None` when the distance exceeds `threshold`; exceeding the bound
/// is an ordinary outcome, not an error. Threshold `0` accepts only equal
/// inputs.
///
/// # Example
/// ```
/// use seqsim::algorithms::levenshtein::levenshtein_bounded;
///
/// assert_eq!(levenshtein_bounded("abc", "abd", 2), Some(1));
/// assert_eq!(levenshtein_bounded("abcdef", "ghijkl", 3), None);
/// assert_eq!(levenshtein_bounded("abc", "abc", 0), Some(0));
/// ```
#[inline]
#[must_use]
pub fn levenshtein_bounded(a: &str, b: &str, threshold: usize) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    dp_distance_banded(&a_chars, &b_chars, threshold)
}

/// Compute distance with insert/delete/substitute attribution.
///
/// # Example
/// ```
/// use seqsim::algorithms::levenshtein::levenshtein_detailed;
///
/// let r = levenshtein_detailed("kitten", "sitting");
/// assert_eq!(r.distance(), Some(3));
/// assert_eq!(r.insert_count(), 1);
/// assert_eq!(r.delete_count(), 0);
/// assert_eq!(r.substitute_count(), 2);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_detailed(a: &str, b: &str) -> LevenshteinResults {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    dp_detailed(&a_chars, &b_chars, None)
}

/// Convenience function for normalized similarity (0.0 to 1.0)
#[inline]
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let dist = levenshtein(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        1.0
    } else {
        1.0 - (dist as f64 / max_len as f64)
    }
}
