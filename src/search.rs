//! Candidate search helpers
//!
//! Currying adapters that fix a metric and the left operand for repeated
//! one-against-many comparison, plus batch ranking over candidate lists.
//! Batches at or above [`PARALLEL_THRESHOLD`] candidates are scored on the
//! rayon thread pool; results come back in a deterministic order either way.

use crate::algorithms::{EditDistance, SimilarityScore};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Batch size at which scoring switches to the rayon thread pool.
pub const PARALLEL_THRESHOLD: usize = 100;

// ============================================================================
// Currying adapters
// ============================================================================

/// An edit-distance metric with the left operand fixed.
///
/// Useful when one query is compared against many candidates: the metric and
/// query travel together as one value.
///
/// # Example
/// ```
/// use seqsim::algorithms::Levenshtein;
/// use seqsim::search::EditDistanceFrom;
///
/// let from_kitten = EditDistanceFrom::new(Levenshtein::new(), "kitten");
/// assert_eq!(from_kitten.apply("sitting"), Some(3));
/// assert_eq!(from_kitten.apply("mitten"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct EditDistanceFrom<'a, D, I: ?Sized> {
    metric: D,
    left: &'a I,
}

impl<'a, D, I: ?Sized> EditDistanceFrom<'a, D, I> {
    #[must_use]
    pub fn new(metric: D, left: &'a I) -> Self {
        Self { metric, left }
    }

    /// The fixed left operand.
    #[must_use]
    pub fn left(&self) -> &I {
        self.left
    }

    /// The wrapped metric.
    #[must_use]
    pub fn metric(&self) -> &D {
        &self.metric
    }
}

impl<D, I> EditDistanceFrom<'_, D, I>
where
    D: EditDistance<I>,
    I: ?Sized,
{
    /// Compares the fixed left operand against `right`.
    pub fn apply(&self, right: &I) -> D::Output {
        self.metric.apply(self.left, right)
    }
}

/// A similarity score with the left operand fixed.
///
/// The score counterpart of [`EditDistanceFrom`].
#[derive(Debug, Clone)]
pub struct SimilarityScoreFrom<'a, S, I: ?Sized> {
    metric: S,
    left: &'a I,
}

impl<'a, S, I: ?Sized> SimilarityScoreFrom<'a, S, I> {
    #[must_use]
    pub fn new(metric: S, left: &'a I) -> Self {
        Self { metric, left }
    }

    /// The fixed left operand.
    #[must_use]
    pub fn left(&self) -> &I {
        self.left
    }

    /// The wrapped metric.
    #[must_use]
    pub fn metric(&self) -> &S {
        &self.metric
    }
}

impl<S, I> SimilarityScoreFrom<'_, S, I>
where
    S: SimilarityScore<I>,
    I: ?Sized,
{
    /// Compares the fixed left operand against `right`.
    pub fn apply(&self, right: &I) -> S::Output {
        self.metric.apply(self.left, right)
    }
}

// ============================================================================
// Batch ranking
// ============================================================================

/// One scored candidate from a batch comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Position of the candidate in the input slice.
    pub index: usize,
    /// Score assigned by the scorer; higher is better.
    pub score: f64,
}

/// Score every candidate against `query` and sort best-first.
///
/// Candidates with equal scores keep their input order. Batches of
/// [`PARALLEL_THRESHOLD`] or more are scored in parallel.
pub fn rank_candidates<T, F>(query: &str, candidates: &[T], scorer: F) -> Vec<Match>
where
    T: AsRef<str> + Sync,
    F: Fn(&str, &str) -> f64 + Sync,
{
    let mut matches: Vec<Match> = if candidates.len() >= PARALLEL_THRESHOLD {
        candidates
            .par_iter()
            .enumerate()
            .map(|(index, candidate)| Match {
                index,
                score: scorer(query, candidate.as_ref()),
            })
            .collect()
    } else {
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| Match {
                index,
                score: scorer(query, candidate.as_ref()),
            })
            .collect()
    };

    matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    matches
}

/// The best-scoring candidate, or `None` for an empty batch.
///
/// Ties go to the earliest candidate.
pub fn best_candidate<T, F>(query: &str, candidates: &[T], scorer: F) -> Option<Match>
where
    T: AsRef<str> + Sync,
    F: Fn(&str, &str) -> f64 + Sync,
{
    rank_candidates(query, candidates, scorer).into_iter().next()
}

/// The candidate at the smallest edit distance from `query`.
///
/// Candidates whose distance exceeds the metric's threshold are skipped;
/// `None` means no candidate was within reach. Ties go to the earliest
/// candidate. Returns the candidate index and its distance.
pub fn nearest_candidate<D, T>(metric: D, query: &str, candidates: &[T]) -> Option<(usize, usize)>
where
    D: EditDistance<str, Output = Option<usize>>,
    T: AsRef<str>,
{
    let from = EditDistanceFrom::new(metric, query);
    let mut best: Option<(usize, usize)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        if let Some(distance) = from.apply(candidate.as_ref()) {
            match best {
                Some((_, held)) if held <= distance => {}
                _ => best = Some((index, distance)),
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{
        levenshtein_similarity, DamerauLevenshtein, JaroWinkler, Levenshtein,
    };

    #[test]
    fn test_edit_distance_from() {
        let from_kitten = EditDistanceFrom::new(Levenshtein::new(), "kitten");
        assert_eq!(from_kitten.apply("sitting"), Some(3));
        assert_eq!(from_kitten.apply("mitten"), Some(1));
        assert_eq!(from_kitten.apply("kitten"), Some(0));
        assert_eq!(from_kitten.left(), "kitten");
    }

    #[test]
    fn test_edit_distance_from_bounded_metric() {
        let from = EditDistanceFrom::new(Levenshtein::with_threshold(2), "kitten");
        assert_eq!(from.apply("mitten"), Some(1));
        assert_eq!(from.apply("sitting"), None);
    }

    #[test]
    fn test_edit_distance_from_slices() {
        let left = [1u8, 2, 3];
        let from = EditDistanceFrom::new(DamerauLevenshtein::new(), &left[..]);
        assert_eq!(from.apply(&[2u8, 1, 3][..]), Some(1));
    }

    #[test]
    fn test_similarity_score_from() {
        let from = SimilarityScoreFrom::new(JaroWinkler::new(), "frog");
        let score = from.apply("fog");
        assert!((score - 0.925).abs() < 1e-3);
        assert!((from.apply("frog") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_candidates() {
        let candidates = ["sitting", "kitten", "mitten"];
        let ranked = rank_candidates("kitten", &candidates, levenshtein_similarity);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].index, 1);
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
        // Descending scores throughout.
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let candidates = ["ac", "ad", "zz"];
        let ranked = rank_candidates("ab", &candidates, levenshtein_similarity);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
        assert_eq!(ranked[2].index, 2);
    }

    #[test]
    fn test_rank_parallel_batch() {
        let mut candidates: Vec<String> =
            (0..PARALLEL_THRESHOLD + 50).map(|i| format!("word{}", i)).collect();
        candidates[73] = "needle".to_string();

        let ranked = rank_candidates("needle", &candidates, levenshtein_similarity);
        assert_eq!(ranked.len(), PARALLEL_THRESHOLD + 50);
        assert_eq!(ranked[0].index, 73);
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_best_candidate() {
        let candidates = ["sitting", "kitten", "mitten"];
        let best = best_candidate("kitten", &candidates, levenshtein_similarity).unwrap();
        assert_eq!(best.index, 1);

        let empty: [&str; 0] = [];
        assert!(best_candidate("kitten", &empty, levenshtein_similarity).is_none());
    }

    #[test]
    fn test_nearest_candidate() {
        let candidates = ["abc", "abd", "xyz"];
        let nearest = nearest_candidate(Levenshtein::new(), "abd", &candidates);
        assert_eq!(nearest, Some((1, 0)));
    }

    #[test]
    fn test_nearest_candidate_threshold_filters() {
        let candidates = ["abcdef", "abcx", "qqqqqq"];
        let nearest = nearest_candidate(Levenshtein::with_threshold(2), "abcd", &candidates);
        assert_eq!(nearest, Some((1, 1)));

        let none = nearest_candidate(Levenshtein::with_threshold(1), "zzzz", &candidates);
        assert_eq!(none, None);
    }

    #[test]
    fn test_nearest_candidate_first_minimum_wins() {
        let candidates = ["ac", "ad"];
        let nearest = nearest_candidate(Levenshtein::new(), "ab", &candidates);
        assert_eq!(nearest, Some((0, 1)));
    }
}
