//! Similarity and edit-distance metric implementations
//!
//! This module provides the metric family and the two traits every metric
//! implements:
//!
//! - **Edit distances** (cost to transform one sequence into the other):
//!   Levenshtein (plain, bounded, detailed), true Damerau-Levenshtein,
//!   Hamming, LCS distance
//! - **Similarity scores** (higher is more alike): Jaro, Jaro-Winkler,
//!   LCS length, cosine, fuzzy matching score, and the converter-based
//!   intersection/overlap family (Jaccard, Sørensen-Dice, overlap, F1)
//!
//! Score-valued metrics also come in complement form (Jaro-Winkler distance,
//! cosine distance) computed as `1.0 - similarity`.
//!
//! Every calculator is an immutable value: configuration is fixed at
//! construction, `apply` takes both operands, and instances can be shared
//! across threads freely. Bounded variants report an exceeded threshold as
//! `None`, never as an error.
//!
//! The traits are generic over the operand type. Each calculator implements
//! them for `str` and, through a blanket implementation, for every
//! [`SimilarityInput`](crate::input::SimilarityInput) type (element slices,
//! vectors, [`CharInput`](crate::input::CharInput), or caller-defined
//! adapters).

pub mod cosine;
pub mod damerau;
pub mod fuzzy;
pub mod hamming;
pub mod intersection;
pub mod jaro;
pub mod lcs;
pub mod levenshtein;

pub use cosine::{
    cosine_distance_chars, cosine_distance_words, cosine_of_maps, cosine_similarity_chars,
    cosine_similarity_words, term_frequencies, CosineDistance, CosineSimilarity,
};
pub use damerau::{damerau_levenshtein, damerau_levenshtein_bounded, DamerauLevenshtein};
pub use fuzzy::{fuzzy_score, FuzzyScore};
pub use hamming::{hamming_distance, hamming_similarity, Hamming};
pub use intersection::{
    char_list, char_ngram_list, char_ngram_set, char_set, jaccard_distance, jaccard_similarity,
    ngram_jaccard_similarity, ngram_similarity, word_list, word_ngram_list, IntersectionResult,
    IntersectionSimilarity, OverlapResult, OverlapSimilarity,
};
pub use jaro::{
    jaro_similarity, jaro_winkler_distance, jaro_winkler_similarity, JaroWinkler,
    JaroWinklerConfig, JaroWinklerDistance,
};
pub use lcs::{lcs_distance, lcs_length, lcs_similarity, lcs_subsequence, Lcs, LcsDistance};
pub use levenshtein::{
    levenshtein, levenshtein_bounded, levenshtein_detailed, levenshtein_similarity, Levenshtein,
    LevenshteinDetailed, LevenshteinResults,
};

/// An edit-distance metric applied to two operands of type `I`.
///
/// One required method. `Output` is usually a count of edits: `usize` for
/// unbounded metrics, `Option<usize>` for threshold-bounded ones (`None`
/// means the threshold was exceeded), `Result` where the operands can be
/// incomparable (Hamming), or `f64` for the distance forms of normalized
/// similarities.
///
/// # Example
///
/// ```rust
/// use seqsim::algorithms::{EditDistance, Levenshtein};
///
/// let lev = Levenshtein::new();
/// assert_eq!(lev.apply("kitten", "sitting"), Some(3));
///
/// // The same calculator works on arbitrary element slices.
/// let left = [1u8, 2, 3];
/// let right = [1u8, 3];
/// assert_eq!(lev.apply(&left[..], &right[..]), Some(1));
/// ```
pub trait EditDistance<I: ?Sized>: Send + Sync {
    /// Result of a comparison.
    type Output;

    /// Computes the distance between `left` and `right`.
    fn apply(&self, left: &I, right: &I) -> Self::Output;
}

/// A similarity score applied to two operands of type `I`.
///
/// Scores are in `[0.0, 1.0]` for the normalized metrics (Jaro-Winkler,
/// cosine), counts for LCS length and the fuzzy matching score, and result
/// value types for the intersection/overlap family.
///
/// # Example
///
/// ```rust
/// use seqsim::algorithms::{JaroWinkler, SimilarityScore};
///
/// let jw = JaroWinkler::new();
/// let score = jw.apply("frog", "fog");
/// assert!((score - 0.925).abs() < 1e-3);
/// ```
pub trait SimilarityScore<I: ?Sized>: Send + Sync {
    /// Result of a comparison.
    type Output;

    /// Computes the similarity between `left` and `right`.
    fn apply(&self, left: &I, right: &I) -> Self::Output;
}
