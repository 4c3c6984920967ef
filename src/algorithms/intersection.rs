//! Intersection and overlap similarity framework
//!
//! Converts each operand into a bag of elements through a caller-supplied
//! converter, counts both bags and their intersection once, and exposes the
//! derived coefficients (Jaccard, Sørensen-Dice, F1, overlap) on the result
//! value. Whether duplicates matter is decided entirely by the converter: a
//! converter returning a set collapses them, one returning a list keeps them,
//! and duplicate elements intersect by their minimum count per element.
//! Built-in converters cover characters, padded or unpadded character
//! n-grams, whitespace-delimited words, and word shingles.
//!
//! # Complexity
//! - Time: O(m+n) over converted elements
//! - Space: O(unique elements) for the frequency maps

use super::SimilarityScore;
use crate::algorithms::cosine::term_frequencies;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;

// ============================================================================
// Counting
// ============================================================================

/// Bag sizes and intersection size for two converted operands.
///
/// Duplicates intersect by minimum count per element, which reduces to plain
/// set intersection when the inputs are already deduplicated.
fn count_common<T, A, B>(left: A, right: B) -> (usize, usize, usize)
where
    T: Eq + Hash,
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    let freq_a = term_frequencies(left);
    let freq_b = term_frequencies(right);

    let size_a: usize = freq_a.values().sum();
    let size_b: usize = freq_b.values().sum();

    let mut intersection = 0usize;
    for (key, &count_a) in &freq_a {
        if let Some(&count_b) = freq_b.get(key) {
            intersection += count_a.min(count_b);
        }
    }

    (size_a, size_b, intersection)
}

// ============================================================================
// Result types
// ============================================================================

/// Element counts from one intersection comparison.
///
/// Carries the three base counts; every coefficient is derived on demand, so
/// one comparison can feed several scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntersectionResult {
    size_a: usize,
    size_b: usize,
    intersection: usize,
}

impl IntersectionResult {
    /// Builds a result from raw counts.
    ///
    /// # Panics
    /// Panics when `intersection` exceeds the smaller of the two sizes, which
    /// no real comparison can produce.
    #[must_use]
    pub fn new(size_a: usize, size_b: usize, intersection: usize) -> Self {
        assert!(
            intersection <= size_a.min(size_b),
            "intersection {} exceeds the smaller operand size ({}, {})",
            intersection,
            size_a,
            size_b
        );
        Self {
            size_a,
            size_b,
            intersection,
        }
    }

    /// Element count of the left operand.
    #[must_use]
    pub fn size_a(&self) -> usize {
        self.size_a
    }

    /// Element count of the right operand.
    #[must_use]
    pub fn size_b(&self) -> usize {
        self.size_b
    }

    /// Element count of the intersection.
    #[must_use]
    pub fn intersection(&self) -> usize {
        self.intersection
    }

    /// Element count of the union, widened so large operands cannot wrap.
    #[must_use]
    pub fn union(&self) -> u64 {
        self.size_a as u64 + self.size_b as u64 - self.intersection as u64
    }

    /// Jaccard index: intersection over union. 0.0 when the union is empty.
    #[must_use]
    pub fn jaccard_index(&self) -> f64 {
        let union = self.union();
        if union == 0 {
            0.0
        } else {
            self.intersection as f64 / union as f64
        }
    }

    /// Sørensen-Dice coefficient: twice the intersection over the summed
    /// sizes. 0.0 when both operands are empty.
    #[must_use]
    pub fn sorensen_dice_coefficient(&self) -> f64 {
        let denominator = self.size_a as u64 + self.size_b as u64;
        if denominator == 0 {
            0.0
        } else {
            (2 * self.intersection) as f64 / denominator as f64
        }
    }

    /// F1 score. Equals the Sørensen-Dice coefficient when one operand is
    /// taken as the prediction and the other as the reference.
    #[must_use]
    pub fn f1_score(&self) -> f64 {
        self.sorensen_dice_coefficient()
    }
}

impl fmt::Display for IntersectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size_a: {}, size_b: {}, intersection: {}",
            self.size_a, self.size_b, self.intersection
        )
    }
}

/// Element counts from one overlap comparison.
///
/// Same base counts and ratio accessors as [`IntersectionResult`], minus
/// `f1_score` and plus the overlap coefficient, which normalizes by the
/// smaller operand so a full subset scores 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlapResult {
    size_a: usize,
    size_b: usize,
    intersection: usize,
}

impl OverlapResult {
    /// Builds a result from raw counts.
    ///
    /// # Panics
    /// Panics when `intersection` exceeds the smaller of the two sizes.
    #[must_use]
    pub fn new(size_a: usize, size_b: usize, intersection: usize) -> Self {
        assert!(
            intersection <= size_a.min(size_b),
            "intersection {} exceeds the smaller operand size ({}, {})",
            intersection,
            size_a,
            size_b
        );
        Self {
            size_a,
            size_b,
            intersection,
        }
    }

    /// Element count of the left operand.
    #[must_use]
    pub fn size_a(&self) -> usize {
        self.size_a
    }

    /// Element count of the right operand.
    #[must_use]
    pub fn size_b(&self) -> usize {
        self.size_b
    }

    /// Element count of the intersection.
    #[must_use]
    pub fn intersection(&self) -> usize {
        self.intersection
    }

    /// Element count of the union, widened so large operands cannot wrap.
    #[must_use]
    pub fn union(&self) -> u64 {
        self.size_a as u64 + self.size_b as u64 - self.intersection as u64
    }

    /// Jaccard index: intersection over union. 0.0 when the union is empty.
    #[must_use]
    pub fn jaccard_index(&self) -> f64 {
        let union = self.union();
        if union == 0 {
            0.0
        } else {
            self.intersection as f64 / union as f64
        }
    }

    /// Sørensen-Dice coefficient: twice the intersection over the summed
    /// sizes. 0.0 when both operands are empty.
    #[must_use]
    pub fn sorensen_dice_coefficient(&self) -> f64 {
        let denominator = self.size_a as u64 + self.size_b as u64;
        if denominator == 0 {
            0.0
        } else {
            (2 * self.intersection) as f64 / denominator as f64
        }
    }

    /// Overlap coefficient: intersection over the smaller operand size.
    /// 0.0 when either operand is empty.
    #[must_use]
    pub fn overlap_coefficient(&self) -> f64 {
        let smaller = self.size_a.min(self.size_b);
        if smaller == 0 {
            0.0
        } else {
            self.intersection as f64 / smaller as f64
        }
    }
}

impl fmt::Display for OverlapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size_a: {}, size_b: {}, intersection: {}",
            self.size_a, self.size_b, self.intersection
        )
    }
}

// ============================================================================
// Calculators
// ============================================================================

/// Intersection calculator over a converter
///
/// The converter turns each string operand into the elements to count:
/// characters, n-grams, words, shingles, or anything else hashable. Returning
/// a set makes comparisons duplicate-insensitive; returning a list keeps
/// duplicate counts.
///
/// # Example
/// ```
/// use seqsim::algorithms::{IntersectionSimilarity, SimilarityScore};
///
/// let by_chars = IntersectionSimilarity::new(|s: &str| s.chars().collect::<Vec<_>>());
/// let result = by_chars.apply("night", "nacht");
/// assert_eq!(result.intersection(), 3);
/// assert!((result.jaccard_index() - 3.0 / 7.0).abs() < 1e-9);
/// ```
#[derive(Clone)]
pub struct IntersectionSimilarity<C> {
    converter: C,
}

impl<C> IntersectionSimilarity<C> {
    #[must_use]
    pub fn new(converter: C) -> Self {
        Self { converter }
    }
}

impl<C> fmt::Debug for IntersectionSimilarity<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntersectionSimilarity").finish_non_exhaustive()
    }
}

impl<C, B> SimilarityScore<str> for IntersectionSimilarity<C>
where
    C: Fn(&str) -> B + Send + Sync,
    B: IntoIterator,
    B::Item: Eq + Hash,
{
    type Output = IntersectionResult;

    fn apply(&self, left: &str, right: &str) -> IntersectionResult {
        let (size_a, size_b, intersection) =
            count_common((self.converter)(left), (self.converter)(right));
        IntersectionResult::new(size_a, size_b, intersection)
    }
}

/// Overlap calculator over a converter
///
/// Identical counting to [`IntersectionSimilarity`], reported as an
/// [`OverlapResult`] for the subset-friendly overlap coefficient.
#[derive(Clone)]
pub struct OverlapSimilarity<C> {
    converter: C,
}

impl<C> OverlapSimilarity<C> {
    #[must_use]
    pub fn new(converter: C) -> Self {
        Self { converter }
    }
}

impl<C> fmt::Debug for OverlapSimilarity<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlapSimilarity").finish_non_exhaustive()
    }
}

impl<C, B> SimilarityScore<str> for OverlapSimilarity<C>
where
    C: Fn(&str) -> B + Send + Sync,
    B: IntoIterator,
    B::Item: Eq + Hash,
{
    type Output = OverlapResult;

    fn apply(&self, left: &str, right: &str) -> OverlapResult {
        let (size_a, size_b, intersection) =
            count_common((self.converter)(left), (self.converter)(right));
        OverlapResult::new(size_a, size_b, intersection)
    }
}

// ============================================================================
// Converters
// ============================================================================

/// Character list converter; keeps duplicate characters.
#[must_use]
pub fn char_list(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Character set converter; collapses duplicate characters.
#[must_use]
pub fn char_set(s: &str) -> AHashSet<char> {
    s.chars().collect()
}

/// Whitespace-delimited word list converter; keeps duplicate words.
#[must_use]
pub fn word_list(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_owned).collect()
}

/// Character n-grams of `s`. With `padded`, n-1 spaces on each side anchor
/// the ends, so leading and trailing characters weigh as much as interior
/// ones.
fn char_ngrams(s: &str, n: usize, padded: bool) -> Vec<String> {
    let chars: SmallVec<[char; 64]> = if padded {
        let padding = " ".repeat(n - 1);
        format!("{padding}{s}{padding}").chars().collect()
    } else {
        s.chars().collect()
    };
    if chars.len() < n {
        return Vec::new();
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

fn clamp_ngram_size(n: usize) -> usize {
    // Warn in debug mode if clamping is applied
    #[cfg(debug_assertions)]
    if n == 0 {
        eprintln!("[seqsim warning] n-gram size 0 clamped to 1");
    }
    n.max(1)
}

/// Character n-gram list converter; keeps duplicate n-grams.
///
/// A size of 0 is clamped to 1.
#[must_use]
pub fn char_ngram_list(n: usize, padded: bool) -> impl Fn(&str) -> Vec<String> {
    let n = clamp_ngram_size(n);
    move |s: &str| char_ngrams(s, n, padded)
}

/// Set form of [`char_ngram_list`]; collapses duplicate n-grams.
#[must_use]
pub fn char_ngram_set(n: usize, padded: bool) -> impl Fn(&str) -> AHashSet<String> {
    let n = clamp_ngram_size(n);
    move |s: &str| char_ngrams(s, n, padded).into_iter().collect()
}

/// Word shingle list converter: n-grams over whitespace-delimited words,
/// rejoined with single spaces. Keeps duplicate shingles.
///
/// A size of 0 is clamped to 1.
#[must_use]
pub fn word_ngram_list(n: usize) -> impl Fn(&str) -> Vec<String> {
    let n = clamp_ngram_size(n);
    move |s: &str| {
        let words: Vec<&str> = s.split_whitespace().collect();
        if words.len() < n {
            return Vec::new();
        }
        words.windows(n).map(|w| w.join(" ")).collect()
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Jaccard similarity over distinct characters.
///
/// # Example
/// ```
/// use seqsim::algorithms::intersection::jaccard_similarity;
///
/// // 3 shared of 7 distinct characters overall.
/// let sim = jaccard_similarity("night", "nacht");
/// assert!((sim - 3.0 / 7.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let set_a: AHashSet<char> = a.chars().collect();
    let set_b: AHashSet<char> = b.chars().collect();
    let intersection = set_a.intersection(&set_b).count();
    IntersectionResult::new(set_a.len(), set_b.len(), intersection).jaccard_index()
}

/// Jaccard distance over distinct characters (1.0 - similarity).
#[must_use]
pub fn jaccard_distance(a: &str, b: &str) -> f64 {
    1.0 - jaccard_similarity(a, b)
}

/// Sørensen-Dice similarity over distinct padded character n-grams.
/// Returns 0.0 if n is 0 (no valid n-grams can be extracted).
#[must_use]
pub fn ngram_similarity(a: &str, b: &str, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let set_a: AHashSet<String> = char_ngrams(a, n, true).into_iter().collect();
    let set_b: AHashSet<String> = char_ngrams(b, n, true).into_iter().collect();
    let intersection = set_a.intersection(&set_b).count();
    IntersectionResult::new(set_a.len(), set_b.len(), intersection).sorensen_dice_coefficient()
}

/// Jaccard similarity over distinct padded character n-grams.
/// Returns 0.0 if n is 0 (no valid n-grams can be extracted).
#[must_use]
pub fn ngram_jaccard_similarity(a: &str, b: &str, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let set_a: AHashSet<String> = char_ngrams(a, n, true).into_iter().collect();
    let set_b: AHashSet<String> = char_ngrams(b, n, true).into_iter().collect();
    let intersection = set_a.intersection(&set_b).count();
    IntersectionResult::new(set_a.len(), set_b.len(), intersection).jaccard_index()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_night_nacht_counts() {
        let by_chars = IntersectionSimilarity::new(char_set);
        let result = by_chars.apply("night", "nacht");
        assert_eq!(result.size_a(), 5);
        assert_eq!(result.size_b(), 5);
        assert_eq!(result.intersection(), 3);
        assert_eq!(result.union(), 7);
        assert!(approx_eq(result.jaccard_index(), 3.0 / 7.0));
        assert!(approx_eq(result.sorensen_dice_coefficient(), 0.6));
        assert!(approx_eq(result.f1_score(), 0.6));
    }

    #[test]
    fn test_duplicate_policy_is_the_converters() {
        // Set converter collapses duplicates.
        let sets = IntersectionSimilarity::new(char_set);
        let r = sets.apply("aaaa", "aa");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (1, 1, 1));

        // List converter keeps them; duplicates intersect by minimum count.
        let lists = IntersectionSimilarity::new(char_list);
        let r = lists.apply("aaaa", "aa");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (4, 2, 2));

        let r = lists.apply("aaaa", "aaa");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (4, 3, 3));
    }

    #[test]
    fn test_derived_values_are_stable() {
        let r = IntersectionResult::new(5, 5, 3);
        assert_eq!(r.jaccard_index(), r.jaccard_index());
        assert_eq!(
            r.sorensen_dice_coefficient(),
            r.sorensen_dice_coefficient()
        );
        assert_eq!(r, IntersectionResult::new(5, 5, 3));
    }

    #[test]
    #[should_panic(expected = "exceeds the smaller operand size")]
    fn test_impossible_counts_rejected() {
        let _ = IntersectionResult::new(1, 1, 5);
    }

    #[test]
    fn test_empty_operands() {
        let lists = IntersectionSimilarity::new(char_list);
        let r = lists.apply("", "");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (0, 0, 0));
        assert!(approx_eq(r.jaccard_index(), 0.0));
        assert!(approx_eq(r.sorensen_dice_coefficient(), 0.0));

        let r = lists.apply("", "abc");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (0, 3, 0));
        assert!(approx_eq(r.jaccard_index(), 0.0));
    }

    #[test]
    fn test_overlap_subset_scores_one() {
        let overlap = OverlapSimilarity::new(char_set);
        let r = overlap.apply("abcd", "ab");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (4, 2, 2));
        assert!(approx_eq(r.overlap_coefficient(), 1.0));
        // The shared ratio accessors are available on the overlap form too.
        assert!(approx_eq(r.jaccard_index(), 0.5));
        assert!(approx_eq(r.sorensen_dice_coefficient(), 2.0 / 3.0));

        let r = overlap.apply("abcd", "cdef");
        assert!(approx_eq(r.overlap_coefficient(), 0.5));

        let r = overlap.apply("", "ab");
        assert!(approx_eq(r.overlap_coefficient(), 0.0));
    }

    #[test]
    fn test_word_list_converter() {
        let words = IntersectionSimilarity::new(word_list);
        let r = words.apply("the quick brown fox", "the quick brown dog");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (4, 4, 3));
        assert!(approx_eq(r.sorensen_dice_coefficient(), 0.75));
    }

    #[test]
    fn test_ngram_converters() {
        // Unpadded bigrams share only "ht"; padding adds " n" and "t ".
        let r = IntersectionSimilarity::new(char_ngram_list(2, false)).apply("night", "nacht");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (4, 4, 1));
        let r = IntersectionSimilarity::new(char_ngram_list(2, true)).apply("night", "nacht");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (6, 6, 3));

        // List form keeps repeated n-grams, set form collapses them.
        let r = IntersectionSimilarity::new(char_ngram_list(2, false)).apply("aaaa", "aaa");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (3, 2, 2));
        let r = IntersectionSimilarity::new(char_ngram_set(2, false)).apply("aaaa", "aaa");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (1, 1, 1));
    }

    #[test]
    fn test_word_ngram_converter() {
        let shingles = IntersectionSimilarity::new(word_ngram_list(2));
        let r = shingles.apply("the quick brown fox", "the quick red fox");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (3, 3, 1));

        // Fewer words than the shingle size yields an empty bag.
        let r = shingles.apply("one", "one two");
        assert_eq!((r.size_a(), r.size_b(), r.intersection()), (0, 1, 0));
    }

    #[test]
    fn test_ngram_size_clamped() {
        // Size 0 behaves as unigrams.
        let unigrams = char_ngram_list(0, false);
        assert_eq!(unigrams("abc"), ["a", "b", "c"]);
    }

    #[test]
    fn test_jaccard_similarity_function() {
        assert!(approx_eq(jaccard_similarity("night", "nacht"), 3.0 / 7.0));
        assert!(approx_eq(jaccard_similarity("", ""), 1.0));
        assert!(approx_eq(jaccard_similarity("same", "same"), 1.0));
        assert!(approx_eq(jaccard_similarity("abc", "xyz"), 0.0));
        assert!(approx_eq(
            jaccard_similarity("night", "nacht"),
            jaccard_similarity("nacht", "night")
        ));
    }

    #[test]
    fn test_jaccard_distance_complement() {
        let pairs = [("night", "nacht"), ("abc", "abc"), ("abc", "xyz")];
        for (a, b) in pairs {
            assert!(
                approx_eq(jaccard_similarity(a, b) + jaccard_distance(a, b), 1.0),
                "{a} / {b}"
            );
        }
    }

    #[test]
    fn test_ngram_similarity() {
        // Padded bigrams share " n", "ht" and "t ": dice 6/12, jaccard 3/9.
        assert!(approx_eq(ngram_similarity("night", "nacht", 2), 0.5));
        assert!(approx_eq(
            ngram_jaccard_similarity("night", "nacht", 2),
            1.0 / 3.0
        ));
        assert!(approx_eq(ngram_similarity("night", "night", 2), 1.0));
        assert!(approx_eq(ngram_similarity("night", "nacht", 0), 0.0));
        assert!(approx_eq(ngram_similarity("", "x", 2), 0.0));
    }

    #[test]
    fn test_results_display() {
        let r = IntersectionResult::new(5, 5, 3);
        assert_eq!(r.to_string(), "size_a: 5, size_b: 5, intersection: 3");
    }
}
