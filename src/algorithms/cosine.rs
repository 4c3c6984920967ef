//! Cosine similarity implementation
//!
//! Treats operands as term-frequency vectors and computes the cosine of the
//! angle between them. String calculators tokenize first, at character or
//! word level or through a caller-supplied tokenizer; non-string element
//! sequences go through [`term_frequencies`] and [`cosine_of_maps`] directly.
//! An operand whose vector is empty has zero norm, and the score is defined
//! as 0.0 whenever either norm is zero.
//!
//! # Complexity
//! - Time: O(m+n) over tokens
//! - Space: O(unique tokens) for the frequency maps

use super::SimilarityScore;
use ahash::AHashMap;
use std::fmt;
use std::hash::Hash;

// ============================================================================
// Frequency vectors
// ============================================================================

/// Count occurrences of each distinct item.
///
/// The resulting map is the term-frequency vector consumed by
/// [`cosine_of_maps`].
#[must_use]
pub fn term_frequencies<T, I>(items: I) -> AHashMap<T, usize>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut map = AHashMap::new();
    for item in items {
        *map.entry(item).or_insert(0) += 1;
    }
    map
}

/// Cosine of the angle between two term-frequency vectors.
///
/// Defined as 0.0 when either vector is empty (zero norm), including the
/// case where both are.
#[must_use]
pub fn cosine_of_maps<T: Eq + Hash>(map_a: &AHashMap<T, usize>, map_b: &AHashMap<T, usize>) -> f64 {
    if map_a.is_empty() || map_b.is_empty() {
        return 0.0;
    }

    let mut dot_product = 0.0f64;
    let mut magnitude_a = 0.0f64;
    let mut magnitude_b = 0.0f64;

    for (key, &count_a) in map_a {
        let count_a = count_a as f64;
        magnitude_a += count_a * count_a;

        if let Some(&count_b) = map_b.get(key) {
            dot_product += count_a * count_b as f64;
        }
    }

    for &count_b in map_b.values() {
        let count_b = count_b as f64;
        magnitude_b += count_b * count_b;
    }

    // Non-empty maps hold counts of at least 1, so the norms are nonzero.
    dot_product / (magnitude_a * magnitude_b).sqrt()
}

// ============================================================================
// Tokenizers
// ============================================================================

/// Splits text into the tokens the frequency vector counts.
pub trait Tokenizer: Send + Sync {
    type Token: Eq + Hash;

    fn tokenize(&self, text: &str) -> Vec<Self::Token>;
}

impl<F, T> Tokenizer for F
where
    F: Fn(&str) -> Vec<T> + Send + Sync,
    T: Eq + Hash,
{
    type Token = T;

    fn tokenize(&self, text: &str) -> Vec<T> {
        self(text)
    }
}

fn tokenize_chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

// Tokens keep their case; fold beforehand if case-insensitive matching is
// wanted.
fn tokenize_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

// ============================================================================
// Calculators
// ============================================================================

/// Cosine similarity calculator over a tokenizer
///
/// Construct with [`CosineSimilarity::chars`], [`CosineSimilarity::words`]
/// or [`CosineSimilarity::with_tokenizer`].
#[derive(Clone)]
pub struct CosineSimilarity<C> {
    tokenizer: C,
}

impl CosineSimilarity<fn(&str) -> Vec<char>> {
    /// Character-level vectors.
    #[must_use]
    pub fn chars() -> Self {
        Self {
            tokenizer: tokenize_chars,
        }
    }
}

impl CosineSimilarity<fn(&str) -> Vec<String>> {
    /// Whitespace-separated word vectors.
    #[must_use]
    pub fn words() -> Self {
        Self {
            tokenizer: tokenize_words,
        }
    }
}

impl<C> CosineSimilarity<C> {
    /// Vectors over a caller-supplied tokenizer.
    #[must_use]
    pub fn with_tokenizer(tokenizer: C) -> Self {
        Self { tokenizer }
    }
}

impl<C> fmt::Debug for CosineSimilarity<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosineSimilarity").finish_non_exhaustive()
    }
}

impl<C: Tokenizer> SimilarityScore<str> for CosineSimilarity<C> {
    type Output = f64;

    fn apply(&self, left: &str, right: &str) -> f64 {
        let map_a = term_frequencies(self.tokenizer.tokenize(left));
        let map_b = term_frequencies(self.tokenizer.tokenize(right));
        cosine_of_maps(&map_a, &map_b)
    }
}

/// Cosine distance calculator, the complement of [`CosineSimilarity`]
#[derive(Clone)]
pub struct CosineDistance<C> {
    similarity: CosineSimilarity<C>,
}

impl CosineDistance<fn(&str) -> Vec<char>> {
    /// Character-level vectors.
    #[must_use]
    pub fn chars() -> Self {
        Self {
            similarity: CosineSimilarity::chars(),
        }
    }
}

impl CosineDistance<fn(&str) -> Vec<String>> {
    /// Whitespace-separated word vectors.
    #[must_use]
    pub fn words() -> Self {
        Self {
            similarity: CosineSimilarity::words(),
        }
    }
}

impl<C> CosineDistance<C> {
    /// Vectors over a caller-supplied tokenizer.
    #[must_use]
    pub fn with_tokenizer(tokenizer: C) -> Self {
        Self {
            similarity: CosineSimilarity::with_tokenizer(tokenizer),
        }
    }
}

impl<C> fmt::Debug for CosineDistance<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosineDistance").finish_non_exhaustive()
    }
}

impl<C: Tokenizer> SimilarityScore<str> for CosineDistance<C> {
    type Output = f64;

    fn apply(&self, left: &str, right: &str) -> f64 {
        1.0 - self.similarity.apply(left, right)
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Character-level cosine similarity.
#[must_use]
pub fn cosine_similarity_chars(a: &str, b: &str) -> f64 {
    CosineSimilarity::chars().apply(a, b)
}

/// Word-level cosine similarity.
#[must_use]
pub fn cosine_similarity_words(a: &str, b: &str) -> f64 {
    CosineSimilarity::words().apply(a, b)
}

/// Character-level cosine distance (1.0 - similarity).
#[must_use]
pub fn cosine_distance_chars(a: &str, b: &str) -> f64 {
    1.0 - cosine_similarity_chars(a, b)
}

/// Word-level cosine distance (1.0 - similarity).
#[must_use]
pub fn cosine_distance_words(a: &str, b: &str) -> f64 {
    1.0 - cosine_similarity_words(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_cosine_chars() {
        assert!(approx_eq(cosine_similarity_chars("abc", "abc"), 1.0));
        assert!(approx_eq(cosine_similarity_chars("abc", "def"), 0.0));
        // Empty operands have zero norm, on one side or both.
        assert!(approx_eq(cosine_similarity_chars("", ""), 0.0));
        assert!(approx_eq(cosine_similarity_chars("abc", ""), 0.0));
    }

    #[test]
    fn test_cosine_scaling_invariance() {
        // Parallel vectors score 1.0 regardless of magnitude.
        assert!(approx_eq(cosine_similarity_chars("aabb", "ab"), 1.0));
    }

    #[test]
    fn test_cosine_chars_exact_value() {
        // Vectors {a:1, b:1} and {a:2}: dot 2, norms sqrt(2) and 2.
        let expected = 2.0 / (2.0 * 2.0f64.sqrt());
        assert!(approx_eq(cosine_similarity_chars("ab", "aa"), expected));
    }

    #[test]
    fn test_cosine_words() {
        let a = "the quick brown fox";
        let b = "the quick brown dog";
        // Three shared words of four each: 3 / (2 * 2).
        assert!(approx_eq(cosine_similarity_words(a, b), 0.75));
    }

    #[test]
    fn test_words_are_case_sensitive() {
        let sim = cosine_similarity_words("The fox", "the fox");
        assert!(approx_eq(sim, 0.5));
    }

    #[test]
    fn test_cosine_symmetry() {
        let pairs = [("ab", "aa"), ("abc", "def"), ("hello", "world")];
        for (a, b) in pairs {
            assert!(
                approx_eq(
                    cosine_similarity_chars(a, b),
                    cosine_similarity_chars(b, a)
                ),
                "{a} / {b}"
            );
        }
    }

    #[test]
    fn test_cosine_of_maps_direct() {
        let a = term_frequencies([1u32, 1, 2, 3]);
        let b = term_frequencies([1u32, 2, 2, 4]);
        // a = {1:2, 2:1, 3:1}, b = {1:1, 2:2, 4:1}: dot 4, norms sqrt(6) both.
        assert!(approx_eq(cosine_of_maps(&a, &b), 4.0 / 6.0));

        let empty: AHashMap<u32, usize> = AHashMap::new();
        assert!(approx_eq(cosine_of_maps(&empty, &empty), 0.0));
        assert!(approx_eq(cosine_of_maps(&a, &empty), 0.0));
    }

    #[test]
    fn test_term_frequencies() {
        let tf = term_frequencies("mississippi".chars());
        assert_eq!(tf[&'s'], 4);
        assert_eq!(tf[&'i'], 4);
        assert_eq!(tf[&'p'], 2);
        assert_eq!(tf[&'m'], 1);
        assert_eq!(tf.len(), 4);
    }

    #[test]
    fn test_distance_complement() {
        let pairs = [("ab", "aa"), ("same", "same"), ("abc", "def")];
        for (a, b) in pairs {
            assert!(
                approx_eq(
                    cosine_similarity_chars(a, b) + cosine_distance_chars(a, b),
                    1.0
                ),
                "{a} / {b}"
            );
        }
        assert!(approx_eq(
            CosineDistance::words().apply("the fox", "the fox"),
            0.0
        ));
    }

    #[test]
    fn test_custom_tokenizer() {
        // Character bigram vectors.
        let bigrams = |s: &str| -> Vec<String> {
            let chars: Vec<char> = s.chars().collect();
            chars.windows(2).map(|w| w.iter().collect()).collect()
        };
        let cos = CosineSimilarity::with_tokenizer(bigrams);
        assert!(approx_eq(cos.apply("night", "night"), 1.0));
        let sim = cos.apply("night", "nacht");
        assert!(sim > 0.0 && sim < 1.0);
    }
}
