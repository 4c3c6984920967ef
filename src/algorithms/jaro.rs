//! Jaro and Jaro-Winkler similarity implementations
//!
//! Jaro scores agreement between short sequences from matching elements
//! inside a sliding window plus a transposition penalty. Jaro-Winkler adds a
//! boost proportional to the length of the common prefix, which suits names
//! and short identifiers. The prefix boost applies at every score level, not
//! only above a quality cutoff.
//!
//! # Complexity
//! - Time: O(m*n) in the window scan
//! - Space: O(m+n) for the match flags

use super::SimilarityScore;
use crate::errors::{Result, SimilarityError};
use crate::input::{collect_elements, SimilarityInput};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// Cores
// ============================================================================

/// Jaro similarity over comparable slices.
fn jaro_core<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    // The shorter sequence drives the scan; the score is symmetric.
    let (a, b) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 && b_len == 0 {
        return 1.0;
    }
    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    // Match window
    let match_distance = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut a_matches: SmallVec<[bool; 64]> = SmallVec::from_elem(false, a_len);
    let mut b_matches: SmallVec<[bool; 64]> = SmallVec::from_elem(false, b_len);

    let mut matches = 0usize;
    let mut transpositions = 0usize;

    // Find matches
    for i in 0..a_len {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b_len);

        for j in start..end {
            if b_matches[j] || a[i] != b[j] {
                continue;
            }
            a_matches[i] = true;
            b_matches[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Count transpositions between the two matched subsequences
    let mut k = 0usize;
    for i in 0..a_len {
        if !a_matches[i] {
            continue;
        }
        while k < b_len && !b_matches[k] {
            k += 1;
        }
        if k >= b_len {
            break;
        }
        if a[i] != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let matches = matches as f64;
    let transpositions = (transpositions / 2) as f64;

    (matches / a_len as f64 + matches / b_len as f64 + (matches - transpositions) / matches) / 3.0
}

/// Jaro-Winkler over comparable slices.
///
/// The caller guarantees `prefix_weight` is already clamped to [0.0, 0.25],
/// which keeps the boosted score inside [0.0, 1.0].
fn winkler_core<T: PartialEq>(
    a: &[T],
    b: &[T],
    prefix_weight: f64,
    max_prefix_length: usize,
) -> f64 {
    let jaro = jaro_core(a, b);
    if jaro == 0.0 {
        return 0.0;
    }

    let prefix_len = a
        .iter()
        .zip(b.iter())
        .take(max_prefix_length)
        .take_while(|(x, y)| x == y)
        .count();

    jaro + prefix_len as f64 * prefix_weight * (1.0 - jaro)
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for Jaro-Winkler similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JaroWinklerConfig {
    /// Prefix weight (typically 0.1, max 0.25)
    pub prefix_weight: f64,
    /// Maximum prefix length to consider (typically 4)
    pub max_prefix_length: usize,
}

impl Default for JaroWinklerConfig {
    fn default() -> Self {
        Self {
            prefix_weight: 0.1,
            max_prefix_length: 4,
        }
    }
}

// ============================================================================
// Calculators
// ============================================================================

/// Jaro-Winkler similarity calculator
///
/// Configuration is fixed at construction. Out-of-range prefix weights are
/// clamped by the builders; use [`JaroWinkler::try_new`] to reject them
/// instead.
#[derive(Debug, Clone, PartialEq)]
pub struct JaroWinkler {
    prefix_weight: f64,
    max_prefix_length: usize,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self::from_config(JaroWinklerConfig::default())
    }
}

impl JaroWinkler {
    /// Calculator with the standard 0.1 prefix weight and prefix cap of 4.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration, clamping the prefix weight into range.
    #[must_use]
    pub fn from_config(config: JaroWinklerConfig) -> Self {
        Self {
            prefix_weight: config.prefix_weight.clamp(0.0, 0.25),
            max_prefix_length: config.max_prefix_length,
        }
    }

    /// Create from configuration, rejecting out-of-range prefix weights.
    ///
    /// # Errors
    /// Returns [`SimilarityError::InvalidArgument`] when `prefix_weight` is
    /// not a finite value in [0.0, 0.25].
    pub fn try_new(config: JaroWinklerConfig) -> Result<Self> {
        if !config.prefix_weight.is_finite() || !(0.0..=0.25).contains(&config.prefix_weight) {
            return Err(SimilarityError::InvalidArgument(format!(
                "prefix_weight must be in [0.0, 0.25], got {}",
                config.prefix_weight
            )));
        }
        Ok(Self {
            prefix_weight: config.prefix_weight,
            max_prefix_length: config.max_prefix_length,
        })
    }

    /// Get current configuration
    #[must_use]
    pub fn config(&self) -> JaroWinklerConfig {
        JaroWinklerConfig {
            prefix_weight: self.prefix_weight,
            max_prefix_length: self.max_prefix_length,
        }
    }

    #[must_use]
    pub fn with_prefix_weight(mut self, weight: f64) -> Self {
        // Warn in debug mode if clamping is applied
        #[cfg(debug_assertions)]
        if !(0.0..=0.25).contains(&weight) {
            eprintln!(
                "[seqsim warning] prefix_weight {} clamped to [0.0, 0.25]",
                weight
            );
        }
        self.prefix_weight = weight.clamp(0.0, 0.25); // Max 0.25 to keep score <= 1.0
        self
    }

    #[must_use]
    pub fn with_max_prefix_length(mut self, length: usize) -> Self {
        self.max_prefix_length = length;
        self
    }

    /// The prefix weight in effect.
    #[must_use]
    pub fn prefix_weight(&self) -> f64 {
        self.prefix_weight
    }

    /// The prefix length cap in effect.
    #[must_use]
    pub fn max_prefix_length(&self) -> usize {
        self.max_prefix_length
    }
}

impl SimilarityScore<str> for JaroWinkler {
    type Output = f64;

    fn apply(&self, left: &str, right: &str) -> f64 {
        if left == right {
            return 1.0;
        }
        let a: SmallVec<[char; 64]> = left.chars().collect();
        let b: SmallVec<[char; 64]> = right.chars().collect();
        winkler_core(&a, &b, self.prefix_weight, self.max_prefix_length)
    }
}

impl<I> SimilarityScore<I> for JaroWinkler
where
    I: SimilarityInput + ?Sized,
    I::Elem: PartialEq,
{
    type Output = f64;

    fn apply(&self, left: &I, right: &I) -> f64 {
        let a = collect_elements(left);
        let b = collect_elements(right);
        winkler_core(&a, &b, self.prefix_weight, self.max_prefix_length)
    }
}

/// Jaro-Winkler distance calculator, the complement of [`JaroWinkler`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JaroWinklerDistance {
    similarity: JaroWinkler,
}

impl JaroWinklerDistance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration, clamping the prefix weight into range.
    #[must_use]
    pub fn from_config(config: JaroWinklerConfig) -> Self {
        Self {
            similarity: JaroWinkler::from_config(config),
        }
    }
}

impl SimilarityScore<str> for JaroWinklerDistance {
    type Output = f64;

    fn apply(&self, left: &str, right: &str) -> f64 {
        1.0 - self.similarity.apply(left, right)
    }
}

impl<I> SimilarityScore<I> for JaroWinklerDistance
where
    I: SimilarityInput + ?Sized,
    I::Elem: PartialEq,
{
    type Output = f64;

    fn apply(&self, left: &I, right: &I) -> f64 {
        1.0 - self.similarity.apply(left, right)
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Calculate Jaro similarity between two strings.
/// Returns a value between 0.0 and 1.0.
#[inline]
#[must_use]
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    jaro_core(&a_chars, &b_chars)
}

/// Calculate Jaro-Winkler similarity with default parameters.
///
/// # Example
/// ```
/// use seqsim::algorithms::jaro::jaro_winkler_similarity;
///
/// let score = jaro_winkler_similarity("frog", "fog");
/// assert!((score - 0.925).abs() < 1e-3);
/// ```
#[inline]
#[must_use]
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    JaroWinkler::new().apply(a, b)
}

/// Distance version (1.0 - similarity)
#[inline]
#[must_use]
pub fn jaro_winkler_distance(a: &str, b: &str) -> f64 {
    1.0 - jaro_winkler_similarity(a, b)
}
