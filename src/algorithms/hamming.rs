//! Hamming distance implementation
//!
//! Counts positions where elements differ. Defined only for operands of
//! equal length; comparing unequal lengths is a caller error reported as
//! [`SimilarityError::UnequalLengthInputs`], not a distance.
//!
//! # Complexity
//! - Time: O(n)
//! - Space: O(n) for the element buffers

use super::EditDistance;
use crate::errors::{Result, SimilarityError};
use crate::input::{collect_elements, SimilarityInput};
use smallvec::SmallVec;

fn hamming_core<T: PartialEq>(a: &[T], b: &[T]) -> Result<usize> {
    if a.len() != b.len() {
        return Err(SimilarityError::UnequalLengthInputs {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Hamming distance calculator
///
/// Stateless; all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming;

impl Hamming {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance<str> for Hamming {
    type Output = Result<usize>;

    fn apply(&self, left: &str, right: &str) -> Result<usize> {
        hamming_distance(left, right)
    }
}

impl<I> EditDistance<I> for Hamming
where
    I: SimilarityInput + ?Sized,
    I::Elem: PartialEq,
{
    type Output = Result<usize>;

    fn apply(&self, left: &I, right: &I) -> Result<usize> {
        let a = collect_elements(left);
        let b = collect_elements(right);
        hamming_core(&a, &b)
    }
}

/// Calculate Hamming distance between two strings.
///
/// Lengths are measured in characters, not bytes.
///
/// # Errors
/// Returns [`SimilarityError::UnequalLengthInputs`] when the operands have
/// different lengths.
///
/// # Example
/// ```
/// use seqsim::algorithms::hamming::hamming_distance;
///
/// assert_eq!(hamming_distance("karolin", "kathrin"), Ok(3));
/// assert!(hamming_distance("abc", "ab").is_err());
/// ```
pub fn hamming_distance(a: &str, b: &str) -> Result<usize> {
    let a_chars: SmallVec<[char; 64]> = a.chars().collect();
    let b_chars: SmallVec<[char; 64]> = b.chars().collect();
    hamming_core(&a_chars, &b_chars)
}

/// Normalized Hamming similarity (0.0 to 1.0).
///
/// Two empty strings score 1.0.
///
/// # Errors
/// Returns [`SimilarityError::UnequalLengthInputs`] when the operands have
/// different lengths.
pub fn hamming_similarity(a: &str, b: &str) -> Result<f64> {
    let dist = hamming_distance(a, b)?;
    let len = a.chars().count();

    if len == 0 {
        Ok(1.0)
    } else {
        Ok(1.0 - (dist as f64 / len as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hamming_basic() {
        assert_eq!(hamming_distance("", ""), Ok(0));
        assert_eq!(hamming_distance("abc", "abc"), Ok(0));
        assert_eq!(hamming_distance("abc", "axc"), Ok(1));
        assert_eq!(hamming_distance("karolin", "kathrin"), Ok(3));
        assert_eq!(hamming_distance("1011101", "1001001"), Ok(2));
    }

    #[test]
    fn test_hamming_unequal_lengths() {
        let err = hamming_distance("abc", "ab").unwrap_err();
        assert_eq!(err, SimilarityError::UnequalLengthInputs { left: 3, right: 2 });
    }

    #[test]
    fn test_hamming_char_counts_not_bytes() {
        // Equal character counts despite different byte lengths.
        assert_eq!(hamming_distance("café", "cafe"), Ok(1));
        assert_eq!(hamming_distance("日本", "日中"), Ok(1));
    }

    #[test]
    fn test_hamming_symmetry() {
        assert_eq!(
            hamming_distance("karolin", "kathrin"),
            hamming_distance("kathrin", "karolin")
        );
    }

    #[test]
    fn test_hamming_similarity() {
        assert_eq!(hamming_similarity("", ""), Ok(1.0));
        assert_eq!(hamming_similarity("abc", "abc"), Ok(1.0));
        let sim = hamming_similarity("karolin", "kathrin").unwrap();
        assert!((sim - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
        assert!(hamming_similarity("abc", "ab").is_err());
    }

    #[test]
    fn test_calculator() {
        let h = Hamming::new();
        assert_eq!(h.apply("abc", "axc"), Ok(1));
        assert!(h.apply("abc", "ab").is_err());

        let a = [1u8, 0, 1];
        let b = [1u8, 1, 1];
        assert_eq!(h.apply(&a[..], &b[..]), Ok(1));
    }
}
