//! Fuzzy matching score implementation
//!
//! One-sided matching score in the style of editor autocompletion: each
//! query character found in the term scores one point, and matching the
//! character immediately after the previous match adds a bonus of two.
//! The scan is case-insensitive, left to right, and consumes the term one
//! way, so the score is asymmetric and unbounded rather than normalized.
//!
//! # Complexity
//! - Time: O(m+n)
//! - Space: O(m+n) for the lowercased buffers

use super::SimilarityScore;
use smallvec::SmallVec;

/// Fuzzy matching score calculator
///
/// `apply(term, query)` scores how well `query` matches into `term`; the
/// arguments are not interchangeable. Stateless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuzzyScore;

impl FuzzyScore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityScore<str> for FuzzyScore {
    type Output = usize;

    fn apply(&self, left: &str, right: &str) -> usize {
        fuzzy_score(left, right)
    }
}

/// Score how well `query` matches into `term`.
///
/// # Example
/// ```
/// use seqsim::algorithms::fuzzy::fuzzy_score;
///
/// // 'p' and 'a' both match, adjacently: 1 + 1 + 2.
/// assert_eq!(fuzzy_score("Apache", "pa"), 4);
/// ```
#[must_use]
pub fn fuzzy_score(term: &str, query: &str) -> usize {
    let term_chars: SmallVec<[char; 64]> = term.to_lowercase().chars().collect();
    let query_chars: SmallVec<[char; 64]> = query.to_lowercase().chars().collect();

    let mut score = 0usize;
    let mut term_index = 0usize;
    let mut previous_match: Option<usize> = None;

    for &query_char in &query_chars {
        while term_index < term_chars.len() {
            let index = term_index;
            term_index += 1;

            if term_chars[index] == query_char {
                score += 1;
                if let Some(prev) = previous_match {
                    if prev + 1 == index {
                        score += 2;
                    }
                }
                previous_match = Some(index);
                break;
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_score_basic() {
        assert_eq!(fuzzy_score("", ""), 0);
        assert_eq!(fuzzy_score("Workshop", "b"), 0);
        assert_eq!(fuzzy_score("Room", "o"), 1);
        assert_eq!(fuzzy_score("Workshop", "w"), 1);
        assert_eq!(fuzzy_score("Apache", "ap"), 4);
        assert_eq!(fuzzy_score("Apache", "pa"), 4);
    }

    #[test]
    fn test_consecutive_bonus() {
        // Four matches, three of them consecutive.
        assert_eq!(fuzzy_score("Apache Software", "pach"), 10);
        // Same matches spread out earn no bonus.
        assert_eq!(fuzzy_score("plain catch", "pach"), 4);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(fuzzy_score("APACHE", "pa"), 4);
        assert_eq!(fuzzy_score("apache", "PA"), 4);
    }

    #[test]
    fn test_asymmetric() {
        assert_eq!(fuzzy_score("Apache", "pa"), 4);
        assert_eq!(fuzzy_score("pa", "Apache"), 1);
    }

    #[test]
    fn test_query_longer_than_term() {
        assert_eq!(fuzzy_score("ab", "abc"), 4);
    }

    #[test]
    fn test_term_consumed_one_way() {
        // The second 'a' of the query cannot reuse the matched prefix.
        assert_eq!(fuzzy_score("ab", "aa"), 1);
    }

    #[test]
    fn test_calculator() {
        let fs = FuzzyScore::new();
        assert_eq!(fs.apply("Apache", "pa"), 4);
    }
}
