//! Error types for metric configuration and input validation
//!
//! Exceeding a distance threshold is not an error: bounded metrics return
//! `Option<usize>` and report it as `None`. The variants here cover the two
//! conditions that are genuine misuse: rejected configuration and operands a
//! metric cannot compare at all.

use thiserror::Error;

/// A specialized `Result` type for this library.
pub type Result<T, E = SimilarityError> = std::result::Result<T, E>;

/// Errors that can occur when configuring or applying a metric
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Configuration value rejected by a validating constructor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operands must have identical length (Hamming)
    #[error("Inputs must have equal length: left has {left}, right has {right}")]
    UnequalLengthInputs {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimilarityError::UnequalLengthInputs { left: 7, right: 4 };
        assert_eq!(
            err.to_string(),
            "Inputs must have equal length: left has 7, right has 4"
        );

        let err = SimilarityError::InvalidArgument("prefix weight must be finite".to_string());
        assert!(err.to_string().contains("prefix weight"));
    }

    #[test]
    fn test_errors_are_comparable() {
        let a = SimilarityError::UnequalLengthInputs { left: 1, right: 2 };
        let b = SimilarityError::UnequalLengthInputs { left: 1, right: 2 };
        assert_eq!(a, b);
        assert_ne!(a, SimilarityError::InvalidArgument("x".to_string()));
    }
}
