//! seqsim - Sequence similarity and edit distance metrics
//!
//! Exact similarity scores and edit distances over strings and generic
//! element sequences.
//!
//! # Features
//! - Edit distances: Levenshtein (plain, bounded, detailed), true
//!   Damerau-Levenshtein, Hamming, LCS distance
//! - Similarity scores: Jaro-Winkler, cosine, Jaccard, Sorensen-Dice,
//!   overlap coefficient, fuzzy matching
//! - One metric API over `str` and arbitrary element slices
//! - Parallel batch ranking over candidate lists
//! - Unicode-aware: strings compare by char, not by byte
//!
//! # Quick start
//!
//! Every metric is a calculator value: configuration is fixed at
//! construction and `apply` compares two inputs.
//!
//! ```
//! use seqsim::{EditDistance, JaroWinkler, Levenshtein, SimilarityScore};
//!
//! let lev = Levenshtein::new();
//! assert_eq!(lev.apply("kitten", "sitting"), Some(3));
//!
//! let bounded = Levenshtein::with_threshold(2);
//! assert_eq!(bounded.apply("kitten", "sitting"), None);
//!
//! let jw = JaroWinkler::new();
//! assert!((jw.apply("frog", "fog") - 0.925).abs() < 1e-3);
//! ```
//!
//! Free functions cover the common string cases without constructing a
//! calculator:
//!
//! ```
//! use seqsim::algorithms::{jaccard_similarity, levenshtein};
//!
//! assert_eq!(levenshtein("flaw", "lawn"), 2);
//! assert!((jaccard_similarity("night", "nacht") - 3.0 / 7.0).abs() < 1e-9);
//! ```
//!
//! The same calculators run over non-string sequences through
//! [`SimilarityInput`]:
//!
//! ```
//! use seqsim::{EditDistance, Levenshtein};
//!
//! let lev = Levenshtein::new();
//! let before = [10u32, 20, 30];
//! let after = [10u32, 30];
//! assert_eq!(lev.apply(&before[..], &after[..]), Some(1));
//! ```

pub mod algorithms;
pub mod errors;
pub mod input;
pub mod search;

pub use algorithms::cosine::Tokenizer;
pub use algorithms::{
    CosineDistance, CosineSimilarity, DamerauLevenshtein, EditDistance, FuzzyScore, Hamming,
    IntersectionResult, IntersectionSimilarity, JaroWinkler, JaroWinklerConfig,
    JaroWinklerDistance, Lcs, LcsDistance, Levenshtein, LevenshteinDetailed, LevenshteinResults,
    OverlapResult, OverlapSimilarity, SimilarityScore,
};
pub use errors::{Result, SimilarityError};
pub use input::{CharInput, SimilarityInput};
pub use search::{
    best_candidate, nearest_candidate, rank_candidates, EditDistanceFrom, Match,
    SimilarityScoreFrom, PARALLEL_THRESHOLD,
};
