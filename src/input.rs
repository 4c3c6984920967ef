//! Input abstraction shared by every metric
//!
//! [`SimilarityInput`] is a length + random-access view over a sequence of
//! comparable elements. All algorithms are written once against this trait
//! (or against plain slices internally) instead of once per sequence
//! representation. Implementations exist for element slices, vectors, and
//! for `&str` through the owned [`CharInput`] adapter, which collects the
//! string's chars exactly once for the duration of a comparison call.
//!
//! Types without an implementation simply do not satisfy the metric trait
//! bounds, so an incompatible operand is a compile error rather than a
//! runtime one.

use smallvec::SmallVec;

/// A length + random-access view over a sequence of elements.
///
/// Elements are returned by value; implementations for borrowed storage
/// clone on access, which is free for the `char`/integer element types the
/// metrics are typically used with.
pub trait SimilarityInput {
    /// Element type produced by [`at`](Self::at).
    type Elem;

    /// Number of elements in the sequence.
    fn len(&self) -> usize;

    /// Element at `index`. Panics if `index >= len()`.
    fn at(&self, index: usize) -> Self::Elem;

    /// Whether the sequence has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> SimilarityInput for [T] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        self[index].clone()
    }
}

impl<T: Clone> SimilarityInput for Vec<T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn at(&self, index: usize) -> T {
        self[index].clone()
    }
}

/// Owned character-sequence adapter for `&str` operands.
///
/// `&str` offers no O(1) char indexing, so the chars are collected once at
/// construction (inline storage for typical short strings) and the metrics
/// index into that buffer. Equality and hashing are order-sensitive over the
/// element sequence.
///
/// # Example
///
/// ```rust
/// use seqsim::input::{CharInput, SimilarityInput};
///
/// let input = CharInput::new("kitten");
/// assert_eq!(input.len(), 6);
/// assert_eq!(input.at(0), 'k');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CharInput {
    chars: SmallVec<[char; 64]>,
}

impl CharInput {
    /// Collects the chars of `s` into an indexable buffer.
    #[must_use]
    pub fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }

    /// The collected chars as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl From<&str> for CharInput {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl SimilarityInput for CharInput {
    type Elem = char;

    #[inline]
    fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    fn at(&self, index: usize) -> char {
        self.chars[index]
    }
}

/// Materializes an input's elements for the slice-based algorithm cores.
pub(crate) fn collect_elements<I>(input: &I) -> SmallVec<[I::Elem; 64]>
where
    I: SimilarityInput + ?Sized,
{
    (0..input.len()).map(|i| input.at(i)).collect()
}
