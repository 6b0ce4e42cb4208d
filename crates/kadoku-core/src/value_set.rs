//! A set of candidate values for a single cell.
//!
//! This module provides [`ValueSet`], a bitset over the values `1..=N` where
//! `N` is the side length of the grid (`block_len²`). A single `u128` backs
//! the set, which caps the supported side length at
//! [`ValueSet::MAX_VALUE`] = 121 (block length 11).
//!
//! # Examples
//!
//! ```
//! use kadoku_core::ValueSet;
//!
//! let mut set = ValueSet::new();
//! set.insert(1);
//! set.insert(5);
//! set.insert(9);
//!
//! assert_eq!(set.len(), 3);
//! assert!(set.contains(5));
//! ```

use std::fmt;

/// A set of candidate values in the range `1..=121`, represented as a bitset.
///
/// Bit `i` of the backing `u128` represents the value `i + 1`, providing
/// constant-time membership tests and fast set operations regardless of the
/// grid's block length.
///
/// # Examples
///
/// ```
/// use kadoku_core::ValueSet;
///
/// // All candidates for a 9×9 grid (block length 3)
/// let mut candidates = ValueSet::full(9);
///
/// candidates.remove(5);
/// candidates.remove(7);
///
/// assert_eq!(candidates.len(), 7);
/// assert!(!candidates.contains(5));
/// assert!(candidates.contains(1));
/// ```
///
/// # Set Operations
///
/// ```
/// use kadoku_core::ValueSet;
///
/// let a = ValueSet::from_iter([1, 2, 3]);
/// let b = ValueSet::from_iter([2, 3, 4]);
///
/// assert_eq!(a | b, ValueSet::from_iter([1, 2, 3, 4]));
/// assert_eq!(a & b, ValueSet::from_iter([2, 3]));
/// assert_eq!(a.difference(b), ValueSet::from_iter([1]));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValueSet {
    bits: u128,
}

impl ValueSet {
    /// The largest value a `ValueSet` can hold (side length of a grid with
    /// block length 11).
    pub const MAX_VALUE: u8 = 121;

    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates the set containing every value in `1..=n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`Self::MAX_VALUE`].
    #[must_use]
    pub const fn full(n: u8) -> Self {
        assert!(n <= Self::MAX_VALUE);
        Self {
            bits: (1u128 << n) - 1,
        }
    }

    const fn bit(value: u8) -> u128 {
        assert!(
            1 <= value && value <= Self::MAX_VALUE,
            "value out of range 1..=121"
        );
        1 << (value - 1)
    }

    /// Inserts a value into the set.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range `1..=121`.
    pub const fn insert(&mut self, value: u8) {
        self.bits |= Self::bit(value);
    }

    /// Removes a value from the set.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range `1..=121`.
    pub const fn remove(&mut self, value: u8) {
        self.bits &= !Self::bit(value);
    }

    /// Returns `true` if the set contains `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range `1..=121`.
    #[must_use]
    pub const fn contains(self, value: u8) -> bool {
        self.bits & Self::bit(value) != 0
    }

    /// Returns the number of values in the set.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn len(self) -> u8 {
        self.bits.count_ones() as u8
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the single value of the set, or `None` if the set does not
    /// contain exactly one value.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn as_single(self) -> Option<u8> {
        if self.bits != 0 && self.bits.is_power_of_two() {
            Some(self.bits.trailing_zeros() as u8 + 1)
        } else {
            None
        }
    }

    /// Returns the union of `self` and `other`.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the intersection of `self` and `other`.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns the values of `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Returns an iterator over the values of the set in ascending order.
    #[must_use]
    pub const fn iter(self) -> Iter {
        Iter { bits: self.bits }
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<u8> for ValueSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = u8>,
    {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl IntoIterator for ValueSet {
    type Item = u8;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::ops::BitOr for ValueSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitAnd for ValueSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

/// Iterator over the values of a [`ValueSet`] in ascending order.
#[derive(Debug, Clone)]
pub struct Iter {
    bits: u128,
}

impl Iterator for Iter {
    type Item = u8;

    #[expect(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let value = self.bits.trailing_zeros() as u8 + 1;
        self.bits &= self.bits - 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::from(ValueSet { bits: self.bits }.len());
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}
impl std::iter::FusedIterator for Iter {}
