use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use crate::bitset::bitset_traits;

/// A compact set of piece ids, e.g. the pieces a player has not used yet.
///
/// Subtracting one set from another gives the difference, and iteration
/// yields the ids in ascending order.
///
/// ```
/// use blokus::PieceSet;
/// let mut set = PieceSet::full(3);
/// // This is an immutable data type, so functions like `remove` return a new `PieceSet`.
/// set = set.remove(1);
/// assert_eq!(Vec::from_iter(set), vec![0, 2]);
/// ```
///
/// Serialized as a list of ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<usize>", try_from = "Vec<usize>")]
pub struct PieceSet {
    bits: u64,
}

bitset_traits!(PieceSet);

impl PieceSet {
    /// Piece ids must be smaller than this.
    pub const CAPACITY: usize = 64;

    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// The set `{0, 1, ..., count - 1}`.
    ///
    /// Panics if `count` is larger than [`Self::CAPACITY`].
    pub fn full(count: usize) -> Self {
        assert!(count <= Self::CAPACITY);
        let bits = if count == Self::CAPACITY {
            u64::MAX
        } else {
            (1u64 << count) - 1
        };
        Self { bits }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, id: usize) -> bool {
        id < Self::CAPACITY && (self.bits & (1u64 << id)) != 0
    }

    /// Panics if `id` is not smaller than [`Self::CAPACITY`].
    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, id: usize) -> Self {
        assert!(id < Self::CAPACITY);
        Self {
            bits: self.bits | (1u64 << id),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, id: usize) -> Self {
        if id >= Self::CAPACITY {
            return self;
        }
        Self {
            bits: self.bits & !(1u64 << id),
        }
    }
}

/// Error for deserializing a [`PieceSet`] with an id that's too large.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceIdTooLarge(pub usize);

impl std::error::Error for PieceIdTooLarge {}

impl std::fmt::Display for PieceIdTooLarge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Piece id {} does not fit into a set of {} pieces",
            self.0,
            PieceSet::CAPACITY
        )
    }
}

impl TryFrom<Vec<usize>> for PieceSet {
    type Error = PieceIdTooLarge;

    fn try_from(ids: Vec<usize>) -> Result<Self, Self::Error> {
        let mut set = PieceSet::new();
        for id in ids {
            if id >= Self::CAPACITY {
                return Err(PieceIdTooLarge(id));
            }
            set = set.insert(id);
        }
        Ok(set)
    }
}

impl From<PieceSet> for Vec<usize> {
    fn from(set: PieceSet) -> Self {
        set.into_iter().collect()
    }
}

impl FromIterator<usize> for PieceSet {
    /// Panics on ids that are not smaller than [`PieceSet::CAPACITY`].
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        iter.into_iter().fold(PieceSet::new(), PieceSet::insert)
    }
}

impl IntoIterator for PieceSet {
    type Item = usize;

    type IntoIter = PieceSetIter;

    fn into_iter(self) -> Self::IntoIter {
        PieceSetIter { bits: self.bits }
    }
}

/// Iterator for a [`PieceSet`] that returns ids in ascending order.
#[derive(Clone, Copy, Debug)]
pub struct PieceSetIter {
    bits: u64,
}

impl Iterator for PieceSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing zeros is the piece id
            let id = self.bits.trailing_zeros() as usize;
            self.bits ^= 1u64 << id;
            Some(id)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for PieceSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for PieceSetIter {}
