//! Compact chunk-local index sets.
//!
//! Every index array the core exposes is chunk-relative and stored as packed
//! `u16`. A chunk therefore never holds more than [`MAX_CHUNK_CAPACITY`] rows,
//! which keeps every local index representable without overflow.
//!
//! # Invariant
//! Indices are strictly ascending (sorted, no duplicates). All set operations
//! are linear merges that preserve the invariant.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Largest chunk length whose local indices all fit in a `u16`.
pub const MAX_CHUNK_CAPACITY: usize = u16::MAX as usize;

/// Default rows per chunk. Stays a few values below [`MAX_CHUNK_CAPACITY`].
pub const DEFAULT_CHUNK_CAPACITY: usize = 65_530;

/// A sorted, duplicate-free set of chunk-local row indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<u16>", into = "Vec<u16>")]
pub struct CompactIndexSet {
    indices: Vec<u16>,
}

impl CompactIndexSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// The dense run `[0, len)`.
    pub fn dense(len: usize) -> Self {
        debug_assert!(
            len <= MAX_CHUNK_CAPACITY,
            "chunk length {len} exceeds u16 index capacity"
        );
        Self {
            indices: (0..len).map(|i| i as u16).collect(),
        }
    }

    /// Wrap indices that are already strictly ascending.
    pub(crate) fn from_ascending(indices: Vec<u16>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        Self { indices }
    }

    /// Number of indices in the set.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the set holds no indices.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether `index` is in the set. O(log n).
    pub fn contains(&self, index: u16) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Iterate indices in ascending order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, u16>> {
        self.indices.iter().copied()
    }

    /// The packed indices.
    pub fn as_slice(&self) -> &[u16] {
        &self.indices
    }

    /// Zero-copy byte view of the packed indices (native endian), for
    /// uploading to a renderer's index buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Indices present in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let (a, b) = (&self.indices, &other.indices);
        let mut out = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Self::from_ascending(out)
    }

    /// Indices in `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let (a, b) = (&self.indices, &other.indices);
        let mut out = Vec::with_capacity(a.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() {
            if j == b.len() {
                out.extend_from_slice(&a[i..]);
                break;
            }
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        Self::from_ascending(out)
    }

    /// Indices present in either set.
    pub fn union(&self, other: &Self) -> Self {
        let (a, b) = (&self.indices, &other.indices);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Self::from_ascending(out)
    }
}

impl From<Vec<u16>> for CompactIndexSet {
    fn from(mut indices: Vec<u16>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }
}

impl From<CompactIndexSet> for Vec<u16> {
    fn from(set: CompactIndexSet) -> Self {
        set.indices
    }
}

impl FromIterator<u16> for CompactIndexSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a CompactIndexSet {
    type Item = u16;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u16>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
