//! Bucket identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest buckets a snapshot can hold: the normal bucket plus one highlight.
pub const MIN_BUCKET_COUNT: usize = 2;
/// Most buckets a `u8` bucket id can address.
pub const MAX_BUCKET_COUNT: usize = u8::MAX as usize + 1;

/// Identifies one selection category in a snapshot.
///
/// Bucket 0 is the "normal" (unselected) baseline. Every other id is a
/// highlight bucket drawn in its own color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BucketId(pub u8);

impl BucketId {
    /// The unselected baseline bucket.
    pub const NORMAL: Self = Self(0);

    /// Whether this is the unselected baseline bucket.
    pub const fn is_normal(self) -> bool {
        self.0 == 0
    }

    /// Position of this bucket in a snapshot's bucket list.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for BucketId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_normal() {
            write!(f, "normal")
        } else {
            write!(f, "highlight {}", self.0)
        }
    }
}
