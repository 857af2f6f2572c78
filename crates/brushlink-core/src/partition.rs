//! Chunk layout and the initial partition of a dataset into buckets.
//!
//! A dataset of `L` rows is split into `ceil(L / C)` chunks of at most `C`
//! rows. Global row position = `chunk × C + local`.

use std::sync::Arc;

use serde::Serialize;

use crate::bucket::{MAX_BUCKET_COUNT, MIN_BUCKET_COUNT};
use crate::error::ConfigError;
use crate::index_set::{CompactIndexSet, MAX_CHUNK_CAPACITY};
use crate::snapshot::SelectionSnapshot;

/// How a dataset's rows map onto fixed-capacity chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkLayout {
    row_count: usize,
    capacity: usize,
}

impl ChunkLayout {
    /// Create a layout for `row_count` rows with `capacity` rows per chunk.
    pub fn new(row_count: usize, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 || capacity > MAX_CHUNK_CAPACITY {
            return Err(ConfigError::InvalidCapacity(capacity));
        }
        Ok(Self {
            row_count,
            capacity,
        })
    }

    /// Layout for a capacity already checked by config validation.
    pub(crate) fn from_validated(row_count: usize, capacity: usize) -> Self {
        debug_assert!(capacity > 0 && capacity <= MAX_CHUNK_CAPACITY);
        Self {
            row_count,
            capacity,
        }
    }

    /// Total rows covered by this layout.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Maximum rows per chunk.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of chunks, `ceil(row_count / capacity)`.
    pub fn chunk_count(&self) -> usize {
        self.row_count.div_ceil(self.capacity)
    }

    /// Rows in `chunk`. Zero for chunks past the end.
    pub fn chunk_len(&self, chunk: usize) -> usize {
        let start = chunk.saturating_mul(self.capacity);
        self.row_count.saturating_sub(start).min(self.capacity)
    }

    /// Lengths of every chunk in order.
    pub fn chunk_lens(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.chunk_count()).map(|c| self.chunk_len(c))
    }

    /// Global row position of a chunk-local index.
    pub fn global_row(&self, chunk: usize, local: u16) -> usize {
        chunk * self.capacity + local as usize
    }

    /// Chunk and local index of a global row, or `None` past the end.
    pub fn locate(&self, row: usize) -> Option<(usize, u16)> {
        if row >= self.row_count {
            return None;
        }
        Some((row / self.capacity, (row % self.capacity) as u16))
    }
}

/// Build the initial snapshot for a dataset.
///
/// Bucket 0 receives the dense run `[0, chunk_len)` for every chunk; every
/// other bucket starts with one empty set per chunk. Zero rows yield zero
/// chunks. `bucket_count` is clamped to `2..=256`, the range a `u8` bucket id
/// with at least one highlight can address.
pub fn partition(layout: ChunkLayout, bucket_count: usize) -> SelectionSnapshot {
    let clamped = bucket_count.clamp(MIN_BUCKET_COUNT, MAX_BUCKET_COUNT);
    if clamped != bucket_count {
        tracing::warn!("bucket count {bucket_count} is outside 2..=256, using {clamped}");
    }

    let normal: Arc<[CompactIndexSet]> = layout.chunk_lens().map(CompactIndexSet::dense).collect();
    let empty: Arc<[CompactIndexSet]> = (0..layout.chunk_count())
        .map(|_| CompactIndexSet::new())
        .collect();

    let mut buckets = Vec::with_capacity(clamped);
    buckets.push(normal);
    buckets.extend((1..clamped).map(|_| Arc::clone(&empty)));

    tracing::debug!(
        "partitioned {} rows into {} chunks across {} buckets",
        layout.row_count(),
        layout.chunk_count(),
        buckets.len()
    );

    SelectionSnapshot::new(layout, buckets)
}
