//! Versioned selection snapshot shared between the core and the renderer.
//!
//! A snapshot holds one bucket per selection category, and each bucket holds
//! one [`CompactIndexSet`] per chunk. Buckets are reference-counted slices:
//! producing the next version swaps exactly one bucket and shares the rest,
//! so a reader holding an older snapshot never observes a partial update.

use std::sync::Arc;

use serde::Serialize;

use crate::bucket::BucketId;
use crate::error::SelectionError;
use crate::index_set::CompactIndexSet;
use crate::partition::ChunkLayout;

/// All buckets' per-chunk index sets at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSnapshot {
    version: u64,
    layout: ChunkLayout,
    buckets: Vec<Arc<[CompactIndexSet]>>,
}

impl SelectionSnapshot {
    pub(crate) fn new(layout: ChunkLayout, buckets: Vec<Arc<[CompactIndexSet]>>) -> Self {
        debug_assert!(buckets.iter().all(|b| b.len() == layout.chunk_count()));
        Self {
            version: 0,
            layout,
            buckets,
        }
    }

    /// Monotonic version number; bumped on every published change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Chunk layout this snapshot was partitioned with.
    pub fn layout(&self) -> &ChunkLayout {
        &self.layout
    }

    /// Number of buckets, including the normal bucket.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of chunks in every bucket.
    pub fn chunk_count(&self) -> usize {
        self.layout.chunk_count()
    }

    /// Per-chunk index sets of `bucket`.
    pub fn bucket(&self, bucket: BucketId) -> Option<&[CompactIndexSet]> {
        self.buckets.get(bucket.index()).map(|b| &b[..])
    }

    /// Index set of `bucket` for one chunk.
    pub fn chunk(&self, bucket: BucketId, chunk: usize) -> Option<&CompactIndexSet> {
        self.bucket(bucket).and_then(|b| b.get(chunk))
    }

    /// Iterate `(id, chunks)` for every bucket.
    pub fn buckets(&self) -> impl Iterator<Item = (BucketId, &[CompactIndexSet])> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (BucketId(i as u8), &b[..]))
    }

    /// Total indices held by `bucket` across all chunks.
    pub fn selected_count(&self, bucket: BucketId) -> usize {
        self.bucket(bucket)
            .map(|chunks| chunks.iter().map(CompactIndexSet::len).sum())
            .unwrap_or(0)
    }

    /// Global row positions held by `bucket`, ascending.
    pub fn selected_rows(&self, bucket: BucketId) -> impl Iterator<Item = usize> + '_ {
        let layout = self.layout;
        self.bucket(bucket).into_iter().flat_map(move |chunks| {
            chunks.iter().enumerate().flat_map(move |(c, set)| {
                set.iter().map(move |local| layout.global_row(c, local))
            })
        })
    }

    /// Bucket that colors each point of `chunk`: the highest bucket id holding
    /// the point, or the normal bucket when no highlight holds it.
    pub fn point_buckets(&self, chunk: usize) -> Vec<BucketId> {
        let mut out = vec![BucketId::NORMAL; self.layout.chunk_len(chunk)];
        for (id, chunks) in self.buckets().skip(1) {
            let Some(set) = chunks.get(chunk) else { continue };
            for local in set {
                if let Some(slot) = out.get_mut(local as usize) {
                    *slot = id;
                }
            }
        }
        out
    }

    pub(crate) fn check_bucket(&self, bucket: BucketId) -> Result<(), SelectionError> {
        if bucket.index() >= self.buckets.len() {
            return Err(SelectionError::UnknownBucket {
                bucket,
                bucket_count: self.buckets.len(),
            });
        }
        Ok(())
    }

    /// Next version with `bucket` replaced wholesale.
    ///
    /// Callers must have checked `bucket` and must pass one set per chunk.
    pub(crate) fn replace_bucket(&self, bucket: BucketId, chunks: Vec<CompactIndexSet>) -> Self {
        debug_assert_eq!(chunks.len(), self.chunk_count());
        let mut buckets = self.buckets.clone();
        buckets[bucket.index()] = chunks.into();
        Self {
            version: self.version + 1,
            layout: self.layout,
            buckets,
        }
    }

    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;

    fn snapshot(rows: usize, capacity: usize) -> SelectionSnapshot {
        partition(ChunkLayout::new(rows, capacity).unwrap(), 4)
    }

    #[test]
    fn test_replace_bucket_shares_others() {
        let snap = snapshot(6, 4);
        let next = snap.replace_bucket(
            BucketId(2),
            vec![[1u16, 2].into_iter().collect(), CompactIndexSet::new()],
        );
        assert_eq!(next.version(), snap.version() + 1);
        assert!(Arc::ptr_eq(&snap.buckets[0], &next.buckets[0]));
        assert_eq!(next.chunk(BucketId(2), 0).unwrap().as_slice(), &[1, 2]);
        assert!(snap.chunk(BucketId(2), 0).unwrap().is_empty());
    }

    #[test]
    fn test_selected_rows_are_global() {
        let snap = snapshot(6, 4).replace_bucket(
            BucketId(1),
            vec![[3u16].into_iter().collect(), [0u16, 1].into_iter().collect()],
        );
        let rows: Vec<usize> = snap.selected_rows(BucketId(1)).collect();
        assert_eq!(rows, vec![3, 4, 5]);
        assert_eq!(snap.selected_count(BucketId(1)), 3);
        assert_eq!(snap.selected_rows(BucketId(9)).count(), 0);
    }

    #[test]
    fn test_point_buckets_highest_id_wins() {
        let snap = snapshot(4, 4)
            .replace_bucket(BucketId(1), vec![[0u16, 1].into_iter().collect()])
            .replace_bucket(BucketId(3), vec![[1u16, 2].into_iter().collect()]);
        assert_eq!(
            snap.point_buckets(0),
            vec![BucketId(1), BucketId(3), BucketId(3), BucketId(0)]
        );
        assert!(snap.point_buckets(5).is_empty());
    }

    #[test]
    fn test_check_bucket() {
        let snap = snapshot(4, 4);
        assert!(snap.check_bucket(BucketId(3)).is_ok());
        assert_eq!(
            snap.check_bucket(BucketId(4)),
            Err(SelectionError::UnknownBucket {
                bucket: BucketId(4),
                bucket_count: 4
            })
        );
    }
}
