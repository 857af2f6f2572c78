//! Rectangle hit-testing and composition into a highlight bucket.
//!
//! # Algorithm
//! For each chunk, scan the interleaved coordinates `[x0, y0, x1, y1, ...]`
//! and split local indices into inside/outside the brush rectangle. The
//! inside set replaces the target bucket's chunk; when the target is coupled,
//! it is first intersected with the overlay bucket's current chunk set.
//!
//! The outside set is not folded back into the normal bucket. The normal
//! bucket is the fixed per-chunk universe used by inversion.
//!
//! # Complexity
//! O(L) over all points, plus O(n + m) per chunk for the coupling merge.

use crate::bucket::BucketId;
use crate::coupling::CouplingMap;
use crate::error::SelectionError;
use crate::index_set::{CompactIndexSet, MAX_CHUNK_CAPACITY};
use crate::rect::BrushRect;
use crate::snapshot::SelectionSnapshot;

/// Result of hit-testing one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkHit {
    /// Local indices of points inside the rectangle.
    pub inside: CompactIndexSet,
    /// Local indices of points outside the rectangle.
    pub outside: CompactIndexSet,
}

/// Split a chunk's interleaved `x, y` coordinates by the brush rectangle.
///
/// A trailing unpaired value is ignored; shape checking is the caller's job.
/// Chunks with more points than a `u16` local index can address are rejected.
pub fn hit_test_chunk(rect: &BrushRect, points: &[f32]) -> Result<ChunkHit, SelectionError> {
    let too_large = || SelectionError::ChunkTooLarge {
        points: points.len() / 2,
        capacity: MAX_CHUNK_CAPACITY,
    };
    if points.len() / 2 > MAX_CHUNK_CAPACITY {
        return Err(too_large());
    }
    let mut inside = Vec::new();
    let mut outside = Vec::new();
    for (j, xy) in points.chunks_exact(2).enumerate() {
        let local = u16::try_from(j).map_err(|_| too_large())?;
        if rect.contains(xy[0], xy[1]) {
            inside.push(local);
        } else {
            outside.push(local);
        }
    }
    Ok(ChunkHit {
        inside: CompactIndexSet::from_ascending(inside),
        outside: CompactIndexSet::from_ascending(outside),
    })
}

/// Select every point inside `rect` into `target`, returning the next
/// snapshot.
///
/// `point_chunks` holds one interleaved coordinate array per chunk, in the
/// same local order as the partition. Selecting into the normal bucket is a
/// no-op that returns the input snapshot unchanged. `couplings` is checked
/// against the snapshot's bucket count before anything is selected.
pub fn select_rect<P: AsRef<[f32]>>(
    snapshot: &SelectionSnapshot,
    target: BucketId,
    rect: &BrushRect,
    point_chunks: &[P],
    couplings: &CouplingMap,
) -> Result<SelectionSnapshot, SelectionError> {
    if target.is_normal() {
        tracing::debug!("select_rect: ignoring selection into the normal bucket");
        return Ok(snapshot.clone());
    }
    snapshot.check_bucket(target)?;
    if let Some((link, reason)) = couplings.first_invalid(snapshot.bucket_count()) {
        return Err(SelectionError::InvalidCoupling {
            bucket: link.bucket,
            over: link.over,
            reason,
        });
    }
    check_shape(snapshot, point_chunks)?;

    let overlay = match couplings.partner(target) {
        Some(over) => {
            snapshot.check_bucket(over)?;
            snapshot.bucket(over)
        }
        None => None,
    };

    let mut selected = Vec::with_capacity(point_chunks.len());
    let mut hits = 0usize;
    let mut misses = 0usize;
    for (chunk, points) in point_chunks.iter().enumerate() {
        let ChunkHit { inside, outside } = hit_test_chunk(rect, points.as_ref())?;
        misses += outside.len();
        let kept = match overlay {
            Some(overlay) => inside.intersection(&overlay[chunk]),
            None => inside,
        };
        hits += kept.len();
        selected.push(kept);
    }

    tracing::debug!(
        "select_rect: {} -> {} selected, {} outside (coupled: {})",
        target,
        hits,
        misses,
        overlay.is_some()
    );

    Ok(snapshot.replace_bucket(target, selected))
}

/// Reject coordinate arrays that do not match the snapshot's chunk layout.
fn check_shape<P: AsRef<[f32]>>(
    snapshot: &SelectionSnapshot,
    point_chunks: &[P],
) -> Result<(), SelectionError> {
    let layout = snapshot.layout();
    if point_chunks.len() != layout.chunk_count() {
        return Err(SelectionError::ChunkCountMismatch {
            expected: layout.chunk_count(),
            actual: point_chunks.len(),
        });
    }
    for (chunk, points) in point_chunks.iter().enumerate() {
        let expected = layout.chunk_len(chunk) * 2;
        let actual = points.as_ref().len();
        if actual != expected {
            return Err(SelectionError::ChunkShapeMismatch {
                chunk,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{ChunkLayout, partition};

    /// Four points: (0,0), (1,1), (5,5), (2,2).
    const POINTS: [f32; 8] = [0.0, 0.0, 1.0, 1.0, 5.0, 5.0, 2.0, 2.0];

    fn snapshot() -> SelectionSnapshot {
        partition(ChunkLayout::new(4, 65_530).unwrap(), 6)
    }

    #[test]
    fn test_hit_test_splits_inside_outside() {
        let rect = BrushRect::from_corners([0.0, 0.0], [2.0, 2.0]);
        let hit = hit_test_chunk(&rect, &POINTS).unwrap();
        assert_eq!(hit.inside.as_slice(), &[0, 1, 3]);
        assert_eq!(hit.outside.as_slice(), &[2]);
    }

    #[test]
    fn test_hit_test_rejects_chunk_past_index_limit() {
        let rect = BrushRect::from_corners([0.0, 0.0], [1.0, 1.0]);
        let points = vec![0.5f32; (MAX_CHUNK_CAPACITY + 5) * 2];
        assert_eq!(
            hit_test_chunk(&rect, &points).unwrap_err(),
            SelectionError::ChunkTooLarge {
                points: MAX_CHUNK_CAPACITY + 5,
                capacity: MAX_CHUNK_CAPACITY
            }
        );

        let points = vec![0.5f32; MAX_CHUNK_CAPACITY * 2];
        let hit = hit_test_chunk(&rect, &points).unwrap();
        assert_eq!(hit.inside.len(), MAX_CHUNK_CAPACITY);
        assert_eq!(hit.inside.iter().last(), Some(u16::MAX - 1));
        assert!(hit.outside.is_empty());
    }

    #[test]
    fn test_select_uncoupled_bucket() {
        let rect = BrushRect::from_corners([2.0, 2.0], [0.0, 0.0]);
        let next = select_rect(&snapshot(), BucketId(1), &rect, &[POINTS], &CouplingMap::new())
            .unwrap();
        assert_eq!(next.chunk(BucketId(1), 0).unwrap().as_slice(), &[0, 1, 3]);
        assert_eq!(next.chunk(BucketId::NORMAL, 0).unwrap().len(), 4);
    }

    #[test]
    fn test_select_into_normal_is_noop() {
        let snap = snapshot();
        let rect = BrushRect::from_corners([0.0, 0.0], [9.0, 9.0]);
        let next =
            select_rect(&snap, BucketId::NORMAL, &rect, &[POINTS], &CouplingMap::new()).unwrap();
        assert_eq!(next, snap);
    }

    #[test]
    fn test_select_coupled_intersects_overlay() {
        let couplings = CouplingMap::new().with(BucketId(2), BucketId(1));
        let wide = BrushRect::from_corners([0.0, 0.0], [2.0, 2.0]);
        let snap = select_rect(&snapshot(), BucketId(1), &wide, &[POINTS], &couplings).unwrap();

        // Covers (0,0), (2,2) and (5,5); (5,5) is not in bucket 1.
        let points = [0.0, 0.0, 9.0, 9.0, 5.0, 5.0, 2.0, 2.0];
        let rect = BrushRect::from_corners([0.0, 0.0], [6.0, 6.0]);
        let next = select_rect(&snap, BucketId(2), &rect, &[points], &couplings).unwrap();
        assert_eq!(next.chunk(BucketId(2), 0).unwrap().as_slice(), &[0, 3]);
    }

    #[test]
    fn test_zero_area_rect_selects_nothing_off_line() {
        let rect = BrushRect::from_corners([3.0, 3.0], [3.0, 3.0]);
        let next =
            select_rect(&snapshot(), BucketId(1), &rect, &[POINTS], &CouplingMap::new()).unwrap();
        assert!(next.chunk(BucketId(1), 0).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_stale_coordinates() {
        let rect = BrushRect::from_corners([0.0, 0.0], [1.0, 1.0]);
        let err = select_rect(
            &snapshot(),
            BucketId(1),
            &rect,
            &[vec![0.0f32; 6]],
            &CouplingMap::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SelectionError::ChunkShapeMismatch {
                chunk: 0,
                expected: 8,
                actual: 6
            }
        );

        let none: [&[f32]; 0] = [];
        let err = select_rect(&snapshot(), BucketId(1), &rect, &none, &CouplingMap::new())
            .unwrap_err();
        assert!(matches!(err, SelectionError::ChunkCountMismatch { .. }));
    }

    #[test]
    fn test_rejects_invalid_couplings() {
        let rect = BrushRect::from_corners([0.0, 0.0], [9.0, 9.0]);
        let self_link = CouplingMap::new().with(BucketId(2), BucketId(2));
        let err = select_rect(&snapshot(), BucketId(2), &rect, &[POINTS], &self_link).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::InvalidCoupling {
                bucket: BucketId(2),
                over: BucketId(2),
                ..
            }
        ));

        // A bad link is rejected even when the target is not the one coupled.
        let out_of_range = CouplingMap::new().with(BucketId(3), BucketId(9));
        let err =
            select_rect(&snapshot(), BucketId(1), &rect, &[POINTS], &out_of_range).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidCoupling { .. }));
    }

    #[test]
    fn test_rejects_unknown_bucket() {
        let rect = BrushRect::from_corners([0.0, 0.0], [1.0, 1.0]);
        let err = select_rect(&snapshot(), BucketId(6), &rect, &[POINTS], &CouplingMap::new())
            .unwrap_err();
        assert!(matches!(err, SelectionError::UnknownBucket { .. }));
    }
}
