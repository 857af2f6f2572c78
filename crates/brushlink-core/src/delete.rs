//! Row deletion: drop every highlighted row and repartition.
//!
//! Retained rows are the complement of the union of all highlight buckets.
//! The normal bucket is not consulted, so rows reach deletion only through a
//! highlight.

use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::index_set::CompactIndexSet;
use crate::partition::{ChunkLayout, partition};
use crate::snapshot::SelectionSnapshot;

/// Global rows held by no highlight bucket, ascending.
pub fn retained_rows(snapshot: &SelectionSnapshot) -> Vec<usize> {
    let layout = snapshot.layout();
    let mut rows = Vec::with_capacity(layout.row_count());
    for chunk in 0..layout.chunk_count() {
        let highlighted = snapshot
            .buckets()
            .skip(1)
            .fold(CompactIndexSet::new(), |acc, (_, chunks)| {
                acc.union(&chunks[chunk])
            });
        let kept = CompactIndexSet::dense(layout.chunk_len(chunk)).difference(&highlighted);
        rows.extend(kept.iter().map(|local| layout.global_row(chunk, local)));
    }
    rows
}

/// Remove every highlighted row from `dataset`.
///
/// Returns the reduced dataset and a fresh partition for it (all highlight
/// buckets empty), versioned after `snapshot`.
pub fn delete_highlighted(
    dataset: &Dataset,
    snapshot: &SelectionSnapshot,
) -> Result<(Dataset, SelectionSnapshot), SelectionError> {
    let layout = snapshot.layout();
    if dataset.row_count() != layout.row_count() {
        return Err(SelectionError::StaleSnapshot {
            expected: layout.row_count(),
            actual: dataset.row_count(),
        });
    }

    let rows = retained_rows(snapshot);
    let reduced = dataset.gather_rows(&rows);
    let next = partition(
        ChunkLayout::from_validated(reduced.row_count(), layout.capacity()),
        snapshot.bucket_count(),
    )
    .with_version(snapshot.version() + 1);

    tracing::info!(
        "deleted {} highlighted rows, {} remain",
        layout.row_count() - reduced.row_count(),
        reduced.row_count()
    );

    Ok((reduced, next))
}
