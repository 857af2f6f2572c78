//! Highlight inversion against the normal bucket.

use crate::bucket::BucketId;
use crate::error::SelectionError;
use crate::snapshot::SelectionSnapshot;

/// Replace `target` with, per chunk, the normal bucket minus `target`.
///
/// The normal bucket is treated as the fixed universe of each chunk, so
/// inverting twice restores the original set. Inverting the normal bucket
/// is a no-op.
pub fn invert(
    snapshot: &SelectionSnapshot,
    target: BucketId,
) -> Result<SelectionSnapshot, SelectionError> {
    if target.is_normal() {
        tracing::debug!("invert: ignoring inversion of the normal bucket");
        return Ok(snapshot.clone());
    }
    snapshot.check_bucket(target)?;

    let (Some(universe), Some(current)) =
        (snapshot.bucket(BucketId::NORMAL), snapshot.bucket(target))
    else {
        return Ok(snapshot.clone());
    };

    let inverted: Vec<_> = universe
        .iter()
        .zip(current)
        .map(|(all, brushed)| all.difference(brushed))
        .collect();

    tracing::debug!(
        "invert: {} now holds {} points",
        target,
        inverted.iter().map(|s| s.len()).sum::<usize>()
    );

    Ok(snapshot.replace_bucket(target, inverted))
}
