//! Bevy systems for linked brushing.
//!
//! These systems are the only place selection state changes. Graphs send
//! `BrushReleased`, the input layer sends `HighlightCommand`, and every
//! published snapshot is announced with `SelectionChanged`.

use bevy::prelude::*;
use brushlink_core::BrushRect;

use crate::events::{BrushReleased, HighlightCommand, SelectionChanged};
use crate::resources::{ActiveHighlight, DatasetState, SelectionState};

/// Rebuild the partition when the dataset appears or is replaced, and clear
/// it when the dataset goes away.
pub fn sync_partition_with_dataset(
    mut datasets: ResMut<DatasetState>,
    state: Res<SelectionState>,
    mut changed: MessageWriter<SelectionChanged>,
) {
    if datasets.is_partitioned() {
        return;
    }

    match datasets.dataset() {
        Some(dataset) => {
            let snapshot = state.store.rebuild_partition(dataset.row_count());
            changed.write(SelectionChanged {
                snapshot: Some(snapshot),
            });
        }
        None => {
            if state.store.is_partitioned() {
                state.store.clear();
                changed.write(SelectionChanged { snapshot: None });
            }
        }
    }
    datasets.mark_partitioned();
}

/// Process inbound highlight commands.
pub fn handle_highlight_commands(
    mut commands: MessageReader<HighlightCommand>,
    state: Res<SelectionState>,
    mut active: ResMut<ActiveHighlight>,
    mut datasets: ResMut<DatasetState>,
    mut changed: MessageWriter<SelectionChanged>,
) {
    for cmd in commands.read() {
        match *cmd {
            HighlightCommand::SetActive(bucket) => {
                let bucket_count = state.store.engine().config().bucket_count;
                if bucket.index() >= bucket_count {
                    tracing::warn!("SetActive: {} out of range ({} buckets)", bucket, bucket_count);
                } else if active.0 != bucket {
                    active.0 = bucket;
                    tracing::debug!("active highlight: {}", bucket);
                }
            }
            HighlightCommand::Invert => match state.store.invert(active.0) {
                Ok(Some(snapshot)) => {
                    changed.write(SelectionChanged {
                        snapshot: Some(snapshot),
                    });
                }
                Ok(None) => tracing::debug!("Invert: nothing to invert for {}", active.0),
                Err(e) => tracing::error!("Invert failed: {e}"),
            },
            HighlightCommand::DeleteHighlighted => {
                let Some(dataset) = datasets.dataset() else {
                    tracing::warn!("DeleteHighlighted: no dataset loaded");
                    continue;
                };
                match state.store.delete_highlighted(dataset) {
                    Ok(Some(reduced)) => {
                        datasets.replace(Some(reduced));
                        datasets.mark_partitioned();
                        changed.write(SelectionChanged {
                            snapshot: state.store.snapshot(),
                        });
                    }
                    Ok(None) => tracing::debug!("DeleteHighlighted: no partition"),
                    Err(e) => tracing::error!("DeleteHighlighted failed: {e}"),
                }
            }
        }
    }
}

/// Hit-test released brushes against the dataset and publish the selection
/// into the active highlight.
pub fn handle_brush_released(
    mut brushes: MessageReader<BrushReleased>,
    state: Res<SelectionState>,
    active: Res<ActiveHighlight>,
    datasets: Res<DatasetState>,
    mut changed: MessageWriter<SelectionChanged>,
) {
    for brush in brushes.read() {
        if active.0.is_normal() {
            tracing::debug!("brush on graph {} ignored: no active highlight", brush.graph);
            continue;
        }
        let (Some(dataset), Some(snapshot)) = (datasets.dataset(), state.snapshot()) else {
            tracing::warn!("brush on graph {} ignored: no dataset loaded", brush.graph);
            continue;
        };

        let points = match dataset.project(brush.x_column, brush.y_column, snapshot.layout()) {
            Ok(points) => points,
            Err(e) => {
                tracing::error!("brush on graph {}: {e}", brush.graph);
                continue;
            }
        };
        let rect = BrushRect::from_corners(brush.down.to_array(), brush.up.to_array());

        match state.store.select(active.0, &rect, &points) {
            Ok(Some(snapshot)) => {
                tracing::debug!(
                    "graph {} brushed {} points into {}",
                    brush.graph,
                    snapshot.selected_count(active.0),
                    active.0
                );
                changed.write(SelectionChanged {
                    snapshot: Some(snapshot),
                });
            }
            Ok(None) => {}
            Err(e) => tracing::error!("brush on graph {} failed: {e}", brush.graph),
        }
    }
}
