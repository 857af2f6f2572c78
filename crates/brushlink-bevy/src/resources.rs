//! Bevy resources for linked brushing.

use std::sync::Arc;

use bevy::prelude::*;
use brushlink_core::{BucketId, Dataset, SelectionSnapshot, SelectionStore};

/// Bevy resource owning the selection store.
///
/// The store hands out `Arc` snapshots, so render-side readers can hold the
/// previous version while systems publish the next one.
#[derive(Resource, Default)]
pub struct SelectionState {
    /// Current snapshot and the engine that produces its successors.
    pub store: SelectionStore,
}

impl SelectionState {
    /// Current snapshot, if a dataset has been partitioned.
    pub fn snapshot(&self) -> Option<Arc<SelectionSnapshot>> {
        self.store.snapshot()
    }
}

/// Bucket that brushes and highlight commands target.
///
/// Defaults to the normal bucket, which makes brushing and inversion no-ops
/// until a highlight is chosen.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ActiveHighlight(pub BucketId);

/// The dataset shared by all linked graphs.
///
/// Every [`replace`](Self::replace) starts a new generation; the partition
/// is rebuilt once per generation.
#[derive(Resource, Default)]
pub struct DatasetState {
    dataset: Option<Dataset>,
    generation: u64,
    partitioned_generation: Option<u64>,
}

impl DatasetState {
    /// The loaded dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Install a new dataset (or remove it with `None`).
    pub fn replace(&mut self, dataset: Option<Dataset>) {
        self.dataset = dataset;
        self.generation += 1;
    }

    /// Current generation; bumped by every replace.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn is_partitioned(&self) -> bool {
        self.partitioned_generation == Some(self.generation)
    }

    pub(crate) fn mark_partitioned(&mut self) {
        self.partitioned_generation = Some(self.generation);
    }
}
