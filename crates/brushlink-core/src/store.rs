//! Shared holder for the current selection snapshot.
//!
//! Writers compute the next snapshot under an upgradable read lock, so
//! renderers can keep cloning the current `Arc` while a brush is evaluated,
//! and only the final swap takes the exclusive lock. Writers are serialized.
//!
//! The partition is never rebuilt implicitly: whoever owns the dataset calls
//! [`SelectionStore::rebuild_partition`] when the dataset appears or changes
//! identity, and [`SelectionStore::clear`] when it disappears.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::bucket::BucketId;
use crate::config::SelectionConfig;
use crate::dataset::Dataset;
use crate::engine::SelectionEngine;
use crate::error::{ConfigError, SelectionError};
use crate::rect::BrushRect;
use crate::snapshot::SelectionSnapshot;

/// Current snapshot plus the engine that produces its successors.
#[derive(Debug, Default)]
pub struct SelectionStore {
    engine: SelectionEngine,
    state: RwLock<Published>,
}

#[derive(Debug, Default)]
struct Published {
    current: Option<Arc<SelectionSnapshot>>,
    /// Highest version ever published. Survives `clear`.
    last_version: Option<u64>,
}

impl Published {
    fn publish(&mut self, snapshot: Arc<SelectionSnapshot>) {
        self.last_version = Some(snapshot.version());
        self.current = Some(snapshot);
    }

    fn next_version(&self) -> u64 {
        self.last_version.map_or(0, |v| v + 1)
    }
}

impl SelectionStore {
    /// Create an empty store after validating `config`.
    pub fn new(config: SelectionConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_engine(SelectionEngine::new(config)?))
    }

    /// Create an empty store around an existing engine.
    pub fn with_engine(engine: SelectionEngine) -> Self {
        Self {
            engine,
            state: RwLock::new(Published::default()),
        }
    }

    /// The engine used for every update.
    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    /// Current snapshot, or `None` before the first partition.
    pub fn snapshot(&self) -> Option<Arc<SelectionSnapshot>> {
        self.state.read().current.clone()
    }

    /// Whether a partition exists.
    pub fn is_partitioned(&self) -> bool {
        self.state.read().current.is_some()
    }

    /// Discard all selections and partition `row_count` rows from scratch.
    ///
    /// The new version is above every version this store has published,
    /// including ones published before a [`clear`](Self::clear).
    pub fn rebuild_partition(&self, row_count: usize) -> Arc<SelectionSnapshot> {
        let mut state = self.state.write();
        let version = state.next_version();
        let snapshot = Arc::new(self.engine.partition(row_count).with_version(version));
        state.publish(Arc::clone(&snapshot));
        tracing::info!(
            "selection partition rebuilt: {} rows, {} chunks (version {})",
            row_count,
            snapshot.chunk_count(),
            version
        );
        snapshot
    }

    /// Drop the current snapshot (the dataset went away).
    pub fn clear(&self) {
        if self.state.write().current.take().is_some() {
            tracing::info!("selection partition cleared");
        }
    }

    /// Brush `rect` into `target`.
    ///
    /// Returns the published snapshot, or `None` when nothing changed
    /// (no partition yet, or `target` is the normal bucket).
    pub fn select<P: AsRef<[f32]>>(
        &self,
        target: BucketId,
        rect: &BrushRect,
        point_chunks: &[P],
    ) -> Result<Option<Arc<SelectionSnapshot>>, SelectionError> {
        self.update(|snap| self.engine.select(snap, target, rect, point_chunks))
    }

    /// Invert `target` against the normal bucket.
    pub fn invert(&self, target: BucketId) -> Result<Option<Arc<SelectionSnapshot>>, SelectionError> {
        self.update(|snap| self.engine.invert(snap, target))
    }

    /// Remove highlighted rows from `dataset` and publish a fresh partition
    /// for the reduced dataset. Returns the reduced dataset, or `None` when
    /// there is no partition.
    pub fn delete_highlighted(&self, dataset: &Dataset) -> Result<Option<Dataset>, SelectionError> {
        let state = self.state.upgradable_read();
        let Some(snap) = state.current.as_deref() else {
            tracing::debug!("delete_highlighted: no partition");
            return Ok(None);
        };
        let (reduced, next) = self.engine.delete_highlighted(dataset, snap)?;
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.publish(Arc::new(next));
        Ok(Some(reduced))
    }

    fn update(
        &self,
        op: impl FnOnce(&SelectionSnapshot) -> Result<SelectionSnapshot, SelectionError>,
    ) -> Result<Option<Arc<SelectionSnapshot>>, SelectionError> {
        let state = self.state.upgradable_read();
        let Some(snap) = state.current.as_deref() else {
            tracing::debug!("selection update skipped: no partition");
            return Ok(None);
        };
        let next = op(snap)?;
        if next.version() == snap.version() {
            return Ok(None);
        }
        let next = Arc::new(next);
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.publish(Arc::clone(&next));
        Ok(Some(next))
    }
}
