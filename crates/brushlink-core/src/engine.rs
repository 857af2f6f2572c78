//! Selection engine: the validated configuration plus the pure operations
//! that turn one snapshot into the next.

use crate::bucket::BucketId;
use crate::config::SelectionConfig;
use crate::dataset::Dataset;
use crate::delete;
use crate::error::{ConfigError, SelectionError};
use crate::invert;
use crate::partition::{self, ChunkLayout};
use crate::rect::BrushRect;
use crate::selector;
use crate::snapshot::SelectionSnapshot;

/// Stateless entry point for partitioning, brushing, inversion and deletion.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    config: SelectionConfig,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self {
            config: SelectionConfig::default(),
        }
    }
}

impl SelectionEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: SelectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Layout for a dataset of `row_count` rows.
    pub fn layout(&self, row_count: usize) -> ChunkLayout {
        ChunkLayout::from_validated(row_count, self.config.chunk_capacity)
    }

    /// Initial snapshot for a dataset of `row_count` rows.
    pub fn partition(&self, row_count: usize) -> SelectionSnapshot {
        partition::partition(self.layout(row_count), self.config.bucket_count)
    }

    /// Brush `rect` into `target`. See [`selector::select_rect`].
    pub fn select<P: AsRef<[f32]>>(
        &self,
        snapshot: &SelectionSnapshot,
        target: BucketId,
        rect: &BrushRect,
        point_chunks: &[P],
    ) -> Result<SelectionSnapshot, SelectionError> {
        selector::select_rect(snapshot, target, rect, point_chunks, &self.config.couplings)
    }

    /// Invert `target` against the normal bucket. See [`invert::invert`].
    pub fn invert(
        &self,
        snapshot: &SelectionSnapshot,
        target: BucketId,
    ) -> Result<SelectionSnapshot, SelectionError> {
        invert::invert(snapshot, target)
    }

    /// Drop highlighted rows and repartition. See [`delete::delete_highlighted`].
    pub fn delete_highlighted(
        &self,
        dataset: &Dataset,
        snapshot: &SelectionSnapshot,
    ) -> Result<(Dataset, SelectionSnapshot), SelectionError> {
        delete::delete_highlighted(dataset, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupling::CouplingMap;

    #[test]
    fn test_new_validates_config() {
        let config = SelectionConfig {
            couplings: CouplingMap::new().with(BucketId(1), BucketId(2)),
            ..SelectionConfig::default()
        };
        assert!(SelectionEngine::new(config).is_err());
    }

    #[test]
    fn test_uses_configured_capacity_and_buckets() {
        let engine = SelectionEngine::new(SelectionConfig {
            chunk_capacity: 3,
            bucket_count: 3,
            ..SelectionConfig::default()
        })
        .unwrap();
        let snap = engine.partition(7);
        assert_eq!(snap.chunk_count(), 3);
        assert_eq!(snap.bucket_count(), 3);
        assert_eq!(snap.layout().chunk_len(2), 1);
    }

    #[test]
    fn test_select_applies_configured_coupling() {
        let engine = SelectionEngine::new(SelectionConfig {
            couplings: CouplingMap::new().with(BucketId(3), BucketId(1)),
            ..SelectionConfig::default()
        })
        .unwrap();
        let points = [[0.0f32, 0.0, 1.0, 1.0, 2.0, 2.0]];
        let snap = engine.partition(3);

        let left = BrushRect::from_corners([0.0, 0.0], [1.0, 1.0]);
        let snap = engine.select(&snap, BucketId(1), &left, &points).unwrap();

        let all = BrushRect::from_corners([0.0, 0.0], [2.0, 2.0]);
        let snap = engine.select(&snap, BucketId(3), &all, &points).unwrap();
        assert_eq!(snap.chunk(BucketId(3), 0).unwrap().as_slice(), &[0, 1]);
    }
}
