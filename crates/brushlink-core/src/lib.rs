//! Brushlink Core — domain layer for linked brushing over scatter plots.
//!
//! This crate contains the chunked index partitioning, rectangle hit-testing,
//! highlight composition (coupling and inversion), and row deletion logic.
//! No rendering or framework dependencies.

pub mod bucket;
pub mod config;
pub mod coupling;
pub mod dataset;
pub mod delete;
pub mod engine;
pub mod error;
pub mod index_set;
pub mod invert;
pub mod partition;
pub mod rect;
pub mod selector;
pub mod snapshot;
pub mod store;

// Re-exports for convenience.
pub use bucket::{BucketId, MAX_BUCKET_COUNT, MIN_BUCKET_COUNT};
pub use config::SelectionConfig;
pub use coupling::{Coupling, CouplingMap};
pub use dataset::Dataset;
pub use engine::SelectionEngine;
pub use error::{ConfigError, SelectionError};
pub use index_set::{CompactIndexSet, DEFAULT_CHUNK_CAPACITY, MAX_CHUNK_CAPACITY};
pub use partition::ChunkLayout;
pub use rect::BrushRect;
pub use snapshot::SelectionSnapshot;
pub use store::SelectionStore;
