//! Error types for selection and configuration.

use crate::bucket::BucketId;

/// Errors raised by selection operations.
///
/// Shape mismatches are caller contract violations (typically stale
/// coordinate arrays after the dataset changed without a repartition) and
/// are never clamped or skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("bucket {bucket} does not exist (snapshot has {bucket_count} buckets)")]
    UnknownBucket { bucket: BucketId, bucket_count: usize },

    #[error("expected {expected} point chunks, got {actual}")]
    ChunkCountMismatch { expected: usize, actual: usize },

    #[error("chunk {chunk}: expected {expected} interleaved coordinates, got {actual}")]
    ChunkShapeMismatch {
        chunk: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {column} has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column {column} does not exist (dataset has {column_count} columns)")]
    UnknownColumn { column: usize, column_count: usize },

    #[error("dataset has {actual} rows but the snapshot was partitioned for {expected}")]
    StaleSnapshot { expected: usize, actual: usize },

    #[error("chunk of {points} points exceeds the 16-bit index limit of {capacity}")]
    ChunkTooLarge { points: usize, capacity: usize },

    #[error("invalid coupling {bucket} -> {over}: {reason}")]
    InvalidCoupling {
        bucket: BucketId,
        over: BucketId,
        reason: &'static str,
    },
}

/// Errors raised while loading or validating a [`SelectionConfig`](crate::SelectionConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("chunk capacity {0} is outside 1..=65535")]
    InvalidCapacity(usize),

    #[error("bucket count {0} is outside 2..=256")]
    InvalidBucketCount(usize),

    #[error("invalid coupling {bucket} -> {over}: {reason}")]
    InvalidCoupling {
        bucket: BucketId,
        over: BucketId,
        reason: &'static str,
    },
}
