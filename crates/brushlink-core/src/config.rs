//! Selection engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bucket::{MAX_BUCKET_COUNT, MIN_BUCKET_COUNT};
use crate::coupling::CouplingMap;
use crate::error::ConfigError;
use crate::index_set::{DEFAULT_CHUNK_CAPACITY, MAX_CHUNK_CAPACITY};

/// Default number of buckets: the normal bucket plus five highlights.
const DEFAULT_BUCKET_COUNT: usize = 6;

/// Environment variable overriding [`SelectionConfig::chunk_capacity`].
pub const CHUNK_CAPACITY_ENV: &str = "BRUSHLINK_CHUNK_CAPACITY";
/// Environment variable overriding [`SelectionConfig::bucket_count`].
pub const BUCKET_COUNT_ENV: &str = "BRUSHLINK_BUCKET_COUNT";

/// Runtime configuration for partitioning and selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Rows per chunk. Must stay within `1..=65535`.
    pub chunk_capacity: usize,
    /// Total buckets, including the normal bucket.
    pub bucket_count: usize,
    /// Which highlight buckets intersect against which overlay bucket.
    pub couplings: CouplingMap,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            bucket_count: DEFAULT_BUCKET_COUNT,
            couplings: CouplingMap::default(),
        }
    }
}

impl SelectionConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Apply `BRUSHLINK_CHUNK_CAPACITY` and `BRUSHLINK_BUCKET_COUNT` when set
    /// and parseable. The result is not validated.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `BRUSHLINK_*` variable
    /// names. Values that do not parse as an integer are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str| -> Option<usize> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("ignoring {key}={raw:?}: not an unsigned integer");
                    None
                }
            }
        };
        if let Some(capacity) = parse(CHUNK_CAPACITY_ENV) {
            self.chunk_capacity = capacity;
        }
        if let Some(count) = parse(BUCKET_COUNT_ENV) {
            self.bucket_count = count;
        }
        self
    }

    /// Check capacity, bucket count and couplings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_capacity == 0 || self.chunk_capacity > MAX_CHUNK_CAPACITY {
            return Err(ConfigError::InvalidCapacity(self.chunk_capacity));
        }
        if !(MIN_BUCKET_COUNT..=MAX_BUCKET_COUNT).contains(&self.bucket_count) {
            return Err(ConfigError::InvalidBucketCount(self.bucket_count));
        }
        self.couplings.validate(self.bucket_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::BucketId;

    #[test]
    fn test_default_is_valid() {
        let config = SelectionConfig::default();
        assert_eq!(config.chunk_capacity, 65_530);
        assert_eq!(config.bucket_count, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SelectionConfig::from_json_str(
            r#"{ "couplings": [{ "bucket": 5, "over": 2 }] }"#,
        )
        .unwrap();
        assert_eq!(config.bucket_count, 6);
        assert_eq!(config.couplings.partner(BucketId(5)), Some(BucketId(2)));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SelectionConfig::from_json_str(r#"{ "chunk_capacity": 70000 }"#),
            Err(ConfigError::InvalidCapacity(70_000))
        ));
        assert!(matches!(
            SelectionConfig::from_json_str(r#"{ "bucket_count": 1 }"#),
            Err(ConfigError::InvalidBucketCount(1))
        ));
        assert!(matches!(
            SelectionConfig::from_json_str(r#"{ "couplings": [{ "bucket": 2, "over": 2 }] }"#),
            Err(ConfigError::InvalidCoupling { .. })
        ));
        assert!(matches!(
            SelectionConfig::from_json_str("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides_replace_set_values() {
        let config = SelectionConfig::default().with_overrides(|key| match key {
            CHUNK_CAPACITY_ENV => Some("1024".into()),
            BUCKET_COUNT_ENV => Some(" 9 ".into()),
            _ => None,
        });
        assert_eq!(config.chunk_capacity, 1024);
        assert_eq!(config.bucket_count, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_ignore_unparseable_values() {
        let config = SelectionConfig::default().with_overrides(|key| match key {
            CHUNK_CAPACITY_ENV => Some("lots".into()),
            BUCKET_COUNT_ENV => Some("-3".into()),
            _ => None,
        });
        assert_eq!(config, SelectionConfig::default());
    }

    #[test]
    fn test_overrides_are_validated_separately() {
        let config = SelectionConfig::default()
            .with_overrides(|key| (key == BUCKET_COUNT_ENV).then(|| "1".to_string()));
        assert_eq!(config.bucket_count, 1);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBucketCount(1))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SelectionConfig::load(Path::new("/nonexistent/brushlink.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
