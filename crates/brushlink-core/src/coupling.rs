//! Bucket coupling: a highlight bucket whose selections are always
//! intersected with another bucket's current contents.

use serde::{Deserialize, Serialize};

use crate::bucket::BucketId;
use crate::error::ConfigError;

/// One coupling link: selections into `bucket` are intersected with `over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupling {
    /// Highlight bucket being selected into.
    pub bucket: BucketId,
    /// Overlay bucket it is evaluated against.
    pub over: BucketId,
}

/// Mapping from highlight bucket to the overlay bucket it couples to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouplingMap {
    links: Vec<Coupling>,
}

impl CouplingMap {
    /// Create an empty map (no bucket coupled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the coupling for `bucket`.
    pub fn with(mut self, bucket: BucketId, over: BucketId) -> Self {
        self.links.retain(|l| l.bucket != bucket);
        self.links.push(Coupling { bucket, over });
        self
    }

    /// Overlay bucket that `bucket` intersects against, if coupled.
    pub fn partner(&self, bucket: BucketId) -> Option<BucketId> {
        self.links
            .iter()
            .find(|l| l.bucket == bucket)
            .map(|l| l.over)
    }

    /// Every configured link.
    pub fn links(&self) -> &[Coupling] {
        &self.links
    }

    /// Check every link against a snapshot with `bucket_count` buckets.
    ///
    /// Buckets 0 and 1 are never coupled, nothing couples to bucket 0 or to
    /// itself, and each bucket has at most one link.
    pub fn validate(&self, bucket_count: usize) -> Result<(), ConfigError> {
        match self.first_invalid(bucket_count) {
            Some((Coupling { bucket, over }, reason)) => Err(ConfigError::InvalidCoupling {
                bucket,
                over,
                reason,
            }),
            None => Ok(()),
        }
    }

    /// First link breaking the rules of [`validate`](Self::validate), with
    /// the reason.
    pub(crate) fn first_invalid(&self, bucket_count: usize) -> Option<(Coupling, &'static str)> {
        self.links.iter().enumerate().find_map(|(i, link)| {
            let Coupling { bucket, over } = *link;
            let reason = if bucket.0 < 2 {
                "only highlight buckets 2 and above can be coupled"
            } else if over.is_normal() {
                "cannot couple to the normal bucket"
            } else if over == bucket {
                "a bucket cannot couple to itself"
            } else if bucket.index() >= bucket_count || over.index() >= bucket_count {
                "bucket id out of range"
            } else if self.links[..i].iter().any(|l| l.bucket == bucket) {
                "bucket is coupled more than once"
            } else {
                return None;
            };
            Some((*link, reason))
        })
    }
}
