use kolmo_core::DEFAULT_SHINGLE_LEN;
use serde::{Deserialize, Serialize};

use crate::error::{CondenseError, CondenseResult};

/// Which member of a duplicate cluster survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalPolicy {
    /// Items are visited in input order; the first one wins.
    FirstSeen,
    /// Items are visited longest first (stable); the longest one wins.
    Longest,
}

/// How candidates are grouped for near-duplicate comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucketing {
    /// Bucket by the leading 8 bytes of the normalized text's digest. Only
    /// same-bucket items are compared.
    DigestPrefix,
    /// One bucket for everything; every accepted item is compared.
    Global,
}

/// Configuration for one condensation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CondenseStrategy {
    pub canonical: CanonicalPolicy,
    /// Jaccard similarity at or above which an item is a near duplicate.
    pub threshold: f64,
    pub shingle_len: usize,
    pub bucketing: Bucketing,
}

impl CondenseStrategy {
    /// Chunk-stream condensation: first-seen wins, τ = 0.88.
    pub fn stream() -> Self {
        Self {
            canonical: CanonicalPolicy::FirstSeen,
            threshold: 0.88,
            shingle_len: DEFAULT_SHINGLE_LEN,
            bucketing: Bucketing::DigestPrefix,
        }
    }

    /// Lesson-artifact compaction: longest wins, τ = 0.90.
    pub fn lessons() -> Self {
        Self {
            canonical: CanonicalPolicy::Longest,
            threshold: 0.90,
            shingle_len: DEFAULT_SHINGLE_LEN,
            bucketing: Bucketing::Global,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_shingle_len(mut self, k: usize) -> Self {
        self.shingle_len = k;
        self
    }

    pub fn validate(&self) -> CondenseResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(CondenseError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for CondenseStrategy {
    fn default() -> Self {
        Self::stream()
    }
}
