//! Compressed-size estimation.

use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

/// Estimates the information content of a text as a byte count.
pub trait SizeEstimator: Send + Sync {
    fn compressed_size(&self, text: &str) -> usize;
}

/// Raw DEFLATE size at a fixed level.
#[derive(Clone, Debug)]
pub struct DeflateEstimator {
    level: u32,
}

impl DeflateEstimator {
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    fn deflate(&self, text: &str) -> std::io::Result<usize> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(self.level));
        encoder.write_all(text.as_bytes())?;
        Ok(encoder.finish()?.len())
    }
}

impl Default for DeflateEstimator {
    fn default() -> Self {
        Self::new(9)
    }
}

impl SizeEstimator for DeflateEstimator {
    fn compressed_size(&self, text: &str) -> usize {
        // Writing into a Vec cannot fail in practice.
        self.deflate(text).unwrap_or(text.len())
    }
}
