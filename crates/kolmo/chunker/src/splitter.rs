use kolmo_core::{ChunkRecord, ContentDigest};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{ChunkError, ChunkResult};

/// Sliding-window parameters, in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkParams {
    pub max_chars: usize,
    pub overlap: usize,
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            max_chars: 2000,
            overlap: 200,
        }
    }
}

impl ChunkParams {
    pub fn new(max_chars: usize, overlap: usize) -> Self {
        Self { max_chars, overlap }
    }

    /// The window must advance by at least one character per step.
    pub fn validate(&self) -> ChunkResult<()> {
        if self.max_chars == 0 || self.overlap >= self.max_chars {
            return Err(ChunkError::InvalidParameters {
                max_chars: self.max_chars,
                overlap: self.overlap,
            });
        }
        Ok(())
    }

    pub fn step(&self) -> usize {
        self.max_chars - self.overlap
    }
}

/// Number of windows produced for a text of `len` characters.
pub fn expected_chunk_count(len: usize, params: ChunkParams) -> usize {
    if len == 0 {
        0
    } else if len <= params.max_chars {
        1
    } else {
        (len - params.overlap).div_ceil(params.step())
    }
}

/// Splits documents into overlapping [`ChunkRecord`]s.
#[derive(Clone, Debug)]
pub struct ChunkSplitter {
    params: ChunkParams,
}

impl ChunkSplitter {
    /// Fails with [`ChunkError::InvalidParameters`] before any work is done
    /// if the window cannot advance.
    pub fn new(params: ChunkParams) -> ChunkResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> ChunkParams {
        self.params
    }

    /// Cut `text` into windows. The last window is the first one that
    /// reaches the end of the text.
    pub fn split(&self, text: &str, source_path: &str, pack_id: &str) -> Vec<ChunkRecord> {
        let digest = ContentDigest::of_str(text);
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let len = bounds.len() - 1;

        let mut records = Vec::with_capacity(expected_chunk_count(len, self.params));
        let mut start = 0;
        while start < len {
            let end = (start + self.params.max_chars).min(len);
            records.push(ChunkRecord::new(
                pack_id,
                source_path,
                digest,
                &text[bounds[start]..bounds[end]],
            ));
            if end == len {
                break;
            }
            start += self.params.step();
        }
        records
    }

    /// Read and split a file. The record's source is `path` relative to
    /// `root`, or `path` itself when it lies outside `root`.
    pub fn split_file(
        &self,
        path: &Path,
        root: &Path,
        pack_id: &str,
    ) -> ChunkResult<Vec<ChunkRecord>> {
        let content = std::fs::read_to_string(path)?;
        let rel = relative_source(path, root);
        let records = self.split(&content, &rel, pack_id);
        debug!(source = %rel, chunks = records.len(), "split document");
        Ok(records)
    }
}

fn relative_source(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().trim_start_matches('/').to_string()
}
