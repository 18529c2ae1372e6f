#![deny(unsafe_code)]
//! # kolmo-chunker
//!
//! Splits a source document into overlapping fixed-size windows. Every
//! chunk carries the digest of the whole document it came from, so all
//! chunks of one document version can be traced back to it.

pub mod error;
pub mod splitter;

pub use error::{ChunkError, ChunkResult};
pub use splitter::{expected_chunk_count, ChunkParams, ChunkSplitter};
