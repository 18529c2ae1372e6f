#![deny(unsafe_code)]
//! # kolmo-core
//!
//! Shared vocabulary for both kolmo pipelines: content digests, chunk
//! records and their JSONL codec, and the text scoring primitives
//! (shingles, Jaccard, Shannon entropy, cosine similarity).

pub mod digest;
pub mod error;
pub mod record;
pub mod text;

pub use digest::ContentDigest;
pub use error::{CoreError, CoreResult};
pub use record::{append_records, read_records, write_records, ChunkRecord, RecordBatch};
pub use text::{
    bucket_key, cosine_similarity, jaccard, normalize, shannon_entropy, shingles, token_count,
    tokens, ShingleSet, DEFAULT_SHINGLE_LEN,
};
