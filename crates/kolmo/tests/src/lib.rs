//! Shared fixtures for the kolmo integration and property suites.

use kolmo_core::{read_records, write_records, ChunkRecord, ContentDigest};
use std::path::{Path, PathBuf};

/// A chunk record whose provenance is irrelevant to the test.
pub fn record(pack_id: &str, text: &str) -> ChunkRecord {
    ChunkRecord::new(pack_id, "fixtures/doc.md", ContentDigest::of_str(text), text)
}

/// Write `<root>/<pack_id>/index.jsonl` holding one record per text.
pub fn write_pack(root: &Path, pack_id: &str, texts: &[&str]) -> PathBuf {
    let dir = root.join(pack_id);
    std::fs::create_dir_all(&dir).expect("create pack dir");
    let index = dir.join("index.jsonl");
    let records: Vec<ChunkRecord> = texts.iter().map(|t| record(pack_id, t)).collect();
    write_records(&index, &records).expect("write pack index");
    index
}

/// Texts of every well-formed record in a JSONL file, in file order.
pub fn texts_of(path: &Path) -> Vec<String> {
    read_records(path)
        .expect("read records")
        .records
        .into_iter()
        .map(|r| r.text)
        .collect()
}

/// A multi-line prompt with some slack for the annealer to remove.
pub const SAMPLE_PROMPT: &str = "#VBH: support-agent v2\n\
You are a helpful assistant for the billing team of a large company\n\
\n\
\n\
Always answer in English and be polite to every customer you meet\n\
CONFIRM: read the account summary first\n\
Never reveal internal account numbers or other secrets to anyone\n\
Summarize the customer request before answering it in detail";
