//! Chunk records and the JSONL corpus codec.

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

use crate::digest::ContentDigest;
use crate::error::CoreResult;

/// One chunk of an extracted source document.
///
/// `content_hash` is the digest of the whole source document the chunk was
/// cut from, so every chunk of one document version shares it. Fields not
/// known to kolmo are carried in `extra` and written back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    #[serde(default)]
    pub pack_id: String,
    #[serde(rename = "source")]
    pub source_path: String,
    #[serde(rename = "sha256")]
    pub content_hash: ContentDigest,
    pub text: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChunkRecord {
    pub fn new(
        pack_id: impl Into<String>,
        source_path: impl Into<String>,
        content_hash: ContentDigest,
        text: impl Into<String>,
    ) -> Self {
        Self {
            pack_id: pack_id.into(),
            source_path: source_path.into(),
            content_hash,
            text: text.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Records parsed from a corpus file, plus the number of lines skipped.
#[derive(Clone, Debug, Default)]
pub struct RecordBatch {
    pub records: Vec<ChunkRecord>,
    pub malformed: usize,
}

/// Parse a JSONL stream. Malformed lines are logged and skipped.
pub fn parse_records<R: BufRead>(reader: R) -> CoreResult<RecordBatch> {
    let mut batch = RecordBatch::default();
    for (lineno, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<ChunkRecord>(&line) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                warn!(line = lineno + 1, error = %e, "skipping malformed record");
                batch.malformed += 1;
            }
        }
    }
    Ok(batch)
}

pub fn read_records(path: &Path) -> CoreResult<RecordBatch> {
    let file = File::open(path)?;
    parse_records(BufReader::new(file))
}

/// Serialize records as one JSON object per line.
pub fn write_jsonl<'a, W, I>(writer: W, records: I) -> CoreResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ChunkRecord>,
{
    let mut w = BufWriter::new(writer);
    for record in records {
        serde_json::to_writer(&mut w, record)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

/// Replace `path` with the given records.
pub fn write_records<'a, I>(path: &Path, records: I) -> CoreResult<()>
where
    I: IntoIterator<Item = &'a ChunkRecord>,
{
    write_jsonl(File::create(path)?, records)
}

/// Append records to `path`, creating it if needed. The file is synced
/// before returning.
pub fn append_records<'a, I>(path: &Path, records: I) -> CoreResult<()>
where
    I: IntoIterator<Item = &'a ChunkRecord>,
{
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    write_jsonl(&file, records)?;
    file.sync_all()?;
    Ok(())
}
