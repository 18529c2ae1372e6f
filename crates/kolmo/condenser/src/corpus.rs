//! JSONL chunk-index condensation with an atomic in-place swap.

use kolmo_core::{append_records, read_records, record::write_jsonl};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::condenser::Condenser;
use crate::error::{CondenseError, CondenseResult};
use crate::strategy::CondenseStrategy;

/// File name of a pack's chunk index.
pub const INDEX_FILE: &str = "index.jsonl";
/// File name of a pack's append-only archive log.
pub const ARCHIVE_FILE: &str = "index.archive.jsonl";

/// Counts for one condensed index.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CondenseReport {
    pub index: PathBuf,
    pub kept: usize,
    pub archived: usize,
    pub exact: usize,
    pub near: usize,
    pub dropped: usize,
    pub malformed: usize,
}

/// Per-pack reports plus totals for a pack-directory walk.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CondenseSummary {
    pub packs: Vec<CondenseReport>,
    pub total_kept: usize,
    pub total_archived: usize,
}

/// Condense one index file in place.
///
/// Archived records are appended to `archive` (and synced) first; the kept
/// records are then written to a sibling temp file and renamed over
/// `index`. A crash before the rename leaves `index` untouched.
pub fn condense_index(
    index: &Path,
    archive: &Path,
    strategy: &CondenseStrategy,
) -> CondenseResult<CondenseReport> {
    let condenser = Condenser::new(strategy.clone())?;
    let batch = read_records(index)?;
    if batch.malformed > 0 {
        warn!(index = %index.display(), malformed = batch.malformed, "skipped malformed lines");
    }

    let outcome = condenser.condense(batch.records);

    if !outcome.archived.is_empty() {
        append_records(archive, outcome.archived_items())?;
    }

    let dir = match index.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    write_jsonl(tmp.as_file(), outcome.kept_items())?;
    tmp.as_file().sync_all()?;
    tmp.persist(index)?;

    let report = CondenseReport {
        index: index.to_path_buf(),
        kept: outcome.kept.len(),
        archived: outcome.archived.len(),
        exact: outcome.exact_count(),
        near: outcome.near_count(),
        dropped: outcome.dropped,
        malformed: batch.malformed,
    };
    info!(
        index = %index.display(),
        kept = report.kept,
        archived = report.archived,
        "condensed index"
    );
    Ok(report)
}

/// Condense every `<packs_dir>/*/index.jsonl`, one file at a time.
pub fn condense_packs(
    packs_dir: &Path,
    strategy: &CondenseStrategy,
) -> CondenseResult<CondenseSummary> {
    let mut indexes = Vec::new();
    for entry in WalkDir::new(packs_dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == INDEX_FILE {
            indexes.push(entry.into_path());
        }
    }

    if indexes.is_empty() {
        return Err(CondenseError::EmptyCorpus(packs_dir.to_path_buf()));
    }

    let mut summary = CondenseSummary::default();
    for index in indexes {
        let archive = index.with_file_name(ARCHIVE_FILE);
        let report = condense_index(&index, &archive, strategy)?;
        summary.total_kept += report.kept;
        summary.total_archived += report.archived;
        summary.packs.push(report);
    }
    info!(
        packs = summary.packs.len(),
        kept = summary.total_kept,
        archived = summary.total_archived,
        "condensed corpus"
    );
    Ok(summary)
}
