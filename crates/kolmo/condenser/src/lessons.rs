//! Lesson-artifact compaction: one text per file, longest copy wins.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::condenser::{Condensable, Condenser};
use crate::error::{CondenseError, CondenseResult};
use crate::strategy::CondenseStrategy;

pub const ARCHIVE_DIR: &str = "_archive";
pub const COMPACTED_DIR: &str = "_compacted";
pub const MANIFEST_FILE: &str = "compactor.json";

/// One archived artifact and the canonical it was merged into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEntry {
    pub src: String,
    pub into: String,
}

/// Persisted record of a compaction run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonManifest {
    /// Unix timestamp in seconds.
    pub ts: f64,
    pub merged: Vec<MergeEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonReport {
    pub canonical: usize,
    pub merged: Vec<MergeEntry>,
    pub manifest: PathBuf,
}

struct Lesson {
    name: String,
    path: PathBuf,
    text: String,
}

impl Condensable for Lesson {
    fn text(&self) -> &str {
        &self.text
    }
}

/// Compact every `*.{extension}` artifact directly under `dir`.
///
/// Duplicates are moved into `dir/_archive/` and listed in
/// `dir/_compacted/compactor.json`. Canonical artifacts stay in place.
pub fn compact_lessons(
    dir: &Path,
    extension: &str,
    strategy: &CondenseStrategy,
) -> CondenseResult<LessonReport> {
    let condenser = Condenser::new(strategy.clone())?;
    let lessons = load_lessons(dir, extension)?;
    if lessons.is_empty() {
        return Err(CondenseError::EmptyCorpus(dir.to_path_buf()));
    }
    let names: Vec<String> = lessons.iter().map(|l| l.name.clone()).collect();

    let outcome = condenser.condense(lessons);

    let archive_dir = dir.join(ARCHIVE_DIR);
    let compacted_dir = dir.join(COMPACTED_DIR);
    fs::create_dir_all(&archive_dir)?;
    fs::create_dir_all(&compacted_dir)?;

    let mut merged = Vec::with_capacity(outcome.archived.len());
    for archived in &outcome.archived {
        let lesson = &archived.item;
        fs::rename(&lesson.path, archive_dir.join(&lesson.name))?;
        merged.push(MergeEntry {
            src: lesson.name.clone(),
            into: names[archived.into].clone(),
        });
    }

    let manifest = LessonManifest {
        ts: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
        merged: merged.clone(),
    };
    let manifest_path = compacted_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    info!(
        canonical = outcome.kept.len(),
        archived = merged.len(),
        manifest = %manifest_path.display(),
        "compacted lessons"
    );
    Ok(LessonReport {
        canonical: outcome.kept.len(),
        merged,
        manifest: manifest_path,
    })
}

fn load_lessons(dir: &Path, extension: &str) -> CondenseResult<Vec<Lesson>> {
    let mut lessons = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable lesson");
                String::new()
            }
        };
        lessons.push(Lesson { name, path, text });
    }
    lessons.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(lessons)
}
