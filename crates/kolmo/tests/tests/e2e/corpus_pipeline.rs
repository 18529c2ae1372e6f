//! End-to-end test: document -> chunk index -> pack condensation -> lesson compaction.

use kolmo_chunker::{ChunkParams, ChunkSplitter};
use kolmo_condenser::{
    compact_lessons, condense_packs, CondenseError, CondenseStrategy, LessonManifest,
};
use kolmo_core::{append_records, read_records};
use kolmo_tests::{texts_of, write_pack};
use std::fs;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn two_identical_records_yield_one_kept_one_archived() {
    let dir = tempfile::tempdir().unwrap();
    let index = write_pack(dir.path(), "pack-a", &["AAAA", "AAAA"]);

    let summary = condense_packs(dir.path(), &CondenseStrategy::stream()).unwrap();
    assert_eq!(summary.total_kept, 1);
    assert_eq!(summary.total_archived, 1);
    assert_eq!(texts_of(&index), vec!["AAAA"]);
    assert_eq!(texts_of(&index.with_file_name("index.archive.jsonl")), vec!["AAAA"]);
}

#[test]
fn repeated_ingestion_is_condensed_away() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    let doc = docs.join("guide.md");
    let body: String = (0..40)
        .map(|i| format!("Paragraph {i} explains one more detail of the deployment process.\n"))
        .collect();
    fs::write(&doc, &body).unwrap();

    let pack = dir.path().join("packs").join("run-1");
    fs::create_dir_all(&pack).unwrap();
    let index = pack.join("index.jsonl");

    let splitter = ChunkSplitter::new(ChunkParams::new(400, 40)).unwrap();
    for _ in 0..3 {
        let records = splitter.split_file(&doc, &docs, "run-1").unwrap();
        append_records(&index, &records).unwrap();
    }
    let per_run = splitter.split_file(&doc, &docs, "run-1").unwrap().len();
    assert_eq!(read_records(&index).unwrap().records.len(), 3 * per_run);

    let summary = condense_packs(&dir.path().join("packs"), &CondenseStrategy::stream()).unwrap();
    assert_eq!(summary.total_kept, per_run);
    assert_eq!(summary.total_archived, 2 * per_run);

    let kept = read_records(&index).unwrap().records;
    assert!(kept.iter().all(|r| r.source_path == "guide.md"));

    // A second pass finds nothing left to archive.
    let again = condense_packs(&dir.path().join("packs"), &CondenseStrategy::stream()).unwrap();
    assert_eq!(again.total_archived, 0);
    assert_eq!(again.total_kept, per_run);
}

#[test]
fn empty_packs_dir_is_empty_corpus() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        condense_packs(dir.path(), &CondenseStrategy::stream()),
        Err(CondenseError::EmptyCorpus(_))
    ));
}

#[test]
fn lesson_compaction_writes_manifest_and_moves_files() {
    let dir = tempfile::tempdir().unwrap();
    let long = "Prefer small pull requests with a single focus and a clear description.";
    fs::write(dir.path().join("01.yml"), long).unwrap();
    fs::write(dir.path().join("02.yml"), long.to_uppercase()).unwrap();
    fs::write(dir.path().join("03.yml"), "Pin toolchain versions in CI.").unwrap();

    let report = compact_lessons(dir.path(), "yml", &CondenseStrategy::lessons()).unwrap();
    assert_eq!(report.canonical, 2);
    assert_eq!(report.merged.len(), 1);
    assert_eq!(report.merged[0].src, "02.yml");
    assert_eq!(report.merged[0].into, "01.yml");

    assert!(dir.path().join("_archive/02.yml").exists());
    let manifest: LessonManifest =
        serde_json::from_str(&fs::read_to_string(&report.manifest).unwrap()).unwrap();
    assert_eq!(manifest.merged, report.merged);
}
