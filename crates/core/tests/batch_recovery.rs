//! Standalone recovery over a directory of manifests.

use audiokeep_core::testing::{fixtures, MockTagger, MockTranscoder};
use audiokeep_core::{run_batch, AudioExtractor, BatchSummary, Config, RecoveryConfig};
use tempfile::TempDir;

#[test]
fn test_unresolved_manifest_is_skipped() {
    let dir = TempDir::new().unwrap();
    for (stem, id) in [("First [aaa]", "aaa"), ("Second [bbb]", "bbb"), ("Third [ccc]", "ccc")] {
        let manifest = fixtures::manifest_json(id, stem, "Channel X");
        fixtures::write_manifest(dir.path(), stem, &manifest).unwrap();
        fixtures::write_file(&dir.path().join(format!("{}.f140.m4a", stem)), "audio").unwrap();
    }
    fixtures::write_file(&dir.path().join("First [aaa].mkv"), "merged").unwrap();
    fixtures::write_file(&dir.path().join("Third [ccc].mp4"), "merged").unwrap();

    let extractor =
        AudioExtractor::new(&Config::default(), MockTranscoder::new(), MockTagger::new());
    let summary = run_batch(dir.path(), false, &extractor, &RecoveryConfig::default()).unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            processed: 2,
            skipped: 1,
            failed: 0
        }
    );
    assert!(dir.path().join("First [aaa].m4a").exists());
    assert!(!dir.path().join("Second [bbb].m4a").exists());
    assert!(dir.path().join("Third [ccc].m4a").exists());
}

#[test]
fn test_recursive_batch_and_rerun() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("channel").join("2024");
    let manifest = fixtures::manifest_json("ddd", "Deep", "Channel X");
    fixtures::write_file(&nested.join("Deep [ddd].info.json"), manifest.to_string()).unwrap();
    fixtures::write_file(&nested.join("Deep [ddd].webm"), "merged").unwrap();
    fixtures::write_file(&nested.join("Deep [ddd].f140.m4a"), "audio").unwrap();

    let transcoder = MockTranscoder::new();
    let extractor = AudioExtractor::new(&Config::default(), transcoder.clone(), MockTagger::new());
    let recovery = RecoveryConfig::default();

    let flat = run_batch(dir.path(), false, &extractor, &recovery).unwrap();
    assert_eq!(flat.total(), 0);

    let deep = run_batch(dir.path(), true, &extractor, &recovery).unwrap();
    assert_eq!(deep.processed, 1);
    assert!(nested.join("Deep [ddd].m4a").exists());

    let again = run_batch(dir.path(), true, &extractor, &recovery).unwrap();
    assert_eq!(again.processed, 1);
    assert_eq!(transcoder.invocation_count(), 1);
}

#[test]
fn test_thumbnail_paths_are_relocated() {
    let dir = TempDir::new().unwrap();
    let mut manifest = fixtures::manifest_json("eee", "Moved", "Channel X");
    manifest["thumbnails"] = serde_json::json!([
        {"url": "https://i.example.com/eee/hq.webp", "filepath": "/gone/session/Moved [eee].webp"}
    ]);
    fixtures::write_manifest(dir.path(), "Moved [eee]", &manifest).unwrap();
    fixtures::write_file(&dir.path().join("Moved [eee].mkv"), "merged").unwrap();
    fixtures::write_file(&dir.path().join("Moved [eee].webp"), "webp").unwrap();
    fixtures::write_file(&dir.path().join("Moved [eee].f140.m4a"), "audio").unwrap();

    let transcoder = MockTranscoder::new();
    let extractor = AudioExtractor::new(&Config::default(), transcoder.clone(), MockTagger::new());
    let summary = run_batch(dir.path(), false, &extractor, &RecoveryConfig::default()).unwrap();
    assert_eq!(summary.processed, 1);

    let runs = transcoder.recorded_invocations();
    assert!(runs[0].is_cover_conversion());
    assert_eq!(
        runs[0].value_after("-i"),
        dir.path().join("Moved [eee].webp").to_str()
    );
}
