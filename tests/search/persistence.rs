//! Saving, loading and rebuilding index directories.

use std::fs;

use super::common::{assert_index_well_formed, file_corpus, systems_corpus, write_corpus_dir};
use fuzzdex::store::artifact_path;
use fuzzdex::{
    inspect, load_directory, ArtifactKind, Error, FuzzyMode, IndexConfig, InvertedIndex,
    StoreConfig,
};

fn precomputed(max_distance: usize) -> IndexConfig {
    IndexConfig {
        max_distance,
        fuzzy: FuzzyMode::Precomputed,
    }
}

#[test]
fn test_roundtrip_preserves_structures_and_results() {
    let tmp = tempfile::tempdir().unwrap();
    for (config, compress) in [
        (IndexConfig::default(), true),
        (IndexConfig::default(), false),
        (precomputed(2), true),
    ] {
        let dir = tmp.path().join(format!("{:?}-{}", config.fuzzy, compress));
        let index = InvertedIndex::build(&systems_corpus(), &config);
        index.save(&dir, &StoreConfig { compress }).unwrap();

        let loaded = InvertedIndex::load(&dir, &config).unwrap();
        assert_index_well_formed(&loaded);
        assert_eq!(loaded, index);
        for query in ["kernal", "pages", "compiler source"] {
            assert_eq!(loaded.find(query, 5), index.find(query, 5));
        }
    }
}

#[test]
fn test_artifacts_are_inspectable() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("index");
    InvertedIndex::build(&file_corpus(), &precomputed(1))
        .save(&dir, &StoreConfig::default())
        .unwrap();

    let expected = [
        ("postings", ArtifactKind::Postings),
        ("term_counts", ArtifactKind::TermCounts),
        ("documents", ArtifactKind::Documents),
        ("lengths", ArtifactKind::Lengths),
        ("manifest", ArtifactKind::IndexManifest),
        ("deletes1", ArtifactKind::DeleteLevel),
    ];
    for (name, kind) in expected {
        let info = inspect(&artifact_path(&dir, name)).unwrap();
        assert_eq!(info.kind, kind, "{}", name);
        assert!(info.compressed);
    }
    assert!(!artifact_path(&dir, "deletes2").exists());
}

#[test]
fn test_scan_index_opened_in_precomputed_mode() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("index");
    let scan = InvertedIndex::build(&file_corpus(), &IndexConfig::default());
    scan.save(&dir, &StoreConfig::default()).unwrap();

    let config = precomputed(3);
    let loaded = InvertedIndex::load(&dir, &config).unwrap();
    assert_eq!(loaded, InvertedIndex::build(&file_corpus(), &config));
}

#[test]
fn test_depth_mismatch_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("index");
    InvertedIndex::build(&file_corpus(), &precomputed(1))
        .save(&dir, &StoreConfig::default())
        .unwrap();

    match InvertedIndex::load(&dir, &precomputed(3)) {
        Err(Error::DepthMismatch {
            stored, configured, ..
        }) => {
            assert_eq!(stored, 1);
            assert_eq!(configured, 3);
        }
        other => panic!("expected depth mismatch, got {:?}", other),
    }
}

#[test]
fn test_corrupted_artifact_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("index");
    InvertedIndex::build(&file_corpus(), &IndexConfig::default())
        .save(&dir, &StoreConfig::default())
        .unwrap();

    let path = artifact_path(&dir, "postings");
    let mut bytes = fs::read(&path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x55;
    fs::write(&path, bytes).unwrap();

    assert!(matches!(
        InvertedIndex::load(&dir, &IndexConfig::default()),
        Err(Error::Corrupt { .. })
    ));
}

#[test]
fn test_missing_directory_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(matches!(
        InvertedIndex::load(&tmp.path().join("absent"), &IndexConfig::default()),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_rebuild_replaces_every_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("index");
    let store = StoreConfig::default();

    InvertedIndex::build(&systems_corpus(), &precomputed(2)).save(&dir, &store).unwrap();
    assert!(artifact_path(&dir, "deletes2").exists());

    let rebuilt = InvertedIndex::open_or_build(&dir, &IndexConfig::default(), &store, true, || {
        Ok(file_corpus())
    })
    .unwrap();

    assert_eq!(rebuilt.document_count(), 2);
    assert!(!artifact_path(&dir, "deletes1").exists());
    assert!(!artifact_path(&dir, "deletes2").exists());
}

#[test]
fn test_open_or_build_from_corpus_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let corpus_dir = tmp.path().join("corpus");
    let dir = tmp.path().join("index");
    write_corpus_dir(&corpus_dir, &systems_corpus());

    let index = InvertedIndex::open_or_build(
        &dir,
        &IndexConfig::default(),
        &StoreConfig::default(),
        false,
        || load_directory(&corpus_dir),
    )
    .unwrap();

    // load_directory sorts by file name
    let names: Vec<&str> = index.documents().values().map(String::as_str).collect();
    assert_eq!(names, vec!["compiler", "database", "filesystem", "kernel", "network", "shell"]);
    assert_eq!(index.find("kernel", 1)[0].document, "kernel");
}
