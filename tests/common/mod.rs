//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use fuzzdex::{CorpusDocument, EngineConfig, IndexConfig, InvertedIndex};

// Re-export canonical test utilities from fuzzdex::testing
pub use fuzzdex::testing::{file_corpus, make_corpus, systems_corpus};

// ============================================================================
// CONFIGURATIONS
// ============================================================================

/// Engine config whose artifact directories live under `root`.
pub fn engine_config(root: &Path) -> EngineConfig {
    EngineConfig {
        index_dir: root.join("index"),
        spell_dir: root.join("spell"),
        ..EngineConfig::default()
    }
}

/// Index config with fuzzy expansion switched off.
pub fn exact() -> IndexConfig {
    IndexConfig {
        max_distance: 0,
        ..IndexConfig::default()
    }
}

// ============================================================================
// CORPUS DIRECTORIES
// ============================================================================

/// Write each document to `<dir>/<name>.txt`.
pub fn write_corpus_dir(dir: &Path, docs: &[CorpusDocument]) {
    fs::create_dir_all(dir).unwrap();
    for doc in docs {
        fs::write(dir.join(format!("{}.txt", doc.name)), &doc.text).unwrap();
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Check the structural invariants every built or loaded index must satisfy.
pub fn assert_index_well_formed(index: &InvertedIndex) {
    let n = index.document_count();
    let ids: Vec<u32> = index.documents().keys().copied().collect();
    let expected: Vec<u32> = (0..n as u32).collect();
    assert_eq!(ids, expected, "document ids must be dense");

    for (doc, len) in index.lengths() {
        let sum: u32 = index
            .term_counts()
            .get(doc)
            .map(|counts| counts.values().sum())
            .unwrap_or(0);
        assert_eq!(*len, sum, "length of document {} differs from its term counts", doc);
    }

    for (term, docs) in index.postings() {
        assert!(!docs.is_empty(), "empty posting list for {}", term);
        for doc in docs {
            assert!(index.term_count(*doc, term) > 0, "{} listed for {} without a count", doc, term);
        }
    }

    for (doc, counts) in index.term_counts() {
        for (term, count) in counts {
            assert!(*count > 0);
            assert!(
                index.postings().get(term).is_some_and(|docs| docs.contains(doc)),
                "{} counted in {} but missing from postings",
                term,
                doc
            );
        }
    }
}
