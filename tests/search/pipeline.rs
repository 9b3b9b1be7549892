//! End to end: corpus directory → artifacts → corrected, ranked queries.

use super::common::{engine_config, file_corpus, systems_corpus, write_corpus_dir};
use fuzzdex::{load_directory, CorpusDocument, Error, Result, SearchEngine};

#[test]
fn test_query_corrects_before_searching() {
    let tmp = tempfile::tempdir().unwrap();
    let engine = SearchEngine::open(&engine_config(tmp.path()), false, || Ok(file_corpus())).unwrap();

    let outcome = engine.query("oepn flie", 2);
    assert_eq!(outcome.corrected, "open file");
    assert_eq!(outcome.hits.len(), 2);
    assert_eq!(outcome.hits[0].document, "doc1");
}

#[test]
fn test_uncorrected_search_uses_raw_terms() {
    let engine = SearchEngine::build(&systems_corpus(), &Default::default());
    let raw = engine.search("kernal", 3);
    let corrected = engine.query("kernal", 3);

    assert_eq!(corrected.corrected, "kernel");
    assert_eq!(corrected.hits[0].document, raw[0].document);
    assert!(corrected.hits[0].score > raw[0].score);
}

#[test]
fn test_corpus_directory_to_results() {
    let tmp = tempfile::tempdir().unwrap();
    let corpus_dir = tmp.path().join("corpus");
    write_corpus_dir(&corpus_dir, &systems_corpus());
    let config = engine_config(tmp.path());

    let engine = SearchEngine::open(&config, true, || load_directory(&corpus_dir)).unwrap();
    let outcome = engine.query("The compilr parses sourse files", 1);

    assert_eq!(outcome.corrected, "the compiler parses source files");
    assert_eq!(outcome.hits[0].document, "compiler");
}

#[test]
fn test_reopen_loads_without_corpus() {
    let tmp = tempfile::tempdir().unwrap();
    let config = engine_config(tmp.path());
    let first = SearchEngine::open(&config, false, || Ok(systems_corpus())).unwrap();

    let second = SearchEngine::open(&config, false, || -> Result<Vec<CorpusDocument>> {
        Err(Error::Corrupt {
            path: "corpus".into(),
            reason: "corpus must not be read again".into(),
        })
    })
    .unwrap();

    assert_eq!(second.query("pgaes", 3), first.query("pgaes", 3));
}

#[test]
fn test_corpus_errors_propagate() {
    let tmp = tempfile::tempdir().unwrap();
    let config = engine_config(tmp.path());
    let missing = tmp.path().join("no-such-corpus");

    let result = SearchEngine::open(&config, true, || load_directory(&missing));
    assert!(matches!(result, Err(Error::Io { .. })));
    assert!(!config.index_dir.exists());
}
