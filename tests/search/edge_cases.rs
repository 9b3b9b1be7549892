//! Inputs that must produce well-defined empty or ordinary results.

use super::common::{assert_index_well_formed, file_corpus, make_corpus};
use fuzzdex::{CorpusDocument, IndexConfig, InvertedIndex};

#[test]
fn test_empty_query_returns_nothing() {
    let index = InvertedIndex::build(&file_corpus(), &IndexConfig::default());
    assert!(index.find("", 5).is_empty());
    assert!(index.find("   \t\n", 5).is_empty());
    assert!(index.find("?!,.", 5).is_empty());
}

#[test]
fn test_stop_word_query_returns_nothing() {
    let index = InvertedIndex::build(&file_corpus(), &IndexConfig::default());
    assert!(index.find("the and of which", 5).is_empty());
}

#[test]
fn test_zero_k_returns_nothing() {
    let index = InvertedIndex::build(&file_corpus(), &IndexConfig::default());
    assert!(index.find("file", 0).is_empty());
}

#[test]
fn test_query_is_case_insensitive() {
    let index = InvertedIndex::build(&file_corpus(), &IndexConfig::default());
    assert_eq!(index.find("FILE Mode", 5), index.find("file mode", 5));
}

#[test]
fn test_empty_corpus() {
    let index = InvertedIndex::build(&Vec::<CorpusDocument>::new(), &IndexConfig::default());
    assert_eq!(index.document_count(), 0);
    assert!(index.find("anything", 5).is_empty());
    assert_index_well_formed(&index);
}

#[test]
fn test_documents_without_terms() {
    let corpus = make_corpus(&[("blank", ""), ("stops", "the of and"), ("real", "kernel")]);
    let index = InvertedIndex::build(&corpus, &IndexConfig::default());

    assert_index_well_formed(&index);
    assert_eq!(index.document_count(), 3);
    let hits = index.find("kernel", 5);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document, "real");
}

#[test]
fn test_unicode_terms() {
    let corpus = make_corpus(&[
        ("fr", "Café crème brûlée"),
        ("en", "coffee cream"),
        ("de", "kaffee sahne"),
    ]);
    let index = InvertedIndex::build(&corpus, &IndexConfig::default());
    assert_eq!(index.term_count(0, "café"), 1);

    let hits = index.find("CAFÉ", 3);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document, "fr");
    assert!(hits[0].score > 0.0);
}

#[test]
fn test_duplicate_document_names_keep_distinct_ids() {
    let corpus = make_corpus(&[("same", "alpha"), ("same", "beta")]);
    let index = InvertedIndex::build(&corpus, &IndexConfig::default());
    assert_eq!(index.document_count(), 2);
    assert_index_well_formed(&index);
}
