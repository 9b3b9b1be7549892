//! Structural and ranking properties of the inverted index.

use super::common::assert_index_well_formed;
use super::{corpus_strategy, word_strategy};
use fuzzdex::{FuzzyMode, IndexConfig, InvertedIndex, StoreConfig};
use proptest::prelude::*;

fn config(max_distance: usize, fuzzy: FuzzyMode) -> IndexConfig {
    IndexConfig {
        max_distance,
        fuzzy,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Lengths equal summed counts, postings mirror nonzero counts, ids are dense.
    #[test]
    fn prop_built_index_well_formed(corpus in corpus_strategy()) {
        let index = InvertedIndex::build(&corpus, &IndexConfig::default());
        prop_assert_eq!(index.document_count(), corpus.len());
        assert_index_well_formed(&index);
    }

    /// Same index, same query, same answer.
    #[test]
    fn prop_find_deterministic(corpus in corpus_strategy(), query in word_strategy(), k in 0usize..8) {
        let index = InvertedIndex::build(&corpus, &IndexConfig::default());
        let first = index.find(&query, k);
        prop_assert!(first.len() <= k);
        prop_assert_eq!(index.find(&query, k), first);
    }

    /// Results are ordered by score, then by ascending document id.
    #[test]
    fn prop_find_ordered(corpus in corpus_strategy(), a in word_strategy(), b in word_strategy()) {
        let index = InvertedIndex::build(&corpus, &IndexConfig::default());
        let hits = index.find(&format!("{} {}", a, b), 10);
        for pair in hits.windows(2) {
            prop_assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id)
            );
        }
    }

    /// Symmetric-delete lookup finds exactly what a full scan finds.
    #[test]
    fn prop_precomputed_equals_scan(
        corpus in corpus_strategy(),
        query in word_strategy(),
        max_distance in 0usize..3,
    ) {
        let scan = InvertedIndex::build(&corpus, &config(max_distance, FuzzyMode::Scan));
        let pre = InvertedIndex::build(&corpus, &config(max_distance, FuzzyMode::Precomputed));
        prop_assert_eq!(pre.find(&query, 10), scan.find(&query, 10));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// build → save → load gives back the same structures.
    #[test]
    fn prop_persist_roundtrip(corpus in corpus_strategy(), compress: bool, precomputed: bool) {
        let fuzzy = if precomputed { FuzzyMode::Precomputed } else { FuzzyMode::Scan };
        let index_config = config(2, fuzzy);
        let index = InvertedIndex::build(&corpus, &index_config);

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("index");
        index.save(&dir, &StoreConfig { compress }).unwrap();
        let loaded = InvertedIndex::load(&dir, &index_config).unwrap();

        prop_assert_eq!(&loaded, &index);
        assert_index_well_formed(&loaded);
    }
}
