//! Fuzzy term expansion as seen through `find`.

use super::common::{exact, file_corpus, make_corpus, systems_corpus};
use fuzzdex::{edit_distance, round_score, FuzzyMode, IndexConfig, InvertedIndex};

fn names(hits: &[fuzzdex::SearchHit]) -> Vec<&str> {
    hits.iter().map(|h| h.document.as_str()).collect()
}

#[test]
fn test_misspelled_term_matches_both_documents() {
    let index = InvertedIndex::build(&file_corpus(), &IndexConfig::default());
    assert_eq!(edit_distance("fiel", "file"), 2);

    let hits = index.find("fiel", 2);
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.score != 0.0));
}

#[test]
fn test_misspelling_ranks_like_the_correct_term() {
    let index = InvertedIndex::build(&systems_corpus(), &IndexConfig::default());
    assert_eq!(names(&index.find("kernal", 3)), names(&index.find("kernel", 3)));
}

#[test]
fn test_neighbor_weight_is_inverse_distance() {
    let config = IndexConfig {
        max_distance: 1,
        ..IndexConfig::default()
    };
    let index = InvertedIndex::build(&systems_corpus(), &config);
    let exact_contribution = (1.0 / 6.0) * (6.0f64 / 4.0).ln();

    let hits = index.find("kernal", 1);
    assert_eq!(hits[0].document, "kernel");
    assert_eq!(hits[0].score, round_score(exact_contribution * 0.5));
}

#[test]
fn test_zero_distance_is_exact_lookup() {
    let index = InvertedIndex::build(&systems_corpus(), &exact());
    assert!(index.find("kernal", 10).is_empty());
    assert_eq!(index.find("kernel", 10).len(), 3);
}

#[test]
fn test_distance_bound_is_inclusive() {
    let corpus = make_corpus(&[("a", "abcd"), ("b", "zzzz"), ("c", "yyyy")]);
    let at = |max_distance| {
        let config = IndexConfig {
            max_distance,
            ..IndexConfig::default()
        };
        InvertedIndex::build(&corpus, &config).find("abxy", 3)
    };

    assert!(at(1).is_empty());
    assert_eq!(names(&at(2)), vec!["a"]);
}

#[test]
fn test_precomputed_expansion_matches_scan() {
    let corpus = systems_corpus();
    let queries = ["kernal", "pgaes", "compilr", "databse indx", "shel", "xyzzy", "processes"];
    for max_distance in 1..=3 {
        let scan = InvertedIndex::build(
            &corpus,
            &IndexConfig {
                max_distance,
                fuzzy: FuzzyMode::Scan,
            },
        );
        let pre = InvertedIndex::build(
            &corpus,
            &IndexConfig {
                max_distance,
                fuzzy: FuzzyMode::Precomputed,
            },
        );
        for query in queries {
            assert_eq!(
                pre.find(query, 10),
                scan.find(query, 10),
                "query {:?} at distance {}",
                query,
                max_distance
            );
        }
    }
}
