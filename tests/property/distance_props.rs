//! Edit distance against the strsim reference implementation.

use fuzzdex::fuzzy::{bounded_distance, edit_distance, levenshtein_within};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Differential test: edit_distance matches strsim::levenshtein.
    #[test]
    fn diff_edit_distance(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
        prop_assert_eq!(edit_distance(&a, &b), strsim::levenshtein(&a, &b));
    }

    /// Differential test: bounded_distance is the oracle distance when within bound.
    #[test]
    fn diff_bounded_distance(a in "[a-z]{0,12}", b in "[a-z]{0,12}", max in 0usize..5) {
        let oracle = strsim::levenshtein(&a, &b);
        let expected = (oracle <= max).then_some(oracle);
        prop_assert_eq!(bounded_distance(&a, &b, max), expected);
        prop_assert_eq!(levenshtein_within(&a, &b, max), oracle <= max);
    }

    #[test]
    fn prop_distance_symmetric(a in "\\PC{0,10}", b in "\\PC{0,10}") {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn prop_distance_zero_iff_equal(a in "[a-c]{0,6}", b in "[a-c]{0,6}") {
        prop_assert_eq!(edit_distance(&a, &a), 0);
        prop_assert_eq!(edit_distance(&a, &b) == 0, a == b);
    }

    #[test]
    fn prop_triangle_inequality(a in "[a-d]{0,8}", b in "[a-d]{0,8}", c in "[a-d]{0,8}") {
        prop_assert!(edit_distance(&a, &c) <= edit_distance(&a, &b) + edit_distance(&b, &c));
    }

    /// A bound that admits (a, b) and (b, c) admits (a, c) at their sum.
    #[test]
    fn prop_bound_composes(a in "[a-d]{0,8}", b in "[a-d]{0,8}", c in "[a-d]{0,8}", m in 0usize..4) {
        if levenshtein_within(&a, &b, m) && levenshtein_within(&b, &c, m) {
            prop_assert!(levenshtein_within(&a, &c, 2 * m));
        }
    }

    /// Unicode strings count characters, not bytes.
    #[test]
    fn diff_edit_distance_unicode(
        a in prop::sample::select(vec!["café", "cafe", "naïve", "résumé", "über", "tōkyō", "hello"]),
        b in prop::sample::select(vec!["café", "cafe", "naïve", "résumé", "über", "tōkyō", "hello"]),
    ) {
        prop_assert_eq!(edit_distance(a, b), strsim::levenshtein(a, b));
    }
}
