// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy search: typo tolerance via edit distance.
//!
//! A query term is widened into a weighted match set: the term itself with
//! weight 1, plus every vocabulary term `v` within `max_distance` edits with
//! weight `1 / (1 + distance)`.
//!
//! Two strategies produce the same match set:
//!
//! - **Scan**: bounded Levenshtein against every vocabulary term. Linear in
//!   vocabulary size, which is thousands of terms, not corpus size.
//! - **Precomputed**: symmetric-delete neighborhoods built at index time.
//!   Deleting up to `d` characters from both the query term and a vocabulary
//!   term reaches a common string whenever their distance is at most `d`, so
//!   the lookup yields a superset that is then verified with the exact distance.

mod levenshtein;

pub use levenshtein::{bounded_distance, edit_distance, levenshtein_within};

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::config::FuzzyMode;
use crate::neighbors::{EditOps, NeighborMap};

/// One element of a weighted match set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FuzzyMatch {
    pub distance: usize,
    pub term: String,
}

impl FuzzyMatch {
    /// Inverse-distance weight: 1 for the term itself, 1/2 for one edit, ...
    pub fn weight(&self) -> f64 {
        1.0 / (1.0 + self.distance as f64)
    }
}

/// Term expansion strategy, fixed when the index is built or loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum FuzzyExpansion {
    Scan,
    Precomputed(NeighborMap),
}

impl FuzzyExpansion {
    /// Prepare the strategy for `mode` over the given vocabulary.
    pub fn build<'a, I>(mode: FuzzyMode, vocabulary: I, max_distance: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        match mode {
            FuzzyMode::Scan => FuzzyExpansion::Scan,
            FuzzyMode::Precomputed => FuzzyExpansion::Precomputed(NeighborMap::build(
                vocabulary,
                max_distance,
                EditOps::Deletes,
            )),
        }
    }

    pub fn mode(&self) -> FuzzyMode {
        match self {
            FuzzyExpansion::Scan => FuzzyMode::Scan,
            FuzzyExpansion::Precomputed(_) => FuzzyMode::Precomputed,
        }
    }

    /// Weighted match set of `term`, ordered by (distance, term).
    ///
    /// Always contains `term` itself at distance 0, whether or not it is in
    /// the vocabulary. With `max_distance == 0` that is the only element.
    pub fn expand<V>(
        &self,
        term: &str,
        vocabulary: &BTreeMap<String, V>,
        max_distance: usize,
    ) -> Vec<FuzzyMatch> {
        let mut found: BTreeMap<String, usize> = BTreeMap::new();
        found.insert(term.to_string(), 0);

        if max_distance > 0 {
            match self {
                FuzzyExpansion::Scan => {
                    for candidate in vocabulary.keys() {
                        if let Some(distance) = bounded_distance(term, candidate, max_distance) {
                            found.entry(candidate.clone()).or_insert(distance);
                        }
                    }
                }
                FuzzyExpansion::Precomputed(map) => {
                    for candidate in delete_candidates(map, term, vocabulary, max_distance) {
                        if let Some(distance) = bounded_distance(term, candidate, max_distance) {
                            found.entry(candidate.to_string()).or_insert(distance);
                        }
                    }
                }
            }
        }

        let mut matches: Vec<FuzzyMatch> = found
            .into_iter()
            .map(|(term, distance)| FuzzyMatch { distance, term })
            .collect();
        matches.sort();
        matches
    }
}

/// Vocabulary terms sharing a delete-neighborhood string with `term`.
fn delete_candidates<'m, V>(
    map: &'m NeighborMap,
    term: &str,
    vocabulary: &'m BTreeMap<String, V>,
    max_distance: usize,
) -> BTreeSet<&'m str> {
    let mut keys: HashSet<String> = HashSet::from([term.to_string()]);
    for frontier in EditOps::Deletes.frontiers(term, max_distance) {
        keys.extend(frontier);
    }

    let mut candidates = BTreeSet::new();
    for key in &keys {
        if let Some((known, _)) = vocabulary.get_key_value(key.as_str()) {
            candidates.insert(known.as_str());
        }
        candidates.extend(map.all_depths(key).map(String::as_str));
    }
    candidates
}
