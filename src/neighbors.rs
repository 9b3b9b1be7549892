// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Precomputed edit neighborhoods.
//!
//! Both the fuzzy index and the spell corrector can trade build time and
//! memory for constant-time lookups at query time. The trick is the same in
//! both places: for every known word, generate everything reachable within
//! `depth` single-character edits, then invert the relation so each generated
//! string points back at the words that produced it.
//!
//! Two edit generators:
//!
//! | Ops       | Edits per step                                  | Used by        |
//! |-----------|-------------------------------------------------|----------------|
//! | `Norvig`  | delete, adjacent transpose, a-z replace/insert  | spell corrector|
//! | `Deletes` | delete only (symmetric-delete lookup)            | fuzzy index    |
//!
//! The frontier at depth `d` is generated from the *unfiltered* frontier at
//! depth `d - 1`, so it also contains strings reachable in fewer steps (delete
//! then re-insert). That matches on-the-fly candidate generation exactly.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Alphabet for substitutions and insertions.
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Single-edit generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOps {
    Norvig,
    Deletes,
}

impl EditOps {
    /// Every string one edit away from `word`.
    pub fn single_edits(self, word: &str) -> HashSet<String> {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        let mut out = HashSet::new();

        let join = |parts: &[&[char]]| -> String { parts.iter().flat_map(|p| p.iter()).collect() };

        for i in 0..n {
            out.insert(join(&[&chars[..i], &chars[i + 1..]]));
        }
        if self == EditOps::Deletes {
            return out;
        }

        for i in 0..n.saturating_sub(1) {
            let swapped = [chars[i + 1], chars[i]];
            out.insert(join(&[&chars[..i], &swapped[..], &chars[i + 2..]]));
        }
        for letter in LETTERS.chars() {
            let one = [letter];
            for i in 0..n {
                out.insert(join(&[&chars[..i], &one[..], &chars[i + 1..]]));
            }
            for i in 0..=n {
                out.insert(join(&[&chars[..i], &one[..], &chars[i..]]));
            }
        }
        out
    }

    /// Apply one more edit to every string in `frontier`.
    pub fn expand(self, frontier: &HashSet<String>) -> HashSet<String> {
        let mut next = HashSet::new();
        for word in frontier {
            next.extend(self.single_edits(word));
        }
        next
    }

    /// Frontiers at depth `1..=depth`: `frontiers(w, d)[k]` holds the strings
    /// generated by `k + 1` rounds of edits starting from `w`.
    pub fn frontiers(self, word: &str, depth: usize) -> Vec<HashSet<String>> {
        let mut levels = Vec::with_capacity(depth);
        let mut frontier: HashSet<String> = HashSet::from([word.to_string()]);
        for _ in 0..depth {
            frontier = self.expand(&frontier);
            levels.push(frontier.clone());
        }
        levels
    }
}

/// One inverted depth of a [`NeighborMap`]: generated string → source words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborLevel {
    pub ops: EditOps,
    /// 1-based edit depth this level was generated at
    pub depth: usize,
    pub entries: HashMap<String, BTreeSet<String>>,
}

/// Inverted edit neighborhoods of a word list, one level per depth.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborMap {
    ops: EditOps,
    levels: Vec<NeighborLevel>,
}

impl NeighborMap {
    /// Build neighborhoods up to `depth` for every word.
    pub fn build<'a, I>(words: I, depth: usize, ops: EditOps) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words: Vec<&str> = words.into_iter().collect();
        let mut levels: Vec<NeighborLevel> = (1..=depth)
            .map(|d| NeighborLevel {
                ops,
                depth: d,
                entries: HashMap::new(),
            })
            .collect();

        for (word, frontiers) in word_frontiers(&words, depth, ops) {
            for (level, frontier) in levels.iter_mut().zip(frontiers) {
                for generated in frontier {
                    level
                        .entries
                        .entry(generated)
                        .or_default()
                        .insert(word.to_string());
                }
            }
        }

        tracing::debug!(
            words = words.len(),
            depth,
            entries = levels.iter().map(|l| l.entries.len()).sum::<usize>(),
            "built neighbor map"
        );

        Self { ops, levels }
    }

    /// Reassemble a map from persisted levels.
    ///
    /// Returns `None` unless the levels are exactly depths `1..=n` generated by `ops`.
    pub fn from_levels(ops: EditOps, levels: Vec<NeighborLevel>) -> Option<Self> {
        let well_formed = levels
            .iter()
            .enumerate()
            .all(|(i, level)| level.depth == i + 1 && level.ops == ops);
        well_formed.then_some(Self { ops, levels })
    }

    pub fn ops(&self) -> EditOps {
        self.ops
    }

    /// Maximum edit depth recorded in this map.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[NeighborLevel] {
        &self.levels
    }

    /// Words whose depth-`depth` frontier contains `generated`.
    pub fn at_depth(&self, generated: &str, depth: usize) -> Option<&BTreeSet<String>> {
        depth
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .and_then(|level| level.entries.get(generated))
    }

    /// Shallowest depth at which `generated` is reachable, with its source words.
    pub fn nearest(&self, generated: &str) -> Option<(usize, &BTreeSet<String>)> {
        self.levels
            .iter()
            .find_map(|level| level.entries.get(generated).map(|words| (level.depth, words)))
    }

    /// Source words reachable from `generated` at any depth.
    pub fn all_depths<'a>(&'a self, generated: &str) -> impl Iterator<Item = &'a String> + 'a {
        let hits: Vec<&'a BTreeSet<String>> = self
            .levels
            .iter()
            .filter_map(|level| level.entries.get(generated))
            .collect();
        hits.into_iter().flatten()
    }
}

#[cfg(not(feature = "parallel"))]
fn word_frontiers<'a>(
    words: &[&'a str],
    depth: usize,
    ops: EditOps,
) -> Vec<(&'a str, Vec<HashSet<String>>)> {
    words
        .iter()
        .map(|&word| (word, ops.frontiers(word, depth)))
        .collect()
}

/// Expand every word in parallel. Output order follows `words`, so the
/// merged map is the same as the sequential build.
#[cfg(feature = "parallel")]
fn word_frontiers<'a>(
    words: &[&'a str],
    depth: usize,
    ops: EditOps,
) -> Vec<(&'a str, Vec<HashSet<String>>)> {
    let progress = crate::progress::bar(words.len(), "Neighbors");
    let counter = AtomicUsize::new(0);

    let frontiers = words
        .par_iter()
        .map(|&word| {
            let expanded = ops.frontiers(word, depth);
            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            (word, expanded)
        })
        .collect();

    progress.finish_and_clear();
    frontiers
}
