// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Frequency-based spelling correction.
//!
//! The dictionary is every non-stopword term of the corpus with its global
//! occurrence count. A word already in the dictionary is left alone. Any
//! other word is replaced by its most frequent known neighbor at the smallest
//! edit depth that has one, or returned unchanged if there is none within
//! `max_edits`.
//!
//! # Candidate sources
//!
//! | Source        | Cost at query time            | Cost at build time           |
//! |---------------|-------------------------------|------------------------------|
//! | `Edits`       | ~54n strings per depth level  | none                         |
//! | `Precomputed` | one hash lookup per level     | full Norvig frontiers per word |
//!
//! Both give the same answers for words over `a-z`. Outside that alphabet
//! they can differ: edits only ever insert or substitute `a-z`, so a
//! dictionary word containing a digit can reach a query word that cannot
//! reach it back.
//!
//! # Tie-breaking
//!
//! Among equally frequent candidates the lexicographically smallest wins.

mod persist;

pub use persist::SpellSettings;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::time::Instant;

use crate::config::{CandidateMode, SpellConfig};
use crate::corpus::CorpusDocument;
use crate::neighbors::{EditOps, NeighborMap};
use crate::tokenize::{is_stop_word, query_tokens, tokenize, Token};

/// Where candidate corrections come from. Fixed at build or load time.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateSource {
    Edits,
    Precomputed(NeighborMap),
}

impl CandidateSource {
    pub fn mode(&self) -> CandidateMode {
        match self {
            CandidateSource::Edits => CandidateMode::Edits,
            CandidateSource::Precomputed(_) => CandidateMode::Precomputed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpellCorrector {
    counter: BTreeMap<String, u64>,
    total: u64,
    config: SpellConfig,
    source: CandidateSource,
}

impl SpellCorrector {
    /// Count every non-stopword term of `corpus`.
    ///
    /// Non-ASCII characters are treated as separators, so the dictionary only
    /// ever holds ASCII words.
    pub fn build<'a, I>(corpus: I, config: &SpellConfig) -> Self
    where
        I: IntoIterator<Item = &'a CorpusDocument>,
    {
        let started = Instant::now();
        let docs: Vec<&CorpusDocument> = corpus.into_iter().collect();
        let counter = count_terms(&docs);
        let corrector = Self::from_counts(counter, config);

        tracing::info!(
            words = corrector.counter.len(),
            total = corrector.total,
            mode = ?config.candidates,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built spell dictionary"
        );
        corrector
    }

    /// Build directly from a frequency dictionary.
    pub fn from_counts(counter: BTreeMap<String, u64>, config: &SpellConfig) -> Self {
        let source = match config.candidates {
            CandidateMode::Edits => CandidateSource::Edits,
            CandidateMode::Precomputed => CandidateSource::Precomputed(NeighborMap::build(
                counter.keys().map(String::as_str),
                config.max_edits,
                EditOps::Norvig,
            )),
        };
        let total = counter.values().sum();
        Self {
            counter,
            total,
            config: config.clone(),
            source,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counter.contains_key(word)
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counter.get(word).copied().unwrap_or(0)
    }

    /// `count(word) / total`, zero for unknown words or an empty dictionary.
    pub fn probability(&self, word: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total as f64
    }

    /// Known words at the smallest edit depth that has any, sorted.
    ///
    /// Returns `[word]` when nothing is known within `max_edits`.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        let found = match &self.source {
            CandidateSource::Edits => self.edit_candidates(word),
            CandidateSource::Precomputed(map) => {
                map.nearest(word).map(|(depth, words)| (depth, words.clone()))
            }
        };

        match found {
            Some((depth, words)) => {
                tracing::debug!(word, depth, candidates = words.len(), "spelling candidates");
                words.into_iter().collect()
            }
            None => vec![word.to_string()],
        }
    }

    fn edit_candidates(&self, word: &str) -> Option<(usize, BTreeSet<String>)> {
        let mut frontier: HashSet<String> = HashSet::from([word.to_string()]);
        for depth in 1..=self.config.max_edits {
            frontier = EditOps::Norvig.expand(&frontier);
            let known: BTreeSet<String> =
                frontier.iter().filter(|w| self.contains(w)).cloned().collect();
            if !known.is_empty() {
                return Some((depth, known));
            }
        }
        None
    }

    /// Best correction for a single word.
    pub fn correct_word(&self, word: &str) -> String {
        if self.contains(word) {
            return word.to_string();
        }
        // candidates() is sorted, so max_by_key's last-wins rule needs the reversed order
        self.candidates(word)
            .into_iter()
            .rev()
            .max_by_key(|w| self.count(w))
            .unwrap_or_else(|| word.to_string())
    }

    /// Correct every word of `text` independently.
    ///
    /// Punctuation is attached to the preceding word. Stop words pass through
    /// unchanged, or are dropped when `keep_stop_words` is off. The result is
    /// lower-case and single-spaced.
    pub fn spell_correction(&self, text: &str) -> String {
        let mut out = String::new();
        for token in query_tokens(text) {
            match token {
                Token::Punct(p) => {
                    if out.ends_with(' ') {
                        out.pop();
                    }
                    out.push_str(&p);
                }
                Token::Word(w) if is_stop_word(&w) => {
                    if !self.config.keep_stop_words {
                        continue;
                    }
                    out.push_str(&w);
                }
                Token::Word(w) => out.push_str(&self.correct_word(&w)),
            }
            out.push(' ');
        }
        out.trim().to_string()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn dictionary(&self) -> &BTreeMap<String, u64> {
        &self.counter
    }

    pub fn config(&self) -> &SpellConfig {
        &self.config
    }

    pub fn source(&self) -> &CandidateSource {
        &self.source
    }
}

fn ascii_terms(text: &str) -> Vec<String> {
    let ascii: String = text
        .chars()
        .map(|c| if c.is_ascii() { c } else { ' ' })
        .collect();
    tokenize(&ascii)
}

#[cfg(feature = "parallel")]
fn count_terms(docs: &[&CorpusDocument]) -> BTreeMap<String, u64> {
    use rayon::prelude::*;
    docs.par_iter()
        .map(|doc| ascii_terms(&doc.text))
        .fold(BTreeMap::new, |mut acc, terms| {
            for term in terms {
                *acc.entry(term).or_insert(0) += 1;
            }
            acc
        })
        .reduce(BTreeMap::new, |mut a, b| {
            for (term, n) in b {
                *a.entry(term).or_insert(0) += n;
            }
            a
        })
}

#[cfg(not(feature = "parallel"))]
fn count_terms(docs: &[&CorpusDocument]) -> BTreeMap<String, u64> {
    let mut counter = BTreeMap::new();
    for doc in docs {
        for term in ascii_terms(&doc.text) {
            *counter.entry(term).or_insert(0) += 1;
        }
    }
    counter
}
