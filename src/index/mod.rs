// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction and ranked fuzzy search.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **LENGTH_IS_SUM**: a document's length equals the sum of its term counts
//! 2. **POSTING_IFF_COUNT**: `d ∈ postings[t]` iff `term_counts[d][t] > 0`
//! 3. **DENSE_IDS**: document ids are `0..n` in corpus enumeration order
//!
//! All four structures come out of one build pass and are only meaningful
//! together. Rebuilding replaces them all.
//!
//! # Scoring
//!
//! For each query term, each member `v` of its weighted match set (see
//! [`crate::fuzzy`]) that has a posting list contributes, to every document
//! `d` in that list:
//!
//! ```text
//! tf(d, v) · idf(v) · weight(v)
//!
//! tf(d, v) = count(d, v) / length(d)
//! idf(v)   = ln(N / (1 + df(v)))
//! ```
//!
//! `idf` goes negative once a term is in more than `N - 1` documents. That is
//! kept as is: very common terms pull a document down rather than up.

mod persist;

pub use persist::IndexManifest;

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use serde::Serialize;

use crate::config::IndexConfig;
use crate::corpus::CorpusDocument;
use crate::fuzzy::FuzzyExpansion;
use crate::tokenize::tokenize;

/// Dense document id, assigned in corpus order. Stable only within one build.
pub type DocId = u32;

/// Decimal places kept in reported scores.
pub const SCORE_PRECISION: i32 = 5;

/// Round a score up (toward +∞) at [`SCORE_PRECISION`] decimal places.
///
/// Negative scores that round to zero come back as `+0.0`, so they tie with
/// documents that scored exactly zero.
pub fn round_score(score: f64) -> f64 {
    let scale = 10f64.powi(SCORE_PRECISION);
    let rounded = (score * scale).ceil() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub document: String,
    pub score: f64,
}

/// Term → documents containing it.
pub type Postings = BTreeMap<String, BTreeSet<DocId>>;

/// Document → term → occurrences in that document.
pub type TermCounts = BTreeMap<DocId, BTreeMap<String, u32>>;

#[derive(Debug, Clone, PartialEq)]
pub struct InvertedIndex {
    postings: Postings,
    term_counts: TermCounts,
    documents: BTreeMap<DocId, String>,
    lengths: BTreeMap<DocId, u32>,
    config: IndexConfig,
    expansion: FuzzyExpansion,
}

impl InvertedIndex {
    /// Build an index over `corpus`. Document ids follow iteration order.
    pub fn build<'a, I>(corpus: I, config: &IndexConfig) -> Self
    where
        I: IntoIterator<Item = &'a CorpusDocument>,
    {
        let started = Instant::now();
        let docs: Vec<&CorpusDocument> = corpus.into_iter().collect();
        let tokenized = tokenize_all(&docs);

        let mut postings = Postings::new();
        let mut term_counts = TermCounts::new();
        let mut documents = BTreeMap::new();
        let mut lengths = BTreeMap::new();

        for (id, (doc, terms)) in docs.iter().zip(tokenized).enumerate() {
            let id = id as DocId;
            documents.insert(id, doc.name.clone());
            lengths.insert(id, terms.len() as u32);

            let counts = term_counts.entry(id).or_insert_with(BTreeMap::new);
            for term in terms {
                postings.entry(term.clone()).or_default().insert(id);
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let expansion = FuzzyExpansion::build(
            config.fuzzy,
            postings.keys().map(String::as_str),
            config.max_distance,
        );

        tracing::info!(
            documents = documents.len(),
            terms = postings.len(),
            fuzzy = ?config.fuzzy,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built inverted index"
        );

        Self {
            postings,
            term_counts,
            documents,
            lengths,
            config: config.clone(),
            expansion,
        }
    }

    /// Top `k` documents for `query`, best first.
    ///
    /// Ties on the (rounded) score are broken by ascending document id.
    /// An empty query, `k == 0`, or nothing matching yields an empty vector.
    pub fn find(&self, query: &str, k: usize) -> Vec<SearchHit> {
        if k == 0 {
            return Vec::new();
        }
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let total_docs = self.documents.len() as f64;
        let mut scores: BTreeMap<DocId, f64> = BTreeMap::new();

        for term in &terms {
            let matches = self
                .expansion
                .expand(term, &self.postings, self.config.max_distance);
            tracing::debug!(term = %term, matches = matches.len(), "expanded query term");

            for candidate in &matches {
                let Some(docs) = self.postings.get(&candidate.term) else {
                    continue;
                };
                let idf = (total_docs / (1.0 + docs.len() as f64)).ln();
                let weight = candidate.weight();

                for &doc in docs {
                    let tf = self.term_frequency(doc, &candidate.term);
                    *scores.entry(doc).or_insert(0.0) += tf * idf * weight;
                }
            }
        }

        let mut ranked: Vec<(DocId, f64)> = scores
            .into_iter()
            .map(|(doc, score)| (doc, round_score(score)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(k);

        ranked
            .into_iter()
            .map(|(doc_id, score)| SearchHit {
                doc_id,
                document: self.documents.get(&doc_id).cloned().unwrap_or_default(),
                score,
            })
            .collect()
    }

    /// Occurrences of `term` in `doc` divided by the document's length.
    pub fn term_frequency(&self, doc: DocId, term: &str) -> f64 {
        let count = self.term_count(doc, term);
        match self.lengths.get(&doc) {
            Some(&len) if len > 0 => f64::from(count) / f64::from(len),
            _ => 0.0,
        }
    }

    pub fn term_count(&self, doc: DocId, term: &str) -> u32 {
        self.term_counts
            .get(&doc)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, BTreeSet::len)
    }

    pub fn postings(&self) -> &Postings {
        &self.postings
    }

    pub fn term_counts(&self) -> &TermCounts {
        &self.term_counts
    }

    pub fn documents(&self) -> &BTreeMap<DocId, String> {
        &self.documents
    }

    pub fn lengths(&self) -> &BTreeMap<DocId, u32> {
        &self.lengths
    }

    /// Distinct indexed terms, sorted.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn expansion(&self) -> &FuzzyExpansion {
        &self.expansion
    }
}

#[cfg(feature = "parallel")]
fn tokenize_all(docs: &[&CorpusDocument]) -> Vec<Vec<String>> {
    use rayon::prelude::*;
    docs.par_iter().map(|doc| tokenize(&doc.text)).collect()
}

#[cfg(not(feature = "parallel"))]
fn tokenize_all(docs: &[&CorpusDocument]) -> Vec<Vec<String>> {
    docs.iter().map(|doc| tokenize(&doc.text)).collect()
}
