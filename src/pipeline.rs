// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query pipeline: spelling correction followed by ranked search.
//!
//! [`SearchEngine`] owns one loaded [`SpellCorrector`] and one loaded
//! [`InvertedIndex`]. Both are immutable after [`SearchEngine::open`], so an
//! engine can be shared by reference across threads.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::corpus::CorpusDocument;
use crate::error::Result;
use crate::index::{InvertedIndex, SearchHit};
use crate::spell::SpellCorrector;

/// Result of [`SearchEngine::query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    /// The query as it was actually searched.
    pub corrected: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone)]
pub struct SearchEngine {
    corrector: SpellCorrector,
    index: InvertedIndex,
}

impl SearchEngine {
    pub fn new(corrector: SpellCorrector, index: InvertedIndex) -> Self {
        Self { corrector, index }
    }

    /// Build both structures in memory without touching disk.
    pub fn build(corpus: &[CorpusDocument], config: &EngineConfig) -> Self {
        Self {
            corrector: SpellCorrector::build(corpus, &config.spell),
            index: InvertedIndex::build(corpus, &config.index),
        }
    }

    /// Open (building where needed) the spell dictionary and the index named
    /// by `config`.
    ///
    /// The corpus is enumerated at most once, and only if something has to be
    /// built.
    pub fn open<F>(config: &EngineConfig, force: bool, corpus: F) -> Result<Self>
    where
        F: FnOnce() -> Result<Vec<CorpusDocument>>,
    {
        let needs_build = force || !config.index_dir.exists() || !config.spell_dir.exists();
        let loaded = if needs_build { corpus()? } else { Vec::new() };
        let docs = || -> Result<Vec<CorpusDocument>> { Ok(loaded.clone()) };

        let corrector =
            SpellCorrector::open_or_build(&config.spell_dir, &config.spell, &config.store, force, docs)?;
        let index =
            InvertedIndex::open_or_build(&config.index_dir, &config.index, &config.store, force, docs)?;

        Ok(Self { corrector, index })
    }

    /// Correct `text`, then return the top `k` documents for the correction.
    pub fn query(&self, text: &str, k: usize) -> QueryOutcome {
        let corrected = self.corrector.spell_correction(text);
        if corrected != text {
            tracing::debug!(original = text, corrected = %corrected, "corrected query");
        }
        let hits = self.index.find(&corrected, k);
        QueryOutcome { corrected, hits }
    }

    /// Search `text` as given, without spelling correction.
    pub fn search(&self, text: &str, k: usize) -> Vec<SearchHit> {
        self.index.find(text, k)
    }

    pub fn corrector(&self) -> &SpellCorrector {
        &self.corrector
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}
