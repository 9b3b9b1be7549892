// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config file.
//! The strategy enums ([`FuzzyMode`], [`CandidateMode`]) are read once when a
//! structure is built or loaded and never consulted again by string.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default maximum Levenshtein distance for fuzzy term expansion.
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Default maximum edit depth for spelling candidates.
pub const DEFAULT_MAX_EDITS: usize = 2;

/// How the index widens a query term into vocabulary terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyMode {
    /// Compare against every vocabulary term at query time.
    #[default]
    Scan,
    /// Precompute symmetric-delete neighborhoods at build time.
    Precomputed,
}

/// How the spell corrector finds candidates for an unknown word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateMode {
    /// Generate edits of the query word on the fly.
    #[default]
    Edits,
    /// Look the word up in neighborhoods precomputed from the dictionary.
    Precomputed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Terms within this Levenshtein distance of a query term also match.
    /// Zero disables fuzzy expansion.
    pub max_distance: usize,
    pub fuzzy: FuzzyMode,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            fuzzy: FuzzyMode::Scan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    pub max_edits: usize,
    pub candidates: CandidateMode,
    /// Emit stop words verbatim during whole-text correction (otherwise drop them).
    pub keep_stop_words: bool,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            max_edits: DEFAULT_MAX_EDITS,
            candidates: CandidateMode::Edits,
            keep_stop_words: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Brotli-compress artifact payloads.
    pub compress: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { compress: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub index_dir: PathBuf,
    pub spell_dir: PathBuf,
    pub index: IndexConfig,
    pub spell: SpellConfig,
    pub store: StoreConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            index_dir: PathBuf::from("data/index"),
            spell_dir: PathBuf::from("data/spell"),
            index: IndexConfig::default(),
            spell: SpellConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
