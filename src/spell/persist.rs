// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Spell directory: save, load and open-or-build.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CandidateSource, SpellCorrector};
use crate::config::{CandidateMode, SpellConfig, StoreConfig};
use crate::corpus::CorpusDocument;
use crate::error::{Error, Result};
use crate::neighbors::{EditOps, NeighborLevel, NeighborMap};
use crate::store::{artifact_path, read_artifact, replace_dir, write_artifact, ArtifactKind};

const COUNTER: &str = "counter";
const SETTINGS: &str = "settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSettings {
    pub total: u64,
    pub max_edits: usize,
    /// Whether `distance{d}` levels were written for `1..=max_edits`.
    pub precomputed: bool,
}

fn level_name(depth: usize) -> String {
    format!("distance{}", depth)
}

impl SpellCorrector {
    pub fn settings(&self) -> SpellSettings {
        SpellSettings {
            total: self.total,
            max_edits: self.config.max_edits,
            precomputed: matches!(self.source, CandidateSource::Precomputed(_)),
        }
    }

    /// Write the dictionary (and neighborhoods, if any) to `dir`, replacing it.
    pub fn save(&self, dir: &Path, store: &StoreConfig) -> Result<()> {
        replace_dir(dir, |staging| {
            write_artifact(
                &artifact_path(staging, COUNTER),
                ArtifactKind::Counter,
                &self.counter,
                store,
            )?;
            write_artifact(
                &artifact_path(staging, SETTINGS),
                ArtifactKind::SpellSettings,
                &self.settings(),
                store,
            )?;
            if let CandidateSource::Precomputed(map) = &self.source {
                for level in map.levels() {
                    write_artifact(
                        &artifact_path(staging, &level_name(level.depth)),
                        ArtifactKind::DistanceLevel,
                        level,
                        store,
                    )?;
                }
            }
            Ok(())
        })?;

        tracing::info!(dir = %dir.display(), words = self.counter.len(), "saved spell dictionary");
        Ok(())
    }

    /// Load a dictionary saved by [`SpellCorrector::save`].
    ///
    /// With precomputed candidates the stored depth must equal
    /// `config.max_edits`, else [`Error::DepthMismatch`].
    pub fn load(dir: &Path, config: &SpellConfig) -> Result<Self> {
        let settings_path = artifact_path(dir, SETTINGS);
        let settings: SpellSettings = read_artifact(&settings_path, ArtifactKind::SpellSettings)?;
        let counter: BTreeMap<String, u64> =
            read_artifact(&artifact_path(dir, COUNTER), ArtifactKind::Counter)?;

        let sum: u64 = counter.values().sum();
        if sum != settings.total {
            return Err(Error::corrupt(
                &settings_path,
                format!("total is {}, dictionary counts sum to {}", settings.total, sum),
            ));
        }

        let source = match config.candidates {
            CandidateMode::Edits => CandidateSource::Edits,
            CandidateMode::Precomputed => {
                if settings.max_edits != config.max_edits {
                    return Err(Error::DepthMismatch {
                        artifact: "spell dictionary",
                        stored: settings.max_edits,
                        configured: config.max_edits,
                    });
                }
                if settings.precomputed {
                    CandidateSource::Precomputed(load_levels(dir, settings.max_edits)?)
                } else {
                    tracing::info!(
                        max_edits = config.max_edits,
                        "spell dictionary was saved without neighborhoods, computing them"
                    );
                    CandidateSource::Precomputed(NeighborMap::build(
                        counter.keys().map(String::as_str),
                        config.max_edits,
                        EditOps::Norvig,
                    ))
                }
            }
        };

        tracing::info!(dir = %dir.display(), words = counter.len(), total = sum, "loaded spell dictionary");

        Ok(Self {
            counter,
            total: settings.total,
            config: config.clone(),
            source,
        })
    }

    /// Load the dictionary in `dir`, building and saving it first when
    /// `force` is set or nothing has been saved there yet.
    pub fn open_or_build<F>(
        dir: &Path,
        config: &SpellConfig,
        store: &StoreConfig,
        force: bool,
        corpus: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> Result<Vec<CorpusDocument>>,
    {
        if force || !dir.exists() {
            tracing::info!(dir = %dir.display(), force, "building spell dictionary");
            let docs = corpus()?;
            Self::build(&docs, config).save(dir, store)?;
        }
        Self::load(dir, config)
    }
}

fn load_levels(dir: &Path, depth: usize) -> Result<NeighborMap> {
    let mut levels: Vec<NeighborLevel> = Vec::with_capacity(depth);
    for d in 1..=depth {
        levels.push(read_artifact(
            &artifact_path(dir, &level_name(d)),
            ArtifactKind::DistanceLevel,
        )?);
    }
    NeighborMap::from_levels(EditOps::Norvig, levels)
        .ok_or_else(|| Error::corrupt(dir, "spelling neighborhood levels are inconsistent"))
}
