// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index directory: save, load and open-or-build.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DocId, InvertedIndex, Postings, TermCounts};
use crate::config::{FuzzyMode, IndexConfig, StoreConfig};
use crate::corpus::CorpusDocument;
use crate::error::{Error, Result};
use crate::fuzzy::FuzzyExpansion;
use crate::neighbors::{EditOps, NeighborLevel, NeighborMap};
use crate::store::{artifact_path, read_artifact, replace_dir, write_artifact, ArtifactKind};

const POSTINGS: &str = "postings";
const TERM_COUNTS: &str = "term_counts";
const DOCUMENTS: &str = "documents";
const LENGTHS: &str = "lengths";
const MANIFEST: &str = "manifest";

/// Build-time summary stored alongside the index structures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub documents: usize,
    pub terms: usize,
    pub max_distance: usize,
    /// Depth of the stored delete neighborhoods; `None` for a scan-mode build.
    pub neighbor_depth: Option<usize>,
}

fn level_name(depth: usize) -> String {
    format!("deletes{}", depth)
}

impl InvertedIndex {
    pub fn manifest(&self) -> IndexManifest {
        IndexManifest {
            documents: self.documents.len(),
            terms: self.postings.len(),
            max_distance: self.config.max_distance,
            neighbor_depth: match &self.expansion {
                FuzzyExpansion::Scan => None,
                FuzzyExpansion::Precomputed(map) => Some(map.depth()),
            },
        }
    }

    /// Write every index artifact to `dir`, replacing whatever was there.
    pub fn save(&self, dir: &Path, store: &StoreConfig) -> Result<()> {
        replace_dir(dir, |staging| {
            let path = |name: &str| artifact_path(staging, name);
            write_artifact(&path(POSTINGS), ArtifactKind::Postings, &self.postings, store)?;
            write_artifact(&path(TERM_COUNTS), ArtifactKind::TermCounts, &self.term_counts, store)?;
            write_artifact(&path(DOCUMENTS), ArtifactKind::Documents, &self.documents, store)?;
            write_artifact(&path(LENGTHS), ArtifactKind::Lengths, &self.lengths, store)?;
            write_artifact(&path(MANIFEST), ArtifactKind::IndexManifest, &self.manifest(), store)?;

            if let FuzzyExpansion::Precomputed(map) = &self.expansion {
                for level in map.levels() {
                    write_artifact(&path(&level_name(level.depth)), ArtifactKind::DeleteLevel, level, store)?;
                }
            }
            Ok(())
        })?;

        tracing::info!(dir = %dir.display(), documents = self.documents.len(), "saved index");
        Ok(())
    }

    /// Load an index saved by [`InvertedIndex::save`].
    ///
    /// In precomputed mode the stored neighborhoods must have been built for
    /// `config.max_distance`; otherwise this fails with
    /// [`Error::DepthMismatch`]. A scan-mode build opened in precomputed mode
    /// gets its neighborhoods computed here.
    pub fn load(dir: &Path, config: &IndexConfig) -> Result<Self> {
        let manifest_path = artifact_path(dir, MANIFEST);
        let manifest: IndexManifest = read_artifact(&manifest_path, ArtifactKind::IndexManifest)?;

        let postings: Postings = read_artifact(&artifact_path(dir, POSTINGS), ArtifactKind::Postings)?;
        let term_counts: TermCounts =
            read_artifact(&artifact_path(dir, TERM_COUNTS), ArtifactKind::TermCounts)?;
        let documents: BTreeMap<DocId, String> =
            read_artifact(&artifact_path(dir, DOCUMENTS), ArtifactKind::Documents)?;
        let lengths: BTreeMap<DocId, u32> =
            read_artifact(&artifact_path(dir, LENGTHS), ArtifactKind::Lengths)?;

        if manifest.documents != documents.len()
            || manifest.terms != postings.len()
            || lengths.len() != documents.len()
        {
            return Err(Error::corrupt(
                &manifest_path,
                format!(
                    "manifest records {} documents and {} terms, found {} documents, {} lengths and {} terms",
                    manifest.documents,
                    manifest.terms,
                    documents.len(),
                    lengths.len(),
                    postings.len()
                ),
            ));
        }

        let expansion = match config.fuzzy {
            FuzzyMode::Scan => FuzzyExpansion::Scan,
            FuzzyMode::Precomputed => match manifest.neighbor_depth {
                Some(stored) if stored != config.max_distance => {
                    return Err(Error::DepthMismatch {
                        artifact: "index neighborhood",
                        stored,
                        configured: config.max_distance,
                    });
                }
                Some(stored) => FuzzyExpansion::Precomputed(load_levels(dir, stored)?),
                None => {
                    tracing::info!(
                        max_distance = config.max_distance,
                        "index was saved without neighborhoods, computing them"
                    );
                    FuzzyExpansion::Precomputed(NeighborMap::build(
                        postings.keys().map(String::as_str),
                        config.max_distance,
                        EditOps::Deletes,
                    ))
                }
            },
        };

        tracing::info!(
            dir = %dir.display(),
            documents = documents.len(),
            terms = postings.len(),
            "loaded index"
        );

        Ok(Self {
            postings,
            term_counts,
            documents,
            lengths,
            config: config.clone(),
            expansion,
        })
    }

    /// Load the index in `dir`, building and saving it first when `force` is
    /// set or nothing has been saved there yet.
    ///
    /// `corpus` is only called when a build happens.
    pub fn open_or_build<F>(
        dir: &Path,
        config: &IndexConfig,
        store: &StoreConfig,
        force: bool,
        corpus: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> Result<Vec<CorpusDocument>>,
    {
        if force || !dir.exists() {
            let docs = corpus()?;
            Self::build(&docs, config).save(dir, store)?;
        }
        Self::load(dir, config)
    }
}

fn load_levels(dir: &Path, depth: usize) -> Result<NeighborMap> {
    let levels = (1..=depth)
        .map(|d| {
            read_artifact::<NeighborLevel>(&artifact_path(dir, &level_name(d)), ArtifactKind::DeleteLevel)
        })
        .collect::<Result<Vec<_>>>()?;
    NeighborMap::from_levels(EditOps::Deletes, levels)
        .ok_or_else(|| Error::corrupt(dir, "delete neighborhood levels are inconsistent"))
}
