// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus input.
//!
//! The engine only needs an ordered sequence of `(name, text)` pairs. Document
//! ids are assigned in that order at build time, so the order must be stable
//! for a build to be reproducible; [`load_directory`] sorts by file name.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub name: String,
    pub text: String,
}

impl CorpusDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl<N: Into<String>, T: Into<String>> From<(N, T)> for CorpusDocument {
    fn from((name, text): (N, T)) -> Self {
        Self::new(name, text)
    }
}

/// Load every `*.txt` file directly inside `dir`, sorted by file name.
///
/// The document name is the file stem. Files that are not valid UTF-8 are
/// skipped with a warning; any other read failure is an error.
pub fn load_directory(dir: &Path) -> Result<Vec<CorpusDocument>> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let loaded = read_all(&paths)?;
    let docs: Vec<CorpusDocument> = loaded.into_iter().flatten().collect();

    tracing::info!(dir = %dir.display(), documents = docs.len(), "loaded corpus");
    Ok(docs)
}

fn read_one(path: &Path) -> Result<Option<CorpusDocument>> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let Ok(text) = String::from_utf8(bytes) else {
        tracing::warn!(path = %path.display(), "skipping non-UTF-8 document");
        return Ok(None);
    };
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(CorpusDocument { name, text }))
}

#[cfg(feature = "parallel")]
fn read_all(paths: &[std::path::PathBuf]) -> Result<Vec<Option<CorpusDocument>>> {
    use rayon::prelude::*;
    paths.par_iter().map(|p| read_one(p)).collect()
}

#[cfg(not(feature = "parallel"))]
fn read_all(paths: &[std::path::PathBuf]) -> Result<Vec<Option<CorpusDocument>>> {
    paths.iter().map(|p| read_one(p)).collect()
}
