// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Only things that can actually go wrong on disk end up here. An empty query,
//! `k == 0` or a word nobody has ever seen are ordinary inputs with ordinary
//! (empty or unchanged) answers, so they never produce an `Error`.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt artifact {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("cannot decode artifact {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{artifact} was built with edit depth {stored}, configured depth is {configured}")]
    DepthMismatch {
        artifact: &'static str,
        stored: usize,
        configured: usize,
    },

    #[error("invalid configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Error::Corrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Is this the load-time consistency failure between stored and configured depth?
    pub fn is_depth_mismatch(&self) -> bool {
        matches!(self, Error::DepthMismatch { .. })
    }
}
