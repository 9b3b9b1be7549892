// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the fuzzdex command-line interface.
//!
//! Four subcommands: `build` to index a directory of `.txt` files, `search`
//! to query the saved index, `correct` to run only the spelling corrector,
//! and `inspect` to examine a single `.fzdx` artifact.
//!
//! Paths come from `--config` first, then the `--index-dir`/`--spell-dir`
//! flags override them.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fuzzdex",
    about = "Typo-tolerant full-text search over a directory of text files",
    version
)]
pub struct Cli {
    /// JSON configuration file (every field optional)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the inverted index artifacts
    #[arg(long, global = true)]
    pub index_dir: Option<PathBuf>,

    /// Directory holding the spelling dictionary artifacts
    #[arg(long, global = true)]
    pub spell_dir: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index and spelling dictionary from a corpus directory
    Build {
        /// Directory of .txt documents (document name = file stem)
        #[arg(short, long)]
        corpus: PathBuf,
    },

    /// Search the saved index
    Search {
        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, default_value = "10")]
        k: usize,

        /// Search the query as typed, skipping spelling correction
        #[arg(long)]
        no_correct: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Spell-correct a piece of text
    Correct {
        /// Text to correct
        text: String,
    },

    /// Inspect a .fzdx artifact file
    Inspect {
        /// Path to .fzdx file
        file: PathBuf,
    },
}
