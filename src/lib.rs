//! Typo-tolerant full-text search with frequency-based spelling correction.
//!
//! A corpus of `(name, text)` documents is turned into two independent,
//! read-only structures: an [`InvertedIndex`] that ranks documents by
//! tf·idf over a fuzzy-expanded query, and a [`SpellCorrector`] that rewrites
//! whole queries word by word before they reach the index.
//!
//! # Architecture
//!
//! ```text
//!                ┌──────────────┐
//!   corpus ────▶ │ tokenize.rs  │ ─────────────────┐
//!                └──────────────┘                  │
//!                       │                          ▼
//!                       ▼                  ┌───────────────┐
//!               ┌───────────────┐          │   spell/      │
//!               │   index/      │          │ (dictionary,  │
//!               │ (postings,    │          │  candidates)  │
//!               │  tf, lengths) │          └───────────────┘
//!               └───────────────┘                  │
//!                       │      ┌──────────────┐    │
//!                       └────▶ │ fuzzy/,      │ ◀──┘
//!                              │ neighbors.rs │
//!                              └──────────────┘
//!                                     │
//!                                     ▼
//!                              ┌──────────────┐
//!                              │   store/     │  .fzdx artifacts
//!                              └──────────────┘
//! ```
//!
//! Query path: raw text → [`SpellCorrector::spell_correction`] →
//! [`InvertedIndex::find`] → ranked [`SearchHit`]s. [`SearchEngine`] wires the
//! two together.
//!
//! # Usage
//!
//! ```
//! use fuzzdex::{CorpusDocument, EngineConfig, SearchEngine};
//!
//! let corpus = vec![
//!     CorpusDocument::new("doc1", "open file mode read"),
//!     CorpusDocument::new("doc2", "close file mode write"),
//! ];
//! let engine = SearchEngine::build(&corpus, &EngineConfig::default());
//!
//! let outcome = engine.query("oepn flie", 2);
//! assert_eq!(outcome.corrected, "open file");
//! assert_eq!(outcome.hits.len(), 2);
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod neighbors;
pub mod pipeline;
#[cfg(feature = "parallel")]
mod progress;
pub mod spell;
pub mod store;
pub mod testing;
pub mod tokenize;

pub use config::{
    CandidateMode, EngineConfig, FuzzyMode, IndexConfig, SpellConfig, StoreConfig,
    DEFAULT_MAX_DISTANCE, DEFAULT_MAX_EDITS,
};
pub use corpus::{load_directory, CorpusDocument};
pub use error::{Error, Result};
pub use fuzzy::{edit_distance, FuzzyExpansion, FuzzyMatch};
pub use index::{round_score, DocId, InvertedIndex, SearchHit, SCORE_PRECISION};
pub use neighbors::{EditOps, NeighborMap};
pub use pipeline::{QueryOutcome, SearchEngine};
pub use spell::{CandidateSource, SpellCorrector};
pub use store::{inspect, ArtifactInfo, ArtifactKind};
pub use tokenize::{is_stop_word, query_tokens, tokenize, words, Token, STOP_WORDS};
