//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::corpus::CorpusDocument;

/// Corpus from `(name, text)` pairs, in order.
pub fn make_corpus(docs: &[(&str, &str)]) -> Vec<CorpusDocument> {
    docs.iter().map(|&(name, text)| CorpusDocument::new(name, text)).collect()
}

/// The two-document corpus used throughout the docs and tests.
///
/// Vocabulary: `{open, file, mode, read, close, write}`; both documents have
/// length 4 and share `file` and `mode`.
pub fn file_corpus() -> Vec<CorpusDocument> {
    make_corpus(&[
        ("doc1", "open file mode read"),
        ("doc2", "close file mode write"),
    ])
}

/// A slightly larger corpus with skewed term frequencies.
pub fn systems_corpus() -> Vec<CorpusDocument> {
    make_corpus(&[
        ("kernel", "The kernel schedules processes and manages memory pages."),
        ("filesystem", "A filesystem maps file names to blocks; the kernel caches pages."),
        ("network", "Sockets carry packets; the network stack lives in the kernel."),
        ("compiler", "A compiler parses source files, checks types and emits machine code."),
        ("database", "The database writes pages to disk and keeps an index of records."),
        ("shell", "The shell parses commands, spawns processes and pipes their output."),
    ])
}
