// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization shared by the index, the spell corrector and the query path.
//!
//! A term is a lower-cased maximal run of alphanumeric characters or `_`.
//! Stop words are dropped for indexing and dictionary counting, because
//! they are too common to rank on and they make terrible fuzzy targets
//! ("land" is one edit away from "and").

use std::collections::HashSet;
use std::sync::LazyLock;

/// The English stop word list (NLTK's 179 entries).
///
/// Contractions with apostrophes can never come out of [`words`], but they
/// stay in the list so the set matches the canonical one exactly.
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

/// Check if a (lower-cased) word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-case `text` and split it into maximal word runs. Stop words are kept.
pub fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Index terms of `text`: [`words`] with stop words removed.
///
/// Empty input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms = words(text);
    terms.retain(|w| !is_stop_word(w));
    terms
}

/// A token of free text as seen by whole-text spelling correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    /// ASCII punctuation, emitted verbatim. A run of underscores is punctuation too.
    Punct(String),
}

/// Split `text` into words and punctuation, discarding whitespace and anything else.
pub fn query_tokens(text: &str) -> Vec<Token> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if current.is_empty() {
            return;
        }
        let run = std::mem::take(current);
        if run.chars().all(|c| c == '_') {
            tokens.push(Token::Punct(run));
        } else {
            tokens.push(Token::Word(run));
        }
    };

    for c in lowered.chars() {
        if is_word_char(c) {
            current.push(c);
            continue;
        }
        flush(&mut current, &mut tokens);
        if c.is_ascii_punctuation() {
            tokens.push(Token::Punct(c.to_string()));
        }
    }
    flush(&mut current, &mut tokens);

    tokens
}
