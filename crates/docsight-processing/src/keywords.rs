//! Keyword-frequency analysis
//!
//! Deterministic and pure: identical text always yields the identical ranking.

use std::collections::HashMap;

/// Words that never count as keywords.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "in", "to", "of", "and", "is", "for", "with", "on", "it", "that", "this",
];

/// Tokens shorter than this (in characters) are ignored.
const MIN_TOKEN_CHARS: usize = 3;

/// Ranks the most frequent words of a text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordAnalyzer {
    count: usize,
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self { count: 5 }
    }
}

impl KeywordAnalyzer {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Top keywords by descending frequency. Ties keep the order in which the
    /// words first appear. Returns fewer than `count` when the text runs out of
    /// qualifying words.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        // (first-seen position, count) per token
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        let mut order = 0usize;

        for token in tokenize(&lowered) {
            if token.chars().count() < MIN_TOKEN_CHARS || STOPWORDS.iter().any(|s| *s == token) {
                continue;
            }
            counts
                .entry(token)
                .and_modify(|(_, n)| *n += 1)
                .or_insert_with(|| {
                    order += 1;
                    (order, 1)
                });
        }

        let mut ranked: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(token, (first_seen, n))| (token, first_seen, n))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));

        ranked
            .into_iter()
            .take(self.count)
            .map(|(token, _, _)| token.to_string())
            .collect()
    }
}

/// Word-character runs (letters, digits and underscore).
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
}
