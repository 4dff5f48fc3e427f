//! Popularity ranking, the deterministic fallback for both selectors

use super::corpus::Corpus;
use std::collections::HashSet;

/// Items ordered by the number of transactions containing them
///
/// Ties are broken by item name so the order never depends on hashing.
#[derive(Debug, Clone, Default)]
pub struct PopularityRanker {
    ranked: Vec<(String, usize)>,
}

impl PopularityRanker {
    /// Rank every item of the corpus, most frequent first
    pub fn rank(corpus: &Corpus) -> Self {
        let mut counts = vec![0usize; corpus.item_count()];
        for transaction in corpus.transactions() {
            for item in transaction.items() {
                counts[item.index()] += 1;
            }
        }

        // Vocabulary order is lexical, so a stable sort on count alone
        // leaves ties in name order
        let mut ranked: Vec<(String, usize)> = corpus
            .items()
            .map(|item| (corpus.name(item).to_string(), counts[item.index()]))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        Self { ranked }
    }

    /// Item names in rank order
    pub fn ranked(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Up to `n` items in rank order, skipping `exclude`
    ///
    /// Returns fewer than `n` when the ranking runs out.
    pub fn top_n(&self, n: usize, exclude: &HashSet<&str>) -> Vec<&str> {
        self.top_n_where(n, |name| !exclude.contains(name))
    }

    /// Up to `n` items in rank order that satisfy `keep`
    pub fn top_n_where<F>(&self, n: usize, mut keep: F) -> Vec<&str>
    where
        F: FnMut(&str) -> bool,
    {
        self.ranked().filter(|name| keep(*name)).take(n).collect()
    }
}
