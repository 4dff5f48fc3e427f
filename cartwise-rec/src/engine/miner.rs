//! Frequent itemset mining (Apriori)
//!
//! # Algorithm
//!
//! 1. Find frequent 1-itemsets (support >= `min_support`)
//! 2. Extend each frequent k-itemset with one frequent item that sorts after
//!    its last item, producing (k+1)-candidates
//! 3. Drop candidates with an infrequent k-subset before counting
//! 4. Count the survivors against the corpus and keep the frequent ones
//! 5. Repeat until a level produces nothing
//!
//! Support is counted directly against the hashed transactions; no
//! item-by-transaction matrix is materialized.
//!
//! Output is ordered by itemset size, then lexically by item, and is
//! identical for identical input.

use super::corpus::{Corpus, ItemId};
use std::collections::{HashMap, HashSet};

/// A frequent itemset with its support
#[derive(Debug, Clone, PartialEq)]
pub struct Itemset {
    items: Vec<ItemId>,
    support: f64,
}

impl Itemset {
    pub fn new(mut items: Vec<ItemId>, support: f64) -> Self {
        items.sort_unstable();
        items.dedup();
        Self { items, support }
    }

    /// Items in ascending order
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Fraction of transactions containing every item, in [0, 1]
    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.binary_search(&item).is_ok()
    }

    /// True when at least one item is in `other`
    pub fn intersects(&self, other: &HashSet<ItemId>) -> bool {
        self.items.iter().any(|item| other.contains(item))
    }
}

/// Mine all itemsets with support >= `min_support`
///
/// An empty corpus or a threshold above 1 yields no itemsets.
pub fn mine(corpus: &Corpus, min_support: f64) -> Vec<Itemset> {
    if corpus.is_empty() || min_support > 1.0 {
        return Vec::new();
    }

    let n_transactions = corpus.len() as f64;
    let support_of = |count: usize| count as f64 / n_transactions;

    let frequent_items = frequent_singletons(corpus, min_support);
    let mut result: Vec<Itemset> = frequent_items
        .iter()
        .map(|&(item, count)| Itemset::new(vec![item], support_of(count)))
        .collect();

    let extensions: Vec<ItemId> = frequent_items.iter().map(|&(item, _)| item).collect();
    let mut level: Vec<Vec<ItemId>> = extensions.iter().map(|&item| vec![item]).collect();

    while !level.is_empty() {
        let known: HashSet<&[ItemId]> = level.iter().map(Vec::as_slice).collect();
        let mut next_level = Vec::new();

        for candidate in extend_level(&level, &extensions) {
            if has_infrequent_subset(&candidate, &known) {
                continue;
            }

            let count = corpus.count_containing(&candidate);
            let support = support_of(count);
            // Never-observed combinations are not reported even at a zero threshold
            if count > 0 && support >= min_support {
                result.push(Itemset::new(candidate.clone(), support));
                next_level.push(candidate);
            }
        }

        level = next_level;
    }

    result
}

/// Build a lookup from item list to support
pub fn support_index(itemsets: &[Itemset]) -> HashMap<&[ItemId], f64> {
    itemsets
        .iter()
        .map(|itemset| (itemset.items(), itemset.support()))
        .collect()
}

/// Frequent single items with their transaction counts, in item order
fn frequent_singletons(corpus: &Corpus, min_support: f64) -> Vec<(ItemId, usize)> {
    let mut counts = vec![0usize; corpus.item_count()];
    for transaction in corpus.transactions() {
        for item in transaction.items() {
            counts[item.index()] += 1;
        }
    }

    let n_transactions = corpus.len() as f64;
    corpus
        .items()
        .map(|item| (item, counts[item.index()]))
        .filter(|&(_, count)| count as f64 / n_transactions >= min_support)
        .collect()
}

/// Extend every itemset of a level by one later frequent item
fn extend_level(level: &[Vec<ItemId>], extensions: &[ItemId]) -> Vec<Vec<ItemId>> {
    let mut candidates = Vec::new();

    for itemset in level {
        let Some(&last) = itemset.last() else {
            continue;
        };

        for &item in extensions.iter().filter(|&&item| item > last) {
            let mut candidate = Vec::with_capacity(itemset.len() + 1);
            candidate.extend_from_slice(itemset);
            candidate.push(item);
            candidates.push(candidate);
        }
    }

    candidates
}

/// Check whether any subset one item smaller is missing from the level
fn has_infrequent_subset(candidate: &[ItemId], known: &HashSet<&[ItemId]>) -> bool {
    // Dropping the last item gives the parent, which is frequent by construction
    (0..candidate.len().saturating_sub(1)).any(|skip| {
        let subset: Vec<ItemId> = candidate
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &item)| item)
            .collect();
        !known.contains(subset.as_slice())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::corpus::RawTransaction;

    fn corpus(transactions: &[&[&str]]) -> Corpus {
        Corpus::from_raw(transactions.iter().enumerate().map(|(i, items)| RawTransaction {
            id: i.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }))
    }

    fn names(corpus: &Corpus, itemset: &Itemset) -> Vec<String> {
        itemset
            .items()
            .iter()
            .map(|&id| corpus.name(id).to_string())
            .collect()
    }

    fn find<'a>(corpus: &Corpus, itemsets: &'a [Itemset], wanted: &[&str]) -> Option<&'a Itemset> {
        itemsets.iter().find(|s| names(corpus, s) == wanted)
    }

    #[test]
    fn test_basic_levels() {
        let c = corpus(&[&["A", "B", "C"], &["A", "B"], &["A", "C"], &["B", "C"]]);
        let itemsets = mine(&c, 0.5);

        // 3 singletons at 0.75, 3 pairs at 0.5, the triple at 0.25 is dropped
        assert_eq!(itemsets.len(), 6);
        assert!((find(&c, &itemsets, &["A"]).unwrap().support() - 0.75).abs() < 1e-10);
        assert!((find(&c, &itemsets, &["A", "B"]).unwrap().support() - 0.5).abs() < 1e-10);
        assert!(find(&c, &itemsets, &["A", "B", "C"]).is_none());
    }

    #[test]
    fn test_output_order_is_size_then_lexical() {
        let c = corpus(&[&["C", "A", "B"], &["B", "A", "C"]]);
        let itemsets = mine(&c, 0.5);

        let listed: Vec<Vec<String>> = itemsets.iter().map(|s| names(&c, s)).collect();
        assert_eq!(
            listed,
            vec![
                vec!["A"],
                vec!["B"],
                vec!["C"],
                vec!["A", "B"],
                vec!["A", "C"],
                vec!["B", "C"],
                vec!["A", "B", "C"],
            ]
        );
    }

    #[test]
    fn test_infrequent_items_pruned() {
        let c = corpus(&[&["A", "B"], &["A", "B"], &["A", "B"], &["C", "D"]]);
        let itemsets = mine(&c, 0.5);

        for itemset in &itemsets {
            assert!(itemset.support() >= 0.5);
            let listed = names(&c, itemset);
            assert!(!listed.contains(&"C".to_string()));
            assert!(!listed.contains(&"D".to_string()));
        }
        assert_eq!(itemsets.len(), 3);
    }

    #[test]
    fn test_empty_corpus() {
        assert!(mine(&Corpus::default(), 0.1).is_empty());
    }

    #[test]
    fn test_threshold_above_one() {
        let c = corpus(&[&["A"], &["A"]]);
        assert!(mine(&c, 1.01).is_empty());
    }

    #[test]
    fn test_threshold_of_one_keeps_universal_items() {
        let c = corpus(&[&["A", "B"], &["A"]]);
        let itemsets = mine(&c, 1.0);

        assert_eq!(itemsets.len(), 1);
        assert_eq!(names(&c, &itemsets[0]), vec!["A"]);
    }

    #[test]
    fn test_single_item_transactions() {
        let c = corpus(&[&["A"], &["B"], &["C"], &["D"]]);
        let itemsets = mine(&c, 0.25);

        assert_eq!(itemsets.len(), 4);
        assert!(itemsets.iter().all(|s| s.len() == 1));
    }

    #[test]
    fn test_deterministic() {
        let c = corpus(&[&["A", "B", "C"], &["B", "C", "D"], &["A", "C", "D"], &["A", "B", "D"]]);
        assert_eq!(mine(&c, 0.25), mine(&c, 0.25));
    }

    #[test]
    fn test_support_index_lookup() {
        let c = corpus(&[&["A", "B"], &["A"]]);
        let itemsets = mine(&c, 0.5);
        let index = support_index(&itemsets);

        let a = c.id_of("A").unwrap();
        let b = c.id_of("B").unwrap();
        assert_eq!(index.get([a].as_slice()), Some(&1.0));
        assert_eq!(index.get([a, b].as_slice()), Some(&0.5));
    }

    #[test]
    fn test_itemset_helpers() {
        let c = corpus(&[&["A", "B"]]);
        let a = c.id_of("A").unwrap();
        let b = c.id_of("B").unwrap();

        let itemset = Itemset::new(vec![b, a, b], 1.0);
        assert_eq!(itemset.items(), &[a, b]);
        assert!(itemset.contains(a));

        let cart: HashSet<ItemId> = [b].into_iter().collect();
        assert!(itemset.intersects(&cart));
        assert!(!Itemset::new(vec![a], 1.0).intersects(&cart));
    }
}
