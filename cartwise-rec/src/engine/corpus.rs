//! Transaction corpus
//!
//! Item names are interned into a lexically sorted vocabulary so that
//! `ItemId` order matches name order. Every downstream component iterates
//! items in `ItemId` order, which makes mining and tie-breaking
//! reproducible.

use cartwise_common::TransactionRecord;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Interned item identifier; ordering follows the item name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Transaction as read from the history, before normalization
///
/// Item order is file order and duplicates are kept; augmentation relies
/// on both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub id: String,
    pub items: Vec<String>,
}

/// Group `(transaction_id, item)` rows into raw transactions
///
/// Transactions appear in order of their first row.
pub fn group_records(records: &[TransactionRecord]) -> Vec<RawTransaction> {
    let mut grouped: Vec<RawTransaction> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match positions.get(record.transaction_id.as_str()) {
            Some(&pos) => grouped[pos].items.push(record.item.clone()),
            None => {
                positions.insert(record.transaction_id.as_str(), grouped.len());
                grouped.push(RawTransaction {
                    id: record.transaction_id.clone(),
                    items: vec![record.item.clone()],
                });
            }
        }
    }

    grouped
}

/// A normalized, non-empty set of items
#[derive(Debug, Clone)]
pub struct Transaction {
    id: String,
    items: HashSet<ItemId>,
}

impl Transaction {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in no particular order
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    /// True when every item of `itemset` is present
    pub fn contains_all(&self, itemset: &[ItemId]) -> bool {
        itemset.iter().all(|item| self.items.contains(item))
    }
}

/// Immutable collection of normalized transactions
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    vocabulary: Vec<String>,
    index: HashMap<String, ItemId>,
    transactions: Vec<Transaction>,
}

impl Corpus {
    /// Build a corpus from raw transactions
    ///
    /// Duplicate items within a transaction collapse. Transactions with no
    /// items are dropped.
    pub fn from_raw<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = RawTransaction>,
    {
        let raw: Vec<RawTransaction> = raw
            .into_iter()
            .filter(|t| !t.items.is_empty())
            .collect();

        let vocabulary: Vec<String> = raw
            .iter()
            .flat_map(|t| t.items.iter().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let index: HashMap<String, ItemId> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), ItemId(i as u32)))
            .collect();

        let transactions = raw
            .into_iter()
            .map(|t| Transaction {
                items: t.items.iter().map(|name| index[name]).collect(),
                id: t.id,
            })
            .collect();

        Self {
            vocabulary,
            index,
            transactions,
        }
    }

    /// Build a corpus directly from history rows, without augmentation
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        Self::from_raw(group_records(records))
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of distinct items
    pub fn item_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// All items in lexical order
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        (0..self.vocabulary.len()).map(|i| ItemId(i as u32))
    }

    pub fn name(&self, item: ItemId) -> &str {
        &self.vocabulary[item.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.index.get(name).copied()
    }

    /// Interned ids for the known names in `names`; unknown names are ignored
    pub fn ids_of<'a, I>(&self, names: I) -> HashSet<ItemId>
    where
        I: IntoIterator<Item = &'a String>,
    {
        names
            .into_iter()
            .filter_map(|name| self.id_of(name))
            .collect()
    }

    /// Number of transactions containing every item of `itemset`
    pub fn count_containing(&self, itemset: &[ItemId]) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.contains_all(itemset))
            .count()
    }
}
