//! Market-basket recommendation engine
//!
//! # Components
//!
//! - [`corpus`]: normalized transactions with interned, lexically ordered items
//! - [`augment`]: seeded replication of the purchase history
//! - [`miner`]: Apriori frequent itemset mining
//! - [`rules`]: association rules with support, confidence and lift
//! - [`popularity`]: occurrence ranking, used as the fallback
//! - [`catalog`]: product lookup by name
//! - [`recommend`] and [`together`]: the two cart-driven selectors
//!
//! Catalog, corpus and ranking are built once and never mutated. Itemsets
//! and rules are mined fresh on every call, so concurrent calls share only
//! read-only state.

pub mod augment;
pub mod catalog;
pub mod corpus;
pub mod miner;
pub mod popularity;
pub mod recommend;
pub mod rules;
pub mod together;

use cartwise_common::config::{AugmentationConfig, EngineConfig};
use cartwise_common::{Product, TransactionRecord};
use std::collections::HashSet;
use tracing::info;

pub use catalog::Catalog;
pub use corpus::{Corpus, ItemId, RawTransaction};
pub use miner::{mine, Itemset};
pub use popularity::PopularityRanker;
pub use rules::{generate_rules, Rule, RuleMetric};

/// Recommendation engine over a fixed catalog and corpus
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    corpus: Corpus,
    ranker: PopularityRanker,
    config: EngineConfig,
}

impl Engine {
    pub fn new(catalog: Catalog, corpus: Corpus, config: EngineConfig) -> Self {
        let ranker = PopularityRanker::rank(&corpus);
        Self {
            catalog,
            corpus,
            ranker,
            config,
        }
    }

    /// Build the engine from loaded data, applying corpus augmentation
    pub fn from_data(
        products: Vec<Product>,
        records: &[TransactionRecord],
        augmentation: &AugmentationConfig,
        config: EngineConfig,
    ) -> Self {
        let catalog = Catalog::new(products);
        let base = corpus::group_records(records);
        let expanded = augment::augment(&base, &catalog.names(), augmentation);
        let corpus = Corpus::from_raw(expanded);

        info!(
            "Corpus ready: {} base transactions, {} after augmentation, {} distinct items",
            base.len(),
            corpus.len(),
            corpus.item_count()
        );

        Self::new(catalog, corpus, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn ranker(&self) -> &PopularityRanker {
        &self.ranker
    }

    /// Up to `n` products in popularity order
    ///
    /// Items without a catalog entry are skipped without using a slot.
    fn popular_products(&self, n: usize, exclude: &HashSet<&str>) -> Vec<Product> {
        self.ranker
            .top_n_where(n, |name| !exclude.contains(name) && self.catalog.contains(name))
            .into_iter()
            .filter_map(|name| self.catalog.get(name).cloned())
            .collect()
    }
}

/// Append `item` to `ordered` unless already seen
fn push_unique(ordered: &mut Vec<ItemId>, seen: &mut HashSet<ItemId>, item: ItemId) {
    if seen.insert(item) {
        ordered.push(item);
    }
}
