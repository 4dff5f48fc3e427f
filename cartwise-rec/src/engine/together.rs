//! "Frequently bought together" bundles
//!
//! Works on itemsets rather than rules. The bundle leads with the product
//! for the first cart item, then adds items that co-occur with the cart,
//! then popular items, always ending at `BUNDLE_SIZE` products when the
//! catalog allows it.

use super::{mine, push_unique, Engine, ItemId};
use cartwise_common::Product;
use std::collections::HashSet;
use tracing::debug;

/// Number of products in a bundle
pub const BUNDLE_SIZE: usize = 4;

/// Itemset gathering stops once this many items are collected
const ITEMSET_CANDIDATE_TARGET: usize = 6;

impl Engine {
    /// Build a bundle of products frequently bought with `cart`
    ///
    /// An empty cart gets the most popular products.
    pub fn together_with(&self, cart: &[String]) -> Vec<Product> {
        let cart_names: HashSet<&str> = cart.iter().map(String::as_str).collect();

        let Some(first) = cart.first() else {
            return self.popular_products(BUNDLE_SIZE, &cart_names);
        };

        let itemsets = mine(&self.corpus, self.config.together_min_support);
        debug!(
            "Mined {} itemsets at support >= {}",
            itemsets.len(),
            self.config.together_min_support
        );

        let mut bundle: Vec<Product> = self.catalog.get(first).cloned().into_iter().collect();

        let cart_ids = self.corpus.ids_of(cart);
        let relevant: Vec<&[ItemId]> = itemsets
            .iter()
            .filter(|itemset| itemset.intersects(&cart_ids))
            .map(|itemset| itemset.items())
            .collect();

        if relevant.is_empty() {
            debug!("No itemsets match the cart, filling bundle with popular items");
            let fill = self.popular_products(BUNDLE_SIZE - bundle.len(), &cart_names);
            bundle.extend(fill);
            bundle.truncate(BUNDLE_SIZE);
            return bundle;
        }

        for item in gather_items(&relevant, ITEMSET_CANDIDATE_TARGET) {
            if bundle.len() >= BUNDLE_SIZE {
                break;
            }
            if cart_ids.contains(&item) {
                continue;
            }
            let name = self.corpus.name(item);
            if name == first.as_str() {
                continue;
            }
            if let Some(product) = self.catalog.get(name) {
                bundle.push(product.clone());
            }
        }

        if bundle.len() < BUNDLE_SIZE {
            let mut exclude = cart_names.clone();
            exclude.extend(bundle.iter().map(|p| p.name.as_str()));
            let fill = self.popular_products(BUNDLE_SIZE - bundle.len(), &exclude);
            bundle.extend(fill);
        }

        bundle.truncate(BUNDLE_SIZE);
        bundle
    }
}

/// Union itemset members in order until at least `target` items are held
fn gather_items(itemsets: &[&[ItemId]], target: usize) -> Vec<ItemId> {
    let mut ordered = Vec::new();
    let mut seen = HashSet::new();

    for itemset in itemsets {
        for &item in itemset.iter() {
            push_unique(&mut ordered, &mut seen, item);
        }
        if ordered.len() >= target {
            break;
        }
    }

    ordered
}
