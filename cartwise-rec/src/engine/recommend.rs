//! Cart recommendations from association rules
//!
//! Rules whose antecedent shares an item with the cart are ranked by
//! confidence, then lift. Their consequents are gathered until at least
//! `RULE_CANDIDATE_TARGET` items are collected; the step that crosses the
//! target is kept whole. Cart items are removed, the rest are resolved to
//! products, and popular items top the list up to `MIN_RECOMMENDATIONS`.

use super::rules::{generate_rules, Rule, RuleMetric};
use super::{mine, push_unique, Engine, ItemId};
use cartwise_common::Product;
use std::collections::HashSet;
use tracing::debug;

/// Size of the popularity-only result and the floor for rule-based results
pub const MIN_RECOMMENDATIONS: usize = 6;

/// Upper bound on returned recommendations
pub const MAX_RECOMMENDATIONS: usize = 8;

/// Consequent gathering stops once this many candidates are collected
const RULE_CANDIDATE_TARGET: usize = 8;

impl Engine {
    /// Recommend products for `cart`
    ///
    /// An empty cart, or a cart that matches no rule, gets the most popular
    /// products. Cart items are never recommended.
    pub fn recommend(&self, cart: &[String]) -> Vec<Product> {
        let cart_names: HashSet<&str> = cart.iter().map(String::as_str).collect();

        if cart.is_empty() {
            return self.popular_products(MIN_RECOMMENDATIONS, &cart_names);
        }

        let itemsets = mine(&self.corpus, self.config.recommend_min_support);
        let rules = generate_rules(&itemsets, RuleMetric::Lift, self.config.min_lift);
        debug!(
            "Mined {} itemsets and {} rules at support >= {}",
            itemsets.len(),
            rules.len(),
            self.config.recommend_min_support
        );

        let cart_ids = self.corpus.ids_of(cart);
        let mut relevant: Vec<&Rule> = rules
            .iter()
            .filter(|rule| rule.antecedent.iter().any(|item| cart_ids.contains(item)))
            .collect();

        if relevant.is_empty() {
            debug!("No rules match the cart, falling back to popular items");
            return self.popular_products(MIN_RECOMMENDATIONS, &cart_names);
        }

        sort_by_strength(&mut relevant);

        let candidates = gather_consequents(&relevant, RULE_CANDIDATE_TARGET);

        let mut recommendations: Vec<Product> = candidates
            .into_iter()
            .filter(|item| !cart_ids.contains(item))
            .filter_map(|item| self.catalog.get(self.corpus.name(item)).cloned())
            .collect();

        if recommendations.len() < MIN_RECOMMENDATIONS {
            let mut exclude = cart_names.clone();
            exclude.extend(recommendations.iter().map(|p| p.name.as_str()));
            let top_up =
                self.popular_products(MIN_RECOMMENDATIONS - recommendations.len(), &exclude);
            debug!(
                "Topping up {} rule-based picks with {} popular items",
                recommendations.len(),
                top_up.len()
            );
            recommendations.extend(top_up);
        }

        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}

/// Sort by confidence descending, then lift descending
///
/// The sort is stable, so equal rules keep their generation order.
fn sort_by_strength(rules: &mut [&Rule]) {
    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.lift.total_cmp(&a.lift))
    });
}

/// Union consequents in rule order until at least `target` items are held
fn gather_consequents(rules: &[&Rule], target: usize) -> Vec<ItemId> {
    let mut ordered = Vec::new();
    let mut seen = HashSet::new();

    for rule in rules {
        for &item in &rule.consequent {
            push_unique(&mut ordered, &mut seen, item);
        }
        if ordered.len() >= target {
            break;
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::corpus::{Corpus, RawTransaction};
    use crate::engine::Catalog;
    use cartwise_common::config::EngineConfig;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            category: String::new(),
            price: 1.0,
            image: String::new(),
        }
    }

    fn engine(names: &[&str], transactions: &[(&[&str], usize)]) -> Engine {
        let catalog = Catalog::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| product(i as i64 + 1, n))
                .collect(),
        );
        let mut raw = Vec::new();
        for (items, copies) in transactions {
            for _ in 0..*copies {
                raw.push(RawTransaction {
                    id: raw.len().to_string(),
                    items: items.iter().map(|s| s.to_string()).collect(),
                });
            }
        }
        Engine::new(catalog, Corpus::from_raw(raw), EngineConfig::default())
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn cart(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn rule(consequent: &[u32], confidence: f64, lift: f64) -> Rule {
        Rule {
            antecedent: vec![],
            consequent: consequent.iter().map(|&i| ItemId(i)).collect(),
            support: 0.1,
            confidence,
            lift,
        }
    }

    #[test]
    fn test_empty_cart_is_top_six() {
        let e = engine(
            &["A", "B", "C", "D", "E", "F", "G"],
            &[
                (&["A"], 7),
                (&["B"], 6),
                (&["C"], 5),
                (&["D"], 4),
                (&["E"], 3),
                (&["F"], 2),
                (&["G"], 1),
            ],
        );

        assert_eq!(names(&e.recommend(&[])), vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_higher_confidence_ranks_first() {
        let e = engine(
            &["A", "B", "C", "D"],
            &[(&["A", "B"], 50), (&["A", "C"], 10), (&["D"], 5)],
        );

        let result = e.recommend(&cart(&["A"]));
        let result = names(&result);
        let b = result.iter().position(|&n| n == "B").unwrap();
        let c = result.iter().position(|&n| n == "C").unwrap();
        assert!(b < c);
        assert!(!result.contains(&"A"));
    }

    #[test]
    fn test_unknown_cart_item_falls_back() {
        let e = engine(&["A", "B"], &[(&["A", "B"], 3), (&["A"], 1)]);

        let result = e.recommend(&cart(&["Caviar"]));
        let result = names(&result);
        assert_eq!(result, vec!["A", "B"]);
    }

    #[test]
    fn test_fallback_excludes_cart() {
        // B only ever appears alone, so no rule has B as antecedent
        let e = engine(&["A", "B", "C"], &[(&["A", "C"], 3), (&["B"], 5)]);

        let result = e.recommend(&cart(&["B"]));
        let result = names(&result);
        assert_eq!(result, vec!["A", "C"]);
    }

    #[test]
    fn test_unmatched_products_skipped() {
        // X is in the corpus but not the catalog
        let e = engine(&["A", "B"], &[(&["A", "X"], 5), (&["A", "B"], 2)]);

        let result = e.recommend(&cart(&["A"]));
        let result = names(&result);
        assert_eq!(result, vec!["B"]);
    }

    #[test]
    fn test_sort_by_strength() {
        let r1 = rule(&[0], 0.5, 2.0);
        let r2 = rule(&[1], 0.9, 1.0);
        let r3 = rule(&[2], 0.5, 3.0);
        let r4 = rule(&[3], 0.5, 3.0);
        let mut rules = vec![&r1, &r2, &r3, &r4];

        sort_by_strength(&mut rules);

        let order: Vec<ItemId> = rules.iter().map(|r| r.consequent[0]).collect();
        assert_eq!(order, vec![ItemId(1), ItemId(2), ItemId(3), ItemId(0)]);
    }

    #[test]
    fn test_gather_keeps_whole_crossing_step() {
        let r1 = rule(&[0, 1, 2, 3, 4, 5], 0.9, 1.0);
        let r2 = rule(&[6, 7, 8], 0.8, 1.0);
        let r3 = rule(&[9], 0.7, 1.0);
        let rules = vec![&r1, &r2, &r3];

        let gathered = gather_consequents(&rules, 8);

        // 6 + 3 = 9 crosses the target on the second rule; all 9 are kept
        assert_eq!(gathered.len(), 9);
        assert!(!gathered.contains(&ItemId(9)));
    }

    #[test]
    fn test_gather_dedups_in_discovery_order() {
        let r1 = rule(&[0, 2], 0.9, 1.0);
        let r2 = rule(&[0, 1], 0.8, 1.0);
        let rules = vec![&r1, &r2];

        assert_eq!(gather_consequents(&rules, 8), vec![ItemId(0), ItemId(2), ItemId(1)]);
    }

    #[test]
    fn test_result_bounded_to_eight() {
        let catalog = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];
        let e = engine(&catalog, &[(&catalog[..], 3), (&["B"], 1)]);

        let result = e.recommend(&cart(&["A"]));
        assert!(result.len() >= MIN_RECOMMENDATIONS);
        assert!(result.len() <= MAX_RECOMMENDATIONS);
        assert!(result.iter().all(|p| p.name != "A"));
    }
}
