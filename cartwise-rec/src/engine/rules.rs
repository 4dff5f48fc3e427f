//! Association rule generation
//!
//! Every frequent itemset of two or more items is split into each
//! non-empty proper subset (antecedent) and its complement (consequent).
//! Antecedents are enumerated by size, then lexically, so the rule list is
//! in a fixed order for a given set of itemsets.

use super::corpus::ItemId;
use super::miner::{support_index, Itemset};
use tracing::trace;

/// Metric a rule must meet to be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMetric {
    Support,
    Confidence,
    #[default]
    Lift,
}

/// Association rule: antecedent => consequent
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Items in the antecedent (left side), ascending
    pub antecedent: Vec<ItemId>,
    /// Items in the consequent (right side), ascending
    pub consequent: Vec<ItemId>,
    /// Support: P(antecedent ∪ consequent)
    pub support: f64,
    /// Confidence: P(consequent | antecedent) = support / P(antecedent)
    pub confidence: f64,
    /// Lift: confidence / P(consequent)
    pub lift: f64,
}

impl Rule {
    pub fn metric(&self, metric: RuleMetric) -> f64 {
        match metric {
            RuleMetric::Support => self.support,
            RuleMetric::Confidence => self.confidence,
            RuleMetric::Lift => self.lift,
        }
    }
}

/// Derive rules from frequent itemsets, keeping those whose `metric` is at
/// least `min_metric`
///
/// Antecedent and consequent supports are taken from `itemsets`, which must
/// be the complete output of one mining run (every subset of a frequent
/// itemset is itself present).
pub fn generate_rules(itemsets: &[Itemset], metric: RuleMetric, min_metric: f64) -> Vec<Rule> {
    let supports = support_index(itemsets);
    let mut rules = Vec::new();

    for itemset in itemsets.iter().filter(|s| s.len() >= 2) {
        let items = itemset.items();

        for size in 1..items.len() {
            for antecedent in combinations(items, size) {
                let consequent: Vec<ItemId> = items
                    .iter()
                    .copied()
                    .filter(|item| antecedent.binary_search(item).is_err())
                    .collect();

                let (Some(&antecedent_support), Some(&consequent_support)) = (
                    supports.get(antecedent.as_slice()),
                    supports.get(consequent.as_slice()),
                ) else {
                    trace!("Skipping split with unmined subset");
                    continue;
                };

                let confidence = itemset.support() / antecedent_support;
                let lift = confidence / consequent_support;

                let rule = Rule {
                    antecedent,
                    consequent,
                    support: itemset.support(),
                    confidence,
                    lift,
                };

                if rule.metric(metric) >= min_metric {
                    rules.push(rule);
                }
            }
        }
    }

    rules
}

/// All `size`-element combinations of `items`, in lexical order
fn combinations(items: &[ItemId], size: usize) -> Vec<Vec<ItemId>> {
    fn walk(
        items: &[ItemId],
        size: usize,
        start: usize,
        current: &mut Vec<ItemId>,
        out: &mut Vec<Vec<ItemId>>,
    ) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..items.len() {
            current.push(items[i]);
            walk(items, size, i + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    walk(items, size, 0, &mut Vec::with_capacity(size), &mut out);
    out
}
