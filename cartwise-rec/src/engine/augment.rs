//! Seeded corpus augmentation
//!
//! Replicates the base transactions several times, perturbing a fraction
//! of the copies, to densify a small purchase history before mining. The
//! random stream comes from a seeded `StdRng`, so the same base data and
//! settings always produce the same corpus.

use super::corpus::RawTransaction;
use cartwise_common::config::AugmentationConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Transactions longer than this lose their last item when perturbed;
/// shorter ones gain a random catalog item instead.
const TRIM_THRESHOLD: usize = 3;

/// Expand `base` into the mining corpus
///
/// Each of `rounds` passes emits every base transaction once under a fresh
/// sequential id. With probability `mutation_rate` a copy is perturbed.
/// Disabled augmentation returns the base transactions unchanged.
pub fn augment(
    base: &[RawTransaction],
    product_names: &[String],
    config: &AugmentationConfig,
) -> Vec<RawTransaction> {
    if !config.enabled || config.rounds == 0 {
        return base.to_vec();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut augmented = Vec::with_capacity(base.len() * config.rounds);
    let mut next_id: u64 = 1;

    for _ in 0..config.rounds {
        for transaction in base {
            let mut items = transaction.items.clone();

            if rng.gen::<f64>() < config.mutation_rate {
                if items.len() > TRIM_THRESHOLD {
                    items.pop();
                } else if let Some(extra) = product_names.choose(&mut rng) {
                    items.push(extra.clone());
                }
            }

            augmented.push(RawTransaction {
                id: next_id.to_string(),
                items,
            });
            next_id += 1;
        }
    }

    augmented
}
