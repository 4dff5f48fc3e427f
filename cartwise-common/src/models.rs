//! Catalog and transaction models

use serde::{Deserialize, Serialize};

/// A product in the storefront catalog
///
/// Only `name` matters to the recommendation engine; the remaining fields
/// are display metadata passed through to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

/// One `(transaction_id, item)` row of the purchase history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub item: String,
}
