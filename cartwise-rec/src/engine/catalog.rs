//! Product catalog with name lookup

use cartwise_common::Product;
use std::collections::HashMap;

/// Immutable product catalog
///
/// The engine only ever resolves products by name. When two products share
/// a name, the first one in catalog order wins.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_name = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            by_name.entry(product.name.clone()).or_insert(pos);
        }
        Self { products, by_name }
    }

    /// Look up a product by exact name
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.by_name.get(name).map(|&pos| &self.products[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All products in catalog order
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Product names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            category: String::new(),
            price: 0.0,
            image: String::new(),
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = Catalog::new(vec![product(1, "Milk"), product(2, "Bread")]);

        assert_eq!(catalog.get("Bread").map(|p| p.id), Some(2));
        assert!(catalog.get("Caviar").is_none());
        assert!(catalog.contains("Milk"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let catalog = Catalog::new(vec![product(1, "Milk"), product(9, "Milk")]);

        assert_eq!(catalog.get("Milk").map(|p| p.id), Some(1));
        assert_eq!(catalog.all().len(), 2);
    }

    #[test]
    fn test_names_in_catalog_order() {
        let catalog = Catalog::new(vec![product(3, "Tea"), product(1, "Coffee")]);
        assert_eq!(catalog.names(), vec!["Tea", "Coffee"]);
    }
}
