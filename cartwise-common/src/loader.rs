//! CSV loading for the product catalog and purchase history
//!
//! Both files are read once at startup. Any read or parse failure is fatal
//! to startup and is reported with the offending line number.

use crate::models::{Product, TransactionRecord};
use crate::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Raw product row; display columns may be absent or blank
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: i64,
    name: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    category: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    image: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name.trim().to_string(),
            category: row.category.unwrap_or_default(),
            price: row.price.unwrap_or_default(),
            image: row.image.unwrap_or_default(),
        }
    }
}

/// Load the product catalog, preserving file order
///
/// Expects a header row containing at least `id` and `name`.
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<Product>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let mut products = Vec::new();
    for row in reader.deserialize::<ProductRow>() {
        products.push(Product::from(row?));
    }

    debug!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Load `(transaction_id, item)` rows, preserving file order
///
/// Rows with a blank item are skipped.
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<TransactionRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<TransactionRecord>() {
        let record = row?;
        let item = record.item.trim();
        if item.is_empty() {
            continue;
        }
        records.push(TransactionRecord {
            transaction_id: record.transaction_id.trim().to_string(),
            item: item.to_string(),
        });
    }

    debug!(
        "Loaded {} transaction rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_products() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "id,name,category,price,image").expect("write header");
        writeln!(file, "1,Milk,Dairy,45.5,milk.png").expect("write row");
        writeln!(file, "2,Bread,Bakery,30,bread.png").expect("write row");

        let products = load_products(file.path()).expect("load products");

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Milk");
        assert_eq!(products[0].category, "Dairy");
        assert!((products[0].price - 45.5).abs() < 1e-9);
        assert_eq!(products[1].id, 2);
        assert_eq!(products[1].image, "bread.png");
    }

    #[test]
    fn test_load_products_display_columns_optional() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "id,name,price").expect("write header");
        writeln!(file, "7,Eggs,").expect("write row");

        let products = load_products(file.path()).expect("load products");

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Eggs");
        assert_eq!(products[0].category, "");
        assert_eq!(products[0].price, 0.0);
    }

    #[test]
    fn test_load_products_bad_id_reports_line() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "id,name").expect("write header");
        writeln!(file, "1,Milk").expect("write row");
        writeln!(file, "two,Bread").expect("write row");

        match load_products(file.path()) {
            Err(Error::Csv { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected CSV error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_products_missing_file() {
        let result = load_products("/nonexistent/cartwise/products.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_transactions_skips_blank_items() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "transaction_id,item").expect("write header");
        writeln!(file, "1,Milk").expect("write row");
        writeln!(file, "1, Bread ").expect("write row");
        writeln!(file, "2,").expect("write row");
        writeln!(file, "3,Eggs").expect("write row");

        let records = load_transactions(file.path()).expect("load transactions");

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].item, "Bread");
        assert_eq!(records[2].transaction_id, "3");
    }
}
