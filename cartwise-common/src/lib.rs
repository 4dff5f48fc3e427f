//! # Cartwise Common Library
//!
//! Shared code for the cartwise crates:
//! - Error type
//! - Configuration loading and resolution
//! - Catalog and transaction models
//! - CSV loaders

pub mod config;
pub mod error;
pub mod loader;
pub mod models;

pub use error::{Error, Result};
pub use models::{Product, TransactionRecord};
