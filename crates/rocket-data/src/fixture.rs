//! Catalog served from an in-process fixture.
//!
//! The fixture has the same shape as the `db.json` a json-server mock API
//! is started with, so one file can back both the HTTP catalog during
//! development and this offline catalog in tests and demos.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use rocket_commerce::{Product, ProductId, Stock};
use serde::{Deserialize, Serialize};

use crate::{Catalog, FetchError};

/// Contents of a `db.json` fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDatabase {
    /// Product records.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Stock levels.
    #[serde(default)]
    pub stock: Vec<Stock>,
}

/// In-memory [`Catalog`].
///
/// Missing stock entries answer like the mock API does, with a 404 error.
/// Every lookup is counted so callers can assert which calls were made.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    product_lookups: AtomicUsize,
    stock_lookups: AtomicUsize,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from fixture contents.
    pub fn from_database(db: CatalogDatabase) -> Self {
        let catalog = Self::new();
        for product in db.products {
            catalog.insert_product(product);
        }
        for stock in db.stock {
            catalog.set_stock(stock.id, stock.amount);
        }
        catalog
    }

    /// Parse a `db.json` document.
    pub fn from_json_str(json: &str) -> Result<Self, FetchError> {
        let db: CatalogDatabase = serde_json::from_str(json)?;
        Ok(Self::from_database(db))
    }

    /// Load a `db.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Add a product with a stock level.
    pub fn with_product(self, product: Product, stock: i64) -> Self {
        self.set_stock(product.id, stock);
        self.insert_product(product);
        self
    }

    /// Add or replace a product record.
    pub fn insert_product(&self, product: Product) {
        self.products.write().insert(product.id, product);
    }

    /// Set the stock level for a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        self.stock.write().insert(id, amount);
    }

    /// Drop the stock entry for a product.
    pub fn clear_stock(&self, id: ProductId) {
        self.stock.write().remove(&id);
    }

    /// Number of product lookups served so far.
    pub fn product_lookups(&self) -> usize {
        self.product_lookups.load(Ordering::Relaxed)
    }

    /// Number of stock lookups served so far.
    pub fn stock_lookups(&self) -> usize {
        self.stock_lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        self.product_lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.products.read().get(&id).cloned())
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        self.stock_lookups.fetch_add(1, Ordering::Relaxed);
        self.stock
            .read()
            .get(&id)
            .map(|&amount| Stock::new(id, amount))
            .ok_or_else(|| FetchError::Http {
                status: 404,
                url: format!("stock/{}", id),
            })
    }
}
