//! Product and stock lookup.

use std::sync::Arc;

use async_trait::async_trait;
use rocket_commerce::{Product, ProductId, Stock};
use serde::Deserialize;

use crate::{FetchClient, FetchError};

/// Remote source of product metadata and stock levels.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Look up a product. `Ok(None)` means the catalog has no such product.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError>;

    /// Look up the current stock level for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        (**self).product(id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        (**self).stock(id).await
    }
}

/// Catalog served by a REST API exposing `products/{id}` and `stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

#[derive(Deserialize)]
struct StockBody {
    amount: i64,
}

impl HttpCatalog {
    /// Create a catalog over an existing client.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Create a catalog for `base_url` with default client settings.
    pub fn from_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self::new(FetchClient::new(base_url)?))
    }

    /// The underlying client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        let product: Option<Product> = self
            .client
            .get_optional_json(&format!("products/{}", id))
            .await?;

        // A record for another id is as good as no record.
        Ok(product.filter(|p| p.id == id))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, FetchError> {
        let body: StockBody = self.client.get_json(&format!("stock/{}", id)).await?;
        Ok(Stock::new(id, body.amount))
    }
}
