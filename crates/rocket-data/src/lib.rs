//! Product and stock lookup clients for RocketCart.
//!
//! This crate provides:
//! - `Catalog` - the lookup seam the cart manager depends on
//! - `HttpCatalog` - `GET products/{id}` and `GET stock/{id}` against a REST API
//! - `StaticCatalog` - the same lookups served from a `db.json` fixture
//! - `FetchClient` - thin JSON-over-HTTP client with a base URL

mod catalog;
mod client;
mod error;
mod fixture;

pub use catalog::{Catalog, HttpCatalog};
pub use client::FetchClient;
pub use error::FetchError;
pub use fixture::{CatalogDatabase, StaticCatalog};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Catalog, FetchClient, FetchError, HttpCatalog, StaticCatalog};
}
