//! Shopping-cart state manager for RocketCart storefronts.
//!
//! [`CartManager`] owns the cart: it validates every change against fresh
//! stock from a [`Catalog`], persists the whole cart to a
//! [`KeyValueStore`] after each successful change, and publishes the new
//! state to subscribers. Operations return [`CartError`] so callers can
//! branch on the failure kind.
//!
//! [`CartContext`] is the presentation-facing wrapper: same operations, but
//! failures are turned into one of a few fixed user messages and handed to
//! a [`Notifier`] instead of being returned.
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::MemoryStore;
//! use rocket_cart::CartManager;
//! use rocket_commerce::prelude::*;
//! use rocket_data::StaticCatalog;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let catalog = StaticCatalog::new()
//!     .with_product(Product::new(ProductId::new(1), "Runner", Price::from_cents(9990)), 5);
//! let manager = CartManager::load(catalog, MemoryStore::new()).unwrap();
//!
//! manager.add_product(ProductId::new(1)).await.unwrap();
//! assert_eq!(manager.cart().quantity_of(ProductId::new(1)), 1);
//! # }
//! ```
//!
//! [`Catalog`]: rocket_data::Catalog
//! [`KeyValueStore`]: rocket_cache::KeyValueStore
//! [`CartError`]: rocket_commerce::CartError

mod context;
mod manager;
mod notify;

pub use context::CartContext;
pub use manager::{CartManager, UpdateProductAmount, DEFAULT_CART_KEY};
pub use notify::{notice_for, Notice, Notifier, Operation, RecordingNotifier, TracingNotifier};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartContext, CartManager, Notice, Notifier, Operation, UpdateProductAmount,
    };
    pub use rocket_commerce::prelude::*;
}
