//! Cart and catalog domain types for RocketCart.
//!
//! This crate holds the pure data model shared by the cart manager, the
//! lookup clients and the persistence layer:
//!
//! - **Catalog**: products as returned by the lookup service, stock levels
//! - **Cart**: ordered line items, unique by product, with quantities
//! - **Errors**: the failure kinds every cart operation can report
//!
//! # Example
//!
//! ```rust
//! use rocket_commerce::prelude::*;
//!
//! let sneaker = Product::new(ProductId::new(1), "Tênis de Caminhada Leve Confortável", Price::from_cents(17990));
//!
//! let mut cart = Cart::new();
//! cart.push(LineItem::new(sneaker, 1)).unwrap();
//! cart.increment(ProductId::new(1)).unwrap();
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.subtotal().display(), "$359.80");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use cart::{Cart, LineItem};
pub use catalog::{Product, Stock};
pub use error::CartError;
pub use ids::ProductId;
pub use money::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::Price;

    // Catalog
    pub use crate::catalog::{Product, Stock};

    // Cart
    pub use crate::cart::{Cart, LineItem};
}
