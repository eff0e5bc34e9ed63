//! Catalog module.
//!
//! Contains the product record served by the lookup service and the stock
//! level reported for it.

mod inventory;
mod product;

pub use inventory::Stock;
pub use product::Product;
