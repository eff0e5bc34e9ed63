//! Cart error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in cart operations.
///
/// Every variant is a distinct, matchable kind; presentation layers decide
/// which of them collapse into the same user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Product does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product is not a line item of the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// Requested quantity is above the available stock.
    #[error("Requested quantity out of stock for {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Line item quantity must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Two line items share a product.
    #[error("Duplicate line item: {0}")]
    DuplicateItem(ProductId),

    /// Product/stock lookup failed (transport, HTTP status, malformed body).
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CartError {
    /// Whether this error is a stock rejection.
    pub fn is_stock_exceeded(&self) -> bool {
        matches!(self, CartError::StockExceeded { .. })
    }

    /// Whether this error means the product could not be found, either in
    /// the catalog or in the cart.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CartError::ProductNotFound(_) | CartError::NotInCart(_)
        )
    }
}
