//! Stock level reported by the lookup service.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available stock for a product at lookup time.
///
/// Never cached: the cart asks for a fresh value before every quantity
/// increase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the level belongs to.
    pub id: ProductId,
    /// Maximum orderable quantity.
    pub amount: i64,
}

impl Stock {
    /// Create a stock level.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self {
            id,
            amount,
        }
    }

    /// Check if `quantity` units can be ordered.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.amount
    }
}
