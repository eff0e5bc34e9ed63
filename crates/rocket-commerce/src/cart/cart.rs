//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Price;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Ordered by insertion, unique by product id, every amount positive. The
/// serialized form is a bare JSON array of line items, which is exactly what
/// gets persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, checking the invariants.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for item in items {
            if item.amount <= 0 {
                return Err(CartError::InvalidQuantity(item.amount));
            }
            if cart.contains(item.id()) {
                return Err(CartError::DuplicateItem(item.id()));
            }
            cart.items.push(item);
        }
        Ok(cart)
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get a line item by product id.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Quantity held for a product, zero when absent.
    pub fn quantity_of(&self, id: ProductId) -> i64 {
        self.get(id).map(|i| i.amount).unwrap_or(0)
    }

    /// Append a line item.
    ///
    /// If the product is already present its amount is replaced in place,
    /// so the uniqueness invariant holds and the original position is kept.
    pub fn push(&mut self, item: LineItem) -> Result<(), CartError> {
        if item.amount <= 0 {
            return Err(CartError::InvalidQuantity(item.amount));
        }
        match self.items.iter_mut().find(|i| i.id() == item.id()) {
            Some(existing) => existing.amount = item.amount,
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Increase a line item's amount by one. Returns the new amount.
    pub fn increment(&mut self, id: ProductId) -> Result<i64, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or(CartError::NotInCart(id))?;
        item.amount = item
            .amount
            .checked_add(1)
            .ok_or(CartError::InvalidQuantity(item.amount))?;
        Ok(item.amount)
    }

    /// Replace a line item's amount.
    pub fn set_amount(&mut self, id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount <= 0 {
            return Err(CartError::InvalidQuantity(amount));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or(CartError::NotInCart(id))?;
        item.amount = amount;
        Ok(())
    }

    /// Remove a line item, keeping the order of the rest.
    pub fn remove(&mut self, id: ProductId) -> Result<LineItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id() == id)
            .ok_or(CartError::NotInCart(id))?;
        Ok(self.items.remove(index))
    }

    /// Get total item count (sum of amounts).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, i| count.saturating_add(i.amount))
    }

    /// Get number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line subtotals.
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A product held in the cart, with its quantity.
///
/// Serializes as the product's own fields plus `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// The catalog record, as fetched when the item was first added.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity.
    pub amount: i64,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(product: Product, amount: i64) -> Self {
        Self { product, amount }
    }

    /// Product id.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount. A line without a numeric price counts as zero.
    pub fn subtotal(&self) -> Price {
        self.product.price().unwrap_or(Price::ZERO).times(self.amount)
    }
}
