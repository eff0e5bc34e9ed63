//! Presentation-facing cart handle.

use rocket_cache::KeyValueStore;
use rocket_commerce::{Cart, CartError, ProductId};
use rocket_data::Catalog;
use tokio::sync::watch;

use crate::manager::{CartManager, UpdateProductAmount};
use crate::notify::{notice_for, Notice, Notifier, Operation};

/// The handle UI code is given.
///
/// Read access to the cart plus the three operations. Failures are not
/// returned; they are reported through the notifier as one of the fixed
/// [`Notice`] messages.
pub struct CartContext<C, S, N> {
    manager: CartManager<C, S>,
    notifier: N,
}

impl<C, S, N> CartContext<C, S, N>
where
    C: Catalog,
    S: KeyValueStore,
    N: Notifier,
{
    /// Wrap a manager.
    pub fn new(manager: CartManager<C, S>, notifier: N) -> Self {
        Self { manager, notifier }
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.manager.cart()
    }

    /// Receive every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.manager.subscribe()
    }

    /// The wrapped manager.
    pub fn manager(&self) -> &CartManager<C, S> {
        &self.manager
    }

    /// The notifier failures are reported to.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Add one unit of a product.
    pub async fn add_product(&self, product_id: ProductId) {
        let result = self.manager.add_product(product_id).await;
        self.report(Operation::Add, result);
    }

    /// Remove a product's line item.
    pub fn remove_product(&self, product_id: ProductId) {
        let result = self.manager.remove_product(product_id);
        self.report(Operation::Remove, result);
    }

    /// Set a line item's amount. Zero or negative amounts are ignored.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        let result = self.manager.update_product_amount(update).await;
        self.report(Operation::UpdateAmount, result);
    }

    fn report(&self, operation: Operation, result: Result<(), CartError>) {
        if let Err(err) = result {
            let notice: Notice = notice_for(operation, &err);
            self.notifier.error(notice);
        }
    }
}
