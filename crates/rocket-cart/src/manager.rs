//! The cart manager.

use rocket_cache::{Cache, CacheError, KeyValueStore};
use rocket_commerce::{Cart, CartError, LineItem, ProductId};
use rocket_data::Catalog;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Storage key the cart blob is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Arguments for [`CartManager::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    /// Product to change.
    pub product_id: ProductId,
    /// Target quantity. Zero or negative is ignored.
    pub amount: i64,
}

/// Owns the cart state, validates changes against stock, persists and
/// publishes every committed cart.
///
/// All mutation goes through the three operations. Each performs its
/// lookups first, then reads the current cart, validates, builds the new cart
/// and commits it without suspending, so the step from reading state to
/// publishing it cannot interleave with another operation on this manager.
pub struct CartManager<C, S> {
    catalog: C,
    cache: Cache<S>,
    key: String,
    state: watch::Sender<Cart>,
}

impl<C, S> CartManager<C, S>
where
    C: Catalog,
    S: KeyValueStore,
{
    /// Restore the cart persisted under [`DEFAULT_CART_KEY`], or start empty.
    pub fn load(catalog: C, store: S) -> Result<Self, CartError> {
        Self::load_with_key(catalog, store, DEFAULT_CART_KEY)
    }

    /// Restore the cart persisted under `key`, or start empty.
    ///
    /// A blob that no longer decodes into a valid cart is discarded with a
    /// warning; the next commit overwrites it. Failing to read the store at
    /// all is an error.
    pub fn load_with_key(catalog: C, store: S, key: impl Into<String>) -> Result<Self, CartError> {
        let key = key.into();
        let cache = Cache::new(store);

        let cart = match cache.get::<Cart>(&key) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(%key, error = %e, "discarding unreadable cart");
                Cart::new()
            }
            Err(e) => return Err(CartError::Storage(e.to_string())),
        };

        tracing::debug!(%key, items = cart.len(), "cart loaded");

        let (state, _) = watch::channel(cart);
        Ok(Self {
            catalog,
            cache,
            key,
            state,
        })
    }

    /// Snapshot of the current cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receive every committed cart.
    ///
    /// The receiver starts out holding the current cart and is notified
    /// after each successful operation.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The lookup service in use.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Add one unit of a product.
    ///
    /// Appends a new line item with amount 1, or bumps an existing one by
    /// one in place. Fails with `ProductNotFound` when the catalog has no such
    /// product and `StockExceeded` when the resulting amount would be above
    /// the current stock.
    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        self.try_add_product(product_id)
            .await
            .inspect_err(log_failure)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id))?;
        let stock = self.catalog.stock(product_id).await?;

        let mut cart = self.cart();
        let current = cart.quantity_of(product_id);
        match current.checked_add(1) {
            Some(requested) if stock.can_fulfill(requested) => {}
            _ => {
                return Err(CartError::StockExceeded {
                    product_id,
                    requested: current.saturating_add(1),
                    available: stock.amount,
                })
            }
        }

        if cart.contains(product_id) {
            cart.increment(product_id)?;
        } else {
            cart.push(LineItem::new(product, 1))?;
        }
        self.commit(cart)
    }

    /// Remove a product's line item.
    ///
    /// Fails with `NotInCart` when there is nothing to remove.
    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut cart = self.cart();
        cart.remove(product_id)
            .and_then(|_| self.commit(cart))
            .inspect_err(log_failure)
    }

    /// Set a line item's amount.
    ///
    /// An amount of zero or less is ignored without touching the catalog.
    /// Otherwise stock is checked first (`StockExceeded`), then presence in
    /// the cart (`NotInCart`).
    #[tracing::instrument(skip(self, update), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        self.try_update_product_amount(update)
            .await
            .inspect_err(log_failure)
    }

    async fn try_update_product_amount(
        &self,
        UpdateProductAmount { product_id, amount }: UpdateProductAmount,
    ) -> Result<(), CartError> {
        if amount <= 0 {
            return Ok(());
        }

        let stock = self.catalog.stock(product_id).await?;
        if !stock.can_fulfill(amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut cart = self.cart();
        cart.set_amount(product_id, amount)?;
        self.commit(cart)
    }

    /// Persist `cart`, then publish it.
    ///
    /// The write happens first so a failed write leaves both the stored blob
    /// and the published state at their previous value.
    fn commit(&self, cart: Cart) -> Result<(), CartError> {
        self.cache
            .set(&self.key, &cart)
            .map_err(|e| CartError::Storage(e.to_string()))?;

        tracing::debug!(
            items = cart.len(),
            count = cart.item_count(),
            "cart committed"
        );
        self.state.send_replace(cart);
        Ok(())
    }
}

fn log_failure(err: &CartError) {
    match err {
        CartError::Lookup(_) | CartError::Storage(_) => {
            tracing::warn!(error = %err, "cart operation failed");
        }
        _ => tracing::debug!(error = %err, "cart operation rejected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket_cache::MemoryStore;
    use rocket_commerce::{Price, Product};
    use rocket_data::StaticCatalog;
    use std::sync::Arc;

    fn product(id: u64) -> Product {
        Product::new(ProductId::new(id), format!("Sneaker {}", id), Price::from_cents(10000 + id as i64))
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_product(product(1), 5)
            .with_product(product(2), 2)
            .with_product(product(3), 0)
    }

    fn manager() -> CartManager<StaticCatalog, Arc<MemoryStore>> {
        CartManager::load(catalog(), Arc::new(MemoryStore::new())).unwrap()
    }

    fn id(n: u64) -> ProductId {
        ProductId::new(n)
    }

    fn amounts(cart: &Cart) -> Vec<(u64, i64)> {
        cart.iter().map(|i| (i.id().get(), i.amount)).collect()
    }

    fn persisted(manager: &CartManager<StaticCatalog, Arc<MemoryStore>>) -> Option<String> {
        manager.cache.store().get(DEFAULT_CART_KEY).unwrap()
    }

    #[tokio::test]
    async fn test_add_new_product_appends() {
        let manager = manager();
        manager.add_product(id(2)).await.unwrap();
        manager.add_product(id(1)).await.unwrap();

        let cart = manager.cart();
        assert_eq!(amounts(&cart), vec![(2, 1), (1, 1)]);
        assert_eq!(cart.items()[1].product, product(1));
    }

    #[tokio::test]
    async fn test_add_existing_increments_in_place() {
        let manager = manager();
        manager.add_product(id(1)).await.unwrap();
        manager.add_product(id(2)).await.unwrap();
        manager.add_product(id(1)).await.unwrap();

        assert_eq!(amounts(&manager.cart()), vec![(1, 2), (2, 1)]);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let manager = manager();
        let err = manager.add_product(id(99)).await.unwrap_err();
        assert_eq!(err, CartError::ProductNotFound(id(99)));
        // Stock is only consulted for products that exist.
        assert_eq!(manager.catalog().stock_lookups(), 0);
        assert!(persisted(&manager).is_none());
    }

    #[tokio::test]
    async fn test_add_beyond_stock_leaves_cart_untouched() {
        let manager = manager();
        manager.add_product(id(2)).await.unwrap();
        manager.add_product(id(2)).await.unwrap();
        let before = persisted(&manager);

        let err = manager.add_product(id(2)).await.unwrap_err();
        assert_eq!(
            err,
            CartError::StockExceeded {
                product_id: id(2),
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(amounts(&manager.cart()), vec![(2, 2)]);
        assert_eq!(persisted(&manager), before);
    }

    #[tokio::test]
    async fn test_add_out_of_stock_product() {
        let manager = manager();
        let err = manager.add_product(id(3)).await.unwrap_err();
        assert!(err.is_stock_exceeded());
        assert!(manager.cart().is_empty());
    }

    #[tokio::test]
    async fn test_add_with_lookup_failure() {
        let manager = manager();
        manager.catalog().clear_stock(id(1));
        let err = manager.add_product(id(1)).await.unwrap_err();
        assert!(matches!(err, CartError::Lookup(_)));
        assert!(manager.cart().is_empty());
    }

    #[tokio::test]
    async fn test_add_at_max_amount_is_rejected() {
        let manager = manager();
        manager.catalog().set_stock(id(1), i64::MAX);
        manager.add_product(id(1)).await.unwrap();
        manager
            .update_product_amount(UpdateProductAmount { product_id: id(1), amount: i64::MAX })
            .await
            .unwrap();

        let err = manager.add_product(id(1)).await.unwrap_err();
        assert_eq!(
            err,
            CartError::StockExceeded {
                product_id: id(1),
                requested: i64::MAX,
                available: i64::MAX,
            }
        );
        assert_eq!(amounts(&manager.cart()), vec![(1, i64::MAX)]);
    }

    #[tokio::test]
    async fn test_remove_product() {
        let manager = manager();
        manager.add_product(id(1)).await.unwrap();
        manager.add_product(id(2)).await.unwrap();

        manager.remove_product(id(1)).unwrap();
        assert_eq!(amounts(&manager.cart()), vec![(2, 1)]);

        let err = manager.remove_product(id(1)).unwrap_err();
        assert_eq!(err, CartError::NotInCart(id(1)));
        assert_eq!(amounts(&manager.cart()), vec![(2, 1)]);
    }

    #[tokio::test]
    async fn test_update_amount() {
        let manager = manager();
        manager.add_product(id(1)).await.unwrap();
        manager.add_product(id(2)).await.unwrap();

        manager
            .update_product_amount(UpdateProductAmount { product_id: id(1), amount: 5 })
            .await
            .unwrap();
        assert_eq!(amounts(&manager.cart()), vec![(1, 5), (2, 1)]);
    }

    #[tokio::test]
    async fn test_update_non_positive_amount_is_ignored() {
        let manager = manager();
        manager.add_product(id(1)).await.unwrap();
        let lookups = manager.catalog().stock_lookups();

        for amount in [0, -1] {
            manager
                .update_product_amount(UpdateProductAmount { product_id: id(1), amount })
                .await
                .unwrap();
        }
        assert_eq!(amounts(&manager.cart()), vec![(1, 1)]);
        assert_eq!(manager.catalog().stock_lookups(), lookups);
    }

    #[tokio::test]
    async fn test_update_checks_stock_before_presence() {
        let manager = manager();
        // Not in cart and above stock: stock wins.
        let err = manager
            .update_product_amount(UpdateProductAmount { product_id: id(2), amount: 3 })
            .await
            .unwrap_err();
        assert!(err.is_stock_exceeded());

        let err = manager
            .update_product_amount(UpdateProductAmount { product_id: id(2), amount: 2 })
            .await
            .unwrap_err();
        assert_eq!(err, CartError::NotInCart(id(2)));
        assert!(manager.cart().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_blob_matches_state() {
        let manager = manager();
        manager.add_product(id(1)).await.unwrap();
        manager.add_product(id(2)).await.unwrap();
        manager
            .update_product_amount(UpdateProductAmount { product_id: id(1), amount: 4 })
            .await
            .unwrap();

        let blob = persisted(&manager).unwrap();
        let restored: Cart = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored, manager.cart());
    }

    #[tokio::test]
    async fn test_load_restores_persisted_cart() {
        let store = Arc::new(MemoryStore::new());
        let first = CartManager::load(catalog(), Arc::clone(&store)).unwrap();
        first.add_product(id(1)).await.unwrap();
        first.add_product(id(1)).await.unwrap();

        let second = CartManager::load(catalog(), store).unwrap();
        assert_eq!(amounts(&second.cart()), vec![(1, 2)]);
    }

    #[tokio::test]
    async fn test_load_discards_corrupt_blob() {
        let store = Arc::new(MemoryStore::new());
        store.set(DEFAULT_CART_KEY, "[{\"id\": 1}]").unwrap();

        let manager = CartManager::load(catalog(), Arc::clone(&store)).unwrap();
        assert!(manager.cart().is_empty());

        manager.add_product(id(1)).await.unwrap();
        let blob = store.get(DEFAULT_CART_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<Cart>(&blob).is_ok());
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let store = Arc::new(MemoryStore::new());
        let manager = CartManager::load_with_key(catalog(), Arc::clone(&store), "cart:v2").unwrap();
        manager.add_product(id(1)).await.unwrap();

        assert_eq!(manager.storage_key(), "cart:v2");
        assert!(store.get("cart:v2").unwrap().is_some());
        assert!(store.get(DEFAULT_CART_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_commits() {
        let manager = manager();
        let mut rx = manager.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        manager.add_product(id(1)).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(amounts(&rx.borrow_and_update()), vec![(1, 1)]);

        // Rejected operations publish nothing.
        let _ = manager.remove_product(id(2));
        assert!(!rx.has_changed().unwrap());
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disk full".into()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_failed_write_does_not_publish() {
        let manager = CartManager::load(catalog(), FailingStore).unwrap();
        let err = manager.add_product(id(1)).await.unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));
        assert!(manager.cart().is_empty());
    }
}
