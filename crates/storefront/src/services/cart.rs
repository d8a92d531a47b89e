//! Session-backed cart store.
//!
//! The store owns the in-memory [`Cart`] for one request and mirrors it to
//! the session store after every mutation, so the persisted value is always
//! a snapshot of the state the visitor last saw. The in-memory state is
//! authoritative: a failed write is logged and the operation still counts
//! as succeeded for the current session.
//!
//! Mutations return the human-readable notification for the toast UI, or
//! `None` when the operation was a no-op.

use terracotta_core::{Cart, CartSnapshot, ProductDescriptor, ProductId, QuantityChange};
use tower_sessions::Session;

/// Session key holding the entire serialized cart.
pub const CART_KEY: &str = "cart";

/// Notification shown when a line leaves the cart.
const REMOVED_NOTIFICATION: &str = "Item removed from cart";

/// The cart store for one visitor session.
pub struct CartStore {
    session: Session,
    cart: Cart,
}

impl CartStore {
    /// Load the visitor's cart from the session.
    ///
    /// An absent, unreadable, or malformed stored value yields an empty
    /// cart; loading never fails the caller.
    pub async fn load(session: Session) -> Self {
        let cart = match session.get::<Cart>(CART_KEY).await {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored cart unreadable, starting empty");
                Cart::new()
            }
        };

        Self { session, cart }
    }

    /// Add one unit of `product`, merging into an existing line when the id
    /// is already in the cart. Returns the confirmation notification.
    pub async fn add(&mut self, product: ProductDescriptor) -> String {
        let name = product.name.clone();
        let quantity = self.cart.add(product);
        self.persist().await;

        tracing::debug!(product = %name, quantity, "Added to cart");
        format!("{name} added to cart!")
    }

    /// Adjust the quantity of the line with `id` by `delta`.
    ///
    /// A drop to zero or below removes the line. Unknown ids are a no-op
    /// and persist nothing.
    pub async fn update_quantity(&mut self, id: ProductId, delta: i64) -> Option<String> {
        match self.cart.update_quantity(id, delta) {
            QuantityChange::Updated(quantity) => {
                self.persist().await;
                tracing::debug!(%id, quantity, "Cart quantity updated");
                None
            }
            QuantityChange::Removed => {
                self.persist().await;
                tracing::debug!(%id, "Cart line removed via quantity update");
                Some(REMOVED_NOTIFICATION.to_owned())
            }
            QuantityChange::NotFound => None,
        }
    }

    /// Delete the line with `id`. Unknown ids are a no-op and persist
    /// nothing.
    pub async fn remove(&mut self, id: ProductId) -> Option<String> {
        if self.cart.remove(id).is_none() {
            return None;
        }
        self.persist().await;

        tracing::debug!(%id, "Removed from cart");
        Some(REMOVED_NOTIFICATION.to_owned())
    }

    /// Read-only projection of the cart for display.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Mirror the in-memory cart to the session store.
    ///
    /// A write failure leaves the in-memory cart authoritative for the rest
    /// of the session; the visitor only loses cross-reload durability.
    async fn persist(&self) {
        if let Err(e) = self.session.insert(CART_KEY, &self.cart).await {
            tracing::error!(error = %e, "Failed to persist cart to session store");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use terracotta_core::Price;
    use tower_sessions::MemoryStore;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn product(id: i64, name: &str, price: &str) -> ProductDescriptor {
        ProductDescriptor {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::parse(price).unwrap(),
            image: format!("/static/images/{}.jpg", name.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn test_load_absent_yields_empty_cart() {
        let store = CartStore::load(test_session()).await;
        assert!(store.is_empty());
        assert_eq!(store.total_item_count(), 0);
    }

    #[tokio::test]
    async fn test_load_malformed_yields_empty_cart() {
        let session = test_session();
        session.insert(CART_KEY, "definitely not a cart").await.unwrap();

        let store = CartStore::load(session).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_notifies_and_persists() {
        let session = test_session();

        let mut store = CartStore::load(session.clone()).await;
        let notification = store.add(product(1, "Glazed Mug", "9.99")).await;
        assert_eq!(notification, "Glazed Mug added to cart!");

        // A fresh store over the same session sees the persisted cart.
        let reloaded = CartStore::load(session).await;
        assert_eq!(reloaded.total_item_count(), 1);
        assert_eq!(reloaded.snapshot().total_price.to_string(), "$9.99");
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_and_notifies() {
        let session = test_session();
        let mut store = CartStore::load(session.clone()).await;
        store.add(product(1, "Glazed Mug", "9.99")).await;

        let notification = store.update_quantity(ProductId::new(1), -1).await;
        assert_eq!(notification.as_deref(), Some("Item removed from cart"));

        let reloaded = CartStore::load(session).await;
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn test_update_in_range_has_no_notification() {
        let session = test_session();
        let mut store = CartStore::load(session.clone()).await;
        store.add(product(1, "Glazed Mug", "9.99")).await;

        let notification = store.update_quantity(ProductId::new(1), 2).await;
        assert!(notification.is_none());

        let reloaded = CartStore::load(session).await;
        assert_eq!(reloaded.total_item_count(), 3);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_noops() {
        let session = test_session();
        let mut store = CartStore::load(session.clone()).await;
        store.add(product(1, "Glazed Mug", "9.99")).await;

        assert!(store.update_quantity(ProductId::new(99), -1).await.is_none());
        assert!(store.remove(ProductId::new(99)).await.is_none());

        let reloaded = CartStore::load(session).await;
        assert_eq!(reloaded.total_item_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_notifies() {
        let session = test_session();
        let mut store = CartStore::load(session.clone()).await;
        store.add(product(2, "Serving Bowl", "32.50")).await;

        let notification = store.remove(ProductId::new(2)).await;
        assert_eq!(notification.as_deref(), Some("Item removed from cart"));
        assert!(store.is_empty());
    }
}
