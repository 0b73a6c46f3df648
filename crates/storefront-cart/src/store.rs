//! Session cart store mirrored to durable storage.

use storefront_core::{ProductId, RenderCommand};

use crate::cart::{is_valid_price, AddOutcome, Cart, LineItem};
use crate::storage::KeyValueStore;

/// Result of a successful add.
#[derive(Debug, Clone, PartialEq)]
pub struct CartAdded {
    /// Product added.
    pub product_id: ProductId,
    /// Name passed with the add, for the notification.
    pub name: String,
    /// Whether a line was appended or incremented.
    pub outcome: AddOutcome,
    /// Line quantity after the add.
    pub quantity: u32,
    /// Cart count after the add.
    pub count: u32,
    /// Whether the mirror write succeeded.
    pub persisted: bool,
}

/// The session's authoritative cart.
///
/// Loaded once from the mirror, mutated only through [`CartStore::add_item`],
/// and written back in full after every mutation. Storage faults never
/// reach the caller: a bad mirror loads as an empty cart and a failed write
/// leaves the in-memory cart in charge.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    count: u32,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart mirrored under `key`.
    ///
    /// A missing, unparsable or invalid mirror yields an empty cart.
    pub fn initialize(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match storage.get::<Cart>(&key) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cart mirror");
                Cart::new()
            }
        };
        let count = cart.item_count();
        tracing::debug!(key = %key, lines = cart.unique_item_count(), count, "cart loaded");
        Self {
            cart,
            count,
            storage,
            key,
        }
    }

    /// Add one unit of a product.
    ///
    /// Returns `None` and leaves the cart untouched when `unit_price` is
    /// negative or not finite.
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: f64,
    ) -> Option<CartAdded> {
        let name = name.into();
        if !is_valid_price(unit_price) {
            tracing::warn!(product = %id, price = unit_price, "rejecting add with invalid price");
            return None;
        }

        let outcome = self.cart.add(id.clone(), name.clone(), unit_price);
        self.count = self.cart.item_count();
        let persisted = self.persist();
        let quantity = self.cart.get(&id).map(|i| i.quantity).unwrap_or(0);

        tracing::debug!(product = %id, ?outcome, quantity, count = self.count, "item added");
        Some(CartAdded {
            product_id: id,
            name,
            outcome,
            quantity,
            count: self.count,
            persisted,
        })
    }

    fn persist(&mut self) -> bool {
        match self.storage.set(&self.key, &self.cart) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to write cart mirror");
                false
            }
        }
    }

    /// Total item count (sum of quantities).
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// The cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Badge command: shows the count, visible iff the cart is not empty.
    pub fn badge(&self) -> RenderCommand {
        RenderCommand::CartBadge {
            count: self.count,
            visible: self.count > 0,
        }
    }

    /// Storage key of the mirror.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backing store, for data living beside the cart.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give the backing store back.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    const KEY: &str = "itiShopCart";

    /// A store whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_raw(key)
        }

        fn set_raw(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::StoreError("quota exceeded".to_string()))
        }

        fn delete(&mut self, key: &str) -> Result<(), StorageError> {
            self.0.delete(key)
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            self.0.keys()
        }
    }

    #[test]
    fn test_empty_mirror_is_empty_cart() {
        let store = CartStore::initialize(MemoryStore::new(), KEY);
        assert_eq!(store.count(), 0);
        assert!(store.items().is_empty());
        assert_eq!(
            store.badge(),
            RenderCommand::CartBadge {
                count: 0,
                visible: false
            }
        );
    }

    #[test]
    fn test_repeat_add_increments() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        let first = store
            .add_item(ProductId::new("p1"), "Teddy Bear", 19.99)
            .unwrap();
        let second = store
            .add_item(ProductId::new("p1"), "Teddy Bear", 19.99)
            .unwrap();

        assert_eq!(first.outcome, AddOutcome::Appended);
        assert_eq!(second.outcome, AddOutcome::Incremented);
        assert_eq!(second.quantity, 2);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.count(), 2);
        assert!(second.persisted);
    }

    #[test]
    fn test_count_matches_calls_for_distinct_ids() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        for i in 0..7 {
            store.add_item(ProductId::new(format!("product-{}", i)), format!("Toy {}", i), 5.0);
        }
        assert_eq!(store.count(), 7);

        store.add_item(ProductId::new(format!("product-{}", 2)), "Toy 2", 5.0);
        store.add_item(ProductId::new(format!("product-{}", 2)), "Toy 2", 5.0);
        assert_eq!(store.count(), 9);
        assert_eq!(store.items().len(), 7);
        let sum: u32 = store.items().iter().map(|i| i.quantity).sum();
        assert_eq!(sum, store.count());
    }

    #[test]
    fn test_reload_roundtrip_preserves_order_and_quantities() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        store.add_item(ProductId::new("b"), "Blocks", 12.5);
        store.add_item(ProductId::new("a"), "Abacus", 8.0);
        store.add_item(ProductId::new("b"), "Blocks", 12.5);
        let before = store.items().to_vec();

        let reloaded = CartStore::initialize(store.into_storage(), KEY);
        assert_eq!(reloaded.items(), before.as_slice());
        assert_eq!(reloaded.count(), 3);
    }

    #[test]
    fn test_reload_keeps_exact_prices() {
        let prices = [
            13.738318465624525,
            14.084489157163967,
            92.10466852021881,
            119.68516999682357,
            0.1 + 0.2,
        ];
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        for (i, price) in prices.iter().enumerate() {
            store.add_item(ProductId::new(format!("product-{}", i)), format!("Toy {}", i), *price);
        }

        let reloaded = CartStore::initialize(store.into_storage(), KEY);
        let loaded: Vec<u64> = reloaded.items().iter().map(|i| i.price.to_bits()).collect();
        let expected: Vec<u64> = prices.iter().map(|p| p.to_bits()).collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_corrupt_mirror_resets_silently() {
        for raw in ["{broken", "42", r#"{"id":"p1"}"#, r#"[{"id":"p1","name":"A","price":1,"quantity":0}]"#] {
            let store = CartStore::initialize(MemoryStore::with_entry(KEY, raw), KEY);
            assert_eq!(store.count(), 0, "{}", raw);
            assert!(store.items().is_empty());
        }
    }

    #[test]
    fn test_corrupt_mirror_overwritten_on_next_add() {
        let mut store = CartStore::initialize(MemoryStore::with_entry(KEY, "garbage"), KEY);
        store.add_item(ProductId::new("p1"), "Teddy Bear", 19.99);

        let reloaded = CartStore::initialize(store.into_storage(), KEY);
        assert_eq!(reloaded.count(), 1);
    }

    #[test]
    fn test_invalid_price_is_noop() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        assert!(store.add_item(ProductId::new("p1"), "A", -1.0).is_none());
        assert!(store.add_item(ProductId::new("p1"), "A", f64::NAN).is_none());
        assert!(store
            .add_item(ProductId::new("p1"), "A", f64::INFINITY)
            .is_none());
        assert_eq!(store.count(), 0);
        assert!(!store.storage().exists(KEY).unwrap());
    }

    #[test]
    fn test_zero_price_accepted() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        assert!(store.add_item(ProductId::new("gift"), "Gift", 0.0).is_some());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_write_failure_keeps_session_cart() {
        let mut store = CartStore::initialize(ReadOnlyStore::default(), KEY);
        let added = store.add_item(ProductId::new("p1"), "A", 3.0).unwrap();
        assert!(!added.persisted);
        assert_eq!(store.count(), 1);
    }
}
