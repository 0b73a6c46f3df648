//! Cart and line item types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use storefront_core::ProductId;

use crate::error::CartError;

/// A line item in the cart.
///
/// Serialized exactly as the storage record: `id`, `name`, `price`,
/// `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identity.
    pub id: ProductId,
    /// Display label (denormalized, not identity).
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Quantity, at least one.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity one.
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    fn validate(&self) -> Result<(), CartError> {
        if self.quantity == 0 {
            return Err(CartError::InvalidQuantity {
                id: self.id.to_string(),
                quantity: self.quantity,
            });
        }
        if !is_valid_price(self.price) {
            return Err(CartError::InvalidPrice {
                id: self.id.to_string(),
                price: self.price,
            });
        }
        Ok(())
    }
}

/// Whether `price` is a usable unit price.
pub(crate) fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

/// How an add changed the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Appended,
    /// An existing line's quantity went up by one.
    Incremented,
}

/// Line items in insertion order, at most one per product id.
///
/// Serializes as a bare JSON array. Deserializing validates the list, so a
/// `Cart` value always satisfies its invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing line keeps its name and price; only its quantity moves.
    pub fn add(&mut self, id: ProductId, name: impl Into<String>, price: f64) -> AddOutcome {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return AddOutcome::Incremented;
        }
        self.items.push(LineItem::new(id, name, price));
        AddOutcome::Appended
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, i| total.saturating_add(i.quantity))
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line subtotals.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(&item.id) {
                return Err(CartError::DuplicateItem(item.id.to_string()));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_then_increments() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(ProductId::new("p1"), "Teddy Bear", 19.99),
            AddOutcome::Appended
        );
        assert_eq!(
            cart.add(ProductId::new("p1"), "Teddy Bear", 19.99),
            AddOutcome::Incremented
        );

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.get(&ProductId::new("p1")).unwrap().quantity, 2);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("b"), "B", 1.0);
        cart.add(ProductId::new("a"), "A", 2.0);
        cart.add(ProductId::new("b"), "B", 1.0);

        let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(cart.total_price(), 4.0);
    }

    #[test]
    fn test_storage_record_shape() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("p1"), "Teddy Bear", 19.99);
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"id": "p1", "name": "Teddy Bear", "price": 19.99, "quantity": 1}])
        );
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"id": "p1", "name": "A", "price": 1.0, "quantity": 1},
            {"id": "p1", "name": "A", "price": 1.0, "quantity": 2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_bad_lines() {
        let zero = r#"[{"id": "p1", "name": "A", "price": 1.0, "quantity": 0}]"#;
        let negative_price = r#"[{"id": "p1", "name": "A", "price": -1.0, "quantity": 1}]"#;
        let negative_qty = r#"[{"id": "p1", "name": "A", "price": 1.0, "quantity": -2}]"#;
        let missing_field = r#"[{"id": "p1", "price": 1.0, "quantity": 1}]"#;

        for json in [zero, negative_price, negative_qty, missing_field] {
            assert!(serde_json::from_str::<Cart>(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn test_try_from_reports_reason() {
        let items = vec![
            LineItem::new(ProductId::new("x"), "X", 1.0),
            LineItem::new(ProductId::new("x"), "X", 1.0),
        ];
        assert_eq!(
            Cart::try_from(items),
            Err(CartError::DuplicateItem("x".to_string()))
        );
    }
}
