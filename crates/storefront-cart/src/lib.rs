//! Shopping cart state for the storefront.
//!
//! - **Cart**: ordered line items, at most one per product id
//! - **CartStore**: the session's authoritative cart, mirrored to a
//!   key-value store after every mutation
//! - **Storage**: the key-value seam, with in-memory and file backends
//! - **Price**: display-text price parsing and formatting
//!
//! # Example
//!
//! ```rust
//! use storefront_cart::{CartStore, MemoryStore};
//! use storefront_core::ProductId;
//!
//! let mut store = CartStore::initialize(MemoryStore::new(), "itiShopCart");
//! store.add_item(ProductId::new("p1"), "Teddy Bear", 19.99);
//! store.add_item(ProductId::new("p1"), "Teddy Bear", 19.99);
//! assert_eq!(store.count(), 2);
//!
//! // The mirror survives a reload.
//! let store = CartStore::initialize(store.into_storage(), "itiShopCart");
//! assert_eq!(store.items()[0].quantity, 2);
//! ```

mod cart;
mod error;
mod price;
mod storage;
mod store;

pub use cart::{AddOutcome, Cart, LineItem};
pub use error::{CartError, StorageError};
pub use price::{format_price, parse_display_price};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{CartAdded, CartStore};
