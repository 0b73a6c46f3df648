//! Cart error types.

use thiserror::Error;

/// Reasons a persisted item list is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CartError {
    /// Same product listed twice.
    #[error("Duplicate product in cart: {0}")]
    DuplicateItem(String),

    /// Quantity below one.
    #[error("Invalid quantity for {id}: {quantity}")]
    InvalidQuantity { id: String, quantity: u32 },

    /// Negative or non-finite unit price.
    #[error("Invalid price for {id}: {price}")]
    InvalidPrice { id: String, price: f64 },
}

/// Errors raised by a key-value backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or parse a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to perform a store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}
