//! Error types for the cart store.

use cart_core::{CoreError, ProductId, ValidationError};
use cart_store::StoreError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// `increment` or `decrement` named a product with no line in the cart.
    #[error("item not found in cart: {0}")]
    ItemNotFound(ProductId),

    /// The cart was looked up outside of a provider scope.
    #[error("use_cart must be called within a cart provider scope")]
    OutsideScope,

    /// Storage error. Only surfaced under [`WritePolicy::Strict`](crate::WritePolicy).
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A loaded blob failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Encoding or other core error.
    #[error("core error: {0}")]
    Core(CoreError),
}

impl From<CoreError> for CartError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::ItemNotFound(id) => CartError::ItemNotFound(id),
            other => CartError::Core(other),
        }
    }
}

/// Result type for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
