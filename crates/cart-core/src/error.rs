//! Error types for the cart core.

use thiserror::Error;

use crate::types::ProductId;

/// Errors from cart mutation and blob encoding.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("item not found in cart: {0}")]
    ItemNotFound(ProductId),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("quantity of {0} is already at its maximum")]
    QuantityOverflow(ProductId),
}

/// Structural problems in line items, either read back from storage or
/// offered to the cart.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("line {index} has an empty product id")]
    EmptyId { index: usize },

    #[error("line {index} ({id}) has quantity 0")]
    ZeroQuantity { index: usize, id: ProductId },

    #[error("line {index} ({id}) has a non-finite or negative price")]
    InvalidPrice { index: usize, id: ProductId },

    #[error("item {id} offered with a non-finite or negative price")]
    InvalidItemPrice { id: ProductId },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
