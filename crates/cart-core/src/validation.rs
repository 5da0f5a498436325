//! Structural checks for line items.
//!
//! A persisted blob can hold anything, so [`validate_cart`] checks a list read
//! back from storage. [`validate_new_item`] guards the way in: a price that
//! JSON can't represent would otherwise be written as `null` and make the
//! whole blob unreadable. Duplicate ids are allowed: adding the same
//! product twice legitimately yields two lines.

use crate::error::ValidationError;
use crate::item::{CartItem, NewCartItem};

/// Check every line: non-empty id, quantity at least 1, finite non-negative
/// price. Returns the first problem found.
pub fn validate_cart(items: &[CartItem]) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        validate_item(index, item)?;
    }
    Ok(())
}

/// Check an item before it is added: the price must be finite and
/// non-negative.
pub fn validate_new_item(item: &NewCartItem) -> Result<(), ValidationError> {
    if !valid_price(item.price) {
        return Err(ValidationError::InvalidItemPrice {
            id: item.id.clone(),
        });
    }
    Ok(())
}

fn valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

fn validate_item(index: usize, item: &CartItem) -> Result<(), ValidationError> {
    if item.id.is_empty() {
        return Err(ValidationError::EmptyId { index });
    }

    if item.quantity == 0 {
        return Err(ValidationError::ZeroQuantity {
            index,
            id: item.id.clone(),
        });
    }

    if !valid_price(item.price) {
        return Err(ValidationError::InvalidPrice {
            index,
            id: item.id.clone(),
        });
    }

    Ok(())
}
