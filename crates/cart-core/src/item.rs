//! Line items: one product entry in the cart carrying its own quantity.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product line in the cart.
///
/// `price` is the unit price captured when the item was added and is never
/// changed afterwards. `quantity` is always at least 1 while the item is in
/// a [`Cart`](crate::Cart); an item that would drop to zero is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Display image reference.
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Number of units of this line.
    pub quantity: u32,
}

impl CartItem {
    /// Create a line item with an explicit quantity.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
            quantity,
        }
    }

    /// Whether this line belongs to the given product.
    pub fn is(&self, id: &str) -> bool {
        self.id.as_str() == id
    }
}

/// An item as offered to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    pub price: f64,
}

impl NewCartItem {
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn the offered item into a line item with quantity 1.
    pub fn into_line_item(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

impl From<CartItem> for NewCartItem {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
        }
    }
}
