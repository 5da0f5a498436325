//! Golden blob vectors.
//!
//! Each vector pins the exact text a cart encodes to. A change in field
//! names, field order or number formatting breaks carts already sitting in
//! device storage, so these must only change deliberately.

use cart_core::{decode_items, encode_items, CartItem};

/// A golden blob vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Lines in display order.
    pub items: Vec<CartItem>,
    /// Expected encoded blob.
    pub expected_blob: &'static str,
}

/// Get all golden blob vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "empty cart",
            items: vec![],
            expected_blob: "[]",
        },
        GoldenVector {
            name: "single line",
            items: vec![CartItem::new(
                "mug",
                "Enamel Mug",
                "https://img.example/mug.png",
                12.0,
                1,
            )],
            expected_blob: r#"[{"id":"mug","title":"Enamel Mug","image_url":"https://img.example/mug.png","price":12.0,"quantity":1}]"#,
        },
        GoldenVector {
            name: "duplicate lines keep order",
            items: vec![
                CartItem::new("pin", "Enamel Pin", "p.png", 4.99, 2),
                CartItem::new("tee", "Logo Tee", "t.png", 24.5, 1),
                CartItem::new("pin", "Enamel Pin", "p.png", 4.99, 1),
            ],
            expected_blob: r#"[{"id":"pin","title":"Enamel Pin","image_url":"p.png","price":4.99,"quantity":2},{"id":"tee","title":"Logo Tee","image_url":"t.png","price":24.5,"quantity":1},{"id":"pin","title":"Enamel Pin","image_url":"p.png","price":4.99,"quantity":1}]"#,
        },
        GoldenVector {
            name: "escaped and non-ascii text",
            items: vec![CartItem::new("c1", "Café \"Noir\"", "", 0.1, 3)],
            expected_blob: r#"[{"id":"c1","title":"Café \"Noir\"","image_url":"","price":0.1,"quantity":3}]"#,
        },
    ]
}

/// Check that every vector encodes to its expected blob and decodes back to
/// its items.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let blob = encode_items(&vector.items).map_err(|e| format!("{}: {}", vector.name, e))?;
        if blob != vector.expected_blob {
            return Err(format!(
                "{}: encoded {} but expected {}",
                vector.name, blob, vector.expected_blob
            ));
        }

        let decoded =
            decode_items(vector.expected_blob).map_err(|e| format!("{}: {}", vector.name, e))?;
        if decoded != vector.items {
            return Err(format!("{}: decoded lines differ", vector.name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_verify() {
        verify_all_vectors().unwrap();
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
