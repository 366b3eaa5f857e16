//! Product Entity

use kernel::id::ProductId;

use crate::error::{SalesError, SalesResult};

/// Maximum product name length (in characters)
pub const PRODUCT_NAME_MAX_LENGTH: usize = 200;

/// Catalog item. `price` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    /// Quantity on hand, never negative
    pub qty: i64,
    pub active: bool,
}

/// Fields written by an insert or a full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: i64,
    pub qty: i64,
    pub active: bool,
}

impl ProductDraft {
    /// Trims the name and checks the numeric fields
    pub fn new(name: &str, price: i64, qty: i64, active: bool) -> SalesResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SalesError::InvalidProduct("name is required".into()));
        }
        if name.chars().count() > PRODUCT_NAME_MAX_LENGTH {
            return Err(SalesError::InvalidProduct(format!(
                "name must be at most {} characters",
                PRODUCT_NAME_MAX_LENGTH
            )));
        }
        if price < 0 {
            return Err(SalesError::InvalidProduct("price must not be negative".into()));
        }
        if qty < 0 {
            return Err(SalesError::InvalidProduct("qty must not be negative".into()));
        }

        Ok(Self {
            name: name.to_string(),
            price,
            qty,
            active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_trims_name() {
        let draft = ProductDraft::new("  Tea  ", 150, 10, true).unwrap();
        assert_eq!(draft.name, "Tea");
    }

    #[test]
    fn test_draft_rejects_bad_fields() {
        assert!(matches!(
            ProductDraft::new("   ", 1, 1, true),
            Err(SalesError::InvalidProduct(_))
        ));
        assert!(matches!(
            ProductDraft::new("Tea", -1, 1, true),
            Err(SalesError::InvalidProduct(_))
        ));
        assert!(matches!(
            ProductDraft::new("Tea", 1, -1, true),
            Err(SalesError::InvalidProduct(_))
        ));
        assert!(matches!(
            ProductDraft::new(&"x".repeat(PRODUCT_NAME_MAX_LENGTH + 1), 1, 1, true),
            Err(SalesError::InvalidProduct(_))
        ));
    }

    #[test]
    fn test_draft_allows_zero_price_and_stock() {
        assert!(ProductDraft::new("Sample", 0, 0, false).is_ok());
    }
}
