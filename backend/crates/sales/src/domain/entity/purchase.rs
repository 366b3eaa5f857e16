//! Purchase Entity
//!
//! A customer's own purchase of one product. Name and price are copied from
//! the product when the purchase is recorded; stock is not touched.

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ProductId, PurchaseId};

use crate::error::{SalesError, SalesResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub id: PurchaseId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    /// Product name at purchase time
    pub name: String,
    pub qty: i64,
    /// Unit price at purchase time
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub qty: i64,
}

impl NewPurchase {
    pub fn new(customer_id: CustomerId, product_id: ProductId, qty: i64) -> SalesResult<Self> {
        if qty <= 0 {
            return Err(SalesError::InvalidPurchase("qty must be positive".into()));
        }
        Ok(Self {
            customer_id,
            product_id,
            qty,
        })
    }
}
