//! Sale Entity
//!
//! A sale groups one or more positions under one manager and one customer.
//! Each position keeps the unit price the product had when it was sold.

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ManagerId, ProductId, SaleId};

use crate::domain::services::checked_amount;
use crate::error::{SalesError, SalesResult};

/// Recorded sale with its positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub id: SaleId,
    pub manager_id: ManagerId,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
    pub positions: Vec<SalePosition>,
}

impl Sale {
    /// Sum of `qty * price` over all positions
    pub fn total(&self) -> SalesResult<i64> {
        checked_amount(self.positions.iter().map(|p| (p.qty, p.price)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalePosition {
    pub id: i64,
    pub product_id: ProductId,
    pub qty: i64,
    /// Price snapshot
    pub price: i64,
}

impl SalePosition {
    pub fn line_total(&self) -> SalesResult<i64> {
        checked_amount([(self.qty, self.price)])
    }
}

/// One requested line of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRequest {
    pub product_id: ProductId,
    pub qty: i64,
}

/// Validated sale request, ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub manager_id: ManagerId,
    pub customer_id: CustomerId,
    pub positions: Vec<PositionRequest>,
}

impl NewSale {
    /// At least one position, every quantity positive
    pub fn new(
        manager_id: ManagerId,
        customer_id: CustomerId,
        positions: Vec<PositionRequest>,
    ) -> SalesResult<Self> {
        if positions.is_empty() {
            return Err(SalesError::InvalidSale("at least one position is required".into()));
        }
        if let Some(bad) = positions.iter().find(|p| p.qty <= 0) {
            return Err(SalesError::InvalidSale(format!(
                "qty must be positive (product {})",
                bad.product_id
            )));
        }

        Ok(Self {
            manager_id,
            customer_id,
            positions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: i64, qty: i64) -> PositionRequest {
        PositionRequest {
            product_id: ProductId::new(product),
            qty,
        }
    }

    #[test]
    fn test_new_sale_requires_positions() {
        let result = NewSale::new(ManagerId::new(1), CustomerId::new(1), vec![]);
        assert!(matches!(result, Err(SalesError::InvalidSale(_))));
    }

    #[test]
    fn test_new_sale_rejects_non_positive_qty() {
        for qty in [0, -3] {
            let result = NewSale::new(
                ManagerId::new(1),
                CustomerId::new(1),
                vec![line(1, 2), line(2, qty)],
            );
            assert!(matches!(result, Err(SalesError::InvalidSale(_))));
        }
    }

    #[test]
    fn test_sale_total() {
        let sale = Sale {
            id: SaleId::new(1),
            manager_id: ManagerId::new(1),
            customer_id: CustomerId::new(1),
            created_at: Utc::now(),
            positions: vec![
                SalePosition {
                    id: 1,
                    product_id: ProductId::new(1),
                    qty: 3,
                    price: 100,
                },
                SalePosition {
                    id: 2,
                    product_id: ProductId::new(2),
                    qty: 1,
                    price: 250,
                },
            ],
        };
        assert_eq!(sale.total().unwrap(), 550);
        assert_eq!(sale.positions[1].line_total().unwrap(), 250);
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let position = SalePosition {
            id: 1,
            product_id: ProductId::new(1),
            qty: 3,
            price: i64::MAX / 2,
        };
        assert!(matches!(
            position.line_total(),
            Err(SalesError::AmountOutOfRange)
        ));
    }
}
