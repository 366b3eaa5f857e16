//! Stock Rules
//!
//! Pure checks shared by every store implementation. A position can be sold
//! when stock covers the requested quantity and the product is active; the
//! stock check comes first.

use kernel::id::ProductId;

use crate::error::{SalesError, SalesResult};

/// Stock row as seen under lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub qty: i64,
    pub active: bool,
}

/// Can `requested` units of this product be sold now?
pub fn check_position(product_id: ProductId, stock: StockLevel, requested: i64) -> SalesResult<()> {
    if stock.qty < requested {
        return Err(SalesError::InsufficientStock {
            product_id,
            requested,
            available: stock.qty,
        });
    }
    if !stock.active {
        return Err(SalesError::ProductInactive(product_id));
    }
    Ok(())
}

/// Sum of `qty * price` over `lines`, or `AmountOutOfRange` on overflow
pub fn checked_amount<I>(lines: I) -> SalesResult<i64>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    lines
        .into_iter()
        .try_fold(0i64, |acc, (qty, price)| {
            qty.checked_mul(price).and_then(|line| acc.checked_add(line))
        })
        .ok_or(SalesError::AmountOutOfRange)
}

/// Explain why a conditional decrement matched no row.
///
/// `stock` is `None` when the product does not exist.
pub fn diagnose_shortfall(
    product_id: ProductId,
    stock: Option<StockLevel>,
    requested: i64,
) -> SalesError {
    let Some(stock) = stock else {
        return SalesError::ProductNotFound(product_id);
    };
    match check_position(product_id, stock, requested) {
        Err(e) => e,
        Ok(()) => SalesError::Internal(format!(
            "stock decrement for product {} matched no row",
            product_id
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT: ProductId = ProductId::new(7);

    #[test]
    fn test_check_position_ok() {
        let stock = StockLevel { qty: 5, active: true };
        assert!(check_position(PRODUCT, stock, 5).is_ok());
        assert!(check_position(PRODUCT, stock, 1).is_ok());
    }

    #[test]
    fn test_checked_amount() {
        assert_eq!(checked_amount([(3, 100), (1, 250)]).unwrap(), 550);
        assert_eq!(checked_amount(Vec::<(i64, i64)>::new()).unwrap(), 0);
        assert!(matches!(
            checked_amount([(3, i64::MAX / 2)]),
            Err(SalesError::AmountOutOfRange)
        ));
        assert!(matches!(
            checked_amount([(1, i64::MAX), (1, 1)]),
            Err(SalesError::AmountOutOfRange)
        ));
    }

    #[test]
    fn test_stock_checked_before_active() {
        let stock = StockLevel { qty: 1, active: false };
        assert!(matches!(
            check_position(PRODUCT, stock, 2),
            Err(SalesError::InsufficientStock {
                requested: 2,
                available: 1,
                ..
            })
        ));
        assert!(matches!(
            check_position(PRODUCT, stock, 1),
            Err(SalesError::ProductInactive(id)) if id == PRODUCT
        ));
    }

    #[test]
    fn test_diagnose_missing_product() {
        assert!(matches!(
            diagnose_shortfall(PRODUCT, None, 1),
            SalesError::ProductNotFound(id) if id == PRODUCT
        ));
    }

    #[test]
    fn test_diagnose_satisfiable_is_internal() {
        let stock = StockLevel { qty: 9, active: true };
        assert!(matches!(
            diagnose_shortfall(PRODUCT, Some(stock), 3),
            SalesError::Internal(_)
        ));
    }
}
