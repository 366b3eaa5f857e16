//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ManagerId, ProductId, PurchaseId, SaleId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    product::Product,
    purchase::Purchase,
    sale::{PositionRequest, Sale, SalePosition},
};
use crate::error::SalesError;

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub price: i64,
    pub qty: i64,
    pub active: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            qty: product.qty,
            active: product.active,
        }
    }
}

/// Insert when `id` is absent or 0, update otherwise
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductRequest {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    pub price: i64,
    pub qty: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl SaveProductRequest {
    /// Older clients send `id: 0` for a new product
    pub fn product_id(&self) -> Option<ProductId> {
        self.id.filter(|id| id.value() != 0)
    }
}

fn default_active() -> bool {
    true
}

// ============================================================================
// Purchases
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakePurchaseRequest {
    #[serde(alias = "productid")]
    pub product_id: ProductId,
    pub qty: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub id: PurchaseId,
    pub product_id: ProductId,
    pub name: String,
    pub qty: i64,
    pub price: i64,
    pub created: DateTime<Utc>,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id,
            product_id: purchase.product_id,
            name: purchase.name,
            qty: purchase.qty,
            price: purchase.price,
            created: purchase.created_at,
        }
    }
}

// ============================================================================
// Sales
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePositionRequest {
    #[serde(alias = "product_id")]
    pub product_id: ProductId,
    pub qty: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeSaleRequest {
    #[serde(alias = "customer_id")]
    pub customer_id: CustomerId,
    pub positions: Vec<SalePositionRequest>,
}

impl MakeSaleRequest {
    pub fn position_requests(&self) -> Vec<PositionRequest> {
        self.positions
            .iter()
            .map(|p| PositionRequest {
                product_id: p.product_id,
                qty: p.qty,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePositionResponse {
    pub id: i64,
    pub product_id: ProductId,
    pub qty: i64,
    pub price: i64,
}

impl From<SalePosition> for SalePositionResponse {
    fn from(position: SalePosition) -> Self {
        Self {
            id: position.id,
            product_id: position.product_id,
            qty: position.qty,
            price: position.price,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: SaleId,
    pub manager_id: ManagerId,
    pub customer_id: CustomerId,
    pub created: DateTime<Utc>,
    pub total: i64,
    pub positions: Vec<SalePositionResponse>,
}

impl TryFrom<Sale> for SaleResponse {
    type Error = SalesError;

    fn try_from(sale: Sale) -> Result<Self, Self::Error> {
        let total = sale.total()?;
        Ok(Self {
            id: sale.id,
            manager_id: sale.manager_id,
            customer_id: sale.customer_id,
            created: sale.created_at,
            total,
            positions: sale.positions.into_iter().map(Into::into).collect(),
        })
    }
}

/// `GET /api/managers/sales`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotalResponse {
    pub manager_id: ManagerId,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_product_defaults() {
        let req: SaveProductRequest =
            serde_json::from_value(json!({"name": "Tea", "price": 150, "qty": 3})).unwrap();
        assert!(req.active);
        assert_eq!(req.product_id(), None);

        let req: SaveProductRequest =
            serde_json::from_value(json!({"id": 0, "name": "Tea", "price": 150, "qty": 3}))
                .unwrap();
        assert_eq!(req.product_id(), None);

        let req: SaveProductRequest = serde_json::from_value(
            json!({"id": 4, "name": "Tea", "price": 150, "qty": 3, "active": false}),
        )
        .unwrap();
        assert_eq!(req.product_id(), Some(ProductId::new(4)));
        assert!(!req.active);
    }

    #[test]
    fn test_make_sale_accepts_snake_case() {
        let req: MakeSaleRequest = serde_json::from_value(json!({
            "customer_id": 2,
            "positions": [{"product_id": 1, "qty": 3}],
        }))
        .unwrap();
        assert_eq!(req.customer_id, CustomerId::new(2));
        assert_eq!(
            req.position_requests(),
            vec![PositionRequest {
                product_id: ProductId::new(1),
                qty: 3
            }]
        );
    }

    #[test]
    fn test_total_response_shape() {
        let body = serde_json::to_value(SalesTotalResponse {
            manager_id: ManagerId::new(3),
            total: 1200,
        })
        .unwrap();
        assert_eq!(body, json!({"managerId": 3, "total": 1200}));
    }
}
