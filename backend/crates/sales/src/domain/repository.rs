//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CustomerId, ManagerId, ProductId, SaleId};

use crate::domain::entity::{
    product::{Product, ProductDraft},
    purchase::{NewPurchase, Purchase},
    sale::{NewSale, Sale},
};
use crate::error::SalesResult;

/// Product catalog
#[trait_variant::make(CatalogRepository: Send)]
pub trait LocalCatalogRepository {
    /// Active products ordered by id
    async fn list_active_products(&self, limit: i64) -> SalesResult<Vec<Product>>;

    async fn insert_product(&self, draft: &ProductDraft) -> SalesResult<Product>;

    /// `None` when the id does not exist
    async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> SalesResult<Option<Product>>;
}

/// Customer purchases
#[trait_variant::make(PurchaseRepository: Send)]
pub trait LocalPurchaseRepository {
    /// Copies name and price from the product; missing product is
    /// `SalesError::ProductNotFound`
    async fn record_purchase(&self, purchase: &NewPurchase) -> SalesResult<Purchase>;

    async fn list_purchases(&self, customer_id: CustomerId) -> SalesResult<Vec<Purchase>>;
}

/// Sales made by managers
#[trait_variant::make(SaleRepository: Send)]
pub trait LocalSaleRepository {
    /// Records the header, decrements stock and inserts every position as
    /// one unit. On any error nothing is persisted.
    async fn record_sale(&self, sale: &NewSale) -> SalesResult<Sale>;

    /// Only sales made by `manager_id` are visible
    async fn find_sale(&self, manager_id: ManagerId, sale_id: SaleId)
    -> SalesResult<Option<Sale>>;

    /// `SUM(qty * price)` over the manager's sales, 0 when there are none.
    /// A sum outside `i64` is `SalesError::AmountOutOfRange`.
    async fn sales_total(&self, manager_id: ManagerId) -> SalesResult<i64>;
}

/// Everything the HTTP layer needs from one store
pub trait SalesRepository:
    CatalogRepository + PurchaseRepository + SaleRepository + Clone + Send + Sync + 'static
{
}

impl<T> SalesRepository for T where
    T: CatalogRepository + PurchaseRepository + SaleRepository + Clone + Send + Sync + 'static
{
}
