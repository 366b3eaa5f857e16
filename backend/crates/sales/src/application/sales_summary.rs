//! Sales Summary Use Case
//!
//! Read side of a manager's own sales.

use std::sync::Arc;

use kernel::id::{ManagerId, SaleId};

use crate::domain::entity::sale::Sale;
use crate::domain::repository::SaleRepository;
use crate::error::{SalesError, SalesResult};

pub struct SalesSummaryUseCase<S>
where
    S: SaleRepository,
{
    sale_repo: Arc<S>,
}

impl<S> SalesSummaryUseCase<S>
where
    S: SaleRepository,
{
    pub fn new(sale_repo: Arc<S>) -> Self {
        Self { sale_repo }
    }

    /// Revenue over every sale the manager made
    pub async fn total(&self, manager_id: ManagerId) -> SalesResult<i64> {
        self.sale_repo.sales_total(manager_id).await
    }

    /// Sales of other managers are reported as missing
    pub async fn get(&self, manager_id: ManagerId, sale_id: SaleId) -> SalesResult<Sale> {
        self.sale_repo
            .find_sale(manager_id, sale_id)
            .await?
            .ok_or(SalesError::SaleNotFound)
    }
}
