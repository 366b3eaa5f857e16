//! Make Sale Use Case
//!
//! Validates the request, then hands it to the store, which records the
//! whole sale atomically or nothing at all.

use std::sync::Arc;

use kernel::id::{CustomerId, ManagerId};

use crate::application::config::SalesConfig;
use crate::domain::entity::sale::{NewSale, PositionRequest, Sale};
use crate::domain::repository::SaleRepository;
use crate::error::{SalesError, SalesResult};

#[derive(Debug, Clone)]
pub struct MakeSaleInput {
    pub customer_id: CustomerId,
    pub positions: Vec<PositionRequest>,
}

pub struct MakeSaleUseCase<S>
where
    S: SaleRepository,
{
    sale_repo: Arc<S>,
    config: Arc<SalesConfig>,
}

impl<S> MakeSaleUseCase<S>
where
    S: SaleRepository,
{
    pub fn new(sale_repo: Arc<S>, config: Arc<SalesConfig>) -> Self {
        Self { sale_repo, config }
    }

    pub async fn execute(&self, manager_id: ManagerId, input: MakeSaleInput) -> SalesResult<Sale> {
        if input.positions.len() > self.config.max_sale_positions {
            return Err(SalesError::InvalidSale(format!(
                "at most {} positions per sale",
                self.config.max_sale_positions
            )));
        }

        let sale = NewSale::new(manager_id, input.customer_id, input.positions)?;
        let recorded = self.sale_repo.record_sale(&sale).await?;
        let total = recorded.total()?;

        tracing::info!(
            sale_id = %recorded.id,
            manager_id = %manager_id,
            customer_id = %recorded.customer_id,
            positions = recorded.positions.len(),
            total,
            "Sale recorded"
        );

        Ok(recorded)
    }
}
