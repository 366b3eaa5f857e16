//! Purchase Use Cases

use std::sync::Arc;

use kernel::id::{CustomerId, ProductId};

use crate::domain::entity::purchase::{NewPurchase, Purchase};
use crate::domain::repository::PurchaseRepository;
use crate::error::SalesResult;

#[derive(Debug, Clone)]
pub struct MakePurchaseInput {
    pub product_id: ProductId,
    pub qty: i64,
}

pub struct PurchasesUseCase<P>
where
    P: PurchaseRepository,
{
    purchase_repo: Arc<P>,
}

impl<P> PurchasesUseCase<P>
where
    P: PurchaseRepository,
{
    pub fn new(purchase_repo: Arc<P>) -> Self {
        Self { purchase_repo }
    }

    pub async fn make(
        &self,
        customer_id: CustomerId,
        input: MakePurchaseInput,
    ) -> SalesResult<Purchase> {
        let purchase = NewPurchase::new(customer_id, input.product_id, input.qty)?;
        let recorded = self.purchase_repo.record_purchase(&purchase).await?;

        tracing::info!(
            purchase_id = %recorded.id,
            customer_id = %customer_id,
            product_id = %recorded.product_id,
            qty = recorded.qty,
            "Purchase recorded"
        );

        Ok(recorded)
    }

    /// The customer's own purchases, oldest first
    pub async fn list(&self, customer_id: CustomerId) -> SalesResult<Vec<Purchase>> {
        self.purchase_repo.list_purchases(customer_id).await
    }
}
