//! Catalog Use Cases
//!
//! Public product listing and the manager-side save (insert or full update).

use std::sync::Arc;

use kernel::id::ProductId;

use crate::application::config::SalesConfig;
use crate::domain::entity::product::{Product, ProductDraft};
use crate::domain::repository::CatalogRepository;
use crate::error::{SalesError, SalesResult};

/// Input for save product. No id means insert.
#[derive(Debug, Clone)]
pub struct SaveProductInput {
    pub id: Option<ProductId>,
    pub name: String,
    pub price: i64,
    pub qty: i64,
    pub active: bool,
}

pub struct CatalogUseCase<C>
where
    C: CatalogRepository,
{
    catalog_repo: Arc<C>,
    config: Arc<SalesConfig>,
}

impl<C> CatalogUseCase<C>
where
    C: CatalogRepository,
{
    pub fn new(catalog_repo: Arc<C>, config: Arc<SalesConfig>) -> Self {
        Self {
            catalog_repo,
            config,
        }
    }

    /// Active products, first page only
    pub async fn list_products(&self) -> SalesResult<Vec<Product>> {
        self.catalog_repo
            .list_active_products(self.config.product_list_limit)
            .await
    }

    pub async fn save_product(&self, input: SaveProductInput) -> SalesResult<Product> {
        let draft = ProductDraft::new(&input.name, input.price, input.qty, input.active)?;

        let product = match input.id {
            None => self.catalog_repo.insert_product(&draft).await?,
            Some(id) => self
                .catalog_repo
                .update_product(id, &draft)
                .await?
                .ok_or(SalesError::ProductNotFound(id))?,
        };

        tracing::info!(
            product_id = %product.id,
            qty = product.qty,
            price = product.price,
            active = product.active,
            "Product saved"
        );

        Ok(product)
    }
}
