//! HTTP Handlers
//!
//! Identity comes from request extensions set by the auth guards:
//! `Extension<CustomerId>` on purchase routes, `Extension<ManagerId>` on
//! manager routes.

use axum::Json;
use axum::extract::{Extension, Path, State};
use kernel::id::{CustomerId, ManagerId, SaleId};
use std::sync::Arc;

use crate::application::config::SalesConfig;
use crate::application::{
    CatalogUseCase, MakePurchaseInput, MakeSaleInput, MakeSaleUseCase, PurchasesUseCase,
    SalesSummaryUseCase, SaveProductInput,
};
use crate::domain::repository::SalesRepository;
use crate::error::SalesResult;
use crate::presentation::dto::{
    MakePurchaseRequest, MakeSaleRequest, ProductResponse, PurchaseResponse, SaleResponse,
    SalesTotalResponse, SaveProductRequest,
};

/// Shared state for sales handlers
#[derive(Clone)]
pub struct SalesAppState<R>
where
    R: SalesRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<SalesConfig>,
}

impl<R> SalesAppState<R>
where
    R: SalesRepository,
{
    pub fn new(repo: R, config: SalesConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    fn catalog(&self) -> CatalogUseCase<R> {
        CatalogUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /api/customers/products
pub async fn list_products<R>(
    State(state): State<SalesAppState<R>>,
) -> SalesResult<Json<Vec<ProductResponse>>>
where
    R: SalesRepository,
{
    let products = state.catalog().list_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /api/managers/products
pub async fn save_product<R>(
    State(state): State<SalesAppState<R>>,
    Extension(manager_id): Extension<ManagerId>,
    Json(req): Json<SaveProductRequest>,
) -> SalesResult<Json<ProductResponse>>
where
    R: SalesRepository,
{
    tracing::debug!(manager_id = %manager_id, product_id = ?req.product_id(), "Saving product");

    let product = state
        .catalog()
        .save_product(SaveProductInput {
            id: req.product_id(),
            name: req.name,
            price: req.price,
            qty: req.qty,
            active: req.active,
        })
        .await?;

    Ok(Json(product.into()))
}

// ============================================================================
// Purchases (customer guard)
// ============================================================================

/// GET /api/customers/purchases
pub async fn list_purchases<R>(
    State(state): State<SalesAppState<R>>,
    Extension(customer_id): Extension<CustomerId>,
) -> SalesResult<Json<Vec<PurchaseResponse>>>
where
    R: SalesRepository,
{
    let purchases = PurchasesUseCase::new(state.repo.clone())
        .list(customer_id)
        .await?;
    Ok(Json(purchases.into_iter().map(Into::into).collect()))
}

/// POST /api/customers/purchases
pub async fn make_purchase<R>(
    State(state): State<SalesAppState<R>>,
    Extension(customer_id): Extension<CustomerId>,
    Json(req): Json<MakePurchaseRequest>,
) -> SalesResult<Json<PurchaseResponse>>
where
    R: SalesRepository,
{
    let purchase = PurchasesUseCase::new(state.repo.clone())
        .make(
            customer_id,
            MakePurchaseInput {
                product_id: req.product_id,
                qty: req.qty,
            },
        )
        .await?;
    Ok(Json(purchase.into()))
}

// ============================================================================
// Sales (manager guard)
// ============================================================================

/// GET /api/managers/sales
pub async fn sales_total<R>(
    State(state): State<SalesAppState<R>>,
    Extension(manager_id): Extension<ManagerId>,
) -> SalesResult<Json<SalesTotalResponse>>
where
    R: SalesRepository,
{
    let total = SalesSummaryUseCase::new(state.repo.clone())
        .total(manager_id)
        .await?;
    Ok(Json(SalesTotalResponse { manager_id, total }))
}

/// POST /api/managers/sales
pub async fn make_sale<R>(
    State(state): State<SalesAppState<R>>,
    Extension(manager_id): Extension<ManagerId>,
    Json(req): Json<MakeSaleRequest>,
) -> SalesResult<Json<SaleResponse>>
where
    R: SalesRepository,
{
    let use_case = MakeSaleUseCase::new(state.repo.clone(), state.config.clone());

    let sale = use_case
        .execute(
            manager_id,
            MakeSaleInput {
                customer_id: req.customer_id,
                positions: req.position_requests(),
            },
        )
        .await?;

    Ok(Json(SaleResponse::try_from(sale)?))
}

/// GET /api/managers/sales/{id}
pub async fn get_sale<R>(
    State(state): State<SalesAppState<R>>,
    Extension(manager_id): Extension<ManagerId>,
    Path(id): Path<i64>,
) -> SalesResult<Json<SaleResponse>>
where
    R: SalesRepository,
{
    let sale = SalesSummaryUseCase::new(state.repo.clone())
        .get(manager_id, SaleId::new(id))
        .await?;
    Ok(Json(SaleResponse::try_from(sale)?))
}
