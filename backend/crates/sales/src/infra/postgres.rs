//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ManagerId, ProductId, PurchaseId, SaleId};
use sqlx::PgPool;

use crate::domain::entity::{
    product::{Product, ProductDraft},
    purchase::{NewPurchase, Purchase},
    sale::{NewSale, Sale, SalePosition},
};
use crate::domain::repository::{CatalogRepository, PurchaseRepository, SaleRepository};
use crate::domain::services::{StockLevel, checked_amount, diagnose_shortfall};
use crate::error::{SalesError, SalesResult};

/// PostgreSQL-backed sales repository
#[derive(Clone)]
pub struct PgSalesRepository {
    pool: PgPool,
}

impl PgSalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_COLUMNS: &str = "id, name, price, qty, active";

const PURCHASE_COLUMNS: &str = "id, customer_id, product_id, name, qty, price, created_at";

/// Keeps the customer from being removed mid-sale
const LOCK_CUSTOMER_SQL: &str = "SELECT id FROM customers WHERE id = $1 FOR SHARE";

const INSERT_SALE_SQL: &str = "INSERT INTO sales (manager_id, customer_id) VALUES ($1, $2) \
     RETURNING id, manager_id, customer_id, created_at";

/// Matches no row unless the product is active and stock covers `$2`.
/// The row lock makes concurrent sales of one product queue here and
/// re-check `qty` after the first one commits.
const DECREMENT_STOCK_SQL: &str = "UPDATE products SET qty = qty - $2 \
     WHERE id = $1 AND active AND qty >= $2 \
     RETURNING price";

const STOCK_FOR_UPDATE_SQL: &str = "SELECT qty, active FROM products WHERE id = $1 FOR UPDATE";

const INSERT_POSITION_SQL: &str = "INSERT INTO sale_positions (sale_id, product_id, qty, price) \
     VALUES ($1, $2, $3, $4) RETURNING id";

/// NUMERIC cannot overflow; NULL means the sum left BIGINT range
const SALES_TOTAL_SQL: &str = r#"
    SELECT CASE WHEN total <= 9223372036854775807 THEN total::BIGINT END
    FROM (
        SELECT COALESCE(SUM(p.qty::NUMERIC * p.price), 0) AS total
        FROM sale_positions p
        JOIN sales s ON s.id = p.sale_id
        WHERE s.manager_id = $1
    ) totals
"#;

// ============================================================================
// Catalog Repository Implementation
// ============================================================================

impl CatalogRepository for PgSalesRepository {
    async fn list_active_products(&self, limit: i64) -> SalesResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE active ORDER BY id LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn insert_product(&self, draft: &ProductDraft) -> SalesResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, price, qty, active) VALUES ($1, $2, $3, $4) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.qty)
        .bind(draft.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_product())
    }

    async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> SalesResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = $2,
                price = $3,
                qty = $4,
                active = $5
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.value())
        .bind(&draft.name)
        .bind(draft.price)
        .bind(draft.qty)
        .bind(draft.active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }
}

// ============================================================================
// Purchase Repository Implementation
// ============================================================================

impl PurchaseRepository for PgSalesRepository {
    async fn record_purchase(&self, purchase: &NewPurchase) -> SalesResult<Purchase> {
        // Name and price come from the product row in the same statement
        let row = sqlx::query_as::<_, PurchaseRow>(&format!(
            r#"
            INSERT INTO purchases (customer_id, product_id, name, qty, price)
            SELECT $1, id, name, $3, price FROM products WHERE id = $2
            RETURNING {PURCHASE_COLUMNS}
            "#
        ))
        .bind(purchase.customer_id.value())
        .bind(purchase.product_id.value())
        .bind(purchase.qty)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                SalesError::CustomerNotFound
            }
            _ => SalesError::Database(err),
        })?;

        row.map(PurchaseRow::into_purchase)
            .ok_or(SalesError::ProductNotFound(purchase.product_id))
    }

    async fn list_purchases(&self, customer_id: CustomerId) -> SalesResult<Vec<Purchase>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(&format!(
            "SELECT {PURCHASE_COLUMNS} FROM purchases WHERE customer_id = $1 ORDER BY id"
        ))
        .bind(customer_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PurchaseRow::into_purchase).collect())
    }
}

// ============================================================================
// Sale Repository Implementation
// ============================================================================

impl SaleRepository for PgSalesRepository {
    /// One transaction. Returning early drops `tx`, which rolls back.
    async fn record_sale(&self, sale: &NewSale) -> SalesResult<Sale> {
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_scalar::<_, i64>(LOCK_CUSTOMER_SQL)
            .bind(sale.customer_id.value())
            .fetch_optional(&mut *tx)
            .await?;
        if customer.is_none() {
            return Err(SalesError::CustomerNotFound);
        }

        let header = sqlx::query_as::<_, SaleHeaderRow>(INSERT_SALE_SQL)
            .bind(sale.manager_id.value())
            .bind(sale.customer_id.value())
            .fetch_one(&mut *tx)
            .await?;

        let mut positions = Vec::with_capacity(sale.positions.len());
        for requested in &sale.positions {
            let price = sqlx::query_scalar::<_, i64>(DECREMENT_STOCK_SQL)
                .bind(requested.product_id.value())
                .bind(requested.qty)
                .fetch_optional(&mut *tx)
                .await?;

            let Some(price) = price else {
                let stock = sqlx::query_as::<_, StockRow>(STOCK_FOR_UPDATE_SQL)
                    .bind(requested.product_id.value())
                    .fetch_optional(&mut *tx)
                    .await?;

                return Err(diagnose_shortfall(
                    requested.product_id,
                    stock.map(StockRow::into_stock),
                    requested.qty,
                ));
            };

            let position_id = sqlx::query_scalar::<_, i64>(INSERT_POSITION_SQL)
                .bind(header.id)
                .bind(requested.product_id.value())
                .bind(requested.qty)
                .bind(price)
                .fetch_one(&mut *tx)
                .await?;

            positions.push(SalePosition {
                id: position_id,
                product_id: requested.product_id,
                qty: requested.qty,
                price,
            });
        }

        // Overflowing totals are refused before anything is committed
        checked_amount(positions.iter().map(|p| (p.qty, p.price)))?;

        tx.commit().await?;

        Ok(header.into_sale(positions))
    }

    async fn find_sale(
        &self,
        manager_id: ManagerId,
        sale_id: SaleId,
    ) -> SalesResult<Option<Sale>> {
        let header = sqlx::query_as::<_, SaleHeaderRow>(
            "SELECT id, manager_id, customer_id, created_at FROM sales \
             WHERE id = $1 AND manager_id = $2",
        )
        .bind(sale_id.value())
        .bind(manager_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let positions = sqlx::query_as::<_, PositionRow>(
            "SELECT id, product_id, qty, price FROM sale_positions \
             WHERE sale_id = $1 ORDER BY id",
        )
        .bind(header.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(header.into_sale(
            positions.into_iter().map(PositionRow::into_position).collect(),
        )))
    }

    async fn sales_total(&self, manager_id: ManagerId) -> SalesResult<i64> {
        let total = sqlx::query_scalar::<_, Option<i64>>(SALES_TOTAL_SQL)
            .bind(manager_id.value())
            .fetch_one(&self.pool)
            .await?;

        total.ok_or(SalesError::AmountOutOfRange)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: i64,
    qty: i64,
    active: bool,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            price: self.price,
            qty: self.qty,
            active: self.active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StockRow {
    qty: i64,
    active: bool,
}

impl StockRow {
    fn into_stock(self) -> StockLevel {
        StockLevel {
            qty: self.qty,
            active: self.active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    id: i64,
    customer_id: i64,
    product_id: i64,
    name: String,
    qty: i64,
    price: i64,
    created_at: DateTime<Utc>,
}

impl PurchaseRow {
    fn into_purchase(self) -> Purchase {
        Purchase {
            id: PurchaseId::new(self.id),
            customer_id: CustomerId::new(self.customer_id),
            product_id: ProductId::new(self.product_id),
            name: self.name,
            qty: self.qty,
            price: self.price,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SaleHeaderRow {
    id: i64,
    manager_id: i64,
    customer_id: i64,
    created_at: DateTime<Utc>,
}

impl SaleHeaderRow {
    fn into_sale(self, positions: Vec<SalePosition>) -> Sale {
        Sale {
            id: SaleId::new(self.id),
            manager_id: ManagerId::new(self.manager_id),
            customer_id: CustomerId::new(self.customer_id),
            created_at: self.created_at,
            positions,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PositionRow {
    id: i64,
    product_id: i64,
    qty: i64,
    price: i64,
}

impl PositionRow {
    fn into_position(self) -> SalePosition {
        SalePosition {
            id: self.id,
            product_id: ProductId::new(self.product_id),
            qty: self.qty,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_decrement_is_guarded() {
        let sql = DECREMENT_STOCK_SQL.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(sql.contains("SET qty = qty - $2"));
        assert!(sql.contains("WHERE id = $1 AND active AND qty >= $2"));
        assert!(sql.ends_with("RETURNING price"));
    }

    #[test]
    fn test_locking_reads() {
        assert!(LOCK_CUSTOMER_SQL.ends_with("FOR SHARE"));
        assert!(STOCK_FOR_UPDATE_SQL.ends_with("FOR UPDATE"));
    }

    #[test]
    fn test_sales_total_sums_as_numeric() {
        assert!(SALES_TOTAL_SQL.contains("p.qty::NUMERIC * p.price"));
        assert!(SALES_TOTAL_SQL.contains("THEN total::BIGINT END"));
    }
}

/// Run against a scratch database:
/// `DATABASE_URL=postgres://... cargo test -p sales -- --ignored`
#[cfg(test)]
mod pg_tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::domain::entity::sale::PositionRequest;

    async fn repository() -> PgSalesRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .unwrap();
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await
            .unwrap();
        PgSalesRepository::new(pool)
    }

    fn unique_phone(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{prefix}{nanos}")
    }

    /// Manager and customer rows for one test
    async fn accounts(repo: &PgSalesRepository) -> (ManagerId, CustomerId) {
        let manager = sqlx::query_scalar::<_, i64>(
            "INSERT INTO managers (name, phone, password, roles) \
             VALUES ('Seller', $1, 'x', '{MANAGER}') RETURNING id",
        )
        .bind(unique_phone("m"))
        .fetch_one(&repo.pool)
        .await
        .unwrap();
        let customer = sqlx::query_scalar::<_, i64>(
            "INSERT INTO customers (name, phone, password) VALUES ('Buyer', $1, 'x') RETURNING id",
        )
        .bind(unique_phone("c"))
        .fetch_one(&repo.pool)
        .await
        .unwrap();
        (ManagerId::new(manager), CustomerId::new(customer))
    }

    async fn product(repo: &PgSalesRepository, price: i64, qty: i64) -> ProductId {
        let draft = ProductDraft::new("Tea", price, qty, true).unwrap();
        repo.insert_product(&draft).await.unwrap().id
    }

    async fn qty(repo: &PgSalesRepository, id: ProductId) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT qty FROM products WHERE id = $1")
            .bind(id.value())
            .fetch_one(&repo.pool)
            .await
            .unwrap()
    }

    fn sale(manager: ManagerId, customer: CustomerId, lines: &[(ProductId, i64)]) -> NewSale {
        let positions = lines
            .iter()
            .map(|&(product_id, qty)| PositionRequest { product_id, qty })
            .collect();
        NewSale::new(manager, customer, positions).unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore = "needs DATABASE_URL"]
    async fn test_concurrent_sales_against_postgres() {
        let repo = repository().await;
        let (manager, customer) = accounts(&repo).await;
        let tea = product(&repo, 100, 5).await;

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let repo = repo.clone();
                let request = sale(manager, customer, &[(tea, 3)]);
                tokio::spawn(async move { repo.record_sale(&request).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(SalesError::InsufficientStock { available: 2, .. }) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(ok, 1);
        assert_eq!(qty(&repo, tea).await, 2);
        assert_eq!(repo.sales_total(manager).await.unwrap(), 300);
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_failed_position_rolls_back_against_postgres() {
        let repo = repository().await;
        let (manager, customer) = accounts(&repo).await;
        let tea = product(&repo, 100, 5).await;
        let cake = product(&repo, 300, 1).await;

        let result = repo
            .record_sale(&sale(manager, customer, &[(tea, 2), (cake, 4)]))
            .await;

        assert!(matches!(result, Err(SalesError::InsufficientStock { .. })));
        assert_eq!(qty(&repo, tea).await, 5);
        assert_eq!(qty(&repo, cake).await, 1);
        assert_eq!(repo.sales_total(manager).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL"]
    async fn test_overflowing_sale_rolls_back_against_postgres() {
        let repo = repository().await;
        let (manager, customer) = accounts(&repo).await;
        let gold = product(&repo, i64::MAX / 2, 3).await;

        let result = repo.record_sale(&sale(manager, customer, &[(gold, 3)])).await;

        assert!(matches!(result, Err(SalesError::AmountOutOfRange)));
        assert_eq!(qty(&repo, gold).await, 3);
        assert_eq!(repo.sales_total(manager).await.unwrap(), 0);
    }
}
