//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{CustomerId, ManagerId};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{
    access_token::AccessToken,
    customer::{Customer, CustomerChanges, NewCustomer},
    manager::{Manager, NewManager},
};
use crate::domain::repository::{CustomerRepository, ManagerRepository, TokenRepository};
use crate::domain::value_object::{
    phone::Phone,
    role::RoleSet,
    token::{TokenScope, TokenValue},
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations on `phone` are the only conflicts these tables can raise
fn map_phone_conflict(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AuthError::PhoneTaken,
        _ => AuthError::Database(err),
    }
}

fn parse_hash(phc: String) -> AuthResult<HashedPassword> {
    HashedPassword::from_phc_string(phc).map_err(|e| AuthError::Internal(e.to_string()))
}

const CUSTOMER_COLUMNS: &str = "id, name, phone, password, active, created_at";

const MANAGER_COLUMNS: &str = "id, name, phone, password, roles, active, created_at";

// ============================================================================
// Customer Repository Implementation
// ============================================================================

impl CustomerRepository for PgAuthRepository {
    async fn create_customer(&self, customer: &NewCustomer) -> AuthResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "INSERT INTO customers (name, phone, password) VALUES ($1, $2, $3) \
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(&customer.name)
        .bind(customer.phone.as_str())
        .bind(customer.password.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_phone_conflict)?;

        row.into_customer()
    }

    async fn find_customer(&self, id: CustomerId) -> AuthResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_customer()).transpose()
    }

    async fn find_customer_by_phone(&self, phone: &Phone) -> AuthResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE phone = $1"
        ))
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_customer()).transpose()
    }

    async fn list_customers(&self, only_active: bool) -> AuthResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE ($1 = FALSE OR active) ORDER BY id"
        ))
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CustomerRow::into_customer).collect()
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        changes: &CustomerChanges,
    ) -> AuthResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            r#"
            UPDATE customers SET
                name = $2,
                phone = $3,
                password = COALESCE($4, password)
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(id.value())
        .bind(&changes.name)
        .bind(changes.phone.as_str())
        .bind(changes.password.as_ref().map(|p| p.as_phc_string()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_phone_conflict)?;

        row.map(|r| r.into_customer()).transpose()
    }

    async fn set_customer_active(
        &self,
        id: CustomerId,
        active: bool,
    ) -> AuthResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers SET active = $2 WHERE id = $1 RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(id.value())
        .bind(active)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_customer()).transpose()
    }

    async fn remove_customer(&self, id: CustomerId) -> AuthResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "DELETE FROM customers WHERE id = $1 RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AuthError::CustomerInUse
            }
            _ => AuthError::Database(err),
        })?;

        row.map(|r| r.into_customer()).transpose()
    }
}

// ============================================================================
// Manager Repository Implementation
// ============================================================================

impl ManagerRepository for PgAuthRepository {
    async fn create_manager(&self, manager: &NewManager) -> AuthResult<Manager> {
        let row = sqlx::query_as::<_, ManagerRow>(&format!(
            "INSERT INTO managers (name, phone, password, roles) VALUES ($1, $2, $3, $4) \
             RETURNING {MANAGER_COLUMNS}"
        ))
        .bind(&manager.name)
        .bind(manager.phone.as_str())
        .bind(manager.password.as_phc_string())
        .bind(manager.roles.labels())
        .fetch_one(&self.pool)
        .await
        .map_err(map_phone_conflict)?;

        row.into_manager()
    }

    async fn find_manager(&self, id: ManagerId) -> AuthResult<Option<Manager>> {
        let row = sqlx::query_as::<_, ManagerRow>(&format!(
            "SELECT {MANAGER_COLUMNS} FROM managers WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_manager()).transpose()
    }

    async fn find_manager_by_phone(&self, phone: &Phone) -> AuthResult<Option<Manager>> {
        let row = sqlx::query_as::<_, ManagerRow>(&format!(
            "SELECT {MANAGER_COLUMNS} FROM managers WHERE phone = $1"
        ))
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_manager()).transpose()
    }
}

// ============================================================================
// Token Repository Implementation
// ============================================================================

impl TokenRepository for PgAuthRepository {
    async fn create_token(&self, token: &AccessToken) -> AuthResult<()> {
        let sql = match token.scope {
            TokenScope::Customer => {
                "INSERT INTO customers_tokens (token, customer_id, created_at) VALUES ($1, $2, $3)"
            }
            TokenScope::Manager => {
                "INSERT INTO managers_tokens (token, manager_id, created_at) VALUES ($1, $2, $3)"
            }
        };

        sqlx::query(sql)
            .bind(token.token.as_str())
            .bind(token.owner_id)
            .bind(token.issued_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_token(
        &self,
        scope: TokenScope,
        token: &TokenValue,
    ) -> AuthResult<Option<AccessToken>> {
        let sql = match scope {
            TokenScope::Customer => {
                "SELECT token, customer_id AS owner_id, created_at FROM customers_tokens WHERE token = $1"
            }
            TokenScope::Manager => {
                "SELECT token, manager_id AS owner_id, created_at FROM managers_tokens WHERE token = $1"
            }
        };

        let row = sqlx::query_as::<_, TokenRow>(sql)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| {
            AccessToken::new(TokenValue::from_db(r.token), r.owner_id, scope, r.created_at)
        }))
    }
}

// ============================================================================
// Row types for SQLx
// ============================================================================

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    phone: String,
    password: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_customer(self) -> AuthResult<Customer> {
        Ok(Customer {
            id: CustomerId::new(self.id),
            name: self.name,
            phone: Phone::from_db(self.phone),
            password: parse_hash(self.password)?,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ManagerRow {
    id: i64,
    name: String,
    phone: String,
    password: String,
    roles: Vec<String>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl ManagerRow {
    fn into_manager(self) -> AuthResult<Manager> {
        Ok(Manager {
            id: ManagerId::new(self.id),
            name: self.name,
            phone: Phone::from_db(self.phone),
            password: parse_hash(self.password)?,
            roles: RoleSet::from_labels(&self.roles),
            active: self.active,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    token: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
}
