//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::CustomerId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::customer::Customer;

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterManagerRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

// ============================================================================
// Tokens
// ============================================================================

/// Login request. Older clients send the phone as `login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(alias = "login")]
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenRequest {
    pub token: String,
}

/// `{status: "ok", customerId}` or `{status: "fail", reason}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl ValidateTokenResponse {
    pub fn ok(customer_id: CustomerId) -> Self {
        Self {
            status: "ok",
            customer_id: Some(customer_id),
            reason: None,
        }
    }

    pub fn fail(reason: &'static str) -> Self {
        Self {
            status: "fail",
            customer_id: None,
            reason: Some(reason),
        }
    }
}

// ============================================================================
// Customers
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Customer record as returned to clients (no password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub active: bool,
    pub created: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            phone: customer.phone.as_str().to_string(),
            active: customer.active,
            created: customer.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_accepts_login_alias() {
        let req: LoginRequest =
            serde_json::from_value(json!({"login": "89001112233", "password": "pw"})).unwrap();
        assert_eq!(req.phone, "89001112233");

        let req: LoginRequest =
            serde_json::from_value(json!({"phone": "89001112233", "password": "pw"})).unwrap();
        assert_eq!(req.phone, "89001112233");
    }

    #[test]
    fn test_validate_response_shapes() {
        let ok = serde_json::to_value(ValidateTokenResponse::ok(CustomerId::new(5))).unwrap();
        assert_eq!(ok, json!({"status": "ok", "customerId": 5}));

        let fail = serde_json::to_value(ValidateTokenResponse::fail("expired")).unwrap();
        assert_eq!(fail, json!({"status": "fail", "reason": "expired"}));
    }

    #[test]
    fn test_update_password_is_optional() {
        let req: UpdateCustomerRequest =
            serde_json::from_value(json!({"name": "A", "phone": "1"})).unwrap();
        assert!(req.password.is_none());
    }
}
