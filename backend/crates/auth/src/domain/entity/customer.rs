//! Customer Entity

use chrono::{DateTime, Utc};
use kernel::id::CustomerId;
use platform::password::HashedPassword;

use crate::domain::value_object::phone::Phone;

/// Customer account
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    /// Login
    pub phone: Phone,
    pub password: HashedPassword,
    /// `false` once blocked
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn is_blocked(&self) -> bool {
        !self.active
    }
}

/// Insert payload; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: Phone,
    pub password: HashedPassword,
}

/// Replacement fields for an update. `password: None` keeps the old hash.
#[derive(Debug, Clone)]
pub struct CustomerChanges {
    pub name: String,
    pub phone: Phone,
    pub password: Option<HashedPassword>,
}
