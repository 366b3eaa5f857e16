//! Manager Entity

use chrono::{DateTime, Utc};
use kernel::id::ManagerId;
use platform::password::HashedPassword;

use crate::domain::value_object::{phone::Phone, role::RoleSet};

/// Sales manager account
#[derive(Debug, Clone)]
pub struct Manager {
    pub id: ManagerId,
    pub name: String,
    pub phone: Phone,
    pub password: HashedPassword,
    pub roles: RoleSet,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewManager {
    pub name: String,
    pub phone: Phone,
    pub password: HashedPassword,
    pub roles: RoleSet,
}
