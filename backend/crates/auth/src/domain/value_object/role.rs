//! Manager roles and access levels
//!
//! Roles are stored as text labels (`TEXT[]`). Parsing is exact and
//! case-sensitive; unknown labels read from storage are dropped with a warning.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "MANAGER")]
    Manager,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "MANAGER" => Some(Role::Manager),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What a guarded route demands of a manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    /// `MANAGER`
    Manager,
    /// `MANAGER` and `ADMIN`
    Admin,
}

impl AccessLevel {
    pub const fn required_roles(&self) -> &'static [Role] {
        match self {
            AccessLevel::Manager => &[Role::Manager],
            AccessLevel::Admin => &[Role::Manager, Role::Admin],
        }
    }
}

/// Set of roles held by one manager
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut set = Vec::new();
        for role in roles {
            if !set.contains(&role) {
                set.push(role);
            }
        }
        Self(set)
    }

    /// Parse stored labels, skipping the ones we do not know
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        Self::new(labels.iter().filter_map(|label| {
            let label = label.as_ref();
            let role = Role::from_code(label);
            if role.is_none() {
                tracing::warn!(label = %label, "Ignoring unknown role label");
            }
            role
        }))
    }

    /// Parse labels from a request; unknown labels are rejected
    pub fn parse_strict<S: AsRef<str>>(labels: &[S]) -> Result<Self, String> {
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                Role::from_code(label).ok_or_else(|| format!("unknown role: {label}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn grants(&self, level: AccessLevel) -> bool {
        level.required_roles().iter().all(|r| self.contains(*r))
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|r| r.code().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}
