//! User profile as returned by the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Shop staff preparing orders.
    Staff,
    /// Administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" | "user" => Ok(Role::Customer),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// Opaque user object.
///
/// Every field the backend sends is kept; only `role` is interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Map<String, Value>);

impl Profile {
    /// Wrap a JSON value, if it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Self)
    }

    /// Raw field access.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The role string, if present.
    pub fn role_name(&self) -> Option<&str> {
        self.str_field(&["role"])
    }

    /// The parsed role; unknown or missing roles count as customers.
    pub fn role(&self) -> Role {
        self.role_name()
            .and_then(|r| r.parse().ok())
            .unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field(&["email"])
    }

    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> Option<&str> {
        self.str_field(&["display_name", "displayName", "name"])
            .or_else(|| self.email())
    }

    fn str_field(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|n| self.0.get(*n).and_then(Value::as_str))
            .find(|s| !s.is_empty())
    }
}

impl From<Map<String, Value>> for Profile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
