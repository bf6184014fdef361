//! User model and roles.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Closed set of roles recognized by the gateway.
///
/// The core API encodes these as upper-case strings. Every guarded route
/// matches exhaustively on this enum; there is no string-typed role anywhere
/// past deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "STAFF")]
    Staff,
    #[serde(rename = "MEMBER")]
    Member,
}

impl Role {
    /// True for roles that run the front desk (admin or staff).
    pub fn is_staff(&self) -> bool {
        match self {
            Role::Admin | Role::Staff => true,
            Role::Member => false,
        }
    }
}

/// User profile as returned by the core API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_picture_url: Option<String>,
    /// ISO 8601 date the account was created
    pub join_date: Option<String>,
}

/// Payload for creating a user (admin operation).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub role: Role,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Profile fields a user may edit. All optional; absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Access/refresh token pair issued by the core API at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_uses_upper_case_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::Staff).unwrap(), "\"STAFF\"");
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"MEMBER\"");

        let role: Role = serde_json::from_str("\"MEMBER\"").unwrap();
        assert_eq!(role, Role::Member);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result: Result<Role, _> = serde_json::from_str("\"SUPERUSER\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_staff() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Staff.is_staff());
        assert!(!Role::Member.is_staff());
    }
}
