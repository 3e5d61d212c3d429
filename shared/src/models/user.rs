//! User Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{default_true, not_blank};

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "user_role", rename_all = "lowercase"))]
pub enum Role {
    Owner,
    Manager,
    Cashier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Manager => "manager",
            Role::Cashier => "cashier",
        }
    }

    /// Owner and manager may administer users and payment types
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Owner | Role::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "manager" => Ok(Role::Manager),
            "cashier" => Ok(Role::Cashier),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User row (includes credentials, never serialized to clients)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub password_hash: String,
    pub login_attempts: i32,
    pub block_expires: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
            created_at: u.created_at,
            updated_at: u.updated_at,
            deleted_at: u.deleted_at,
        }
    }
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub role: Role,
    #[validate(length(min = 8, max = 32, message = "password must be 8 to 32 characters"))]
    pub password: String,
    pub password_confirm: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub role: Role,
}

/// Activate / deactivate payload; `restore` also clears the soft delete marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActiveUpdate {
    pub is_active: bool,
    #[serde(default)]
    pub restore: bool,
}

/// Change password payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordChange {
    pub old_password: String,
    #[validate(length(min = 8, max = 32, message = "password must be 8 to 32 characters"))]
    pub new_password: String,
    pub confirm_password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(role, Role::Cashier);
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
        assert_eq!("owner".parse::<Role>(), Ok(Role::Owner));
    }

    #[test]
    fn test_active_update_restore_defaults_off() {
        let update: UserActiveUpdate = serde_json::from_str(r#"{"is_active":false}"#).unwrap();
        assert!(!update.is_active);
        assert!(!update.restore);

        let update: UserActiveUpdate =
            serde_json::from_str(r#"{"is_active":true,"restore":true}"#).unwrap();
        assert!(update.is_active && update.restore);
    }

    #[test]
    fn test_role_is_admin() {
        assert!(Role::Owner.is_admin());
        assert!(Role::Manager.is_admin());
        assert!(!Role::Cashier.is_admin());
    }

    #[test]
    fn test_user_create_validation() {
        let mut payload = UserCreate {
            name: "Sari".into(),
            email: "sari@cafe.id".into(),
            role: Role::Cashier,
            password: "rahasia123".into(),
            password_confirm: "rahasia123".into(),
            is_active: true,
        };
        assert!(payload.validate().is_ok());

        payload.password = "short".into();
        assert!(payload.validate().is_err());

        payload.password = "rahasia123".into();
        payload.email = "not-an-email".into();
        assert!(payload.validate().is_err());

        payload.email = "sari@cafe.id".into();
        payload.name = "   ".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_user_create_defaults_active() {
        let json = r#"{"name":"Budi","email":"budi@cafe.id","role":"manager","password":"12345678","password_confirm":"12345678"}"#;
        let payload: UserCreate = serde_json::from_str(json).unwrap();
        assert!(payload.is_active);
    }
}
