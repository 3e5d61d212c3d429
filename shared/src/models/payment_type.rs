//! Payment Type Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{default_true, not_blank};

/// Payment type entity (cash, bank transfer, e-wallet ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentType {
    pub id: i64,
    pub name: String,
    pub account_number: String,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create payment type payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentTypeCreate {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub account_number: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Update payment type payload
pub type PaymentTypeUpdate = PaymentTypeCreate;

/// Lean projection for selectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentTypeOption {
    pub id: i64,
    pub name: String,
    pub account_number: String,
}
