//! Dining Table Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    /// Table number printed on the table, unique
    pub number: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create / update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(range(min = 1, message = "table number must be positive"))]
    pub number: i32,
}

pub type DiningTableUpdate = DiningTableCreate;

/// Lean projection for selectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TableOption {
    pub id: i64,
    pub number: i32,
}

/// QR code for a table's ordering page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableQrCode {
    pub table_id: i64,
    pub number: i32,
    pub url: String,
    /// `data:image/png;base64,...`
    pub data_url: String,
}
