//! Booking Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::order_status::OrderStatus;

/// Table reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// Reserved time (Unix millis)
    pub date: i64,
    pub table_id: i64,
    pub paid: bool,
    pub finished: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Booking {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_flags(self.paid, self.finished)
    }
}

/// Booking joined with its table number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookingEntry {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub booking: Booking,
    pub table_number: i32,
}

/// Create / update booking payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingCreate {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(length(min = 6, max = 20, message = "invalid phone number"))]
    pub phone: String,
    pub date: i64,
    pub table_id: i64,
}

pub type BookingUpdate = BookingCreate;
