//! Database access layer (PostgreSQL)
//!
//! One module per entity. Functions take `&PgPool` (or a transaction) and
//! return `BoxError`; handlers convert through `ServiceError`.

pub mod bookings;
pub mod menu_items;
pub mod orders;
pub mod packages;
pub mod payment_types;
pub mod tables;
pub mod users;

pub use crate::BoxError;
