//! Shared types for the café server and its clients
//!
//! Error system, domain models and payloads, list queries, order pricing,
//! the order status machine and the client-side draft carts.

pub mod cart;
pub mod error;
pub mod models;
pub mod order_status;
pub mod pagination;
pub mod pricing;
pub mod util;

pub use error::{ApiResponse, AppError, ErrorCode};
pub use pagination::{CursorPage, ListQuery};
pub use pricing::{OrderSummary, PricedLine};
