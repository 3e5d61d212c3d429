//! Data models
//!
//! Shared between cafe-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflake ids, all timestamps Unix millis.

pub mod booking;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod package;
pub mod payment_type;
pub mod user;

// Re-exports
pub use booking::*;
pub use dining_table::*;
pub use menu_item::*;
pub use order::*;
pub use package::*;
pub use payment_type::*;
pub use user::*;

use validator::ValidationError;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}
