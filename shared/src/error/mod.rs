//! Error codes and the response envelope shared by server and clients
//!
//! Codes are `u16`, grouped by their leading digit:
//!
//! | range | domain         |
//! |-------|----------------|
//! | 0xxx  | general        |
//! | 1xxx  | authentication |
//! | 2xxx  | permission     |
//! | 3xxx  | booking        |
//! | 4xxx  | order          |
//! | 5xxx  | payment        |
//! | 6xxx  | menu           |
//! | 7xxx  | table          |
//! | 8xxx  | user           |
//! | 9xxx  | system         |
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::TableNotFound).with_detail("id", 4);
//! let body = ApiResponse::<()>::error(&err);
//! assert_eq!(body.code, Some(7001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
