//! Authentication and authorization
//!
//! - [`JwtService`] - session token service
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - authentication middleware
//! - [`require_role`] - role check middleware
//! - [`LoginGuard`] - failed-login throttling

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod throttle;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{ADMIN_ROLES, require_auth, require_role};
pub use throttle::{FailedLogin, LoginGuard};
