//! Authentication middleware
//!
//! `require_auth` validates the `Authorization: Bearer <token>` header and
//! injects [`CurrentUser`] into the request extensions; `require_role`
//! gates a router on the caller's role.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::security_log;
use crate::state::AppState;

/// Authenticate a request from its `Authorization` header
pub(crate) fn authenticate(
    jwt: &JwtService,
    header: Option<&str>,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let Some(header) = header else {
        security_log!(WARN, "auth_missing", uri = %uri);
        return Err(AppError::not_authenticated());
    };
    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = jwt.validate_token(token).map_err(|e| {
        security_log!(WARN, "auth_failed", error = %e, uri = %uri);
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    if !claims.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    CurrentUser::try_from(claims).map_err(|e| AppError::invalid_token(e.to_string()))
}

/// Authentication middleware - requires a valid session token
///
/// `OPTIONS` requests (CORS preflight) pass through.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let user = authenticate(&state.jwt_service, header, req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Role check middleware - must run after [`require_auth`]
///
/// ```ignore
/// Router::new()
///     .route("/", get(handler::list))
///     .layer(middleware::from_fn(require_role(ADMIN_ROLES)));
/// ```
pub fn require_role(
    roles: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !user.has_role(roles) {
                security_log!(
                    WARN,
                    "role_required",
                    user_id = user.id,
                    user_role = %user.role,
                    uri = %req.uri()
                );
                return Err(AppError::new(ErrorCode::RoleRequired));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Roles allowed to administer users and payment types
pub const ADMIN_ROLES: &[Role] = &[Role::Owner, Role::Manager];
