//! Auth API Handlers

use axum::{Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{LoginRequest, LoginResponse, UserResponse};
use shared::util::now_millis;
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::auth::{CurrentUser, FailedLogin};
use crate::db;
use crate::security_log;
use crate::state::AppState;
use crate::util::verify_password;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate()?;
    let email = req.email.trim().to_lowercase();
    let now = now_millis();

    let Some(user) = db::users::find_by_email(&state.pool, &email).await? else {
        security_log!(WARN, "login_failed", email = %email, reason = "unknown_email");
        return Err(AppError::invalid_credentials().into());
    };

    if let Err(e) = state.login_guard.precheck(&user, now) {
        security_log!(WARN, "login_rejected", user_id = user.id, code = %e.code);
        return Err(e.into());
    }

    if !verify_password(&req.password, &user.password_hash) {
        let attempts = db::users::increment_login_attempts(&state.pool, user.id).await?;
        return match state.login_guard.on_failure(attempts, now) {
            FailedLogin::Rejected => {
                security_log!(WARN, "login_failed", user_id = user.id, attempts = attempts);
                Err(AppError::invalid_credentials().into())
            }
            FailedLogin::Block { until } => {
                db::users::block_until(&state.pool, user.id, until).await?;
                security_log!(
                    WARN,
                    "account_blocked",
                    user_id = user.id,
                    attempts = attempts,
                    until = until
                );
                Err(state.login_guard.blocked_error().into())
            }
        };
    }

    db::users::reset_login_attempts(&state.pool, user.id).await?;

    let user = UserResponse::from(user);
    let (token, expires_at) = state.jwt_service.generate_token(&user).map_err(|e| {
        tracing::error!(error = %e, "Token generation failed");
        AppError::new(ErrorCode::InternalError)
    })?;

    security_log!(INFO, "login_success", user_id = user.id, role = %user.role);
    ok(LoginResponse {
        token,
        expires_at,
        user,
    })
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, current: CurrentUser) -> ApiResult<UserResponse> {
    let user = db::users::find(&state.pool, current.id)
        .await?
        .filter(|u| u.deleted_at.is_none())
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    ok(user.into())
}
