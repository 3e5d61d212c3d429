//! User handlers
//!
//! Only an owner may create owners or touch an owner's account.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::CursorPage;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    PasswordChange, Role, User, UserActiveUpdate, UserCreate, UserResponse, UserUpdate,
};
use shared::pagination::{AccountFilter, ListQuery};
use sqlx::PgPool;
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::auth::CurrentUser;
use crate::db;
use crate::db::users::NewUser;
use crate::error::ServiceResult;
use crate::security_log;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

/// Reject a non-owner acting on an owner account
fn guard_target(current: &CurrentUser, target: &User) -> Result<(), AppError> {
    if target.role == Role::Owner && current.role != Role::Owner {
        return Err(AppError::new(ErrorCode::CannotModifyOwner));
    }
    Ok(())
}

/// Reject a non-owner granting the owner role
fn guard_role(current: &CurrentUser, role: Role) -> Result<(), AppError> {
    if role == Role::Owner && current.role != Role::Owner {
        return Err(AppError::new(ErrorCode::CannotAssignOwner));
    }
    Ok(())
}

async fn load(pool: &PgPool, id: i64) -> ServiceResult<User> {
    Ok(db::users::find(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound).with_detail("id", id))?)
}

fn hash(password: &str) -> Result<String, AppError> {
    hash_password(password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::new(ErrorCode::InternalError)
    })
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<AccountFilter>>,
) -> ApiResult<CursorPage<UserResponse>> {
    ok(db::users::list(&state.pool, &query).await?)
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<UserResponse> {
    ok(load(&state.pool, id).await?.into())
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> ApiResult<UserResponse> {
    payload.validate()?;
    if payload.password != payload.password_confirm {
        return Err(AppError::new(ErrorCode::PasswordMismatch).into());
    }
    guard_role(&current, payload.role)?;

    let password_hash = hash(&payload.password)?;
    let user = db::users::create(
        &state.pool,
        NewUser {
            name: &payload.name,
            email: &payload.email,
            role: payload.role,
            password_hash: &password_hash,
            is_active: payload.is_active,
        },
    )
    .await?;

    security_log!(
        INFO,
        "user_created",
        user_id = user.id,
        role = %user.role,
        by = current.id
    );
    ok(user)
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> ApiResult<UserResponse> {
    payload.validate()?;
    let target = load(&state.pool, id).await?;
    guard_target(&current, &target)?;
    guard_role(&current, payload.role)?;

    let user = db::users::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    if user.role != target.role {
        security_log!(
            INFO,
            "role_changed",
            user_id = id,
            from = %target.role,
            to = %user.role,
            by = current.id
        );
    }
    ok(user)
}

/// PUT /api/users/{id}/active
pub async fn set_active(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UserActiveUpdate>,
) -> ApiResult<UserResponse> {
    let target = load(&state.pool, id).await?;
    guard_target(&current, &target)?;

    let user = db::users::set_active(&state.pool, id, payload.is_active, payload.restore)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    security_log!(
        INFO,
        "user_active_changed",
        user_id = id,
        is_active = payload.is_active,
        restored = payload.restore,
        by = current.id
    );
    ok(user)
}

/// PUT /api/users/{id}/password
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PasswordChange>,
) -> ApiResult<()> {
    payload.validate()?;
    if payload.new_password != payload.confirm_password {
        return Err(AppError::new(ErrorCode::PasswordMismatch).into());
    }
    let target = load(&state.pool, id).await?;
    guard_target(&current, &target)?;

    if !verify_password(&payload.old_password, &target.password_hash) {
        security_log!(WARN, "password_change_failed", user_id = id, by = current.id);
        return Err(AppError::new(ErrorCode::WrongOldPassword).into());
    }

    let password_hash = hash(&payload.new_password)?;
    db::users::set_password(&state.pool, id, &password_hash).await?;
    security_log!(INFO, "password_changed", user_id = id, by = current.id);
    ok(())
}

/// DELETE /api/users/{id} - soft delete
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if id == current.id {
        return Err(AppError::new(ErrorCode::UserCannotDeleteSelf).into());
    }
    let target = load(&state.pool, id).await?;
    guard_target(&current, &target)?;

    db::users::soft_delete(&state.pool, id).await?;
    security_log!(INFO, "user_deleted", user_id = id, by = current.id);
    ok(())
}
