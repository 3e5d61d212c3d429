//! Package handlers

use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::CursorPage;
use shared::error::{AppError, ErrorCode};
use shared::models::{PackageCreate, PackageDetail, PackageUpdate, merge_package_items};
use shared::pagination::{AvailabilityFilter, ListQuery};
use sqlx::PgPool;
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::auth::CurrentUser;
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::PackageNotFound).with_detail("id", id)
}

/// Every component must be an existing, non-deleted menu item
async fn check_components(pool: &PgPool, payload: &PackageCreate) -> ServiceResult<()> {
    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::PackageEmpty).into());
    }
    merge_package_items(&payload.items)?;
    let ids: Vec<i64> = payload.items.iter().map(|i| i.item_id).collect();
    let found: HashSet<i64> = db::menu_items::find_many(pool, &ids)
        .await?
        .into_iter()
        .filter(|i| !i.is_deleted())
        .map(|i| i.id)
        .collect();

    if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
        return Err(AppError::new(ErrorCode::MenuItemNotFound)
            .with_detail("id", *missing)
            .into());
    }
    Ok(())
}

/// GET /api/packages
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<AvailabilityFilter>>,
) -> ApiResult<CursorPage<PackageDetail>> {
    ok(db::packages::list(&state.pool, &query).await?)
}

/// GET /api/packages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<PackageDetail> {
    let package = db::packages::find(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(package)
}

/// POST /api/packages
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<PackageCreate>,
) -> ApiResult<PackageDetail> {
    payload.validate()?;
    check_components(&state.pool, &payload).await?;
    let package = db::packages::create(&state.pool, &payload).await?;
    tracing::info!(package_id = package.package.id, user_id = current.id, "Package created");
    ok(package)
}

/// PUT /api/packages/{id} - replaces the component list
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PackageUpdate>,
) -> ApiResult<PackageDetail> {
    payload.validate()?;
    check_components(&state.pool, &payload).await?;
    let package = db::packages::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(package)
}

/// DELETE /api/packages/{id} - soft delete
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<PackageDetail> {
    if !db::packages::set_deleted(&state.pool, id, true).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(package_id = id, user_id = current.id, "Package deleted");
    get_by_id(State(state), Path(id)).await
}

/// POST /api/packages/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<PackageDetail> {
    if !db::packages::set_deleted(&state.pool, id, false).await? {
        return Err(not_found(id).into());
    }
    get_by_id(State(state), Path(id)).await
}
