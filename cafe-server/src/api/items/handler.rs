//! Menu item handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::CursorPage;
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, MenuItemAvailability, MenuItemCreate, MenuItemOption, MenuItemUpdate};
use shared::pagination::{AvailabilityFilter, ListQuery};
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id)
}

/// GET /api/items
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<AvailabilityFilter>>,
) -> ApiResult<CursorPage<MenuItem>> {
    ok(db::menu_items::list(&state.pool, &query).await?)
}

/// GET /api/items/options
pub async fn options(State(state): State<AppState>) -> ApiResult<Vec<MenuItemOption>> {
    ok(db::menu_items::options(&state.pool).await?)
}

/// GET /api/items/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<MenuItem> {
    let item = db::menu_items::find(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(item)
}

/// POST /api/items
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    payload.validate()?;
    let item = db::menu_items::create(&state.pool, &payload).await?;
    tracing::info!(item_id = item.id, user_id = current.id, "Menu item created");
    ok(item)
}

/// PUT /api/items/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> ApiResult<MenuItem> {
    payload.validate()?;
    let item = db::menu_items::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(item)
}

/// PUT /api/items/{id}/availability
pub async fn set_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemAvailability>,
) -> ApiResult<MenuItem> {
    let item = db::menu_items::set_availability(&state.pool, id, payload.available, payload.restore)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(item)
}

/// DELETE /api/items/{id} - soft delete
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<MenuItem> {
    let item = db::menu_items::soft_delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(item_id = id, user_id = current.id, "Menu item deleted");
    ok(item)
}
