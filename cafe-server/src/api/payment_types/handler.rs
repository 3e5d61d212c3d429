//! Payment type handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::CursorPage;
use shared::error::{AppError, ErrorCode};
use shared::models::{PaymentType, PaymentTypeCreate, PaymentTypeUpdate};
use shared::pagination::{ActiveFilter, ListQuery};
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::auth::CurrentUser;
use crate::db;
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::PaymentTypeNotFound).with_detail("id", id)
}

/// GET /api/payment-types
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<ActiveFilter>>,
) -> ApiResult<CursorPage<PaymentType>> {
    ok(db::payment_types::list(&state.pool, &query).await?)
}

/// GET /api/payment-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<PaymentType> {
    let payment_type = db::payment_types::find(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(payment_type)
}

/// POST /api/payment-types
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<PaymentTypeCreate>,
) -> ApiResult<PaymentType> {
    payload.validate()?;
    ok(db::payment_types::create(&state.pool, &payload).await?)
}

/// PUT /api/payment-types/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentTypeUpdate>,
) -> ApiResult<PaymentType> {
    payload.validate()?;
    let payment_type = db::payment_types::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(payment_type)
}

/// DELETE /api/payment-types/{id} - hard delete, refused while orders use it
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if db::payment_types::is_referenced(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::PaymentTypeInUse)
            .with_detail("id", id)
            .into());
    }
    if !db::payment_types::delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(payment_type_id = id, user_id = current.id, "Payment type deleted");
    ok(())
}
