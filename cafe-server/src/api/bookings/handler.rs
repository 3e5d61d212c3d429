//! Booking handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::CursorPage;
use shared::error::{AppError, ErrorCode};
use shared::models::{BookingCreate, BookingEntry, BookingUpdate};
use shared::order_status::StatusUpdate;
use shared::pagination::{ListQuery, OrderStatusFilter};
use sqlx::PgPool;
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::BookingNotFound).with_detail("id", id)
}

async fn load(pool: &PgPool, id: i64) -> ServiceResult<BookingEntry> {
    Ok(db::bookings::find(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?)
}

async fn check_table(pool: &PgPool, table_id: i64) -> ServiceResult<()> {
    if !db::tables::exists(pool, table_id).await? {
        return Err(AppError::new(ErrorCode::TableNotFound)
            .with_detail("id", table_id)
            .into());
    }
    Ok(())
}

/// GET /api/bookings
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<OrderStatusFilter>>,
) -> ApiResult<CursorPage<BookingEntry>> {
    ok(db::bookings::list(&state.pool, &query).await?)
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<BookingEntry> {
    ok(load(&state.pool, id).await?)
}

/// POST /api/bookings
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BookingCreate>,
) -> ApiResult<BookingEntry> {
    payload.validate()?;
    check_table(&state.pool, payload.table_id).await?;
    let booking = db::bookings::create(&state.pool, &payload).await?;
    ok(load(&state.pool, booking.id).await?)
}

/// PUT /api/bookings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingUpdate>,
) -> ApiResult<BookingEntry> {
    payload.validate()?;
    check_table(&state.pool, payload.table_id).await?;
    db::bookings::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(load(&state.pool, id).await?)
}

/// PUT /api/bookings/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<StatusUpdate>,
) -> ApiResult<BookingEntry> {
    let entry = load(&state.pool, id).await?;
    let next = entry.booking.status().apply(req.action)?;
    db::bookings::set_status(&state.pool, id, next).await?;
    ok(load(&state.pool, id).await?)
}
