//! Dining table handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::CursorPage;
use shared::error::{AppError, ErrorCode};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableOption, TableQrCode};
use shared::pagination::ListQuery;
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::auth::CurrentUser;
use crate::db;
use crate::services::qrcode;
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::TableNotFound).with_detail("id", id)
}

/// GET /api/tables
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<()>>,
) -> ApiResult<CursorPage<DiningTable>> {
    ok(db::tables::list(&state.pool, &query).await?)
}

/// GET /api/tables/options
pub async fn options(State(state): State<AppState>) -> ApiResult<Vec<TableOption>> {
    ok(db::tables::options(&state.pool).await?)
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<DiningTable> {
    let table = db::tables::find(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(table)
}

/// POST /api/tables
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DiningTableCreate>,
) -> ApiResult<DiningTable> {
    payload.validate()?;
    ok(db::tables::create(&state.pool, &payload).await?)
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> ApiResult<DiningTable> {
    payload.validate()?;
    let table = db::tables::update(&state.pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    ok(table)
}

/// DELETE /api/tables/{id} - hard delete, refused while orders or bookings reference it
pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if db::tables::is_referenced(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::TableHasOrders)
            .with_detail("id", id)
            .into());
    }
    if !db::tables::delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(table_id = id, user_id = current.id, "Table deleted");
    ok(())
}

/// GET /api/tables/{id}/qrcode - ordering link as a PNG data URL
pub async fn qr_code(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<TableQrCode> {
    let table = db::tables::find(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let url = qrcode::table_order_url(&state.public_base_url, table.id);
    let data_url = qrcode::render_png_data_url(&url).map_err(|e| {
        tracing::error!(error = %e, table_id = id, "QR code rendering failed");
        AppError::new(ErrorCode::QrCodeFailed)
    })?;

    ok(TableQrCode {
        table_id: table.id,
        number: table.number,
        url,
        data_url,
    })
}
