//! Public ordering handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::OrderSummary;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    MenuItem, OrderCreate, OrderDetail, OrderSummaryRequest, PackageDetail, PaymentTypeOption,
    TableOption,
};
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::db;
use crate::db::orders::OrderWrite;
use crate::services::ordering::{self, CatalogRule};
use crate::state::AppState;

/// Orderable catalog
#[derive(Debug, Serialize)]
pub struct PublicMenu {
    pub items: Vec<MenuItem>,
    pub packages: Vec<PackageDetail>,
}

/// GET /api/public/menu
pub async fn menu(State(state): State<AppState>) -> ApiResult<PublicMenu> {
    let items = db::menu_items::list_orderable(&state.pool).await?;
    let packages = db::packages::list_orderable(&state.pool).await?;
    ok(PublicMenu { items, packages })
}

/// GET /api/public/tables
pub async fn tables(State(state): State<AppState>) -> ApiResult<Vec<TableOption>> {
    ok(db::tables::options(&state.pool).await?)
}

/// GET /api/public/payment-types
pub async fn payment_types(State(state): State<AppState>) -> ApiResult<Vec<PaymentTypeOption>> {
    ok(db::payment_types::active_options(&state.pool).await?)
}

/// Snap.js settings for the ordering page
#[derive(Debug, Serialize)]
pub struct PaymentGateway {
    pub enabled: bool,
    pub client_key: Option<String>,
}

/// GET /api/public/payment-gateway
pub async fn payment_gateway(State(state): State<AppState>) -> ApiResult<PaymentGateway> {
    let client_key = state
        .midtrans
        .as_ref()
        .and_then(|m| m.client_key())
        .map(str::to_string);
    ok(PaymentGateway {
        enabled: state.midtrans.is_some(),
        client_key,
    })
}

/// POST /api/public/orders/summary - price a draft cart
pub async fn summary(
    State(state): State<AppState>,
    Json(req): Json<OrderSummaryRequest>,
) -> ApiResult<OrderSummary> {
    req.validate()?;
    if req.lines.is_empty() {
        return ok(OrderSummary::default());
    }
    let resolved = ordering::resolve_lines(&state.pool, &req.lines, CatalogRule::Orderable).await?;
    ok(resolved.summary)
}

/// POST /api/public/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<OrderCreate>,
) -> ApiResult<OrderDetail> {
    req.validate()?;
    ordering::check_references(
        &state.pool,
        req.payment_type_id,
        req.table_id,
        req.booking_id,
        CatalogRule::Orderable,
    )
    .await?;
    let resolved = ordering::resolve_lines(&state.pool, &req.lines, CatalogRule::Orderable).await?;

    let id = db::orders::create(
        &state.pool,
        &OrderWrite {
            table_id: req.table_id,
            payment_type_id: req.payment_type_id,
            booking_id: req.booking_id,
            summary: resolved.summary,
            lines: resolved.lines,
        },
    )
    .await?;
    tracing::info!(order_id = id, total = resolved.summary.total, "Order placed");

    let detail = db::orders::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    ok(detail)
}

/// GET /api/public/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<OrderDetail> {
    let detail = db::orders::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    ok(detail)
}
