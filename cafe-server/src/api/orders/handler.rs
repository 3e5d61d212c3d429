//! Order handlers
//!
//! Staff may order any non-deleted catalog entry, regardless of
//! availability. Finished orders are read-only.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    OrderCreate, OrderDetail, OrderListEntry, OrderSummaryRequest, OrderUpdate, PaymentToken,
};
use shared::order_status::{StatusAction, StatusUpdate};
use shared::pagination::{ListQuery, OrderStatusFilter};
use shared::{CursorPage, OrderSummary};
use sqlx::PgPool;
use validator::Validate;

use crate::api::{ApiResult, ok};
use crate::auth::CurrentUser;
use crate::db;
use crate::db::orders::OrderWrite;
use crate::error::ServiceResult;
use crate::services::midtrans::{CustomerDetails, TransactionStatus, gateway_order_id};
use crate::services::ordering::{self, CatalogRule};
use crate::state::AppState;

/// Gateway status together with the order after reconciliation
#[derive(Debug, Serialize)]
pub struct PaymentStatus {
    pub gateway: TransactionStatus,
    pub order: OrderDetail,
}

async fn load_detail(pool: &PgPool, id: i64) -> ServiceResult<OrderDetail> {
    Ok(db::orders::find_detail(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?)
}

/// GET /api/orders - newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery<OrderStatusFilter>>,
) -> ApiResult<CursorPage<OrderListEntry>> {
    ok(db::orders::list(&state.pool, &query).await?)
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<OrderDetail> {
    ok(load_detail(&state.pool, id).await?)
}

/// POST /api/orders/summary
pub async fn summary(
    State(state): State<AppState>,
    Json(req): Json<OrderSummaryRequest>,
) -> ApiResult<OrderSummary> {
    req.validate()?;
    if req.lines.is_empty() {
        return ok(OrderSummary::default());
    }
    let resolved = ordering::resolve_lines(&state.pool, &req.lines, CatalogRule::Existing).await?;
    ok(resolved.summary)
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<OrderCreate>,
) -> ApiResult<OrderDetail> {
    req.validate()?;
    ordering::check_references(
        &state.pool,
        req.payment_type_id,
        req.table_id,
        req.booking_id,
        CatalogRule::Existing,
    )
    .await?;
    let resolved = ordering::resolve_lines(&state.pool, &req.lines, CatalogRule::Existing).await?;

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
    tracing::info!(order_id = id, user_id = current.id, "Order created from dashboard");
    ok(load_detail(&state.pool, id).await?)
}

/// PUT /api/orders/{id} - replace table, payment type and lines
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<OrderUpdate>,
) -> ApiResult<OrderDetail> {
    req.validate()?;
    let existing = load_detail(&state.pool, id).await?;
    if existing.status.is_finished() {
        return Err(AppError::new(ErrorCode::OrderAlreadyCompleted).into());
    }

    ordering::check_references(
        &state.pool,
        req.payment_type_id,
        req.table_id,
        None,
        CatalogRule::Existing,
    )
    .await?;
    let resolved = ordering::resolve_lines(&state.pool, &req.lines, CatalogRule::Existing).await?;

    let replaced = db::orders::replace(
        &state.pool,
        id,
        &OrderWrite {
            table_id: req.table_id,
            payment_type_id: req.payment_type_id,
            booking_id: existing.entry.order.booking_id,
            summary: resolved.summary,
            lines: resolved.lines,
        },
    )
    .await?;
    if !replaced {
        return Err(AppError::new(ErrorCode::OrderAlreadyCompleted).into());
    }

    tracing::info!(order_id = id, user_id = current.id, "Order updated");
    ok(load_detail(&state.pool, id).await?)
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<StatusUpdate>,
) -> ApiResult<OrderDetail> {
    let order = db::orders::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?;
    let next = order.status().apply(req.action)?;

    db::orders::set_status(&state.pool, id, next).await?;
    tracing::info!(
        order_id = id,
        user_id = current.id,
        from = ?order.status(),
        to = ?next,
        "Order status changed"
    );
    ok(load_detail(&state.pool, id).await?)
}

/// POST /api/orders/{id}/payment-token - Midtrans Snap token for the order total
pub async fn payment_token(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<PaymentToken> {
    let Some(midtrans) = state.midtrans.as_ref() else {
        return Err(AppError::new(ErrorCode::PaymentGatewayDisabled).into());
    };

    let detail = load_detail(&state.pool, id).await?;
    let order = &detail.entry.order;
    if order.paid {
        return Err(AppError::new(ErrorCode::OrderAlreadyPaid).into());
    }

    let customer = CustomerDetails {
        first_name: detail.entry.table_number.map(|n| format!("Table {n}")),
        ..Default::default()
    };
    let snap = midtrans
        .create_transaction_token(&gateway_order_id(order.id), order.total, &customer)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, order_id = id, "Midtrans token request failed");
            AppError::new(ErrorCode::PaymentFailed)
        })?;

    ok(PaymentToken {
        order_id: order.id,
        token: snap.token,
        redirect_url: snap.redirect_url,
    })
}

/// GET /api/orders/{id}/payment-status - marks an unpaid order paid once Midtrans settles it
pub async fn payment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<PaymentStatus> {
    let Some(midtrans) = state.midtrans.as_ref() else {
        return Err(AppError::new(ErrorCode::PaymentGatewayDisabled).into());
    };

    let order = db::orders::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id))?;

    let gateway = midtrans
        .transaction_status(&gateway_order_id(order.id))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, order_id = id, "Midtrans status lookup failed");
            AppError::new(ErrorCode::PaymentFailed)
        })?;

    if gateway.is_settled() && !order.paid {
        let next = order.status().apply(StatusAction::Pay)?;
        db::orders::set_status(&state.pool, id, next).await?;
        tracing::info!(order_id = id, "Order paid through Midtrans");
    }

    ok(PaymentStatus {
        gateway,
        order: load_detail(&state.pool, id).await?,
    })
}
