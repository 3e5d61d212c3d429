//! Order database operations
//!
//! An order row plus its snapshot lines in `order_lines`. Totals are
//! computed by the caller and stored on the order.

use shared::OrderSummary;
use shared::models::{LineKind, Order, OrderDetail, OrderLine, OrderListEntry};
use shared::order_status::OrderStatus;
use shared::pagination::{CursorPage, ListQuery, OrderStatusFilter};
use shared::util::{now_millis, snowflake_id};
use sqlx::{PgPool, Postgres, Transaction};

use super::BoxError;

/// Line snapshot to store with an order
#[derive(Debug, Clone, PartialEq)]
pub struct NewLine {
    pub kind: LineKind,
    pub ref_id: i64,
    pub name: String,
    pub unit_price: i64,
    pub discount_percent: Option<i32>,
    pub quantity: i32,
}

/// Order header fields written on create and update
#[derive(Debug, Clone)]
pub struct OrderWrite {
    pub table_id: Option<i64>,
    pub payment_type_id: i64,
    pub booking_id: Option<i64>,
    pub summary: OrderSummary,
    pub lines: Vec<NewLine>,
}

pub async fn list(
    pool: &PgPool,
    query: &ListQuery<OrderStatusFilter>,
) -> Result<CursorPage<OrderListEntry>, BoxError> {
    let (paid, finished) = query.status().flags();
    let rows: Vec<OrderListEntry> = sqlx::query_as(
        r#"
        SELECT o.id, o.table_id, o.payment_type_id, o.booking_id, o.subtotal, o.discount,
               o.total, o.paid, o.finished, o.created_at, o.updated_at,
               t.number AS table_number, pt.name AS payment_type_name
        FROM orders o
        LEFT JOIN dining_tables t ON t.id = o.table_id
        JOIN payment_types pt ON pt.id = o.payment_type_id
        WHERE ($1::BIGINT IS NULL OR o.id <= $1)
          AND ($2::TEXT IS NULL OR t.number::TEXT LIKE $2 OR pt.name ILIKE $2)
          AND ($3::BOOLEAN IS NULL OR o.paid = $3)
          AND ($4::BOOLEAN IS NULL OR o.finished = $4)
        ORDER BY o.id DESC
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(query.cursor)
    .bind(query.search_pattern())
    .bind(paid)
    .bind(finished)
    .bind(query.fetch_limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;
    Ok(CursorPage::from_overfetch(rows, query.limit(), |o| o.order.id))
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Order>, BoxError> {
    let row = sqlx::query_as(
        r#"
        SELECT id, table_id, payment_type_id, booking_id, subtotal, discount, total,
               paid, finished, created_at, updated_at
        FROM orders WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Order with table number, payment type name and lines
pub async fn find_detail(pool: &PgPool, id: i64) -> Result<Option<OrderDetail>, BoxError> {
    let entry: Option<OrderListEntry> = sqlx::query_as(
        r#"
        SELECT o.id, o.table_id, o.payment_type_id, o.booking_id, o.subtotal, o.discount,
               o.total, o.paid, o.finished, o.created_at, o.updated_at,
               t.number AS table_number, pt.name AS payment_type_name
        FROM orders o
        LEFT JOIN dining_tables t ON t.id = o.table_id
        JOIN payment_types pt ON pt.id = o.payment_type_id
        WHERE o.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(entry) = entry else {
        return Ok(None);
    };

    let lines: Vec<OrderLine> = sqlx::query_as(
        r#"
        SELECT order_id, kind, ref_id, name, unit_price, discount_percent, quantity, assigned_at
        FROM order_lines
        WHERE order_id = $1
        ORDER BY assigned_at, kind, ref_id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(OrderDetail::new(entry, lines)))
}

async fn insert_lines(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i64,
    lines: &[NewLine],
    now: i64,
) -> Result<(), BoxError> {
    for line in lines {
        sqlx::query(
            r#"
            INSERT INTO order_lines
                (order_id, kind, ref_id, name, unit_price, discount_percent, quantity, assigned_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order_id)
        .bind(line.kind)
        .bind(line.ref_id)
        .bind(&line.name)
        .bind(line.unit_price)
        .bind(line.discount_percent)
        .bind(line.quantity)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Insert an order and its lines; returns the new order id
pub async fn create(pool: &PgPool, data: &OrderWrite) -> Result<i64, BoxError> {
    let id = snowflake_id();
    let now = now_millis();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO orders
            (id, table_id, payment_type_id, booking_id, subtotal, discount, total,
             created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        "#,
    )
    .bind(id)
    .bind(data.table_id)
    .bind(data.payment_type_id)
    .bind(data.booking_id)
    .bind(data.summary.subtotal)
    .bind(data.summary.discount)
    .bind(data.summary.total)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    insert_lines(&mut tx, id, &data.lines, now).await?;
    tx.commit().await?;
    Ok(id)
}

/// Replace header fields and lines of an unfinished order
///
/// Returns `false` when the order is missing or already finished.
pub async fn replace(pool: &PgPool, id: i64, data: &OrderWrite) -> Result<bool, BoxError> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE orders
        SET table_id = $2, payment_type_id = $3, subtotal = $4, discount = $5, total = $6,
            updated_at = $7
        WHERE id = $1 AND NOT finished
        "#,
    )
    .bind(id)
    .bind(data.table_id)
    .bind(data.payment_type_id)
    .bind(data.summary.subtotal)
    .bind(data.summary.discount)
    .bind(data.summary.total)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    if updated.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("DELETE FROM order_lines WHERE order_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_lines(&mut tx, id, &data.lines, now).await?;
    tx.commit().await?;
    Ok(true)
}

pub async fn set_status(
    pool: &PgPool,
    id: i64,
    status: OrderStatus,
) -> Result<Option<Order>, BoxError> {
    let (paid, finished) = status.flags();
    let row = sqlx::query_as(
        r#"
        UPDATE orders SET paid = $2, finished = $3, updated_at = $4
        WHERE id = $1
        RETURNING id, table_id, payment_type_id, booking_id, subtotal, discount, total,
                  paid, finished, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(paid)
    .bind(finished)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
