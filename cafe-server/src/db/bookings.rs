//! Booking database operations

use shared::models::{Booking, BookingCreate, BookingEntry, BookingUpdate};
use shared::order_status::OrderStatus;
use shared::pagination::{CursorPage, ListQuery, OrderStatusFilter};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

pub async fn list(
    pool: &PgPool,
    query: &ListQuery<OrderStatusFilter>,
) -> Result<CursorPage<BookingEntry>, BoxError> {
    let (paid, finished) = query.status().flags();
    let rows: Vec<BookingEntry> = sqlx::query_as(
        r#"
        SELECT b.id, b.name, b.phone, b.date, b.table_id, b.paid, b.finished,
               b.created_at, b.updated_at, t.number AS table_number
        FROM bookings b
        JOIN dining_tables t ON t.id = b.table_id
        WHERE ($1::BIGINT IS NULL OR b.id <= $1)
          AND ($2::TEXT IS NULL OR b.name ILIKE $2 OR b.phone LIKE $2)
          AND ($3::BOOLEAN IS NULL OR b.paid = $3)
          AND ($4::BOOLEAN IS NULL OR b.finished = $4)
        ORDER BY b.id DESC
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
    Ok(CursorPage::from_overfetch(rows, query.limit(), |b| b.booking.id))
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<BookingEntry>, BoxError> {
    let row = sqlx::query_as(
        r#"
        SELECT b.id, b.name, b.phone, b.date, b.table_id, b.paid, b.finished,
               b.created_at, b.updated_at, t.number AS table_number
        FROM bookings b
        JOIN dining_tables t ON t.id = b.table_id
        WHERE b.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM bookings WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

pub async fn create(pool: &PgPool, data: &BookingCreate) -> Result<Booking, BoxError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO bookings (id, name, phone, date, table_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING id, name, phone, date, table_id, paid, finished, created_at, updated_at
        "#,
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.phone.trim())
    .bind(data.date)
    .bind(data.table_id)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &BookingUpdate,
) -> Result<Option<Booking>, BoxError> {
    let row = sqlx::query_as(
        r#"
        UPDATE bookings
        SET name = $2, phone = $3, date = $4, table_id = $5, updated_at = $6
        WHERE id = $1
        RETURNING id, name, phone, date, table_id, paid, finished, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.phone.trim())
    .bind(data.date)
    .bind(data.table_id)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn set_status(
    pool: &PgPool,
    id: i64,
    status: OrderStatus,
) -> Result<Option<Booking>, BoxError> {
    let (paid, finished) = status.flags();
    let row = sqlx::query_as(
        r#"
        UPDATE bookings SET paid = $2, finished = $3, updated_at = $4
        WHERE id = $1
        RETURNING id, name, phone, date, table_id, paid, finished, created_at, updated_at
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
