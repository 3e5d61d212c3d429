//! Dining table database operations

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableOption};
use shared::pagination::{CursorPage, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

/// Tables have no status filter; search matches the table number
pub async fn list(pool: &PgPool, query: &ListQuery<()>) -> Result<CursorPage<DiningTable>, BoxError> {
    let rows: Vec<DiningTable> = sqlx::query_as(
        r#"
        SELECT id, number, created_at, updated_at
        FROM dining_tables
        WHERE ($1::BIGINT IS NULL OR id <= $1)
          AND ($2::TEXT IS NULL OR number::TEXT LIKE $2)
        ORDER BY id DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(query.cursor)
    .bind(query.search_pattern())
    .bind(query.fetch_limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;
    Ok(CursorPage::from_overfetch(rows, query.limit(), |t| t.id))
}

pub async fn options(pool: &PgPool) -> Result<Vec<TableOption>, BoxError> {
    let rows = sqlx::query_as("SELECT id, number FROM dining_tables ORDER BY number")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<DiningTable>, BoxError> {
    let row = sqlx::query_as(
        "SELECT id, number, created_at, updated_at FROM dining_tables WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM dining_tables WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

pub async fn create(pool: &PgPool, data: &DiningTableCreate) -> Result<DiningTable, BoxError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO dining_tables (id, number, created_at, updated_at)
        VALUES ($1, $2, $3, $3)
        RETURNING id, number, created_at, updated_at
        "#,
    )
    .bind(snowflake_id())
    .bind(data.number)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &DiningTableUpdate,
) -> Result<Option<DiningTable>, BoxError> {
    let row = sqlx::query_as(
        r#"
        UPDATE dining_tables SET number = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, number, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(data.number)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Whether any order or booking references the table
pub async fn is_referenced(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let referenced: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM orders WHERE table_id = $1)
            OR EXISTS (SELECT 1 FROM bookings WHERE table_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(referenced)
}

/// Hard delete; returns whether a row was removed
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM dining_tables WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
