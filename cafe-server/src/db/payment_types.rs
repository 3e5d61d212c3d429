//! Payment type database operations

use shared::models::{PaymentType, PaymentTypeCreate, PaymentTypeOption, PaymentTypeUpdate};
use shared::pagination::{ActiveFilter, CursorPage, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

pub async fn list(
    pool: &PgPool,
    query: &ListQuery<ActiveFilter>,
) -> Result<CursorPage<PaymentType>, BoxError> {
    let rows: Vec<PaymentType> = sqlx::query_as(
        r#"
        SELECT id, name, account_number, active, created_at, updated_at
        FROM payment_types
        WHERE ($1::BIGINT IS NULL OR id <= $1)
          AND ($2::TEXT IS NULL OR name ILIKE $2)
          AND ($3::BOOLEAN IS NULL OR active = $3)
        ORDER BY id DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(query.cursor)
    .bind(query.search_pattern())
    .bind(query.status().flag())
    .bind(query.fetch_limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;
    Ok(CursorPage::from_overfetch(rows, query.limit(), |p| p.id))
}

/// Active payment types for the ordering page
pub async fn active_options(pool: &PgPool) -> Result<Vec<PaymentTypeOption>, BoxError> {
    let rows = sqlx::query_as(
        "SELECT id, name, account_number FROM payment_types WHERE active ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<PaymentType>, BoxError> {
    let row = sqlx::query_as(
        r#"
        SELECT id, name, account_number, active, created_at, updated_at
        FROM payment_types WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, data: &PaymentTypeCreate) -> Result<PaymentType, BoxError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO payment_types (id, name, account_number, active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, name, account_number, active, created_at, updated_at
        "#,
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.account_number.trim())
    .bind(data.active)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &PaymentTypeUpdate,
) -> Result<Option<PaymentType>, BoxError> {
    let row = sqlx::query_as(
        r#"
        UPDATE payment_types
        SET name = $2, account_number = $3, active = $4, updated_at = $5
        WHERE id = $1
        RETURNING id, name, account_number, active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.account_number.trim())
    .bind(data.active)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn is_referenced(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let referenced: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM orders WHERE payment_type_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(referenced)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM payment_types WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
