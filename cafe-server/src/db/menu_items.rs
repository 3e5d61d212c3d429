//! Menu item database operations

use shared::models::{MenuItem, MenuItemCreate, MenuItemOption, MenuItemUpdate};
use shared::pagination::{AvailabilityFilter, CursorPage, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::{PgExecutor, PgPool};

use super::BoxError;

pub async fn list(
    pool: &PgPool,
    query: &ListQuery<AvailabilityFilter>,
) -> Result<CursorPage<MenuItem>, BoxError> {
    let flags = query.status().flags();
    let rows: Vec<MenuItem> = sqlx::query_as(
        r#"
        SELECT id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        FROM menu_items
        WHERE ($1::BIGINT IS NULL OR id <= $1)
          AND ($2::TEXT IS NULL OR name ILIKE $2)
          AND ($3::BOOLEAN IS NULL OR available = $3)
          AND ($4::BOOLEAN IS NULL OR (deleted_at IS NOT NULL) = $4)
        ORDER BY id DESC
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(query.cursor)
    .bind(query.search_pattern())
    .bind(flags.flag)
    .bind(flags.deleted)
    .bind(query.fetch_limit())
    .bind(query.offset())
    .fetch_all(pool)
    .await?;
    Ok(CursorPage::from_overfetch(rows, query.limit(), |i| i.id))
}

/// Non-deleted items for selectors
pub async fn options(pool: &PgPool) -> Result<Vec<MenuItemOption>, BoxError> {
    let rows = sqlx::query_as(
        "SELECT id, name, price FROM menu_items WHERE deleted_at IS NULL ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Available, non-deleted items (public menu)
pub async fn list_orderable(pool: &PgPool) -> Result<Vec<MenuItem>, BoxError> {
    let rows = sqlx::query_as(
        r#"
        SELECT id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        FROM menu_items
        WHERE available AND deleted_at IS NULL
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<MenuItem>, BoxError> {
    let row = sqlx::query_as(
        r#"
        SELECT id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        FROM menu_items WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_many<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[i64],
) -> Result<Vec<MenuItem>, BoxError> {
    let rows = sqlx::query_as(
        r#"
        SELECT id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        FROM menu_items WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &PgPool, data: &MenuItemCreate) -> Result<MenuItem, BoxError> {
    let now = now_millis();
    let row = sqlx::query_as(
        r#"
        INSERT INTO menu_items (id, name, price, discount_percent, available, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        "#,
    )
    .bind(snowflake_id())
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.discount_percent)
    .bind(data.available)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &MenuItemUpdate,
) -> Result<Option<MenuItem>, BoxError> {
    let row = sqlx::query_as(
        r#"
        UPDATE menu_items
        SET name = $2, price = $3, discount_percent = $4, updated_at = $5
        WHERE id = $1
        RETURNING id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        "#,
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.discount_percent)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Set availability; `restore` also clears the soft delete marker
pub async fn set_availability(
    pool: &PgPool,
    id: i64,
    available: bool,
    restore: bool,
) -> Result<Option<MenuItem>, BoxError> {
    let row = sqlx::query_as(
        r#"
        UPDATE menu_items
        SET available = $2,
            deleted_at = CASE WHEN $3 THEN NULL ELSE deleted_at END,
            updated_at = $4
        WHERE id = $1
        RETURNING id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        "#,
    )
    .bind(id)
    .bind(available)
    .bind(restore)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Soft delete; an already deleted item keeps its original timestamp
pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<Option<MenuItem>, BoxError> {
    let now = now_millis();
    let row = sqlx::query_as(
        r#"
        UPDATE menu_items
        SET deleted_at = COALESCE(deleted_at, $2), updated_at = $2
        WHERE id = $1
        RETURNING id, name, price, discount_percent, available, created_at, updated_at, deleted_at
        "#,
    )
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
