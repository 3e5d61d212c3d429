//! User database operations
//!
//! Emails are stored lower-cased. Login throttling state lives on the row
//! (`login_attempts`, `block_expires`).

use shared::models::{Role, User, UserResponse, UserUpdate};
use shared::pagination::{AccountFilter, CursorPage, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;

use super::BoxError;

/// New user row; the password is already hashed
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: Role,
    pub password_hash: &'a str,
    pub is_active: bool,
}

pub async fn list(
    pool: &PgPool,
    query: &ListQuery<AccountFilter>,
) -> Result<CursorPage<UserResponse>, BoxError> {
    let flags = query.status().flags();
    let rows: Vec<UserResponse> = sqlx::query_as(
        r#"
        SELECT id, name, email, role, is_active, created_at, updated_at, deleted_at
        FROM users
        WHERE ($1::BIGINT IS NULL OR id <= $1)
          AND ($2::TEXT IS NULL OR name ILIKE $2 OR email ILIKE $2)
          AND ($3::BOOLEAN IS NULL OR is_active = $3)
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
    Ok(CursorPage::from_overfetch(rows, query.limit(), |u| u.id))
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<User>, BoxError> {
    let row = sqlx::query_as(
        r#"
        SELECT id, name, email, role, is_active, password_hash, login_attempts,
               block_expires, created_at, updated_at, deleted_at
        FROM users WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, BoxError> {
    let row = sqlx::query_as(
        r#"
        SELECT id, name, email, role, is_active, password_hash, login_attempts,
               block_expires, created_at, updated_at, deleted_at
        FROM users WHERE email = $1
        "#,
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &PgPool, user: NewUser<'_>) -> Result<UserResponse, BoxError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, role, is_active, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING id, name, email, role, is_active, created_at, updated_at, deleted_at
        "#,
    )
    .bind(snowflake_id())
    .bind(user.name.trim())
    .bind(user.email.trim().to_lowercase())
    .bind(user.role)
    .bind(user.is_active)
    .bind(user.password_hash)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &UserUpdate,
) -> Result<Option<UserResponse>, BoxError> {
    let row = sqlx::query_as(
        r#"
        UPDATE users SET name = $2, email = $3, role = $4, updated_at = $5
        WHERE id = $1
        RETURNING id, name, email, role, is_active, created_at, updated_at, deleted_at
        "#,
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.email.trim().to_lowercase())
    .bind(data.role)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Toggle `is_active`; `restore` brings back a soft-deleted account
pub async fn set_active(
    pool: &PgPool,
    id: i64,
    is_active: bool,
    restore: bool,
) -> Result<Option<UserResponse>, BoxError> {
    let row = sqlx::query_as(
        r#"
        UPDATE users
        SET is_active = $2,
            deleted_at = CASE WHEN $3 THEN NULL ELSE deleted_at END,
            updated_at = $4
        WHERE id = $1
        RETURNING id, name, email, role, is_active, created_at, updated_at, deleted_at
        "#,
    )
    .bind(id)
    .bind(is_active)
    .bind(restore)
    .bind(now_millis())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn set_password(pool: &PgPool, id: i64, password_hash: &str) -> Result<(), BoxError> {
    sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .bind(now_millis())
        .execute(pool)
        .await?;
    Ok(())
}

/// Soft delete; the account also becomes inactive
pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool, BoxError> {
    let now = now_millis();
    let result = sqlx::query(
        r#"
        UPDATE users
        SET deleted_at = COALESCE(deleted_at, $2), is_active = FALSE, updated_at = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Record a failed login; returns the new attempt count
pub async fn increment_login_attempts(pool: &PgPool, id: i64) -> Result<i32, BoxError> {
    let attempts: i32 = sqlx::query_scalar(
        "UPDATE users SET login_attempts = login_attempts + 1 WHERE id = $1 RETURNING login_attempts",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(attempts)
}

/// Block the account until `until` and reset the counter
pub async fn block_until(pool: &PgPool, id: i64, until: i64) -> Result<(), BoxError> {
    sqlx::query("UPDATE users SET block_expires = $2, login_attempts = 0 WHERE id = $1")
        .bind(id)
        .bind(until)
        .execute(pool)
        .await?;
    Ok(())
}

/// Successful login: clear the counter and any expired block
pub async fn reset_login_attempts(pool: &PgPool, id: i64) -> Result<(), BoxError> {
    sqlx::query("UPDATE users SET login_attempts = 0, block_expires = NULL WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
