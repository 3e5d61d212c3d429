//! Package database operations
//!
//! A package row plus its component rows in `package_items`. Writes that
//! touch both run in one transaction.

use std::collections::HashMap;

use shared::models::{
    Package, PackageCreate, PackageDetail, PackageItemDetail, PackageUpdate, merge_package_items,
};
use shared::pagination::{AvailabilityFilter, CursorPage, ListQuery};
use shared::util::{now_millis, snowflake_id};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use super::BoxError;

/// Components joined with their menu item, for a set of packages
async fn components<'e>(
    executor: impl PgExecutor<'e>,
    package_ids: &[i64],
) -> Result<Vec<PackageItemDetail>, BoxError> {
    let rows = sqlx::query_as(
        r#"
        SELECT pi.package_id, pi.item_id, m.name, m.price, m.available,
               m.deleted_at AS item_deleted_at, pi.quantity
        FROM package_items pi
        JOIN menu_items m ON m.id = pi.item_id
        WHERE pi.package_id = ANY($1)
        ORDER BY pi.package_id, pi.assigned_at, pi.item_id
        "#,
    )
    .bind(package_ids)
    .fetch_all(executor)
    .await?;
    Ok(rows)
}

/// Attach components to packages, keeping the package order
async fn with_components<'e>(
    executor: impl PgExecutor<'e>,
    packages: Vec<Package>,
) -> Result<Vec<PackageDetail>, BoxError> {
    let ids: Vec<i64> = packages.iter().map(|p| p.id).collect();
    let mut grouped: HashMap<i64, Vec<PackageItemDetail>> = HashMap::new();
    for item in components(executor, &ids).await? {
        grouped.entry(item.package_id).or_default().push(item);
    }
    Ok(packages
        .into_iter()
        .map(|package| PackageDetail {
            items: grouped.remove(&package.id).unwrap_or_default(),
            package,
        })
        .collect())
}

pub async fn list(
    pool: &PgPool,
    query: &ListQuery<AvailabilityFilter>,
) -> Result<CursorPage<PackageDetail>, BoxError> {
    let flags = query.status().flags();
    let rows: Vec<Package> = sqlx::query_as(
        r#"
        SELECT p.id, p.name, p.price, p.discount_percent, p.created_at, p.updated_at, p.deleted_at
        FROM packages p
        WHERE ($1::BIGINT IS NULL OR p.id <= $1)
          AND ($2::TEXT IS NULL OR p.name ILIKE $2)
          AND ($3::BOOLEAN IS NULL OR (NOT EXISTS (
                SELECT 1 FROM package_items pi
                JOIN menu_items m ON m.id = pi.item_id
                WHERE pi.package_id = p.id
                  AND (NOT m.available OR m.deleted_at IS NOT NULL)
              )) = $3)
          AND ($4::BOOLEAN IS NULL OR (p.deleted_at IS NOT NULL) = $4)
        ORDER BY p.id DESC
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

    let page = CursorPage::from_overfetch(rows, query.limit(), |p| p.id);
    let data = with_components(pool, page.data).await?;
    Ok(CursorPage {
        data,
        next_cursor: page.next_cursor,
    })
}

/// Non-deleted packages whose components are all orderable (public menu)
pub async fn list_orderable(pool: &PgPool) -> Result<Vec<PackageDetail>, BoxError> {
    let rows: Vec<Package> = sqlx::query_as(
        r#"
        SELECT p.id, p.name, p.price, p.discount_percent, p.created_at, p.updated_at, p.deleted_at
        FROM packages p
        WHERE p.deleted_at IS NULL
          AND EXISTS (SELECT 1 FROM package_items pi WHERE pi.package_id = p.id)
          AND NOT EXISTS (
                SELECT 1 FROM package_items pi
                JOIN menu_items m ON m.id = pi.item_id
                WHERE pi.package_id = p.id
                  AND (NOT m.available OR m.deleted_at IS NOT NULL)
              )
        ORDER BY p.name
        "#,
    )
    .fetch_all(pool)
    .await?;
    with_components(pool, rows).await
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<PackageDetail>, BoxError> {
    let row: Option<Package> = sqlx::query_as(
        r#"
        SELECT id, name, price, discount_percent, created_at, updated_at, deleted_at
        FROM packages WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(package) => Ok(with_components(pool, vec![package]).await?.pop()),
        None => Ok(None),
    }
}

/// Packages with components, by id (order resolution)
pub async fn find_many(pool: &PgPool, ids: &[i64]) -> Result<Vec<PackageDetail>, BoxError> {
    let rows: Vec<Package> = sqlx::query_as(
        r#"
        SELECT id, name, price, discount_percent, created_at, updated_at, deleted_at
        FROM packages WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;
    with_components(pool, rows).await
}

async fn insert_components(
    tx: &mut Transaction<'_, Postgres>,
    package_id: i64,
    data: &PackageCreate,
    now: i64,
) -> Result<(), BoxError> {
    for input in merge_package_items(&data.items)? {
        sqlx::query(
            r#"
            INSERT INTO package_items (package_id, item_id, quantity, assigned_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(package_id)
        .bind(input.item_id)
        .bind(input.quantity)
        .bind(now)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Insert a package and its components
pub async fn create(pool: &PgPool, data: &PackageCreate) -> Result<PackageDetail, BoxError> {
    let id = snowflake_id();
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let package: Package = sqlx::query_as(
        r#"
        INSERT INTO packages (id, name, price, discount_percent, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, name, price, discount_percent, created_at, updated_at, deleted_at
        "#,
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.discount_percent)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    insert_components(&mut tx, id, data, now).await?;
    let items = components(&mut *tx, &[id]).await?;
    tx.commit().await?;

    Ok(PackageDetail { package, items })
}

/// Update a package and replace its component rows
pub async fn update(
    pool: &PgPool,
    id: i64,
    data: &PackageUpdate,
) -> Result<Option<PackageDetail>, BoxError> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let package: Option<Package> = sqlx::query_as(
        r#"
        UPDATE packages
        SET name = $2, price = $3, discount_percent = $4, updated_at = $5
        WHERE id = $1
        RETURNING id, name, price, discount_percent, created_at, updated_at, deleted_at
        "#,
    )
    .bind(id)
    .bind(data.name.trim())
    .bind(data.price)
    .bind(data.discount_percent)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(package) = package else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM package_items WHERE package_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_components(&mut tx, id, data, now).await?;
    let items = components(&mut *tx, &[id]).await?;
    tx.commit().await?;

    Ok(Some(PackageDetail { package, items }))
}

/// Set or clear the soft delete marker
pub async fn set_deleted(pool: &PgPool, id: i64, deleted: bool) -> Result<bool, BoxError> {
    let now = now_millis();
    let result = sqlx::query(
        r#"
        UPDATE packages
        SET deleted_at = CASE WHEN $2 THEN COALESCE(deleted_at, $3) ELSE NULL END,
            updated_at = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(deleted)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
