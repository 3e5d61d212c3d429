//! Order line resolution
//!
//! Turns submitted `(kind, id, quantity)` lines into priced snapshots and
//! checks the order's references (payment type, table, booking). Customers
//! may only order what is currently orderable; staff editing an order from
//! the dashboard may use any non-deleted catalog entry.

use std::collections::HashMap;

use shared::error::{AppError, ErrorCode};
use shared::models::{LineKind, MenuItem, OrderLineInput, PackageDetail, merge_order_lines};
use shared::{OrderSummary, PricedLine};
use sqlx::PgPool;

use crate::db;
use crate::db::orders::NewLine;
use crate::error::ServiceResult;

/// Which catalog entries an order may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRule {
    /// Available, non-deleted items and packages whose components are all orderable
    Orderable,
    /// Any non-deleted item or package
    Existing,
}

/// Line snapshots with their totals
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLines {
    pub lines: Vec<NewLine>,
    pub summary: OrderSummary,
}

/// Build line snapshots from already loaded catalog rows
pub fn build_lines(
    inputs: &[OrderLineInput],
    items: &HashMap<i64, MenuItem>,
    packages: &HashMap<i64, PackageDetail>,
    rule: CatalogRule,
) -> Result<ResolvedLines, AppError> {
    let merged = merge_order_lines(inputs)?;
    if merged.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let mut lines = Vec::with_capacity(merged.len());
    for input in merged {
        let line = match input.kind {
            LineKind::Item => {
                let item = items
                    .get(&input.id)
                    .filter(|i| !i.is_deleted())
                    .ok_or_else(|| {
                        AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", input.id)
                    })?;
                if rule == CatalogRule::Orderable && !item.available {
                    return Err(AppError::new(ErrorCode::MenuItemUnavailable)
                        .with_detail("id", input.id)
                        .with_detail("name", item.name.clone()));
                }
                NewLine {
                    kind: LineKind::Item,
                    ref_id: item.id,
                    name: item.name.clone(),
                    unit_price: item.price,
                    discount_percent: item.discount_percent,
                    quantity: input.quantity,
                }
            }
            LineKind::Package => {
                let detail = packages
                    .get(&input.id)
                    .filter(|p| p.package.deleted_at.is_none())
                    .ok_or_else(|| {
                        AppError::new(ErrorCode::PackageNotFound).with_detail("id", input.id)
                    })?;
                if rule == CatalogRule::Orderable && !detail.is_available() {
                    return Err(AppError::new(ErrorCode::PackageUnavailable)
                        .with_detail("id", input.id)
                        .with_detail("name", detail.package.name.clone()));
                }
                NewLine {
                    kind: LineKind::Package,
                    ref_id: detail.package.id,
                    name: detail.package.name.clone(),
                    unit_price: detail.package.price,
                    discount_percent: detail.package.discount_percent,
                    quantity: input.quantity,
                }
            }
        };
        lines.push(line);
    }

    let priced: Vec<PricedLine> = lines
        .iter()
        .map(|l| PricedLine {
            unit_price: l.unit_price,
            quantity: l.quantity,
            discount_percent: l.discount_percent,
        })
        .collect();
    let summary = OrderSummary::compute(&priced)?;

    Ok(ResolvedLines { lines, summary })
}

/// Load the referenced catalog rows and build line snapshots
pub async fn resolve_lines(
    pool: &PgPool,
    inputs: &[OrderLineInput],
    rule: CatalogRule,
) -> ServiceResult<ResolvedLines> {
    if inputs.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty).into());
    }

    let (item_ids, package_ids): (Vec<_>, Vec<_>) =
        inputs.iter().partition(|l| l.kind == LineKind::Item);
    let item_ids: Vec<i64> = item_ids.into_iter().map(|l| l.id).collect();
    let package_ids: Vec<i64> = package_ids.into_iter().map(|l| l.id).collect();

    let items: HashMap<i64, MenuItem> = if item_ids.is_empty() {
        HashMap::new()
    } else {
        db::menu_items::find_many(pool, &item_ids)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect()
    };
    let packages: HashMap<i64, PackageDetail> = if package_ids.is_empty() {
        HashMap::new()
    } else {
        db::packages::find_many(pool, &package_ids)
            .await?
            .into_iter()
            .map(|p| (p.package.id, p))
            .collect()
    };

    Ok(build_lines(inputs, &items, &packages, rule)?)
}

/// Check the payment type, table and booking an order points at
pub async fn check_references(
    pool: &PgPool,
    payment_type_id: i64,
    table_id: Option<i64>,
    booking_id: Option<i64>,
    rule: CatalogRule,
) -> ServiceResult<()> {
    let payment_type = db::payment_types::find(pool, payment_type_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::PaymentTypeNotFound).with_detail("id", payment_type_id)
        })?;
    if rule == CatalogRule::Orderable && !payment_type.active {
        return Err(AppError::new(ErrorCode::PaymentTypeInactive)
            .with_detail("id", payment_type_id)
            .into());
    }

    if let Some(table_id) = table_id {
        if !db::tables::exists(pool, table_id).await? {
            return Err(AppError::new(ErrorCode::TableNotFound)
                .with_detail("id", table_id)
                .into());
        }
    }

    if let Some(booking_id) = booking_id {
        if !db::bookings::exists(pool, booking_id).await? {
            return Err(AppError::new(ErrorCode::BookingNotFound)
                .with_detail("id", booking_id)
                .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Package, PackageItemDetail};

    fn item(id: i64, price: i64, discount: Option<i32>, available: bool) -> MenuItem {
        MenuItem {
            id,
            name: format!("item-{id}"),
            price,
            discount_percent: discount,
            available,
            created_at: 0,
            updated_at: 0,
            deleted_at: None,
        }
    }

    fn package(id: i64, price: i64, component_available: bool) -> PackageDetail {
        PackageDetail {
            package: Package {
                id,
                name: format!("package-{id}"),
                price,
                discount_percent: None,
                created_at: 0,
                updated_at: 0,
                deleted_at: None,
            },
            items: vec![PackageItemDetail {
                package_id: id,
                item_id: 1,
                name: "item-1".into(),
                price: 10_000,
                available: component_available,
                item_deleted_at: None,
                quantity: 2,
            }],
        }
    }

    fn line(kind: LineKind, id: i64, quantity: i32) -> OrderLineInput {
        OrderLineInput { kind, id, quantity }
    }

    fn catalog() -> (HashMap<i64, MenuItem>, HashMap<i64, PackageDetail>) {
        let items = [item(1, 20_000, Some(10), true), item(2, 15_000, None, false)]
            .into_iter()
            .map(|i| (i.id, i))
            .collect();
        let packages = [package(10, 35_000, true), package(11, 30_000, false)]
            .into_iter()
            .map(|p| (p.package.id, p))
            .collect();
        (items, packages)
    }

    #[test]
    fn test_snapshot_and_summary() {
        let (items, packages) = catalog();
        let resolved = build_lines(
            &[
                line(LineKind::Item, 1, 2),
                line(LineKind::Package, 10, 1),
                line(LineKind::Item, 1, 1),
            ],
            &items,
            &packages,
            CatalogRule::Orderable,
        )
        .unwrap();

        assert_eq!(resolved.lines.len(), 2);
        assert_eq!(resolved.lines[0].quantity, 3);
        assert_eq!(resolved.lines[0].name, "item-1");
        assert_eq!(resolved.lines[1].unit_price, 35_000);
        assert_eq!(resolved.summary.subtotal, 95_000);
        assert_eq!(resolved.summary.discount, 6_000);
        assert_eq!(resolved.summary.total, 89_000);
    }

    #[test]
    fn test_empty_order() {
        let (items, packages) = catalog();
        let err = build_lines(&[], &items, &packages, CatalogRule::Existing).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_unknown_and_deleted_rejected() {
        let (mut items, packages) = catalog();
        let err = build_lines(&[line(LineKind::Item, 99, 1)], &items, &packages, CatalogRule::Existing)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);

        if let Some(i) = items.get_mut(&1) {
            i.deleted_at = Some(5);
        }
        let err = build_lines(&[line(LineKind::Item, 1, 1)], &items, &packages, CatalogRule::Existing)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);

        let err = build_lines(
            &[line(LineKind::Package, 12, 1)],
            &items,
            &packages,
            CatalogRule::Existing,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::PackageNotFound);
    }

    #[test]
    fn test_availability_depends_on_rule() {
        let (items, packages) = catalog();
        let unavailable_item = [line(LineKind::Item, 2, 1)];
        let err = build_lines(&unavailable_item, &items, &packages, CatalogRule::Orderable)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemUnavailable);
        assert!(build_lines(&unavailable_item, &items, &packages, CatalogRule::Existing).is_ok());

        let unavailable_package = [line(LineKind::Package, 11, 1)];
        let err = build_lines(&unavailable_package, &items, &packages, CatalogRule::Orderable)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PackageUnavailable);
        assert!(
            build_lines(&unavailable_package, &items, &packages, CatalogRule::Existing).is_ok()
        );
    }

    #[test]
    fn test_duplicate_lines_past_i32_rejected() {
        let (items, packages) = catalog();
        let err = build_lines(
            &[line(LineKind::Item, 1, i32::MAX), line(LineKind::Item, 1, 1)],
            &items,
            &packages,
            CatalogRule::Orderable,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }
}
