//! Order Model
//!
//! An order ("transaction") references a payment type, optionally a table
//! and a booking, and holds lines that point at either a menu item or a
//! package. Lines snapshot name, unit price and discount at order time so
//! later catalog edits do not rewrite history.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::order_status::OrderStatus;

/// What an order line refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "line_kind", rename_all = "lowercase"))]
pub enum LineKind {
    Item,
    Package,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_id: Option<i64>,
    pub payment_type_id: i64,
    pub booking_id: Option<i64>,
    /// Σ price × quantity
    pub subtotal: i64,
    pub discount: i64,
    /// subtotal − discount
    pub total: i64,
    pub paid: bool,
    pub finished: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from_flags(self.paid, self.finished)
    }
}

/// Order line (snapshot of the ordered item or package)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub order_id: i64,
    pub kind: LineKind,
    pub ref_id: i64,
    pub name: String,
    pub unit_price: i64,
    pub discount_percent: Option<i32>,
    pub quantity: i32,
    pub assigned_at: i64,
}

/// Submitted line: which item/package and how many
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderLineInput {
    pub kind: LineKind,
    pub id: i64,
    #[validate(range(min = 1, max = 1000, message = "quantity must be between 1 and 1000"))]
    pub quantity: i32,
}

/// Create order payload (public and dashboard)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    pub table_id: Option<i64>,
    pub payment_type_id: i64,
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[validate(length(max = 100, message = "at most 100 lines per order"), nested)]
    pub lines: Vec<OrderLineInput>,
}

/// Update order payload; `lines` replaces every line
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderUpdate {
    pub table_id: Option<i64>,
    pub payment_type_id: i64,
    #[validate(length(max = 100, message = "at most 100 lines per order"), nested)]
    pub lines: Vec<OrderLineInput>,
}

/// Order summary preview request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderSummaryRequest {
    #[validate(length(max = 100, message = "at most 100 lines per order"), nested)]
    pub lines: Vec<OrderLineInput>,
}

/// Order row joined with table number and payment type name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderListEntry {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub order: Order,
    pub table_number: Option<i32>,
    pub payment_type_name: String,
}

/// Order with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub entry: OrderListEntry,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
}

impl OrderDetail {
    pub fn new(entry: OrderListEntry, lines: Vec<OrderLine>) -> Self {
        Self {
            status: entry.order.status(),
            entry,
            lines,
        }
    }
}

/// Payment gateway token for an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentToken {
    pub order_id: i64,
    pub token: String,
    pub redirect_url: String,
}

/// Merge duplicate (kind, id) lines by summing quantities, keeping first-seen order
pub fn merge_order_lines(lines: &[OrderLineInput]) -> Result<Vec<OrderLineInput>, AppError> {
    let mut merged: Vec<OrderLineInput> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged
            .iter_mut()
            .find(|m| m.kind == line.kind && m.id == line.id)
        {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or_else(|| {
                        AppError::out_of_range("quantity").with_detail("id", line.id)
                    })?;
            }
            None => merged.push(line.clone()),
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(paid: bool, finished: bool) -> OrderListEntry {
        OrderListEntry {
            order: Order {
                id: 99,
                table_id: Some(3),
                payment_type_id: 1,
                booking_id: None,
                subtotal: 40_000,
                discount: 2_000,
                total: 38_000,
                paid,
                finished,
                created_at: 1,
                updated_at: 1,
            },
            table_number: Some(4),
            payment_type_name: "Tunai".into(),
        }
    }

    #[test]
    fn test_line_kind_serde() {
        let line: OrderLineInput =
            serde_json::from_str(r#"{"kind":"package","id":12,"quantity":2}"#).unwrap();
        assert_eq!(line.kind, LineKind::Package);
        assert_eq!(serde_json::to_string(&LineKind::Item).unwrap(), "\"item\"");
    }

    #[test]
    fn test_detail_status_and_flat_json() {
        let detail = OrderDetail::new(entry(true, false), vec![]);
        assert_eq!(detail.status, OrderStatus::Processing);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 99);
        assert_eq!(json["table_number"], 4);
        assert_eq!(json["status"], "processing");
    }

    #[test]
    fn test_line_quantity_validation() {
        let payload = OrderCreate {
            table_id: None,
            payment_type_id: 1,
            booking_id: None,
            lines: vec![OrderLineInput {
                kind: LineKind::Item,
                id: 1,
                quantity: 0,
            }],
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_merge_order_lines_keeps_kinds_apart() {
        let merged = merge_order_lines(&[
            OrderLineInput { kind: LineKind::Item, id: 5, quantity: 1 },
            OrderLineInput { kind: LineKind::Package, id: 5, quantity: 1 },
            OrderLineInput { kind: LineKind::Item, id: 5, quantity: 2 },
        ])
        .unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].quantity, 3);
        assert_eq!(merged[1].kind, LineKind::Package);
    }

    #[test]
    fn test_merge_order_lines_overflow() {
        let err = merge_order_lines(&[
            OrderLineInput { kind: LineKind::Item, id: 1, quantity: i32::MAX },
            OrderLineInput { kind: LineKind::Item, id: 1, quantity: 1 },
        ])
        .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValueOutOfRange);
        assert_eq!(err.details.unwrap().get("id").unwrap(), 1);
    }

    #[test]
    fn test_summary_request_bounds() {
        let huge = OrderSummaryRequest {
            lines: vec![
                OrderLineInput { kind: LineKind::Item, id: 1, quantity: i32::MAX },
                OrderLineInput { kind: LineKind::Item, id: 1, quantity: 1 },
            ],
        };
        assert!(huge.validate().is_err());

        let too_many = OrderSummaryRequest {
            lines: (0..101)
                .map(|id| OrderLineInput { kind: LineKind::Item, id, quantity: 1 })
                .collect(),
        };
        assert!(too_many.validate().is_err());

        let ok = OrderSummaryRequest {
            lines: vec![OrderLineInput { kind: LineKind::Package, id: 2, quantity: 1000 }],
        };
        assert!(ok.validate().is_ok());
    }
}
