//! Package Model
//!
//! A package bundles menu items with quantities and sells them at its own
//! price. Component rows live in `package_items`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::error::AppError;

/// Package entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub discount_percent: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

/// Package component (join row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PackageItem {
    pub package_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub assigned_at: i64,
}

/// Package component joined with its menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PackageItemDetail {
    pub package_id: i64,
    pub item_id: i64,
    pub name: String,
    pub price: i64,
    pub available: bool,
    pub item_deleted_at: Option<i64>,
    pub quantity: i32,
}

/// Package with its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDetail {
    #[serde(flatten)]
    pub package: Package,
    pub items: Vec<PackageItemDetail>,
}

impl PackageDetail {
    /// Every component item is available and not deleted.
    ///
    /// A package with no components is not orderable.
    pub fn is_available(&self) -> bool {
        !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|i| i.available && i.item_deleted_at.is_none())
    }
}

/// Component line in a create/update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PackageItemInput {
    pub item_id: i64,
    #[validate(range(min = 1, max = 1000, message = "quantity must be between 1 and 1000"))]
    pub quantity: i32,
}

/// Create package payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PackageCreate {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(range(
        min = 0,
        max = 1_000_000_000,
        message = "price must be between 0 and 1,000,000,000"
    ))]
    pub price: i64,
    #[validate(range(min = 0, max = 100, message = "discount must be between 0 and 100"))]
    pub discount_percent: Option<i32>,
    #[validate(
        length(min = 1, max = 50, message = "package must contain between 1 and 50 items"),
        nested
    )]
    pub items: Vec<PackageItemInput>,
}

/// Update package payload; `items` replaces every component row
pub type PackageUpdate = PackageCreate;

/// Merge duplicate item ids by summing their quantities, keeping first-seen order
pub fn merge_package_items(
    items: &[PackageItemInput],
) -> Result<Vec<PackageItemInput>, AppError> {
    let mut merged: Vec<PackageItemInput> = Vec::with_capacity(items.len());
    for input in items {
        match merged.iter_mut().find(|m| m.item_id == input.item_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(input.quantity)
                    .ok_or_else(|| {
                        AppError::out_of_range("quantity").with_detail("item_id", input.item_id)
                    })?;
            }
            None => merged.push(input.clone()),
        }
    }
    Ok(merged)
}
