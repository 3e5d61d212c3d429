//! Menu Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{default_true, not_blank};

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    /// Price in Rupiah
    pub price: i64,
    /// Discount in percent (0-100)
    pub discount_percent: Option<i32>,
    pub available: bool,
    pub created_at: i64,
    pub updated_at: i64,
    /// Soft delete marker
    pub deleted_at: Option<i64>,
}

impl MenuItem {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Orderable by customers
    pub fn is_orderable(&self) -> bool {
        self.available && !self.is_deleted()
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
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
    #[serde(default = "default_true")]
    pub available: bool,
}

/// Update menu item payload (replaces the editable fields)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
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
}

/// Availability toggle; `restore` also clears the soft delete marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemAvailability {
    pub available: bool,
    #[serde(default)]
    pub restore: bool,
}

/// Lean projection for selectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItemOption {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orderable() {
        let mut item = MenuItem {
            id: 1,
            name: "Kopi Susu".into(),
            price: 18_000,
            discount_percent: None,
            available: true,
            created_at: 0,
            updated_at: 0,
            deleted_at: None,
        };
        assert!(item.is_orderable());
        item.available = false;
        assert!(!item.is_orderable());
        item.available = true;
        item.deleted_at = Some(10);
        assert!(!item.is_orderable());
    }

    #[test]
    fn test_create_validation() {
        let ok = MenuItemCreate {
            name: "Roti Bakar".into(),
            price: 15_000,
            discount_percent: Some(10),
            available: true,
        };
        assert!(ok.validate().is_ok());

        let negative = MenuItemCreate { price: -1, ..ok.clone() };
        assert!(negative.validate().is_err());

        let over = MenuItemCreate {
            discount_percent: Some(101),
            ..ok.clone()
        };
        assert!(over.validate().is_err());

        let blank = MenuItemCreate {
            name: String::new(),
            ..ok
        };
        assert!(blank.validate().is_err());
    }
}
