//! Draft carts
//!
//! Clients compose an order (or a package) locally before submitting it.
//! A cart maps `(kind, id)` to a quantity; the four named carts persist
//! together as one JSON document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{LineKind, OrderLineInput, PackageItemInput};

/// Cart entry key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartKey {
    pub kind: LineKind,
    pub id: i64,
}

impl CartKey {
    pub fn item(id: i64) -> Self {
        Self {
            kind: LineKind::Item,
            id,
        }
    }

    pub fn package(id: i64) -> Self {
        Self {
            kind: LineKind::Package,
            id,
        }
    }
}

/// One draft cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<OrderLineInput>", into = "Vec<OrderLineInput>")]
pub struct DraftCart {
    entries: BTreeMap<CartKey, i32>,
}

impl DraftCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: CartKey) -> Option<i32> {
        self.entries.get(&key).copied()
    }

    /// Insert the entry or increase its quantity. Non-positive amounts are ignored.
    pub fn add(&mut self, key: CartKey, qty: i32) -> i32 {
        if qty <= 0 {
            return self.get(key).unwrap_or(0);
        }
        let entry = self.entries.entry(key).or_insert(0);
        *entry = entry.saturating_add(qty);
        *entry
    }

    /// Decrease the quantity; the entry is removed once it drops to zero.
    /// Non-positive amounts leave it unchanged.
    ///
    /// Returns the remaining quantity, `None` when the entry is gone.
    pub fn reduce(&mut self, key: CartKey, qty: i32) -> Option<i32> {
        let current = self.get(key)?;
        let remaining = current.saturating_sub(qty.max(0));
        if remaining <= 0 {
            self.entries.remove(&key);
            return None;
        }
        self.entries.insert(key, remaining);
        Some(remaining)
    }

    pub fn remove(&mut self, key: CartKey) -> Option<i32> {
        self.entries.remove(&key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines in stable key order (items before packages, ascending id)
    pub fn lines(&self) -> Vec<OrderLineInput> {
        self.entries
            .iter()
            .map(|(key, qty)| OrderLineInput {
                kind: key.kind,
                id: key.id,
                quantity: *qty,
            })
            .collect()
    }

    /// Lines for a package composition (item entries only)
    pub fn package_items(&self) -> Vec<PackageItemInput> {
        self.entries
            .iter()
            .filter(|(key, _)| key.kind == LineKind::Item)
            .map(|(key, qty)| PackageItemInput {
                item_id: key.id,
                quantity: *qty,
            })
            .collect()
    }

    /// Return the lines and empty the cart (on submit)
    pub fn take_lines(&mut self) -> Vec<OrderLineInput> {
        let lines = self.lines();
        self.clear();
        lines
    }
}

impl From<Vec<OrderLineInput>> for DraftCart {
    fn from(lines: Vec<OrderLineInput>) -> Self {
        let mut cart = DraftCart::new();
        for line in lines {
            cart.add(
                CartKey {
                    kind: line.kind,
                    id: line.id,
                },
                line.quantity,
            );
        }
        cart
    }
}

impl From<DraftCart> for Vec<OrderLineInput> {
    fn from(cart: DraftCart) -> Self {
        cart.lines()
    }
}

/// The named carts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartName {
    /// Items of a package being created
    PackageItems,
    /// Items of a package being edited
    EditPackageItems,
    /// New order
    AddOrder,
    /// Order being edited
    EditOrder,
}

/// All draft carts of a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    #[serde(default)]
    package_items: DraftCart,
    #[serde(default)]
    edit_package_items: DraftCart,
    #[serde(default)]
    add_order: DraftCart,
    #[serde(default)]
    edit_order: DraftCart,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self, name: CartName) -> &DraftCart {
        match name {
            CartName::PackageItems => &self.package_items,
            CartName::EditPackageItems => &self.edit_package_items,
            CartName::AddOrder => &self.add_order,
            CartName::EditOrder => &self.edit_order,
        }
    }

    pub fn cart_mut(&mut self, name: CartName) -> &mut DraftCart {
        match name {
            CartName::PackageItems => &mut self.package_items,
            CartName::EditPackageItems => &mut self.edit_package_items,
            CartName::AddOrder => &mut self.add_order,
            CartName::EditOrder => &mut self.edit_order,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = DraftCart::new();
        assert_eq!(cart.add(CartKey::item(1), 1), 1);
        assert_eq!(cart.add(CartKey::item(1), 2), 3);
        assert_eq!(cart.add(CartKey::package(1), 1), 1);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.add(CartKey::item(2), 0), 0);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_reduce_removes_at_one() {
        let mut cart = DraftCart::new();
        cart.add(CartKey::item(1), 3);
        assert_eq!(cart.reduce(CartKey::item(1), 1), Some(2));
        assert_eq!(cart.reduce(CartKey::item(1), 1), Some(1));
        assert_eq!(cart.reduce(CartKey::item(1), 1), None);
        assert!(cart.is_empty());
        assert_eq!(cart.reduce(CartKey::item(1), 1), None);
    }

    #[test]
    fn test_reduce_ignores_non_positive() {
        let mut cart = DraftCart::new();
        cart.add(CartKey::item(4), 2);
        assert_eq!(cart.reduce(CartKey::item(4), i32::MIN), Some(2));
        assert_eq!(cart.reduce(CartKey::item(4), 0), Some(2));
        assert_eq!(cart.reduce(CartKey::item(4), i32::MAX), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_reduce_past_zero_removes() {
        let mut cart = DraftCart::new();
        cart.add(CartKey::item(9), 2);
        assert_eq!(cart.reduce(CartKey::item(9), 5), None);
        assert_eq!(cart.get(CartKey::item(9)), None);
    }

    #[test]
    fn test_lines_are_ordered_and_take_clears() {
        let mut cart = DraftCart::new();
        cart.add(CartKey::package(2), 1);
        cart.add(CartKey::item(7), 2);
        cart.add(CartKey::item(3), 1);

        let ids: Vec<(LineKind, i64)> = cart.lines().iter().map(|l| (l.kind, l.id)).collect();
        assert_eq!(
            ids,
            vec![(LineKind::Item, 3), (LineKind::Item, 7), (LineKind::Package, 2)]
        );
        assert_eq!(cart.package_items().len(), 2);

        let taken = cart.take_lines();
        assert_eq!(taken.len(), 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_store_persists_as_json() {
        let mut store = CartStore::new();
        store.cart_mut(CartName::AddOrder).add(CartKey::item(1), 2);
        store.cart_mut(CartName::EditPackageItems).add(CartKey::item(4), 1);

        let json = store.to_json().unwrap();
        assert!(json.contains("\"add_order\":[{\"kind\":\"item\",\"id\":1,\"quantity\":2}]"));

        let restored = CartStore::from_json(&json).unwrap();
        assert_eq!(restored, store);
        assert!(restored.cart(CartName::EditOrder).is_empty());
    }
}
