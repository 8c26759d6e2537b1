// ABOUTME: Server-side shopping cart value type
// ABOUTME: Merges individual meals, keeps package instances separate, and groups them for display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Cart
//!
//! The cart is a plain value sent by the storefront with the checkout
//! request. Individual meals with the same meal and size are merged into one
//! line; meals that belong to a package instance are never merged so each
//! purchased package stays intact.

use serde::{Deserialize, Serialize};

/// Label used when a package line carries no package name
pub const DEFAULT_PACKAGE_LABEL: &str = "Paquete";

/// Line of the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Meal id
    pub meal_id: String,
    /// Meal name shown in the cart
    pub meal_name: String,
    /// Size id
    pub size_id: String,
    /// Size name shown in the cart
    pub size_name: String,
    /// Quantity
    pub qty: u32,
    /// Unit price in centavos as displayed; checkout re-prices server side
    pub unit_price: i64,
    /// Package the meal was chosen for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_id: Option<String>,
    /// Package name shown in the cart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Groups the meals of one package purchase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_instance_id: Option<String>,
}

impl CartItem {
    /// Individual (non-package) line
    #[must_use]
    pub fn individual(
        meal_id: impl Into<String>,
        meal_name: impl Into<String>,
        size_id: impl Into<String>,
        size_name: impl Into<String>,
        qty: u32,
        unit_price: i64,
    ) -> Self {
        Self {
            meal_id: meal_id.into(),
            meal_name: meal_name.into(),
            size_id: size_id.into(),
            size_name: size_name.into(),
            qty,
            unit_price,
            package_id: None,
            package_name: None,
            package_instance_id: None,
        }
    }

    /// Whether the line belongs to a package instance
    #[must_use]
    pub const fn is_package_item(&self) -> bool {
        self.package_instance_id.is_some()
    }

    /// Line subtotal in centavos
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.unit_price.saturating_mul(i64::from(self.qty))
    }

    fn matches_individual(&self, meal_id: &str, size_id: &str) -> bool {
        !self.is_package_item() && self.meal_id == meal_id && self.size_id == size_id
    }
}

/// Items of one package instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageGroup {
    /// Instance id shared by the items
    pub package_instance_id: String,
    /// Package id of the first item
    pub package_id: Option<String>,
    /// Package name, or "Paquete"
    pub package_name: String,
    /// Size name of the first item
    pub size_name: String,
    /// Items in cart order
    pub items: Vec<CartItem>,
    /// Sum of item subtotals in centavos
    pub total_price: i64,
    /// Sum of item quantities
    pub total_meals: u32,
}

/// Shopping cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in insertion order
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Cart from existing lines
    #[must_use]
    pub const fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Add a line
    ///
    /// Package lines are always appended. An individual line with the same
    /// meal and size as an existing individual line increases its quantity.
    pub fn add_item(&mut self, item: CartItem) {
        if item.is_package_item() {
            self.items.push(item);
            return;
        }

        match self
            .items
            .iter_mut()
            .find(|existing| existing.matches_individual(&item.meal_id, &item.size_id))
        {
            Some(existing) => existing.qty = existing.qty.saturating_add(item.qty),
            None => self.items.push(item),
        }
    }

    /// Remove the individual line for a meal and size
    pub fn remove_item(&mut self, meal_id: &str, size_id: &str) {
        self.items
            .retain(|item| !item.matches_individual(meal_id, size_id));
    }

    /// Remove every line of a package instance
    pub fn remove_package(&mut self, package_instance_id: &str) {
        self.items
            .retain(|item| item.package_instance_id.as_deref() != Some(package_instance_id));
    }

    /// Set the quantity of an individual line; zero or less removes it
    pub fn update_qty(&mut self, meal_id: &str, size_id: &str, qty: i64) {
        if qty <= 0 {
            self.remove_item(meal_id, size_id);
            return;
        }
        let qty = u32::try_from(qty).unwrap_or(u32::MAX);

        for item in &mut self.items {
            if item.matches_individual(meal_id, size_id) {
                item.qty = qty;
            }
        }
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_price * qty` in centavos
    #[must_use]
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, item| total.saturating_add(item.subtotal()))
    }

    /// Sum of quantities
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.qty))
    }

    /// Whether the cart has no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines that do not belong to a package
    #[must_use]
    pub fn individual_items(&self) -> Vec<&CartItem> {
        self.items
            .iter()
            .filter(|item| !item.is_package_item())
            .collect()
    }

    /// Package lines grouped by instance, in first-seen order
    #[must_use]
    pub fn package_groups(&self) -> Vec<PackageGroup> {
        let mut groups: Vec<PackageGroup> = Vec::new();

        for item in &self.items {
            let Some(instance_id) = item.package_instance_id.as_deref() else {
                continue;
            };

            let position = groups
                .iter()
                .position(|group| group.package_instance_id == instance_id);

            let group = if let Some(index) = position {
                &mut groups[index]
            } else {
                groups.push(PackageGroup {
                    package_instance_id: instance_id.to_owned(),
                    package_id: item.package_id.clone(),
                    package_name: item
                        .package_name
                        .clone()
                        .unwrap_or_else(|| DEFAULT_PACKAGE_LABEL.to_owned()),
                    size_name: item.size_name.clone(),
                    items: Vec::new(),
                    total_price: 0,
                    total_meals: 0,
                });
                let last = groups.len() - 1;
                &mut groups[last]
            };

            group.total_price = group.total_price.saturating_add(item.subtotal());
            group.total_meals = group.total_meals.saturating_add(item.qty);
            group.items.push(item.clone());
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package_item(meal: &str, instance: &str) -> CartItem {
        CartItem {
            package_id: Some("pkg-5".to_owned()),
            package_name: Some("Paquete 5".to_owned()),
            package_instance_id: Some(instance.to_owned()),
            ..CartItem::individual(meal, meal, "fit", "FIT", 1, 15_000)
        }
    }

    #[test]
    fn test_individual_items_merge() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::individual("m1", "Pollo", "fit", "FIT", 1, 15_500));
        cart.add_item(CartItem::individual("m1", "Pollo", "fit", "FIT", 2, 15_500));
        cart.add_item(CartItem::individual("m1", "Pollo", "low", "LOW", 1, 14_500));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].qty, 3);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), 3 * 15_500 + 14_500);
    }

    #[test]
    fn test_package_items_never_merge() {
        let mut cart = Cart::new();
        cart.add_item(package_item("m1", "inst-1"));
        cart.add_item(package_item("m1", "inst-1"));
        cart.add_item(CartItem::individual("m1", "m1", "fit", "FIT", 1, 15_500));

        assert_eq!(cart.items.len(), 3);
        assert_eq!(cart.individual_items().len(), 1);
    }

    #[test]
    fn test_remove_item_keeps_package_lines() {
        let mut cart = Cart::new();
        cart.add_item(package_item("m1", "inst-1"));
        cart.add_item(CartItem::individual("m1", "m1", "fit", "FIT", 1, 15_500));

        cart.remove_item("m1", "fit");

        assert_eq!(cart.items.len(), 1);
        assert!(cart.items[0].is_package_item());
    }

    #[test]
    fn test_remove_package_drops_whole_instance() {
        let mut cart = Cart::new();
        cart.add_item(package_item("m1", "inst-1"));
        cart.add_item(package_item("m2", "inst-1"));
        cart.add_item(package_item("m1", "inst-2"));

        cart.remove_package("inst-1");

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].package_instance_id.as_deref(), Some("inst-2"));
    }

    #[test]
    fn test_update_qty_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::individual("m1", "m1", "fit", "FIT", 1, 15_500));
        cart.add_item(CartItem::individual("m2", "m2", "fit", "FIT", 1, 15_500));

        cart.update_qty("m1", "fit", 4);
        assert_eq!(cart.items[0].qty, 4);

        cart.update_qty("m1", "fit", 0);
        cart.update_qty("m2", "fit", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_oversized_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::individual("m1", "m1", "fit", "FIT", u32::MAX, 15_500));
        cart.add_item(CartItem::individual("m1", "m1", "fit", "FIT", 6, 15_500));
        assert_eq!(cart.items[0].qty, u32::MAX);

        cart.add_item(CartItem {
            qty: u32::MAX,
            ..package_item("m2", "inst-1")
        });
        cart.add_item(CartItem {
            qty: 6,
            ..package_item("m3", "inst-1")
        });

        let groups = cart.package_groups();
        assert_eq!(groups[0].total_meals, u32::MAX);
        assert_eq!(cart.item_count(), u32::MAX);
        assert_eq!(
            cart.total(),
            i64::from(u32::MAX) * (15_500 + 15_000) + 6 * 15_000
        );
    }

    #[test]
    fn test_package_groups_in_first_seen_order() {
        let mut cart = Cart::new();
        cart.add_item(package_item("m1", "inst-b"));
        cart.add_item(CartItem::individual("m9", "m9", "fit", "FIT", 1, 15_500));
        cart.add_item(package_item("m2", "inst-a"));
        cart.add_item(package_item("m3", "inst-b"));

        let groups = cart.package_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].package_instance_id, "inst-b");
        assert_eq!(groups[0].total_meals, 2);
        assert_eq!(groups[0].total_price, 30_000);
        assert_eq!(groups[0].size_name, "FIT");
        assert_eq!(groups[1].package_instance_id, "inst-a");
    }

    #[test]
    fn test_package_group_name_fallback() {
        let mut item = package_item("m1", "inst-1");
        item.package_name = None;
        let cart = Cart::from_items(vec![item]);

        assert_eq!(cart.package_groups()[0].package_name, DEFAULT_PACKAGE_LABEL);
    }
}
