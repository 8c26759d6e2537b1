// ABOUTME: Build-your-own package selection
// ABOUTME: Tracks meals picked for a package and turns a complete selection into cart lines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cart::CartItem;
use crate::models::{MealBasic, Package, Size};
use serde::Serialize;
use uuid::Uuid;

/// Meal picked for a package with how many times it was picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedMeal {
    /// Meal id
    pub meal_id: String,
    /// Meal name
    pub meal_name: String,
    /// Times picked
    pub qty: u32,
}

/// Meals chosen for one package purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSelection {
    package_id: String,
    package_name: String,
    meals_included: u32,
    meals: Vec<SelectedMeal>,
}

impl PackageSelection {
    /// Start an empty selection for a package
    #[must_use]
    pub fn new(package: &Package) -> Self {
        Self {
            package_id: package.id.clone(),
            package_name: package.name.clone(),
            meals_included: package.meals_included,
            meals: Vec::new(),
        }
    }

    /// Pick a meal once more; ignored when the package is already full
    ///
    /// Returns whether the meal was added.
    pub fn add(&mut self, meal: &MealBasic) -> bool {
        if self.total_selected() >= self.meals_included {
            return false;
        }

        if let Some(selected) = self.meals.iter_mut().find(|m| m.meal_id == meal.id) {
            selected.qty += 1;
        } else {
            self.meals.push(SelectedMeal {
                meal_id: meal.id.clone(),
                meal_name: meal.name.clone(),
                qty: 1,
            });
        }
        true
    }

    /// Un-pick a meal once; meals reaching zero are dropped
    ///
    /// Returns whether anything changed.
    pub fn remove(&mut self, meal_id: &str) -> bool {
        let Some(index) = self.meals.iter().position(|m| m.meal_id == meal_id) else {
            return false;
        };

        self.meals[index].qty -= 1;
        if self.meals[index].qty == 0 {
            self.meals.remove(index);
        }
        true
    }

    /// Times a meal was picked
    #[must_use]
    pub fn count(&self, meal_id: &str) -> u32 {
        self.meals
            .iter()
            .find(|m| m.meal_id == meal_id)
            .map_or(0, |m| m.qty)
    }

    /// Meals picked so far
    #[must_use]
    pub fn total_selected(&self) -> u32 {
        self.meals.iter().map(|m| m.qty).sum()
    }

    /// Meals still to pick
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.meals_included.saturating_sub(self.total_selected())
    }

    /// Exactly `meals_included` meals are picked
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_selected() == self.meals_included
    }

    /// Picked meals in selection order
    #[must_use]
    pub fn meals(&self) -> &[SelectedMeal] {
        &self.meals
    }

    /// One cart line per picked meal at the size's package price
    #[must_use]
    pub fn into_cart_items(self, size: &Size, package_instance_id: &str) -> Vec<CartItem> {
        let package_id = self.package_id;
        let package_name = self.package_name;

        self.meals
            .into_iter()
            .map(|meal| CartItem {
                meal_id: meal.meal_id,
                meal_name: meal.meal_name,
                size_id: size.id.clone(),
                size_name: size.name.clone(),
                qty: meal.qty,
                unit_price: size.package_price,
                package_id: Some(package_id.clone()),
                package_name: Some(package_name.clone()),
                package_instance_id: Some(package_instance_id.to_owned()),
            })
            .collect()
    }
}

/// Fresh id grouping the cart lines of one package purchase
#[must_use]
pub fn new_package_instance_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use chrono::Utc;

    fn package(meals_included: u32) -> Package {
        Package {
            id: "pkg".to_owned(),
            name: "Paquete 3".to_owned(),
            img: None,
            description: None,
            meals_included,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn meal(id: &str) -> MealBasic {
        MealBasic {
            id: id.to_owned(),
            name: format!("Meal {id}"),
            description: None,
            img: None,
        }
    }

    fn fit_size() -> Size {
        Size {
            id: "fit".to_owned(),
            name: "FIT".to_owned(),
            is_main: true,
            customer_id: None,
            protein_qty: 180,
            carb_qty: 55,
            veg_qty: 70,
            price: 15_500,
            package_price: 15_000,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_stops_at_meals_included() {
        let mut selection = PackageSelection::new(&package(3));
        assert!(selection.add(&meal("a")));
        assert!(selection.add(&meal("a")));
        assert!(selection.add(&meal("b")));
        assert!(!selection.add(&meal("c")));

        assert!(selection.is_complete());
        assert_eq!(selection.count("a"), 2);
        assert_eq!(selection.count("c"), 0);
        assert_eq!(selection.remaining(), 0);
    }

    #[test]
    fn test_remove_drops_zero_entries() {
        let mut selection = PackageSelection::new(&package(3));
        selection.add(&meal("a"));
        selection.add(&meal("b"));

        assert!(selection.remove("a"));
        assert!(!selection.remove("a"));
        assert_eq!(selection.meals().len(), 1);
        assert!(!selection.is_complete());
        assert_eq!(selection.remaining(), 2);
    }

    #[test]
    fn test_into_cart_items_uses_package_price() {
        let mut selection = PackageSelection::new(&package(3));
        selection.add(&meal("a"));
        selection.add(&meal("a"));
        selection.add(&meal("b"));

        let items = selection.into_cart_items(&fit_size(), "inst-1");
        let cart = Cart::from_items(items);

        assert_eq!(cart.items.len(), 2);
        assert!(cart.items.iter().all(|i| i.unit_price == 15_000));
        let groups = cart.package_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total_meals, 3);
        assert_eq!(groups[0].total_price, 45_000);
        assert_eq!(groups[0].package_name, "Paquete 3");
    }
}
