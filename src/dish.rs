//! # Dish Record Manager
//!
//! Owns dish entities and decides when the safety engine runs: on creation,
//! and on update only when the ingredient list actually changed (value
//! equality of the full ordered list). The persisted snapshot holds the last
//! computed allergen set, nutrition payload, and dietary flags; customer-facing
//! reads recompute the full report fresh.
//!
//! Persistence itself stays generic: any record store implementing
//! [`DishStore`] works, and [`InMemoryDishStore`] covers tests and embedders
//! without a database.

use crate::engine::SafetyEngine;
use crate::provider::{FoodDataProvider, NutritionInfo};
use crate::report::{DietaryFlags, SafetyReport};
use crate::taxonomy::AllergenCategory;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A persisted dish with its last-computed safety snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecord {
    pub id: u64,
    pub restaurant_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Ordered ingredient list; comparison on update is by value equality
    pub ingredients: Vec<String>,
    /// Allergen snapshot from the last engine run
    pub allergens: BTreeSet<AllergenCategory>,
    /// Nutrition snapshot from the last engine run
    pub nutrition: NutritionInfo,
    /// Dietary flags snapshot from the last engine run
    pub dietary_flags: DietaryFlags,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDish {
    pub restaurant_id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub ingredients: Vec<String>,
}

/// Partial update for a dish; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub ingredients: Option<Vec<String>>,
}

/// Errors from dish management operations
#[derive(Debug, Clone, PartialEq)]
pub enum DishError {
    /// No dish with the given id exists
    NotFound(u64),
    /// A dish requires at least one ingredient
    MissingIngredients,
}

impl std::fmt::Display for DishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DishError::NotFound(id) => write!(f, "Dish with ID {id} not found"),
            DishError::MissingIngredients => write!(f, "Ingredients list is required"),
        }
    }
}

impl std::error::Error for DishError {}

/// Generic record store for dishes.
///
/// `insert` assigns and returns the record's id; the incoming id is ignored.
pub trait DishStore: Send {
    fn insert(&mut self, dish: DishRecord) -> DishRecord;
    fn get(&self, id: u64) -> Option<DishRecord>;
    fn update(&mut self, dish: DishRecord) -> bool;
    fn remove(&mut self, id: u64) -> bool;
    fn list_by_restaurant(&self, restaurant_id: u64) -> Vec<DishRecord>;
}

/// HashMap-backed store with a monotonically increasing id counter
#[derive(Debug, Default)]
pub struct InMemoryDishStore {
    dishes: HashMap<u64, DishRecord>,
    next_id: u64,
}

impl InMemoryDishStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DishStore for InMemoryDishStore {
    fn insert(&mut self, mut dish: DishRecord) -> DishRecord {
        self.next_id += 1;
        dish.id = self.next_id;
        self.dishes.insert(dish.id, dish.clone());
        dish
    }

    fn get(&self, id: u64) -> Option<DishRecord> {
        self.dishes.get(&id).cloned()
    }

    fn update(&mut self, dish: DishRecord) -> bool {
        if self.dishes.contains_key(&dish.id) {
            self.dishes.insert(dish.id, dish);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, id: u64) -> bool {
        self.dishes.remove(&id).is_some()
    }

    fn list_by_restaurant(&self, restaurant_id: u64) -> Vec<DishRecord> {
        let mut dishes: Vec<DishRecord> = self
            .dishes
            .values()
            .filter(|d| d.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        dishes.sort_by_key(|d| d.id);
        dishes
    }
}

/// Business logic for dish management over an engine and a record store
pub struct DishManager<P: FoodDataProvider, S: DishStore> {
    engine: SafetyEngine<P>,
    store: S,
}

impl<P: FoodDataProvider, S: DishStore> DishManager<P, S> {
    pub fn new(engine: SafetyEngine<P>, store: S) -> Self {
        Self { engine, store }
    }

    /// Create a dish, running allergen analysis on its ingredients.
    ///
    /// Rejects an empty ingredient list; a dish entity without ingredients
    /// has nothing to report on.
    pub async fn create_dish(&mut self, new_dish: NewDish) -> Result<DishRecord, DishError> {
        if new_dish.ingredients.is_empty() {
            return Err(DishError::MissingIngredients);
        }

        let report = self.engine.generate_safety_report(&new_dish.ingredients).await;
        let now = Utc::now();

        let dish = self.store.insert(DishRecord {
            id: 0,
            restaurant_id: new_dish.restaurant_id,
            name: new_dish.name,
            description: new_dish.description,
            price: new_dish.price,
            ingredients: new_dish.ingredients,
            allergens: report.allergens.allergens_detected,
            nutrition: report.nutrition,
            dietary_flags: report.dietary_compatibility,
            created_at: now,
            updated_at: now,
        });

        info!("Created dish: {} (ID: {})", dish.name, dish.id);
        Ok(dish)
    }

    /// Update a dish, re-running the engine only when the ingredient list
    /// changed by value equality of the full ordered list.
    pub async fn update_dish(
        &mut self,
        dish_id: u64,
        update: DishUpdate,
    ) -> Result<DishRecord, DishError> {
        let mut dish = self.store.get(dish_id).ok_or(DishError::NotFound(dish_id))?;

        let ingredients_changed = update
            .ingredients
            .as_ref()
            .is_some_and(|ingredients| *ingredients != dish.ingredients);

        if let Some(name) = update.name {
            dish.name = name;
        }
        if let Some(description) = update.description {
            dish.description = Some(description);
        }
        if let Some(price) = update.price {
            dish.price = Some(price);
        }
        if let Some(ingredients) = update.ingredients {
            dish.ingredients = ingredients;
        }

        if ingredients_changed {
            let report = self.engine.generate_safety_report(&dish.ingredients).await;
            dish.allergens = report.allergens.allergens_detected;
            dish.nutrition = report.nutrition;
            dish.dietary_flags = report.dietary_compatibility;
        }

        dish.updated_at = Utc::now();
        self.store.update(dish.clone());

        info!("Updated dish: {} (ID: {})", dish.name, dish.id);
        Ok(dish)
    }

    pub fn get_dish(&self, dish_id: u64) -> Option<DishRecord> {
        self.store.get(dish_id)
    }

    pub fn dishes_for_restaurant(&self, restaurant_id: u64) -> Vec<DishRecord> {
        self.store.list_by_restaurant(restaurant_id)
    }

    pub fn delete_dish(&mut self, dish_id: u64) -> bool {
        let removed = self.store.remove(dish_id);
        if removed {
            info!("Deleted dish ID: {dish_id}");
        }
        removed
    }

    /// Fresh safety report for a stored dish's current ingredient list.
    ///
    /// This is what a scanned code resolves to: always recomputed, never the
    /// persisted snapshot.
    pub async fn safety_report_for(&self, dish_id: u64) -> Result<SafetyReport, DishError> {
        let dish = self.store.get(dish_id).ok_or(DishError::NotFound(dish_id))?;
        Ok(self.engine.generate_safety_report(&dish.ingredients).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, restaurant_id: u64, name: &str) -> DishRecord {
        let now = Utc::now();
        DishRecord {
            id,
            restaurant_id,
            name: name.to_string(),
            description: None,
            price: None,
            ingredients: vec!["rice".to_string()],
            allergens: BTreeSet::new(),
            nutrition: NutritionInfo::unavailable("test"),
            dietary_flags: DietaryFlags::all_clear(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_in_memory_store_assigns_sequential_ids() {
        let mut store = InMemoryDishStore::new();
        let first = store.insert(record(0, 1, "dal"));
        let second = store.insert(record(0, 1, "naan"));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.get(1).unwrap().name, "dal");
    }

    #[test]
    fn test_in_memory_store_update_and_remove() {
        let mut store = InMemoryDishStore::new();
        let mut dish = store.insert(record(0, 1, "dal"));

        dish.name = "dal tadka".to_string();
        assert!(store.update(dish.clone()));
        assert_eq!(store.get(dish.id).unwrap().name, "dal tadka");

        assert!(store.remove(dish.id));
        assert!(!store.remove(dish.id));
        assert!(store.get(dish.id).is_none());
    }

    #[test]
    fn test_list_by_restaurant_filters_and_orders() {
        let mut store = InMemoryDishStore::new();
        store.insert(record(0, 1, "dal"));
        store.insert(record(0, 2, "ramen"));
        store.insert(record(0, 1, "naan"));

        let dishes = store.list_by_restaurant(1);
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].name, "dal");
        assert_eq!(dishes[1].name, "naan");
    }

    #[test]
    fn test_update_on_missing_dish_fails() {
        let mut store = InMemoryDishStore::new();
        assert!(!store.update(record(42, 1, "ghost")));
    }

    #[test]
    fn test_dish_error_display() {
        assert_eq!(DishError::NotFound(7).to_string(), "Dish with ID 7 not found");
        assert_eq!(
            DishError::MissingIngredients.to_string(),
            "Ingredients list is required"
        );
    }
}
