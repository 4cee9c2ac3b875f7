//! In-memory meal store implementation for testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{Meal, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{MealStore, MealStoreError, MealStoreResult};

/// In-memory meal store for testing purposes.
///
/// Enforces the same constraints as the SQLite store: user names are
/// unique, and meals may only reference an existing user.
#[derive(Debug, Default)]
pub struct MemoryMealStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    meals: Arc<RwLock<HashMap<Uuid, Meal>>>,
}

impl MemoryMealStore {
    /// Creates a new in-memory meal store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealStore for MemoryMealStore {
    async fn create_user(&self, user: User) -> MealStoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.name == user.name) {
            return Err(MealStoreError::already_exists("User", user.name.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_name(&self, name: &str) -> MealStoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.name == name).cloned())
    }

    async fn list_users(&self) -> MealStoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn create_meal(&self, meal: Meal) -> MealStoreResult<Meal> {
        let users = self.users.read().await;
        if !users.contains_key(&meal.user_id) {
            return Err(MealStoreError::ForeignKeyViolation(format!(
                "no user with id {}",
                meal.user_id
            )));
        }
        drop(users);

        let mut meals = self.meals.write().await;
        meals.insert(meal.id, meal.clone());
        Ok(meal)
    }

    async fn get_meal(&self, id: Uuid) -> MealStoreResult<Option<Meal>> {
        let meals = self.meals.read().await;
        Ok(meals.get(&id).cloned())
    }

    async fn list_meals(&self, owner: Uuid, meal_id: Option<Uuid>) -> MealStoreResult<Vec<Meal>> {
        let meals = self.meals.read().await;
        let mut result: Vec<Meal> = meals
            .values()
            .filter(|m| m.user_id == owner)
            .filter(|m| meal_id.is_none_or(|id| m.id == id))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn update_meal(&self, meal: Meal) -> MealStoreResult<Meal> {
        let mut meals = self.meals.write().await;
        if !meals.contains_key(&meal.id) {
            return Err(MealStoreError::not_found("Meal", meal.id.to_string()));
        }
        meals.insert(meal.id, meal.clone());
        Ok(meal)
    }

    async fn delete_meal(&self, id: Uuid) -> MealStoreResult<()> {
        let mut meals = self.meals.write().await;
        if meals.remove(&id).is_none() {
            return Err(MealStoreError::not_found("Meal", id.to_string()));
        }
        Ok(())
    }

    async fn count_meals(&self, owner: Uuid, on_diet: Option<bool>) -> MealStoreResult<u32> {
        let meals = self.meals.read().await;
        let count = meals
            .values()
            .filter(|m| m.user_id == owner)
            .filter(|m| on_diet.is_none_or(|flag| m.on_diet == flag))
            .count();
        Ok(count as u32)
    }

    async fn list_meals_by_consumed_at(&self, owner: Uuid) -> MealStoreResult<Vec<Meal>> {
        let meals = self.meals.read().await;
        let mut result: Vec<Meal> = meals
            .values()
            .filter(|m| m.user_id == owner)
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.consumed_at
                .cmp(&b.consumed_at)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[tokio::test]
    async fn test_duplicate_user_name_rejected() {
        let store = MemoryMealStore::new();
        store.create_user(User::new("alice")).await.unwrap();

        let result = store.create_user(User::new("alice")).await;
        assert!(matches!(
            result,
            Err(MealStoreError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_meal_requires_existing_owner() {
        let store = MemoryMealStore::new();
        let meal = Meal::new(Uuid::new_v4(), "Lunch", true, Utc::now());

        let result = store.create_meal(meal).await;
        assert!(matches!(
            result,
            Err(MealStoreError::ForeignKeyViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_list_meals_filters_by_id() {
        let store = MemoryMealStore::new();
        let user = store.create_user(User::new("alice")).await.unwrap();

        let breakfast = store
            .create_meal(Meal::new(user.id, "Breakfast", true, Utc::now()))
            .await
            .unwrap();
        store
            .create_meal(Meal::new(user.id, "Lunch", false, Utc::now()))
            .await
            .unwrap();

        let all = store.list_meals(user.id, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let one = store.list_meals(user.id, Some(breakfast.id)).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name, "Breakfast");
    }

    #[tokio::test]
    async fn test_count_meals_with_diet_filter() {
        let store = MemoryMealStore::new();
        let user = store.create_user(User::new("alice")).await.unwrap();

        for on_diet in [true, true, false] {
            store
                .create_meal(Meal::new(user.id, "Meal", on_diet, Utc::now()))
                .await
                .unwrap();
        }

        assert_eq!(store.count_meals(user.id, None).await.unwrap(), 3);
        assert_eq!(store.count_meals(user.id, Some(true)).await.unwrap(), 2);
        assert_eq!(store.count_meals(user.id, Some(false)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ordered_listing_sorts_by_consumed_at() {
        let store = MemoryMealStore::new();
        let user = store.create_user(User::new("alice")).await.unwrap();
        let base = Utc::now();

        // Inserted out of chronological order on purpose.
        for (name, offset) in [("Dinner", 3), ("Breakfast", 1), ("Lunch", 2)] {
            store
                .create_meal(Meal::new(
                    user.id,
                    name,
                    true,
                    base + Duration::hours(offset),
                ))
                .await
                .unwrap();
        }

        let ordered = store.list_meals_by_consumed_at(user.id).await.unwrap();
        let names: Vec<&str> = ordered.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Breakfast", "Lunch", "Dinner"]);
    }

    #[tokio::test]
    async fn test_ordered_listing_breaks_ties_by_created_at() {
        let store = MemoryMealStore::new();
        let user = store.create_user(User::new("alice")).await.unwrap();
        let consumed = Utc::now();

        let mut first = Meal::new(user.id, "First", true, consumed);
        let mut second = Meal::new(user.id, "Second", true, consumed);
        first.created_at = consumed;
        second.created_at = consumed + Duration::seconds(1);

        store.create_meal(second).await.unwrap();
        store.create_meal(first).await.unwrap();

        let ordered = store.list_meals_by_consumed_at(user.id).await.unwrap();
        let names: Vec<&str> = ordered.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[tokio::test]
    async fn test_update_missing_meal_fails() {
        let store = MemoryMealStore::new();
        let user = store.create_user(User::new("alice")).await.unwrap();
        let meal = Meal::new(user.id, "Ghost", true, Utc::now());

        let result = store.update_meal(meal).await;
        assert!(matches!(result, Err(MealStoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_meal() {
        let store = MemoryMealStore::new();
        let user = store.create_user(User::new("alice")).await.unwrap();
        let meal = store
            .create_meal(Meal::new(user.id, "Lunch", true, Utc::now()))
            .await
            .unwrap();

        store.delete_meal(meal.id).await.unwrap();
        assert!(store.get_meal(meal.id).await.unwrap().is_none());

        let result = store.delete_meal(meal.id).await;
        assert!(matches!(result, Err(MealStoreError::NotFound { .. })));
    }
}
