//! Meal store trait definitions.

use async_trait::async_trait;
use entities::{Meal, User};
use uuid::Uuid;

use crate::MealStoreResult;

/// Trait for user and meal storage operations.
#[async_trait]
pub trait MealStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. Fails if the name is already taken.
    async fn create_user(&self, user: User) -> MealStoreResult<User>;

    /// Gets a user by name.
    async fn get_user_by_name(&self, name: &str) -> MealStoreResult<Option<User>>;

    /// Lists all users.
    async fn list_users(&self) -> MealStoreResult<Vec<User>>;

    // =========================================================================
    // Meal operations
    // =========================================================================

    /// Creates a new meal. Fails if the owner does not exist.
    async fn create_meal(&self, meal: Meal) -> MealStoreResult<Meal>;

    /// Gets a meal by ID.
    async fn get_meal(&self, id: Uuid) -> MealStoreResult<Option<Meal>>;

    /// Lists meals belonging to an owner, optionally narrowed to one ID.
    async fn list_meals(&self, owner: Uuid, meal_id: Option<Uuid>) -> MealStoreResult<Vec<Meal>>;

    /// Replaces a meal keyed by its ID. Fails if the meal does not exist.
    async fn update_meal(&self, meal: Meal) -> MealStoreResult<Meal>;

    /// Deletes a meal. Fails if the meal does not exist.
    async fn delete_meal(&self, id: Uuid) -> MealStoreResult<()>;

    /// Counts meals for an owner, optionally filtered by diet flag.
    async fn count_meals(&self, owner: Uuid, on_diet: Option<bool>) -> MealStoreResult<u32>;

    /// Lists meals for an owner ordered ascending by consumption time.
    ///
    /// Ties in `consumed_at` are broken by `created_at`, then `id`, so the
    /// order is deterministic across calls.
    async fn list_meals_by_consumed_at(&self, owner: Uuid) -> MealStoreResult<Vec<Meal>>;
}
