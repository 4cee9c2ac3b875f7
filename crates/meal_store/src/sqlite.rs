//! SQLite meal store implementation backed by sqlx.

use std::str::FromStr;

use async_trait::async_trait;
use entities::{Meal, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{MealStore, MealStoreError, MealStoreResult};

const CREATE_USERS: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
)";

const CREATE_MEALS: &str = "\
CREATE TABLE IF NOT EXISTS meals (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    on_diet INTEGER NOT NULL,
    consumed_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    user_id BLOB NOT NULL REFERENCES users(id)
)";

/// SQLite-backed meal store.
#[derive(Debug, Clone)]
pub struct SqliteMealStore {
    pool: SqlitePool,
}

impl SqliteMealStore {
    /// Wraps an existing pool. The schema must already be in place or
    /// [`migrate`](Self::migrate) called before use.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `url` (creating the database file if missing,
    /// foreign keys enabled) and ensures the schema exists.
    pub async fn connect(url: &str) -> MealStoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Creates the `users` and `meals` tables if they do not exist.
    pub async fn migrate(&self) -> MealStoreResult<()> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_MEALS).execute(&self.pool).await?;
        tracing::debug!("SQLite schema ready");
        Ok(())
    }
}

#[async_trait]
impl MealStore for SqliteMealStore {
    async fn create_user(&self, user: User) -> MealStoreResult<User> {
        sqlx::query("INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(user.id)
            .bind(&user.name)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|err| match &err {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    MealStoreError::already_exists("User", user.name.clone())
                }
                _ => MealStoreError::Database(err),
            })?;
        Ok(user)
    }

    async fn get_user_by_name(&self, name: &str) -> MealStoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, created_at FROM users WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_users(&self) -> MealStoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, created_at FROM users ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn create_meal(&self, meal: Meal) -> MealStoreResult<Meal> {
        sqlx::query(
            "INSERT INTO meals (id, name, description, on_diet, consumed_at, created_at, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(meal.id)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.on_diet)
        .bind(meal.consumed_at)
        .bind(meal.created_at)
        .bind(meal.user_id)
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                MealStoreError::ForeignKeyViolation(format!("no user with id {}", meal.user_id))
            }
            _ => MealStoreError::Database(err),
        })?;
        Ok(meal)
    }

    async fn get_meal(&self, id: Uuid) -> MealStoreResult<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            "SELECT id, name, description, on_diet, consumed_at, created_at, user_id
             FROM meals WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(meal)
    }

    async fn list_meals(&self, owner: Uuid, meal_id: Option<Uuid>) -> MealStoreResult<Vec<Meal>> {
        let meals = match meal_id {
            Some(id) => {
                sqlx::query_as::<_, Meal>(
                    "SELECT id, name, description, on_diet, consumed_at, created_at, user_id
                     FROM meals WHERE user_id = ?1 AND id = ?2",
                )
                .bind(owner)
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Meal>(
                    "SELECT id, name, description, on_diet, consumed_at, created_at, user_id
                     FROM meals WHERE user_id = ?1 ORDER BY created_at ASC",
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(meals)
    }

    async fn update_meal(&self, meal: Meal) -> MealStoreResult<Meal> {
        let result = sqlx::query(
            "UPDATE meals SET name = ?1, description = ?2, on_diet = ?3, consumed_at = ?4
             WHERE id = ?5",
        )
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.on_diet)
        .bind(meal.consumed_at)
        .bind(meal.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(MealStoreError::not_found("Meal", meal.id.to_string()));
        }
        Ok(meal)
    }

    async fn delete_meal(&self, id: Uuid) -> MealStoreResult<()> {
        let result = sqlx::query("DELETE FROM meals WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(MealStoreError::not_found("Meal", id.to_string()));
        }
        Ok(())
    }

    async fn count_meals(&self, owner: Uuid, on_diet: Option<bool>) -> MealStoreResult<u32> {
        let count: i64 = match on_diet {
            Some(flag) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM meals WHERE user_id = ?1 AND on_diet = ?2")
                    .bind(owner)
                    .bind(flag)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM meals WHERE user_id = ?1")
                    .bind(owner)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count as u32)
    }

    async fn list_meals_by_consumed_at(&self, owner: Uuid) -> MealStoreResult<Vec<Meal>> {
        let meals = sqlx::query_as::<_, Meal>(
            "SELECT id, name, description, on_diet, consumed_at, created_at, user_id
             FROM meals WHERE user_id = ?1
             ORDER BY consumed_at ASC, created_at ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(meals)
    }
}
