//! Meal entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A logged meal.
///
/// `id`, `user_id` and `created_at` are fixed at creation; `name`,
/// `description`, `on_diet` and `consumed_at` may change via update.
/// The meal name is free text and is not unique across records.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Unique identifier, the sole primary key.
    pub id: Uuid,
    /// Free-text label of the meal.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Whether the meal complied with the diet.
    pub on_diet: bool,
    /// When the meal was eaten. Ordering key for the streak computation.
    pub consumed_at: DateTime<Utc>,
    /// When this record was inserted. Secondary sort key for
    /// `consumed_at` ties.
    pub created_at: DateTime<Utc>,
    /// The user this meal belongs to.
    pub user_id: Uuid,
}

impl Meal {
    /// Creates a new meal with a fresh identifier.
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        on_diet: bool,
        consumed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            on_diet,
            consumed_at,
            created_at: Utc::now(),
            user_id,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
