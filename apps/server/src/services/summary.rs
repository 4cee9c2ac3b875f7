//! Meal summary aggregation.
//!
//! Computes aggregate statistics over one user's meals, including the
//! longest consecutive run of on-diet meals in chronological order.

use entities::Meal;
use serde::Serialize;

/// Aggregate statistics over one user's meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    /// Count of all meals.
    pub total_meals: u32,
    /// Count of meals that complied with the diet.
    pub on_diet_meals: u32,
    /// Count of meals that did not.
    pub off_diet_meals: u32,
    /// Length of the longest contiguous run of on-diet meals.
    pub max_streak: u32,
}

/// Computes a [`MealSummary`] over meals ordered ascending by
/// `consumed_at`.
///
/// The streak count is order-sensitive: callers must pass the meals in
/// chronological order. The store's ordered listing breaks `consumed_at`
/// ties by insertion time, keeping results reproducible.
pub fn summarize(meals: &[Meal]) -> MealSummary {
    let mut summary = MealSummary::default();
    let mut current = 0;

    for meal in meals {
        summary.total_meals += 1;
        if meal.on_diet {
            summary.on_diet_meals += 1;
            current += 1;
        } else {
            summary.off_diet_meals += 1;
            summary.max_streak = summary.max_streak.max(current);
            current = 0;
        }
    }

    // A streak that runs to the end of the sequence is only visible here.
    summary.max_streak = summary.max_streak.max(current);

    summary
}
