//! API endpoints.

pub mod meals;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use meal_store::MealStore;

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: MealStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // User endpoints
        .route(
            "/users",
            get(users::list_users).post(users::create_user),
        )
        // Meal endpoints
        .route(
            "/meals",
            get(meals::list_meals)
                .post(meals::create_meal)
                .put(meals::update_meal)
                .delete(meals::delete_meal),
        )
        .route("/meals/summary", get(meals::get_summary))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
