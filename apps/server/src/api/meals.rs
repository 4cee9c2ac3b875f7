//! Meal API endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use entities::Meal;
use meal_store::MealStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::services::summary::{MealSummary, summarize};
use crate::state::AppState;

/// Request body for creating a meal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    /// Free-text label of the meal.
    pub meal: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Whether the meal complied with the diet.
    pub on_diet: bool,
    /// When the meal was eaten.
    pub consumed_at: DateTime<Utc>,
    /// Owner of the meal.
    pub user_id: String,
}

/// Request body for updating a meal.
///
/// Absent fields keep the stored value; present fields replace it. An
/// explicit `onDiet: false` is applied, not discarded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub id: String,
    pub meal: Option<String>,
    pub description: Option<String>,
    pub on_diet: Option<bool>,
    pub consumed_at: Option<DateTime<Utc>>,
}

/// Request body for deleting a meal.
#[derive(Debug, Deserialize)]
pub struct DeleteMealRequest {
    pub id: String,
}

/// Query parameters for listing meals.
#[derive(Debug, Deserialize)]
pub struct ListMealsQuery {
    /// Narrow the listing to a single meal.
    pub mealid: Option<String>,
}

/// Response body carrying a meal name.
#[derive(Debug, Serialize)]
pub struct MealNameResponse {
    pub meal: String,
}

/// Response body for listing meals.
#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub meals: Vec<Meal>,
}

/// Response body confirming a deletion.
#[derive(Debug, Serialize)]
pub struct DeleteMealResponse {
    pub message: String,
}

/// Extracts the required `userid` header.
fn owner_id(headers: &HeaderMap) -> ServerResult<Uuid> {
    let value = headers.get("userid").ok_or(ServerError::MissingUserId)?;
    let raw = value
        .to_str()
        .map_err(|_| ServerError::InvalidRequest("Invalid userid header".to_string()))?;
    raw.parse()
        .map_err(|_| ServerError::InvalidRequest("Invalid userid header".to_string()))
}

fn parse_meal_id(raw: &str) -> ServerResult<Uuid> {
    raw.parse()
        .map_err(|_| ServerError::InvalidRequest("Invalid meal id".to_string()))
}

/// Creates a new meal for a user.
pub async fn create_meal<S: MealStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateMealRequest>,
) -> ServerResult<(StatusCode, Json<MealNameResponse>)> {
    let owner: Uuid = request
        .user_id
        .parse()
        .map_err(|_| ServerError::InvalidRequest("Invalid userId".to_string()))?;

    let mut meal = Meal::new(owner, request.meal, request.on_diet, request.consumed_at);
    meal.description = request.description;

    let meal = state.store.create_meal(meal).await?;

    tracing::info!(meal_id = %meal.id, user_id = %owner, "Meal created");

    Ok((
        StatusCode::CREATED,
        Json(MealNameResponse { meal: meal.name }),
    ))
}

/// Lists meals for the requesting user, optionally narrowed to one meal.
pub async fn list_meals<S: MealStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Query(query): Query<ListMealsQuery>,
) -> ServerResult<Json<ListMealsResponse>> {
    let owner = owner_id(&headers)?;
    let meal_id = query.mealid.as_deref().map(parse_meal_id).transpose()?;

    let meals = state.store.list_meals(owner, meal_id).await?;

    if meal_id.is_some() && meals.is_empty() {
        return Err(ServerError::NotFound("Meal not found".to_string()));
    }

    Ok(Json(ListMealsResponse { meals }))
}

/// Computes the meal summary for the requesting user.
///
/// The store returns the meals already ordered by consumption time, so
/// the aggregation is a single linear pass.
pub async fn get_summary<S: MealStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> ServerResult<Json<MealSummary>> {
    let owner = owner_id(&headers)?;

    let meals = state.store.list_meals_by_consumed_at(owner).await?;

    Ok(Json(summarize(&meals)))
}

/// Updates a meal in place. Only the fields present in the request
/// change.
pub async fn update_meal<S: MealStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<UpdateMealRequest>,
) -> ServerResult<(StatusCode, Json<MealNameResponse>)> {
    let id = parse_meal_id(&request.id)?;

    let mut meal = state
        .store
        .get_meal(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Meal not found".to_string()))?;

    if let Some(name) = request.meal {
        meal.name = name;
    }
    if let Some(description) = request.description {
        meal.description = Some(description);
    }
    if let Some(on_diet) = request.on_diet {
        meal.on_diet = on_diet;
    }
    if let Some(consumed_at) = request.consumed_at {
        meal.consumed_at = consumed_at;
    }

    let meal = state.store.update_meal(meal).await?;

    tracing::info!(meal_id = %id, "Meal updated");

    Ok((
        StatusCode::CREATED,
        Json(MealNameResponse { meal: meal.name }),
    ))
}

/// Deletes a meal belonging to the requesting user.
pub async fn delete_meal<S: MealStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(request): Json<DeleteMealRequest>,
) -> ServerResult<(StatusCode, Json<DeleteMealResponse>)> {
    let owner = owner_id(&headers)?;
    let id = parse_meal_id(&request.id)?;

    // Scope the lookup to the owner so one user cannot delete another's
    // meals.
    let matching = state.store.list_meals(owner, Some(id)).await?;
    if matching.is_empty() {
        return Err(ServerError::NotFound("Meal not found".to_string()));
    }

    state.store.delete_meal(id).await?;

    tracing::info!(meal_id = %id, user_id = %owner, "Meal deleted");

    Ok((
        StatusCode::CREATED,
        Json(DeleteMealResponse {
            message: "Meal deleted".to_string(),
        }),
    ))
}
