//! User API endpoints.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use entities::User;
use meal_store::MealStore;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Display name of the new user.
    pub user: String,
}

/// Response body for a created user.
#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    /// Name of the created user.
    pub user: String,
}

/// Response body for listing users.
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
}

/// Creates a new user. Names are unique; a duplicate is a conflict.
pub async fn create_user<S: MealStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateUserRequest>,
) -> ServerResult<(StatusCode, Json<CreateUserResponse>)> {
    let CreateUserRequest { user: name } = request;

    if state.store.get_user_by_name(&name).await?.is_some() {
        return Err(ServerError::Conflict(format!("User {name} already exists")));
    }

    let user = state.store.create_user(User::new(name)).await?;

    tracing::info!(user_id = %user.id, name = %user.name, "User created");

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse { user: user.name }),
    ))
}

/// Lists all users.
pub async fn list_users<S: MealStore>(
    State(state): State<Arc<AppState<S>>>,
) -> ServerResult<Json<ListUsersResponse>> {
    let users = state.store.list_users().await?;

    Ok(Json(ListUsersResponse { users }))
}
