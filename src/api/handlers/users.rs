use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::user_repo;
use crate::errors::AppError;
use crate::models::User;
use crate::AppState;

use super::ApiResponse;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

/// POST /api/users: register a bettor with a zero balance
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("username must not be empty".into()));
    }
    if user_repo::get_user_by_username(&state.db, username).await?.is_some() {
        return Err(AppError::BadRequest(format!("username {username} is taken")));
    }

    let user = user_repo::create_user(&state.db, username).await?;
    tracing::info!(user_id = %user.id, username, "User created");

    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/users/{id}: user with current balance
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = user_repo::get_user(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    Ok(Json(ApiResponse::ok(user)))
}
