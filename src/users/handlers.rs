use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, Pagination, UpdateUserRequest, UserResponse},
        password::hash_password,
        repo_types::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    // Collection routes are registered with and without the trailing slash.
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/", post(create_user).get(list_users))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already registered");
        return Err(ApiError::username_taken());
    }
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::email_taken());
    }

    let hashed = hash_password(&payload.password);

    let user = User::create(&state.db, &payload.username, &payload.email, &hashed)
        .await
        .map_err(ApiError::from_write_error)?;

    info!(user_id = user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = User::list(&state.db, p.limit.max(0), p.skip.max(0)).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let current = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    // Keeping your own username/email is not a conflict.
    if payload.username != current.username
        && User::find_by_username(&state.db, &payload.username)
            .await?
            .is_some()
    {
        warn!(user_id = id, username = %payload.username, "username already registered");
        return Err(ApiError::username_taken());
    }
    if payload.email != current.email
        && User::find_by_email(&state.db, &payload.email).await?.is_some()
    {
        warn!(user_id = id, email = %payload.email, "email already registered");
        return Err(ApiError::email_taken());
    }

    let user = User::update_profile(&state.db, id, &payload.username, &payload.email)
        .await
        .map_err(ApiError::from_write_error)?;

    info!(user_id = user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !User::delete(&state.db, id).await? {
        return Err(ApiError::user_not_found());
    }
    info!(user_id = id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
