/// User management REST API endpoints

use crate::{
    api::{created, extract::ApiJson, AppState, Created},
    error::ApiResult,
    store::types::{check_same_id, NewUser, User},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users", post(create_user))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}", put(update_user))
        .route("/api/users/{id}", delete(delete_user))
}

/// GET /api/users
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

/// GET /api/users/:id
async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get(id).await?))
}

/// POST /api/users
/// Body: { "userName": "...", "email": "...", "role": "Admin" | "Technician" | "Analyst" }
async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewUser>,
) -> ApiResult<Created<User>> {
    let user = state.users.create(&payload).await?;
    tracing::info!("Created user: {} ({:?})", user.user_name, user.role);
    Ok(created(format!("/api/users/{}", user.id), user))
}

/// PUT /api/users/:id
/// Body: the full user, including a matching "id"
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(user): ApiJson<User>,
) -> ApiResult<StatusCode> {
    check_same_id(id, user.id)?;
    state.users.update(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/users/:id
async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
