/// Worksheet REST API endpoints

use crate::{
    api::{created, extract::ApiJson, AppState, Created},
    error::ApiResult,
    store::types::{check_same_id, NewWorksheet, Worksheet},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_worksheet_routes() -> Router<AppState> {
    Router::new()
        .route("/api/worksheets", get(list_worksheets))
        .route("/api/worksheets", post(create_worksheet))
        .route("/api/worksheets/{id}", get(get_worksheet))
        .route("/api/worksheets/{id}", put(update_worksheet))
        .route("/api/worksheets/{id}", delete(delete_worksheet))
}

async fn list_worksheets(State(state): State<AppState>) -> ApiResult<Json<Vec<Worksheet>>> {
    Ok(Json(state.worksheets.list().await?))
}

async fn get_worksheet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Worksheet>> {
    Ok(Json(state.worksheets.get(id).await?))
}

/// POST /api/worksheets
/// Body: { "name": "...", "analystId": 4, "dnaProcessId": 1 }
async fn create_worksheet(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewWorksheet>,
) -> ApiResult<Created<Worksheet>> {
    let worksheet = state.worksheets.create(&payload).await?;
    Ok(created(format!("/api/worksheets/{}", worksheet.id), worksheet))
}

async fn update_worksheet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(worksheet): ApiJson<Worksheet>,
) -> ApiResult<StatusCode> {
    check_same_id(id, worksheet.id)?;
    state.worksheets.update(&worksheet).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_worksheet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.worksheets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
