/// Worksheet placement REST API endpoints
///
/// A placement puts a worksheet at a step position inside a workflow group.

use crate::{
    api::{created, extract::ApiJson, AppState, Created},
    error::ApiResult,
    store::types::{check_same_id, NewWorksheetPlacement, WorksheetPlacement},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_placement_routes() -> Router<AppState> {
    Router::new()
        .route("/api/worksheetworkflowgroups", get(list_placements))
        .route("/api/worksheetworkflowgroups", post(create_placement))
        .route("/api/worksheetworkflowgroups/{id}", get(get_placement))
        .route("/api/worksheetworkflowgroups/{id}", put(update_placement))
        .route("/api/worksheetworkflowgroups/{id}", delete(delete_placement))
}

async fn list_placements(State(state): State<AppState>) -> ApiResult<Json<Vec<WorksheetPlacement>>> {
    Ok(Json(state.groups.list_placements().await?))
}

async fn get_placement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<WorksheetPlacement>> {
    Ok(Json(state.groups.get_placement(id).await?))
}

/// POST /api/worksheetworkflowgroups
/// Body: { "worksheetId": 1, "workflowGroupId": 1, "stepOrder": 1 }
async fn create_placement(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewWorksheetPlacement>,
) -> ApiResult<Created<WorksheetPlacement>> {
    let placement = state.groups.create_placement(&payload).await?;
    Ok(created(
        format!("/api/worksheetworkflowgroups/{}", placement.id),
        placement,
    ))
}

async fn update_placement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(placement): ApiJson<WorksheetPlacement>,
) -> ApiResult<StatusCode> {
    check_same_id(id, placement.id)?;
    state.groups.update_placement(&placement).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_placement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.groups.delete_placement(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
