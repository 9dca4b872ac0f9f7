/// Workflow group REST API endpoints and the ordered group report

use crate::{
    api::{created, extract::ApiJson, AppState, Created},
    error::ApiResult,
    store::types::{check_same_id, GroupReportRow, NewWorkflowGroup, WorkflowGroup},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_workflow_group_routes() -> Router<AppState> {
    Router::new()
        .route("/api/workflowgroups", get(list_groups))
        .route("/api/workflowgroups", post(create_group))
        .route("/api/workflowgroups/{id}", get(get_group))
        .route("/api/workflowgroups/{id}", put(update_group))
        .route("/api/workflowgroups/{id}", delete(delete_group))
        .route("/api/workflowgroups/{id}/report", get(group_report))
}

/// GET /api/workflowgroups
async fn list_groups(State(state): State<AppState>) -> ApiResult<Json<Vec<WorkflowGroup>>> {
    Ok(Json(state.groups.list().await?))
}

/// GET /api/workflowgroups/:id
async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<WorkflowGroup>> {
    Ok(Json(state.groups.get(id).await?))
}

/// POST /api/workflowgroups
/// Body: { "workflowId": 1 }
async fn create_group(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewWorkflowGroup>,
) -> ApiResult<Created<WorkflowGroup>> {
    let group = state.groups.create(&payload).await?;
    Ok(created(format!("/api/workflowgroups/{}", group.id), group))
}

/// PUT /api/workflowgroups/:id
async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(group): ApiJson<WorkflowGroup>,
) -> ApiResult<StatusCode> {
    check_same_id(id, group.id)?;
    state.groups.update(&group).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/workflowgroups/:id
async fn delete_group(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.groups.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Full ordered report for a group
///
/// GET /api/workflowgroups/:id/report
/// Returns: [{ "workflowName", "stepOrder", "processName", "worksheetName", "analystName" }]
async fn group_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<GroupReportRow>>> {
    Ok(Json(state.groups.report(id).await?))
}
