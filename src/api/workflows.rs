/// Workflow management REST API endpoints
///
/// Provides CRUD operations for workflows plus the two sequencing endpoints.
/// Sequence changes run on a connection acquired for the request and returned
/// to the pool when the handler finishes, whatever the outcome.

use crate::{
    api::{created, extract::{ApiJson, ApiQuery}, AppState, Created},
    error::ApiResult,
    store::types::check_same_id,
    workflow::{
        sequence,
        types::{AddProcessQuery, NewWorkflow, ReplaceProcessesRequest, Workflow, WorkflowDetail},
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

/// Create workflow management routes
pub fn create_workflow_routes() -> Router<AppState> {
    Router::new()
        .route("/api/workflows", post(create_workflow))
        .route("/api/workflows", get(list_workflows))
        .route("/api/workflows/{id}", get(get_workflow))
        .route("/api/workflows/{id}", put(update_workflow))
        .route("/api/workflows/{id}", delete(delete_workflow))
        .route("/api/workflows/{id}/add-process", post(add_process))
        .route("/api/workflows/{id}/processes", put(replace_processes))
}

/// Create a new workflow
///
/// POST /api/workflows
/// Body: { "name": "...", "createdBy": 1 }
async fn create_workflow(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewWorkflow>,
) -> ApiResult<Created<Workflow>> {
    let workflow = state.workflows.create(&payload).await?;
    Ok(created(format!("/api/workflows/{}", workflow.id), workflow))
}

/// List all workflows
///
/// GET /api/workflows
/// Returns: [{ "id": 1, "name": "...", "createdBy": 1, "processes": [...] }]
async fn list_workflows(State(state): State<AppState>) -> ApiResult<Json<Vec<WorkflowDetail>>> {
    Ok(Json(state.workflows.list().await?))
}

/// Get a specific workflow by ID with its ordered sequence
///
/// GET /api/workflows/:id
async fn get_workflow(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<WorkflowDetail>> {
    Ok(Json(state.workflows.get(id).await?))
}

/// Update an existing workflow
///
/// PUT /api/workflows/:id
/// Body: { "id": 1, "name": "...", "createdBy": 1 }
async fn update_workflow(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(workflow): ApiJson<Workflow>,
) -> ApiResult<StatusCode> {
    check_same_id(id, workflow.id)?;
    state.workflows.update(&workflow).await?;
    tracing::info!("Updated workflow: {} ({})", workflow.id, workflow.name);
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a workflow
///
/// DELETE /api/workflows/:id
async fn delete_workflow(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.workflows.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Append one process to the sequence (legacy)
///
/// POST /api/workflows/:id/add-process?dnaProcessId=2&processOrder=4
async fn add_process(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiQuery(query): ApiQuery<AddProcessQuery>,
) -> ApiResult<StatusCode> {
    let mut conn = state.pool.acquire().await?;
    sequence::append_process(&mut conn, id, query.dna_process_id, query.process_order).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the whole sequence atomically
///
/// PUT /api/workflows/:id/processes
/// Body: { "dnaProcessIds": [3, 1, 2] }
async fn replace_processes(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ReplaceProcessesRequest>,
) -> ApiResult<StatusCode> {
    let mut conn = state.pool.acquire().await?;
    sequence::replace_processes(&mut conn, id, &payload.dna_process_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}
