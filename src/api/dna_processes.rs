/// DNA process REST API endpoints

use crate::{
    api::{created, extract::ApiJson, AppState, Created},
    error::ApiResult,
    store::types::{check_same_id, DnaProcess, DnaProcessView, NewDnaProcess},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_dna_process_routes() -> Router<AppState> {
    Router::new()
        .route("/api/dnaprocesses", get(list_processes))
        .route("/api/dnaprocesses", post(create_process))
        .route("/api/dnaprocesses/{id}", get(get_process))
        .route("/api/dnaprocesses/{id}", put(update_process))
        .route("/api/dnaprocesses/{id}", delete(delete_process))
}

/// GET /api/dnaprocesses
/// Returns: [{ "id": 1, "name": "Extraction", "createdBy": 1, "createdByName": "admin" }]
async fn list_processes(State(state): State<AppState>) -> ApiResult<Json<Vec<DnaProcessView>>> {
    Ok(Json(state.processes.list().await?))
}

/// GET /api/dnaprocesses/:id
async fn get_process(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DnaProcessView>> {
    Ok(Json(state.processes.get(id).await?))
}

/// POST /api/dnaprocesses
/// Body: { "name": "...", "createdBy": 1 }
async fn create_process(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewDnaProcess>,
) -> ApiResult<Created<DnaProcess>> {
    let process = state.processes.create(&payload).await?;
    tracing::info!("Created dna process: {} ({})", process.id, process.name);
    Ok(created(format!("/api/dnaprocesses/{}", process.id), process))
}

/// PUT /api/dnaprocesses/:id
async fn update_process(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(process): ApiJson<DnaProcess>,
) -> ApiResult<StatusCode> {
    check_same_id(id, process.id)?;
    state.processes.update(&process).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/dnaprocesses/:id
async fn delete_process(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.processes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
