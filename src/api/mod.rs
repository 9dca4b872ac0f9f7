/// HTTP API Layer
///
/// REST endpoints for every entity of the laboratory model. It handles:
/// - CRUD for users, DNA processes, workflows, groups, worksheets and measurements
/// - Workflow process sequencing (atomic replace and legacy append)
/// - The ordered workflow-group report

use crate::store::{
    DnaProcessStorage, MeasurementStorage, UserStorage, WorkflowGroupStorage, WorksheetStorage,
};
use crate::workflow::WorkflowStorage;
use axum::{
    http::{header, HeaderName, StatusCode},
    response::Json,
    Router,
};
use sqlx::sqlite::SqlitePool;

// User management endpoints
pub mod users;

// DNA process endpoints
pub mod dna_processes;

// Workflow endpoints, including process sequencing
pub mod workflows;

// Workflow group endpoints and report
pub mod workflow_groups;

// Worksheet endpoints
pub mod worksheets;

// Extractors that answer malformed input with ApiError::Validation
pub mod extract;

// Worksheet-to-group placement endpoints
pub mod placements;

// Extraction / amplification / quantification endpoints
pub mod measurements;

/// Application state containing shared resources
///
/// Every storage holds its own clone of the pool; `pool` is used directly by
/// handlers that need a request-scoped connection.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub users: UserStorage,
    pub processes: DnaProcessStorage,
    pub workflows: WorkflowStorage,
    pub groups: WorkflowGroupStorage,
    pub worksheets: WorksheetStorage,
    pub measurements: MeasurementStorage,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserStorage::new(pool.clone()),
            processes: DnaProcessStorage::new(pool.clone()),
            workflows: WorkflowStorage::new(pool.clone()),
            groups: WorkflowGroupStorage::new(pool.clone()),
            worksheets: WorksheetStorage::new(pool.clone()),
            measurements: MeasurementStorage::new(pool.clone()),
            pool,
        }
    }
}

/// 201 response carrying the new record and its location
pub type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

pub(crate) fn created<T>(location: String, body: T) -> Created<T> {
    (StatusCode::CREATED, [(header::LOCATION, location)], Json(body))
}

/// All `/api/*` routes
pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .merge(users::create_user_routes())
        .merge(dna_processes::create_dna_process_routes())
        .merge(workflows::create_workflow_routes())
        .merge(workflow_groups::create_workflow_group_routes())
        .merge(worksheets::create_worksheet_routes())
        .merge(placements::create_placement_routes())
        .merge(measurements::create_measurement_routes())
}
