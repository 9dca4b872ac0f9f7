/// Measurement REST API endpoints
///
/// `/api/extractions`, `/api/amplifications` and `/api/quantifications` share
/// one set of handlers; each route binds the `MeasurementKind` it serves.

use crate::{
    api::{created, extract::ApiJson, AppState, Created},
    error::ApiResult,
    store::types::{check_same_id, Measurement, MeasurementKind, NewMeasurement},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

pub fn create_measurement_routes() -> Router<AppState> {
    MeasurementKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| router.merge(routes_for(kind)))
}

fn routes_for(kind: MeasurementKind) -> Router<AppState> {
    let collection = format!("/api/{}", kind.table());
    let item = format!("{}/{{id}}", collection);

    Router::new()
        .route(
            &collection,
            get(move |state: State<AppState>| list_measurements(state, kind)),
        )
        .route(
            &collection,
            post(move |state: State<AppState>, body: ApiJson<NewMeasurement>| {
                create_measurement(state, body, kind)
            }),
        )
        .route(
            &item,
            get(move |state: State<AppState>, id: Path<i64>| get_measurement(state, id, kind)),
        )
        .route(
            &item,
            put(
                move |state: State<AppState>, id: Path<i64>, body: ApiJson<Measurement>| {
                    update_measurement(state, id, body, kind)
                },
            ),
        )
        .route(
            &item,
            delete(move |state: State<AppState>, id: Path<i64>| delete_measurement(state, id, kind)),
        )
}

async fn list_measurements(
    State(state): State<AppState>,
    kind: MeasurementKind,
) -> ApiResult<Json<Vec<Measurement>>> {
    Ok(Json(state.measurements.list(kind).await?))
}

async fn get_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    kind: MeasurementKind,
) -> ApiResult<Json<Measurement>> {
    Ok(Json(state.measurements.get(kind, id).await?))
}

/// Body: { "worksheetId": 1, "prop1": 2, "prop2": 4 }
async fn create_measurement(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewMeasurement>,
    kind: MeasurementKind,
) -> ApiResult<Created<Measurement>> {
    let measurement = state.measurements.create(kind, &payload).await?;
    Ok(created(
        format!("/api/{}/{}", kind.table(), measurement.id),
        measurement,
    ))
}

async fn update_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(measurement): ApiJson<Measurement>,
    kind: MeasurementKind,
) -> ApiResult<StatusCode> {
    check_same_id(id, measurement.id)?;
    state.measurements.update(kind, &measurement).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_measurement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    kind: MeasurementKind,
) -> ApiResult<StatusCode> {
    state.measurements.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
