/// End-to-end tests driving the full router over an in-memory seeded database

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use dnaflow::{build_router, AppState, Database};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let db = Database::in_memory().await.unwrap();
    db.seed_if_empty().await.unwrap();
    build_router(AppState::new(db.pool().clone()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

fn sequence_of(workflow: &Value) -> Vec<(i64, i64)> {
    workflow["processes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| {
            (
                step["dnaProcessId"].as_i64().unwrap(),
                step["processOrder"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn replace_reorders_seeded_workflow() {
    let app = app().await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/workflows/1/processes",
        Some(json!({ "dnaProcessIds": [3, 1] })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, workflow) = send(&app, Method::GET, "/api/workflows/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sequence_of(&workflow), vec![(3, 1), (1, 2)]);
    assert_eq!(workflow["processes"][0]["processName"], "Quantification");
    assert_eq!(workflow["processes"][1]["processName"], "Extraction");
}

#[tokio::test]
async fn replace_rejections_keep_prior_state() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/workflows/1/processes",
        Some(json!({ "dnaProcessIds": [2, 2] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("duplicate ids"));

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/workflows/1/processes",
        Some(json!({ "dnaProcessIds": [1, 99] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid id"));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/workflows/42/processes",
        Some(json!({ "dnaProcessIds": [1] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, workflow) = send(&app, Method::GET, "/api/workflows/1", None).await;
    assert_eq!(sequence_of(&workflow), vec![(1, 1), (2, 2), (3, 3)]);
}

#[tokio::test]
async fn legacy_append_conflicts_on_existing_pair() {
    let app = app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/workflows/1/add-process?dnaProcessId=1&processOrder=4",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/dnaprocesses",
        Some(json!({ "name": "Sequencing", "createdBy": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let new_id = created["id"].as_i64().unwrap();

    let uri = format!("/api/workflows/1/add-process?dnaProcessId={}&processOrder=4", new_id);
    let (status, _) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, workflow) = send(&app, Method::GET, "/api/workflows/1", None).await;
    assert_eq!(sequence_of(&workflow), vec![(1, 1), (2, 2), (3, 3), (new_id, 4)]);
}

#[tokio::test]
async fn create_returns_location_and_record() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "userName": "analyst2", "email": null, "role": "Analyst" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/users/5");

    let (status, user) = send(&app, Method::GET, "/api/users/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "Analyst");
}

#[tokio::test]
async fn update_requires_matching_ids() {
    let app = app().await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/workflows/1",
        Some(json!({ "id": 2, "name": "Renamed", "createdBy": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/workflows/8",
        Some(json!({ "id": 8, "name": "Gone", "createdBy": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/workflows/1",
        Some(json!({ "id": 1, "name": "Renamed", "createdBy": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, workflow) = send(&app, Method::GET, "/api/workflows/1", None).await;
    assert_eq!(workflow["name"], "Renamed");
    assert_eq!(sequence_of(&workflow).len(), 3);
}

#[tokio::test]
async fn deleting_a_workflow_creator_is_blocked() {
    let app = app().await;

    let (status, body) = send(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("still referenced"));

    let (status, _) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn repeated_delete_is_not_found() {
    let app = app().await;

    let (status, _) = send(&app, Method::DELETE, "/api/quantifications/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/api/quantifications/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn group_report_orders_by_step() {
    let app = app().await;

    let (status, group) = send(
        &app,
        Method::POST,
        "/api/workflowgroups",
        Some(json!({ "workflowId": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let group_id = group["id"].as_i64().unwrap();

    let report_uri = format!("/api/workflowgroups/{}/report", group_id);
    let (status, _) = send(&app, Method::GET, &report_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for (worksheet_id, step) in [(1, 3), (2, 1), (3, 2)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/worksheetworkflowgroups",
            Some(json!({ "worksheetId": worksheet_id, "workflowGroupId": group_id, "stepOrder": step })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = send(&app, Method::GET, &report_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = report.as_array().unwrap();
    let steps: Vec<_> = rows.iter().map(|r| r["stepOrder"].as_i64().unwrap()).collect();
    assert_eq!(steps, vec![1, 2, 3]);
    assert_eq!(rows[0]["processName"], "Amplification");
    assert_eq!(rows[0]["workflowName"], "Default Workflow");
    assert_eq!(rows[0]["analystName"], "analyst1");
}

#[tokio::test]
async fn measurement_routes_are_bound_per_kind() {
    let app = app().await;

    let (status, extraction) = send(&app, Method::GET, "/api/extractions/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(extraction["prop2"], 4);

    let (status, amplification) = send(&app, Method::GET, "/api/amplifications/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amplification["prop1"], 5);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/amplifications/1",
        Some(json!({ "id": 1, "worksheetId": 2, "prop1": 6, "prop2": 12 })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, amplification) = send(&app, Method::GET, "/api/amplifications/1", None).await;
    assert_eq!(amplification["prop2"], 12);
}

#[tokio::test]
async fn malformed_input_is_a_validation_error() {
    let app = app().await;

    for body in [
        json!({ "dnaProcessIds": "x" }),
        json!({}),
        json!({ "dnaProcessIds": [1, "a"] }),
    ] {
        let (status, error) = send(&app, Method::PUT, "/api/workflows/1/processes", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].as_str().unwrap().contains("invalid request body"));
    }

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "userName": "janitor1", "email": null, "role": "Janitor" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/workflows/1/add-process?dnaProcessId=abc&processOrder=4",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("invalid query string"));

    let (_, workflow) = send(&app, Method::GET, "/api/workflows/1", None).await;
    assert_eq!(sequence_of(&workflow), vec![(1, 1), (2, 2), (3, 3)]);
}

#[tokio::test]
async fn worksheet_holds_one_measurement_per_kind() {
    let app = app().await;

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/extractions",
        Some(json!({ "worksheetId": 1, "prop1": 7, "prop2": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["error"].is_string());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/quantifications",
        Some(json!({ "worksheetId": 1, "prop1": 7, "prop2": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, extractions) = send(&app, Method::GET, "/api/extractions", None).await;
    assert_eq!(extractions.as_array().unwrap().len(), 1);
}
