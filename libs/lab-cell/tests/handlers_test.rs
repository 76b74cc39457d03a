use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use lab_cell::handlers::{self, LabListQuery};
use lab_cell::models::CreateLabRequest;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreRows, TestConfig};

#[tokio::test]
async fn list_labs_filters_by_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/labs"))
        .and(query_param("city", "eq.palakollu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::lab(&MockStoreRows::new_id(), "Krishna Diagnostics", "palakollu")
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::list_labs(
        State(config),
        Query(LabListQuery {
            city: Some("Palakollu".to_string()),
        }),
    )
    .await
    .expect("listing should succeed");

    let rows = result.0.as_array().expect("array body").clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Krishna Diagnostics");
}

#[tokio::test]
async fn create_without_tests_samples_from_catalog() {
    let mock_server = MockServer::start().await;

    // Echo back a row; the interesting assertion is on the request body.
    Mock::given(method("POST"))
        .and(path("/rest/v1/labs"))
        .and(|request: &Request| {
            let body: serde_json::Value =
                serde_json::from_slice(&request.body).expect("json body");
            let tests = body["tests"].as_array().expect("tests array");
            (3..=5).contains(&tests.len())
        })
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::lab(&MockStoreRows::new_id(), "Lotus Diagnostics", "bhimavaram")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    handlers::create_lab(
        State(config),
        Json(CreateLabRequest {
            name: "Lotus Diagnostics".to_string(),
            city: "Bhimavaram".to_string(),
            address: None,
            lab_type: Some("Diagnostic Lab".to_string()),
            rating: Some(4.5),
            tests: None,
        }),
    )
    .await
    .expect("create should succeed");
}

#[tokio::test]
async fn get_unknown_lab_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/labs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::get_lab(State(config), Path(MockStoreRows::new_id())).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
