use assert_matches::assert_matches;
use axum::extract::{Query, State};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_utils::test_utils::{MockStoreRows, TestConfig};
use slot_cell::handlers::{self, SlotListQuery};
use slot_cell::models::{SlotError, DAY_PERIODS};
use slot_cell::services::slots::SlotService;

#[tokio::test]
async fn first_query_generates_three_period_slots() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/slots"))
        .and(query_param("doctor_id", format!("eq.{}", doctor_id)))
        .and(query_param("date", "eq.2025-12-20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/slots"))
        .and(body_partial_json(json!([
            { "period": "Morning", "is_booked": false },
            { "period": "Afternoon", "is_booked": false },
            { "period": "Evening", "is_booked": false },
        ])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::slot(&MockStoreRows::new_id(), &doctor_id, "2025-12-20", "Morning", false),
            MockStoreRows::slot(&MockStoreRows::new_id(), &doctor_id, "2025-12-20", "Afternoon", false),
            MockStoreRows::slot(&MockStoreRows::new_id(), &doctor_id, "2025-12-20", "Evening", false),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::get_slots(
        State(config),
        Query(SlotListQuery {
            doctor_id: Some(doctor_id),
            date: Some("2025-12-20".to_string()),
        }),
    )
    .await
    .expect("slot query should succeed");

    let rows = result.0.as_array().expect("array body").clone();
    assert_eq!(rows.len(), 3);
    for (row, period) in rows.iter().zip(DAY_PERIODS) {
        assert_eq!(row["period"], period);
        assert_eq!(row["is_booked"], false);
    }
}

#[tokio::test]
async fn existing_slots_are_returned_without_regeneration() {
    let mock_server = MockServer::start().await;
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::slot(&MockStoreRows::new_id(), &doctor_id, "2025-12-20", "Morning", true),
            MockStoreRows::slot(&MockStoreRows::new_id(), &doctor_id, "2025-12-20", "Afternoon", false),
            MockStoreRows::slot(&MockStoreRows::new_id(), &doctor_id, "2025-12-20", "Evening", false),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/slots"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::get_slots(
        State(config),
        Query(SlotListQuery {
            doctor_id: Some(doctor_id),
            date: Some("2025-12-20".to_string()),
        }),
    )
    .await
    .expect("slot query should succeed");

    let rows = result.0.as_array().expect("array body").clone();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["is_booked"], true);
}

#[tokio::test]
async fn missing_query_parameters_are_rejected() {
    let config = TestConfig::default().to_arc();

    let result = handlers::get_slots(
        State(config),
        Query(SlotListQuery {
            doctor_id: None,
            date: Some("2025-12-20".to_string()),
        }),
    )
    .await;

    assert!(result.is_err());
}

// Regression: the claim must be conditional on the stored is_booked flag, so
// a slot can never be double-booked by racing requests.
#[tokio::test]
async fn losing_a_claim_race_reports_already_booked() {
    let mock_server = MockServer::start().await;
    let slot_id = Uuid::new_v4().to_string();
    let doctor_id = Uuid::new_v4().to_string();

    // The conditional update matches no rows: the other booker got there
    // first.
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/slots"))
        .and(query_param("id", format!("eq.{}", slot_id)))
        .and(query_param("is_booked", "eq.false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/slots"))
        .and(query_param("id", format!("eq.{}", slot_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::slot(&slot_id, &doctor_id, "2025-12-20", "Morning", true),
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let service = SlotService::new(&config);

    let result = service.claim(&slot_id).await;
    assert_matches!(result, Err(SlotError::AlreadyBooked));
}

#[tokio::test]
async fn claiming_an_open_slot_succeeds() {
    let mock_server = MockServer::start().await;
    let slot_id = Uuid::new_v4().to_string();
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/slots"))
        .and(query_param("is_booked", "eq.false"))
        .and(body_partial_json(json!({ "is_booked": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::slot(&slot_id, &doctor_id, "2025-12-20", "Morning", true),
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let service = SlotService::new(&config);

    let slot = service.claim(&slot_id).await.expect("claim should succeed");
    assert!(slot.is_booked);
}

#[tokio::test]
async fn claiming_a_missing_slot_reports_not_found() {
    let mock_server = MockServer::start().await;
    let slot_id = Uuid::new_v4().to_string();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/slots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_app_config();
    let service = SlotService::new(&config);

    let result = service.claim(&slot_id).await;
    assert_matches!(result, Err(SlotError::NotFound));
}
