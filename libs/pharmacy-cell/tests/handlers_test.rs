use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharmacy_cell::handlers::{self, MedicineListQuery};
use pharmacy_cell::models::{
    CreateMedicineRequest, CreatePrescriptionRequest, PrescriptionStatus,
    UpdatePrescriptionStatusRequest, DEFAULT_MEDICINE_IMAGE,
};
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreRows, TestConfig};

#[tokio::test]
async fn catalog_listing_hides_inactive_medicines() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/medicines"))
        .and(query_param("is_active", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::medicine(&MockStoreRows::new_id(), "Paracetamol 500mg", "Pain Relief")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::list_medicines(
        State(config),
        Query(MedicineListQuery {
            category: None,
            all: None,
        }),
    )
    .await
    .expect("listing should succeed");

    assert_eq!(result.0.as_array().expect("array body").len(), 1);
}

#[tokio::test]
async fn create_medicine_fills_catalog_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/medicines"))
        .and(body_partial_json(json!({
            "image": DEFAULT_MEDICINE_IMAGE,
            "stock": 0,
            "requires_prescription": false,
            "is_active": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::medicine(&MockStoreRows::new_id(), "Paracetamol 500mg", "Pain Relief")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    handlers::create_medicine(
        State(config),
        Json(CreateMedicineRequest {
            name: "Paracetamol 500mg".to_string(),
            description: "Analgesic and antipyretic".to_string(),
            price: 25.0,
            category: "Pain Relief".to_string(),
            image: None,
            stock: None,
            requires_prescription: None,
            manufacturer: "Cipla".to_string(),
        }),
    )
    .await
    .expect("create should succeed");
}

#[tokio::test]
async fn create_medicine_rejects_negative_price() {
    let config = TestConfig::default().to_arc();

    let result = handlers::create_medicine(
        State(config),
        Json(CreateMedicineRequest {
            name: "Paracetamol 500mg".to_string(),
            description: "Analgesic".to_string(),
            price: -1.0,
            category: "Pain Relief".to_string(),
            image: None,
            stock: None,
            requires_prescription: None,
            manufacturer: "Cipla".to_string(),
        }),
    )
    .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn new_prescriptions_start_pending() {
    let mock_server = MockServer::start().await;
    let prescription_id = MockStoreRows::new_id();

    Mock::given(method("POST"))
        .and(path("/rest/v1/prescriptions"))
        .and(body_partial_json(json!({ "status": "pending" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreRows::prescription(&prescription_id, "Keerthika", "pending")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::create_prescription(
        State(config),
        Json(CreatePrescriptionRequest {
            patient_name: "Keerthika".to_string(),
            notes: None,
            file_path: "uploads/prescriptions/rx-001.pdf".to_string(),
            original_name: "rx-001.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 52_431,
        }),
    )
    .await
    .expect("create should succeed");

    assert_eq!(result.0["status"], "pending");
}

#[tokio::test]
async fn prescription_status_can_be_approved() {
    let mock_server = MockServer::start().await;
    let prescription_id = MockStoreRows::new_id();

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/prescriptions"))
        .and(body_partial_json(json!({ "status": "approved" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreRows::prescription(&prescription_id, "Keerthika", "approved")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::update_prescription_status(
        State(config),
        Path(prescription_id),
        Json(UpdatePrescriptionStatusRequest {
            status: PrescriptionStatus::Approved,
        }),
    )
    .await
    .expect("status update should succeed");

    assert_eq!(result.0["status"], "approved");
}

#[tokio::test]
async fn unknown_medicine_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/medicines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store_url(&mock_server.uri()).to_arc();

    let result = handlers::get_medicine(State(config), Path(MockStoreRows::new_id())).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
