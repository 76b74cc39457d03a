use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::{json, Value};

use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use hospital_cell::router::hospital_routes;
use lab_cell::router::lab_routes;
use pharmacy_cell::router::{medicine_routes, prescription_routes};
use shared_config::AppConfig;
use shared_mailer::Mailer;
use slot_cell::router::slot_routes;

pub fn create_router(state: Arc<AppConfig>, mailer: Arc<Mailer>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/hospitals", hospital_routes(state.clone()))
        .nest("/api/doctors", doctor_routes(state.clone()))
        .nest("/api/slots", slot_routes(state.clone()))
        .nest("/api/appointments", appointment_routes(state.clone()))
        .nest("/api/labs", lab_routes(state.clone()))
        .nest("/api/medicines", medicine_routes(state.clone()))
        .nest("/api/prescriptions", prescription_routes(state))
        .layer(Extension(mailer))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "Server is running" }))
}
