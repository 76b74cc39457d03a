use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use shared_config::{AppConfig, MailConfig};

pub struct TestConfig {
    pub database_url: String,
    pub database_api_key: String,
    pub backend_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            database_url: "http://localhost:54321".to_string(),
            database_api_key: "test-api-key".to_string(),
            backend_url: "http://localhost:5000".to_string(),
        }
    }
}

impl TestConfig {
    /// Config whose store points at a wiremock server.
    pub fn with_store_url(url: &str) -> Self {
        Self {
            database_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            port: 5000,
            frontend_url: "http://localhost:5173".to_string(),
            backend_url: self.backend_url.clone(),
            database_url: self.database_url.clone(),
            database_api_key: self.database_api_key.clone(),
            mail: MailConfig {
                host: "localhost".to_string(),
                port: 587,
                secure: false,
                username: String::new(),
                password: String::new(),
                from: String::new(),
            },
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned store rows for wiremock-backed tests.
pub struct MockStoreRows;

impl MockStoreRows {
    pub fn hospital(id: &str, name: &str, city: &str, lat: f64, lng: f64) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "city": city,
            "email": format!("contact@{}.example", name.to_lowercase().replace(' ', "-")),
            "location": { "lat": lat, "lng": lng }
        })
    }

    pub fn doctor(id: &str, name: &str, specialization: &str, hospital_id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "specialization": specialization,
            "hospital_id": hospital_id,
            "city": "bhimavaram",
            "email": "doctor@example.com",
            "experience": 10,
            "fees": 500,
            "rating": 4.5
        })
    }

    pub fn slot(id: &str, doctor_id: &str, date: &str, period: &str, is_booked: bool) -> serde_json::Value {
        json!({
            "id": id,
            "doctor_id": doctor_id,
            "date": date,
            "time": period,
            "period": period,
            "is_booked": is_booked
        })
    }

    pub fn appointment(id: &str, doctor_id: &str, slot_id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "doctor_id": doctor_id,
            "slot_id": slot_id,
            "consultation_type": "in-person",
            "meet_link": null,
            "status": status,
            "patient": {
                "name": "Test Patient",
                "email": "patient@example.com",
                "phone": "9999999999"
            },
            "symptoms": "fever",
            "created_at": "2025-01-01T00:00:00Z"
        })
    }

    pub fn lab(id: &str, name: &str, city: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "city": city,
            "address": null,
            "lab_type": "Pathology",
            "rating": 4.2,
            "tests": [
                { "code": "CBC", "name": "Complete Blood Count (Blood Test)", "price": 400, "category": "Basic Health" }
            ]
        })
    }

    pub fn medicine(id: &str, name: &str, category: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": "Test medicine",
            "price": 45.0,
            "category": category,
            "image": "uploads/medicines/default.jpeg",
            "stock": 20,
            "requires_prescription": false,
            "manufacturer": "Test Pharma",
            "is_active": true
        })
    }

    pub fn prescription(id: &str, patient_name: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "patient_name": patient_name,
            "notes": null,
            "file_path": "uploads/prescriptions/test.pdf",
            "original_name": "test.pdf",
            "mime_type": "application/pdf",
            "size": 1024,
            "status": status
        })
    }

    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}
