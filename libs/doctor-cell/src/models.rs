use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use hospital_cell::models::GeoPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub hospital_id: Uuid,
    pub city: String,
    pub email: Option<String>,
    pub experience: i32,
    pub fees: i32,
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialization: String,
    pub hospital_id: Uuid,
    pub city: String,
    pub email: Option<String>,
    pub experience: i32,
    pub fees: i32,
    pub rating: Option<f32>,
}

/// Body of `POST /api/doctors/nearby`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    pub problem: String,
    pub user_location: Option<GeoPoint>,
    pub city: Option<String>,
}

/// One row of the nearby-doctor response: the doctor flattened together with
/// the hospital name and the distance from the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyDoctor {
    pub doctor_name: String,
    pub specialization: String,
    pub hospital: String,
    /// `"3.42 km"`, or `"N/A"` when the caller sent no location.
    pub distance: String,
    pub fees: i32,
    pub rating: f32,
    pub email: Option<String>,
    pub doctor_id: Uuid,
    pub doctor_info: Doctor,
}

#[derive(Debug, Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}
