use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, NearbySearchRequest};
use crate::services::doctor::DoctorService;
use crate::services::matching::NearbyMatchingService;

#[derive(Debug, Deserialize)]
pub struct DoctorListQuery {
    pub city: Option<String>,
}

#[axum::debug_handler]
pub async fn nearby_doctors(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<NearbySearchRequest>,
) -> Result<Json<Value>, AppError> {
    if request.problem.trim().is_empty() {
        return Err(AppError::BadRequest("problem is required".to_string()));
    }

    let matching_service = NearbyMatchingService::new(&state);

    let doctors = matching_service
        .find_nearby(request)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<DoctorListQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctors = doctor_service
        .list(query.city.as_deref())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(doctors)))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .get(&doctor_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    if request.name.trim().is_empty() || request.specialization.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and specialization are required".to_string(),
        ));
    }

    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .create(request)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(doctor)))
}
