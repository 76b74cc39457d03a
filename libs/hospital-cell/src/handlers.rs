use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::CreateHospitalRequest;
use crate::services::hospital::HospitalService;

#[derive(Debug, Deserialize)]
pub struct HospitalListQuery {
    pub city: Option<String>,
}

#[axum::debug_handler]
pub async fn list_hospitals(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<HospitalListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = HospitalService::new(&state);

    let hospitals = service
        .list(query.city.as_deref())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(hospitals)))
}

#[axum::debug_handler]
pub async fn get_hospital(
    State(state): State<Arc<AppConfig>>,
    Path(hospital_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = HospitalService::new(&state);

    let hospital = service
        .get(&hospital_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Hospital not found".to_string()))?;

    Ok(Json(json!(hospital)))
}

#[axum::debug_handler]
pub async fn create_hospital(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateHospitalRequest>,
) -> Result<Json<Value>, AppError> {
    if request.name.trim().is_empty() || request.city.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and city are required".to_string(),
        ));
    }

    let service = HospitalService::new(&state);

    let hospital = service
        .create(request)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(hospital)))
}
