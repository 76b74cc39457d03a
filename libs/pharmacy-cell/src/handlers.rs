use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    CreateMedicineRequest, CreatePrescriptionRequest, UpdateMedicineRequest,
    UpdatePrescriptionStatusRequest,
};
use crate::services::medicine::MedicineService;
use crate::services::prescription::PrescriptionService;

#[derive(Debug, Deserialize)]
pub struct MedicineListQuery {
    pub category: Option<String>,
    pub all: Option<bool>,
}

// ==============================================================================
// MEDICINE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_medicines(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<MedicineListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = MedicineService::new(&state);

    let medicines = service
        .list(query.category.as_deref(), query.all.unwrap_or(false))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(medicines)))
}

#[axum::debug_handler]
pub async fn get_medicine(
    State(state): State<Arc<AppConfig>>,
    Path(medicine_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = MedicineService::new(&state);

    let medicine = service
        .get(&medicine_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Medicine not found".to_string()))?;

    Ok(Json(json!(medicine)))
}

#[axum::debug_handler]
pub async fn create_medicine(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateMedicineRequest>,
) -> Result<Json<Value>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if request.price < 0.0 {
        return Err(AppError::Validation("price cannot be negative".to_string()));
    }

    let service = MedicineService::new(&state);

    let medicine = service
        .create(request)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(medicine)))
}

#[axum::debug_handler]
pub async fn update_medicine(
    State(state): State<Arc<AppConfig>>,
    Path(medicine_id): Path<String>,
    Json(request): Json<UpdateMedicineRequest>,
) -> Result<Json<Value>, AppError> {
    if let Some(price) = request.price {
        if price < 0.0 {
            return Err(AppError::Validation("price cannot be negative".to_string()));
        }
    }
    if let Some(stock) = request.stock {
        if stock < 0 {
            return Err(AppError::Validation("stock cannot be negative".to_string()));
        }
    }

    let service = MedicineService::new(&state);

    let medicine = service
        .update(&medicine_id, request)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Medicine not found".to_string()))?;

    Ok(Json(json!(medicine)))
}

#[axum::debug_handler]
pub async fn delete_medicine(
    State(state): State<Arc<AppConfig>>,
    Path(medicine_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = MedicineService::new(&state);

    service
        .deactivate(&medicine_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Medicine not found".to_string()))?;

    Ok(Json(json!({ "message": "Medicine deactivated" })))
}

// ==============================================================================
// PRESCRIPTION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_prescriptions(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);

    let prescriptions = service
        .list()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(prescriptions)))
}

#[axum::debug_handler]
pub async fn get_prescription(
    State(state): State<Arc<AppConfig>>,
    Path(prescription_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);

    let prescription = service
        .get(&prescription_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Prescription not found".to_string()))?;

    Ok(Json(json!(prescription)))
}

#[axum::debug_handler]
pub async fn create_prescription(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreatePrescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    if request.patient_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "patient_name is required".to_string(),
        ));
    }

    let service = PrescriptionService::new(&state);

    let prescription = service
        .create(request)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(prescription)))
}

#[axum::debug_handler]
pub async fn update_prescription_status(
    State(state): State<Arc<AppConfig>>,
    Path(prescription_id): Path<String>,
    Json(request): Json<UpdatePrescriptionStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PrescriptionService::new(&state);

    let prescription = service
        .update_status(&prescription_id, request.status)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Prescription not found".to_string()))?;

    Ok(Json(json!(prescription)))
}
