use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::CreateLabRequest;
use crate::services::lab::LabService;

#[derive(Debug, Deserialize)]
pub struct LabListQuery {
    pub city: Option<String>,
}

#[axum::debug_handler]
pub async fn list_labs(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<LabListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = LabService::new(&state);

    let labs = service
        .list(query.city.as_deref())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(labs)))
}

#[axum::debug_handler]
pub async fn get_lab(
    State(state): State<Arc<AppConfig>>,
    Path(lab_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = LabService::new(&state);

    let lab = service
        .get(&lab_id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Lab not found".to_string()))?;

    Ok(Json(json!(lab)))
}

#[axum::debug_handler]
pub async fn create_lab(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateLabRequest>,
) -> Result<Json<Value>, AppError> {
    if request.name.trim().is_empty() || request.city.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and city are required".to_string(),
        ));
    }

    let service = LabService::new(&state);

    let lab = service
        .create(request)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(lab)))
}
