use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::services::slots::SlotService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotListQuery {
    pub doctor_id: Option<String>,
    pub date: Option<String>,
}

#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<SlotListQuery>,
) -> Result<Json<Value>, AppError> {
    let (Some(doctor_id), Some(date)) = (query.doctor_id, query.date) else {
        return Err(AppError::BadRequest(
            "Missing doctorId or date".to_string(),
        ));
    };

    let slot_service = SlotService::new(&state);

    let slots = slot_service
        .get_or_generate(&doctor_id, &date)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(slots)))
}
