use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::warn;

use shared_config::AppConfig;
use shared_mailer::Mailer;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, CreateAppointmentRequest, UpdateMeetLinkRequest, UpdateStatusRequest,
};
use crate::services::booking::AppointmentBookingService;
use crate::services::notify::NotificationService;

fn to_app_error(err: AppointmentError) -> AppError {
    match err {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::SlotNotFound => AppError::NotFound("Slot not found".to_string()),
        AppointmentError::SlotAlreadyBooked => {
            AppError::Conflict("Slot already booked".to_string())
        }
        AppointmentError::InvalidStatusTransition(_, _) => AppError::BadRequest(err.to_string()),
        AppointmentError::Database(msg) => AppError::Database(msg),
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(mailer): Extension<Arc<Mailer>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let doctor_id = request.doctor_id.to_string();
    let (appointment, slot) = booking_service
        .create(request)
        .await
        .map_err(to_app_error)?;

    // The response never waits on SMTP: the doctor notification runs on its
    // own task and only logs failures.
    let response = json!(appointment);
    let config = Arc::clone(&state);
    tokio::spawn(async move {
        let booking_service = AppointmentBookingService::new(&config);
        let notifier = NotificationService::new(mailer, config.backend_url.clone());

        match booking_service.doctor_with_fallback_email(&doctor_id).await {
            Ok(Some((doctor, hospital_email))) => {
                notifier
                    .notify_doctor_of_request(
                        &doctor,
                        hospital_email.as_deref(),
                        &appointment,
                        &slot,
                    )
                    .await;
            }
            Ok(None) => warn!("Doctor {} not found, skipping notification", doctor_id),
            Err(e) => warn!("Failed to load doctor for notification: {}", e),
        }
    });

    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointments = booking_service.list().await.map_err(to_app_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .get(&appointment_id)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let updated = booking_service
        .update_status(&appointment_id, request.status)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!(updated)))
}

#[axum::debug_handler]
pub async fn update_meet_link(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    Json(request): Json<UpdateMeetLinkRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let updated = booking_service
        .set_meet_link(&appointment_id, request.meet_link)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!(updated)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    booking_service
        .delete(&appointment_id)
        .await
        .map_err(to_app_error)?;

    Ok(Json(json!({ "message": "Appointment deleted" })))
}

/// Browser-clickable approve link embedded in the doctor notification mail.
/// The patient is notified before the page renders.
#[axum::debug_handler]
pub async fn approve_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(mailer): Extension<Arc<Mailer>>,
    Path(appointment_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .approve(&appointment_id)
        .await
        .map_err(to_app_error)?;

    let notifier = NotificationService::new(mailer, state.backend_url.clone());
    notifier.notify_patient_approved(&appointment).await;

    Ok(Html(
        r#"
      <div style="font-family: sans-serif; text-align: center; padding: 50px;">
        <h1 style="color: green;">&#9989; Appointment Approved</h1>
        <p>The patient has been notified via email.</p>
        <p>You can close this window.</p>
      </div>
    "#
        .to_string(),
    ))
}

/// Browser-clickable reject link: cancels, frees the slot, notifies the
/// patient, then renders the confirmation page.
#[axum::debug_handler]
pub async fn reject_appointment(
    State(state): State<Arc<AppConfig>>,
    Extension(mailer): Extension<Arc<Mailer>>,
    Path(appointment_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let (appointment, _released) = booking_service
        .reject(&appointment_id)
        .await
        .map_err(to_app_error)?;

    let notifier = NotificationService::new(mailer, state.backend_url.clone());
    notifier.notify_patient_rejected(&appointment).await;

    Ok(Html(
        r#"
      <div style="font-family: sans-serif; text-align: center; padding: 50px;">
        <h1 style="color: red;">&#10060; Appointment Rejected</h1>
        <p>The patient has been notified.</p>
        <p>You can close this window.</p>
      </div>
    "#
        .to_string(),
    ))
}
