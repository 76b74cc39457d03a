use rand::Rng;
use serde_json::json;
use tracing::{info, warn};

use doctor_cell::models::Doctor;
use doctor_cell::services::doctor::DoctorService;
use hospital_cell::services::hospital::HospitalService;
use shared_config::AppConfig;
use shared_database::StoreClient;
use slot_cell::models::Slot;
use slot_cell::services::slots::SlotService;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, ConsultationType,
    CreateAppointmentRequest, PatientInput,
};
use crate::services::lifecycle::AppointmentLifecycleService;

const COLLECTION: &str = "appointments";

const MEET_LINK_BASE: &str = "https://meet.google.com/";
const MEET_CODE_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const MEET_CODE_LEN: usize = 10;

pub struct AppointmentBookingService {
    store: StoreClient,
    slot_service: SlotService,
    doctor_service: DoctorService,
    hospital_service: HospitalService,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            slot_service: SlotService::new(config),
            doctor_service: DoctorService::new(config),
            hospital_service: HospitalService::new(config),
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    /// Book an appointment: claim the slot, then persist the appointment as
    /// pending. Returns the stored appointment together with the claimed
    /// slot (the notification mail needs its date and period).
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<(Appointment, Slot), AppointmentError> {
        let slot = self
            .slot_service
            .claim(&request.slot_id.to_string())
            .await?;

        let patient = PatientInput::resolve(request.patient);

        let meet_link = match request.consultation_type {
            ConsultationType::Video => Some(generate_meet_link()),
            ConsultationType::InPerson => None,
        };

        let document = json!({
            "doctor_id": request.doctor_id,
            "slot_id": request.slot_id,
            "consultation_type": request.consultation_type,
            "meet_link": meet_link,
            "status": AppointmentStatus::Pending,
            "patient": patient,
            "symptoms": request.symptoms,
            "created_at": chrono::Utc::now().to_rfc3339(),
        });

        let appointment: Appointment = match self.store.insert(COLLECTION, document).await {
            Ok(appointment) => appointment,
            Err(e) => {
                // The slot was claimed but the appointment never landed;
                // hand the slot back so it stays bookable.
                if let Err(release_err) =
                    self.slot_service.release(&request.slot_id.to_string()).await
                {
                    warn!("Failed to release slot after booking error: {}", release_err);
                }
                return Err(AppointmentError::Database(e.to_string()));
            }
        };

        info!(
            "Appointment {} booked for slot {} ({})",
            appointment.id, slot.id, appointment.consultation_type
        );

        Ok((appointment, slot))
    }

    pub async fn get(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.store
            .find_by_id(COLLECTION, appointment_id)
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .ok_or(AppointmentError::NotFound)
    }

    /// All appointments, newest first.
    pub async fn list(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.store
            .find_sorted(COLLECTION, &[], "created_at.desc")
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }

    pub async fn update_status(
        &self,
        appointment_id: &str,
        next: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get(appointment_id).await?;

        self.lifecycle.validate_transition(current.status, next)?;

        self.store
            .update_by_id(COLLECTION, appointment_id, json!({ "status": next }))
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn set_meet_link(
        &self,
        appointment_id: &str,
        meet_link: String,
    ) -> Result<Appointment, AppointmentError> {
        // Ensure the appointment exists so a bad id is a 404, not a silent
        // empty update.
        self.get(appointment_id).await?;

        self.store
            .update_by_id(COLLECTION, appointment_id, json!({ "meet_link": meet_link }))
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn delete(&self, appointment_id: &str) -> Result<(), AppointmentError> {
        self.get(appointment_id).await?;

        self.store
            .delete_by_id(COLLECTION, appointment_id)
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }

    /// Approve flow behind the emailed link.
    pub async fn approve(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.update_status(appointment_id, AppointmentStatus::Confirmed)
            .await
    }

    /// Reject flow behind the emailed link: cancel, then free the slot so it
    /// can be rebooked. The release is best-effort and reported back.
    pub async fn reject(
        &self,
        appointment_id: &str,
    ) -> Result<(Appointment, bool), AppointmentError> {
        let appointment = self
            .update_status(appointment_id, AppointmentStatus::Cancelled)
            .await?;

        let released = match self
            .slot_service
            .release(&appointment.slot_id.to_string())
            .await
        {
            Ok(released) => released,
            Err(e) => {
                warn!("Failed to release slot for rejected appointment: {}", e);
                false
            }
        };

        Ok((appointment, released))
    }

    /// The doctor for a booking together with the hospital's email, used as
    /// the notification fallback address.
    pub async fn doctor_with_fallback_email(
        &self,
        doctor_id: &str,
    ) -> Result<Option<(Doctor, Option<String>)>, AppointmentError> {
        let Some(doctor) = self
            .doctor_service
            .get(doctor_id)
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let hospital_email = self
            .hospital_service
            .get(&doctor.hospital_id.to_string())
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?
            .and_then(|hospital| hospital.email);

        Ok(Some((doctor, hospital_email)))
    }
}

/// A random meeting code in the Google Meet URL shape. Not a provisioned
/// meeting, only a placeholder link.
fn generate_meet_link() -> String {
    let mut rng = rand::thread_rng();
    let code: String = (0..MEET_CODE_LEN)
        .map(|_| MEET_CODE_CHARSET[rng.gen_range(0..MEET_CODE_CHARSET.len())] as char)
        .collect();

    format!("{}{}", MEET_LINK_BASE, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meet_links_have_the_expected_shape() {
        let link = generate_meet_link();
        let code = link.strip_prefix(MEET_LINK_BASE).expect("meet link prefix");

        assert_eq!(code.len(), MEET_CODE_LEN);
        assert!(code
            .bytes()
            .all(|b| MEET_CODE_CHARSET.contains(&b)));
    }
}
