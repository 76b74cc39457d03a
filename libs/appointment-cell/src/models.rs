use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use slot_cell::models::SlotError;

/// Sentinel stored when a booking arrives without contact details. Patient
/// notifications are suppressed for it.
pub const NOT_PROVIDED: &str = "Not Provided";

/// Name stored when a booking arrives without any patient information.
pub const GUEST_PATIENT: &str = "Guest User";

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub slot_id: Uuid,
    pub consultation_type: ConsultationType,
    pub meet_link: Option<String>,
    pub status: AppointmentStatus,
    pub patient: PatientContact,
    pub symptoms: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationType {
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "in-person")]
    InPerson,
}

impl ConsultationType {
    /// Human-readable label used in notification mail.
    pub fn label(&self) -> &'static str {
        match self {
            ConsultationType::Video => "Video Consultation",
            ConsultationType::InPerson => "In-Person Visit",
        }
    }
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationType::Video => write!(f, "video"),
            ConsultationType::InPerson => write!(f, "in-person"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl PatientContact {
    /// Whether the stored email is a real address rather than the sentinel.
    pub fn has_contact_email(&self) -> bool {
        !self.email.trim().is_empty() && self.email != NOT_PROVIDED
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Patient field of the booking request. Older clients send a bare name
/// string; newer ones send the full contact object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatientInput {
    Name(String),
    Contact {
        name: String,
        email: Option<String>,
        phone: Option<String>,
    },
}

impl PatientInput {
    pub fn resolve(input: Option<Self>) -> PatientContact {
        fn or_sentinel(value: Option<String>) -> String {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| NOT_PROVIDED.to_string())
        }

        match input {
            None => PatientContact {
                name: GUEST_PATIENT.to_string(),
                email: NOT_PROVIDED.to_string(),
                phone: NOT_PROVIDED.to_string(),
            },
            Some(PatientInput::Name(name)) => PatientContact {
                name,
                email: NOT_PROVIDED.to_string(),
                phone: NOT_PROVIDED.to_string(),
            },
            Some(PatientInput::Contact { name, email, phone }) => PatientContact {
                name,
                email: or_sentinel(email),
                phone: or_sentinel(phone),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: Uuid,
    pub slot_id: Uuid,
    pub consultation_type: ConsultationType,
    pub patient: Option<PatientInput>,
    pub symptoms: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMeetLinkRequest {
    pub meet_link: String,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Slot already booked")]
    SlotAlreadyBooked,

    #[error("Slot not found")]
    SlotNotFound,

    #[error("Cannot change status from {0} to {1}")]
    InvalidStatusTransition(AppointmentStatus, AppointmentStatus),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<SlotError> for AppointmentError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::AlreadyBooked => AppointmentError::SlotAlreadyBooked,
            SlotError::NotFound => AppointmentError::SlotNotFound,
            SlotError::Database(msg) => AppointmentError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_input_fills_sentinels() {
        let patient =
            PatientInput::resolve(Some(PatientInput::Name("Keerthika".to_string())));

        assert_eq!(patient.name, "Keerthika");
        assert_eq!(patient.email, NOT_PROVIDED);
        assert_eq!(patient.phone, NOT_PROVIDED);
        assert!(!patient.has_contact_email());
    }

    #[test]
    fn full_contact_input_is_kept() {
        let patient = PatientInput::resolve(Some(PatientInput::Contact {
            name: "Keerthika".to_string(),
            email: Some("keerthika@example.com".to_string()),
            phone: Some("9876543210".to_string()),
        }));

        assert_eq!(patient.email, "keerthika@example.com");
        assert!(patient.has_contact_email());
    }

    #[test]
    fn missing_patient_becomes_guest() {
        let patient = PatientInput::resolve(None);

        assert_eq!(patient.name, GUEST_PATIENT);
        assert!(!patient.has_contact_email());
    }

    #[test]
    fn blank_email_counts_as_not_provided() {
        let patient = PatientInput::resolve(Some(PatientInput::Contact {
            name: "Keerthika".to_string(),
            email: Some("   ".to_string()),
            phone: None,
        }));

        assert_eq!(patient.email, NOT_PROVIDED);
        assert!(!patient.has_contact_email());
    }

    #[test]
    fn untagged_patient_field_parses_both_shapes() {
        let from_string: PatientInput = serde_json::from_value(serde_json::json!("Ravi")).unwrap();
        assert!(matches!(from_string, PatientInput::Name(_)));

        let from_object: PatientInput = serde_json::from_value(serde_json::json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "phone": "9876543210"
        }))
        .unwrap();
        assert!(matches!(from_object, PatientInput::Contact { .. }));
    }
}
