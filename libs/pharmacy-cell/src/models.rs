use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_MEDICINE_IMAGE: &str = "uploads/medicines/default.jpeg";

// ==============================================================================
// MEDICINES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    /// Relative path of the catalog image.
    pub image: String,
    pub stock: i32,
    pub requires_prescription: bool,
    pub manufacturer: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMedicineRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: Option<String>,
    pub stock: Option<i32>,
    pub requires_prescription: Option<bool>,
    pub manufacturer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMedicineRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub stock: Option<i32>,
    pub requires_prescription: Option<bool>,
    pub manufacturer: Option<String>,
    pub is_active: Option<bool>,
}

// ==============================================================================
// PRESCRIPTIONS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrescriptionStatus::Pending => write!(f, "pending"),
            PrescriptionStatus::Approved => write!(f, "approved"),
            PrescriptionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Uploaded prescription metadata. The file itself lives outside this
/// service; only its descriptor is tracked here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_name: String,
    pub notes: Option<String>,
    pub file_path: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub status: PrescriptionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrescriptionRequest {
    pub patient_name: String,
    pub notes: Option<String>,
    pub file_path: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePrescriptionStatusRequest {
    pub status: PrescriptionStatus,
}
