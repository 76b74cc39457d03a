use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One diagnostic test offered by a lab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTest {
    pub code: String,
    pub name: String,
    pub price: i32,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lab {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub lab_type: Option<String>,
    pub rating: f32,
    pub tests: Vec<LabTest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabRequest {
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub lab_type: Option<String>,
    pub rating: Option<f32>,
    /// When omitted, a sample is drawn from the fixed test catalogs
    /// according to `lab_type`.
    pub tests: Option<Vec<LabTest>>,
}
