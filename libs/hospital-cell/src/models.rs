use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coordinates as stored on hospital documents and supplied by clients for
/// nearby searches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub email: Option<String>,
    pub location: GeoPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHospitalRequest {
    pub name: String,
    pub city: String,
    pub email: Option<String>,
    pub location: GeoPoint,
}
