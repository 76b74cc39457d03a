use tracing::{debug, info};

use shared_config::AppConfig;
use shared_utils::geo::haversine_km;

use hospital_cell::models::Hospital;
use hospital_cell::services::hospital::HospitalService;

use crate::models::{DoctorError, NearbyDoctor, NearbySearchRequest};
use crate::services::doctor::DoctorService;

/// Symptom keyword to specialization. Keywords outside this table skip the
/// specialization filter entirely.
const PROBLEM_MAP: [(&str, &str); 7] = [
    ("fever", "General Physician"),
    ("skin", "Dermatologist"),
    ("headache", "Neurologist"),
    ("stomach", "Gastroenterologist"),
    ("back", "Orthopedist"),
    ("anxiety", "Psychiatrist"),
    ("eye", "Ophthalmologist"),
];

const SEARCH_RADIUS_KM: f64 = 10.0;
const DEFAULT_CITY: &str = "bhimavaram";

pub fn specialization_for(problem: &str) -> Option<&'static str> {
    let problem = problem.trim().to_lowercase();
    PROBLEM_MAP
        .iter()
        .find(|(keyword, _)| *keyword == problem)
        .map(|(_, specialization)| *specialization)
}

pub struct NearbyMatchingService {
    hospital_service: HospitalService,
    doctor_service: DoctorService,
}

impl NearbyMatchingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            hospital_service: HospitalService::new(config),
            doctor_service: DoctorService::new(config),
        }
    }

    /// Hospitals in the target city (optionally within the search radius of
    /// the caller), and their doctors matching the symptom's specialization.
    pub async fn find_nearby(
        &self,
        request: NearbySearchRequest,
    ) -> Result<Vec<NearbyDoctor>, DoctorError> {
        let specialization = specialization_for(&request.problem);
        let target_city = request
            .city
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        debug!(
            "Nearby search: problem={}, specialization={:?}, city={}",
            request.problem, specialization, target_city
        );

        let hospitals = self
            .hospital_service
            .list(Some(&target_city))
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))?;

        // Distance is only known when the caller shared a location; without
        // one every hospital in the city qualifies.
        let nearby: Vec<(Hospital, Option<f64>)> = match request.user_location {
            Some(user) => hospitals
                .into_iter()
                .map(|hospital| {
                    let distance = haversine_km(
                        user.lat,
                        user.lng,
                        hospital.location.lat,
                        hospital.location.lng,
                    );
                    (hospital, Some(distance))
                })
                .filter(|(_, distance)| distance.unwrap() <= SEARCH_RADIUS_KM)
                .collect(),
            None => hospitals
                .into_iter()
                .map(|hospital| (hospital, None))
                .collect(),
        };

        if nearby.is_empty() {
            return Ok(Vec::new());
        }

        let hospital_ids: Vec<_> = nearby.iter().map(|(h, _)| h.id).collect();

        let doctors = self
            .doctor_service
            .find_by_hospitals(&hospital_ids, specialization)
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))?;

        let results: Vec<NearbyDoctor> = doctors
            .into_iter()
            .filter_map(|doctor| {
                let (hospital, distance) = nearby
                    .iter()
                    .find(|(h, _)| h.id == doctor.hospital_id)?;

                Some(NearbyDoctor {
                    doctor_name: doctor.name.clone(),
                    specialization: doctor.specialization.clone(),
                    hospital: hospital.name.clone(),
                    distance: match distance {
                        Some(km) => format!("{:.2} km", km),
                        None => "N/A".to_string(),
                    },
                    fees: doctor.fees,
                    rating: doctor.rating,
                    email: doctor.email.clone(),
                    doctor_id: doctor.id,
                    doctor_info: doctor,
                })
            })
            .collect();

        info!(
            "Nearby search matched {} doctors across {} hospitals",
            results.len(),
            hospital_ids.len()
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_symptoms_resolve_to_specializations() {
        assert_eq!(specialization_for("fever"), Some("General Physician"));
        assert_eq!(specialization_for("skin"), Some("Dermatologist"));
        assert_eq!(specialization_for("eye"), Some("Ophthalmologist"));
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        assert_eq!(specialization_for(" Fever "), Some("General Physician"));
        assert_eq!(specialization_for("HEADACHE"), Some("Neurologist"));
    }

    #[test]
    fn unmapped_symptoms_have_no_specialization() {
        assert_eq!(specialization_for("toothache"), None);
        assert_eq!(specialization_for(""), None);
    }
}
