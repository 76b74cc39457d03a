use anyhow::Result;
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{CreateDoctorRequest, Doctor};

const COLLECTION: &str = "doctors";

pub struct DoctorService {
    store: StoreClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list(&self, city: Option<&str>) -> Result<Vec<Doctor>> {
        match city {
            Some(city) => {
                self.store
                    .find(COLLECTION, &[("city", city.to_lowercase())])
                    .await
            }
            None => self.store.find(COLLECTION, &[]).await,
        }
    }

    pub async fn get(&self, doctor_id: &str) -> Result<Option<Doctor>> {
        self.store.find_by_id(COLLECTION, doctor_id).await
    }

    /// Doctors attached to any of the given hospitals, optionally narrowed to
    /// one specialization.
    pub async fn find_by_hospitals(
        &self,
        hospital_ids: &[Uuid],
        specialization: Option<&str>,
    ) -> Result<Vec<Doctor>> {
        let ids: Vec<String> = hospital_ids.iter().map(|id| id.to_string()).collect();

        let filters = match specialization {
            Some(specialization) => vec![("specialization", specialization.to_string())],
            None => vec![],
        };

        self.store
            .find_where_in(COLLECTION, "hospital_id", &ids, &filters)
            .await
    }

    pub async fn create(&self, request: CreateDoctorRequest) -> Result<Doctor> {
        let document = json!({
            "name": request.name,
            "specialization": request.specialization,
            "hospital_id": request.hospital_id,
            "city": request.city.to_lowercase(),
            "email": request.email,
            "experience": request.experience,
            "fees": request.fees,
            "rating": request.rating.unwrap_or(0.0),
        });

        self.store.insert(COLLECTION, document).await
    }
}
