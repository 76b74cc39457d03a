use anyhow::Result;
use serde_json::json;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{CreateHospitalRequest, Hospital};

const COLLECTION: &str = "hospitals";

pub struct HospitalService {
    store: StoreClient,
}

impl HospitalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// All hospitals, optionally narrowed to one city. City matching is
    /// case-insensitive: documents store the city lowercased.
    pub async fn list(&self, city: Option<&str>) -> Result<Vec<Hospital>> {
        match city {
            Some(city) => {
                let city = city.to_lowercase();
                debug!("Listing hospitals in {}", city);
                self.store.find(COLLECTION, &[("city", city)]).await
            }
            None => self.store.find(COLLECTION, &[]).await,
        }
    }

    pub async fn get(&self, hospital_id: &str) -> Result<Option<Hospital>> {
        self.store.find_by_id(COLLECTION, hospital_id).await
    }

    pub async fn create(&self, request: CreateHospitalRequest) -> Result<Hospital> {
        let document = json!({
            "name": request.name,
            "city": request.city.to_lowercase(),
            "email": request.email,
            "location": request.location,
        });

        self.store.insert(COLLECTION, document).await
    }
}
