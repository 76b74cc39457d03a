use anyhow::Result;
use serde_json::json;
use tracing::info;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{CreateLabRequest, Lab};
use crate::services::catalog;

const COLLECTION: &str = "labs";

pub struct LabService {
    store: StoreClient,
}

impl LabService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list(&self, city: Option<&str>) -> Result<Vec<Lab>> {
        match city {
            Some(city) => {
                self.store
                    .find(COLLECTION, &[("city", city.to_lowercase())])
                    .await
            }
            None => self.store.find(COLLECTION, &[]).await,
        }
    }

    pub async fn get(&self, lab_id: &str) -> Result<Option<Lab>> {
        self.store.find_by_id(COLLECTION, lab_id).await
    }

    /// Create a lab. Without an explicit test list, the lab gets a sample
    /// from the fixed catalogs matching its type.
    pub async fn create(&self, request: CreateLabRequest) -> Result<Lab> {
        let tests = match request.tests {
            Some(tests) if !tests.is_empty() => tests,
            _ => catalog::default_tests_for(request.lab_type.as_deref()),
        };

        let document = json!({
            "name": request.name,
            "city": request.city.to_lowercase(),
            "address": request.address,
            "lab_type": request.lab_type,
            "rating": request.rating.unwrap_or(0.0),
            "tests": tests,
        });

        let lab: Lab = self.store.insert(COLLECTION, document).await?;
        info!("Lab {} created with {} tests", lab.id, lab.tests.len());
        Ok(lab)
    }
}
