use anyhow::Result;
use serde_json::json;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{CreatePrescriptionRequest, Prescription, PrescriptionStatus};

const COLLECTION: &str = "prescriptions";

pub struct PrescriptionService {
    store: StoreClient,
}

impl PrescriptionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    pub async fn list(&self) -> Result<Vec<Prescription>> {
        self.store.find(COLLECTION, &[]).await
    }

    pub async fn get(&self, prescription_id: &str) -> Result<Option<Prescription>> {
        self.store.find_by_id(COLLECTION, prescription_id).await
    }

    pub async fn create(&self, request: CreatePrescriptionRequest) -> Result<Prescription> {
        let document = json!({
            "patient_name": request.patient_name,
            "notes": request.notes,
            "file_path": request.file_path,
            "original_name": request.original_name,
            "mime_type": request.mime_type,
            "size": request.size,
            "status": PrescriptionStatus::Pending,
        });

        self.store.insert(COLLECTION, document).await
    }

    pub async fn update_status(
        &self,
        prescription_id: &str,
        status: PrescriptionStatus,
    ) -> Result<Option<Prescription>> {
        self.store
            .update_by_id(COLLECTION, prescription_id, json!({ "status": status }))
            .await
    }
}
