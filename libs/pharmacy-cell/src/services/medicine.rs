use anyhow::Result;
use serde_json::{json, Map, Value};
use tracing::info;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{
    CreateMedicineRequest, Medicine, UpdateMedicineRequest, DEFAULT_MEDICINE_IMAGE,
};

const COLLECTION: &str = "medicines";

pub struct MedicineService {
    store: StoreClient,
}

impl MedicineService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
        }
    }

    /// Catalog listing. Inactive medicines are hidden unless explicitly
    /// requested.
    pub async fn list(
        &self,
        category: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<Medicine>> {
        let mut filters: Vec<(&str, String)> = Vec::new();

        if let Some(category) = category {
            filters.push(("category", category.to_string()));
        }
        if !include_inactive {
            filters.push(("is_active", "true".to_string()));
        }

        self.store.find(COLLECTION, &filters).await
    }

    pub async fn get(&self, medicine_id: &str) -> Result<Option<Medicine>> {
        self.store.find_by_id(COLLECTION, medicine_id).await
    }

    pub async fn create(&self, request: CreateMedicineRequest) -> Result<Medicine> {
        let document = json!({
            "name": request.name,
            "description": request.description,
            "price": request.price,
            "category": request.category,
            "image": request.image.unwrap_or_else(|| DEFAULT_MEDICINE_IMAGE.to_string()),
            "stock": request.stock.unwrap_or(0),
            "requires_prescription": request.requires_prescription.unwrap_or(false),
            "manufacturer": request.manufacturer,
            "is_active": true,
        });

        self.store.insert(COLLECTION, document).await
    }

    pub async fn update(
        &self,
        medicine_id: &str,
        request: UpdateMedicineRequest,
    ) -> Result<Option<Medicine>> {
        let mut patch = Map::new();

        if let Some(name) = request.name {
            patch.insert("name".to_string(), json!(name));
        }
        if let Some(description) = request.description {
            patch.insert("description".to_string(), json!(description));
        }
        if let Some(price) = request.price {
            patch.insert("price".to_string(), json!(price));
        }
        if let Some(category) = request.category {
            patch.insert("category".to_string(), json!(category));
        }
        if let Some(image) = request.image {
            patch.insert("image".to_string(), json!(image));
        }
        if let Some(stock) = request.stock {
            patch.insert("stock".to_string(), json!(stock));
        }
        if let Some(requires_prescription) = request.requires_prescription {
            patch.insert(
                "requires_prescription".to_string(),
                json!(requires_prescription),
            );
        }
        if let Some(manufacturer) = request.manufacturer {
            patch.insert("manufacturer".to_string(), json!(manufacturer));
        }
        if let Some(is_active) = request.is_active {
            patch.insert("is_active".to_string(), json!(is_active));
        }

        if patch.is_empty() {
            return self.get(medicine_id).await;
        }

        self.store
            .update_by_id(COLLECTION, medicine_id, Value::Object(patch))
            .await
    }

    /// Soft delete: the row stays for order history, the catalog stops
    /// listing it.
    pub async fn deactivate(&self, medicine_id: &str) -> Result<Option<Medicine>> {
        let deactivated = self
            .store
            .update_by_id(COLLECTION, medicine_id, json!({ "is_active": false }))
            .await?;

        if deactivated.is_some() {
            info!("Medicine {} deactivated", medicine_id);
        }

        Ok(deactivated)
    }
}
